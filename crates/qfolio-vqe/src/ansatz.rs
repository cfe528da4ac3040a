//! Layered RX + all-pairs CNOT ansatz.
//!
//! ```text
//! for layer in 0..L:
//!     RX(θ[layer·n + q]) on every qubit q
//!     CNOT(i → j) for every ordered pair i ≠ j, lexicographic
//! RX(θ[L·n + q]) on every qubit q
//! ```
//!
//! The topology is fixed; only the `(L + 1)·n` angles are trainable. Every
//! angle drives exactly one RX gate, which is what makes the two-point
//! parameter-shift rule exact for this circuit.

use qfolio_sim::{GateSequence, Statevector, StatevectorSimulator};

use crate::error::{VqeError, VqeResult};

/// Number of entangling layers used when none is configured.
pub const DEFAULT_LAYERS: usize = 1;

/// Fixed-topology parameterised circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ansatz {
    num_qubits: u32,
    layers: usize,
}

impl Ansatz {
    /// Ansatz with `layers` entangling layers on `num_qubits` qubits.
    pub fn new(num_qubits: u32, layers: usize) -> Self {
        Self { num_qubits, layers }
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    /// `(L + 1)·n`.
    pub fn num_parameters(&self) -> usize {
        (self.layers + 1) * self.num_qubits as usize
    }

    /// Check a parameter vector's length.
    pub fn check_parameters(&self, params: &[f64]) -> VqeResult<()> {
        if params.len() != self.num_parameters() {
            return Err(VqeError::EmptyParameterVector {
                expected: self.num_parameters(),
                got: params.len(),
            });
        }
        Ok(())
    }

    /// The gate sequence for `params`.
    pub fn gates(&self, params: &[f64]) -> VqeResult<GateSequence> {
        self.check_parameters(params)?;

        let n = self.num_qubits;
        let mut seq = GateSequence::new(n);
        let mut angles = params.iter().copied();
        for _ in 0..self.layers {
            for (q, theta) in (0..n).zip(angles.by_ref()) {
                seq.rx(q, theta);
            }
            for i in 0..n {
                for j in (0..n).filter(|&j| j != i) {
                    seq.cx(i, j);
                }
            }
        }
        for (q, theta) in (0..n).zip(angles) {
            seq.rx(q, theta);
        }
        Ok(seq)
    }

    /// Run the circuit for `params` on `simulator`.
    pub fn apply(
        &self,
        simulator: &StatevectorSimulator,
        params: &[f64],
    ) -> VqeResult<Statevector> {
        let seq = self.gates(params)?;
        Ok(simulator.run(&seq)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfolio_sim::Gate;

    #[test]
    fn test_parameter_count() {
        assert_eq!(Ansatz::new(3, 1).num_parameters(), 6);
        assert_eq!(Ansatz::new(3, 2).num_parameters(), 9);
        assert_eq!(Ansatz::new(4, 0).num_parameters(), 4);
    }

    #[test]
    fn test_gate_layout() {
        let ansatz = Ansatz::new(3, 1);
        let params = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let seq = ansatz.gates(&params).unwrap();

        // 3 RX + 6 CNOT + 3 RX
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.two_qubit_count(), 6);
        assert_eq!(seq.gates()[0], Gate::Rx { qubit: 0, theta: 0.1 });
        assert_eq!(seq.gates()[3], Gate::Cx { control: 0, target: 1 });
        assert_eq!(seq.gates()[4], Gate::Cx { control: 0, target: 2 });
        assert_eq!(seq.gates()[5], Gate::Cx { control: 1, target: 0 });
        assert_eq!(seq.gates()[8], Gate::Cx { control: 2, target: 1 });
        assert_eq!(seq.gates()[11], Gate::Rx { qubit: 2, theta: 0.6 });
    }

    #[test]
    fn test_layers_repeat_same_ladder() {
        let seq = Ansatz::new(2, 2).gates(&[0.0; 6]).unwrap();
        let cx: Vec<_> = seq
            .iter()
            .filter(|g| matches!(g, Gate::Cx { .. }))
            .copied()
            .collect();
        assert_eq!(
            cx,
            vec![
                Gate::Cx { control: 0, target: 1 },
                Gate::Cx { control: 1, target: 0 },
                Gate::Cx { control: 0, target: 1 },
                Gate::Cx { control: 1, target: 0 },
            ]
        );
    }

    #[test]
    fn test_length_mismatch() {
        let ansatz = Ansatz::new(3, 1);
        assert!(matches!(
            ansatz.gates(&[0.0; 5]),
            Err(VqeError::EmptyParameterVector {
                expected: 6,
                got: 5
            })
        ));
        assert!(ansatz.gates(&[]).is_err());
    }

    #[test]
    fn test_zero_angles_leave_ground_state() {
        let ansatz = Ansatz::new(3, 2);
        let sim = StatevectorSimulator::new(3).unwrap();
        let state = ansatz.apply(&sim, &[0.0; 9]).unwrap();
        assert!((state.probability(0) - 1.0).abs() < 1e-12);
    }
}
