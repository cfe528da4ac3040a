//! The scalar function the optimizer minimises.

use qfolio_ising::IsingHamiltonian;
use qfolio_sim::{SimError, Statevector, StatevectorSimulator, hamiltonian_expectation};

use crate::ansatz::Ansatz;
use crate::error::VqeResult;

/// `θ ↦ ⟨ψ(θ)|H|ψ(θ)⟩` with the Hamiltonian offset left out.
///
/// Each evaluation builds the ansatz and simulates it from scratch, so an
/// `Objective` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Objective<'h> {
    hamiltonian: &'h IsingHamiltonian,
    ansatz: Ansatz,
    simulator: StatevectorSimulator,
}

impl<'h> Objective<'h> {
    /// Pair a Hamiltonian with an ansatz.
    ///
    /// Fails with [`SimError::UnsupportedTerm`] if any term touches a qubit
    /// the ansatz does not have.
    pub fn new(hamiltonian: &'h IsingHamiltonian, ansatz: Ansatz) -> VqeResult<Self> {
        let n = ansatz.num_qubits();
        if let Some(qubit) = hamiltonian.max_qubit().filter(|&q| q >= n) {
            return Err(SimError::UnsupportedTerm {
                qubit,
                n_qubits: n,
            }
            .into());
        }
        let simulator = StatevectorSimulator::new(n)?;
        Ok(Self {
            hamiltonian,
            ansatz,
            simulator,
        })
    }

    pub fn hamiltonian(&self) -> &IsingHamiltonian {
        self.hamiltonian
    }

    pub fn ansatz(&self) -> &Ansatz {
        &self.ansatz
    }

    /// Number of trainable parameters.
    pub fn num_parameters(&self) -> usize {
        self.ansatz.num_parameters()
    }

    /// The prepared state for `params`.
    pub fn state(&self, params: &[f64]) -> VqeResult<Statevector> {
        self.ansatz.apply(&self.simulator, params)
    }

    /// Σ_k c_k ⟨Z-string_k⟩, offset excluded.
    pub fn evaluate(&self, params: &[f64]) -> VqeResult<f64> {
        let state = self.state(params)?;
        Ok(hamiltonian_expectation(&state, self.hamiltonian)?)
    }

    /// [`evaluate`](Self::evaluate) plus the offset: the expected QUBO value.
    pub fn energy(&self, params: &[f64]) -> VqeResult<f64> {
        Ok(self.evaluate(params)? + self.hamiltonian.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VqeError;
    use approx::assert_abs_diff_eq;
    use qfolio_ising::ZString;

    fn small_hamiltonian() -> IsingHamiltonian {
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(0), 1.0);
        h.add_term(ZString::zz(0, 1), -0.5);
        h.add_offset(3.0);
        h
    }

    #[test]
    fn test_zero_angles_give_all_up() {
        let h = small_hamiltonian();
        let obj = Objective::new(&h, Ansatz::new(2, 1)).unwrap();
        assert_abs_diff_eq!(obj.evaluate(&[0.0; 4]).unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(obj.energy(&[0.0; 4]).unwrap(), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_final_layer_flip() {
        // RX(π) on qubit 0 in the final layer flips Z₀ and Z₀Z₁.
        let h = small_hamiltonian();
        let obj = Objective::new(&h, Ansatz::new(2, 1)).unwrap();
        let value = obj
            .evaluate(&[0.0, 0.0, std::f64::consts::PI, 0.0])
            .unwrap();
        assert_abs_diff_eq!(value, -1.0 + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_term_outside_ansatz_rejected() {
        let mut h = IsingHamiltonian::new(3);
        h.add_term(ZString::z(2), 1.0);
        let err = Objective::new(&h, Ansatz::new(2, 1)).unwrap_err();
        assert!(matches!(
            err,
            VqeError::Sim(SimError::UnsupportedTerm {
                qubit: 2,
                n_qubits: 2
            })
        ));
    }

    #[test]
    fn test_wrong_parameter_count() {
        let h = small_hamiltonian();
        let obj = Objective::new(&h, Ansatz::new(2, 1)).unwrap();
        assert!(matches!(
            obj.evaluate(&[0.0; 3]),
            Err(VqeError::EmptyParameterVector { .. })
        ));
    }
}
