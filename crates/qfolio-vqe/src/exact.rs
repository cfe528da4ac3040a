//! Brute-force ground states of a diagonal Hamiltonian.
//!
//! Every Z string is diagonal, so the spectrum is just the energy of each
//! basis state. Enumerating all 2ⁿ of them is the reference the variational
//! result is checked against.

use qfolio_ising::IsingHamiltonian;
use qfolio_sim::{Bitstring, MAX_QUBITS, SimError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{VqeError, VqeResult};

/// Minimum energy and every basis state that attains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactSolution {
    /// Ground-state energy, offset included.
    pub energy: f64,
    /// Degenerate ground states, ascending by index.
    pub ground_states: Vec<Bitstring>,
}

impl ExactSolution {
    /// True if `bitstring` is one of the ground states.
    pub fn contains(&self, bitstring: &Bitstring) -> bool {
        self.ground_states.contains(bitstring)
    }
}

/// Exhaustive diagonal solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactSolver {
    tolerance: f64,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self::new(1e-9)
    }
}

impl ExactSolver {
    /// States within `tolerance` of the minimum count as degenerate.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Enumerate the Hamiltonian's basis states.
    ///
    /// Fails with [`VqeError::InvalidTolerance`] unless the tolerance is
    /// finite and non-negative, and with [`SimError::UnsupportedTerm`] if a
    /// term touches a qubit outside the register.
    pub fn solve(&self, hamiltonian: &IsingHamiltonian) -> VqeResult<ExactSolution> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(VqeError::InvalidTolerance(self.tolerance));
        }
        let n = hamiltonian.num_qubits();
        if let Some(qubit) = hamiltonian.max_qubit().filter(|&q| q >= n) {
            return Err(SimError::UnsupportedTerm {
                qubit,
                n_qubits: n,
            }
            .into());
        }
        if n > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: n,
                max: MAX_QUBITS,
            }
            .into());
        }

        let energies: Vec<f64> = (0..1usize << n)
            .map(|index| hamiltonian.energy_of_index(index))
            .collect();
        let energy = energies.iter().copied().fold(f64::INFINITY, f64::min);
        let ground_states: Vec<Bitstring> = energies
            .iter()
            .enumerate()
            .filter(|(_, e)| **e - energy <= self.tolerance)
            .map(|(index, _)| Bitstring::new(index, n))
            .collect();

        debug!(energy, degeneracy = ground_states.len(), "exact ground states");
        Ok(ExactSolution {
            energy,
            ground_states,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfolio_ising::ZString;

    #[test]
    fn test_unique_ground_state() {
        // E = Z₀ − Z₁: minimum −2 at q0 = 1, q1 = 0 (index 1).
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(0), 1.0);
        h.add_term(ZString::z(1), -1.0);
        let sol = ExactSolver::default().solve(&h).unwrap();
        assert_eq!(sol.energy, -2.0);
        assert_eq!(sol.ground_states, vec![Bitstring::new(1, 2)]);
    }

    #[test]
    fn test_degenerate_ground_states() {
        // Antiferromagnetic pair: 01 and 10 both at −1.
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::zz(0, 1), 1.0);
        let sol = ExactSolver::default().solve(&h).unwrap();
        assert_eq!(sol.ground_states.len(), 2);
        assert_eq!(sol.ground_states[0].index(), 1);
        assert_eq!(sol.ground_states[1].index(), 2);
        assert!(sol.contains(&Bitstring::new(2, 2)));
        assert!(!sol.contains(&Bitstring::new(0, 2)));
    }

    #[test]
    fn test_out_of_range_term_rejected() {
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(0), 1.0);
        h.add_term(ZString::z(5), -3.0);
        let err = ExactSolver::default().solve(&h).unwrap_err();
        assert!(matches!(
            err,
            VqeError::Sim(SimError::UnsupportedTerm {
                qubit: 5,
                n_qubits: 2
            })
        ));

        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(70), 1.0);
        assert!(matches!(
            ExactSolver::default().solve(&h),
            Err(VqeError::Sim(SimError::UnsupportedTerm { qubit: 70, .. }))
        ));
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let mut h = IsingHamiltonian::new(1);
        h.add_term(ZString::z(0), 1.0);
        for tol in [-1e-3, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ExactSolver::new(tol).solve(&h),
                Err(VqeError::InvalidTolerance(_))
            ));
        }
        let sol = ExactSolver::new(0.0).solve(&h).unwrap();
        assert_eq!(sol.ground_states, vec![Bitstring::new(1, 1)]);
    }

    #[test]
    fn test_offset_included() {
        let mut h = IsingHamiltonian::new(1);
        h.add_term(ZString::z(0), 0.5);
        h.add_offset(4.0);
        assert_eq!(ExactSolver::default().solve(&h).unwrap().energy, 3.5);
    }
}
