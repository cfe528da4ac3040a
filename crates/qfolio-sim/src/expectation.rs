//! Exact Pauli-Z expectation values.
//!
//! Z strings are diagonal, so `⟨ψ|Z_{i₁}…Z_{iₖ}|ψ⟩` depends only on the
//! basis probabilities: `Σ_b |a_b|² · (−1)^{popcount(b & mask)}`.

use qfolio_ising::{IsingHamiltonian, ZString};

use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

fn check_term(pauli: &ZString, num_qubits: usize) -> SimResult<()> {
    match pauli.max_qubit() {
        Some(qubit) if qubit as usize >= num_qubits => Err(SimError::UnsupportedTerm {
            qubit,
            n_qubits: num_qubits as u32,
        }),
        _ => Ok(()),
    }
}

fn parity_sum(probabilities: &[f64], mask: usize) -> f64 {
    probabilities
        .iter()
        .enumerate()
        .map(|(b, p)| {
            if (b & mask).count_ones() % 2 == 0 {
                *p
            } else {
                -*p
            }
        })
        .sum()
}

/// `⟨state|pauli|state⟩`. The identity gives 1 without reading the state.
pub fn expectation(state: &Statevector, pauli: &ZString) -> SimResult<f64> {
    if pauli.is_identity() {
        return Ok(1.0);
    }
    check_term(pauli, state.num_qubits())?;
    Ok(parity_sum(&state.probabilities(), pauli.mask()))
}

/// `Σ_k c_k ⟨Z-string_k⟩` over the Hamiltonian's terms, offset excluded.
///
/// Probabilities are computed once and shared by every term.
pub fn hamiltonian_expectation(
    state: &Statevector,
    hamiltonian: &IsingHamiltonian,
) -> SimResult<f64> {
    let probabilities = state.probabilities();
    let mut total = 0.0;
    for (pauli, coeff) in hamiltonian.terms() {
        check_term(pauli, state.num_qubits())?;
        total += coeff * parity_sum(&probabilities, pauli.mask());
    }
    Ok(total)
}
