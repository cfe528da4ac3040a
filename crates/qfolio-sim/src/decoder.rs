//! Reading a selection out of a final state.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::statevector::Statevector;

/// A computational basis state over `num_qubits` qubits.
///
/// Backed by its basis index. `Display` writes qubit 0 first, so the string
/// reads as an asset selection: `"110"` holds assets 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bitstring {
    index: usize,
    num_qubits: u32,
}

impl Bitstring {
    /// Wrap a basis index. Bits above `num_qubits` are masked off.
    pub fn new(index: usize, num_qubits: u32) -> Self {
        let mask = if num_qubits as usize >= usize::BITS as usize {
            usize::MAX
        } else {
            (1usize << num_qubits) - 1
        };
        Self {
            index: index & mask,
            num_qubits,
        }
    }

    /// Basis index (bit `i` is qubit `i`).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Value of qubit `qubit`.
    pub fn bit(&self, qubit: u32) -> bool {
        (self.index >> qubit) & 1 == 1
    }

    /// All bits, qubit 0 first.
    pub fn bits(&self) -> Vec<bool> {
        (0..self.num_qubits).map(|q| self.bit(q)).collect()
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.index.count_ones()
    }

    /// Indices of the set bits, ascending.
    pub fn selection(&self) -> Vec<usize> {
        (0..self.num_qubits)
            .filter(|&q| self.bit(q))
            .map(|q| q as usize)
            .collect()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.num_qubits {
            f.write_str(if self.bit(q) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// The most probable basis state. Ties go to the lowest index.
pub fn most_likely(state: &Statevector) -> Bitstring {
    let mut best = 0;
    let mut best_p = f64::NEG_INFINITY;
    for (index, p) in state.probabilities().into_iter().enumerate() {
        // Strict comparison keeps the earliest index on ties.
        if p > best_p {
            best = index;
            best_p = p;
        }
    }
    Bitstring::new(best, state.num_qubits() as u32)
}

/// Probability of every basis state.
pub fn distribution(state: &Statevector) -> FxHashMap<Bitstring, f64> {
    let n = state.num_qubits() as u32;
    state
        .probabilities()
        .into_iter()
        .enumerate()
        .map(|(index, p)| (Bitstring::new(index, n), p))
        .collect()
}

/// The `k` most probable basis states, most probable first.
///
/// Equal probabilities are ordered by ascending index.
pub fn top_k(state: &Statevector, k: usize) -> Vec<(Bitstring, f64)> {
    let n = state.num_qubits() as u32;
    let mut ranked: Vec<(usize, f64)> = state.probabilities().into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(k)
        .map(|(index, p)| (Bitstring::new(index, n), p))
        .collect()
}
