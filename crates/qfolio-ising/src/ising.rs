//! Diagonal Ising Hamiltonians.
//!
//! An Ising Hamiltonian over `n` spins is
//!
//!   H = offset + Σ_k  c_k · Z_{k₁} Z_{k₂} … Z_{kₘ}
//!
//! Every term is a product of Pauli-Z operators and so is diagonal in the
//! computational basis: on basis state `|b⟩` the term evaluates to
//! `(−1)^(number of set bits of b among its qubits)`.
//!
//! # Example
//!
//! ```rust
//! use qfolio_ising::{IsingHamiltonian, ZString};
//!
//! // H = 0.5 − 1.0·Z₀Z₁ + 0.25·Z₁
//! let mut h = IsingHamiltonian::new(2);
//! h.add_term(ZString::identity(), 0.5);
//! h.add_term(ZString::zz(0, 1), -1.0);
//! h.add_term(ZString::z(1), 0.25);
//! assert_eq!(h.num_terms(), 2);
//! assert_eq!(h.offset(), 0.5);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::qubo::QuadraticBinaryObjective;

/// A product of Pauli-Z operators on a set of qubits.
///
/// Stored as a strictly ascending list of qubit indices. Because Z·Z = I,
/// a qubit listed twice cancels out, so `ZString::new([1, 0, 1])` is `Z₀`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZString {
    qubits: Vec<u32>,
}

impl ZString {
    /// Build the canonical Z string for the given qubits.
    pub fn new(qubits: impl IntoIterator<Item = u32>) -> Self {
        let mut sorted: Vec<u32> = qubits.into_iter().collect();
        sorted.sort_unstable();

        let mut canonical: Vec<u32> = Vec::with_capacity(sorted.len());
        for q in sorted {
            if canonical.last() == Some(&q) {
                canonical.pop();
            } else {
                canonical.push(q);
            }
        }
        Self { qubits: canonical }
    }

    /// The identity (no Z factors).
    pub fn identity() -> Self {
        Self { qubits: Vec::new() }
    }

    /// Single-qubit `Zᵢ`.
    pub fn z(qubit: u32) -> Self {
        Self {
            qubits: vec![qubit],
        }
    }

    /// Two-qubit `ZᵢZⱼ`.
    pub fn zz(q0: u32, q1: u32) -> Self {
        Self::new([q0, q1])
    }

    /// Qubit indices, ascending.
    pub fn qubits(&self) -> &[u32] {
        &self.qubits
    }

    /// True if this is the identity.
    pub fn is_identity(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Number of Z factors.
    pub fn weight(&self) -> usize {
        self.qubits.len()
    }

    /// Highest qubit index referenced, or `None` for the identity.
    pub fn max_qubit(&self) -> Option<u32> {
        self.qubits.last().copied()
    }

    /// Bit mask with bit `i` set for every qubit `i` in the string.
    ///
    /// Qubits at or past `usize::BITS` contribute no bit: no `usize` basis
    /// index can have them set, so they read +1 there.
    pub fn mask(&self) -> usize {
        self.qubits
            .iter()
            .fold(0usize, |m, &q| m | 1usize.checked_shl(q).unwrap_or(0))
    }

    /// Eigenvalue (±1) of this string on computational basis state `index`.
    #[inline]
    pub fn eigenvalue(&self, index: usize) -> f64 {
        if (index & self.mask()).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl fmt::Display for ZString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qubits.is_empty() {
            return write!(f, "I");
        }
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "Z[{q}]")?;
        }
        Ok(())
    }
}

/// A diagonal Hamiltonian: constant offset plus weighted [`ZString`] terms.
///
/// There is at most one entry per Z string; adding a term that already
/// exists accumulates into its coefficient. Identity contributions go to the
/// offset and never appear in [`terms`](Self::terms).
#[derive(Debug, Clone, PartialEq)]
pub struct IsingHamiltonian {
    num_qubits: u32,
    terms: BTreeMap<ZString, f64>,
    offset: f64,
}

impl IsingHamiltonian {
    /// An empty Hamiltonian over `num_qubits` spins.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            terms: BTreeMap::new(),
            offset: 0.0,
        }
    }

    /// Add `coeff · pauli`, aggregating with any existing entry.
    pub fn add_term(&mut self, pauli: ZString, coeff: f64) {
        if pauli.is_identity() {
            self.offset += coeff;
        } else {
            *self.terms.entry(pauli).or_insert(0.0) += coeff;
        }
    }

    /// Add a constant.
    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    /// Number of spins the Hamiltonian is defined over.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The constant offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The non-identity terms, ordered by Z string.
    pub fn terms(&self) -> impl Iterator<Item = (&ZString, f64)> + '_ {
        self.terms.iter().map(|(k, &v)| (k, v))
    }

    /// Coefficient of a term, if present.
    pub fn coefficient(&self, pauli: &ZString) -> Option<f64> {
        self.terms.get(pauli).copied()
    }

    /// Highest qubit index touched by any term, or `None` if there are no
    /// terms.
    pub fn max_qubit(&self) -> Option<u32> {
        self.terms.keys().filter_map(ZString::max_qubit).max()
    }

    /// Number of non-identity terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Σ |c_k| over the non-identity terms.
    pub fn lambda(&self) -> f64 {
        self.terms.values().map(|c| c.abs()).sum()
    }

    /// Drop terms whose coefficient magnitude is at most `tol`.
    pub fn prune(&mut self, tol: f64) {
        self.terms.retain(|_, c| c.abs() > tol);
    }

    /// Energy of the basis state `index` (offset included).
    pub fn energy_of_index(&self, index: usize) -> f64 {
        self.offset
            + self
                .terms
                .iter()
                .map(|(pauli, c)| c * pauli.eigenvalue(index))
                .sum::<f64>()
    }

    /// Energy of an explicit spin configuration `sᵢ ∈ {−1, +1}`.
    ///
    /// Spins beyond the end of `spins` are treated as +1.
    pub fn energy(&self, spins: &[i8]) -> f64 {
        let mut energy = self.offset;
        for (pauli, c) in &self.terms {
            let product: i32 = pauli
                .qubits()
                .iter()
                .map(|&q| i32::from(spins.get(q as usize).copied().unwrap_or(1)))
                .product();
            energy += c * f64::from(product);
        }
        energy
    }
}

impl fmt::Display for IsingHamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ising Hamiltonian ({} terms, {} qubits):",
            self.num_terms(),
            self.num_qubits
        )?;
        writeln!(f, "  {:+.6} I", self.offset)?;
        for (pauli, c) in &self.terms {
            writeln!(f, "  {c:+.6} {pauli}")?;
        }
        Ok(())
    }
}

/// Map a QUBO onto an Ising Hamiltonian via `xᵢ = (1 − sᵢ)/2`.
///
/// A diagonal entry contributes `Qᵢᵢ·xᵢ = Qᵢᵢ/2 − (Qᵢᵢ/2)·sᵢ`; each ordered
/// off-diagonal entry contributes
/// `Qᵢⱼ·xᵢxⱼ = (Qᵢⱼ/4)·(1 − sᵢ − sⱼ + sᵢsⱼ)`, so a symmetric pair lands on
/// the unordered `ZᵢZⱼ` key with weight `Qᵢⱼ/2`. The QUBO offset carries
/// over unchanged. Zero matrix entries produce no terms.
pub fn to_ising(qubo: &QuadraticBinaryObjective) -> IsingHamiltonian {
    let q = qubo.matrix();
    let n = qubo.num_vars();
    let mut hamiltonian = IsingHamiltonian::new(n as u32);
    hamiltonian.add_offset(qubo.offset());

    for i in 0..n {
        for j in 0..n {
            let qij = q[[i, j]];
            if qij == 0.0 {
                continue;
            }
            if i == j {
                hamiltonian.add_offset(qij / 2.0);
                hamiltonian.add_term(ZString::z(i as u32), -qij / 2.0);
            } else {
                let quarter = qij / 4.0;
                hamiltonian.add_offset(quarter);
                hamiltonian.add_term(ZString::z(i as u32), -quarter);
                hamiltonian.add_term(ZString::z(j as u32), -quarter);
                hamiltonian.add_term(ZString::zz(i as u32, j as u32), quarter);
            }
        }
    }

    debug!(
        n_qubits = n,
        n_terms = hamiltonian.num_terms(),
        offset = hamiltonian.offset(),
        "mapped QUBO onto Ising Hamiltonian"
    );
    hamiltonian
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstring_canonical_order() {
        let z = ZString::new([3, 0, 2]);
        assert_eq!(z.qubits(), &[0, 2, 3]);
        assert_eq!(ZString::zz(1, 0), ZString::zz(0, 1));
    }

    #[test]
    fn test_zstring_repeated_qubit_cancels() {
        assert_eq!(ZString::new([1, 0, 1]), ZString::z(0));
        assert!(ZString::new([2, 2]).is_identity());
    }

    #[test]
    fn test_zstring_eigenvalue() {
        let zz = ZString::zz(0, 2);
        assert_eq!(zz.eigenvalue(0b000), 1.0);
        assert_eq!(zz.eigenvalue(0b001), -1.0);
        assert_eq!(zz.eigenvalue(0b101), 1.0);
        assert_eq!(zz.eigenvalue(0b010), 1.0);
        assert_eq!(ZString::identity().eigenvalue(0b111), 1.0);
    }

    #[test]
    fn test_zstring_mask_wide_qubit() {
        let z = ZString::new([1, 70]);
        assert_eq!(z.mask(), 0b10);
        assert_eq!(z.eigenvalue(0b10), -1.0);
        assert_eq!(ZString::z(64).eigenvalue(usize::MAX), 1.0);
    }

    #[test]
    fn test_hamiltonian_max_qubit() {
        let mut h = IsingHamiltonian::new(2);
        assert_eq!(h.max_qubit(), None);
        h.add_term(ZString::z(0), 1.0);
        h.add_term(ZString::zz(1, 5), 0.5);
        h.add_offset(2.0);
        assert_eq!(h.max_qubit(), Some(5));
    }

    #[test]
    fn test_zstring_display() {
        assert_eq!(ZString::zz(0, 1).to_string(), "Z[0] Z[1]");
        assert_eq!(ZString::identity().to_string(), "I");
    }

    #[test]
    fn test_add_term_aggregates() {
        let mut h = IsingHamiltonian::new(3);
        h.add_term(ZString::zz(0, 2), 0.5);
        h.add_term(ZString::zz(2, 0), 0.25);
        h.add_term(ZString::identity(), 1.0);
        assert_eq!(h.num_terms(), 1);
        assert_eq!(h.coefficient(&ZString::zz(0, 2)), Some(0.75));
        assert_eq!(h.offset(), 1.0);
    }

    #[test]
    fn test_energy_forms_agree() {
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(0), 0.3);
        h.add_term(ZString::z(1), -0.7);
        h.add_term(ZString::zz(0, 1), 1.1);
        h.add_offset(0.2);

        for index in 0..4usize {
            let spins: Vec<i8> = (0..2).map(|i| 1 - 2 * ((index >> i) & 1) as i8).collect();
            assert!((h.energy(&spins) - h.energy_of_index(index)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_prune() {
        let mut h = IsingHamiltonian::new(2);
        h.add_term(ZString::z(0), 1e-15);
        h.add_term(ZString::z(1), 1.0);
        h.prune(1e-12);
        assert_eq!(h.num_terms(), 1);
        assert_eq!(h.lambda(), 1.0);
    }
}
