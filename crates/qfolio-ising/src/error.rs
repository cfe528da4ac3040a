//! Error types for the ising crate.

use thiserror::Error;

/// Errors produced while turning a portfolio problem into a Hamiltonian.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IsingError {
    /// An input array does not match the declared asset count.
    #[error("dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which input was malformed.
        what: &'static str,
        /// Expected length along the offending axis.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A scalar parameter is outside its admissible range.
    #[error("invalid problem parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for QUBO and Ising construction.
pub type IsingResult<T> = Result<T, IsingError>;
