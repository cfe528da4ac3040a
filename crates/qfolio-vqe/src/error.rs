//! Error types for the vqe crate.

use qfolio_ising::IsingError;
use qfolio_sim::SimError;
use thiserror::Error;

/// Errors produced while setting up or running the variational loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqeError {
    /// Step size must be positive and finite.
    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    /// Finite-difference delta must be positive and finite.
    #[error("finite-difference delta must be positive and finite, got {0}")]
    InvalidDelta(f64),

    /// Degeneracy tolerance must be non-negative and finite.
    #[error("exact-solver tolerance must be non-negative and finite, got {0}")]
    InvalidTolerance(f64),

    /// Parameter vector does not match the ansatz.
    #[error("ansatz expects {expected} parameters, got {got}")]
    EmptyParameterVector {
        /// Parameter count of the ansatz.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// Simulation or expectation evaluation failed.
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    /// Building the Hamiltonian failed.
    #[error("problem error: {0}")]
    Ising(#[from] IsingError),
}

/// Result type for VQE operations.
pub type VqeResult<T> = Result<T, VqeError>;
