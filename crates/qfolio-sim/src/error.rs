//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by statevector simulation and expectation evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A Hamiltonian term references a qubit the state does not have.
    #[error("term references qubit {qubit} but the state only has {n_qubits} qubits")]
    UnsupportedTerm {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the state.
        n_qubits: u32,
    },

    /// A gate targets a qubit outside the register.
    #[error("gate acts on qubit {qubit} but the register only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Register size.
        n_qubits: u32,
    },

    /// Requested register is larger than a dense statevector allows.
    #[error("{requested} qubits requested, the simulator supports at most {max}")]
    TooManyQubits {
        /// Requested qubit count.
        requested: u32,
        /// Configured limit.
        max: u32,
    },

    /// A gate is structurally invalid (e.g. control equals target).
    #[error("invalid gate: {0}")]
    InvalidGate(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
