//! CLI command implementations.

pub mod common;
pub mod exact;
pub mod hamiltonian;
pub mod run;
