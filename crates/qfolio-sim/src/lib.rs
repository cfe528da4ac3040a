//! `qfolio-sim`: exact statevector simulation for diagonal Hamiltonians.
//!
//! Provides:
//!
//! - [`GateSequence`]: an explicit list of typed [`Gate`] records
//! - [`StatevectorSimulator`]: runs a sequence from |0…0⟩ on a dense
//!   amplitude vector of size 2ⁿ
//! - [`expectation`] / [`hamiltonian_expectation`]: exact ⟨Z…Z⟩ values from
//!   basis probabilities
//! - [`most_likely`], [`distribution`], [`top_k`]: decoding the final state
//!   into [`Bitstring`]s
//!
//! # Quick start
//!
//! ```rust
//! use qfolio_ising::ZString;
//! use qfolio_sim::{GateSequence, StatevectorSimulator, expectation, most_likely};
//!
//! let sim = StatevectorSimulator::new(2).unwrap();
//! let mut seq = GateSequence::new(2);
//! seq.x(0).cx(0, 1);
//!
//! let state = sim.run(&seq).unwrap();
//! assert_eq!(most_likely(&state).to_string(), "11");
//! assert!((expectation(&state, &ZString::zz(0, 1)).unwrap() - 1.0).abs() < 1e-12);
//! ```

pub mod decoder;
pub mod error;
pub mod expectation;
pub mod gate;
pub mod statevector;

pub use decoder::{Bitstring, distribution, most_likely, top_k};
pub use error::{SimError, SimResult};
pub use expectation::{expectation, hamiltonian_expectation};
pub use gate::{Gate, GateSequence};
pub use statevector::{MAX_QUBITS, Statevector, StatevectorSimulator};
