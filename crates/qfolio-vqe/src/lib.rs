//! `qfolio-vqe`: variational ground-state search for Ising Hamiltonians.
//!
//! An [`Ansatz`] turns a parameter vector into a gate sequence, an
//! [`Objective`] simulates it and measures the Hamiltonian, and
//! [`GradientDescent`] walks the parameters downhill using parameter-shift
//! (or finite-difference) gradients. [`ExactSolver`] enumerates the
//! diagonal for reference, and [`VqeRunner`] drives the whole loop.
//!
//! # Quick start
//!
//! ```rust
//! use qfolio_ising::{IsingHamiltonian, ZString};
//! use qfolio_vqe::{ExactSolver, VqeRunner};
//!
//! // H = Z₀Z₁ + 0.5·Z₀: ground state q0 = 1, q1 = 0.
//! let mut h = IsingHamiltonian::new(2);
//! h.add_term(ZString::zz(0, 1), 1.0);
//! h.add_term(ZString::z(0), 0.5);
//!
//! let outcome = VqeRunner::new(h.clone())
//!     .with_step_size(0.2)
//!     .with_steps(150)
//!     .with_seed(3)
//!     .run()
//!     .unwrap();
//! assert!(outcome.final_energy < outcome.trace.initial_value() + h.offset());
//!
//! let exact = ExactSolver::default().solve(&h).unwrap();
//! assert_eq!(exact.ground_states[0].index(), 0b01);
//! ```

pub mod ansatz;
pub mod error;
pub mod exact;
pub mod gradient;
pub mod objective;
pub mod optimizer;
pub mod runner;

pub use ansatz::{Ansatz, DEFAULT_LAYERS};
pub use error::{VqeError, VqeResult};
pub use exact::{ExactSolution, ExactSolver};
pub use gradient::{GradientMethod, gradient};
pub use objective::Objective;
pub use optimizer::{GradientDescent, OptimizationTrace, Optimizer, TraceEntry, optimize};
pub use runner::{VqeOutcome, VqeRunner, initial_parameters};
