//! `qfolio-ising`: from portfolio statistics to a diagonal Ising Hamiltonian.
//!
//! The pipeline has two stages:
//!
//! 1. [`build_qubo`] restates the budget-constrained selection problem
//!
//!    maximise  μᵗx − q·xᵗΣx   subject to  Σxᵢ = budget
//!
//!    as an unconstrained minimisation `xᵗQx + offset` by adding the penalty
//!    `penalty·(Σxᵢ − budget)²`.
//! 2. [`to_ising`] substitutes `xᵢ = (1 − sᵢ)/2` and collects the result
//!    into single-Z and ZZ terms keyed by a canonical [`ZString`].
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::Array2;
//! use qfolio_ising::{ProblemSpec, build_qubo, to_ising};
//!
//! let spec = ProblemSpec::new(
//!     3,
//!     vec![0.1, 0.1, 0.1],
//!     Array2::eye(3) * 0.01,
//!     0.5,  // risk aversion
//!     2,    // budget
//!     3.0,  // penalty
//! );
//! let qubo = build_qubo(&spec).unwrap();
//! let hamiltonian = to_ising(&qubo);
//! assert_eq!(hamiltonian.num_terms(), 6);
//! ```

pub mod error;
pub mod ising;
pub mod problem;
pub mod qubo;
pub mod report;

pub use error::{IsingError, IsingResult};
pub use ising::{IsingHamiltonian, ZString, to_ising};
pub use problem::ProblemSpec;
pub use qubo::{QuadraticBinaryObjective, build_qubo};
pub use report::PortfolioReport;
