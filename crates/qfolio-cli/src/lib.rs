//! Argument parsing and problem-file loading for the `qfolio` binary.

pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, GradientArg, ProblemArgs, log_filter};
pub use config::ProblemConfig;
