//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use qfolio_vqe::{DEFAULT_LAYERS, GradientMethod};

/// qfolio - variational portfolio selection on a statevector simulator
#[derive(Debug, Parser)]
#[command(name = "qfolio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the problem comes from.
#[derive(Debug, Clone, Args)]
pub struct ProblemArgs {
    /// Problem file (YAML or JSON); the built-in reference problem if omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search for the best portfolio with VQE
    Run {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Number of entangling layers in the ansatz
        #[arg(long, default_value_t = DEFAULT_LAYERS)]
        layers: usize,

        /// Gradient-descent step size
        #[arg(long, default_value_t = 0.1)]
        step_size: f64,

        /// Number of descent steps
        #[arg(long, default_value_t = 200)]
        steps: usize,

        /// Seed for the initial parameters
        #[arg(long, default_value_t = 7)]
        seed: u64,

        /// Gradient method
        #[arg(long, value_enum, default_value_t = GradientArg::ParameterShift)]
        gradient: GradientArg,

        /// Probe offset for finite differences
        #[arg(long, default_value_t = 1e-5)]
        delta: f64,

        /// Evaluate gradient probes on one thread
        #[arg(long)]
        sequential: bool,

        /// Number of bitstrings to list
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Write the run (trace included) as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also enumerate the exact ground states for comparison
        #[arg(long)]
        compare: bool,
    },

    /// Enumerate the exact ground states of the problem Hamiltonian
    Exact {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Energy window treated as degenerate
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
    },

    /// Print the Ising Hamiltonian of the problem
    Hamiltonian {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Gradient method as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GradientArg {
    ParameterShift,
    FiniteDifference,
}

impl GradientArg {
    /// The library method, with `delta` used for finite differences.
    pub fn method(self, delta: f64) -> GradientMethod {
        match self {
            GradientArg::ParameterShift => GradientMethod::ParameterShift,
            GradientArg::FiniteDifference => GradientMethod::FiniteDifference { delta },
        }
    }
}

/// Log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
