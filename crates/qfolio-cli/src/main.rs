//! qfolio Command-Line Interface
//!
//! ```text
//! qfolio run -i problem.yaml --steps 300 --compare -o run.json
//! qfolio exact -i problem.yaml
//! qfolio hamiltonian --json
//! ```

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use qfolio_cli::{Cli, Commands, log_filter};

mod commands;

use commands::{exact, hamiltonian, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(cli.verbose)))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            problem,
            layers,
            step_size,
            steps,
            seed,
            gradient,
            delta,
            sequential,
            top,
            output,
            compare,
        } => run::execute(
            &problem,
            &run::RunOptions {
                layers,
                step_size,
                steps,
                seed,
                method: gradient.method(delta),
                parallel: !sequential,
                top,
                output: output.as_deref(),
                compare,
            },
        ),

        Commands::Exact { problem, tolerance } => exact::execute(&problem, tolerance),

        Commands::Hamiltonian { problem, json } => hamiltonian::execute(&problem, json),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
