//! Run command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qfolio_cli::ProblemArgs;
use qfolio_vqe::{ExactSolver, GradientMethod, VqeRunner, initial_parameters};

use super::common::{load_problem, print_problem, print_distribution, print_report};

/// Optimizer settings gathered from the command line.
pub struct RunOptions<'a> {
    pub layers: usize,
    pub step_size: f64,
    pub steps: usize,
    pub seed: u64,
    pub method: GradientMethod,
    pub parallel: bool,
    pub top: usize,
    pub output: Option<&'a Path>,
    pub compare: bool,
}

/// Execute the run command.
pub fn execute(problem: &ProblemArgs, opts: &RunOptions<'_>) -> Result<()> {
    println!(
        "{} Running VQE ({} layers, step {}, {} steps, seed {})",
        style("→").cyan().bold(),
        opts.layers,
        opts.step_size,
        opts.steps,
        opts.seed
    );

    let loaded = load_problem(problem)?;
    print_problem(&loaded);
    let runner = VqeRunner::new(loaded.hamiltonian.clone())
        .with_layers(opts.layers)
        .with_step_size(opts.step_size)
        .with_steps(opts.steps)
        .with_gradient(opts.method)
        .with_parallel(opts.parallel)
        .with_top_k(opts.top);

    let progress = ProgressBar::new(opts.steps as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let params = initial_parameters(runner.num_parameters(), opts.seed);
    let outcome = runner.run_observed(params, |entry| {
        progress.set_position(entry.iteration as u64);
        progress.set_message(format!("value {:+.6}", entry.value));
    });
    progress.finish_and_clear();
    let outcome = outcome?;

    println!(
        "\n{} Objective {:+.6} → {:+.6} (energy {:+.6})",
        style("✓").green().bold(),
        outcome.trace.initial_value(),
        outcome.final_value,
        outcome.final_energy
    );
    println!("\n  Most likely: {}", style(outcome.most_likely).cyan().bold());
    print_distribution(&outcome.top);
    println!();
    print_report(&loaded, &outcome.most_likely)?;

    if opts.compare {
        let exact = ExactSolver::default().solve(&loaded.hamiltonian)?;
        let matched = exact.contains(&outcome.most_likely);
        println!(
            "\n  Exact ground energy: {:+.6} ({} state(s))",
            exact.energy,
            exact.ground_states.len()
        );
        println!(
            "  VQE selection is {}",
            if matched {
                style("an exact ground state").green()
            } else {
                style("not an exact ground state").red()
            }
        );
    }

    if let Some(path) = opts.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &outcome)
            .context("Failed to write run JSON")?;
        println!("\n  Trace written to {}", style(path.display()).green());
    }

    Ok(())
}
