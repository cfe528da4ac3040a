//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use console::style;

use qfolio_cli::{ProblemArgs, ProblemConfig};
use qfolio_ising::{IsingHamiltonian, PortfolioReport, ProblemSpec, build_qubo, to_ising};
use qfolio_sim::Bitstring;

/// A loaded problem with its Hamiltonian.
pub struct LoadedProblem {
    pub config: ProblemConfig,
    pub spec: ProblemSpec,
    pub hamiltonian: IsingHamiltonian,
}

/// Load the problem named by `args` and map it to a Hamiltonian.
pub fn load_problem(args: &ProblemArgs) -> Result<LoadedProblem> {
    let config = match &args.input {
        Some(path) => ProblemConfig::load(path)?,
        None => ProblemConfig::reference(),
    };
    let spec = config.to_spec()?;
    let qubo = build_qubo(&spec).context("Failed to build QUBO")?;
    let hamiltonian = to_ising(&qubo);

    Ok(LoadedProblem {
        config,
        spec,
        hamiltonian,
    })
}

/// One-line summary of a loaded problem.
pub fn print_problem(problem: &LoadedProblem) {
    println!(
        "  Problem: {} ({} assets, budget {}, {} Hamiltonian terms)",
        style(problem.config.name.as_deref().unwrap_or("unnamed")).green(),
        problem.spec.n(),
        problem.spec.budget(),
        problem.hamiltonian.num_terms()
    );
}

/// Print bitstrings with their probabilities as a bar chart.
pub fn print_distribution(top: &[(Bitstring, f64)]) {
    for (bitstring, p) in top {
        let percent = p * 100.0;
        let bar: String = "█".repeat((percent / 2.0).round() as usize);
        println!(
            "  {}: {:>6.2}% {}",
            style(bitstring).cyan(),
            percent,
            style(bar).green()
        );
    }
}

/// Print the financial summary of a selection.
pub fn print_report(problem: &LoadedProblem, selection: &Bitstring) -> Result<()> {
    let report = PortfolioReport::evaluate(&problem.spec, &selection.bits())?;
    let names: Vec<String> = report
        .selected
        .iter()
        .map(|&i| problem.config.asset_label(i))
        .collect();

    println!(
        "  Selected: {}",
        if names.is_empty() {
            style("none".to_string()).dim()
        } else {
            style(names.join(", ")).yellow()
        }
    );
    println!("  Expected return: {:.6}", report.expected_return);
    println!("  Variance:        {:.6}", report.variance);
    println!("  Objective:       {:.6}", report.objective);
    if report.budget_satisfied() {
        println!("  Budget:          {}", style("satisfied").green());
    } else {
        println!(
            "  Budget:          {} (off by {:+})",
            style("violated").red(),
            report.budget_violation
        );
    }
    Ok(())
}
