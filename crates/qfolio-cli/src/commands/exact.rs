//! Exact command implementation.

use anyhow::Result;
use console::style;

use qfolio_cli::ProblemArgs;
use qfolio_vqe::ExactSolver;

use super::common::{load_problem, print_problem, print_report};

/// Execute the exact command.
pub fn execute(problem: &ProblemArgs, tolerance: f64) -> Result<()> {
    println!("{} Enumerating basis states", style("→").cyan().bold());

    let loaded = load_problem(problem)?;
    print_problem(&loaded);
    let solution = ExactSolver::new(tolerance).solve(&loaded.hamiltonian)?;

    println!(
        "\n{} Ground energy {:+.6}, {} degenerate state(s)",
        style("✓").green().bold(),
        solution.energy,
        solution.ground_states.len()
    );
    for state in &solution.ground_states {
        println!("\n  {}", style(state).cyan().bold());
        print_report(&loaded, state)?;
    }
    Ok(())
}
