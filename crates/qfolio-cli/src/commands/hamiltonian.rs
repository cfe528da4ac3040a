//! Hamiltonian command implementation.

use anyhow::{Context, Result};
use serde::Serialize;

use qfolio_cli::ProblemArgs;
use qfolio_ising::IsingHamiltonian;

use super::common::load_problem;

#[derive(Serialize)]
struct TermRecord<'a> {
    qubits: &'a [u32],
    coefficient: f64,
}

#[derive(Serialize)]
struct HamiltonianRecord<'a> {
    num_qubits: u32,
    offset: f64,
    terms: Vec<TermRecord<'a>>,
}

impl<'a> From<&'a IsingHamiltonian> for HamiltonianRecord<'a> {
    fn from(h: &'a IsingHamiltonian) -> Self {
        Self {
            num_qubits: h.num_qubits(),
            offset: h.offset(),
            terms: h
                .terms()
                .map(|(pauli, coefficient)| TermRecord {
                    qubits: pauli.qubits(),
                    coefficient,
                })
                .collect(),
        }
    }
}

/// Execute the hamiltonian command.
pub fn execute(problem: &ProblemArgs, json: bool) -> Result<()> {
    let loaded = load_problem(problem)?;
    if json {
        let record = HamiltonianRecord::from(&loaded.hamiltonian);
        let text =
            serde_json::to_string_pretty(&record).context("Failed to serialise Hamiltonian")?;
        println!("{text}");
    } else {
        print!("{}", loaded.hamiltonian);
    }
    Ok(())
}
