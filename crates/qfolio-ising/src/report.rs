//! Financial summary of a discrete asset selection.

use serde::{Deserialize, Serialize};

use crate::error::{IsingError, IsingResult};
use crate::problem::ProblemSpec;

/// How a selection `x` scores against the original (un-penalised) problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Indices of the selected assets.
    pub selected: Vec<usize>,
    /// μᵗx
    pub expected_return: f64,
    /// xᵗΣx
    pub variance: f64,
    /// μᵗx − q·xᵗΣx, the quantity the portfolio problem maximises.
    pub objective: f64,
    /// Σxᵢ − budget
    pub budget_violation: i64,
}

impl PortfolioReport {
    /// Score `selection` (entry `i` true ⇒ asset `i` held).
    pub fn evaluate(spec: &ProblemSpec, selection: &[bool]) -> IsingResult<Self> {
        if selection.len() != spec.n() {
            return Err(IsingError::DimensionMismatch {
                what: "selection",
                expected: spec.n(),
                got: selection.len(),
            });
        }

        let selected: Vec<usize> = selection
            .iter()
            .enumerate()
            .filter_map(|(i, &x)| x.then_some(i))
            .collect();

        let expected_return: f64 = selected.iter().map(|&i| spec.mu()[i]).sum();
        let sigma = spec.sigma();
        let variance: f64 = selected
            .iter()
            .flat_map(|&i| selected.iter().map(move |&j| sigma[[i, j]]))
            .sum();

        Ok(Self {
            budget_violation: selected.len() as i64 - spec.budget() as i64,
            objective: expected_return - spec.q() * variance,
            selected,
            expected_return,
            variance,
        })
    }

    /// True if exactly `budget` assets are held.
    pub fn budget_satisfied(&self) -> bool {
        self.budget_violation == 0
    }
}
