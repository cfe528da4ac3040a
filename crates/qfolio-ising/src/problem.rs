//! Portfolio selection inputs.

use ndarray::Array2;

/// The inputs of a budget-constrained portfolio selection problem.
///
/// Plain data: shapes and ranges are checked when the problem is turned
/// into a QUBO by [`build_qubo`](crate::build_qubo), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSpec {
    n: usize,
    mu: Vec<f64>,
    sigma: Array2<f64>,
    q: f64,
    budget: usize,
    penalty: f64,
}

impl ProblemSpec {
    /// Create a problem over `n` assets.
    ///
    /// # Arguments
    /// * `mu`      expected return per asset
    /// * `sigma`   covariance matrix (n×n, symmetric)
    /// * `q`       risk aversion
    /// * `budget`  number of assets that must be selected
    /// * `penalty` weight of the squared budget violation
    pub fn new(
        n: usize,
        mu: Vec<f64>,
        sigma: Array2<f64>,
        q: f64,
        budget: usize,
        penalty: f64,
    ) -> Self {
        Self {
            n,
            mu,
            sigma,
            q,
            budget,
            penalty,
        }
    }

    /// Number of assets.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Expected returns.
    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    /// Covariance matrix.
    pub fn sigma(&self) -> &Array2<f64> {
        &self.sigma
    }

    /// Risk aversion.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Required number of selected assets.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Budget-violation penalty weight.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}
