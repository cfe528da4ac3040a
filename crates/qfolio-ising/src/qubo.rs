//! QUBO construction from a [`ProblemSpec`].
//!
//! The portfolio problem maximises `μᵗx − q·xᵗΣx` under `Σxᵢ = budget`.
//! Ground-state search minimises, so the objective is negated and the
//! equality constraint replaced by a quadratic penalty:
//!
//!   minimise  q·xᵗΣx − μᵗx + P·(Σxᵢ − B)²
//!
//! Expanding the penalty with `xᵢ² = xᵢ`:
//!
//!   P·(Σxᵢ − B)² = P·Σᵢ (1 − 2B)·xᵢ + P·Σ_{i≠j} xᵢxⱼ + P·B²
//!
//! so every linear term lands on the diagonal of `Q` and `P·B²` is the
//! constant offset.

use ndarray::Array2;
use tracing::debug;

use crate::error::{IsingError, IsingResult};
use crate::problem::ProblemSpec;

/// A quadratic objective over binary variables: `xᵗQx + offset`.
///
/// `Q` is always symmetric; linear terms live on its diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticBinaryObjective {
    q: Array2<f64>,
    offset: f64,
}

impl QuadraticBinaryObjective {
    /// The symmetric quadratic matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.q
    }

    /// The constant term.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Number of binary variables.
    pub fn num_vars(&self) -> usize {
        self.q.nrows()
    }

    /// Evaluate `xᵗQx + offset` for an explicit assignment.
    pub fn evaluate(&self, x: &[bool]) -> IsingResult<f64> {
        if x.len() != self.num_vars() {
            return Err(IsingError::DimensionMismatch {
                what: "assignment",
                expected: self.num_vars(),
                got: x.len(),
            });
        }
        let mut value = self.offset;
        for (i, &xi) in x.iter().enumerate() {
            if !xi {
                continue;
            }
            for (j, &xj) in x.iter().enumerate() {
                if xj {
                    value += self.q[[i, j]];
                }
            }
        }
        Ok(value)
    }

    /// Evaluate the objective for the assignment encoded in a basis index
    /// (bit `i` of `index` is `xᵢ`).
    pub fn evaluate_index(&self, index: usize) -> f64 {
        let n = self.num_vars();
        let mut value = self.offset;
        for i in (0..n).filter(|&i| (index >> i) & 1 == 1) {
            for j in (0..n).filter(|&j| (index >> j) & 1 == 1) {
                value += self.q[[i, j]];
            }
        }
        value
    }
}

/// Build the penalised QUBO for a portfolio problem.
///
/// Fails with [`IsingError::DimensionMismatch`] if `mu` or `sigma` do not
/// match the asset count, and with [`IsingError::InvalidParameter`] for
/// out-of-range scalars.
pub fn build_qubo(spec: &ProblemSpec) -> IsingResult<QuadraticBinaryObjective> {
    validate(spec)?;

    let n = spec.n();
    let sigma = spec.sigma();
    let penalty = spec.penalty();
    let budget = spec.budget() as f64;

    let mut q = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            // Symmetrise so that Q is symmetric even for a slightly skewed Σ.
            q[[i, j]] = spec.q() * 0.5 * (sigma[[i, j]] + sigma[[j, i]]);
            if i == j {
                q[[i, i]] += -spec.mu()[i] + penalty * (1.0 - 2.0 * budget);
            } else {
                q[[i, j]] += penalty;
            }
        }
    }
    let offset = penalty * budget * budget;

    debug!(n, budget = spec.budget(), penalty, offset, "built portfolio QUBO");

    Ok(QuadraticBinaryObjective { q, offset })
}

fn validate(spec: &ProblemSpec) -> IsingResult<()> {
    let n = spec.n();
    if n == 0 {
        return Err(IsingError::InvalidParameter(
            "asset count must be at least 1".into(),
        ));
    }
    if spec.mu().len() != n {
        return Err(IsingError::DimensionMismatch {
            what: "mu",
            expected: n,
            got: spec.mu().len(),
        });
    }
    let (rows, cols) = spec.sigma().dim();
    if rows != n {
        return Err(IsingError::DimensionMismatch {
            what: "sigma rows",
            expected: n,
            got: rows,
        });
    }
    if cols != n {
        return Err(IsingError::DimensionMismatch {
            what: "sigma columns",
            expected: n,
            got: cols,
        });
    }
    if !(spec.q().is_finite() && spec.q() > 0.0) {
        return Err(IsingError::InvalidParameter(format!(
            "risk aversion must be positive, got {}",
            spec.q()
        )));
    }
    if !(spec.penalty().is_finite() && spec.penalty() >= 0.0) {
        return Err(IsingError::InvalidParameter(format!(
            "penalty must be non-negative, got {}",
            spec.penalty()
        )));
    }
    if spec.budget() > n {
        return Err(IsingError::InvalidParameter(format!(
            "budget {} exceeds asset count {n}",
            spec.budget()
        )));
    }
    if spec.mu().iter().chain(spec.sigma().iter()).any(|v| !v.is_finite()) {
        return Err(IsingError::InvalidParameter(
            "returns and covariances must be finite".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn reference_spec() -> ProblemSpec {
        ProblemSpec::new(3, vec![0.1; 3], Array2::eye(3) * 0.01, 0.5, 2, 3.0)
    }

    #[test]
    fn test_reference_matrix() {
        let qubo = build_qubo(&reference_spec()).unwrap();
        let m = qubo.matrix();
        for i in 0..3 {
            // 0.5·0.01 − 0.1 + 3·(1 − 4)
            assert_abs_diff_eq!(m[[i, i]], -9.095, epsilon = 1e-12);
            for j in (0..3).filter(|&j| j != i) {
                assert_abs_diff_eq!(m[[i, j]], 3.0, epsilon = 1e-12);
            }
        }
        assert_abs_diff_eq!(qubo.offset(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let sigma = ndarray::array![[0.04, 0.011, 0.0], [0.009, 0.09, 0.02], [0.0, 0.02, 0.01]];
        let spec = ProblemSpec::new(3, vec![0.05, 0.12, 0.07], sigma, 0.8, 1, 2.0);
        let m = build_qubo(&spec).unwrap().matrix().clone();
        assert_eq!(m, m.t());
    }

    #[test]
    fn test_evaluate_matches_index_form() {
        let qubo = build_qubo(&reference_spec()).unwrap();
        for index in 0..8usize {
            let bits: Vec<bool> = (0..3).map(|i| (index >> i) & 1 == 1).collect();
            assert_abs_diff_eq!(
                qubo.evaluate(&bits).unwrap(),
                qubo.evaluate_index(index),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_mu_length_mismatch() {
        let spec = ProblemSpec::new(3, vec![0.1; 2], Array2::eye(3), 0.5, 1, 1.0);
        let err = build_qubo(&spec).unwrap_err();
        assert!(matches!(
            err,
            IsingError::DimensionMismatch {
                what: "mu",
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_sigma_not_square() {
        let spec = ProblemSpec::new(2, vec![0.1; 2], Array2::zeros((2, 3)), 0.5, 1, 1.0);
        assert!(matches!(
            build_qubo(&spec),
            Err(IsingError::DimensionMismatch {
                what: "sigma columns",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_scalars() {
        let bad_q = ProblemSpec::new(2, vec![0.1; 2], Array2::eye(2), 0.0, 1, 1.0);
        assert!(matches!(
            build_qubo(&bad_q),
            Err(IsingError::InvalidParameter(_))
        ));

        let bad_budget = ProblemSpec::new(2, vec![0.1; 2], Array2::eye(2), 0.5, 3, 1.0);
        assert!(matches!(
            build_qubo(&bad_budget),
            Err(IsingError::InvalidParameter(_))
        ));

        let bad_penalty = ProblemSpec::new(2, vec![0.1; 2], Array2::eye(2), 0.5, 1, -1.0);
        assert!(matches!(
            build_qubo(&bad_penalty),
            Err(IsingError::InvalidParameter(_))
        ));
    }
}
