//! Objective gradients.
//!
//! Both methods probe the objective at `θ ± s·eᵢ` for each parameter `i`.
//! The probes are independent, so with `parallel` set they are fanned out
//! over the rayon pool; each probe simulates into its own statevector.

use std::f64::consts::FRAC_PI_2;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{VqeError, VqeResult};
use crate::objective::Objective;

/// How to differentiate the objective.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMethod {
    /// `(f(θ + π/2) − f(θ − π/2)) / 2`, exact for RX-parameterised circuits.
    #[default]
    ParameterShift,
    /// Central difference `(f(θ + δ) − f(θ − δ)) / 2δ`.
    FiniteDifference { delta: f64 },
}

impl GradientMethod {
    /// Probe offset and divisor for this method.
    fn shift_and_divisor(self) -> VqeResult<(f64, f64)> {
        match self {
            // 2·sin(π/2)
            GradientMethod::ParameterShift => Ok((FRAC_PI_2, 2.0)),
            GradientMethod::FiniteDifference { delta } => {
                if !(delta.is_finite() && delta > 0.0) {
                    return Err(VqeError::InvalidDelta(delta));
                }
                Ok((delta, 2.0 * delta))
            }
        }
    }
}

fn partial(
    objective: &Objective<'_>,
    params: &[f64],
    index: usize,
    shift: f64,
    divisor: f64,
) -> VqeResult<f64> {
    let mut probe = params.to_vec();
    probe[index] = params[index] + shift;
    let plus = objective.evaluate(&probe)?;
    probe[index] = params[index] - shift;
    let minus = objective.evaluate(&probe)?;
    Ok((plus - minus) / divisor)
}

/// ∇f(θ) for the objective at `params`.
pub fn gradient(
    objective: &Objective<'_>,
    params: &[f64],
    method: GradientMethod,
    parallel: bool,
) -> VqeResult<Vec<f64>> {
    objective.ansatz().check_parameters(params)?;
    let (shift, divisor) = method.shift_and_divisor()?;

    if parallel {
        (0..params.len())
            .into_par_iter()
            .map(|i| partial(objective, params, i, shift, divisor))
            .collect()
    } else {
        (0..params.len())
            .map(|i| partial(objective, params, i, shift, divisor))
            .collect()
    }
}
