//! Fixed-budget gradient descent.
//!
//! The loop has no convergence test and no line search: it runs exactly
//! `num_steps` updates `θ ← θ − η·∇f(θ)` and records every iterate.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{VqeError, VqeResult};
use crate::gradient::{GradientMethod, gradient};
use crate::objective::Objective;

/// One completed iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Parameters after the update.
    pub parameters: Vec<f64>,
    /// Objective at `parameters`.
    pub value: f64,
    /// Euclidean norm of the gradient used for the update.
    pub gradient_norm: f64,
}

/// Append-only record of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationTrace {
    initial_parameters: Vec<f64>,
    initial_value: f64,
    entries: Vec<TraceEntry>,
}

impl OptimizationTrace {
    fn new(initial_parameters: Vec<f64>, initial_value: f64) -> Self {
        Self {
            initial_parameters,
            initial_value,
            entries: Vec::new(),
        }
    }

    pub fn initial_parameters(&self) -> &[f64] {
        &self.initial_parameters
    }

    /// Objective at the starting point.
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Objective after the last iteration (the initial value if none ran).
    pub fn final_value(&self) -> f64 {
        self.entries
            .last()
            .map_or(self.initial_value, |entry| entry.value)
    }

    /// Parameters after the last iteration.
    pub fn final_parameters(&self) -> &[f64] {
        self.entries
            .last()
            .map_or(&self.initial_parameters, |entry| &entry.parameters)
    }

    /// Lowest value seen, starting point included, with its parameters.
    pub fn best(&self) -> (&[f64], f64) {
        self.entries.iter().fold(
            (self.initial_parameters.as_slice(), self.initial_value),
            |best, entry| {
                if entry.value < best.1 {
                    (entry.parameters.as_slice(), entry.value)
                } else {
                    best
                }
            },
        )
    }

    /// The recorded iterations, in order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Objective values, starting point first.
    pub fn values(&self) -> Vec<f64> {
        std::iter::once(self.initial_value)
            .chain(self.entries.iter().map(|entry| entry.value))
            .collect()
    }

    /// Number of completed iterations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trait for classical optimizers driving an [`Objective`].
pub trait Optimizer {
    /// Minimise `objective` starting from `initial_params`.
    fn optimize(
        &self,
        objective: &Objective<'_>,
        initial_params: &[f64],
    ) -> VqeResult<OptimizationTrace>;
}

/// Plain gradient descent with a fixed step size and step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    step_size: f64,
    num_steps: usize,
    method: GradientMethod,
    parallel: bool,
}

impl GradientDescent {
    /// Parameter-shift gradients, probes evaluated in parallel.
    pub fn new(step_size: f64, num_steps: usize) -> Self {
        Self {
            step_size,
            num_steps,
            method: GradientMethod::ParameterShift,
            parallel: true,
        }
    }

    /// Set the gradient method.
    #[must_use]
    pub fn with_method(mut self, method: GradientMethod) -> Self {
        self.method = method;
        self
    }

    /// Toggle the parallel probe fan-out.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn method(&self) -> GradientMethod {
        self.method
    }

    /// Run the descent, calling `on_step` after every iteration.
    #[instrument(skip_all, fields(step_size = self.step_size, num_steps = self.num_steps))]
    pub fn optimize_with<F>(
        &self,
        objective: &Objective<'_>,
        initial_params: &[f64],
        mut on_step: F,
    ) -> VqeResult<OptimizationTrace>
    where
        F: FnMut(&TraceEntry),
    {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(VqeError::InvalidStepSize(self.step_size));
        }
        objective.ansatz().check_parameters(initial_params)?;

        let mut params = initial_params.to_vec();
        let initial_value = objective.evaluate(&params)?;
        let mut record = OptimizationTrace::new(params.clone(), initial_value);
        debug!(initial_value, n_params = params.len(), "starting gradient descent");

        for iteration in 1..=self.num_steps {
            let grad = gradient(objective, &params, self.method, self.parallel)?;
            for (theta, g) in params.iter_mut().zip(&grad) {
                *theta -= self.step_size * g;
            }
            let value = objective.evaluate(&params)?;
            let gradient_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
            trace!(iteration, value, gradient_norm, "step");

            let entry = TraceEntry {
                iteration,
                parameters: params.clone(),
                value,
                gradient_norm,
            };
            on_step(&entry);
            record.entries.push(entry);
        }

        debug!(
            final_value = record.final_value(),
            best_value = record.best().1,
            "gradient descent finished"
        );
        Ok(record)
    }
}

impl Optimizer for GradientDescent {
    fn optimize(
        &self,
        objective: &Objective<'_>,
        initial_params: &[f64],
    ) -> VqeResult<OptimizationTrace> {
        self.optimize_with(objective, initial_params, |_| {})
    }
}

/// Run `num_steps` parameter-shift descent steps of size `step_size`.
pub fn optimize(
    objective: &Objective<'_>,
    initial_params: &[f64],
    step_size: f64,
    num_steps: usize,
) -> VqeResult<OptimizationTrace> {
    GradientDescent::new(step_size, num_steps).optimize(objective, initial_params)
}
