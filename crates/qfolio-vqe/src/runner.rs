//! End-to-end VQE runner.
//!
//! Wires ansatz, objective, optimizer and decoder together behind a builder.

use std::f64::consts::TAU;

use qfolio_ising::{IsingHamiltonian, ProblemSpec, build_qubo, to_ising};
use qfolio_sim::{Bitstring, most_likely, top_k};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::ansatz::{Ansatz, DEFAULT_LAYERS};
use crate::error::VqeResult;
use crate::gradient::GradientMethod;
use crate::objective::Objective;
use crate::optimizer::{GradientDescent, OptimizationTrace, TraceEntry};

/// `count` angles drawn uniformly from `[0, 2π)` by a seeded generator.
pub fn initial_parameters(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(0.0..TAU)).collect()
}

/// Result of a VQE run.
#[derive(Debug, Clone, Serialize)]
pub struct VqeOutcome {
    /// Every iterate of the descent.
    pub trace: OptimizationTrace,
    /// Parameters after the last step.
    pub optimal_params: Vec<f64>,
    /// Objective at `optimal_params` (offset excluded).
    pub final_value: f64,
    /// `final_value` plus the Hamiltonian offset.
    pub final_energy: f64,
    /// Most probable basis state of the final circuit.
    pub most_likely: Bitstring,
    /// Leading basis states with their probabilities.
    pub top: Vec<(Bitstring, f64)>,
}

/// VQE runner configuration.
#[derive(Debug, Clone)]
pub struct VqeRunner {
    hamiltonian: IsingHamiltonian,
    layers: usize,
    step_size: f64,
    num_steps: usize,
    seed: u64,
    method: GradientMethod,
    parallel: bool,
    top_k: usize,
}

impl VqeRunner {
    /// A runner over `hamiltonian` with the default settings.
    pub fn new(hamiltonian: IsingHamiltonian) -> Self {
        Self {
            hamiltonian,
            layers: DEFAULT_LAYERS,
            step_size: 0.1,
            num_steps: 200,
            seed: 7,
            method: GradientMethod::ParameterShift,
            parallel: true,
            top_k: 5,
        }
    }

    /// Build the Hamiltonian for a portfolio problem and wrap it.
    pub fn from_problem(spec: &ProblemSpec) -> VqeResult<Self> {
        let qubo = build_qubo(spec)?;
        Ok(Self::new(to_ising(&qubo)))
    }

    /// Set the number of entangling layers.
    #[must_use]
    pub fn with_layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// Set the gradient-descent step size.
    #[must_use]
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the number of descent steps.
    #[must_use]
    pub fn with_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = num_steps;
        self
    }

    /// Set the seed for the initial parameters.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the gradient method.
    #[must_use]
    pub fn with_gradient(mut self, method: GradientMethod) -> Self {
        self.method = method;
        self
    }

    /// Toggle parallel gradient probes.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of leading bitstrings kept in the outcome.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn hamiltonian(&self) -> &IsingHamiltonian {
        &self.hamiltonian
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn ansatz(&self) -> Ansatz {
        Ansatz::new(self.hamiltonian.num_qubits(), self.layers)
    }

    /// Get the number of parameters needed.
    pub fn num_parameters(&self) -> usize {
        self.ansatz().num_parameters()
    }

    /// Run from seeded random initial parameters.
    pub fn run(&self) -> VqeResult<VqeOutcome> {
        self.run_with_params(initial_parameters(self.num_parameters(), self.seed))
    }

    /// Run from caller-supplied initial parameters.
    pub fn run_with_params(&self, initial_params: Vec<f64>) -> VqeResult<VqeOutcome> {
        self.run_observed(initial_params, |_| {})
    }

    /// Run from `initial_params`, calling `on_step` after every iteration.
    pub fn run_observed<F>(&self, initial_params: Vec<f64>, on_step: F) -> VqeResult<VqeOutcome>
    where
        F: FnMut(&TraceEntry),
    {
        let objective = Objective::new(&self.hamiltonian, self.ansatz())?;
        info!(
            n_qubits = self.hamiltonian.num_qubits(),
            n_terms = self.hamiltonian.num_terms(),
            n_params = objective.num_parameters(),
            steps = self.num_steps,
            "starting VQE"
        );

        let optimizer = GradientDescent::new(self.step_size, self.num_steps)
            .with_method(self.method)
            .with_parallel(self.parallel);
        let trace = optimizer.optimize_with(&objective, &initial_params, on_step)?;

        let optimal_params = trace.final_parameters().to_vec();
        let state = objective.state(&optimal_params)?;
        let final_value = trace.final_value();
        let final_energy = final_value + self.hamiltonian.offset();
        let best = most_likely(&state);

        info!(
            initial_value = trace.initial_value(),
            final_value,
            final_energy,
            most_likely = %best,
            "VQE finished"
        );

        Ok(VqeOutcome {
            top: top_k(&state, self.top_k),
            most_likely: best,
            trace,
            optimal_params,
            final_value,
            final_energy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfolio_ising::ZString;

    #[test]
    fn test_initial_parameters_seeded() {
        let a = initial_parameters(6, 42);
        let b = initial_parameters(6, 42);
        let c = initial_parameters(6, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|&t| (0.0..TAU).contains(&t)));
    }

    #[test]
    fn test_runner_single_spin() {
        // Ground state of +Z is |1⟩.
        let mut h = IsingHamiltonian::new(1);
        h.add_term(ZString::z(0), 1.0);
        let outcome = VqeRunner::new(h)
            .with_step_size(0.3)
            .with_steps(100)
            .with_seed(1)
            .run()
            .unwrap();
        assert_eq!(outcome.most_likely.index(), 1);
        assert!(outcome.final_value < -0.99);
        assert_eq!(outcome.trace.len(), 100);
        assert_eq!(outcome.top[0].0, outcome.most_likely);
        assert_eq!(outcome.top.len(), 2);
    }

    #[test]
    fn test_num_parameters_follows_layers() {
        let h = IsingHamiltonian::new(3);
        assert_eq!(VqeRunner::new(h.clone()).num_parameters(), 6);
        assert_eq!(VqeRunner::new(h).with_layers(2).num_parameters(), 9);
    }
}
