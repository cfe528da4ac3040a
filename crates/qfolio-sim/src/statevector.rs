//! Statevector simulation engine.

use num_complex::Complex64;
use tracing::{debug, instrument};

use crate::error::{SimError, SimResult};
use crate::gate::{Gate, GateSequence};

/// Largest register a [`StatevectorSimulator`] accepts by default.
///
/// 2²⁴ amplitudes is 256 MiB of `Complex64`.
pub const MAX_QUBITS: u32 = 24;

/// A dense statevector over `num_qubits` qubits.
///
/// Qubit `i` is bit `i` of the basis index (little-endian), so amplitude
/// `k` belongs to the basis state whose qubit `i` reads `(k >> i) & 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Callers bound `num_qubits`; outside the crate states come from
    /// [`StatevectorSimulator::run`].
    pub(crate) fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Hilbert-space dimension, `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// `|amplitude|²` of a single basis state.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Computational-basis probabilities, indexed by basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Σ |aₖ|². Stays at 1 under unitary evolution.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Apply a gate after checking it against this register.
    pub fn apply(&mut self, gate: &Gate) -> SimResult<()> {
        gate.validate(self.num_qubits as u32)?;
        self.apply_unchecked(gate);
        Ok(())
    }

    fn apply_unchecked(&mut self, gate: &Gate) {
        match *gate {
            Gate::Rx { qubit, theta } => self.apply_rx(qubit as usize, theta),
            Gate::Ry { qubit, theta } => self.apply_ry(qubit as usize, theta),
            Gate::Rz { qubit, theta } => self.apply_rz(qubit as usize, theta),
            Gate::X { qubit } => self.apply_x(qubit as usize),
            Gate::H { qubit } => self.apply_h(qubit as usize),
            Gate::Cx { control, target } => self.apply_cx(control as usize, target as usize),
            Gate::Cz { control, target } => self.apply_cz(control as usize, target as usize),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }
}

/// Runs gate sequences on a fresh statevector.
///
/// The simulator holds only its register size; every [`run`](Self::run)
/// allocates and returns its own amplitude buffer, so one simulator can be
/// shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatevectorSimulator {
    num_qubits: u32,
}

impl StatevectorSimulator {
    /// A simulator for `num_qubits` qubits, capped at [`MAX_QUBITS`].
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        Self::with_max_qubits(num_qubits, MAX_QUBITS)
    }

    /// A simulator with a custom register cap.
    ///
    /// The cap never exceeds what a `usize` basis index can address.
    pub fn with_max_qubits(num_qubits: u32, max_qubits: u32) -> SimResult<Self> {
        let max_qubits = max_qubits.min(usize::BITS - 1);
        if num_qubits > max_qubits {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: max_qubits,
            });
        }
        Ok(Self { num_qubits })
    }

    /// Register size.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Execute `gates` starting from |0…0⟩.
    ///
    /// The whole sequence is validated before any amplitude is touched.
    #[instrument(level = "trace", skip(self, gates), fields(n_qubits = self.num_qubits, n_gates = gates.len()))]
    pub fn run(&self, gates: &GateSequence) -> SimResult<Statevector> {
        if gates.num_qubits() != self.num_qubits {
            return Err(SimError::InvalidGate(format!(
                "sequence built for {} qubits, simulator has {}",
                gates.num_qubits(),
                self.num_qubits
            )));
        }
        gates.validate()?;

        let mut state = Statevector::new(self.num_qubits as usize);
        for gate in gates {
            state.apply_unchecked(gate);
        }

        debug!(norm = state.norm_sqr(), "statevector run complete");
        Ok(state)
    }
}
