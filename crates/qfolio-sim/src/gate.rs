//! Typed gate records and gate sequences.
//!
//! A [`GateSequence`] is a plain list of [`Gate`] values over a fixed
//! register size. Ansätze produce one; [`StatevectorSimulator`] consumes it.
//!
//! [`StatevectorSimulator`]: crate::StatevectorSimulator

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A single gate application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "lowercase")]
pub enum Gate {
    /// X-axis rotation `exp(−iθX/2)`.
    Rx { qubit: u32, theta: f64 },
    /// Y-axis rotation `exp(−iθY/2)`.
    Ry { qubit: u32, theta: f64 },
    /// Z-axis rotation `exp(−iθZ/2)`.
    Rz { qubit: u32, theta: f64 },
    /// Pauli-X.
    X { qubit: u32 },
    /// Hadamard.
    H { qubit: u32 },
    /// Controlled-NOT.
    Cx { control: u32, target: u32 },
    /// Controlled-Z.
    Cz { control: u32, target: u32 },
}

impl Gate {
    /// Gate mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Rx { .. } => "rx",
            Gate::Ry { .. } => "ry",
            Gate::Rz { .. } => "rz",
            Gate::X { .. } => "x",
            Gate::H { .. } => "h",
            Gate::Cx { .. } => "cx",
            Gate::Cz { .. } => "cz",
        }
    }

    /// Qubits the gate acts on, control first for two-qubit gates.
    pub fn qubits(&self) -> Vec<u32> {
        match *self {
            Gate::Rx { qubit, .. }
            | Gate::Ry { qubit, .. }
            | Gate::Rz { qubit, .. }
            | Gate::X { qubit }
            | Gate::H { qubit } => vec![qubit],
            Gate::Cx { control, target } | Gate::Cz { control, target } => vec![control, target],
        }
    }

    /// Rotation angle, if the gate has one.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Gate::Rx { theta, .. } | Gate::Ry { theta, .. } | Gate::Rz { theta, .. } => {
                Some(theta)
            }
            _ => None,
        }
    }

    /// Check the gate against a register of `num_qubits` qubits.
    pub fn validate(&self, num_qubits: u32) -> SimResult<()> {
        for qubit in self.qubits() {
            if qubit >= num_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit,
                    n_qubits: num_qubits,
                });
            }
        }
        if let Gate::Cx { control, target } | Gate::Cz { control, target } = *self {
            if control == target {
                return Err(SimError::InvalidGate(format!(
                    "{} with control and target both on qubit {control}",
                    self.name()
                )));
            }
        }
        if let Some(theta) = self.angle() {
            if !theta.is_finite() {
                return Err(SimError::InvalidGate(format!(
                    "{} with non-finite angle {theta}",
                    self.name()
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Gate::Rx { qubit, theta } | Gate::Ry { qubit, theta } | Gate::Rz { qubit, theta } => {
                write!(f, "{}({theta:.6}) q[{qubit}]", self.name())
            }
            Gate::X { qubit } | Gate::H { qubit } => write!(f, "{} q[{qubit}]", self.name()),
            Gate::Cx { control, target } | Gate::Cz { control, target } => {
                write!(f, "{} q[{control}], q[{target}]", self.name())
            }
        }
    }
}

/// An ordered list of gates over a fixed register.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GateSequence {
    num_qubits: u32,
    gates: Vec<Gate>,
}

impl GateSequence {
    /// An empty sequence over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Append a gate.
    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    pub fn rx(&mut self, qubit: u32, theta: f64) -> &mut Self {
        self.push(Gate::Rx { qubit, theta })
    }

    pub fn ry(&mut self, qubit: u32, theta: f64) -> &mut Self {
        self.push(Gate::Ry { qubit, theta })
    }

    pub fn rz(&mut self, qubit: u32, theta: f64) -> &mut Self {
        self.push(Gate::Rz { qubit, theta })
    }

    pub fn x(&mut self, qubit: u32) -> &mut Self {
        self.push(Gate::X { qubit })
    }

    pub fn h(&mut self, qubit: u32) -> &mut Self {
        self.push(Gate::H { qubit })
    }

    pub fn cx(&mut self, control: u32, target: u32) -> &mut Self {
        self.push(Gate::Cx { control, target })
    }

    pub fn cz(&mut self, control: u32, target: u32) -> &mut Self {
        self.push(Gate::Cz { control, target })
    }

    /// Register size.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True if the sequence holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The gates, in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Iterate over the gates in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> {
        self.gates.iter()
    }

    /// Number of two-qubit gates.
    pub fn two_qubit_count(&self) -> usize {
        self.gates.iter().filter(|g| g.qubits().len() == 2).count()
    }

    /// Validate every gate against the register.
    pub fn validate(&self) -> SimResult<()> {
        self.gates
            .iter()
            .try_for_each(|gate| gate.validate(self.num_qubits))
    }
}

impl<'a> IntoIterator for &'a GateSequence {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
