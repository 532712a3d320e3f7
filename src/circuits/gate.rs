// src/circuits/gate.rs

use super::Circuit;
use crate::core::{CircuitError, UnitaryMatrix};
use crate::operations::Operation;

/// How a named gate acts on its qubits.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDefinition {
    /// A dense unitary over all of the gate's qubits.
    Unitary(UnitaryMatrix),
    /// A sequence of operations on local qubits `0..num_qubits`.
    Composite(Vec<Operation>),
}

/// A named, reusable operator, built once and applied by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    name: String,
    num_qubits: usize,
    definition: GateDefinition,
}

impl Gate {
    /// Wraps a matrix as a gate. The matrix must be unitary.
    pub fn unitary(name: impl Into<String>, matrix: UnitaryMatrix) -> Result<Self, CircuitError> {
        let name = name.into();
        if !matrix.is_unitary() {
            return Err(CircuitError::NotUnitary(name));
        }
        Ok(Self {
            name,
            num_qubits: matrix.num_qubits(),
            definition: GateDefinition::Unitary(matrix),
        })
    }

    /// Turns a measurement-free circuit into a gate over its whole register.
    pub fn from_circuit(name: impl Into<String>, circuit: Circuit) -> Result<Self, CircuitError> {
        circuit.validate()?;
        if let Some(q) = circuit.operations().iter().find_map(|op| match op {
            Operation::Measure { targets } => Some(targets.first().copied().unwrap_or(0)),
            _ => None,
        }) {
            return Err(CircuitError::MeasurementInGate(q));
        }
        let num_qubits = circuit.num_qubits();
        Ok(Self {
            name: name.into(),
            num_qubits,
            definition: GateDefinition::Composite(circuit.into_operations()),
        })
    }

    /// Composite gate from operations already known to be well formed.
    pub(crate) fn composite(name: impl Into<String>, num_qubits: usize, operations: Vec<Operation>) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            definition: GateDefinition::Composite(operations),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn definition(&self) -> &GateDefinition {
        &self.definition
    }
}
