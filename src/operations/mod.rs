// src/operations/mod.rs

//! Gate-level operations that make up a circuit.
//!
//! Qubits are plain indices into the circuit's register. Named gates are
//! shared by `Arc`, so a gate built once can be applied in every Grover
//! round without copying its matrix or body.

use crate::circuits::Gate;
use std::sync::Arc;

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Hadamard on one qubit.
    Hadamard {
        target: usize,
    },

    /// Pauli-X (bit flip) on one qubit.
    PauliX {
        target: usize,
    },

    /// Flips `target` when every qubit in `controls` is |1>.
    ///
    /// With no controls this is a plain X; with one it is a CNOT; with two a
    /// Toffoli.
    MultiControlledX {
        controls: Vec<usize>,
        target: usize,
    },

    /// Applies a named, reusable gate. Local qubit `j` of the gate acts on
    /// `qubits[j]`.
    ApplyGate {
        gate: Arc<Gate>,
        qubits: Vec<usize>,
    },

    /// Measures `targets` into the next free classical bits, in order.
    /// Measuring an already measured qubit again records nothing new.
    Measure {
        targets: Vec<usize>,
    },
}

impl Operation {
    /// Returns every qubit index the operation touches.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Hadamard { target } | Operation::PauliX { target } => vec![*target],
            Operation::MultiControlledX { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Operation::ApplyGate { qubits, .. } => qubits.clone(),
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Short label used in circuit diagrams.
    pub fn label(&self) -> &str {
        match self {
            Operation::Hadamard { .. } => "H",
            Operation::PauliX { .. } => "X",
            Operation::MultiControlledX { .. } => "MCX",
            Operation::ApplyGate { gate, .. } => gate.name(),
            Operation::Measure { .. } => "M",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involved_qubits_lists_controls_then_target() {
        let op = Operation::MultiControlledX { controls: vec![0, 2], target: 1 };
        assert_eq!(op.involved_qubits(), vec![0, 2, 1]);
        assert_eq!(Operation::Hadamard { target: 3 }.involved_qubits(), vec![3]);
    }
}
