// src/simulation/engine.rs
use crate::circuits::{Gate, GateDefinition};
use crate::core::{ExecutionError, StateVector, UnitaryMatrix, FRAC_1_SQRT_2};
use num_complex::Complex;
use num_traits::Zero;
use std::sync::Arc;

/// A primitive step of a compiled circuit. Named gates have been expanded,
/// and every qubit index is global and already range-checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Hadamard(usize),
    PauliX(usize),
    MultiControlledX { controls: Vec<usize>, target: usize },
    /// A unitary gate applied by reference; its definition is a matrix.
    Unitary { gate: Arc<Gate>, qubits: Vec<usize> },
}

/// Evolves a dense state vector, one primitive instruction at a time.
pub(crate) struct SimulationEngine {
    state: StateVector,
}

impl SimulationEngine {
    /// Starts from |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, ExecutionError> {
        // 2^n must fit in usize, and the amplitudes in memory.
        if num_qubits >= usize::BITS as usize {
            return Err(ExecutionError::Backend(format!(
                "{} qubits overflow the state vector dimension",
                num_qubits
            )));
        }
        Ok(Self {
            state: StateVector::zero_state(num_qubits),
        })
    }

    pub(crate) fn from_state(state: StateVector) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    pub(crate) fn apply(&mut self, instruction: &Instruction) -> Result<(), ExecutionError> {
        match instruction {
            Instruction::Hadamard(target) => {
                self.apply_single_qubit_gate(*target, &hadamard_matrix())
            }
            Instruction::PauliX(target) => self.apply_single_qubit_gate(*target, &pauli_x_matrix()),
            Instruction::MultiControlledX { controls, target } => {
                self.apply_multi_controlled_x(controls, *target)
            }
            Instruction::Unitary { gate, qubits } => match gate.definition() {
                GateDefinition::Unitary(matrix) => self.apply_unitary(qubits, matrix),
                GateDefinition::Composite(_) => Err(ExecutionError::Backend(format!(
                    "gate '{}' was not expanded before execution",
                    gate.name()
                ))),
            },
        }
    }

    pub(crate) fn apply_all(&mut self, instructions: &[Instruction]) -> Result<(), ExecutionError> {
        for instruction in instructions {
            self.apply(instruction)?;
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), ExecutionError> {
        if qubit >= self.state.num_qubits() {
            return Err(ExecutionError::Backend(format!(
                "qubit {} outside a {}-qubit state",
                qubit,
                self.state.num_qubits()
            )));
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to `target`.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), ExecutionError> {
        self.check_qubit(target)?;
        let mask = 1usize << target;
        let amplitudes = self.state.amplitudes_mut();

        // Pairs of basis states differing only at the target bit.
        for i0 in 0..amplitudes.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Swaps the target bit on every basis state whose controls are all set.
    fn apply_multi_controlled_x(&mut self, controls: &[usize], target: usize) -> Result<(), ExecutionError> {
        self.check_qubit(target)?;
        let mut control_mask = 0usize;
        for &c in controls {
            self.check_qubit(c)?;
            control_mask |= 1 << c;
        }
        let target_mask = 1usize << target;
        if control_mask & target_mask != 0 {
            return Err(ExecutionError::Backend(format!("qubit {} is both control and target", target)));
        }

        let amplitudes = self.state.amplitudes_mut();
        for i in 0..amplitudes.len() {
            if i & control_mask == control_mask && i & target_mask == 0 {
                amplitudes.swap(i, i | target_mask);
            }
        }
        Ok(())
    }

    /// Applies a `2^k x 2^k` matrix to `qubits`, reading matrix index bit `j`
    /// from `qubits[j]`.
    fn apply_unitary(&mut self, qubits: &[usize], matrix: &UnitaryMatrix) -> Result<(), ExecutionError> {
        let k = qubits.len();
        if matrix.dim() != 1 << k {
            return Err(ExecutionError::Backend(format!(
                "matrix of dimension {} applied to {} qubits",
                matrix.dim(),
                k
            )));
        }
        let mut target_mask = 0usize;
        for &q in qubits {
            self.check_qubit(q)?;
            target_mask |= 1 << q;
        }

        // offsets[j] is the global index contribution of local index j.
        let sub_dim = matrix.dim();
        let offsets: Vec<usize> = (0..sub_dim)
            .map(|j| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (j >> bit) & 1 == 1)
                    .fold(0usize, |acc, (_, q)| acc | (1 << q))
            })
            .collect();

        let amplitudes = self.state.amplitudes_mut();
        let mut psi = vec![Complex::zero(); sub_dim];
        for base in 0..amplitudes.len() {
            if base & target_mask != 0 {
                continue;
            }
            for (j, offset) in offsets.iter().enumerate() {
                psi[j] = amplitudes[base | offset];
            }
            for (r, offset) in offsets.iter().enumerate() {
                amplitudes[base | offset] = matrix
                    .row(r)
                    .iter()
                    .zip(psi.iter())
                    .map(|(m, p)| m * p)
                    .sum();
            }
        }
        Ok(())
    }
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

fn pauli_x_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}
