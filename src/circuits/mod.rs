// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`grover_missing::operations::Operation`).
//!
//! This module provides the `Circuit` structure, a fixed-width register plus
//! the ordered list of gates and measurements applied to it, and `Gate`, the
//! named reusable operator that oracles and diffusers are wrapped in.

mod gate;

pub use gate::{Gate, GateDefinition};

use crate::core::CircuitError;
use crate::operations::Operation;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// An ordered sequence of operations over `num_qubits` qubits.
///
/// Analogy: `qiskit.QuantumCircuit` without classical control flow. Once
/// handed to a backend it is only read.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    /// The order is significant: operations are applied front to back.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates an empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Appends an operation. Indices are checked by [`Circuit::validate`].
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Appends a measurement of every qubit, qubit `q` into classical bit `q`.
    pub fn measure_all(&mut self) {
        self.add_operation(Operation::Measure {
            targets: (0..self.num_qubits).collect(),
        });
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub(crate) fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of times a gate with `name` is applied at the top level.
    pub fn count_gate(&self, name: &str) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::ApplyGate { gate, .. } if gate.name() == name))
            .count()
    }

    /// Checks the structural rules every backend relies on:
    /// - qubit indices are inside the register,
    /// - an operation never names the same qubit twice,
    /// - named gates get exactly as many qubits as they declare,
    /// - nothing but further measurements touch a qubit once it is measured.
    pub fn validate(&self) -> Result<(), CircuitError> {
        let mut measured: HashSet<usize> = HashSet::new();
        for op in &self.operations {
            let qubits = op.involved_qubits();
            let mut seen = HashSet::with_capacity(qubits.len());
            for &q in &qubits {
                if q >= self.num_qubits {
                    return Err(CircuitError::InvalidQubitIndex { index: q, total: self.num_qubits });
                }
                if !seen.insert(q) {
                    return Err(match op {
                        Operation::MultiControlledX { target, .. } if *target == q => {
                            CircuitError::SameControlTarget(q)
                        }
                        _ => CircuitError::DuplicateQubit(q),
                    });
                }
            }
            match op {
                Operation::Measure { targets } => measured.extend(targets.iter().copied()),
                other => {
                    if let Operation::ApplyGate { gate, qubits } = other {
                        if gate.num_qubits() != qubits.len() {
                            return Err(CircuitError::QubitCountMismatch {
                                gate: gate.name().to_string(),
                                expected: gate.num_qubits(),
                                provided: qubits.len(),
                            });
                        }
                    }
                    if let Some(q) = qubits.iter().find(|q| measured.contains(q)) {
                        return Err(CircuitError::OperationAfterMeasurement(*q));
                    }
                }
            }
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Method-chaining construction of a `Circuit`.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    pub fn h(self, target: usize) -> Self {
        self.add_op(Operation::Hadamard { target })
    }

    /// Hadamard on every qubit of the register.
    pub fn h_all(self) -> Self {
        let n = self.circuit.num_qubits();
        self.add_ops((0..n).map(|target| Operation::Hadamard { target }))
    }

    pub fn x(self, target: usize) -> Self {
        self.add_op(Operation::PauliX { target })
    }

    /// Pauli-X on every qubit of the register.
    pub fn x_all(self) -> Self {
        let n = self.circuit.num_qubits();
        self.add_ops((0..n).map(|target| Operation::PauliX { target }))
    }

    pub fn mcx(self, controls: Vec<usize>, target: usize) -> Self {
        self.add_op(Operation::MultiControlledX { controls, target })
    }

    /// Applies a shared gate to `qubits`.
    pub fn append(self, gate: &Arc<Gate>, qubits: Vec<usize>) -> Self {
        self.add_op(Operation::ApplyGate {
            gate: Arc::clone(gate),
            qubits,
        })
    }

    pub fn measure_all(mut self) -> Self {
        self.circuit.measure_all();
        self
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on {} qubits]", self.num_qubits);
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_rows = self.num_qubits;

        let max_label_width = format!("q{}", num_rows.saturating_sub(1)).len();
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the cell text, v_connect[row][time] the
        // connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        fn connect(v_connect: &mut [Vec<char>], rows: &[usize], t: usize) {
            if let (Some(r_min), Some(r_max)) = (rows.iter().min(), rows.iter().max()) {
                for row_vec in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        for (t, op) in ops.iter().enumerate() {
            let in_range = |q: &usize| *q < num_rows;
            match op {
                Operation::Hadamard { target } | Operation::PauliX { target } => {
                    if in_range(target) {
                        op_grid[*target][t] = format_gate(op.label());
                    }
                }
                Operation::MultiControlledX { controls, target } => {
                    for c in controls.iter().filter(|q| in_range(*q)) {
                        op_grid[*c][t] = format_gate("●");
                    }
                    if in_range(target) {
                        op_grid[*target][t] = format_gate("⊕");
                    }
                    let rows: Vec<usize> = op.involved_qubits().into_iter().filter(in_range).collect();
                    connect(&mut v_connect, &rows, t);
                }
                Operation::ApplyGate { gate, qubits } => {
                    for q in qubits.iter().filter(|q| in_range(*q)) {
                        op_grid[*q][t] = format_gate(gate.name());
                    }
                    let rows: Vec<usize> = qubits.iter().copied().filter(in_range).collect();
                    connect(&mut v_connect, &rows, t);
                }
                Operation::Measure { targets } => {
                    for q in targets.iter().filter(|q| in_range(*q)) {
                        op_grid[*q][t] = format_gate("M");
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_rows)?;
        for r in 0..num_rows {
            let label = format!("q{}: ", r);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
