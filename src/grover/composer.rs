// src/grover/composer.rs

use crate::circuits::{Circuit, CircuitBuilder, Gate};
use crate::core::PI;
use std::sync::Arc;
use tracing::debug;

/// Optimal number of amplification rounds for one marked state among `2^n`:
/// `floor(π/4 · √(2^n))`.
///
/// This is zero for `n = 0`. A zero-round circuit just measures the uniform
/// superposition; it is not special-cased.
pub fn iteration_count(num_qubits: usize) -> usize {
    let search_space = 2f64.powi(i32::try_from(num_qubits).unwrap_or(i32::MAX));
    (PI / 4.0 * search_space.sqrt()).floor() as usize
}

/// Assembles the full search circuit:
/// `H` on every qubit, then `iteration_count(n)` rounds of oracle followed
/// by diffuser over all qubits, then a measurement of every qubit.
///
/// Both gates are shared by reference across rounds. The circuit is
/// returned unexecuted.
pub fn compose(oracle: &Arc<Gate>, diffuser: &Arc<Gate>, num_qubits: usize) -> Circuit {
    let iterations = iteration_count(num_qubits);
    let register: Vec<usize> = (0..num_qubits).collect();

    let mut builder = CircuitBuilder::new(num_qubits).h_all();
    for _ in 0..iterations {
        builder = builder
            .append(oracle, register.clone())
            .append(diffuser, register.clone());
    }
    let circuit = builder.measure_all().build();

    debug!(num_qubits, iterations, operations = circuit.len(), "composed grover circuit");
    circuit
}
