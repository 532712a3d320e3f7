// src/grover/diffuser.rs

use crate::circuits::{CircuitBuilder, Gate};
use std::sync::Arc;

/// Name given to the diffusion gate in circuits and diagrams.
pub const DIFFUSER_NAME: &str = "Ds";

/// Builds the inversion-about-the-mean operator on `num_qubits` qubits.
///
/// `H⊗n · X⊗n · (H · MCX · H on the last qubit) · X⊗n · H⊗n`: the inner
/// sandwich is a multi-controlled Z, which flips the phase of |1...1>; the
/// X layers move that flip to |0...0> and the H layers move it to the
/// uniform superposition |s>. The result equals `I - 2|s><s|`, the standard
/// diffuser up to a global phase of -1.
///
/// The gate depends on `num_qubits` alone and is built once per search.
pub fn build_diffuser(num_qubits: usize) -> Arc<Gate> {
    if num_qubits == 0 {
        return Arc::new(Gate::composite(DIFFUSER_NAME, 0, Vec::new()));
    }
    let last = num_qubits - 1;
    let body = CircuitBuilder::new(num_qubits)
        .h_all()
        .x_all()
        .h(last)
        .mcx((0..last).collect(), last)
        .h(last)
        .x_all()
        .h_all()
        .build();
    Arc::new(Gate::composite(DIFFUSER_NAME, num_qubits, body.into_operations()))
}
