// src/grover/oracle.rs

use crate::circuits::Gate;
use crate::core::{GroverError, UnitaryMatrix};
use num_complex::Complex;
use std::sync::Arc;

/// Name given to the oracle gate in circuits and diagrams.
pub const ORACLE_NAME: &str = "Uf";

/// Diagonal phase oracle for the missing-number search.
///
/// Starts from `-I` and resets the entry of every present value to `+1`,
/// so the one value absent from `present` is left with phase `-1`.
/// The matrix is dense, `4^n` entries, which limits this to small `n`.
///
/// # Errors
/// * [`GroverError::ValueOutOfRange`] if a value is not below `2^num_qubits`.
/// * [`GroverError::DuplicateValue`] if a value occurs twice; a repeated
///   value would leave more than one state marked.
pub fn oracle_matrix(present: &[u64], num_qubits: usize) -> Result<UnitaryMatrix, GroverError> {
    let mut matrix = UnitaryMatrix::identity(num_qubits).scaled(Complex::new(-1.0, 0.0));
    let dimension = matrix.dim();
    let plus_one = Complex::new(1.0, 0.0);

    for &value in present {
        let index = usize::try_from(value)
            .ok()
            .filter(|i| *i < dimension)
            .ok_or(GroverError::ValueOutOfRange { value, dimension })?;
        if matrix.get(index, index) == plus_one {
            return Err(GroverError::DuplicateValue { value });
        }
        matrix.set(index, index, plus_one);
    }
    Ok(matrix)
}

/// Wraps [`oracle_matrix`] as a reusable unitary gate over `num_qubits` qubits.
pub fn build_oracle(present: &[u64], num_qubits: usize) -> Result<Arc<Gate>, GroverError> {
    let matrix = oracle_matrix(present, num_qubits)?;
    Ok(Arc::new(Gate::unitary(ORACLE_NAME, matrix)?))
}
