// src/validation/mod.rs

//! Precondition checks: the shape of a missing-number input, and the
//! normalization of simulated states.

use crate::core::{DegenerateInput, ExecutionError, GroverError, StateVector, TOLERANCE};

/// What an input sequence allows the search to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// Too few values to search; not an error.
    Degenerate(DegenerateInput),
    /// Length is `2^num_qubits - 1`, so a circuit can be built.
    Searchable {
        /// Register width `n`.
        num_qubits: usize,
    },
}

/// Number of qubits needed to index `length + 1` values: `ceil(log2(length + 1))`.
pub fn qubit_count(length: usize) -> usize {
    (length + 1).next_power_of_two().trailing_zeros() as usize
}

/// Checks the structural precondition of the search before any circuit is built.
///
/// Only the cardinality is checked here. Value ranges and duplicates are
/// caught by the oracle builder, which is the first stage to index by value.
///
/// # Returns
/// * `Ok(InputShape::Degenerate(_))` for zero or one value.
/// * `Ok(InputShape::Searchable { .. })` when `length + 1` is a power of two.
/// * `Err(GroverError::InvalidInput)` otherwise.
pub fn validate_input(values: &[u64]) -> Result<InputShape, GroverError> {
    match values.len() {
        0 => Ok(InputShape::Degenerate(DegenerateInput::Empty)),
        1 => Ok(InputShape::Degenerate(DegenerateInput::SingleElement)),
        length if ((length + 1) & length) != 0 => Err(GroverError::InvalidInput { length }),
        length => Ok(InputShape::Searchable {
            num_qubits: qubit_count(length),
        }),
    }
}

/// Checks that the squared amplitudes of `state` sum to 1.0.
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to [`TOLERANCE`].
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), ExecutionError> {
    let effective_tolerance = tolerance.unwrap_or(TOLERANCE);
    let norm = state.norm_sqr();
    if (norm - 1.0).abs() > effective_tolerance {
        Err(ExecutionError::NotNormalized { norm })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_degenerate_lengths() -> Result<(), GroverError> {
        assert_eq!(validate_input(&[])?, InputShape::Degenerate(DegenerateInput::Empty));
        assert_eq!(validate_input(&[7])?, InputShape::Degenerate(DegenerateInput::SingleElement));
        Ok(())
    }

    #[test]
    fn test_power_of_two_lengths_are_searchable() -> Result<(), GroverError> {
        assert_eq!(validate_input(&[1, 2, 3])?, InputShape::Searchable { num_qubits: 2 });
        assert_eq!(validate_input(&[0, 1, 2, 4, 5, 6, 7])?, InputShape::Searchable { num_qubits: 3 });
        let fifteen: Vec<u64> = (1..16).collect();
        assert_eq!(validate_input(&fifteen)?, InputShape::Searchable { num_qubits: 4 });
        Ok(())
    }

    #[test]
    fn test_other_lengths_rejected() {
        assert_eq!(validate_input(&[0, 1]), Err(GroverError::InvalidInput { length: 2 }));
        assert_eq!(validate_input(&[0, 1, 2, 3]), Err(GroverError::InvalidInput { length: 4 }));
        assert_eq!(validate_input(&[0, 1, 2, 3, 4, 5]), Err(GroverError::InvalidInput { length: 6 }));
    }

    #[test]
    fn test_qubit_count() {
        assert_eq!(qubit_count(1), 1);
        assert_eq!(qubit_count(3), 2);
        assert_eq!(qubit_count(7), 3);
        assert_eq!(qubit_count(8), 4);
    }

    #[test]
    fn test_normalization() {
        assert!(check_normalization(&StateVector::zero_state(2), None).is_ok());
        let skewed = StateVector::from_amplitudes(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)]).unwrap();
        assert!(matches!(check_normalization(&skewed, None), Err(ExecutionError::NotNormalized { .. })));
        assert!(check_normalization(&skewed, Some(1.5)).is_ok());
    }
}
