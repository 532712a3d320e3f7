// src/core/matrix.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::constants::grover_constants::TOLERANCE;
use super::error::CircuitError;

/// Dense square complex matrix stored row-major.
///
/// Used for custom unitary injection (the oracle). Dense storage is
/// exponential in the qubit count: a 16-qubit operator already holds
/// 2^32 entries. Larger registers need a sparse or algebraic oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    dim: usize,
    entries: Vec<Complex<f64>>,
}

impl UnitaryMatrix {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut entries = vec![Complex::zero(); dim * dim];
        for i in 0..dim {
            entries[i * dim + i] = Complex::one();
        }
        Self { dim, entries }
    }

    /// Builds a diagonal matrix from its diagonal.
    pub fn from_diagonal(diagonal: &[Complex<f64>]) -> Result<Self, CircuitError> {
        let dim = diagonal.len();
        check_dimension(dim)?;
        let mut entries = vec![Complex::zero(); dim * dim];
        for (i, d) in diagonal.iter().enumerate() {
            entries[i * dim + i] = *d;
        }
        Ok(Self { dim, entries })
    }

    /// Builds a matrix from rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<Complex<f64>>>) -> Result<Self, CircuitError> {
        let dim = rows.len();
        check_dimension(dim)?;
        let mut entries = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(CircuitError::DimensionMismatch {
                    qubits: dim.trailing_zeros() as usize,
                    expected: dim,
                    actual: row.len(),
                });
            }
            entries.extend(row);
        }
        Ok(Self { dim, entries })
    }

    /// Multiplies every entry by `factor`.
    pub fn scaled(mut self, factor: Complex<f64>) -> Self {
        for e in &mut self.entries {
            *e *= factor;
        }
        self
    }

    /// Side length `2^n`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> usize {
        self.dim.trailing_zeros() as usize
    }

    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.entries[row * self.dim + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Complex<f64>) {
        self.entries[row * self.dim + col] = value;
    }

    /// One row of the matrix.
    pub fn row(&self, row: usize) -> &[Complex<f64>] {
        &self.entries[row * self.dim..(row + 1) * self.dim]
    }

    /// `true` when `U · U† = I` within [`TOLERANCE`].
    pub fn is_unitary(&self) -> bool {
        let dim = self.dim;
        if self.is_diagonal() {
            return (0..dim).all(|i| (self.get(i, i).norm() - 1.0).abs() <= TOLERANCE);
        }
        for i in 0..dim {
            for j in 0..dim {
                let mut acc: Complex<f64> = Complex::zero();
                for k in 0..dim {
                    acc += self.get(i, k) * self.get(j, k).conj();
                }
                let expected = if i == j { Complex::one() } else { Complex::zero() };
                if (acc - expected).norm() > TOLERANCE {
                    return false;
                }
            }
        }
        true
    }

    /// `true` when every off-diagonal entry is zero.
    pub fn is_diagonal(&self) -> bool {
        (0..self.dim).all(|i| (0..self.dim).all(|j| i == j || self.get(i, j).is_zero()))
    }
}

fn check_dimension(dim: usize) -> Result<(), CircuitError> {
    if dim == 0 || !dim.is_power_of_two() {
        return Err(CircuitError::DimensionMismatch {
            qubits: dim.next_power_of_two().trailing_zeros() as usize,
            expected: dim.next_power_of_two().max(1),
            actual: dim,
        });
    }
    Ok(())
}

impl fmt::Display for UnitaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.dim {
            write!(f, "[")?;
            for (c, e) in self.row(r).iter().enumerate() {
                write!(f, "{}{:.3}", if c > 0 { ", " } else { "" }, e)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_unitary_and_diagonal() {
        let id = UnitaryMatrix::identity(2);
        assert_eq!(id.dim(), 4);
        assert_eq!(id.num_qubits(), 2);
        assert!(id.is_unitary());
        assert!(id.is_diagonal());
    }

    #[test]
    fn test_non_unitary_detected() {
        let m = UnitaryMatrix::from_diagonal(&[Complex::new(2.0, 0.0), Complex::one()]).unwrap();
        assert!(!m.is_unitary());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![Complex::one(), Complex::zero()], vec![Complex::one()]];
        assert!(UnitaryMatrix::from_rows(rows).is_err());
    }

    #[test]
    fn test_dense_unitarity_check() {
        let h = Complex::new(super::super::constants::grover_constants::FRAC_1_SQRT_2, 0.0);
        let hadamard = UnitaryMatrix::from_rows(vec![vec![h, h], vec![h, -h]]).unwrap();
        assert!(!hadamard.is_diagonal());
        assert!(hadamard.is_unitary());

        let skewed = UnitaryMatrix::from_rows(vec![vec![h, h], vec![h, h]]).unwrap();
        assert!(!skewed.is_unitary());
    }

    #[test]
    fn test_negated_identity() {
        let m = UnitaryMatrix::identity(1).scaled(Complex::new(-1.0, 0.0));
        assert_eq!(m.get(0, 0), Complex::new(-1.0, 0.0));
        assert_eq!(m.get(0, 1), Complex::zero());
        assert!(m.is_unitary());
    }
}
