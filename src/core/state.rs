// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::error::CircuitError;

/// Dense amplitude vector over `n` qubits, of length `2^n`.
///
/// Basis index bit `q` holds the value of qubit `q`, so `|q2 q1 q0>` maps to
/// index `q2·4 + q1·2 + q0`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The computational basis state |0...0> on `num_qubits` qubits.
    pub fn zero_state(num_qubits: usize) -> Self {
        Self::basis_state(num_qubits, 0)
    }

    /// The computational basis state `|index>`.
    ///
    /// # Panics
    /// If `index >= 2^num_qubits`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); 1 << num_qubits];
        amplitudes[index] = Complex::one();
        Self { amplitudes, num_qubits }
    }

    /// Wraps an amplitude vector. The length must be a power of two.
    /// Normalization is not enforced here; backends check it after evolution.
    pub fn from_amplitudes(amplitudes: Vec<Complex<f64>>) -> Result<Self, CircuitError> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(CircuitError::DimensionMismatch {
                qubits: len.next_power_of_two().trailing_zeros() as usize,
                expected: len.next_power_of_two(),
                actual: len,
            });
        }
        Ok(Self { num_qubits: len.trailing_zeros() as usize, amplitudes })
    }

    /// Provides read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of qubits `n`.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Measurement probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Sum of squared amplitude magnitudes; 1.0 for a physical state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Compares two states ignoring a global phase factor.
    pub fn approx_eq_up_to_phase(&self, other: &StateVector, tolerance: f64) -> bool {
        if self.dim() != other.dim() {
            return false;
        }
        // Global phase from the largest amplitude of `self`.
        let pivot = self
            .amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))
            .map(|(i, _)| i);
        let Some(pivot) = pivot else { return true };
        let (a, b) = (self.amplitudes[pivot], other.amplitudes[pivot]);
        if a.norm() < tolerance {
            return other.amplitudes.iter().all(|c| c.norm() < tolerance);
        }
        if b.norm() < tolerance {
            return false;
        }
        let phase = (b / a) / (b / a).norm();
        self.amplitudes
            .iter()
            .zip(other.amplitudes.iter())
            .all(|(x, y)| (x * phase - y).norm() < tolerance)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
