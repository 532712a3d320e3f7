// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod matrix;
pub mod state;

pub use error::{CircuitError, DegenerateInput, ExecutionError, GroverError};
pub use matrix::UnitaryMatrix;
pub use state::StateVector;

pub mod constants;
pub use constants::grover_constants::{DEFAULT_MAX_QUBITS, DEFAULT_SHOTS, FRAC_1_SQRT_2, PI, TOLERANCE};
