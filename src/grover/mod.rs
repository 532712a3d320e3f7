// src/grover/mod.rs

//! Grover circuit construction for the missing-number problem.
//!
//! The oracle marks the one absent value with phase -1, the diffuser
//! reflects about the uniform superposition, and the composer repeats the
//! pair the optimal number of times between a Hadamard layer and a full
//! measurement.

mod composer;
mod diffuser;
mod oracle;

pub use composer::{compose, iteration_count};
pub use diffuser::{DIFFUSER_NAME, build_diffuser};
pub use oracle::{ORACLE_NAME, build_oracle, oracle_matrix};
