// src/lib.rs

//! `grover_missing` - Grover's search applied to the missing-number problem
//!
//! Given `2^n - 1` distinct integers from `[0, 2^n)`, the one absent value
//! is found by amplitude amplification: a diagonal oracle marks the missing
//! basis state, a diffuser reflects about the mean, and the pair is repeated
//! `floor(π/4 · √(2^n))` times before measuring.
//!
//! Circuits are executed by any [`Backend`]; [`Simulator`] is the bundled
//! dense state-vector backend.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod validation;
pub mod grover;
pub mod simulation;
pub mod solver;

// Re-export the most common types for easier top-level use
pub use crate::core::{CircuitError, DegenerateInput, ExecutionError, GroverError, StateVector, UnitaryMatrix};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder, Gate, GateDefinition};
pub use grover::{build_diffuser, build_oracle, compose, iteration_count};
pub use simulation::{Backend, CompiledCircuit, OutcomeCounts, Simulator, SimulatorConfig};
pub use solver::{Solution, SolveOutcome, decode, solve};
pub use validation::{InputShape, check_normalization, qubit_count, validate_input};

// Example 1: Finding the missing number
// Seven of the eight 3-bit values are given; the search recovers the eighth.
/// ```
/// use grover_missing::{solve, Simulator, GroverError};
///
/// let simulator = Simulator::new();
/// let outcome = solve(&[0, 1, 2, 4, 5, 6, 7], &simulator)?;
/// let solution = outcome.solution().expect("seven values are searchable");
///
/// println!("Circuit:\n{}", solution.circuit);
/// println!("Counts: {}", solution.counts);
///
/// assert_eq!(solution.missing, 3);
/// assert_eq!(solution.iterations(), 2);
/// assert!(solution.counts.get("011") * 10 > solution.counts.total() * 9);
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Building the circuit by hand
// Oracle and diffuser are built once, shared by every round, and the
// composed circuit runs on an explicitly chosen backend configuration.
/// ```
/// use grover_missing::{
///     build_diffuser, build_oracle, compose, decode, Backend, GroverError, Simulator, SimulatorConfig,
/// };
///
/// let present = [1, 2, 3];
/// let oracle = build_oracle(&present, 2)?;
/// let diffuser = build_diffuser(2);
/// let circuit = compose(&oracle, &diffuser, 2);
///
/// let backend = Simulator::with_config(SimulatorConfig::default().with_shots(256).with_seed(11));
/// let counts = backend.execute(&backend.compile(&circuit)?)?;
///
/// assert_eq!(counts.total(), 256);
/// assert_eq!(decode(&counts)?, 0);
/// # Ok::<(), GroverError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
