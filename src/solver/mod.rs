// src/solver/mod.rs

//! The top-level missing-number search.

mod decoder;

pub use decoder::decode;

use crate::circuits::Circuit;
use crate::core::{DegenerateInput, GroverError};
use crate::grover::{build_diffuser, build_oracle, compose, iteration_count};
use crate::simulation::{Backend, OutcomeCounts};
use crate::validation::{InputShape, validate_input};
use tracing::{debug, info, warn};

/// A completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The decoded missing value, in `[0, 2^n)`.
    pub missing: u64,
    /// Outcome frequencies reported by the backend.
    pub counts: OutcomeCounts,
    /// The circuit that was executed.
    pub circuit: Circuit,
}

impl Solution {
    /// Register width `n` of the executed circuit.
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    /// Number of oracle + diffuser rounds in the circuit.
    pub fn iterations(&self) -> usize {
        iteration_count(self.num_qubits())
    }

    /// Share of shots that landed on the decoded value.
    pub fn confidence(&self) -> f64 {
        let total = self.counts.total();
        if total == 0 {
            return 0.0;
        }
        let key = format!("{:0width$b}", self.missing, width = self.num_qubits());
        self.counts.get(&key) as f64 / total as f64
    }
}

/// Result of [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// The input has zero or one value; nothing was built or run.
    Degenerate(DegenerateInput),
    Solved(Solution),
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Degenerate(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Degenerate(_) => None,
        }
    }

    pub fn missing(&self) -> Option<u64> {
        self.solution().map(|s| s.missing)
    }

    /// Human-readable reason the search was skipped, if it was.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            SolveOutcome::Degenerate(reason) => Some(reason.to_string()),
            SolveOutcome::Solved(_) => None,
        }
    }
}

/// Finds the value missing from `input` by amplitude amplification.
///
/// `input` holds `2^n - 1` distinct values from `[0, 2^n)`. The circuit is
/// built here and handed to `backend`; compile and execute errors from the
/// backend are returned unchanged.
///
/// # Errors
/// * [`GroverError::InvalidInput`] if `input.len() + 1` is not a power of two.
/// * [`GroverError::ValueOutOfRange`] / [`GroverError::DuplicateValue`] from the oracle.
/// * [`GroverError::Execution`] from the backend.
/// * [`GroverError::EmptyResult`] if the backend reports no outcomes.
pub fn solve<B: Backend>(input: &[u64], backend: &B) -> Result<SolveOutcome, GroverError> {
    let num_qubits = match validate_input(input)? {
        InputShape::Degenerate(reason) => {
            warn!(%reason, "input too small to search");
            return Ok(SolveOutcome::Degenerate(reason));
        }
        InputShape::Searchable { num_qubits } => num_qubits,
    };
    debug!(length = input.len(), num_qubits, "searching for missing value");

    // The oracle matrix is 4^n entries; refuse the width before allocating it.
    backend.check_width(num_qubits)?;

    let oracle = build_oracle(input, num_qubits)?;
    let diffuser = build_diffuser(num_qubits);
    let circuit = compose(&oracle, &diffuser, num_qubits);

    let compiled = backend.compile(&circuit)?;
    let counts = backend.execute(&compiled)?;
    let missing = decode(&counts)?;

    info!(missing, num_qubits, shots = counts.total(), "decoded missing value");
    Ok(SolveOutcome::Solved(Solution {
        missing,
        counts,
        circuit,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CircuitError, ExecutionError};
    use crate::simulation::Simulator;

    /// Backend double that skips simulation and replays fixed counts.
    struct FixedCounts(Result<OutcomeCounts, ExecutionError>);

    impl Backend for FixedCounts {
        type Compiled = usize;

        fn compile(&self, circuit: &Circuit) -> Result<usize, ExecutionError> {
            circuit.validate()?;
            Ok(circuit.len())
        }

        fn execute(&self, _compiled: &usize) -> Result<OutcomeCounts, ExecutionError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_degenerate_inputs() -> Result<(), GroverError> {
        let simulator = Simulator::new();
        let empty = solve(&[], &simulator)?;
        assert_eq!(empty, SolveOutcome::Degenerate(DegenerateInput::Empty));
        assert_eq!(empty.diagnostic().as_deref(), Some("The input vector is empty."));
        let single = solve(&[0], &simulator)?;
        assert_eq!(single.missing(), None);
        assert_eq!(single.diagnostic().as_deref(), Some("The input vector has only one element."));
        Ok(())
    }

    #[test]
    fn test_injected_backend_result_is_decoded() -> Result<(), GroverError> {
        let replay = FixedCounts(Ok([("10".to_string(), 9), ("00".to_string(), 1)].into_iter().collect()));
        let outcome = solve(&[0, 1, 3], &replay)?;
        assert_eq!(outcome.missing(), Some(2));
        Ok(())
    }

    #[test]
    fn test_backend_errors_propagate_unchanged() {
        let failing = FixedCounts(Err(ExecutionError::Backend("device offline".to_string())));
        assert_eq!(
            solve(&[0, 1, 3], &failing),
            Err(GroverError::Execution(ExecutionError::Backend("device offline".to_string())))
        );
    }

    #[test]
    fn test_empty_backend_result() {
        let silent = FixedCounts(Ok(OutcomeCounts::new()));
        assert_eq!(solve(&[0, 1, 3], &silent), Err(GroverError::EmptyResult));
    }

    #[test]
    fn test_compile_errors_propagate() {
        let tiny = Simulator::with_config(crate::simulation::SimulatorConfig::default().with_max_qubits(1));
        assert_eq!(
            solve(&[0, 1, 3], &tiny),
            Err(GroverError::Execution(ExecutionError::Compile(CircuitError::CircuitTooLarge { qubits: 2, max: 1 })))
        );
    }

    /// Backend that records whether a circuit ever reached it.
    struct NarrowBackend {
        compiled: std::cell::Cell<bool>,
    }

    impl Backend for NarrowBackend {
        type Compiled = ();

        fn check_width(&self, num_qubits: usize) -> Result<(), ExecutionError> {
            if num_qubits > 2 {
                return Err(CircuitError::CircuitTooLarge { qubits: num_qubits, max: 2 }.into());
            }
            Ok(())
        }

        fn compile(&self, _circuit: &Circuit) -> Result<(), ExecutionError> {
            self.compiled.set(true);
            Ok(())
        }

        fn execute(&self, _compiled: &()) -> Result<OutcomeCounts, ExecutionError> {
            Ok(OutcomeCounts::new())
        }
    }

    #[test]
    fn test_width_rejected_before_circuit_is_built() {
        let backend = NarrowBackend { compiled: std::cell::Cell::new(false) };
        assert_eq!(
            solve(&[0, 1, 2, 4, 5, 6, 7], &backend),
            Err(GroverError::Execution(ExecutionError::Compile(CircuitError::CircuitTooLarge { qubits: 3, max: 2 })))
        );
        assert!(!backend.compiled.get());
    }

    #[test]
    fn test_wide_input_rejected_by_default_simulator() {
        // 2^13 - 1 values: over the default 12-qubit cap.
        let input: Vec<u64> = (1..(1u64 << 13)).collect();
        assert_eq!(
            solve(&input, &Simulator::new()),
            Err(GroverError::Execution(ExecutionError::Compile(CircuitError::CircuitTooLarge { qubits: 13, max: 12 })))
        );
    }

    #[test]
    fn test_solution_reports_circuit_facts() -> Result<(), GroverError> {
        let outcome = solve(&[1, 2, 3], &Simulator::new())?;
        let solution = outcome.solution().expect("solved");
        assert_eq!(solution.missing, 0);
        assert_eq!(solution.num_qubits(), 2);
        assert_eq!(solution.iterations(), 1);
        assert!(solution.confidence() > 0.99);
        Ok(())
    }
}
