//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Top-level failure of a missing-number search.
///
/// Validation failures surface before any circuit is built. Execution
/// failures come straight from the backend and are never retried here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroverError {
    /// The input length plus one is not a power of two.
    #[error("input length {length} must be one less than a power of two")]
    InvalidInput {
        /// Length of the rejected input sequence.
        length: usize,
    },

    /// An input value does not index a basis state of the search space.
    #[error("value {value} is outside the search space [0, {dimension})")]
    ValueOutOfRange {
        /// The offending value.
        value: u64,
        /// Dimension `2^n` of the search space.
        dimension: usize,
    },

    /// An input value occurs more than once.
    #[error("value {value} appears more than once in the input")]
    DuplicateValue {
        /// The repeated value.
        value: u64,
    },

    /// The backend returned no outcomes to decode.
    #[error("no measurement outcomes to decode")]
    EmptyResult,

    /// An outcome key is not a base-2 number.
    #[error("outcome '{bitstring}' is not a bitstring")]
    InvalidBitstring {
        bitstring: String,
    },

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Failures while constructing or checking a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("invalid qubit index {index}: circuit has {total} qubits")]
    InvalidQubitIndex { index: usize, total: usize },

    #[error("qubit {0} is used more than once by a single operation")]
    DuplicateQubit(usize),

    #[error("control and target qubits must be different (qubit {0})")]
    SameControlTarget(usize),

    #[error("gate '{gate}' acts on {expected} qubits, but {provided} were provided")]
    QubitCountMismatch {
        gate: String,
        expected: usize,
        provided: usize,
    },

    #[error("matrix of dimension {actual} does not fit {qubits} qubits (expected {expected})")]
    DimensionMismatch {
        qubits: usize,
        expected: usize,
        actual: usize,
    },

    #[error("matrix for gate '{0}' is not unitary")]
    NotUnitary(String),

    #[error("circuit too large: {qubits} qubits exceeds maximum {max}")]
    CircuitTooLarge { qubits: usize, max: usize },

    #[error("operation follows a measurement on qubit {0}")]
    OperationAfterMeasurement(usize),

    #[error("gate bodies cannot measure (qubit {0})")]
    MeasurementInGate(usize),
}

/// Failures surfaced by an execution backend, at compile or execute stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("compilation failed: {0}")]
    Compile(#[from] CircuitError),

    #[error("circuit has no measurements")]
    NoMeasurements,

    #[error("invalid shot count: {0} (must be > 0)")]
    InvalidShotCount(usize),

    #[error("state vector lost normalization: sum of |c|^2 = {norm}")]
    NotNormalized { norm: f64 },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Inputs that are valid but too small to search.
///
/// These are not errors: `solve` reports them as a degenerate outcome and
/// the `Display` text is the diagnostic shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegenerateInput {
    /// No values were given.
    Empty,
    /// Exactly one value was given.
    SingleElement,
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateInput::Empty => write!(f, "The input vector is empty."),
            DegenerateInput::SingleElement => write!(f, "The input vector has only one element."),
        }
    }
}
