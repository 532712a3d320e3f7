//! Numerical constants and defaults shared across the crate.

/// Constants used by circuit construction and simulation.
pub mod grover_constants {
    /// Used for the iteration count `floor(π/4 · √N)`.
    pub const PI: f64 = std::f64::consts::PI;
    /// Hadamard matrix entry.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Allowed deviation when checking unitarity and normalization.
    pub const TOLERANCE: f64 = 1e-9;
    /// Shots taken per execution unless configured otherwise.
    pub const DEFAULT_SHOTS: usize = 1024;
    /// Largest register the dense simulator accepts by default.
    pub const DEFAULT_MAX_QUBITS: usize = 12;
}
