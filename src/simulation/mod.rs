// src/simulation/mod.rs

//! Circuit execution.
//!
//! [`Backend`] is the boundary to whatever runs circuits: compile a circuit
//! for the target, execute it for the configured number of shots, and
//! report outcome counts. [`Simulator`] is the bundled dense state-vector
//! backend. Backends are passed to the solver explicitly; there is no
//! process-wide default.

pub(crate) mod engine;
mod results;

pub use engine::Instruction;
pub use results::OutcomeCounts;

use crate::circuits::{Circuit, Gate, GateDefinition};
use crate::core::{
    CircuitError, DEFAULT_MAX_QUBITS, DEFAULT_SHOTS, ExecutionError, StateVector, UnitaryMatrix,
};
use crate::operations::Operation;
use crate::validation::check_normalization;
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Something that can run circuits and report measurement frequencies.
///
/// Errors from either stage are returned as-is to the caller; nothing in
/// this crate retries them.
pub trait Backend {
    /// Backend-specific executable form of a circuit.
    type Compiled;

    /// Rejects a register width before any circuit of that width is built.
    /// Backends without a limit accept every width.
    fn check_width(&self, _num_qubits: usize) -> Result<(), ExecutionError> {
        Ok(())
    }

    /// Lowers `circuit` for this backend.
    fn compile(&self, circuit: &Circuit) -> Result<Self::Compiled, ExecutionError>;

    /// Runs a compiled circuit and returns how often each outcome was seen.
    fn execute(&self, compiled: &Self::Compiled) -> Result<OutcomeCounts, ExecutionError>;
}

/// Execution settings for [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Number of samples drawn per execution.
    pub shots: usize,
    /// Fixed RNG seed. When `None` the seed is derived from the final state,
    /// so the same circuit always yields the same counts.
    pub seed: Option<u64>,
    /// Largest register accepted at compile time.
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl SimulatorConfig {
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }
}

/// A circuit lowered to primitive instructions, ready for [`Simulator`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCircuit {
    num_qubits: usize,
    instructions: Vec<Instruction>,
    /// Measured qubits; entry `i` is written to classical bit `i`.
    measured: Vec<usize>,
}

impl CompiledCircuit {
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn measured_qubits(&self) -> &[usize] {
        &self.measured
    }
}

/// Dense state-vector simulator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator with default settings (1024 shots, state-derived seed).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Final state of `circuit` before measurement.
    pub fn statevector(&self, circuit: &Circuit) -> Result<StateVector, ExecutionError> {
        let compiled = self.compile(circuit)?;
        self.evolve(&compiled)
    }

    /// Full matrix of `gate`, column `j` being the image of basis state `|j>`.
    pub fn gate_matrix(&self, gate: &Arc<Gate>) -> Result<UnitaryMatrix, ExecutionError> {
        let n = gate.num_qubits();
        let mut instructions = Vec::new();
        let mut measured = Vec::new();
        let identity: Vec<usize> = (0..n).collect();
        lower(
            &[Operation::ApplyGate { gate: Arc::clone(gate), qubits: identity.clone() }],
            &identity,
            &mut instructions,
            &mut measured,
        );

        let dim = 1usize << n;
        let mut matrix = UnitaryMatrix::identity(n);
        for col in 0..dim {
            let mut engine = SimulationEngine::from_state(StateVector::basis_state(n, col));
            engine.apply_all(&instructions)?;
            for (row, amp) in engine.state().amplitudes().iter().enumerate() {
                matrix.set(row, col, *amp);
            }
        }
        Ok(matrix)
    }

    fn evolve(&self, compiled: &CompiledCircuit) -> Result<StateVector, ExecutionError> {
        let mut engine = SimulationEngine::init(compiled.num_qubits)?;
        engine.apply_all(&compiled.instructions)?;
        let state = engine.into_state();
        check_normalization(&state, None)?;
        Ok(state)
    }

    /// Draws `shots` outcomes from the Born probabilities of `state`.
    fn sample(&self, state: &StateVector, measured: &[usize]) -> OutcomeCounts {
        let probabilities = state.probabilities();
        let total: f64 = probabilities.iter().sum();
        let seed = self.config.seed.unwrap_or_else(|| state_seed(state));
        let mut rng = StdRng::seed_from_u64(seed);

        let fallback = probabilities.iter().rposition(|p| *p > 0.0).unwrap_or(0);
        let mut counts = OutcomeCounts::new();
        for _ in 0..self.config.shots {
            let p_sample: f64 = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = fallback;
            for (k, p) in probabilities.iter().enumerate() {
                cumulative += p;
                if p_sample < cumulative {
                    chosen = k;
                    break;
                }
            }
            counts.record(bitstring(chosen, measured));
        }
        counts
    }
}

impl Backend for Simulator {
    type Compiled = CompiledCircuit;

    fn check_width(&self, num_qubits: usize) -> Result<(), ExecutionError> {
        if num_qubits > self.config.max_qubits {
            return Err(CircuitError::CircuitTooLarge {
                qubits: num_qubits,
                max: self.config.max_qubits,
            }
            .into());
        }
        Ok(())
    }

    fn compile(&self, circuit: &Circuit) -> Result<CompiledCircuit, ExecutionError> {
        let num_qubits = circuit.num_qubits();
        self.check_width(num_qubits)?;
        circuit.validate()?;

        let mut instructions = Vec::with_capacity(circuit.len());
        let mut measured = Vec::new();
        let identity: Vec<usize> = (0..num_qubits).collect();
        lower(circuit.operations(), &identity, &mut instructions, &mut measured);

        debug!(
            num_qubits,
            operations = circuit.len(),
            instructions = instructions.len(),
            measured = measured.len(),
            "compiled circuit"
        );
        Ok(CompiledCircuit {
            num_qubits,
            instructions,
            measured,
        })
    }

    fn execute(&self, compiled: &CompiledCircuit) -> Result<OutcomeCounts, ExecutionError> {
        if self.config.shots == 0 {
            return Err(ExecutionError::InvalidShotCount(0));
        }
        if compiled.measured.is_empty() {
            return Err(ExecutionError::NoMeasurements);
        }
        let state = self.evolve(compiled)?;
        let counts = self.sample(&state, &compiled.measured);
        debug!(shots = self.config.shots, outcomes = counts.len(), "executed circuit");
        Ok(counts)
    }
}

/// Expands named gates into primitives. `map[j]` is the global index of
/// local qubit `j` in `ops`.
fn lower(ops: &[Operation], map: &[usize], out: &mut Vec<Instruction>, measured: &mut Vec<usize>) {
    for op in ops {
        match op {
            Operation::Hadamard { target } => out.push(Instruction::Hadamard(map[*target])),
            Operation::PauliX { target } => out.push(Instruction::PauliX(map[*target])),
            Operation::MultiControlledX { controls, target } => out.push(Instruction::MultiControlledX {
                controls: controls.iter().map(|c| map[*c]).collect(),
                target: map[*target],
            }),
            Operation::ApplyGate { gate, qubits } => {
                let inner: Vec<usize> = qubits.iter().map(|q| map[*q]).collect();
                match gate.definition() {
                    GateDefinition::Unitary(_) => out.push(Instruction::Unitary {
                        gate: Arc::clone(gate),
                        qubits: inner,
                    }),
                    GateDefinition::Composite(body) => lower(body, &inner, out, measured),
                }
            }
            Operation::Measure { targets } => {
                for q in targets.iter().map(|q| map[*q]) {
                    if !measured.contains(&q) {
                        measured.push(q);
                    }
                }
            }
        }
    }
}

/// Outcome bitstring for basis index `k`, highest classical bit first.
fn bitstring(k: usize, measured: &[usize]) -> String {
    measured
        .iter()
        .rev()
        .map(|q| if (k >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Deterministic seed from the amplitudes of `state`.
fn state_seed(state: &StateVector) -> u64 {
    let mut hasher = DefaultHasher::new();
    for c in state.amplitudes() {
        c.re.to_ne_bytes().hash(&mut hasher);
        c.im.to_ne_bytes().hash(&mut hasher);
    }
    hasher.finish()
}

/// Applies `instructions` to an arbitrary starting state.
#[cfg(test)]
pub(crate) fn evolve_from(state: StateVector, instructions: &[Instruction]) -> Result<StateVector, ExecutionError> {
    let mut engine = SimulationEngine::from_state(state);
    engine.apply_all(instructions)?;
    Ok(engine.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::{FRAC_1_SQRT_2, TOLERANCE};
    use num_complex::Complex;
    use num_traits::Zero;

    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TOLERANCE * TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i, actual[i], expected[i], context
            );
        }
    }

    #[test]
    fn test_hadamard_layer_gives_uniform_state() -> Result<(), ExecutionError> {
        let circuit = CircuitBuilder::new(2).h_all().build();
        let state = Simulator::new().statevector(&circuit)?;
        let half = Complex::new(0.5, 0.0);
        assert_complex_vec_approx_equal(state.amplitudes(), &[half; 4], "H⊗H|00>");
        Ok(())
    }

    #[test]
    fn test_qubit_zero_is_least_significant() -> Result<(), ExecutionError> {
        let circuit = CircuitBuilder::new(3).x(0).measure_all().build();
        let simulator = Simulator::new();
        let counts = simulator.execute(&simulator.compile(&circuit)?)?;
        assert_eq!(counts.get("001"), 1024);
        Ok(())
    }

    #[test]
    fn test_toffoli_flips_only_when_both_controls_set() -> Result<(), ExecutionError> {
        let simulator = Simulator::new();
        let both = CircuitBuilder::new(3).x(0).x(1).mcx(vec![0, 1], 2).build();
        let one = CircuitBuilder::new(3).x(0).mcx(vec![0, 1], 2).build();
        assert_eq!(simulator.statevector(&both)?.probabilities()[0b111], 1.0);
        assert_eq!(simulator.statevector(&one)?.probabilities()[0b001], 1.0);
        Ok(())
    }

    #[test]
    fn test_mcx_without_controls_is_x() -> Result<(), ExecutionError> {
        let circuit = CircuitBuilder::new(1).mcx(vec![], 0).build();
        assert_eq!(Simulator::new().statevector(&circuit)?.probabilities()[1], 1.0);
        Ok(())
    }

    #[test]
    fn test_unitary_gate_respects_qubit_mapping() -> Result<(), ExecutionError> {
        // X on local qubit 0 of a 2-qubit gate (X ⊗ I in little-endian indexing).
        let o = Complex::zero();
        let l = Complex::new(1.0, 0.0);
        let matrix = UnitaryMatrix::from_rows(vec![
            vec![o, l, o, o],
            vec![l, o, o, o],
            vec![o, o, o, l],
            vec![o, o, l, o],
        ])?;
        let gate = Arc::new(Gate::unitary("X0", matrix)?);
        // Local qubit 0 -> global qubit 2.
        let circuit = CircuitBuilder::new(3).append(&gate, vec![2, 0]).build();
        let state = Simulator::new().statevector(&circuit)?;
        assert!((state.probabilities()[0b100] - 1.0).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_composite_gate_is_expanded() -> Result<(), ExecutionError> {
        let body = CircuitBuilder::new(2).h(0).mcx(vec![0], 1).build();
        let bell = Arc::new(Gate::from_circuit("Bell", body)?);
        let circuit = CircuitBuilder::new(2).append(&bell, vec![0, 1]).measure_all().build();
        let simulator = Simulator::new();
        let compiled = simulator.compile(&circuit)?;
        assert_eq!(compiled.instructions().len(), 2);
        assert_eq!(compiled.measured_qubits(), &[0, 1]);

        let state = simulator.statevector(&circuit)?;
        let s = Complex::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex::zero();
        assert_complex_vec_approx_equal(state.amplitudes(), &[s, z, z, s], "Bell pair");

        let counts = simulator.execute(&compiled)?;
        assert_eq!(counts.total(), 1024);
        assert_eq!(counts.get("00") + counts.get("11"), 1024);
        Ok(())
    }

    #[test]
    fn test_execute_is_deterministic() -> Result<(), ExecutionError> {
        let circuit = CircuitBuilder::new(2).h_all().measure_all().build();
        let simulator = Simulator::new();
        let compiled = simulator.compile(&circuit)?;
        assert_eq!(simulator.execute(&compiled)?, simulator.execute(&compiled)?);

        let seeded = Simulator::with_config(SimulatorConfig::default().with_seed(7).with_shots(100));
        let counts = seeded.execute(&seeded.compile(&circuit)?)?;
        assert_eq!(counts.total(), 100);
        assert_eq!(counts, seeded.execute(&seeded.compile(&circuit)?)?);
        Ok(())
    }

    #[test]
    fn test_execution_errors() -> Result<(), ExecutionError> {
        let unmeasured = CircuitBuilder::new(1).h(0).build();
        let simulator = Simulator::new();
        let compiled = simulator.compile(&unmeasured)?;
        assert_eq!(simulator.execute(&compiled), Err(ExecutionError::NoMeasurements));

        let no_shots = Simulator::with_config(SimulatorConfig::default().with_shots(0));
        let measured = CircuitBuilder::new(1).measure_all().build();
        let compiled = no_shots.compile(&measured)?;
        assert_eq!(no_shots.execute(&compiled), Err(ExecutionError::InvalidShotCount(0)));

        let small = Simulator::with_config(SimulatorConfig::default().with_max_qubits(2));
        assert_eq!(
            small.compile(&Circuit::new(3)),
            Err(ExecutionError::Compile(CircuitError::CircuitTooLarge { qubits: 3, max: 2 }))
        );
        Ok(())
    }

    #[test]
    fn test_gate_matrix_of_hadamard_body() -> Result<(), ExecutionError> {
        let gate = Arc::new(Gate::from_circuit("H", CircuitBuilder::new(1).h(0).build())?);
        let m = Simulator::new().gate_matrix(&gate)?;
        assert!((m.get(1, 1).re + FRAC_1_SQRT_2).abs() < TOLERANCE);
        assert!((m.get(0, 1).re - FRAC_1_SQRT_2).abs() < TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_evolve_from_arbitrary_state() -> Result<(), ExecutionError> {
        let state = StateVector::basis_state(2, 3);
        let out = evolve_from(state, &[Instruction::PauliX(1)])?;
        assert_eq!(out.probabilities()[1], 1.0);
        Ok(())
    }
}
