//! Example: finding the missing number with Grover's search.
//! Runs the full pipeline on a few inputs and prints the circuit, the
//! outcome counts and the decoded value.

use grover_missing::{GroverError, Simulator, SimulatorConfig, SolveOutcome, solve};

fn report(input: &[u64], simulator: &Simulator) -> Result<(), GroverError> {
    println!("\n--- Input: {:?} ---", input);
    match solve(input, simulator)? {
        SolveOutcome::Degenerate(reason) => println!("Skipped: {}", reason),
        SolveOutcome::Solved(solution) => {
            println!("{}", solution.circuit);
            println!("Counts: {}", solution.counts);
            println!(
                "Missing number: {} ({} qubits, {} rounds, {:.1}% of shots)",
                solution.missing,
                solution.num_qubits(),
                solution.iterations(),
                solution.confidence() * 100.0
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let simulator = Simulator::with_config(SimulatorConfig::default().with_shots(2048));

    report(&[0, 1, 2, 4, 5, 6, 7], &simulator)?;
    report(&[1, 2, 3], &simulator)?;
    report(&[15, 3, 9, 0, 1, 14, 7, 2, 12, 5, 6, 8, 10, 4, 13], &simulator)?;
    report(&[], &simulator)?;

    // Lengths that are not one below a power of two are rejected.
    if let Err(e) = solve(&[0, 1, 2, 3], &simulator) {
        println!("\nRejected [0, 1, 2, 3]: {}", e);
    }

    Ok(())
}
