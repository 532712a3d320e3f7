// tests/property_tests.rs

use grover_missing::{GroverError, Simulator, solve};
use proptest::prelude::*;

/// A shuffled `[0, 2^n)` with one value removed, plus the removed value.
fn missing_number_input() -> impl Strategy<Value = (Vec<u64>, u64)> {
    (2usize..=4).prop_flat_map(|n| {
        let size = 1u64 << n;
        (0..size).prop_flat_map(move |missing| {
            let present: Vec<u64> = (0..size).filter(|v| *v != missing).collect();
            (Just(present).prop_shuffle(), Just(missing))
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn finds_the_missing_value((input, missing) in missing_number_input()) {
        let outcome = solve(&input, &Simulator::new()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let found = outcome.missing();
        prop_assert_eq!(found, Some(missing));
        prop_assert!(!input.contains(&missing));
        prop_assert!(missing < (input.len() as u64 + 1));
    }

    #[test]
    fn rejects_lengths_off_a_power_of_two(length in 2usize..64) {
        prop_assume!(!(length + 1).is_power_of_two());
        let input: Vec<u64> = (0..length as u64).collect();
        prop_assert_eq!(solve(&input, &Simulator::new()), Err(GroverError::InvalidInput { length }));
    }
}
