// src/solver/decoder.rs

use crate::core::GroverError;
use crate::simulation::OutcomeCounts;

/// Decodes the most frequent outcome as a base-2 integer.
///
/// Ties go to the first maximal key in the counts' iteration order (the
/// smallest bitstring). Amplification makes ties practically impossible
/// for a correct circuit, but the choice is still deterministic.
pub fn decode(counts: &OutcomeCounts) -> Result<u64, GroverError> {
    let (bitstring, _) = counts.most_frequent().ok_or(GroverError::EmptyResult)?;
    let invalid = || GroverError::InvalidBitstring {
        bitstring: bitstring.to_string(),
    };
    // from_str_radix alone would accept a leading sign.
    if bitstring.is_empty() || !bitstring.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(invalid());
    }
    u64::from_str_radix(bitstring, 2).map_err(|_| invalid())
}
