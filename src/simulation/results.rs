// src/simulation/results.rs
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Observed frequency of each measurement outcome.
///
/// Keys are bitstrings with the highest classical bit first, so parsing a
/// key as base-2 gives the measured basis index. Only outcomes that were
/// observed at least once are stored, and iteration runs in lexicographic
/// key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    counts: BTreeMap<String, u64>,
}

impl OutcomeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation of `bitstring`.
    pub fn record(&mut self, bitstring: impl Into<String>) {
        *self.counts.entry(bitstring.into()).or_insert(0) += 1;
    }

    /// Count for `bitstring`, zero if it was never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    /// The outcome with the highest count.
    ///
    /// Ties go to the first maximal key in iteration order, i.e. the
    /// lexicographically smallest bitstring among the tied ones.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (key, &count) in &self.counts {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((key.as_str(), count));
            }
        }
        best
    }
}

impl FromIterator<(String, u64)> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (key, count) in iter {
            if count > 0 {
                *counts.entry(key).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}

impl<'a> IntoIterator for &'a OutcomeCounts {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, count)) in self.counts.iter().enumerate() {
            write!(f, "{}'{}': {}", if i > 0 { ", " } else { "" }, key, count)?;
        }
        write!(f, "}}")
    }
}
