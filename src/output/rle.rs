//! Run-length encoding of address groups.
//!
//! Used to find the zero run that canonical IPv6 text replaces with `::`.

use std::collections::HashMap;
use std::hash::Hash;

/// A run of equal consecutive groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<T> {
    /// The repeated group value.
    pub value: T,
    /// Index of the first group of the run in the input, not the run's position in
    /// the output; that position is its index in the returned `Vec`.
    pub start: usize,
    /// Number of groups in the run.
    pub count: usize,
    /// No earlier or later run of the same value is strictly longer, and no earlier
    /// run of the same value was strictly shorter when this one was seen.
    pub is_longest: bool,
}

/// Encode `parts` into runs, flagging the longest run(s) per value.
///
/// Each new run is compared with every previous run of the same value: a strictly
/// longer previous run clears the new run's flag, a strictly shorter one loses its
/// own flag. Equal lengths leave both flags set.
pub fn code<T: Copy + Eq + Hash>(parts: &[T]) -> Vec<Run<T>> {
    let mut runs: Vec<Run<T>> = Vec::new();
    let mut by_value: HashMap<T, Vec<usize>> = HashMap::new();

    for (start, chunk) in chunk_equal(parts) {
        let mut run = Run {
            value: chunk[0],
            start,
            count: chunk.len(),
            is_longest: true,
        };
        let seen = by_value.entry(run.value).or_default();
        for &idx in seen.iter() {
            let prev = &mut runs[idx];
            if prev.count > run.count {
                run.is_longest = false;
            } else if prev.count < run.count {
                prev.is_longest = false;
            }
        }
        seen.push(runs.len());
        runs.push(run);
    }
    runs
}

/// Split `parts` into maximal slices of equal values, with their start index.
fn chunk_equal<T: Eq>(parts: &[T]) -> Vec<(usize, &[T])> {
    let mut out = Vec::new();
    let mut start = 0;
    for i in 1..=parts.len() {
        if i == parts.len() || parts[i] != parts[start] {
            out.push((start, &parts[start..i]));
            start = i;
        }
    }
    out
}
