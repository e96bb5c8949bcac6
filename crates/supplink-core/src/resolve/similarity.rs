//! Word-set similarity between supplier names.

use std::collections::HashSet;

/// Jaccard index of the whitespace-separated, upper-cased word sets.
/// Two empty names score 0.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let left = word_set(a);
    let right = word_set(b);

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

fn word_set(name: &str) -> HashSet<String> {
    name.split_whitespace().map(str::to_uppercase).collect()
}
