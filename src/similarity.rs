//! Lexical similarity between feature sets
//!
//! Texts are compared with the Jaccard index of their feature sets.

use crate::types::FeatureSet;

/// Jaccard index `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets score 0.0: texts without content words are never similar.
pub fn jaccard(a: &FeatureSet, b: &FeatureSet) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Jaccard distance `1 - jaccard(a, b)`
pub fn jaccard_distance(a: &FeatureSet, b: &FeatureSet) -> f64 {
    1.0 - jaccard(a, b)
}

/// Check if two feature sets are similar enough for an edge (inclusive).
#[inline]
pub fn is_similar(a: &FeatureSet, b: &FeatureSet, threshold: f64) -> bool {
    jaccard(a, b) >= threshold
}
