//! Fuzzy overlap of sample values.

use std::collections::HashSet;

use super::edit::edit_similarity;

/// Default edit-similarity threshold for a fuzzy value match.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.8;

/// Estimates how much of `left`'s sample is covered by `right`'s.
///
/// Values are trimmed, case-folded, and deduplicated, keeping first-seen
/// order. A left value counts once if any right value reaches `threshold`
/// edit similarity; the first qualifying right value wins. The score is the
/// matched count over the size of the union of both value sets, or 0.0 when
/// the union is empty.
///
/// The measure is asymmetric: swapping sides can change the result.
pub fn overlap_score<L, R>(left: &[L], right: &[R], threshold: f64) -> f64
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let left = normalized_set(left);
    let right = normalized_set(right);

    let union: HashSet<&str> = left
        .iter()
        .chain(right.iter())
        .map(String::as_str)
        .collect();
    if union.is_empty() {
        return 0.0;
    }

    let matched = left
        .iter()
        .filter(|l| right.iter().any(|r| edit_similarity(l, r) >= threshold))
        .count();

    matched as f64 / union.len() as f64
}

fn normalized_set<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_sets_score_one() {
        let values = ["Paris", "London", "Berlin"];
        assert_eq!(overlap_score(&values, &values, 0.8), 1.0);
    }

    #[test]
    fn test_normalization_before_comparison() {
        let left = ["  Paris", "LONDON", "paris"];
        let right = ["paris ", "london"];
        assert_eq!(overlap_score(&left, &right, 0.8), 1.0);
    }

    #[test]
    fn test_dissimilar_sets_score_zero() {
        let left = ["apple", "banana"];
        let right = ["12345", "67890"];
        assert_eq!(overlap_score(&left, &right, 0.8), 0.0);
    }

    #[test]
    fn test_fuzzy_match_counts_once_per_left_value() {
        // "jonathan" is within one edit of both right values
        let left = ["jonathan"];
        let right = ["jonathon", "johnathan"];
        // union has 3 distinct values, one left value matched
        assert!((overlap_score(&left, &right, 0.8) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap() {
        let left = ["red", "green", "blue"];
        let right = ["red", "green", "yellow"];
        // matched: red, green; union: red, green, blue, yellow
        assert_eq!(overlap_score(&left, &right, 0.8), 0.5);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        assert_eq!(overlap_score(&empty, &empty, 0.8), 0.0);
        assert_eq!(overlap_score(&["a"], &empty, 0.8), 0.0);
        assert_eq!(overlap_score(&empty, &["a"], 0.8), 0.0);
    }

    #[test]
    fn test_threshold_controls_matching() {
        let left = ["kitten"];
        let right = ["sitting"];
        assert_eq!(overlap_score(&left, &right, 0.8), 0.0);
        assert_eq!(overlap_score(&left, &right, 0.5), 0.5);
    }
}
