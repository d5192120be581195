//! Normalized edit-distance similarity.

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, measured in characters.
///
/// Two empty strings are identical and score `1.0`.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(edit_similarity("kitten", "kitten"), 1.0);
        assert_eq!(edit_similarity("", ""), 1.0);
    }

    #[test]
    fn test_partial_similarity() {
        // kitten -> sitting is three edits over seven characters
        assert!((edit_similarity("kitten", "sitting") - 4.0 / 7.0).abs() < 1e-12);
        assert_eq!(edit_similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!((edit_similarity("café", "cafe") - 0.75).abs() < 1e-12);
    }
}
