//! Column-name similarity.
//!
//! Exact (case-insensitive) equality scores 1.0 and containment scores 0.8.
//! Otherwise the score is the better of token-set Jaccard similarity and
//! normalized edit-distance similarity of the lower-cased names.

use std::collections::HashSet;

use super::edit::edit_similarity;

/// Score for case-insensitive equality.
pub const EXACT: f64 = 1.0;
/// Score when one name contains the other.
pub const CONTAINS: f64 = 0.8;

/// Scores how likely two column names denote the same attribute.
pub fn name_similarity(left: &str, right: &str) -> f64 {
    let l = left.to_lowercase();
    let r = right.to_lowercase();

    if l == r {
        return EXACT;
    }
    if !l.is_empty() && !r.is_empty() && (l.contains(&r) || r.contains(&l)) {
        return CONTAINS;
    }

    let token_score = jaccard(&tokenize(left), &tokenize(right));
    let edit_score = edit_similarity(&l, &r);
    token_score.max(edit_score)
}

/// Splits a name on `_`, `-`, spaces, and camelCase boundaries, lower-casing
/// every token.
///
/// Runs of capitals are kept together as an acronym, so `HTTPServer` yields
/// `["http", "server"]`.
pub fn tokenize(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for part in name.split(['_', '-', ' ']).filter(|p| !p.is_empty()) {
        let chars: Vec<char> = part.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() && !current.is_empty() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary {
                    tokens.push(current.to_lowercase());
                    current.clear();
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(current.to_lowercase());
        }
    }
    tokens
}

/// Jaccard similarity of two token collections treated as sets.
///
/// Returns 0.0 when both are empty.
pub fn jaccard(left: &[String], right: &[String]) -> f64 {
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = left.intersection(&right).count();
    intersection as f64 / union as f64
}
