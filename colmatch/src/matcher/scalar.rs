//! Closeness of null and uniqueness percentages.

/// Floor for the uniqueness denominator when both ratios are zero.
pub const UNIQUE_EPSILON: f64 = 1e-6;

/// `1 - |left - right| / 100` for two percentages in `[0, 100]`.
pub fn null_similarity(left: f64, right: f64) -> f64 {
    (1.0 - (left - right).abs() / 100.0).clamp(0.0, 1.0)
}

/// `1 - |left - right| / max(left, right, ε)` for two percentages.
pub fn unique_similarity(left: f64, right: f64) -> f64 {
    let denominator = left.max(right).max(UNIQUE_EPSILON);
    (1.0 - (left - right).abs() / denominator).clamp(0.0, 1.0)
}
