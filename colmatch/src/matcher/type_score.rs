//! Type compatibility classification.

use crate::profile::{DeclaredType, TypeFamily};

/// Score for identical declared types.
pub const IDENTICAL: f64 = 1.0;
/// Score for distinct types within one family.
pub const SAME_FAMILY: f64 = 0.8;
/// Score for text paired with numeric or temporal types.
pub const LOSSY_CAST: f64 = 0.3;
/// Score for everything else, including unknown types.
pub const INCOMPATIBLE: f64 = 0.0;

/// Scores how interchangeable two declared types are.
///
/// Symmetric. An unknown type on either side always scores
/// [`INCOMPATIBLE`], even against another unknown type.
pub fn type_score(left: Option<DeclaredType>, right: Option<DeclaredType>) -> f64 {
    let (Some(left), Some(right)) = (left, right) else {
        return INCOMPATIBLE;
    };

    if left == right {
        return IDENTICAL;
    }

    match (left.family(), right.family()) {
        (Some(a), Some(b)) if a == b => SAME_FAMILY,
        (Some(a), Some(b)) if is_lossy_cast(a, b) => LOSSY_CAST,
        _ => INCOMPATIBLE,
    }
}

fn is_lossy_cast(a: TypeFamily, b: TypeFamily) -> bool {
    use TypeFamily::{Numeric, Temporal, Text};
    matches!(
        (a, b),
        (Text, Numeric) | (Numeric, Text) | (Text, Temporal) | (Temporal, Text)
    )
}
