//! Multi-factor column matching.
//!
//! A pair of columns is compared on five independent axes, each scored in
//! `[0, 1]`:
//!
//! | Component | Function |
//! |-----------|----------|
//! | name      | [`name_similarity`] |
//! | type      | [`type_score`] |
//! | unique    | [`unique_similarity`] |
//! | overlap   | [`overlap_score`] |
//! | null      | [`null_similarity`] |
//!
//! [`ColumnMatcher`] combines them under a [`ScoringScheme`] and ranks the
//! cross product of two profile collections.
//!
//! # Example
//!
//! ```rust
//! use colmatch::matcher::ColumnMatcher;
//! use colmatch::profile::ColumnProfile;
//!
//! let left = vec![ColumnProfile::new("customer_id", "INTEGER").with_percentages(0.0, Some(100.0))];
//! let right = vec![
//!     ColumnProfile::new("cust_id", "INTEGER").with_percentages(0.0, Some(98.0)),
//!     ColumnProfile::new("address", "VARCHAR").with_percentages(5.0, Some(80.0)),
//! ];
//!
//! let ranked = ColumnMatcher::default().match_profiles(&left, &right);
//! assert_eq!(ranked[0].right.name(), "cust_id");
//! ```

mod edit;
mod name;
mod overlap;
mod pairwise;
mod scalar;
mod type_score;

pub use edit::edit_similarity;
pub use name::{jaccard, name_similarity, tokenize};
pub use overlap::{overlap_score, DEFAULT_OVERLAP_THRESHOLD};
pub use pairwise::{
    ColumnMatcher, ColumnMatcherBuilder, ColumnProfilePairScore, MatchWeights, MatcherConfig,
    ScoreComponents, ScoringScheme,
};
pub use scalar::{null_similarity, unique_similarity, UNIQUE_EPSILON};
pub use type_score::type_score;
