//! Prelude for commonly used types and traits in colmatch.

pub use crate::engine::{EngineConfig, SampleOrder, SampleSize, TableFacts};
pub use crate::error::{ColmatchError, QueryStage, Result};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ResultFormatter};
pub use crate::matcher::{
    ColumnMatcher, ColumnProfilePairScore, MatchWeights, MatcherConfig, ScoringScheme,
};
pub use crate::profile::{ColumnProfile, DeclaredType};
pub use crate::profiler::{Profiler, ProfilerConfig};
