//! Error types for the colmatch library.
//!
//! Every stage of profiling and matching fails fast. Errors carry enough
//! context (the offending path, or the query stage that failed) to be
//! reported directly to a user; there is no partial result.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The query stage a [`ColmatchError::Query`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    /// Reading column names and types of the ingested relation.
    SchemaIntrospection,
    /// The batched null/unique percentage aggregate.
    Aggregate,
    /// Drawing sample rows.
    Sampling,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SchemaIntrospection => "schema introspection",
            Self::Aggregate => "aggregate",
            Self::Sampling => "sampling",
        };
        f.write_str(name)
    }
}

/// The main error type for the colmatch library.
#[derive(Error, Debug)]
pub enum ColmatchError {
    /// The input path could not be resolved or has an unrecognized extension.
    #[error("Invalid input path '{}': {reason}", path.display())]
    PathValidation {
        /// The path as given (or as resolved, when resolution succeeded)
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// The tabular engine could not ingest the file.
    #[error("Failed to ingest '{}': {source}", path.display())]
    Ingestion {
        /// The file being ingested
        path: PathBuf,
        /// Underlying engine or reader error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A query against the ingested relation failed.
    #[error("{stage} query failed: {source}")]
    Query {
        /// Which profiling stage issued the query
        stage: QueryStage,
        /// Underlying engine error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A result could not be encoded for output.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid matcher, profiler, or engine configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, ColmatchError>`.
pub type Result<T> = std::result::Result<T, ColmatchError>;

impl ColmatchError {
    /// Creates a path validation error.
    pub fn path_validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathValidation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an ingestion error wrapping the underlying cause.
    pub fn ingestion(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Ingestion {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates a query error for the given stage.
    pub fn query(
        stage: QueryStage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Query {
            stage,
            source: source.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns the query stage for [`ColmatchError::Query`] errors.
    pub fn stage(&self) -> Option<QueryStage> {
        match self {
            Self::Query { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ColmatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Extension trait for attaching a [`QueryStage`] to engine results.
pub trait StageContext<T> {
    /// Maps the error into a [`ColmatchError::Query`] for `stage`.
    fn at_stage(self, stage: QueryStage) -> Result<T>;
}

impl<T, E> StageContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn at_stage(self, stage: QueryStage) -> Result<T> {
        self.map_err(|e| ColmatchError::query(stage, e))
    }
}
