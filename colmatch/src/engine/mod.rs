//! The tabular engine that supplies raw per-column facts.
//!
//! Profiling only needs three things from an engine, captured by
//! [`TableFacts`]: the ordered schema, a batched null/unique aggregate, and a
//! row sample. [`CsvTable`] implements them on top of DataFusion by ingesting
//! a CSV or TSV file into an ephemeral relation.
//!
//! ```rust,no_run
//! use colmatch::engine::{CsvTable, EngineConfig, InputFile, TableFacts};
//!
//! # async fn example() -> colmatch::error::Result<()> {
//! let input = InputFile::resolve("data/customers.csv")?;
//! let table = CsvTable::ingest(&input, &EngineConfig::default()).await?;
//! let columns = table.columns().await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{ColmatchError, Result};

mod arrow_types;
mod config;
mod input;
mod queries;
mod table;

pub use arrow_types::arrow_type_label;
pub use config::EngineConfig;
pub use input::{InputFile, TabularFormat};
pub use table::CsvTable;

/// Name and engine type label of one column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub type_label: String,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, type_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
        }
    }
}

/// Missing and distinct percentages of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPercentages {
    /// Percentage of all rows that are missing
    pub null_pct: f64,
    /// Percentage of distinct values among non-missing rows; `None` when
    /// every row is missing
    pub unique_pct: Option<f64>,
}

/// How many rows to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    /// Up to this many rows; fewer when the relation is smaller.
    Rows(usize),
    /// Every row.
    All,
}

impl Default for SampleSize {
    fn default() -> Self {
        Self::Rows(5)
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows(n) => write!(f, "{n}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for SampleSize {
    type Err = ColmatchError;

    /// Parses a non-negative row count or the word `all`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse::<usize>().map(Self::Rows).map_err(|_| {
            ColmatchError::configuration(format!(
                "sample size must be a non-negative integer or 'all', got '{s}'"
            ))
        })
    }
}

/// Which rows a sample draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrder {
    /// Uniformly random rows.
    #[default]
    Random,
    /// The first rows in scan order; reproducible across runs.
    FirstRows,
}

/// Raw facts about an ingested relation.
///
/// Every method returns one entry per column, in the order reported by
/// [`TableFacts::columns`].
#[async_trait]
pub trait TableFacts: Send + Sync {
    /// Schema introspection: column names and type labels in column order.
    async fn columns(&self) -> Result<Vec<RawColumn>>;

    /// Null and unique percentages for every column, in one batched request.
    async fn percentages(&self, columns: &[RawColumn]) -> Result<Vec<ColumnPercentages>>;

    /// Stringified non-missing values of sampled rows, one list per column.
    async fn sample(
        &self,
        columns: &[RawColumn],
        size: SampleSize,
        order: SampleOrder,
    ) -> Result<Vec<Vec<String>>>;

    /// Human-readable description for logs.
    fn description(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_parsing() {
        assert_eq!("5".parse::<SampleSize>().unwrap(), SampleSize::Rows(5));
        assert_eq!("0".parse::<SampleSize>().unwrap(), SampleSize::Rows(0));
        assert_eq!("ALL".parse::<SampleSize>().unwrap(), SampleSize::All);
        assert_eq!(" all ".parse::<SampleSize>().unwrap(), SampleSize::All);
        assert!("-1".parse::<SampleSize>().is_err());
        assert!("five".parse::<SampleSize>().is_err());
    }

    #[test]
    fn test_sample_size_display_and_default() {
        assert_eq!(SampleSize::default(), SampleSize::Rows(5));
        assert_eq!(SampleSize::Rows(1000).to_string(), "1000");
        assert_eq!(SampleSize::All.to_string(), "all");
    }
}
