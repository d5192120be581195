//! Dataset profiling and the top-level `profile` / `match` operations.
//!
//! A [`Profiler`] resolves an input path, ingests it into a fresh engine
//! session, and folds the engine's raw facts into one [`ColumnProfile`] per
//! column, in schema order. The session is released before the call returns,
//! whether it succeeded or not.
//!
//! # Example
//!
//! ```rust,no_run
//! use colmatch::engine::SampleSize;
//! use colmatch::matcher::ColumnMatcher;
//! use colmatch::profiler::Profiler;
//!
//! # async fn example() -> colmatch::error::Result<()> {
//! let profiler = Profiler::builder().sample_size(SampleSize::Rows(20)).build();
//!
//! let profiles = profiler.profile_path("data/customers.csv").await?;
//! println!("{} columns", profiles.len());
//!
//! let ranked = profiler
//!     .match_paths("data/customers.csv", "data/clients.csv", &ColumnMatcher::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::engine::{
    ColumnPercentages, CsvTable, EngineConfig, InputFile, RawColumn, SampleOrder, SampleSize,
    TableFacts,
};
use crate::error::{ColmatchError, QueryStage, Result};
use crate::logging::truncate_field;
use crate::matcher::{ColumnMatcher, ColumnProfilePairScore};
use crate::profile::ColumnProfile;

const LOGGED_SAMPLE_LEN: usize = 64;

/// Configuration for profiling.
#[derive(Debug, Clone, Default)]
pub struct ProfilerConfig {
    /// How many rows to sample per dataset
    pub sample_size: SampleSize,
    /// Which rows the sample draws
    pub sample_order: SampleOrder,
    /// Ingestion and session settings
    pub engine: EngineConfig,
}

/// Builder for [`Profiler`].
#[derive(Debug, Default)]
pub struct ProfilerBuilder {
    config: ProfilerConfig,
}

impl ProfilerBuilder {
    /// Sets the sample size.
    pub fn sample_size(mut self, size: SampleSize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Sets the sample order.
    pub fn sample_order(mut self, order: SampleOrder) -> Self {
        self.config.sample_order = order;
        self
    }

    /// Sets the engine configuration.
    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn build(self) -> Profiler {
        Profiler {
            config: self.config,
        }
    }
}

/// Builds column profiles from tabular files.
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profiles every column of the file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), sample_size = %self.config.sample_size))]
    pub async fn profile_path(&self, path: impl AsRef<Path>) -> Result<Vec<ColumnProfile>> {
        let input = InputFile::resolve(path)?;
        self.profile_input(&input).await
    }

    async fn profile_input(&self, input: &InputFile) -> Result<Vec<ColumnProfile>> {
        let table = CsvTable::ingest(input, &self.config.engine).await?;
        self.profile_table(&table).await
    }

    /// Profiles an already-ingested relation.
    #[instrument(skip_all, fields(table = %table.description()))]
    pub async fn profile_table(&self, table: &dyn TableFacts) -> Result<Vec<ColumnProfile>> {
        let columns = table.columns().await?;
        debug!(columns = columns.len(), "Introspected schema");

        let percentages = table.percentages(&columns).await?;
        let samples = table
            .sample(&columns, self.config.sample_size, self.config.sample_order)
            .await?;

        let profiles = build_profiles(&columns, &percentages, samples)?;
        for profile in &profiles {
            debug!(
                column = %profile.name(),
                dtype = ?profile.declared_type(),
                null_pct = profile.null_pct(),
                unique_pct = profile.unique_pct(),
                first_sample = %profile.samples().first().map(|s| truncate_field(s, LOGGED_SAMPLE_LEN)).unwrap_or_default(),
                "Built column profile"
            );
        }
        info!(profiles = profiles.len(), "Profiled relation");
        Ok(profiles)
    }

    /// Profiles both files and ranks every column correspondence.
    ///
    /// Both paths are validated before either file is ingested.
    #[instrument(skip_all, fields(left = %left.as_ref().display(), right = %right.as_ref().display()))]
    pub async fn match_paths(
        &self,
        left: impl AsRef<Path>,
        right: impl AsRef<Path>,
        matcher: &ColumnMatcher,
    ) -> Result<Vec<ColumnProfilePairScore>> {
        let left_input = InputFile::resolve(left)?;
        let right_input = InputFile::resolve(right)?;

        let left_profiles = self.profile_input(&left_input).await?;
        let right_profiles = self.profile_input(&right_input).await?;

        Ok(matcher.match_profiles(&left_profiles, &right_profiles))
    }
}

/// Folds raw engine facts into profiles, preserving column order.
///
/// Every slice must carry one entry per column; a length mismatch means the
/// engine answered for a different schema and is reported as a query error
/// of the stage that disagreed.
pub fn build_profiles(
    columns: &[RawColumn],
    percentages: &[ColumnPercentages],
    samples: Vec<Vec<String>>,
) -> Result<Vec<ColumnProfile>> {
    if percentages.len() != columns.len() {
        return Err(ColmatchError::query(
            QueryStage::Aggregate,
            format!(
                "aggregate returned {} columns, schema has {}",
                percentages.len(),
                columns.len()
            ),
        ));
    }
    if samples.len() != columns.len() {
        return Err(ColmatchError::query(
            QueryStage::Sampling,
            format!(
                "sample returned {} columns, schema has {}",
                samples.len(),
                columns.len()
            ),
        ));
    }

    Ok(columns
        .iter()
        .zip(percentages)
        .zip(samples)
        .map(|((column, pct), values)| {
            ColumnProfile::new(column.name.as_str(), &column.type_label)
                .with_percentages(pct.null_pct, pct.unique_pct)
                .with_samples(values)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DeclaredType;
    use async_trait::async_trait;

    struct FakeTable {
        columns: Vec<RawColumn>,
        percentages: Vec<ColumnPercentages>,
        samples: Vec<Vec<String>>,
        fail_stage: Option<QueryStage>,
    }

    impl FakeTable {
        fn two_columns() -> Self {
            Self {
                columns: vec![
                    RawColumn::new("id", "BIGINT"),
                    RawColumn::new("tags", "List(Int64)"),
                ],
                percentages: vec![
                    ColumnPercentages {
                        null_pct: 0.0,
                        unique_pct: Some(100.0),
                    },
                    ColumnPercentages {
                        null_pct: 100.0,
                        unique_pct: None,
                    },
                ],
                samples: vec![vec!["1".into(), "2".into()], vec![]],
                fail_stage: None,
            }
        }

        fn check(&self, stage: QueryStage) -> Result<()> {
            match self.fail_stage {
                Some(failing) if failing == stage => {
                    Err(ColmatchError::query(stage, "simulated failure"))
                }
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl TableFacts for FakeTable {
        async fn columns(&self) -> Result<Vec<RawColumn>> {
            self.check(QueryStage::SchemaIntrospection)?;
            Ok(self.columns.clone())
        }

        async fn percentages(&self, _columns: &[RawColumn]) -> Result<Vec<ColumnPercentages>> {
            self.check(QueryStage::Aggregate)?;
            Ok(self.percentages.clone())
        }

        async fn sample(
            &self,
            _columns: &[RawColumn],
            _size: SampleSize,
            _order: SampleOrder,
        ) -> Result<Vec<Vec<String>>> {
            self.check(QueryStage::Sampling)?;
            Ok(self.samples.clone())
        }

        fn description(&self) -> String {
            "fake".to_string()
        }
    }

    #[tokio::test]
    async fn test_profile_table_preserves_order_and_handles_unknown_types() {
        let profiles = Profiler::default()
            .profile_table(&FakeTable::two_columns())
            .await
            .unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name(), "id");
        assert_eq!(profiles[0].declared_type(), Some(DeclaredType::BigInt));
        assert_eq!(profiles[0].samples(), ["1", "2"]);
        assert_eq!(profiles[1].name(), "tags");
        assert_eq!(profiles[1].declared_type(), None);
        assert_eq!(profiles[1].unique_pct(), 0.0);
        assert_eq!(profiles[1].null_pct(), 100.0);
    }

    #[tokio::test]
    async fn test_profile_table_fails_fast_with_stage() {
        for stage in [
            QueryStage::SchemaIntrospection,
            QueryStage::Aggregate,
            QueryStage::Sampling,
        ] {
            let table = FakeTable {
                fail_stage: Some(stage),
                ..FakeTable::two_columns()
            };
            let err = Profiler::default().profile_table(&table).await.unwrap_err();
            assert_eq!(err.stage(), Some(stage));
        }
    }

    #[test]
    fn test_build_profiles_rejects_length_mismatch() {
        let table = FakeTable::two_columns();
        let err = build_profiles(&table.columns, &table.percentages[..1], table.samples.clone())
            .unwrap_err();
        assert_eq!(err.stage(), Some(QueryStage::Aggregate));

        let err = build_profiles(&table.columns, &table.percentages, vec![vec![]]).unwrap_err();
        assert_eq!(err.stage(), Some(QueryStage::Sampling));
    }

    #[test]
    fn test_build_profiles_empty_schema() {
        assert!(build_profiles(&[], &[], vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_builder() {
        let profiler = Profiler::builder()
            .sample_size(SampleSize::All)
            .sample_order(SampleOrder::FirstRows)
            .engine(EngineConfig::default().with_batch_size(64))
            .build();
        assert_eq!(profiler.config().sample_size, SampleSize::All);
        assert_eq!(profiler.config().sample_order, SampleOrder::FirstRows);
        assert_eq!(profiler.config().engine.batch_size, 64);
    }

    #[tokio::test]
    async fn test_match_paths_validates_both_paths_first() {
        let err = Profiler::default()
            .match_paths("left.parquet", "right.csv", &ColumnMatcher::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ColmatchError::PathValidation { .. }));
    }
}
