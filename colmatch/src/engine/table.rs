//! DataFusion-backed CSV/TSV relation.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use ::csv::ByteRecord;
use async_trait::async_trait;
use datafusion::execution::context::{SessionConfig, SessionContext};
use datafusion::prelude::CsvReadOptions;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use super::{
    arrow_type_label, queries, ColumnPercentages, EngineConfig, InputFile, RawColumn, SampleOrder,
    SampleSize, TableFacts, TabularFormat,
};
use crate::error::{ColmatchError, QueryStage, Result, StageContext};
use crate::security::SqlSecurity;

static RELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

const STEM_FRAGMENT_LEN: usize = 48;

/// A CSV or TSV file ingested into its own DataFusion session.
///
/// The relation is deregistered when the table is dropped. When the file
/// needed rewriting before ingestion (missing-value tokens, short rows, or
/// duplicate header names), the rewritten copy lives in a temporary file
/// owned by the table and is removed with it.
pub struct CsvTable {
    ctx: SessionContext,
    relation: String,
    source: PathBuf,
    _rewritten: Option<NamedTempFile>,
}

impl std::fmt::Debug for CsvTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvTable")
            .field("relation", &self.relation)
            .field("source", &self.source)
            .field("rewritten", &self._rewritten.is_some())
            .finish()
    }
}

impl CsvTable {
    /// Ingests `input` into a fresh session under a unique relation name.
    ///
    /// Every column is decoded once before this returns, so values the
    /// engine cannot parse surface as [`ColmatchError::Ingestion`]. Blank
    /// lines are skipped and do not count as rows.
    #[instrument(skip(config), fields(path = %input.path().display()))]
    pub async fn ingest(input: &InputFile, config: &EngineConfig) -> Result<Self> {
        let session_config = SessionConfig::new()
            .with_batch_size(config.batch_size)
            .with_target_partitions(config.target_partitions.max(1));
        let ctx = SessionContext::new_with_config(session_config);

        let relation = format!(
            "colmatch_{}_{}",
            SqlSecurity::sanitize_fragment(input.stem(), STEM_FRAGMENT_LEN),
            RELATION_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        SqlSecurity::validate_relation_name(&relation)?;

        let rewritten = {
            let path = input.path().to_path_buf();
            let format = input.format();
            let config = config.clone();
            tokio::task::spawn_blocking(move || rewrite_for_ingestion(&path, format, &config))
                .await
                .map_err(|e| ColmatchError::ingestion(input.path(), e))??
        };

        let read_path = rewritten
            .as_ref()
            .map_or_else(|| input.path(), |file| file.path());
        let read_path_str = read_path
            .to_str()
            .ok_or_else(|| ColmatchError::path_validation(read_path, "path is not valid UTF-8"))?;
        let extension = read_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_else(|| input.format().extension().to_string());

        let options = CsvReadOptions::new()
            .has_header(config.has_header)
            .delimiter(input.format().delimiter())
            .schema_infer_max_records(config.schema_infer_max_records)
            .file_extension(&extension);

        ctx.register_csv(relation.as_str(), read_path_str, options)
            .await
            .map_err(|e| ColmatchError::ingestion(input.path(), e))?;

        let table = Self {
            ctx,
            relation,
            source: input.path().to_path_buf(),
            _rewritten: rewritten,
        };
        table.decode_all().await?;

        info!(
            relation = %table.relation,
            format = ?input.format(),
            rewritten = table.was_rewritten(),
            "Ingested tabular file"
        );
        Ok(table)
    }

    /// Decodes every column once. DataFusion parses CSV lazily, so without
    /// this a malformed value would first fail inside a profiling query.
    async fn decode_all(&self) -> Result<()> {
        let columns = self
            .columns()
            .await
            .map_err(|e| ColmatchError::ingestion(&self.source, e))?;
        if columns.is_empty() {
            return Ok(());
        }
        let sql = queries::decode_check_sql(&self.relation, &columns);
        debug!(sql = %sql, "Decoding relation");
        self.ctx
            .sql(&sql)
            .await
            .map_err(|e| ColmatchError::ingestion(&self.source, e))?
            .collect()
            .await
            .map_err(|e| ColmatchError::ingestion(&self.source, e))?;
        Ok(())
    }

    /// Name of the registered relation.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// The file this table was ingested from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether the file was rewritten into a temporary copy before ingestion.
    pub fn was_rewritten(&self) -> bool {
        self._rewritten.is_some()
    }
}

impl Drop for CsvTable {
    fn drop(&mut self) {
        match self.ctx.deregister_table(self.relation.as_str()) {
            Ok(_) => debug!(relation = %self.relation, "Deregistered relation"),
            Err(e) => warn!(relation = %self.relation, error = %e, "Failed to deregister relation"),
        }
    }
}

#[async_trait]
impl TableFacts for CsvTable {
    async fn columns(&self) -> Result<Vec<RawColumn>> {
        let df = self
            .ctx
            .table(self.relation.as_str())
            .await
            .at_stage(QueryStage::SchemaIntrospection)?;
        Ok(df
            .schema()
            .fields()
            .iter()
            .map(|field| RawColumn::new(field.name(), arrow_type_label(field.data_type())))
            .collect())
    }

    async fn percentages(&self, columns: &[RawColumn]) -> Result<Vec<ColumnPercentages>> {
        if columns.is_empty() {
            return Ok(Vec::new());
        }
        let sql = queries::aggregate_sql(&self.relation, columns);
        debug!(sql = %sql, "Running aggregate query");
        let batches = self
            .ctx
            .sql(&sql)
            .await
            .at_stage(QueryStage::Aggregate)?
            .collect()
            .await
            .at_stage(QueryStage::Aggregate)?;
        queries::extract_percentages(&batches, columns.len())
    }

    async fn sample(
        &self,
        columns: &[RawColumn],
        size: SampleSize,
        order: SampleOrder,
    ) -> Result<Vec<Vec<String>>> {
        if columns.is_empty() || size == SampleSize::Rows(0) {
            return Ok(vec![Vec::new(); columns.len()]);
        }
        let sql = queries::sample_sql(&self.relation, columns, size, order);
        debug!(sql = %sql, "Running sample query");
        let batches = self
            .ctx
            .sql(&sql)
            .await
            .at_stage(QueryStage::Sampling)?
            .collect()
            .await
            .at_stage(QueryStage::Sampling)?;
        queries::extract_samples(&batches, columns.len())
    }

    fn description(&self) -> String {
        format!("{} ({})", self.source.display(), self.relation)
    }
}

/// What a scan of the raw file found that the engine cannot read as is.
#[derive(Debug, Default)]
struct ScanReport {
    width: usize,
    renamed_header: Option<ByteRecord>,
    short_rows: usize,
    missing_tokens: usize,
}

impl ScanReport {
    fn needs_rewrite(&self) -> bool {
        self.renamed_header.is_some() || self.short_rows > 0 || self.missing_tokens > 0
    }
}

/// Writes a normalized copy of `path` when the engine could not read it
/// directly, or returns `None` when the file can be ingested untouched.
///
/// The copy blanks non-empty missing-value tokens in data rows, pads rows
/// shorter than the first row with empty fields, and renames repeated header
/// names to `name_1`, `name_2`, and so on.
fn rewrite_for_ingestion(
    path: &Path,
    format: TabularFormat,
    config: &EngineConfig,
) -> Result<Option<NamedTempFile>> {
    let open = || {
        ::csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(format.delimiter())
            .from_path(path)
            .map_err(|e| ColmatchError::ingestion(path, e))
    };

    let report = scan_records(&mut open()?, path, config)?;
    if !report.needs_rewrite() {
        return Ok(None);
    }

    let rewritten = tempfile::Builder::new()
        .prefix("colmatch-")
        .suffix(format.extension())
        .tempfile()?;
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .flexible(true)
        .from_writer(rewritten.as_file());

    let mut reader = open()?;
    for (index, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| ColmatchError::ingestion(path, e))?;
        let row = match (&report.renamed_header, index == 0 && config.has_header) {
            (_, false) => normalize_row(&record, report.width, config),
            (Some(header), true) => header.clone(),
            (None, true) => record,
        };
        writer
            .write_byte_record(&row)
            .map_err(|e| ColmatchError::ingestion(path, e))?;
    }
    writer.flush()?;
    drop(writer);

    debug!(
        path = %path.display(),
        short_rows = report.short_rows,
        missing_tokens = report.missing_tokens,
        renamed_header = report.renamed_header.is_some(),
        "Rewrote file into temporary copy"
    );
    Ok(Some(rewritten))
}

fn scan_records(
    reader: &mut ::csv::Reader<File>,
    path: &Path,
    config: &EngineConfig,
) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|e| ColmatchError::ingestion(path, e))?;
        if index == 0 {
            report.width = record.len();
            if config.has_header {
                report.renamed_header = deduplicate_header(&record);
                continue;
            }
        }
        if config.pad_ragged_rows && record.len() < report.width {
            report.short_rows += 1;
        }
        report.missing_tokens += record.iter().filter(|f| config.is_sentinel(f)).count();
    }
    Ok(report)
}

fn normalize_row(record: &ByteRecord, width: usize, config: &EngineConfig) -> ByteRecord {
    let mut row: ByteRecord = record
        .iter()
        .map(|field| if config.is_sentinel(field) { &b""[..] } else { field })
        .collect();
    if config.pad_ragged_rows {
        while row.len() < width {
            row.push_field(b"");
        }
    }
    row
}

/// Renames repeated header names, or returns `None` when all are distinct.
fn deduplicate_header(header: &ByteRecord) -> Option<ByteRecord> {
    let originals: HashSet<&[u8]> = header.iter().collect();
    if originals.len() == header.len() {
        return None;
    }

    let mut taken: HashSet<Vec<u8>> = HashSet::new();
    let mut renamed = ByteRecord::new();
    for name in header.iter() {
        if taken.insert(name.to_vec()) {
            renamed.push_field(name);
            continue;
        }
        let mut suffix = 1usize;
        let candidate = loop {
            let mut candidate = name.to_vec();
            candidate.extend_from_slice(format!("_{suffix}").as_bytes());
            if !originals.contains(candidate.as_slice()) && !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        renamed.push_field(&candidate);
        taken.insert(candidate);
    }
    Some(renamed)
}
