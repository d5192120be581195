//! Engine configuration.

/// Configuration for ingesting files into the DataFusion engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Batch size for query execution
    pub batch_size: usize,
    /// Target number of partitions for parallel execution
    pub target_partitions: usize,
    /// Whether the first row holds column names
    pub has_header: bool,
    /// Maximum records read for schema inference
    pub schema_infer_max_records: usize,
    /// Literal field values treated as missing, besides empty fields
    pub missing_value_tokens: Vec<String>,
    /// Whether to pad rows with fewer fields than the first row
    pub pad_ragged_rows: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            target_partitions: std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4),
            has_header: true,
            schema_infer_max_records: 1000,
            missing_value_tokens: vec!["null".to_string(), "''".to_string(), String::new()],
            pad_ragged_rows: true,
        }
    }
}

impl EngineConfig {
    /// Sets the execution batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the target partition count.
    pub fn with_target_partitions(mut self, partitions: usize) -> Self {
        self.target_partitions = partitions;
        self
    }

    /// Sets whether files carry a header row.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets how many records schema inference reads.
    pub fn with_schema_infer_max_records(mut self, records: usize) -> Self {
        self.schema_infer_max_records = records;
        self
    }

    /// Replaces the missing-value tokens.
    pub fn with_missing_value_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_value_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Enables or disables ragged-row padding.
    pub fn with_ragged_row_padding(mut self, enabled: bool) -> Self {
        self.pad_ragged_rows = enabled;
        self
    }

    /// Whether `field` is a non-empty missing-value token. Empty fields are
    /// always read as missing, whatever the configured tokens.
    pub fn is_sentinel(&self, field: &[u8]) -> bool {
        !field.is_empty()
            && self
                .missing_value_tokens
                .iter()
                .any(|token| token.as_bytes() == field)
    }
}
