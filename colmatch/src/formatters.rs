//! Output formatting for profiles and ranked matches.
//!
//! JSON output is the machine contract: `profile` renders an array of
//! profile objects and `match` renders an array of pair score objects.
//! [`HumanFormatter`] renders the same data as aligned text tables.
//!
//! # Examples
//!
//! ```rust
//! use colmatch::formatters::{JsonFormatter, ResultFormatter};
//! use colmatch::profile::ColumnProfile;
//!
//! let profiles = vec![ColumnProfile::new("id", "BIGINT").with_percentages(0.0, Some(100.0))];
//! let json = JsonFormatter::new().format_profiles(&profiles).unwrap();
//! assert!(json.starts_with('['));
//! ```

use std::fmt::{self, Write};

use crate::error::{ColmatchError, Result};
use crate::logging::truncate_field;
use crate::matcher::ColumnProfilePairScore;
use crate::profile::ColumnProfile;

/// Configuration options for formatting results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Maximum number of rows to render (`None` for all)
    pub max_rows: Option<usize>,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
    /// Maximum rendered width of a sample value (human formatter only)
    pub max_sample_width: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_rows: None,
            use_colors: false,
            max_sample_width: 24,
        }
    }
}

impl FormatterConfig {
    /// Limits output to the first `max` rows.
    pub fn with_max_rows(mut self, max: Option<usize>) -> Self {
        self.max_rows = max;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn limit<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.max_rows {
            Some(max) if max < items.len() => &items[..max],
            _ => items,
        }
    }
}

/// Renders profiles and ranked matches into a string.
pub trait ResultFormatter {
    /// Formats the profiles of one dataset.
    fn format_profiles(&self, profiles: &[ColumnProfile]) -> Result<String>;

    /// Formats a ranked list of pair scores.
    fn format_matches(&self, matches: &[ColumnProfilePairScore]) -> Result<String>;
}

/// Formats results as JSON arrays.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact JSON formatter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn encode<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        Ok(encoded?)
    }
}

impl ResultFormatter for JsonFormatter {
    fn format_profiles(&self, profiles: &[ColumnProfile]) -> Result<String> {
        self.encode(self.config.limit(profiles))
    }

    fn format_matches(&self, matches: &[ColumnProfilePairScore]) -> Result<String> {
        self.encode(self.config.limit(matches))
    }
}

/// Formats results as text tables for a terminal.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn score_cell(&self, score: f64) -> String {
        let text = format!("{score:.3}");
        if !self.config.use_colors {
            return text;
        }
        let color = if score >= 0.7 {
            "32"
        } else if score >= 0.4 {
            "33"
        } else {
            "90"
        };
        format!("\x1b[{color}m{text}\x1b[0m")
    }

    fn write_profiles(&self, out: &mut String, profiles: &[ColumnProfile]) -> fmt::Result {
        let shown = self.config.limit(profiles);
        let width = name_width(shown.iter().map(|p| p.name()), "Column");

        writeln!(
            out,
            "{:<width$}  {:<12}  {:>7}  {:>8}  Samples",
            "Column", "Type", "Null %", "Unique %"
        )?;
        for profile in shown {
            let dtype = profile
                .declared_type()
                .map_or("?", |t| t.label());
            let samples: Vec<String> = profile
                .samples()
                .iter()
                .map(|s| truncate_field(s, self.config.max_sample_width))
                .collect();
            writeln!(
                out,
                "{:<width$}  {:<12}  {:>7.2}  {:>8.2}  {}",
                profile.name(),
                dtype,
                profile.null_pct(),
                profile.unique_pct(),
                samples.join(", ")
            )?;
        }
        write_footer(out, shown.len(), profiles.len(), "columns")
    }

    fn write_matches(&self, out: &mut String, matches: &[ColumnProfilePairScore]) -> fmt::Result {
        let shown = self.config.limit(matches);
        let left_width = name_width(shown.iter().map(|m| m.left.name()), "Left");
        let right_width = name_width(shown.iter().map(|m| m.right.name()), "Right");

        writeln!(
            out,
            "{:>4}  {:<5}  {:<left_width$}  {:<right_width$}  {:>5}  {:>5}  {:>6}  {:>7}  {:>5}",
            "Rank", "Score", "Left", "Right", "Name", "Type", "Unique", "Overlap", "Null"
        )?;
        for (rank, m) in shown.iter().enumerate() {
            let c = &m.components;
            writeln!(
                out,
                "{:>4}  {}  {:<left_width$}  {:<right_width$}  {:>5.3}  {:>5.3}  {:>6.3}  {:>7.3}  {:>5.3}",
                rank + 1,
                self.score_cell(m.score),
                m.left.name(),
                m.right.name(),
                c.name,
                c.dtype,
                c.unique,
                c.overlap,
                c.null
            )?;
        }
        write_footer(out, shown.len(), matches.len(), "pairs")
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names
        .map(|n| n.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

fn write_footer(out: &mut String, shown: usize, total: usize, noun: &str) -> fmt::Result {
    if shown < total {
        writeln!(out, "({shown} of {total} {noun} shown)")
    } else {
        writeln!(out, "({total} {noun})")
    }
}

fn render_error(e: fmt::Error) -> ColmatchError {
    ColmatchError::Encoding(format!("failed to render table: {e}"))
}

impl ResultFormatter for HumanFormatter {
    fn format_profiles(&self, profiles: &[ColumnProfile]) -> Result<String> {
        let mut out = String::new();
        self.write_profiles(&mut out, profiles).map_err(render_error)?;
        Ok(out)
    }

    fn format_matches(&self, matches: &[ColumnProfilePairScore]) -> Result<String> {
        let mut out = String::new();
        self.write_matches(&mut out, matches).map_err(render_error)?;
        Ok(out)
    }
}
