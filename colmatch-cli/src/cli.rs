//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colmatch::engine::{SampleOrder, SampleSize};
use colmatch::logging::setup::LoggingConfig;
use colmatch::matcher::{MatchWeights, ScoringScheme, DEFAULT_OVERLAP_THRESHOLD};

/// Profile tabular datasets and rank column correspondences between them.
#[derive(Parser, Debug)]
#[command(name = "colmatch", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Render only the first N entries
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Sample the first rows instead of random rows
    #[arg(long, global = true)]
    pub first_rows: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only warnings and errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Profile every column of a CSV or TSV file
    Profile {
        /// Path to a .csv or .tsv file
        path: PathBuf,

        /// Rows to sample: a count or `all`
        #[arg(default_value_t = SampleSize::default())]
        sample_size: SampleSize,
    },

    /// Rank column correspondences between two files
    Match {
        /// Left-hand .csv or .tsv file
        left: PathBuf,

        /// Right-hand .csv or .tsv file
        right: PathBuf,

        /// Rows to sample from each file: a count or `all`
        #[arg(default_value_t = SampleSize::default())]
        sample_size: SampleSize,

        #[command(flatten)]
        scoring: ScoringArgs,
    },
}

/// Scoring options for `match`.
#[derive(Args, Debug)]
pub struct ScoringArgs {
    /// Edit similarity at which two sample values count as overlapping
    #[arg(long, default_value_t = DEFAULT_OVERLAP_THRESHOLD)]
    pub threshold: f64,

    /// Scoring scheme
    #[arg(long, value_enum, default_value_t = SchemeArg::Weighted)]
    pub scheme: SchemeArg,

    /// Weights for name,type,unique,overlap,null (must sum to 1)
    #[arg(long, value_delimiter = ',', num_args = 5, conflicts_with = "scheme")]
    pub weights: Option<Vec<f64>>,
}

impl ScoringArgs {
    pub fn scoring_scheme(&self) -> ScoringScheme {
        match (&self.weights, self.scheme) {
            (Some(w), _) => ScoringScheme::Weighted(MatchWeights {
                name: w[0],
                dtype: w[1],
                unique: w[2],
                overlap: w[3],
                null: w[4],
            }),
            (None, SchemeArg::Weighted) => ScoringScheme::default(),
            (None, SchemeArg::TypeNull) => ScoringScheme::TypeNullProduct,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON array
    Json,
    /// Indented JSON array
    Pretty,
    /// Aligned text table
    Human,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeArg {
    /// Five-factor weighted sum
    Weighted,
    /// Type score times null similarity
    TypeNull,
}

impl Cli {
    pub fn sample_order(&self) -> SampleOrder {
        if self.first_rows {
            SampleOrder::FirstRows
        } else {
            SampleOrder::Random
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        let config = if self.verbose {
            LoggingConfig::verbose()
        } else if self.quiet {
            LoggingConfig::quiet()
        } else {
            LoggingConfig::default()
        };
        config.with_json_format(self.json_logs)
    }
}
