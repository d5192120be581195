//! # colmatch - Column Profiling and Schema Matching
//!
//! colmatch summarizes every column of a CSV or TSV dataset and, given two
//! datasets, ranks the likely correspondences between their columns. Files
//! are ingested with DataFusion; the matching engine itself is synchronous
//! and engine-agnostic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colmatch::prelude::*;
//!
//! # async fn example() -> colmatch::error::Result<()> {
//! let profiler = Profiler::builder().sample_size(SampleSize::Rows(10)).build();
//! let matcher = ColumnMatcher::builder().overlap_threshold(0.85).build()?;
//!
//! let ranked = profiler
//!     .match_paths("customers.csv", "clients.tsv", &matcher)
//!     .await?;
//!
//! for pair in ranked.iter().take(5) {
//!     println!("{:.3}  {} -> {}", pair.score, pair.left.name(), pair.right.name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Profiles
//!
//! A [`profile::ColumnProfile`] records a column's name, its declared type
//! (one of a closed set of canonical types, or unknown), the percentage of
//! missing rows, the percentage of distinct values among non-missing rows,
//! and a few sample values.
//!
//! ## Scoring
//!
//! Each left/right pair is compared on name, type compatibility, uniqueness,
//! fuzzy value overlap, and null ratio. The default composite is
//!
//! ```text
//! 0.30·name + 0.25·type + 0.20·unique + 0.15·overlap + 0.10·null
//! ```
//!
//! Weights are configurable through [`matcher::MatchWeights`]; see
//! [`matcher`] for the individual components.
//!
//! ## Logging
//!
//! The library emits `tracing` events. Binaries install a subscriber with
//! [`logging::setup::init_logging`].

pub mod engine;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod matcher;
pub mod prelude;
pub mod profile;
pub mod profiler;
pub mod security;
