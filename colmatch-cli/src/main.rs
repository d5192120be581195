//! `colmatch` command-line entry point.
//!
//! Results are written to stdout only after the whole operation succeeded;
//! logs and errors go to stderr.

mod cli;

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use colmatch::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ResultFormatter};
use colmatch::logging::setup::init_logging;
use colmatch::matcher::ColumnMatcher;
use colmatch::profiler::Profiler;
use tracing::debug;

use cli::{Cli, Command, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging_config()).context("failed to initialize logging")?;

    let output = run(&cli).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).context("failed to write output")?;
    Ok(())
}

async fn run(cli: &Cli) -> Result<String> {
    let formatter = formatter_for(cli);

    match &cli.command {
        Command::Profile { path, sample_size } => {
            let profiler = Profiler::builder()
                .sample_size(*sample_size)
                .sample_order(cli.sample_order())
                .build();
            let profiles = profiler
                .profile_path(path)
                .await
                .with_context(|| format!("failed to profile {}", path.display()))?;
            debug!(columns = profiles.len(), "Rendering profiles");
            Ok(formatter.format_profiles(&profiles)?)
        }
        Command::Match {
            left,
            right,
            sample_size,
            scoring,
        } => {
            let matcher = ColumnMatcher::builder()
                .scheme(scoring.scoring_scheme())
                .overlap_threshold(scoring.threshold)
                .build()
                .context("invalid scoring options")?;
            let profiler = Profiler::builder()
                .sample_size(*sample_size)
                .sample_order(cli.sample_order())
                .build();
            let ranked = profiler
                .match_paths(left, right, &matcher)
                .await
                .with_context(|| {
                    format!("failed to match {} against {}", left.display(), right.display())
                })?;
            debug!(pairs = ranked.len(), "Rendering matches");
            Ok(formatter.format_matches(&ranked)?)
        }
    }
}

fn formatter_for(cli: &Cli) -> Box<dyn ResultFormatter> {
    let config = FormatterConfig::default()
        .with_max_rows(cli.top)
        .with_colors(io::stdout().is_terminal());
    match cli.format {
        OutputFormat::Json => Box::new(JsonFormatter::with_config(config)),
        OutputFormat::Pretty => Box::new(JsonFormatter::with_config(config).with_pretty(true)),
        OutputFormat::Human => Box::new(HumanFormatter::with_config(config)),
    }
}
