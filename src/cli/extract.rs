use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;

use super::terminal::{Tone, paint, row};

#[derive(Debug, Parser)]
pub struct Extract {
    /// JSON Lines catalog export, one object per course row
    input: PathBuf,

    /// Where to write the extracted records
    ///
    /// Defaults to `extracted_prereqs.jsonl` next to the input.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Field-resolution policy (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress the progress bar and summary
    #[arg(long, short)]
    quiet: bool,
}

impl Extract {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        if !self.input.exists() {
            anyhow::bail!("Input file not found: {}", self.input.display());
        }
        let config = super::load_config(self.config.as_deref())?;
        let output = self.output.unwrap_or_else(|| {
            self.input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join("extracted_prereqs.jsonl")
        });

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        progress.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} rows ({elapsed})")
                .context("invalid progress template")?,
        );

        let summary = prereq::ingest::extract_file(
            &self.input,
            &output,
            &config,
            |total| progress.set_length(u64::try_from(total).unwrap_or(u64::MAX)),
            || progress.inc(1),
        )?;
        progress.finish_and_clear();

        if !self.quiet {
            let wrote = format!(
                "Wrote {} records to {}",
                summary.records_written,
                output.display()
            );
            println!("{}", paint(&wrote, Tone::Good));
            println!("{}", row("  trees", summary.trees, Tone::Muted));
            println!(
                "{}",
                row("  exclusion groups", summary.exclusion_groups, Tone::Muted)
            );
            if summary.rows_skipped > 0 {
                println!(
                    "{}",
                    row("  rows without a course", summary.rows_skipped, Tone::Warn)
                );
            }
        }

        Ok(())
    }
}
