use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use prereq::AuditReport;
use tracing::instrument;

use super::terminal::{Tone, paint, row};

#[derive(Debug, Parser)]
#[command(about = "Audit extracted output for structural problems")]
pub struct Audit {
    /// Extracted JSON Lines output
    file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Audit {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let file = File::open(&self.file)
            .with_context(|| format!("failed to open {}", self.file.display()))?;
        let report = prereq::audit::audit_reader(BufReader::new(file))
            .with_context(|| format!("failed to read {}", self.file.display()))?;

        match self.output {
            OutputFormat::Table => Self::output_table(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        if !report.is_clean() {
            std::process::exit(2);
        }
        Ok(())
    }

    fn output_table(report: &AuditReport) {
        println!("{}", row("rows", report.rows, Tone::Info));
        println!("{}", row("trees present", report.trees_present, Tone::Muted));
        println!("{}", row("trees valid", report.trees_valid, Tone::Muted));
        println!(
            "{}",
            row("rows with exclusions", report.rows_with_exclusions, Tone::Muted)
        );

        let invalid = report.trees_present - report.trees_valid;
        for (label, count) in [
            ("malformed rows", report.malformed_rows),
            ("undecodable trees", invalid),
            ("trees with self-reference", report.self_references),
            ("OR min > children", report.or_min_violations),
            ("empty groups", report.empty_groups),
        ] {
            println!("{}", row(label, count, Tone::for_problems(count)));
        }

        if report.is_clean() {
            println!("\n{}", paint("No structural problems found", Tone::Good));
        }
    }
}
