//! Row-oriented ingestion of catalog exports.
//!
//! Rows arrive as JSON Lines, one object per catalog row. For each row the
//! configured field-resolution policy picks the course identifier and the
//! requisite prose, which are then handed to the compiler. Rows are
//! independent, so batches are compiled in parallel.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use tracing::instrument;

mod row;
pub use row::Row;

use crate::{
    compiler::{self, cues},
    domain::{CompiledRecord, Config},
};

/// A compiled record together with the raw fields it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRow {
    /// The compiled record.
    #[serde(flatten)]
    pub record: CompiledRecord,
    /// The raw value of the course column.
    pub course_field_raw: String,
    /// The raw credit value, if the row has one.
    pub credit_value: Option<String>,
    /// The requisite text the record was compiled from.
    pub source_text: String,
}

/// Counts gathered over one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Rows read from the input.
    pub rows_read: usize,
    /// Rows skipped because no course identifier could be resolved.
    pub rows_skipped: usize,
    /// Records written to the output.
    pub records_written: usize,
    /// Records with a requirement tree.
    pub trees: usize,
    /// Credit-exclusion groups across all records.
    pub exclusion_groups: usize,
}

/// Errors that can occur while reading or writing extraction files.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The input path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A line of the input is not a JSON object.
    #[error("line {line}: malformed row: {source}")]
    Row {
        /// One-based line number.
        line: usize,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The output could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// Picks the requisite text out of a row's candidate fields.
///
/// Candidates are stripped of markup. The first one that mentions a
/// prerequisite or corequisite wins; otherwise the first non-empty one.
#[must_use]
pub fn select_text(candidates: &[&str]) -> String {
    let cleaned: Vec<String> = candidates
        .iter()
        .map(|text| compiler::normalize(text))
        .filter(|text| !text.is_empty())
        .collect();

    let picked = cleaned
        .iter()
        .position(|text| cues::mentions_prerequisite(text) || cues::mentions_corequisite(text))
        .unwrap_or(0);

    cleaned.into_iter().nth(picked).unwrap_or_default()
}

/// Compiles one catalog row.
///
/// Returns `None` if the row has no resolvable course identifier.
#[must_use]
pub fn extract_row(row: &Row, config: &Config) -> Option<ExtractedRow> {
    let course = row.course_id(config)?;
    let text = select_text(&row.candidate_texts(config));
    let record = compiler::compile(&course, &text);

    Some(ExtractedRow {
        record,
        course_field_raw: row.course_field(config).unwrap_or_default().to_string(),
        credit_value: row.credit_value(config).map(ToString::to_string),
        source_text: text,
    })
}

/// Compiles a batch of rows in parallel.
///
/// Output order matches input order; rows without a course are dropped.
/// `on_row` is called once per input row, from any thread.
#[must_use]
pub fn extract_rows<F>(rows: &[Row], config: &Config, on_row: F) -> Vec<ExtractedRow>
where
    F: Fn() + Sync,
{
    let extracted: Vec<Option<ExtractedRow>> = rows
        .par_iter()
        .map(|row| {
            let out = extract_row(row, config);
            on_row();
            out
        })
        .collect();

    extracted.into_iter().flatten().collect()
}

/// Reads JSON Lines rows. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if a line cannot be read or is not a JSON object.
pub fn read_rows<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Row>, IngestError> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line).map_err(|source| IngestError::Row {
            line: i + 1,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Writes extracted rows as JSON Lines.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_rows<W: Write>(mut writer: W, rows: &[ExtractedRow]) -> io::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Tallies a batch of extracted rows.
#[must_use]
pub fn summarize(rows_read: usize, extracted: &[ExtractedRow]) -> Summary {
    Summary {
        rows_read,
        rows_skipped: rows_read - extracted.len(),
        records_written: extracted.len(),
        trees: extracted.iter().filter(|row| row.record.tree.is_some()).count(),
        exclusion_groups: extracted.iter().map(|row| row.record.exclusions.len()).sum(),
    }
}

/// Extracts every row of `input` into `output`.
///
/// `on_row` is called once per input row, for progress reporting; it is
/// handed the total row count once before compilation starts.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if the output
/// cannot be written.
#[instrument(level = "info", skip(config, on_start, on_row))]
pub fn extract_file<S, F>(
    input: &Path,
    output: &Path,
    config: &Config,
    on_start: S,
    on_row: F,
) -> Result<Summary, IngestError>
where
    S: FnOnce(usize),
    F: Fn() + Sync,
{
    let file = File::open(input).map_err(|source| IngestError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let rows = read_rows(BufReader::new(file), input)?;
    on_start(rows.len());

    let extracted = extract_rows(&rows, config, on_row);
    let summary = summarize(rows.len(), &extracted);
    if summary.rows_skipped > 0 {
        tracing::warn!(
            skipped = summary.rows_skipped,
            "rows without a course identifier were skipped"
        );
    }

    let write_error = |source| IngestError::Write {
        path: output.to_path_buf(),
        source,
    };
    let out = File::create(output).map_err(write_error)?;
    write_rows(BufWriter::new(out), &extracted).map_err(write_error)?;

    tracing::info!(
        rows = summary.rows_read,
        records = summary.records_written,
        trees = summary.trees,
        exclusions = summary.exclusion_groups,
        "extraction complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::domain::LogicHint;

    #[test]
    fn select_text_prefers_requisite_language() {
        let picked = select_text(&[
            "<p>An introduction to circuits.</p>",
            "Pre-requisite: MATH 101.",
        ]);
        assert_eq!(picked, "Pre-requisite: MATH 101.");
    }

    #[test]
    fn select_text_falls_back_to_first_non_empty() {
        assert_eq!(select_text(&["<br/>", "Third-year standing."]), "Third-year standing.");
        assert_eq!(select_text(&[]), "");
    }

    #[test]
    fn extract_row_compiles_selected_text() {
        let row = Row::new([
            ("Course", "ELEC 201"),
            ("Credits", "4"),
            ("Description", "Circuits."),
            ("Prerequisites", "Prerequisite: MATH 101 and one of PHYS 108, PHYS 118."),
        ]);
        let out = extract_row(&row, &Config::default()).unwrap();

        assert_eq!(out.record.course.to_string(), "ELEC 201");
        assert_eq!(out.course_field_raw, "ELEC 201");
        assert_eq!(out.credit_value.as_deref(), Some("4"));
        assert_eq!(out.source_text, "Prerequisite: MATH 101 and one of PHYS 108, PHYS 118.");
        assert_eq!(out.record.logic_hint, LogicHint::Mixed);
        assert!(out.record.tree.is_some());
    }

    #[test]
    fn extract_row_without_course_is_skipped() {
        let row = Row::new([("Title", "Seminar"), ("Notes", "Permission of the instructor.")]);
        assert!(extract_row(&row, &Config::default()).is_none());
    }

    #[test]
    fn extract_rows_preserves_order_and_reports_progress() {
        let rows: Vec<Row> = (100..140)
            .map(|n| Row::new([("Course", format!("CPSC {n}")), ("Prerequisites", "CPSC 110.".to_string())]))
            .chain(std::iter::once(Row::new([("Title", "None")])))
            .collect();
        let seen = AtomicUsize::new(0);

        let out = extract_rows(&rows, &Config::default(), || {
            seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(seen.load(Ordering::Relaxed), 41);
        assert_eq!(out.len(), 40);
        let courses: Vec<String> = out.iter().map(|r| r.record.course.to_string()).collect();
        let expected: Vec<String> = (100..140).map(|n| format!("CPSC {n}")).collect();
        assert_eq!(courses, expected);

        let summary = summarize(rows.len(), &out);
        assert_eq!(summary.rows_skipped, 1);
        // CPSC 110 requiring itself prunes to nothing.
        assert_eq!(summary.trees, 39);
    }

    #[test]
    fn read_rows_reports_line_numbers() {
        let input = "{\"Course\": \"MATH 100\"}\n\nnot json\n";
        let error = read_rows(Cursor::new(input), Path::new("rows.jsonl")).unwrap_err();
        assert!(matches!(error, IngestError::Row { line: 3, .. }));
    }

    #[test]
    fn extract_file_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("rows.jsonl");
        let output = tmp.path().join("out.jsonl");
        std::fs::write(
            &input,
            concat!(
                "{\"Course\": \"PHIL 102\", \"Notes\": \"Credit will be granted for only one of PHIL 100 or PHIL 102.\"}\n",
                "{\"Course\": \"ELEC 201\", \"Prerequisites\": \"ELEC 201 or ELEC 202 is required.\"}\n",
            ),
        )
        .unwrap();

        let mut total = 0;
        let summary =
            extract_file(&input, &output, &Config::default(), |n| total = n, || {}).unwrap();
        assert_eq!(total, 2);
        assert_eq!(summary.records_written, 2);
        assert_eq!(summary.trees, 1);
        assert_eq!(summary.exclusion_groups, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        let rows: Vec<ExtractedRow> = written
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].record.tree.is_none());
        assert_eq!(rows[0].record.exclusions[0].courses().len(), 2);
        assert!(rows[1].record.tree.is_some());
    }

    #[test]
    fn extract_file_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let error = extract_file(
            &tmp.path().join("missing.jsonl"),
            &tmp.path().join("out.jsonl"),
            &Config::default(),
            |_| {},
            || {},
        )
        .unwrap_err();
        assert!(matches!(error, IngestError::Read { .. }));
    }
}
