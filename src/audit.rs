//! Quality audit of extracted output.
//!
//! Works on untyped JSON rather than [`ExtractedRow`](crate::ingest::ExtractedRow)
//! so that output from older or foreign runs with broken trees is counted
//! instead of rejected outright.

use std::io::{self, BufRead};

use serde::Serialize;
use serde_json::Value;

use crate::domain::{CourseId, Requirement};

/// Counts of structural problems found in extracted output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Rows read.
    pub rows: usize,
    /// Lines that were not JSON objects.
    pub malformed_rows: usize,
    /// Rows carrying a non-null tree.
    pub trees_present: usize,
    /// Trees that decode into a well-formed [`Requirement`].
    pub trees_valid: usize,
    /// Trees that mention their own course.
    pub self_references: usize,
    /// OR groups whose minimum exceeds their child count.
    pub or_min_violations: usize,
    /// Groups with no children.
    pub empty_groups: usize,
    /// Rows with at least one credit-exclusion group.
    pub rows_with_exclusions: usize,
}

impl AuditReport {
    /// Returns `true` if no structural problem was found.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.malformed_rows == 0
            && self.self_references == 0
            && self.or_min_violations == 0
            && self.empty_groups == 0
            && self.trees_valid == self.trees_present
    }

    /// Audits one output row.
    pub fn record(&mut self, row: &Value) {
        self.rows += 1;
        let Some(object) = row.as_object() else {
            self.malformed_rows += 1;
            return;
        };

        if object
            .get("exclusions")
            .and_then(Value::as_array)
            .is_some_and(|groups| !groups.is_empty())
        {
            self.rows_with_exclusions += 1;
        }

        let Some(tree) = object.get("tree").filter(|tree| !tree.is_null()) else {
            return;
        };
        self.trees_present += 1;

        if serde_json::from_value::<Requirement>(tree.clone()).is_ok() {
            self.trees_valid += 1;
        }

        let course = object
            .get("course")
            .and_then(Value::as_str)
            .map(normalize_id);
        let mut self_reference = false;
        self.walk(tree, course.as_deref(), &mut self_reference);
        if self_reference {
            self.self_references += 1;
        }
    }

    fn walk(&mut self, node: &Value, course: Option<&str>, self_reference: &mut bool) {
        if node.get("type").and_then(Value::as_str) == Some("course") {
            let id = node.get("id").and_then(Value::as_str).map(normalize_id);
            if id.is_some() && id.as_deref() == course {
                *self_reference = true;
            }
            return;
        }

        if node.get("op").is_none() {
            return;
        }
        let children = node
            .get("children")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice);
        if children.is_empty() {
            self.empty_groups += 1;
        }
        if node.get("op").and_then(Value::as_str) == Some("OR") {
            if let Some(min) = node.get("min").and_then(Value::as_u64) {
                if usize::try_from(min).unwrap_or(usize::MAX) > children.len() {
                    self.or_min_violations += 1;
                }
            }
        }
        for child in children {
            self.walk(child, course, self_reference);
        }
    }
}

fn normalize_id(raw: &str) -> String {
    raw.parse::<CourseId>()
        .map_or_else(|_| raw.trim().to_string(), |id| id.to_string())
}

/// Audits JSON Lines output. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if the reader fails.
pub fn audit_reader<R: BufRead>(reader: R) -> io::Result<AuditReport> {
    let mut report = AuditReport::default();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&line) {
            Ok(row) => report.record(&row),
            Err(e) => {
                tracing::debug!("malformed output row: {e}");
                report.rows += 1;
                report.malformed_rows += 1;
            }
        }
    }
    Ok(report)
}
