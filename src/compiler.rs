//! The text-to-tree compiler.
//!
//! Requisite prose for one course goes through these stages:
//!
//! 1. [`split`] normalizes the text and breaks it into sentence clauses.
//! 2. [`is_exclusion`] sets aside credit-exclusion clauses, which
//!    [`harvest_exclusion`] turns into [`CreditExclusion`] groups.
//! 3. [`compile_clause`] turns each remaining clause into a partial tree.
//! 4. [`merge`] conjoins the partial trees, left to right.
//! 5. [`prune`] removes references to the course itself.
//!
//! [`classify`] runs alongside as an independent audit signal.
//!
//! Compilation is pure and total: any input text yields a record.

mod classify;
mod clause;
pub(crate) mod cues;
mod exclusion;
mod merge;
mod prune;
mod segment;

pub use classify::classify;
pub use clause::compile as compile_clause;
pub use exclusion::{harvest_exclusion, is_exclusion};
pub use merge::{merge, merge_all};
pub use prune::prune;
pub use segment::{normalize, split};

use tracing::instrument;

use crate::domain::{CompiledRecord, CourseId, CreditExclusion};

/// Compiles the requisite text of one course.
///
/// ```
/// use prereq::{compile, LogicHint};
///
/// let course = "PHIL 102".parse().unwrap();
/// let record = compile(&course, "Credit will be granted for only one of PHIL 100 or PHIL 102.");
///
/// assert!(record.tree.is_none());
/// assert_eq!(record.exclusions.len(), 1);
/// assert_eq!(record.logic_hint, LogicHint::Or);
/// ```
#[must_use]
#[instrument(level = "debug", skip_all, fields(course = %course))]
pub fn compile(course: &CourseId, raw_text: &str) -> CompiledRecord {
    let text = normalize(raw_text);

    let (exclusion_clauses, requirement_clauses): (Vec<String>, Vec<String>) =
        split(&text).into_iter().partition(|clause| is_exclusion(clause));

    let exclusions: Vec<CreditExclusion> = exclusion_clauses
        .iter()
        .filter_map(|clause| harvest_exclusion(clause))
        .collect();

    let merged = merge_all(requirement_clauses.iter().map(|clause| compile_clause(clause)));
    let tree = prune(merged.as_ref(), course);
    if merged.as_ref().is_some_and(|tree| tree.mentions(course)) {
        tracing::debug!("pruned self reference");
    }

    CompiledRecord {
        course: course.clone(),
        tree,
        exclusions,
        mentions_corequisite: cues::mentions_corequisite(&text),
        requires_permission: cues::requires_permission(&text),
        logic_hint: classify(&text),
    }
}
