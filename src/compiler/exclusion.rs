//! Credit-exclusion clauses.
//!
//! Sentences such as "Credit will be granted for only one of PHIL 100 or
//! PHIL 102." constrain credit, not enrolment. They are kept out of the
//! requirement tree and harvested as [`CreditExclusion`] groups instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{CourseId, CreditExclusion};

static CREDIT_EXCLUSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(credit (will|won't|won’t|will not) be (granted|given)|",
        r"no credit (for|will be given)|",
        r"credit (towards|toward)|",
        r"credit excluded|",
        r"only one of|",
        r"mutually exclusive|",
        r"may not be taken for credit with|",
        r"cannot be taken for credit with)",
    ))
    .expect("credit exclusion pattern is valid")
});

/// Returns `true` if the clause describes a mutual credit exclusion.
#[must_use]
pub fn is_exclusion(clause: &str) -> bool {
    CREDIT_EXCLUSION.is_match(clause)
}

/// Harvests the courses named by an exclusion clause.
///
/// Returns `None` when the clause names fewer than two distinct courses.
#[must_use]
pub fn harvest_exclusion(clause: &str) -> Option<CreditExclusion> {
    CreditExclusion::new(CourseId::find_all(clause), clause.trim())
}
