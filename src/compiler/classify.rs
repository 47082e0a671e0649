//! Advisory AND/OR classification of raw requisite text.
//!
//! This is a QA signal for manual review. It never feeds into tree
//! compilation, and it may disagree with the compiled tree.

use crate::{compiler::cues, domain::LogicHint};

/// Classifies the connectives used in `text`.
///
/// ```
/// use prereq::{compiler::classify, LogicHint};
///
/// assert_eq!(classify("one of A, B, C."), LogicHint::Or);
/// assert_eq!(classify("A and B."), LogicHint::And);
/// assert_eq!(classify(""), LogicHint::None);
/// ```
#[must_use]
pub fn classify(text: &str) -> LogicHint {
    if text.trim().is_empty() {
        return LogicHint::None;
    }

    let one_of = cues::has_one_of(text);
    let and = cues::has_and(text);
    let or = cues::has_or(text);

    match (one_of, and, or) {
        (true, true, _) | (false, true, true) => LogicHint::Mixed,
        (true, false, _) | (false, false, true) => LogicHint::Or,
        (false, true, false) => LogicHint::And,
        (false, false, false) => LogicHint::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("", LogicHint::None; "empty")]
    #[test_case(" \t ", LogicHint::None; "blank")]
    #[test_case("one of A, B, C.", LogicHint::Or; "one of")]
    #[test_case("A or B.", LogicHint::Or; "or only")]
    #[test_case("A and B.", LogicHint::And; "and only")]
    #[test_case("A and one of B, C.", LogicHint::Mixed; "one of with and")]
    #[test_case("A and B, or C.", LogicHint::Mixed; "and with or")]
    #[test_case("MATH 100.", LogicHint::Unknown; "no connective")]
    #[test_case("Standing in Forestry.", LogicHint::Unknown; "embedded connective letters")]
    fn classify_cases(text: &str, expected: LogicHint) {
        assert_eq!(classify(text), expected);
    }
}
