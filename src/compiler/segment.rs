//! Clause segmentation.
//!
//! Clauses are sentences: a boundary falls after `.`, `!` or `?` when it is
//! followed by whitespace and then an uppercase letter or an opening
//! parenthesis. Commas and semicolons never split.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// The final character is consumed by the match, but it is never sentence
// punctuation, so consecutive boundaries are still found.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+[A-Z(]").expect("sentence pattern is valid"));

/// Strips markup tags, decodes `&nbsp;` and `&amp;`, and collapses runs of
/// whitespace into single spaces.
#[must_use]
pub fn normalize(text: &str) -> String {
    let text = MARKUP_TAG.replace_all(text, " ");
    let text = text.replace("&nbsp;", " ").replace("&amp;", "&");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Splits a block of requisite prose into sentence-like clauses.
///
/// The text is normalized first. Every returned clause is non-empty, and
/// together the clauses cover the whole normalized text.
///
/// ```
/// let clauses = prereq::compiler::split("Prerequisite: MATH 101. <b>Corequisite:</b> MATH 255.");
/// assert_eq!(clauses, ["Prerequisite: MATH 101.", "Corequisite: MATH 255."]);
/// ```
#[must_use]
pub fn split(text: &str) -> Vec<String> {
    let text = normalize(text);
    let mut clauses = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BREAK.find_iter(&text) {
        // Both the punctuation and the following capital are single bytes.
        let end = boundary.start() + 1;
        push_clause(&mut clauses, &text[start..end]);
        start = boundary.end() - 1;
    }
    push_clause(&mut clauses, &text[start..]);

    clauses
}

fn push_clause(clauses: &mut Vec<String>, clause: &str) {
    let clause = clause.trim();
    if !clause.is_empty() {
        clauses.push(clause.to_string());
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn normalize_strips_markup_and_entities() {
        assert_eq!(
            normalize("<p>MATH&nbsp;100 &amp;\n\n  MATH 101</p>\t"),
            "MATH 100 & MATH 101"
        );
        assert_eq!(normalize("   "), "");
    }

    #[test_case("", &[]; "empty")]
    #[test_case("   ", &[]; "blank")]
    #[test_case("MATH 100", &["MATH 100"]; "single clause without punctuation")]
    #[test_case("A. B! C? D.", &["A.", "B!", "C?", "D."]; "all terminators")]
    #[test_case("One. (Two.) three.", &["One.", "(Two.) three."]; "parenthesis starts a clause")]
    #[test_case("MATH 100, MATH 101; or MATH 102.", &["MATH 100, MATH 101; or MATH 102."]; "commas and semicolons do not split")]
    #[test_case("e.g. something. Then more.", &["e.g. something.", "Then more."]; "lowercase continuation does not split")]
    #[test_case("Ends here.Next", &["Ends here.Next"]; "needs whitespace")]
    fn split_cases(input: &str, expected: &[&str]) {
        assert_eq!(split(input), expected);
    }

    #[test]
    fn split_normalizes_first() {
        assert_eq!(
            split("<li>Prerequisite: MATH 101.</li>\n<li>Corequisite: MATH 255.</li>"),
            ["Prerequisite: MATH 101.", "Corequisite: MATH 255."]
        );
    }
}
