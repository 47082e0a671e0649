//! Case-insensitive cue phrases shared by the compiler stages.

use std::sync::LazyLock;

use regex::Regex;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("cue pattern is valid")
}

static PREREQUISITE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)pre[\s\-]?req"));

static COREQUISITE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)co[\s\-]?req"));

static PERMISSION: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)(permission|consent) of (the )?(instructor|department|school|faculty)")
});

/// The "one of" choice marker.
pub static ONE_OF: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\bone\s+of\b"));

static AND: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\band\b"));

static OR: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\bor\b"));

/// Prerequisite language: "prerequisite", "pre-req", "pre req", ...
#[must_use]
pub fn mentions_prerequisite(text: &str) -> bool {
    PREREQUISITE.is_match(text)
}

/// Corequisite language: "corequisite", "co-requisite", "coreq", "co req", ...
#[must_use]
pub fn mentions_corequisite(text: &str) -> bool {
    COREQUISITE.is_match(text)
}

#[must_use]
pub fn requires_permission(text: &str) -> bool {
    PERMISSION.is_match(text)
}

#[must_use]
pub fn has_one_of(text: &str) -> bool {
    ONE_OF.is_match(text)
}

#[must_use]
pub fn has_and(text: &str) -> bool {
    AND.is_match(text)
}

#[must_use]
pub fn has_or(text: &str) -> bool {
    OR.is_match(text)
}
