use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::domain::{CourseId, Requirement};

/// Coarse classification of the connectives in a block of requisite text.
///
/// Advisory metadata for manual review. It is computed independently of the
/// requirement tree and may disagree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicHint {
    /// Only conjunctive phrasing.
    And,
    /// Only disjunctive phrasing, or a "one of" choice.
    Or,
    /// Both conjunctive and disjunctive phrasing.
    Mixed,
    /// No text at all.
    None,
    /// Text with no recognizable connective.
    Unknown,
}

impl fmt::Display for LogicHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Mixed => "MIXED",
            Self::None => "NONE",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A set of courses for which credit is granted for at most one.
///
/// Never part of a requirement tree. Deserialization applies the same rules
/// as [`CreditExclusion::new`] and rejects groups that are too small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditExclusion {
    courses: Vec<CourseId>,
    source: String,
}

impl CreditExclusion {
    /// Creates an exclusion group.
    ///
    /// Duplicate courses are dropped, keeping first-seen order. Returns `None`
    /// when fewer than two distinct courses remain, since such a group carries
    /// no actionable structure.
    #[must_use]
    pub fn new(courses: Vec<CourseId>, source: impl Into<String>) -> Option<Self> {
        let mut distinct: Vec<CourseId> = Vec::with_capacity(courses.len());
        for course in courses {
            if !distinct.contains(&course) {
                distinct.push(course);
            }
        }
        (distinct.len() >= 2).then(|| Self {
            courses: distinct,
            source: source.into(),
        })
    }

    /// The mutually exclusive courses, in order of first mention.
    #[must_use]
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }

    /// The clause the group was harvested from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<'de> Deserialize<'de> for CreditExclusion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Unchecked {
            courses: Vec<CourseId>,
            source: String,
        }

        let Unchecked { courses, source } = Unchecked::deserialize(deserializer)?;
        Self::new(courses, source).ok_or_else(|| {
            de::Error::custom("credit exclusion needs at least two distinct courses")
        })
    }
}

/// The result of compiling one course's requisite text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledRecord {
    /// The course the text belongs to.
    pub course: CourseId,
    /// The requirement tree, absent when no requirement could be extracted.
    pub tree: Option<Requirement>,
    /// Credit-exclusion groups found in the text.
    pub exclusions: Vec<CreditExclusion>,
    /// Whether the text uses corequisite language.
    pub mentions_corequisite: bool,
    /// Whether the text asks for instructor or department permission.
    pub requires_permission: bool,
    /// Advisory classification of the raw text.
    pub logic_hint: LogicHint,
}
