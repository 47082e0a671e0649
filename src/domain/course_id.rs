use std::{collections::BTreeSet, fmt, ops::Deref, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Lexical pattern of a course identifier anywhere in free text.
///
/// `SUBJECT[_CAMPUS] [-] NUMBER`, e.g. `CPSC 110`, `PHYS_V 108`, `MATH-100A`.
static COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,5})(?:_([A-Z]))?\s*[- ]?\s*(\d{3}[A-Z]?)\b")
        .expect("course code pattern is valid")
});

/// The same pattern, anchored to cover a whole string.
static COURSE_CODE_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,5})(?:_([A-Z]))?\s*[- ]?\s*(\d{3}[A-Z]?)$")
        .expect("course code pattern is valid")
});

/// A validated subject code: 2 to 5 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Subject(NonEmptyString);

impl Subject {
    /// Creates a new `Subject`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Subject`] if the string is not 2 to 5 uppercase ASCII
    /// letters.
    pub fn new(s: String) -> Result<Self, Error> {
        if !(2..=5).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::Subject(s));
        }
        NonEmptyString::new(s).map(Self).map_err(Error::Subject)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Subject {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized course identifier.
///
/// Canonical form: `{SUBJECT}[_{CAMPUS}] {NUMBER}`, where:
/// - `SUBJECT` is 2 to 5 uppercase letters (e.g. `CPSC`)
/// - `CAMPUS` is an optional single uppercase letter (e.g. `V`)
/// - `NUMBER` is three digits with an optional trailing uppercase letter
///   (e.g. `110`, `221A`)
///
/// `CPSC110`, `CPSC 110` and `CPSC-110` all normalize to `CPSC 110`.
/// Identifiers are never checked against a real catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CourseId {
    subject: Subject,
    campus: Option<char>,
    number: String,
}

impl CourseId {
    /// Returns the subject code.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the campus letter, if any.
    #[must_use]
    pub const fn campus(&self) -> Option<char> {
        self.campus
    }

    /// Returns the course number, including any suffix letter.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    fn from_captures(caps: &Captures<'_>) -> Result<Self, Error> {
        let subject = Subject::new(caps[1].to_string())?;
        let campus = caps.get(2).and_then(|m| m.as_str().chars().next());
        Ok(Self {
            subject,
            campus,
            number: caps[3].to_string(),
        })
    }

    /// Finds every course identifier in `text`.
    ///
    /// Identifiers are returned in order of first appearance. Later mentions of
    /// an identifier that normalizes to one already seen are dropped.
    ///
    /// ```
    /// use prereq::CourseId;
    ///
    /// let ids = CourseId::find_all("MATH101 and one of PHYS_V 108, MATH-101");
    /// let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
    /// assert_eq!(ids, ["MATH 101", "PHYS_V 108"]);
    /// ```
    #[must_use]
    pub fn find_all(text: &str) -> Vec<Self> {
        let mut seen = BTreeSet::new();
        COURSE_CODE
            .captures_iter(text)
            .filter_map(|caps| Self::from_captures(&caps).ok())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Finds the first course identifier in `text`, if any.
    #[must_use]
    pub fn find_first(text: &str) -> Option<Self> {
        COURSE_CODE
            .captures(text)
            .and_then(|caps| Self::from_captures(&caps).ok())
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.campus {
            Some(campus) => write!(f, "{}_{} {}", self.subject, campus, self.number),
            None => write!(f, "{} {}", self.subject, self.number),
        }
    }
}

/// Errors that can occur when parsing a course identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string is not a course identifier.
    #[error("Invalid course identifier: '{0}'")]
    Syntax(String),

    /// The subject segment is not 2 to 5 uppercase letters.
    #[error("Invalid subject '{0}': must be 2 to 5 uppercase letters (A-Z)")]
    Subject(String),
}

impl FromStr for CourseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = COURSE_CODE_EXACT
            .captures(s.trim())
            .ok_or_else(|| Error::Syntax(s.to_string()))?;
        Self::from_captures(&caps)
    }
}

impl TryFrom<&str> for CourseId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for CourseId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.to_string()
    }
}
