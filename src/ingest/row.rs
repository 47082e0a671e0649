use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{Config, CourseId};

/// One row of a catalog export: column names mapped to text values.
///
/// Column order is preserved. Scalar JSON values are stringified; nulls,
/// arrays and objects are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Creates a row from `(column, value)` pairs.
    #[must_use]
    pub fn new<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a column by name.
    ///
    /// An exact match is preferred; otherwise the first column whose name
    /// matches case-insensitively is used. Blank values count as missing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(|(_, value)| value)
    }

    /// Returns the value of the first candidate column that is present and
    /// non-empty.
    #[must_use]
    pub fn resolve(&self, keys: &[String]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Resolves the course this row describes.
    ///
    /// The configured course columns are tried in order. If none of them
    /// contains an identifier, all values in the row are scanned.
    #[must_use]
    pub fn course_id(&self, config: &Config) -> Option<CourseId> {
        config
            .course_keys()
            .iter()
            .filter_map(|key| self.get(key))
            .find_map(CourseId::find_first)
            .or_else(|| {
                let joined = self
                    .fields
                    .iter()
                    .map(|(_, v)| v.as_str())
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                CourseId::find_first(&joined)
            })
    }

    /// The raw value of the first non-empty course column.
    #[must_use]
    pub fn course_field(&self, config: &Config) -> Option<&str> {
        self.resolve(config.course_keys())
    }

    /// The trimmed credit value, if any.
    #[must_use]
    pub fn credit_value(&self, config: &Config) -> Option<&str> {
        self.resolve(config.credit_keys()).map(str::trim)
    }

    /// Collects the prose fields that may hold requisite text.
    ///
    /// Configured text columns come first, in priority order, followed by any
    /// other column whose name carries a requisite cue.
    #[must_use]
    pub fn candidate_texts(&self, config: &Config) -> Vec<&str> {
        let mut used: Vec<&str> = Vec::new();
        let mut texts = Vec::new();

        for key in config.text_keys() {
            if let Some((header, value)) = self.lookup(key) {
                if !used.contains(&header) {
                    used.push(header);
                    texts.push(value);
                }
            }
        }

        for (header, value) in &self.fields {
            if used.contains(&header.as_str()) || value.trim().is_empty() {
                continue;
            }
            if config.is_requisite_header(header) {
                texts.push(value.as_str());
            }
        }

        texts
    }

    /// Like [`Row::get`], also returning the matched column name.
    fn lookup(&self, key: &str) -> Option<(&str, &str)> {
        let mut present = self.fields.iter().filter(|(_, v)| !v.trim().is_empty());
        present
            .clone()
            .find(|(k, _)| k == key)
            .or_else(|| present.find(|(k, _)| k.eq_ignore_ascii_case(key)))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
                    };
                    (k, v)
                })
                .collect(),
        }
    }
}
