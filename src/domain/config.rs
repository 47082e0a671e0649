use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for catalog ingestion.
///
/// Catalog exports name their columns inconsistently. This struct holds the
/// field-resolution policy: for each value the extractor needs, an ordered
/// list of candidate column names. Lookups are case-insensitive and the first
/// non-empty match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Columns that may hold the course identifier.
    ///
    /// If none of them yields an identifier, every value in the row is
    /// scanned.
    course_keys: Vec<String>,

    /// Columns that may hold requisite prose, in priority order.
    text_keys: Vec<String>,

    /// Substrings that mark any other column as holding requisite prose.
    ///
    /// Matched against the lowercased column name. Such columns are tried
    /// after `text_keys`.
    requisite_header_cues: Vec<String>,

    /// Columns that may hold the credit value.
    credit_keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            course_keys: default_course_keys(),
            text_keys: default_text_keys(),
            requisite_header_cues: default_requisite_header_cues(),
            credit_keys: default_credit_keys(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the candidate course identifier columns.
    #[must_use]
    pub fn course_keys(&self) -> &[String] {
        &self.course_keys
    }

    /// Returns the candidate requisite prose columns.
    #[must_use]
    pub fn text_keys(&self) -> &[String] {
        &self.text_keys
    }

    /// Returns the column-name cues for extra requisite prose columns.
    #[must_use]
    pub fn requisite_header_cues(&self) -> &[String] {
        &self.requisite_header_cues
    }

    /// Returns the candidate credit columns.
    #[must_use]
    pub fn credit_keys(&self) -> &[String] {
        &self.credit_keys
    }

    /// Checks whether a column name carries a requisite cue.
    #[must_use]
    pub fn is_requisite_header(&self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.requisite_header_cues
            .iter()
            .any(|cue| header.contains(cue.as_str()))
    }

    /// Adds a text column with the highest priority.
    ///
    /// Returns `true` if the key was added, `false` if it already existed.
    pub fn prepend_text_key(&mut self, key: String) -> bool {
        if self
            .text_keys
            .iter()
            .any(|k| k.eq_ignore_ascii_case(&key))
        {
            false
        } else {
            self.text_keys.insert(0, key);
            true
        }
    }
}

fn strings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(ToString::to_string).collect()
}

fn default_course_keys() -> Vec<String> {
    strings(&["course_id", "Course", "course", "Code", "code"])
}

fn default_text_keys() -> Vec<String> {
    strings(&[
        "Prerequisites",
        "Prerequisite",
        "Requisites",
        "Eligibility",
        "Notes",
        "Description",
        "Requisite",
    ])
}

fn default_requisite_header_cues() -> Vec<String> {
    strings(&["prereq", "pre-req", "pre req", "coreq", "co-req", "co req"])
}

fn default_credit_keys() -> Vec<String> {
    strings(&["Credits", "credits", "Credit", "credit", "Units"])
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_course_keys")]
        course_keys: Vec<String>,

        #[serde(default = "default_text_keys")]
        text_keys: Vec<String>,

        /// Lowercase substrings; cues are lowercased on load.
        #[serde(default = "default_requisite_header_cues")]
        requisite_header_cues: Vec<String>,

        #[serde(default = "default_credit_keys")]
        credit_keys: Vec<String>,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                course_keys,
                text_keys,
                requisite_header_cues,
                credit_keys,
            } => Self {
                course_keys,
                text_keys,
                requisite_header_cues: requisite_header_cues
                    .into_iter()
                    .map(|cue| cue.to_lowercase())
                    .collect(),
                credit_keys,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            course_keys: config.course_keys,
            text_keys: config.text_keys,
            requisite_header_cues: config.requisite_header_cues,
            credit_keys: config.credit_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ncourse_keys = [\"Subject Code\"]\ntext_keys = [\"Reqs\"]\nrequisite_header_cues = [\"Needs\"]\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.course_keys(), &["Subject Code".to_string()]);
        assert_eq!(config.text_keys(), &["Reqs".to_string()]);
        assert_eq!(config.requisite_header_cues(), &["needs".to_string()]);
        assert_eq!(config.credit_keys(), Config::default().credit_keys());
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ntext_keys = \"Notes\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        assert!(config.prepend_text_key("Requirements".to_string()));
        assert!(!config.prepend_text_key("requirements".to_string()));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.text_keys()[0], "Requirements");
    }

    #[test]
    fn requisite_header_detection() {
        let config = Config::default();
        assert!(config.is_requisite_header("Pre-Req Notes"));
        assert!(config.is_requisite_header("COREQUISITES"));
        assert!(!config.is_requisite_header("Title"));
    }
}
