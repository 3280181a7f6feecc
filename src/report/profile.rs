use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

const PORONDAM_NAMES: [&str; 20] = [
    "නැකැත්",
    "ගණ",
    "මහේන්ද්‍ර",
    "ස්ත්‍රී දීර්ඝ",
    "යෝනි",
    "රාශි",
    "රාශ්‍යාධිපති",
    "වශ්‍ය",
    "රජ්ජු",
    "වේධ",
    "වෘක්ෂ",
    "ආයුෂ",
    "පක්ෂි",
    "භූත",
    "ගෝත්‍ර",
    "වර්ණ",
    "ලිංග",
    "නාඩි",
    "දින",
    "ග්‍රහ",
];
const PORONDAM_SUFFIX: &str = "පොරොන්දම";

const SUMMARY_MARKER: &str = "සාරාංශය";
const MATCH_KEYWORD: &str = "ගැලපේ";
const MISMATCH_KEYWORD: &str = "නොගැලපේ";
const EMPHASIS_MARKER: char = '*';
const LABEL_SEPARATOR: char = ':';
const HEADING_MARKER: &str = "### ";

/// Vocabulary and marker rules for reading segmentation.
///
/// Everything that depends on the reading service's text conventions lives
/// here, so a format change is a profile edit rather than a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterProfile {
    /// Recognized section headings, matched exactly and case-sensitively
    #[serde(default = "default_titles")]
    pub titles: Vec<String>,
    /// Text that introduces the trailing summary
    #[serde(default = "default_summary_marker")]
    pub summary_marker: String,
    /// Display title of the summary card
    #[serde(default = "default_summary_marker")]
    pub summary_title: String,
    #[serde(default = "default_match_keyword")]
    pub match_keyword: String,
    #[serde(default = "default_mismatch_keyword")]
    pub mismatch_keyword: String,
    #[serde(default = "default_emphasis_marker")]
    pub emphasis_marker: char,
    /// Separator stripped from title lines and the summary
    #[serde(default = "default_label_separator")]
    pub label_separator: char,
    /// Characters allowed to follow a title, besides whitespace and emphasis
    #[serde(default = "default_title_terminators")]
    pub title_terminators: Vec<char>,
    /// Section delimiter for the legacy heading mode
    #[serde(default = "default_heading_marker")]
    pub heading_marker: String,
}

fn default_titles() -> Vec<String> {
    PORONDAM_NAMES
        .iter()
        .map(|name| format!("{} {}", name, PORONDAM_SUFFIX))
        .collect()
}
fn default_summary_marker() -> String {
    SUMMARY_MARKER.to_string()
}
fn default_match_keyword() -> String {
    MATCH_KEYWORD.to_string()
}
fn default_mismatch_keyword() -> String {
    MISMATCH_KEYWORD.to_string()
}
fn default_emphasis_marker() -> char {
    EMPHASIS_MARKER
}
fn default_label_separator() -> char {
    LABEL_SEPARATOR
}
fn default_title_terminators() -> Vec<char> {
    vec![':', '.']
}
fn default_heading_marker() -> String {
    HEADING_MARKER.to_string()
}

impl Default for SegmenterProfile {
    fn default() -> Self {
        Self::porondam()
    }
}

impl SegmenterProfile {
    /// The twenty compatibility factors of a porondam report
    pub fn porondam() -> Self {
        SegmenterProfile {
            titles: default_titles(),
            summary_marker: default_summary_marker(),
            summary_title: default_summary_marker(),
            match_keyword: default_match_keyword(),
            mismatch_keyword: default_mismatch_keyword(),
            emphasis_marker: default_emphasis_marker(),
            label_separator: default_label_separator(),
            title_terminators: default_title_terminators(),
            heading_marker: default_heading_marker(),
        }
    }

    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_toml(content: &str) -> Result<Self, ProfileError> {
        let profile: SegmenterProfile = toml::from_str(content)?;
        profile.validate()
    }

    pub fn from_yaml(content: &str) -> Result<Self, ProfileError> {
        let profile: SegmenterProfile = serde_yaml::from_str(content)?;
        profile.validate()
    }

    /// TOML first, YAML second. A validation failure is reported as is.
    pub fn from_file_content(content: &str) -> Result<Self, ProfileError> {
        match toml::from_str::<SegmenterProfile>(content) {
            Ok(profile) => profile.validate(),
            Err(toml_err) => match serde_yaml::from_str::<SegmenterProfile>(content) {
                Ok(profile) => profile.validate(),
                Err(_) => Err(toml_err.into()),
            },
        }
    }

    pub fn validate(self) -> Result<Self, ProfileError> {
        if let Some(index) = self.titles.iter().position(|t| t.trim().is_empty()) {
            return Err(ProfileError::EmptyTitle { index });
        }

        let required = [
            ("summary_marker", &self.summary_marker),
            ("summary_title", &self.summary_title),
            ("match_keyword", &self.match_keyword),
            ("mismatch_keyword", &self.mismatch_keyword),
            ("heading_marker", &self.heading_marker),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProfileError::EmptyField { field });
            }
        }

        Ok(self)
    }

    /// Verdict keywords in the order they are checked
    pub(crate) fn status_keywords(&self) -> [&str; 2] {
        [self.mismatch_keyword.as_str(), self.match_keyword.as_str()]
    }

    pub(crate) fn is_title_terminator(&self, c: char) -> bool {
        c.is_whitespace() || c == self.emphasis_marker || self.title_terminators.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_lists_twenty_factors() {
        let profile = SegmenterProfile::default();
        assert_eq!(profile.titles.len(), 20);
        assert_eq!(profile.titles[0], "නැකැත් පොරොන්දම");
        assert_eq!(profile.titles[19], "ග්‍රහ පොරොන්දම");
        assert!(profile.titles.iter().all(|t| t.ends_with(PORONDAM_SUFFIX)));
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let profile = SegmenterProfile::from_toml(
            r#"
titles = ["Love", "Career"]
summary_marker = "Summary"
"#,
        )
        .unwrap();

        assert_eq!(profile.titles, ["Love", "Career"]);
        assert_eq!(profile.summary_marker, "Summary");
        assert_eq!(profile.summary_title, SUMMARY_MARKER);
        assert_eq!(profile.emphasis_marker, '*');
        assert_eq!(profile.heading_marker, "### ");
    }

    #[test]
    fn yaml_profile_parses() {
        let profile = SegmenterProfile::from_yaml(
            "titles:\n  - Health\nmatch_keyword: good\nmismatch_keyword: not good\n",
        )
        .unwrap();
        assert_eq!(profile.titles, ["Health"]);
        assert_eq!(profile.status_keywords(), ["not good", "good"]);
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = SegmenterProfile::from_toml(r#"titles = ["A", "  "]"#).unwrap_err();
        assert!(matches!(err, ProfileError::EmptyTitle { index: 1 }));
    }

    #[test]
    fn empty_summary_marker_is_rejected() {
        let err = SegmenterProfile::from_toml(r#"summary_marker = """#).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::EmptyField {
                field: "summary_marker"
            }
        ));
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = SegmenterProfile::from_toml("titles = [").unwrap_err();
        assert!(matches!(err, ProfileError::Toml(_)));
    }

    #[test]
    fn file_content_falls_back_to_yaml() {
        let profile = SegmenterProfile::from_file_content("titles:\n  - Health\n").unwrap();
        assert_eq!(profile.titles, ["Health"]);

        let err = SegmenterProfile::from_file_content("titles:\n  - \"\"\n").unwrap_err();
        assert!(matches!(err, ProfileError::EmptyTitle { index: 0 }));
    }
}
