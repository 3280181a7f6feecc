use serde::Serialize;

/// Compatibility verdict attached to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Match,
    Mismatch,
    None,
}

impl StatusTag {
    /// Badge text shown on the card, if any
    pub fn badge(self) -> Option<&'static str> {
        match self {
            StatusTag::Match => Some("ගැලපේ ✔"),
            StatusTag::Mismatch => Some("නොගැලපේ ✖"),
            StatusTag::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportCard {
    pub title: String,
    pub status: StatusTag,
    pub body_lines: Vec<String>,
    /// Trailing summary card, styled apart from the section cards
    pub is_summary: bool,
}

/// Inline run inside a legacy paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(text) | Inline::Strong(text) => text,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Inline::Strong(_))
    }
}

pub type Paragraph = Vec<Inline>;

/// Section of a heading-delimited reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacySection {
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}
