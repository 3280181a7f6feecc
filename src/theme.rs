use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

const DAIVAYA_BACKGROUND: &str = "#fffaf0";
const DAIVAYA_TEXT: &str = "#3b2f2f";
const DAIVAYA_HEADING: &str = "#7a1f1f";
const DAIVAYA_GRID_LINE: &str = "#8b5e3c";
const DAIVAYA_CELL_FILL: &str = "#fff4dc";
const DAIVAYA_LAGNA_FILL: &str = "#f6d7a7";
const DAIVAYA_CENTER_FILL: &str = "#fdebc8";
const DAIVAYA_PLANET: &str = "#1f3a93";
const DAIVAYA_MUTED: &str = "#8a7b6b";
const DAIVAYA_CARD_BG: &str = "#ffffff";
const DAIVAYA_CARD_BORDER: &str = "#e3cfa8";
const DAIVAYA_SUMMARY_BG: &str = "#fdf1d8";
const DAIVAYA_MATCH: &str = "#2e7d32";
const DAIVAYA_MISMATCH: &str = "#c62828";
const DAIVAYA_BADGE_TEXT: &str = "#ffffff";

const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("daivaya_light", include_str!("../themes/daivaya_light.toml")),
    ("daivaya_dark", include_str!("../themes/daivaya_dark.toml")),
    ("parchment", include_str!("../themes/parchment.toml")),
];

const FONT_SIZE_BASE: f32 = 15.0;
const FONT_SIZE_TITLE: f32 = 19.0;
const FONT_SIZE_SMALL: f32 = 11.0;
const LINE_HEIGHT: f32 = 1.6;
const PADDING: f32 = 24.0;
const CARD_GAP: f32 = 16.0;
const CARD_PADDING: f32 = 18.0;
const CARD_RADIUS: f32 = 8.0;
const CELL_SIZE: f32 = 92.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_text")]
    pub text_color: String,
    #[serde(default = "default_heading")]
    pub heading_color: String,
    #[serde(default = "default_muted")]
    pub muted_color: String,

    #[serde(default = "default_grid_line")]
    pub grid_line_color: String,
    #[serde(default = "default_cell_fill")]
    pub cell_fill_color: String,
    #[serde(default = "default_lagna_fill")]
    pub lagna_fill_color: String,
    #[serde(default = "default_center_fill")]
    pub center_fill_color: String,
    #[serde(default = "default_planet")]
    pub planet_color: String,

    #[serde(default = "default_card_bg")]
    pub card_bg_color: String,
    #[serde(default = "default_card_border")]
    pub card_border_color: String,
    #[serde(default = "default_summary_bg")]
    pub summary_bg_color: String,
    #[serde(default = "default_match")]
    pub match_color: String,
    #[serde(default = "default_mismatch")]
    pub mismatch_color: String,
    #[serde(default = "default_badge_text")]
    pub badge_text_color: String,

    #[serde(default = "default_font_size_base")]
    pub font_size_base: f32,
    #[serde(default = "default_font_size_title")]
    pub font_size_title: f32,
    #[serde(default = "default_font_size_small")]
    pub font_size_small: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    #[serde(default = "default_padding")]
    pub padding: f32,
    #[serde(default = "default_card_gap")]
    pub card_gap: f32,
    #[serde(default = "default_card_padding")]
    pub card_padding: f32,
    #[serde(default = "default_card_radius")]
    pub card_radius: f32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

fn default_background() -> String {
    DAIVAYA_BACKGROUND.to_string()
}
fn default_text() -> String {
    DAIVAYA_TEXT.to_string()
}
fn default_heading() -> String {
    DAIVAYA_HEADING.to_string()
}
fn default_muted() -> String {
    DAIVAYA_MUTED.to_string()
}
fn default_grid_line() -> String {
    DAIVAYA_GRID_LINE.to_string()
}
fn default_cell_fill() -> String {
    DAIVAYA_CELL_FILL.to_string()
}
fn default_lagna_fill() -> String {
    DAIVAYA_LAGNA_FILL.to_string()
}
fn default_center_fill() -> String {
    DAIVAYA_CENTER_FILL.to_string()
}
fn default_planet() -> String {
    DAIVAYA_PLANET.to_string()
}
fn default_card_bg() -> String {
    DAIVAYA_CARD_BG.to_string()
}
fn default_card_border() -> String {
    DAIVAYA_CARD_BORDER.to_string()
}
fn default_summary_bg() -> String {
    DAIVAYA_SUMMARY_BG.to_string()
}
fn default_match() -> String {
    DAIVAYA_MATCH.to_string()
}
fn default_mismatch() -> String {
    DAIVAYA_MISMATCH.to_string()
}
fn default_badge_text() -> String {
    DAIVAYA_BADGE_TEXT.to_string()
}
fn default_font_size_base() -> f32 {
    FONT_SIZE_BASE
}
fn default_font_size_title() -> f32 {
    FONT_SIZE_TITLE
}
fn default_font_size_small() -> f32 {
    FONT_SIZE_SMALL
}
fn default_line_height() -> f32 {
    LINE_HEIGHT
}
fn default_padding() -> f32 {
    PADDING
}
fn default_card_gap() -> f32 {
    CARD_GAP
}
fn default_card_padding() -> f32 {
    CARD_PADDING
}
fn default_card_radius() -> f32 {
    CARD_RADIUS
}
fn default_cell_size() -> f32 {
    CELL_SIZE
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_builtin("daivaya_light").expect("built-in daivaya_light theme must parse")
    }
}

impl Theme {
    pub fn from_builtin(name: &str) -> Result<Self, ThemeError> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_THEMES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| ThemeError::UnknownBuiltin {
                name: name.to_string(),
                available: Self::list_builtins().join(", "),
            })?;
        Self::from_toml(content)
    }

    pub fn list_builtins() -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_toml(content: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a theme file, trying TOML first and YAML second.
    pub fn from_file_content(content: &str) -> Result<Self, ThemeError> {
        match Self::from_toml(content) {
            Ok(theme) => Ok(theme),
            Err(toml_err) => Self::from_yaml(content).map_err(|_| toml_err),
        }
    }

    pub fn status_color(&self, status: crate::report::StatusTag) -> Option<&str> {
        use crate::report::StatusTag;
        match status {
            StatusTag::Match => Some(&self.match_color),
            StatusTag::Mismatch => Some(&self.mismatch_color),
            StatusTag::None => None,
        }
    }
}
