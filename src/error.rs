use crate::chart::Planet;

/// A chart payload that cannot be laid out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidChartError {
    #[error("Unknown zodiac sign '{value}' in {field}")]
    UnknownSign { field: String, value: String },

    #[error("Unknown planet '{value}'")]
    UnknownPlanet { value: String },

    #[error("Planet {planet} is listed more than once")]
    DuplicatePlanet { planet: Planet },
}

/// Segmenter profile loading errors
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to parse profile TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse profile YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Profile title #{index} is empty")]
    EmptyTitle { index: usize },

    #[error("Profile field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown built-in theme '{name}'. Available: {available}")]
    UnknownBuiltin { name: String, available: String },

    #[error("Failed to parse theme TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse theme YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid PNG scale: {0}")]
    InvalidScale(f32),

    #[error("Failed to parse SVG: {0}")]
    SvgParse(String),

    #[error("Failed to create {width}x{height} pixmap")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    PngEncode(String),
}
