//! Input and output plumbing shared by the binaries.

use std::path::Path;

use serde::Serialize;

use crate::raster::svg_to_png;
use crate::theme::Theme;

/// Read a file, or stdin when the path is "-".
pub fn read_input(path: &Path) -> Result<String, String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))
    }
}

/// A theme argument names either a file (TOML or YAML) or a built-in theme.
pub fn load_theme(arg: Option<&str>) -> Result<Theme, String> {
    let Some(arg) = arg else {
        return Ok(Theme::default());
    };

    let path = Path::new(arg);
    if path.is_file() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        Theme::from_file_content(&content).map_err(|e| e.to_string())
    } else {
        Theme::from_builtin(arg).map_err(|e| e.to_string())
    }
}

/// Output format chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or("Output file has no extension")?
            .to_ascii_lowercase();

        match ext.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unsupported output format: .{} (use .svg, .png or .json)",
                ext
            )),
        }
    }
}

/// Write `model` as JSON, or the SVG produced by `render` as SVG or PNG.
pub fn write_output<T, F>(
    path: &Path,
    format: OutputFormat,
    model: &T,
    render: F,
    png_scale: f32,
) -> Result<(), String>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Svg => {
            std::fs::write(path, render()).map_err(|e| format!("Failed to write SVG: {}", e))?;
            tracing::info!("SVG saved to: {}", path.display());
        }
        OutputFormat::Png => {
            let png_data = svg_to_png(&render(), png_scale).map_err(|e| e.to_string())?;
            std::fs::write(path, png_data).map_err(|e| format!("Failed to write PNG: {}", e))?;
            tracing::info!("PNG saved to: {}", path.display());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(model)
                .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
            std::fs::write(path, json).map_err(|e| format!("Failed to write JSON: {}", e))?;
            tracing::info!("JSON saved to: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.SVG")),
            Ok(OutputFormat::Svg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b.json")),
            Ok(OutputFormat::Json)
        );
        assert!(OutputFormat::from_path(Path::new("out.pdf"))
            .unwrap_err()
            .contains(".pdf"));
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn theme_argument_falls_back_to_builtins() {
        assert_eq!(load_theme(None).unwrap(), Theme::default());
        assert_eq!(
            load_theme(Some("parchment")).unwrap(),
            Theme::from_builtin("parchment").unwrap()
        );
        assert!(load_theme(Some("no-such-theme")).is_err());
    }

    #[test]
    fn theme_argument_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.yaml");
        std::fs::write(&path, "heading_color: \"#123456\"\n").unwrap();

        let theme = load_theme(path.to_str()).unwrap();
        assert_eq!(theme.heading_color, "#123456");
    }
}
