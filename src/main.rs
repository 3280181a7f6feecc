use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kendara::chart::{ChartsPayload, chart_sets};
use kendara::cli::{OutputFormat, load_theme, read_input, write_output};
use kendara::document::{ReportBody, ReportDocument, render_document};
use kendara::fonts::CosmicTextMeasure;
use kendara::report::{SegmenterProfile, segment_legacy, segment_with};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compatibility report: titled factor sections with verdicts
    Porondam,
    /// Heading-delimited reading with bold spans
    Legacy,
}

/// Render an astrology reading as cards, optionally under its charts
#[derive(Parser, Debug)]
#[command(name = "kendara")]
#[command(about = "Render horoscope readings and charts to SVG, PNG or JSON", long_about = None)]
struct Args {
    /// Reading text (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .json)
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// How the reading is segmented
    #[arg(short, long, value_enum, default_value_t = Mode::Porondam)]
    mode: Mode,

    /// Segmenter profile (TOML or YAML) replacing the built-in vocabulary
    #[arg(short, long, value_name = "PROFILE")]
    profile: Option<PathBuf>,

    /// Chart JSON drawn above the reading: one set (d1_chart, d9_chart,
    /// astro_details) or a partner pair (person1, person2)
    #[arg(short, long, value_name = "CHARTS")]
    charts: Option<PathBuf>,

    /// Theme file (YAML or TOML) or built-in theme name
    #[arg(short, long, value_name = "THEME")]
    theme: Option<String>,

    /// Image width in pixels
    #[arg(short, long, default_value_t = 800.0)]
    width: f32,

    /// Raster scale multiplier for PNG output (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,
}

fn main() -> Result<(), String> {
    kendara::logging::init();
    let args = Args::parse();

    // Fail on a bad output path before doing any work
    let format = OutputFormat::from_path(&args.output)?;
    let theme = load_theme(args.theme.as_deref())?;

    let profile = match &args.profile {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read profile file: {}", e))?;
            SegmenterProfile::from_file_content(&content).map_err(|e| e.to_string())?
        }
        None => SegmenterProfile::porondam(),
    };

    let charts = match &args.charts {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read chart file: {}", e))?;
            let payload: ChartsPayload = serde_json::from_str(&content).map_err(|_| {
                "Failed to parse chart JSON: expected d1_chart/d9_chart or person1/person2"
                    .to_string()
            })?;
            chart_sets(&payload).map_err(|e| e.to_string())?
        }
        None => Vec::new(),
    };

    let text = read_input(&args.input)?;
    let body = match args.mode {
        Mode::Porondam => ReportBody::Cards(segment_with(&text, &profile)),
        Mode::Legacy => ReportBody::Legacy(segment_legacy(&text, &profile)),
    };
    if body.is_empty() {
        tracing::warn!("no sections recognized in the reading");
    }

    let document = ReportDocument::new(charts, body);
    write_output(
        &args.output,
        format,
        &document,
        || render_document(&document, &theme, CosmicTextMeasure::new(), args.width),
        args.png_scale,
    )
}
