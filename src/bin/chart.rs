use std::path::PathBuf;

use clap::Parser;
use kendara::chart::{
    ChartKind, ChartPayload, ChartSet, ChartsPayload, HouseGrid, chart_sets, layout_payload,
    render_chart, render_chart_sets,
};
use kendara::cli::{OutputFormat, load_theme, read_input, write_output};
use kendara::svg;
use serde::{Deserialize, Serialize};

/// Standalone chart renderer (SVG/PNG/JSON)
#[derive(Parser, Debug)]
#[command(name = "kendara-chart")]
#[command(version)]
#[command(about = "Render D1/D9 horoscope charts to SVG, PNG or JSON", long_about = None)]
struct Args {
    /// Partner pair, chart set or single chart JSON (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .json)
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Theme file (YAML or TOML) or built-in theme name
    #[arg(short, long, value_name = "THEME")]
    theme: Option<String>,

    /// Raster scale multiplier for PNG output
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Padding around the charts in pixels
    #[arg(long, default_value_t = 20.0)]
    padding: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChartInput {
    Sets(ChartsPayload),
    Single(ChartPayload),
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChartOutput {
    Set(ChartSet),
    Pair(Vec<ChartSet>),
    Single(HouseGrid),
}

fn main() -> Result<(), String> {
    kendara::logging::init();
    let args = Args::parse();

    let format = OutputFormat::from_path(&args.output)?;
    let theme = load_theme(args.theme.as_deref())?;

    let source = read_input(&args.input)?;
    let input: ChartInput = serde_json::from_str(&source).map_err(|_| {
        "Failed to parse chart JSON: expected person1/person2, d1_chart/d9_chart or lagna/planets"
            .to_string()
    })?;

    let output = match input {
        ChartInput::Sets(ChartsPayload::Single(payload)) => {
            ChartOutput::Set(ChartSet::from_payload(&payload).map_err(|e| e.to_string())?)
        }
        ChartInput::Sets(payload) => {
            ChartOutput::Pair(chart_sets(&payload).map_err(|e| e.to_string())?)
        }
        ChartInput::Single(payload) => {
            ChartOutput::Single(layout_payload(&payload).map_err(|e| e.to_string())?)
        }
    };

    let render = || {
        let (inner, width, height) = match &output {
            ChartOutput::Set(set) => render_chart_sets(std::slice::from_ref(set), &theme),
            ChartOutput::Pair(sets) => render_chart_sets(sets, &theme),
            ChartOutput::Single(grid) => render_chart(grid, ChartKind::Rasi, &theme),
        };
        let padded = format!(
            r#"<g transform="translate({:.2},{:.2})">{}</g>"#,
            args.padding, args.padding, inner
        );
        svg::document(
            &padded,
            width + args.padding * 2.0,
            height + args.padding * 2.0,
            &theme.background_color,
        )
    };

    write_output(&args.output, format, &output, render, args.png_scale)
}
