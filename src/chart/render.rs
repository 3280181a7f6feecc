use std::fmt::Write;

use serde::Serialize;

use super::details::AstroDetails;
use super::layout::layout_payload;
use super::payload::{ChartSetPayload, ChartsPayload};
use super::types::{ChartKind, HouseEntry, HouseGrid, LAGNA_MARKER, ZodiacSign};
use crate::error::InvalidChartError;
use crate::svg::{Anchor, TextStyle, push_rect, push_text};
use crate::theme::Theme;

const GRID_CELLS: f32 = 4.0;
const TOKENS_PER_ROW: usize = 3;
const PERSON_HEADINGS: [&str; 2] = ["පළමු පාර්ශවය", "දෙවන පාර්ශවය"];

/// Both charts of one person plus the details listed beneath them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSet {
    /// Drawn above the charts when a page shows more than one person
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub d1: HouseGrid,
    pub d9: HouseGrid,
    pub details: AstroDetails,
}

impl ChartSet {
    pub fn from_payload(payload: &ChartSetPayload) -> Result<Self, InvalidChartError> {
        Ok(Self {
            heading: None,
            d1: layout_payload(&payload.d1_chart)?,
            d9: layout_payload(&payload.d9_chart)?,
            details: payload
                .astro_details
                .as_ref()
                .map(AstroDetails::from_value)
                .unwrap_or_default(),
        })
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }
}

/// Lay out every chart set in the input, partners in order.
pub fn chart_sets(payload: &ChartsPayload) -> Result<Vec<ChartSet>, InvalidChartError> {
    match payload {
        ChartsPayload::Single(set) => Ok(vec![ChartSet::from_payload(set)?]),
        ChartsPayload::Pair(pair) => [&pair.person1, &pair.person2]
            .into_iter()
            .zip(PERSON_HEADINGS)
            .map(|(set, heading)| ChartSet::from_payload(set).map(|s| s.with_heading(heading)))
            .collect(),
    }
}

/// Row and column of a sign's box. Signs keep fixed boxes; the four
/// centre cells are left to the centre box.
pub fn grid_position(sign: ZodiacSign) -> (usize, usize) {
    use ZodiacSign::*;
    match sign {
        Pisces => (0, 0),
        Aries => (0, 1),
        Taurus => (0, 2),
        Gemini => (0, 3),
        Aquarius => (1, 0),
        Cancer => (1, 3),
        Capricorn => (2, 0),
        Leo => (2, 3),
        Sagittarius => (3, 0),
        Scorpio => (3, 1),
        Libra => (3, 2),
        Virgo => (3, 3),
    }
}

/// Text drawn inside a box: the lagna marker first, then planet
/// abbreviations in input order.
pub fn cell_tokens(entry: &HouseEntry) -> Vec<&'static str> {
    let marker = entry.is_ascendant.then_some(LAGNA_MARKER);
    marker
        .into_iter()
        .chain(entry.occupying_planets.iter().map(|p| p.abbreviation()))
        .collect()
}

fn title_height(theme: &Theme) -> f32 {
    theme.font_size_title * theme.line_height
}

/// Render one chart as an SVG fragment anchored at the origin.
///
/// Returns the fragment with its width and height.
pub fn render_chart(grid: &HouseGrid, kind: ChartKind, theme: &Theme) -> (String, f32, f32) {
    let cell = theme.cell_size;
    let top = title_height(theme);
    let size = cell * GRID_CELLS;
    let mut out = String::new();

    push_text(
        &mut out,
        size / 2.0,
        theme.font_size_title,
        kind.title(),
        TextStyle::new(theme.font_size_title, &theme.heading_color)
            .bold()
            .anchored(Anchor::Middle),
    );

    for entry in grid.houses() {
        let (row, col) = grid_position(entry.sign);
        let x = col as f32 * cell;
        let y = top + row as f32 * cell;
        push_house(&mut out, entry, x, y, theme);
    }

    push_rect(
        &mut out,
        cell,
        top + cell,
        cell * 2.0,
        cell * 2.0,
        0.0,
        &theme.center_fill_color,
        Some((theme.grid_line_color.as_str(), 1.0)),
    );
    let centre_y = top + cell * 2.0;
    push_text(
        &mut out,
        size / 2.0,
        centre_y,
        grid.ascendant().sign.label(),
        TextStyle::new(theme.font_size_title, &theme.heading_color)
            .bold()
            .anchored(Anchor::Middle),
    );
    push_text(
        &mut out,
        size / 2.0,
        centre_y + theme.font_size_base * theme.line_height,
        kind.subtitle(),
        TextStyle::new(theme.font_size_base, &theme.muted_color).anchored(Anchor::Middle),
    );

    (out, size, top + size)
}

fn push_house(out: &mut String, entry: &HouseEntry, x: f32, y: f32, theme: &Theme) {
    let cell = theme.cell_size;
    let fill = if entry.is_ascendant {
        &theme.lagna_fill_color
    } else {
        &theme.cell_fill_color
    };
    push_rect(
        out,
        x,
        y,
        cell,
        cell,
        0.0,
        fill,
        Some((theme.grid_line_color.as_str(), 1.0)),
    );

    let inset = theme.font_size_small * 0.5;
    let small = TextStyle::new(theme.font_size_small, &theme.muted_color);
    push_text(
        out,
        x + inset,
        y + inset + theme.font_size_small,
        entry.sign.label(),
        small,
    );
    push_text(
        out,
        x + cell - inset,
        y + inset + theme.font_size_small,
        &entry.house_number.to_string(),
        small.anchored(Anchor::End),
    );

    let tokens = cell_tokens(entry);
    let row_height = theme.font_size_base * 1.3;
    let first_baseline = y + cell * 0.5 + theme.font_size_base * 0.35;
    for (i, row) in tokens.chunks(TOKENS_PER_ROW).enumerate() {
        let baseline = first_baseline + i as f32 * row_height;
        let slot = cell / (row.len() + 1) as f32;
        for (j, token) in row.iter().enumerate() {
            let is_marker = entry.is_ascendant && i == 0 && j == 0;
            let style = if is_marker {
                TextStyle::new(theme.font_size_base, &theme.heading_color).bold()
            } else {
                TextStyle::new(theme.font_size_base, &theme.planet_color)
            };
            push_text(
                out,
                x + slot * (j + 1) as f32,
                baseline,
                token,
                style.anchored(Anchor::Middle),
            );
        }
    }
}

/// D1 and D9 side by side with the details list below, under the set's
/// heading when it has one.
pub fn render_chart_set(set: &ChartSet, theme: &Theme) -> (String, f32, f32) {
    let (d1, d1_width, d1_height) = render_chart(&set.d1, ChartKind::Rasi, theme);
    let (d9, d9_width, d9_height) = render_chart(&set.d9, ChartKind::Navamsa, theme);
    let gap = theme.padding;
    let width = d1_width + gap + d9_width;

    let mut out = String::new();
    let top = match &set.heading {
        Some(heading) => {
            push_text(
                &mut out,
                0.0,
                theme.font_size_title,
                heading,
                TextStyle::new(theme.font_size_title, &theme.text_color).bold(),
            );
            title_height(theme) + gap / 2.0
        }
        None => 0.0,
    };

    let _ = write!(
        out,
        r#"<g transform="translate(0,{:.2})">{}</g>"#,
        top, d1
    );
    let _ = write!(
        out,
        r#"<g transform="translate({:.2},{:.2})">{}</g>"#,
        d1_width + gap,
        top,
        d9
    );

    let mut height = top + d1_height.max(d9_height);

    if !set.details.is_empty() {
        let line = theme.font_size_base * theme.line_height;
        height += gap;
        for row in &set.details.rows {
            height += line;
            push_text(
                &mut out,
                0.0,
                height - line * 0.3,
                &format!("{}: ", row.label),
                TextStyle::new(theme.font_size_base, &theme.muted_color),
            );
            push_text(
                &mut out,
                width / 2.0,
                height - line * 0.3,
                &row.value,
                TextStyle::new(theme.font_size_base, &theme.text_color).bold(),
            );
        }
    }

    (out, width, height)
}

/// Chart sets stacked top to bottom.
pub fn render_chart_sets(sets: &[ChartSet], theme: &Theme) -> (String, f32, f32) {
    let mut out = String::new();
    let mut width: f32 = 0.0;
    let mut height: f32 = 0.0;

    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            height += theme.padding * 1.5;
        }
        let (fragment, w, h) = render_chart_set(set, theme);
        let _ = write!(
            out,
            r#"<g transform="translate(0,{:.2})">{}</g>"#,
            height, fragment
        );
        width = width.max(w);
        height += h;
    }

    (out, width, height)
}
