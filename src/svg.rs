//! Small SVG building blocks shared by the chart and card renderers.

use std::fmt::Write;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape text for element content or attribute values, dropping characters
/// XML cannot carry.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_valid_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font_size: f32,
    pub fill: &'a str,
    pub bold: bool,
    pub anchor: Anchor,
}

impl<'a> TextStyle<'a> {
    pub fn new(font_size: f32, fill: &'a str) -> Self {
        Self {
            font_size,
            fill,
            bold: false,
            anchor: Anchor::Start,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

pub fn push_text(out: &mut String, x: f32, y: f32, text: &str, style: TextStyle) {
    let weight = if style.bold { r#" font-weight="700""# } else { "" };
    let anchor = match style.anchor {
        Anchor::Start => String::new(),
        other => format!(r#" text-anchor="{}""#, other.as_str()),
    };
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.2}" fill="{}"{}{}>{}</text>"#,
        x,
        y,
        style.font_size,
        style.fill,
        weight,
        anchor,
        escape_xml(text),
    );
}

/// A single text line made of runs that differ only in weight.
pub fn push_runs(out: &mut String, x: f32, y: f32, runs: &[(String, bool)], style: TextStyle) {
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.2}" fill="{}" xml:space="preserve">"#,
        x, y, style.font_size, style.fill,
    );
    for (text, bold) in runs {
        if *bold {
            let _ = write!(out, r#"<tspan font-weight="700">{}</tspan>"#, escape_xml(text));
        } else {
            let _ = write!(out, "<tspan>{}</tspan>", escape_xml(text));
        }
    }
    out.push_str("</text>");
}

#[allow(clippy::too_many_arguments)]
pub fn push_rect(
    out: &mut String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
    fill: &str,
    stroke: Option<(&str, f32)>,
) {
    let stroke_attr = stroke
        .map(|(color, w)| format!(r#" stroke="{}" stroke-width="{:.2}""#, color, w))
        .unwrap_or_default();
    let _ = write!(
        out,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{:.2}" fill="{}"{} />"#,
        x, y, width, height, radius, fill, stroke_attr,
    );
}

/// Wrap a fragment into a standalone document with a solid background.
pub fn document(inner: &str, width: f32, height: f32, background: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="100%" height="100%" fill="{bg}" />{inner}</svg>"#,
        w = width.ceil(),
        h = height.ceil(),
        bg = background,
        inner = inner,
    )
}
