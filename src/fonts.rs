use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
    is_bold: bool,
}

/// Width and height of a single-line run of text.
pub trait TextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32);
}

/// Shapes text with the system's fonts. Sinhala needs real shaping since
/// conjuncts collapse several code points into one glyph.
pub struct CosmicTextMeasure {
    font_system: FontSystem,
    cache: HashMap<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            cache: HashMap::new(),
        }
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
            is_bold,
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let line_height = font_size * 1.2;
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size,
                line_height,
            },
        );
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new().family(Family::SansSerif).weight(if is_bold {
            Weight::BOLD
        } else {
            Weight::NORMAL
        });
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        // No usable font: fall back to an estimate so wrapping still happens.
        let measured = if width == 0.0 && !text.trim().is_empty() {
            FixedAdvanceMeasure::default().measure_text(text, font_size, is_bold)
        } else {
            (width, height.max(line_height))
        };

        self.cache.insert(key, measured);
        measured
    }
}

/// Font-free measure: every character advances by a fixed fraction of the
/// font size. Deterministic, so layouts are stable across machines.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasure {
    pub advance: f32,
    pub bold_factor: f32,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self {
            advance: 0.55,
            bold_factor: 1.1,
        }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
        let factor = if is_bold { self.bold_factor } else { 1.0 };
        let width = text.chars().count() as f32 * font_size * self.advance * factor;
        (width, font_size * 1.2)
    }
}
