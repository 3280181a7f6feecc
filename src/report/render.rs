use std::fmt::Write;

use super::types::{Inline, LegacySection, ReportCard};
use crate::fonts::TextMeasure;
use crate::svg::{self, Anchor, TextStyle, push_rect, push_runs, push_text};
use crate::theme::Theme;

/// One wrapped line: runs of text that differ only in weight.
type Line = Vec<(String, bool)>;

/// Stacks report cards and other fragments top to bottom into one SVG page.
pub struct CardRenderer<M: TextMeasure> {
    theme: Theme,
    measure: M,
    width: f32,
    svg_content: String,
    cursor_y: f32,
}

impl<M: TextMeasure> CardRenderer<M> {
    pub fn new(theme: Theme, measure: M, width: f32) -> Self {
        let cursor_y = theme.padding;
        Self {
            theme,
            measure,
            width,
            svg_content: String::new(),
            cursor_y,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Place a pre-rendered fragment, centred horizontally.
    pub fn push_fragment(&mut self, fragment: &str, width: f32, height: f32) {
        let x = ((self.width - width) / 2.0).max(self.theme.padding);
        let _ = write!(
            self.svg_content,
            r#"<g transform="translate({:.2},{:.2})">{}</g>"#,
            x, self.cursor_y, fragment
        );
        self.cursor_y += height + self.theme.card_gap;
    }

    pub fn push_cards(&mut self, cards: &[ReportCard]) {
        for card in cards {
            self.push_card(card);
        }
    }

    pub fn push_sections(&mut self, sections: &[LegacySection]) {
        for section in sections {
            self.push_section(section);
        }
    }

    /// Close the page. Height follows whatever was pushed.
    pub fn finish(self) -> String {
        let height = (self.cursor_y - self.theme.card_gap).max(0.0) + self.theme.padding;
        svg::document(
            &self.svg_content,
            self.width,
            height,
            &self.theme.background_color,
        )
    }

    fn card_left(&self) -> f32 {
        self.theme.padding
    }

    fn card_width(&self) -> f32 {
        (self.width - self.theme.padding * 2.0).max(self.theme.card_padding * 4.0)
    }

    fn inner_width(&self) -> f32 {
        self.card_width() - self.theme.card_padding * 2.0
    }

    fn push_card(&mut self, card: &ReportCard) {
        let theme = self.theme.clone();
        let badge = card.status.badge().zip(theme.status_color(card.status));
        let badge_width = badge
            .map(|(text, _)| {
                self.measure
                    .measure_text(text, theme.font_size_small, true)
                    .0
                    + theme.font_size_small * 1.6
            })
            .unwrap_or(0.0);

        let title_gap = if badge.is_some() {
            theme.card_padding
        } else {
            0.0
        };
        let title_width = self.inner_width() - badge_width - title_gap;
        let title_lines = self.wrap_plain(&card.title, theme.font_size_title, true, title_width);
        let body_width = self.inner_width();
        let body_lines: Vec<Line> = card
            .body_lines
            .iter()
            .flat_map(|line| self.wrap_plain(line, theme.font_size_base, false, body_width))
            .collect();

        let (fill, border, title_color) = if card.is_summary {
            (
                &theme.summary_bg_color,
                &theme.heading_color,
                &theme.heading_color,
            )
        } else {
            (&theme.card_bg_color, &theme.card_border_color, &theme.text_color)
        };

        let mut content = String::new();
        let x = self.card_left() + theme.card_padding;
        let mut y = self.cursor_y + theme.card_padding;
        let title_step = theme.font_size_title * theme.line_height;
        let body_step = theme.font_size_base * theme.line_height;

        if let Some((text, color)) = badge {
            let badge_height = theme.font_size_small * 2.0;
            let badge_x = self.card_left() + self.card_width() - theme.card_padding - badge_width;
            let badge_y = y + (title_step - badge_height) / 2.0;
            push_rect(
                &mut content,
                badge_x,
                badge_y,
                badge_width,
                badge_height,
                badge_height / 2.0,
                color,
                None,
            );
            push_text(
                &mut content,
                badge_x + badge_width / 2.0,
                badge_y + badge_height / 2.0 + theme.font_size_small * 0.35,
                text,
                TextStyle::new(theme.font_size_small, &theme.badge_text_color)
                    .bold()
                    .anchored(Anchor::Middle),
            );
        }

        for line in &title_lines {
            y += title_step;
            push_runs(
                &mut content,
                x,
                y - title_step * 0.3,
                line,
                TextStyle::new(theme.font_size_title, title_color),
            );
        }
        y += theme.font_size_base * 0.5;
        for line in &body_lines {
            y += body_step;
            push_runs(
                &mut content,
                x,
                y - body_step * 0.3,
                line,
                TextStyle::new(theme.font_size_base, &theme.text_color),
            );
        }

        let height = y + theme.card_padding - self.cursor_y;
        let left = self.card_left();
        let card_width = self.card_width();
        push_rect(
            &mut self.svg_content,
            left,
            self.cursor_y,
            card_width,
            height,
            theme.card_radius,
            fill,
            Some((border.as_str(), 1.0)),
        );
        self.svg_content.push_str(&content);
        self.cursor_y += height + theme.card_gap;
    }

    fn push_section(&mut self, section: &LegacySection) {
        let theme = self.theme.clone();
        let width = self.inner_width();
        let title_lines =
            self.wrap_plain(&section.title, theme.font_size_title, true, width);
        let paragraphs: Vec<Vec<Line>> = section
            .paragraphs
            .iter()
            .map(|paragraph| self.wrap_runs(paragraph, theme.font_size_base, width))
            .collect();

        let mut content = String::new();
        let x = self.card_left() + theme.card_padding;
        let mut y = self.cursor_y + theme.card_padding;
        let title_step = theme.font_size_title * theme.line_height;
        let body_step = theme.font_size_base * theme.line_height;

        for line in &title_lines {
            y += title_step;
            push_runs(
                &mut content,
                x,
                y - title_step * 0.3,
                line,
                TextStyle::new(theme.font_size_title, &theme.heading_color),
            );
        }
        for lines in &paragraphs {
            y += theme.font_size_base * 0.5;
            for line in lines {
                y += body_step;
                push_runs(
                    &mut content,
                    x,
                    y - body_step * 0.3,
                    line,
                    TextStyle::new(theme.font_size_base, &theme.text_color),
                );
            }
        }

        let height = y + theme.card_padding - self.cursor_y;
        let left = self.card_left();
        let card_width = self.card_width();
        push_rect(
            &mut self.svg_content,
            left,
            self.cursor_y,
            card_width,
            height,
            theme.card_radius,
            &theme.card_bg_color,
            Some((theme.card_border_color.as_str(), 1.0)),
        );
        self.svg_content.push_str(&content);
        self.cursor_y += height + theme.card_gap;
    }

    fn wrap_plain(&mut self, text: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<Line> {
        let run = if bold {
            Inline::Strong(text.to_string())
        } else {
            Inline::Text(text.to_string())
        };
        self.wrap_runs(&[run], font_size, max_width)
    }

    /// Greedy word wrap across runs. A word wider than the line is broken
    /// between characters.
    fn wrap_runs(&mut self, runs: &[Inline], font_size: f32, max_width: f32) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        let mut current: Line = Vec::new();
        let mut current_width = 0.0;

        for run in runs {
            let bold = run.is_strong();
            for word in run.text().split_inclusive(char::is_whitespace) {
                let visible = word.trim_end();
                let (visible_width, _) = self.measure.measure_text(visible, font_size, bold);

                if current_width + visible_width > max_width && !current.is_empty() {
                    lines.push(finish_line(std::mem::take(&mut current)));
                    current_width = 0.0;
                }

                if visible_width > max_width {
                    for piece in self.break_word(word, font_size, bold, max_width) {
                        if !current.is_empty() {
                            lines.push(finish_line(std::mem::take(&mut current)));
                        }
                        current_width = self.measure.measure_text(&piece, font_size, bold).0;
                        push_piece(&mut current, &piece, bold);
                    }
                    continue;
                }

                if current.is_empty() && visible.is_empty() {
                    continue;
                }
                current_width += self.measure.measure_text(word, font_size, bold).0;
                push_piece(&mut current, word, bold);
            }
        }

        if !current.is_empty() {
            lines.push(finish_line(current));
        }
        lines
    }

    fn break_word(&mut self, word: &str, font_size: f32, bold: bool, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        for ch in word.chars() {
            let mut candidate = current.clone();
            candidate.push(ch);

            let (candidate_width, _) = self.measure.measure_text(&candidate, font_size, bold);
            if candidate_width > max_width && !current.is_empty() {
                pieces.push(current);
                current = ch.to_string();
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }
}

fn push_piece(line: &mut Line, text: &str, bold: bool) {
    match line.last_mut() {
        Some((previous, was_bold)) if *was_bold == bold => previous.push_str(text),
        _ => line.push((text.to_string(), bold)),
    }
}

fn finish_line(mut line: Line) -> Line {
    if let Some((last, _)) = line.last_mut() {
        let trimmed = last.trim_end().len();
        last.truncate(trimmed);
    }
    line.retain(|(text, _)| !text.is_empty());
    line
}
