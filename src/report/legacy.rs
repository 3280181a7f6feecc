use super::profile::SegmenterProfile;
use super::text::non_blank_lines;
use super::types::{Inline, LegacySection, Paragraph};

const STRONG_DELIMITER: &str = "**";

/// Split a heading-delimited reading into titled sections.
///
/// Text before the first heading marker forms its own section.
pub fn segment_legacy(text: &str, profile: &SegmenterProfile) -> Vec<LegacySection> {
    text.split(profile.heading_marker.as_str())
        .filter(|chunk| !chunk.trim().is_empty())
        .filter_map(|chunk| {
            let mut lines = non_blank_lines(chunk);
            let title = lines.next()?.trim().to_string();
            let paragraphs = lines.map(|line| parse_inline(line.trim())).collect();
            Some(LegacySection { title, paragraphs })
        })
        .collect()
}

/// Turn `**bold**` runs into strong spans. Delimiters pair up left to right;
/// an unpaired opener stays literal.
pub fn parse_inline(line: &str) -> Paragraph {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find(STRONG_DELIMITER) {
        let after_open = &rest[open + STRONG_DELIMITER.len()..];
        let Some(close) = after_open.find(STRONG_DELIMITER) else {
            break;
        };

        push_text(&mut spans, &rest[..open]);
        let strong = &after_open[..close];
        if !strong.is_empty() {
            spans.push(Inline::Strong(strong.to_string()));
        }
        rest = &after_open[close + STRONG_DELIMITER.len()..];
    }

    push_text(&mut spans, rest);
    spans
}

fn push_text(spans: &mut Paragraph, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(Inline::Text(previous)) => previous.push_str(text),
        _ => spans.push(Inline::Text(text.to_string())),
    }
}
