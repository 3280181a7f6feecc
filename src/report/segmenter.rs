use super::profile::SegmenterProfile;
use super::text::{
    collapse_whitespace, is_line_start, non_blank_lines, remove_status_token, strip_chars,
};
use super::types::{ReportCard, StatusTag};

/// A recognized title occurrence within the main part of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TitleMatch {
    /// Byte offset where the section begins, leading emphasis included
    start: usize,
    /// Byte offset just past the title text
    end: usize,
}

/// Segment a reading using the default marker rules and `known_titles`.
pub fn segment(text: &str, known_titles: &[&str]) -> Vec<ReportCard> {
    let profile = SegmenterProfile::default().with_titles(known_titles.iter().copied());
    segment_with(text, &profile)
}

/// Segment a reading into section cards plus an optional summary card.
///
/// Unrecognized structure never fails: text without known titles yields no
/// section cards.
pub fn segment_with(text: &str, profile: &SegmenterProfile) -> Vec<ReportCard> {
    let (main_part, summary_part) = split_summary(text, &profile.summary_marker);
    let matches = find_titles(main_part, profile);

    tracing::debug!(
        titles = matches.len(),
        has_summary = summary_part.is_some(),
        "segmenting reading"
    );

    let mut cards = Vec::with_capacity(matches.len() + 1);
    for (i, title_match) in matches.iter().enumerate() {
        let end = matches
            .get(i + 1)
            .map_or(main_part.len(), |next| next.start);
        let section = &main_part[title_match.start..end];

        match parse_section(section, title_match.end - title_match.start, profile) {
            Some(card) => cards.push(card),
            None => tracing::warn!(
                title = &main_part[title_match.start..title_match.end],
                "dropping section without body"
            ),
        }
    }

    if let Some(card) = summary_part.and_then(|summary| summary_card(summary, profile)) {
        cards.push(card);
    }

    cards
}

/// Split at the first summary marker: (main part, text after the marker).
fn split_summary<'a>(text: &'a str, marker: &str) -> (&'a str, Option<&'a str>) {
    if marker.is_empty() {
        return (text, None);
    }
    match text.find(marker) {
        Some(idx) => (&text[..idx], Some(&text[idx + marker.len()..])),
        None => (text, None),
    }
}

fn find_titles(text: &str, profile: &SegmenterProfile) -> Vec<TitleMatch> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        if let Some(found) = match_title_at(text, pos, profile) {
            matches.push(found);
            pos = found.end;
            continue;
        }
        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }

    matches
}

/// A title begins a section when one or two emphasis markers sit right
/// before it, or when it opens a line.
fn match_title_at(text: &str, pos: usize, profile: &SegmenterProfile) -> Option<TitleMatch> {
    let marker = profile.emphasis_marker;
    let lead = text[pos..].chars().take_while(|&c| c == marker).count();

    let title_pos = match lead {
        0 if is_line_start(text, pos) => pos,
        1 | 2 => pos + lead * marker.len_utf8(),
        _ => return None,
    };

    let rest = &text[title_pos..];
    let title = profile
        .titles
        .iter()
        .filter(|title| !title.is_empty() && rest.starts_with(title.as_str()))
        .filter(|title| {
            rest[title.len()..]
                .chars()
                .next()
                .is_none_or(|c| profile.is_title_terminator(c))
        })
        .max_by_key(|title| title.len())?;

    Some(TitleMatch {
        start: pos,
        end: title_pos + title.len(),
    })
}

/// `title_end` is the byte offset just past the title text within `section`.
fn parse_section(
    section: &str,
    title_end: usize,
    profile: &SegmenterProfile,
) -> Option<ReportCard> {
    let mut lines = non_blank_lines(section);
    let title_line = lines.next()?;
    let keywords = profile.status_keywords();

    let body_lines: Vec<String> = lines
        .map(|line| {
            let stripped = strip_chars(line, &[profile.emphasis_marker]);
            remove_status_token(&stripped, &keywords).trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();

    if body_lines.is_empty() {
        return None;
    }

    Some(ReportCard {
        title: clean_title(title_line, title_end, profile),
        status: detect_status(section, profile),
        body_lines,
        is_summary: false,
    })
}

/// The status token is only looked for after the title text, so a title
/// that contains a keyword keeps it.
fn clean_title(line: &str, title_end: usize, profile: &SegmenterProfile) -> String {
    let split = if line.is_char_boundary(title_end) {
        title_end
    } else {
        line.len()
    };
    let (head, tail) = line.split_at(split);
    let markup = [profile.emphasis_marker, profile.label_separator];

    let mut cleaned = strip_chars(head, &markup);
    cleaned.push_str(&remove_status_token(
        &strip_chars(tail, &markup),
        &profile.status_keywords(),
    ));
    let trimmed = cleaned
        .trim()
        .trim_end_matches(|c| profile.title_terminators.contains(&c));
    collapse_whitespace(trimmed)
}

/// Verdict for a whole section. The mismatch keyword is checked first since
/// it may contain the match keyword.
fn detect_status(section: &str, profile: &SegmenterProfile) -> StatusTag {
    if section.contains(profile.mismatch_keyword.as_str()) {
        StatusTag::Mismatch
    } else if section.contains(profile.match_keyword.as_str()) {
        StatusTag::Match
    } else {
        StatusTag::None
    }
}

fn summary_card(summary: &str, profile: &SegmenterProfile) -> Option<ReportCard> {
    if summary.trim().is_empty() {
        return None;
    }

    let body_lines: Vec<String> = non_blank_lines(summary)
        .map(|line| {
            strip_chars(line, &[profile.emphasis_marker, profile.label_separator])
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();

    if body_lines.is_empty() {
        return None;
    }

    Some(ReportCard {
        title: profile.summary_title.clone(),
        status: StatusTag::None,
        body_lines,
        is_summary: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_titled_sections_with_verdicts() {
        let cards = segment(
            "**Title A:** ගැලපේ\nline1\n**Title B.** නොගැලපේ\nline2",
            &["Title A", "Title B"],
        );

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Title A");
        assert_eq!(cards[0].status, StatusTag::Match);
        assert_eq!(cards[0].body_lines, ["line1"]);
        assert_eq!(cards[1].title, "Title B");
        assert_eq!(cards[1].status, StatusTag::Mismatch);
        assert_eq!(cards[1].body_lines, ["line2"]);
    }

    #[test]
    fn summary_without_titles() {
        let cards = segment("…text…සාරාංශය\nsummary line", &[]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "සාරාංශය");
        assert_eq!(cards[0].status, StatusTag::None);
        assert_eq!(cards[0].body_lines, ["summary line"]);
        assert!(cards[0].is_summary);
    }

    #[test]
    fn unrecognized_text_yields_nothing() {
        assert!(segment("just some prose\nwith lines", &["Title A"]).is_empty());
        assert!(segment("", &["Title A"]).is_empty());
    }

    #[test]
    fn leading_text_is_discarded() {
        let cards = segment("Preamble line\n**Love:** fine\nbody", &["Love"]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Love fine");
        assert_eq!(cards[0].body_lines, ["body"]);
    }

    #[test]
    fn bare_title_at_line_start_is_recognized() {
        let cards = segment("Love: ගැලපේ\nwarm\nCareer\nsteady", &["Love", "Career"]);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Love");
        assert_eq!(cards[0].status, StatusTag::Match);
        assert_eq!(cards[1].title, "Career");
        assert_eq!(cards[1].body_lines, ["steady"]);
    }

    #[test]
    fn title_mentioned_in_prose_does_not_split() {
        let cards = segment("**Love:**\nthis affects Career too\n", &["Love", "Career"]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].body_lines, ["this affects Career too"]);
    }

    #[test]
    fn title_must_be_followed_by_separator() {
        let cards = segment("**Lovely day**\ntext", &["Love"]);
        assert!(cards.is_empty());
    }

    #[test]
    fn three_markers_still_match_from_the_inner_pair() {
        let cards = segment("***Love:**\nbody", &["Love"]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Love");
    }

    #[test]
    fn longest_title_wins_at_same_position() {
        let cards = segment("**Moon sign:**\nA\n", &["Moon", "Moon sign"]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Moon sign");
    }

    #[test]
    fn section_without_body_is_dropped() {
        let cards = segment("**Love:** ගැලපේ\n**Career:**\nsteady", &["Love", "Career"]);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Career");
    }

    #[test]
    fn body_lines_lose_emphasis_and_annotation() {
        let cards = segment(
            "**Love:**\n**Result** (නොගැලපේ) for now\n\n  *calm*  \n",
            &["Love"],
        );
        assert_eq!(cards[0].status, StatusTag::Mismatch);
        assert_eq!(cards[0].body_lines, ["Result  for now", "calm"]);
    }

    #[test]
    fn title_containing_a_keyword_keeps_it() {
        let profile = SegmenterProfile {
            match_keyword: "good".to_string(),
            mismatch_keyword: "not good".to_string(),
            ..SegmenterProfile::default()
        }
        .with_titles(["goodwill"]);

        let cards = segment_with("**goodwill:** good
steady trust", &profile);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "goodwill");
        assert_eq!(cards[0].status, StatusTag::Match);
        assert_eq!(cards[0].body_lines, vec!["steady trust"]);
    }

    #[test]
    fn keyword_search_covers_the_whole_section() {
        // A mismatch mentioned anywhere wins over a match on the title line.
        let cards = segment(
            "**Love:** ගැලපේ\nearlier readings said නොගැලපේ\n",
            &["Love"],
        );
        assert_eq!(cards[0].status, StatusTag::Mismatch);
    }

    #[test]
    fn summary_splits_at_first_marker_only() {
        let text = "**Love:**\nwarm\nසාරාංශය\n**Overall:** good\nසාරාංශය again";
        let cards = segment(text, &["Love"]);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].body_lines, ["Overall good", "සාරාංශය again"]);
    }

    #[test]
    fn blank_summary_is_skipped() {
        let cards = segment("**Love:**\nwarm\nසාරාංශය\n  \n", &["Love"]);
        assert_eq!(cards.len(), 1);
        assert!(!cards[0].is_summary);
    }

    #[test]
    fn porondam_reading_end_to_end() {
        let text = "\
ඔබ දෙදෙනාගේ පොරොන්දම් විස්තරය.

**නැකැත් පොරොන්දම:** ගැලපේ
නැකැත් දෙක අතර හොඳ සම්බන්ධයක් ඇත.

**ගණ පොරොන්දම:** (නොගැලපේ)
ගණ දෙක වෙනස් වේ.

**රාශි පොරොන්දම.**
රාශි පිහිටීම සාමාන්‍යයි.

**සාරාංශය:**
මුළු ලකුණු: 14/20
";
        let cards = segment_with(text, &SegmenterProfile::porondam());
        assert_eq!(cards.len(), 4);

        assert_eq!(cards[0].title, "නැකැත් පොරොන්දම");
        assert_eq!(cards[0].status, StatusTag::Match);
        assert_eq!(cards[1].title, "ගණ පොරොන්දම");
        assert_eq!(cards[1].status, StatusTag::Mismatch);
        assert_eq!(cards[2].title, "රාශි පොරොන්දම");
        assert_eq!(cards[2].status, StatusTag::None);

        assert!(cards[3].is_summary);
        assert_eq!(cards[3].body_lines, ["මුළු ලකුණු 14/20"]);
    }

    #[test]
    fn segmentation_is_deterministic() {
        let text = "**Love:** ගැලපේ\nwarm\n**Career:**\nsteady\nසාරාංශය\nok";
        assert_eq!(segment(text, &["Love", "Career"]), segment(text, &["Love", "Career"]));
    }
}
