//! Line and marker utilities shared by both segmentation modes.

/// Lines that contain something other than whitespace.
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

pub fn strip_chars(text: &str, chars: &[char]) -> String {
    text.chars().filter(|c| !chars.contains(c)).collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when only whitespace separates `pos` from the previous newline.
pub fn is_line_start(text: &str, pos: usize) -> bool {
    let line_start = text[..pos].rfind('\n').map_or(0, |idx| idx + 1);
    text[line_start..pos].chars().all(char::is_whitespace)
}

/// Remove the first verdict keyword in `line`, along with parentheses
/// wrapped directly around it.
///
/// When keywords overlap (one contains the other) the one starting earliest
/// wins, then the longest.
pub fn remove_status_token(line: &str, keywords: &[&str]) -> String {
    let found = keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .filter_map(|keyword| line.find(keyword).map(|idx| (idx, keyword.len())))
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let Some((start, len)) = found else {
        return line.to_string();
    };

    let mut from = start;
    let mut to = start + len;
    if line[..from].ends_with('(') {
        from -= 1;
    }
    if line[to..].starts_with(')') {
        to += 1;
    }

    let mut cleaned = String::with_capacity(line.len());
    cleaned.push_str(&line[..from]);
    cleaned.push_str(&line[to..]);
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH: &str = "ගැලපේ";
    const MISMATCH: &str = "නොගැලපේ";

    #[test]
    fn blank_lines_are_skipped() {
        let lines: Vec<_> = non_blank_lines("a\n\n  \r\nb\r\n\t\nc").collect();
        assert_eq!(lines, ["a", "b", "c"]);
    }

    #[test]
    fn line_start_ignores_indentation() {
        let text = "intro\n   Title here";
        assert!(is_line_start(text, 0));
        assert!(is_line_start(text, text.find("Title").unwrap()));
        assert!(!is_line_start(text, text.find("here").unwrap()));
    }

    #[test]
    fn status_token_with_parentheses_is_removed() {
        assert_eq!(
            remove_status_token("ප්‍රතිඵලය (ගැලපේ) වේ", &[MATCH, MISMATCH]),
            "ප්‍රතිඵලය  වේ"
        );
    }

    #[test]
    fn mismatch_token_is_removed_whole() {
        assert_eq!(
            remove_status_token("නොගැලපේ - අඩු ලකුණු", &[MATCH, MISMATCH]),
            " - අඩු ලකුණු"
        );
        assert_eq!(remove_status_token("(නොගැලපේ)", &[MISMATCH, MATCH]), "");
    }

    #[test]
    fn only_first_token_is_removed() {
        assert_eq!(
            remove_status_token("ගැලපේ සහ ගැලපේ", &[MATCH, MISMATCH]),
            " සහ ගැලපේ"
        );
    }

    #[test]
    fn line_without_token_is_unchanged() {
        assert_eq!(remove_status_token("plain", &[MATCH, MISMATCH]), "plain");
    }

    #[test]
    fn strip_and_collapse() {
        assert_eq!(strip_chars("**Title:**", &['*', ':']), "Title");
        assert_eq!(collapse_whitespace("  a \t b  "), "a b");
    }
}
