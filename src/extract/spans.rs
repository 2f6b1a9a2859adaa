use regex::Regex;

/// First match position at or after `start_at` among the candidate patterns,
/// preferring the earliest match across all of them rather than the first
/// pattern in the list. A `start_at` inside a multi-byte character is clamped
/// down to the boundary of the character containing it.
pub fn find_span(text: &str, patterns: &[&Regex], start_at: usize) -> Option<(usize, usize)> {
    if start_at > text.len() {
        return None;
    }
    let mut start_at = start_at;
    while start_at > 0 && !text.is_char_boundary(start_at) {
        start_at -= 1;
    }
    patterns
        .iter()
        .filter_map(|re| {
            re.find(&text[start_at..])
                .map(|m| (start_at + m.start(), start_at + m.end()))
        })
        .min_by_key(|&(s, _)| s)
}

/// Substring beginning after the first `start` match and ending at the
/// nearest of any `ends` match, or end of text when none fires. Used to carve
/// semantically bounded blocks out of long unstructured text.
pub fn slice_between(text: &str, start: &Regex, ends: &[&Regex]) -> String {
    let Some((_, content_start)) = find_span(text, &[start], 0) else {
        return String::new();
    };
    let stop = find_span(text, ends, content_start)
        .map(|(s, _)| s)
        .unwrap_or(text.len());
    text[content_start..stop].trim().to_string()
}
