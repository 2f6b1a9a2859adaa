use regex::RegexBuilder;
use tracing::warn;

use crate::text::norm;

/// Prefix marking a keyword as an explicit regex instead of a plain token.
const REGEX_PREFIX: &str = "re:";

/// Boundary-safe, case-insensitive keyword search.
///
/// Both sides are whitespace-normalized and lower-cased, then the keyword
/// must occur as a whole token or contiguous phrase: the characters adjacent
/// to the match may not be word characters, so "java" never fires inside
/// "javascript" while "c++" and "c#" still match. Keywords starting with
/// `re:` are compiled as case-insensitive regexes over the normalized text.
pub fn matches(haystack: &str, keyword: &str) -> bool {
    if let Some(pattern) = keyword.strip_prefix(REGEX_PREFIX) {
        return regex_matches(haystack, pattern);
    }

    let hay = norm(haystack).to_lowercase();
    let needle = norm(keyword).to_lowercase();
    if needle.is_empty() || hay.is_empty() {
        return false;
    }

    for (start, _) in hay.match_indices(&needle) {
        let before_ok = hay[..start].chars().next_back().map_or(true, |c| !is_word(c));
        let after_ok = hay[start + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !is_word(c));
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn regex_matches(haystack: &str, pattern: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(&norm(haystack)),
        Err(err) => {
            warn!(pattern, %err, "invalid regex keyword; treating as no match");
            false
        }
    }
}
