use std::sync::LazyLock;

use regex::Regex;

use crate::record::PayRange;

static USD_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)USD\s*\$\s*[\d,]+\s*-\s*\$\s*[\d,]+").unwrap());
static METRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)San\s*Francisco\s*Bay|New\s*York\s*City").unwrap());

/// Label used when the surrounding text names no narrower region.
const DEFAULT_REGION: &str = "U.S.";
/// How far around a range match to look for a region marker.
const CONTEXT_CHARS: usize = 140;

/// Find every currency-range substring and pair it with a region label read
/// from the nearby text. Order follows the source text; exact
/// (region, range) duplicates are collapsed.
pub fn extract_pay_ranges(text: &str) -> Vec<PayRange> {
    let mut out: Vec<PayRange> = Vec::new();
    for m in USD_RANGE_RE.find_iter(text) {
        let ctx_start = floor_char_boundary(text, m.start().saturating_sub(CONTEXT_CHARS));
        let ctx_end = ceil_char_boundary(text, (m.end() + CONTEXT_CHARS).min(text.len()));
        let ctx = &text[ctx_start..ctx_end];

        let region = if METRO_RE.is_match(ctx) {
            "SF Bay Area / NYC"
        } else {
            DEFAULT_REGION
        };

        let entry = PayRange {
            region: region.to_string(),
            range: m.as_str().to_string(),
        };
        if !out.contains(&entry) {
            out.push(entry);
        }
    }
    out
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
