use std::sync::LazyLock;

use regex::Regex;

use super::spans::{find_span, slice_between};
use crate::record::Qualifications;

// Heading markers tolerate a trailing colon or dash and both common wordings.
static REQ_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Required|Minimum)\s+Qualifications\s*[:\-–]?").unwrap()
});
static PREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Preferred|Additional)\s+Qualifications\s*[:\-–]?").unwrap()
});
static OTHER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOther\s+Requirements?\s*[:\-–]?").unwrap());
static PAY_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(typical\s+base\s+pay\s+range|base\s+pay\s+range\s+for\s+this\s+role|benefits\s+and\s+pay\s+information|USD\s*\$\s*[\d,]+\s*-\s*\$\s*[\d,]+)",
    )
    .unwrap()
});

/// Split a qualifications block into required / preferred / other sections.
///
/// Each section runs from its heading to the next recognized heading or end
/// of text; the preferred section additionally stops where pay information
/// begins, when the text has any. Headings may appear in any order or be
/// absent; absent sections come back empty, never as an error.
pub fn split_qualifications(text: &str) -> Qualifications {
    let pay_enders: &[&Regex] = if find_span(text, &[&PAY_START_RE], 0).is_some() {
        &[&PAY_START_RE]
    } else {
        &[]
    };

    let mut required = slice_between(text, &REQ_RE, &[&OTHER_RE, &PREF_RE]);
    let other = slice_between(text, &OTHER_RE, &[&PREF_RE, &REQ_RE]);
    let preferred = slice_between(text, &PREF_RE, pay_enders);

    // Heading present but the slice came up empty: the other headings must
    // precede it, so bound only by the pay section.
    if required.is_empty() && REQ_RE.is_match(text) {
        required = slice_between(text, &REQ_RE, pay_enders);
    }

    Qualifications {
        required,
        preferred,
        other,
    }
}
