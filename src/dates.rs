use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use thiserror::Error;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2})-(\d{2})-(\d{2})").unwrap());
static DAYS_AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:posted\s+)?(\d+)\+?\s+days?\s+ago$").unwrap());

/// The strptime-style formats tried before relative forms, in priority order.
/// First successful parse wins; day-first vs month-first ambiguity is not
/// resolved beyond this fixed ordering.
const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%Y-%m-%d", "%b %d, %Y.", "%B %d, %Y"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable date: {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

/// Parse a posting-date string against today's date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    parse_date_from(raw, chrono::Local::now().date_naive())
}

/// Parse a posting-date string against an explicit reference date.
///
/// Accepts absolute forms ("Sep 03, 2025", "2025-09-03", "September 3, 2025")
/// and relative forms ("today", "yesterday", "Posted 3 days ago"). Returns a
/// typed failure on a total miss; callers keep the raw string for audit.
pub fn parse_date_from(raw: &str, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DateParseError { raw: raw.to_string() });
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    if s.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    if s.eq_ignore_ascii_case("yesterday") {
        return Ok(today - Duration::days(1));
    }
    if let Some(caps) = DAYS_AGO_RE.captures(s) {
        if let Ok(n) = caps[1].parse::<i64>() {
            return Ok(today - Duration::days(n));
        }
    }

    Err(DateParseError { raw: raw.to_string() })
}

/// Pull the first `20YY-MM-DD` out of a longer string, e.g. a JSON-LD
/// `datePosted` timestamp like "2025-09-03T08:00:00Z".
pub fn find_iso_date(text: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE_RE.captures(text)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}
