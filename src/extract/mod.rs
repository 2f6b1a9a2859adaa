pub mod locations;
pub mod pay;
pub mod qualifications;
pub mod spans;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use crate::dates::{find_iso_date, parse_date_from};
use crate::pipeline::{JobCard, JobDetail};
use crate::record::JobRecord;
use crate::text::norm;

/// Build a normalized record from a listing card plus its detail payload.
///
/// Every extraction here is best-effort: a missing section or an unparseable
/// date degrades to an empty/absent field and the record still comes back.
pub fn extract_record(card: &JobCard, detail: &JobDetail, today: NaiveDate) -> JobRecord {
    let mut rec = JobRecord::new(card.id.clone());
    rec.title = norm(&card.title);
    rec.url = card.url.clone();

    rec.qualifications = qualifications::split_qualifications(&detail.text);
    rec.pay_ranges = pay::extract_pay_ranges(&detail.text);
    if let Some(block) = &detail.structured {
        rec.locations = locations::extract_locations(block);
    }

    // Card date first, structured block second; the first candidate that
    // parses wins and the first seen raw string is retained for audit.
    let card_raw = Some(norm(card.date_posted_raw.as_deref().unwrap_or(""))).filter(|s| !s.is_empty());
    let structured_raw = detail.structured.as_ref().and_then(structured_date);
    for raw in [&card_raw, &structured_raw].into_iter().flatten() {
        if rec.date_posted_raw.is_none() {
            rec.date_posted_raw = Some(raw.clone());
        }
        match parse_date_from(raw, today) {
            Ok(d) => {
                rec.date_posted = Some(d);
                break;
            }
            Err(err) => {
                // Raw string survives; the canonical date stays absent.
                warn!(id = %rec.id, %err, "posting date did not parse");
            }
        }
    }

    debug!(
        id = %rec.id,
        locations = rec.locations.len(),
        pay_ranges = rec.pay_ranges.len(),
        "extracted record"
    );
    rec
}

/// Posting-date string carried by a JSON-LD block, normalized to `YYYY-MM-DD`.
fn structured_date(block: &Value) -> Option<String> {
    let items: Vec<&Value> = match block {
        Value::Array(a) => a.iter().collect(),
        other => vec![other],
    };
    for item in items {
        let Some(obj) = item.as_object() else { continue };
        for key in ["datePosted", "dateCreated", "dateModified"] {
            if let Some(s) = obj.get(key).and_then(Value::as_str) {
                if let Some(d) = find_iso_date(s) {
                    return Some(d.to_string());
                }
            }
        }
    }
    None
}
