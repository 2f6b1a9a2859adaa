use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::text::to_text;

/// Field names the rule engine may scan. Wildcard (`*`) rules materialize
/// over exactly this list. The aggregate `qualifications` view stays out so
/// a wildcard keyword is reported once, on the subsection that matched.
pub const SCANNABLE_FIELDS: &[&str] = &[
    "title",
    "locations",
    "date_posted",
    "required_qualifications",
    "preferred_qualifications",
    "other_requirements",
    "pay_ranges",
];

/// Canonical structured representation of one job posting. `id` comes from
/// the source and is the unique key in every store; it is never regenerated
/// locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub date_posted: Option<NaiveDate>,
    /// Original posting-date string, kept for audit even when parsing failed.
    #[serde(default)]
    pub date_posted_raw: Option<String>,
    #[serde(default)]
    pub qualifications: Qualifications,
    #[serde(default)]
    pub pay_ranges: Vec<PayRange>,
    /// Set once, the first time this engine persists the record. Distinct
    /// from `date_posted` and never overwritten afterward.
    #[serde(default)]
    pub discovery_date: Option<NaiveDate>,
    /// Fields the model doesn't name; scanned by rules like any other.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Qualifications {
    #[serde(default)]
    pub required: String,
    #[serde(default)]
    pub preferred: String,
    #[serde(default)]
    pub other: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRange {
    pub region: String,
    pub range: String,
}

impl JobRecord {
    pub fn new(id: impl Into<String>) -> Self {
        JobRecord {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Searchable text for a named field, or `None` for a field this record
    /// doesn't have. Unknown names are the caller's cue to skip, not an error.
    pub fn field_text(&self, field: &str) -> Option<String> {
        let value = match field {
            "title" => json!(self.title),
            "url" => json!(self.url),
            "locations" => json!(self.locations),
            // Rules scan what the source actually said, not the parsed date.
            "date_posted" => json!(self.date_posted_raw.clone().unwrap_or_default()),
            "qualifications" => json!([
                self.qualifications.required,
                self.qualifications.preferred,
                self.qualifications.other,
            ]),
            "required_qualifications" => json!(self.qualifications.required),
            "preferred_qualifications" => json!(self.qualifications.preferred),
            "other_requirements" => json!(self.qualifications.other),
            "pay_ranges" => json!(self.pay_ranges),
            other => self.extra.get(other)?.clone(),
        };
        Some(to_text(&value))
    }

    /// Merge a fresh extraction into this record: a new value overwrites only
    /// when non-empty, so a partial detail-page failure never clobbers good
    /// data. `id` and `discovery_date` are never taken from `new`.
    pub fn merge_from(&mut self, new: &JobRecord) {
        if !new.title.is_empty() {
            self.title = new.title.clone();
        }
        if !new.url.is_empty() {
            self.url = new.url.clone();
        }
        if !new.locations.is_empty() {
            self.locations = new.locations.clone();
        }
        if new.date_posted.is_some() {
            self.date_posted = new.date_posted;
        }
        if new.date_posted_raw.as_deref().is_some_and(|s| !s.is_empty()) {
            self.date_posted_raw = new.date_posted_raw.clone();
        }
        if !new.qualifications.required.is_empty() {
            self.qualifications.required = new.qualifications.required.clone();
        }
        if !new.qualifications.preferred.is_empty() {
            self.qualifications.preferred = new.qualifications.preferred.clone();
        }
        if !new.qualifications.other.is_empty() {
            self.qualifications.other = new.qualifications.other.clone();
        }
        if !new.pay_ranges.is_empty() {
            self.pay_ranges = new.pay_ranges.clone();
        }
        for (k, v) in &new.extra {
            if !value_is_empty(v) {
                self.extra.insert(k.clone(), v.clone());
            }
        }
    }
}

fn value_is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobRecord {
        let mut rec = JobRecord::new("1790412");
        rec.title = "Software Engineer".into();
        rec.url = "https://example.com/job/1790412".into();
        rec.locations = vec!["Redmond, Washington, US".into()];
        rec.qualifications.required = "Python experience.".into();
        rec
    }

    #[test]
    fn field_text_known_fields() {
        let rec = sample();
        assert_eq!(rec.field_text("title").as_deref(), Some("software engineer"));
        assert_eq!(
            rec.field_text("required_qualifications").as_deref(),
            Some("python experience.")
        );
    }

    #[test]
    fn field_text_unknown_field_is_none() {
        assert!(sample().field_text("salary_band").is_none());
    }

    #[test]
    fn field_text_reads_extras() {
        let mut rec = sample();
        rec.extra.insert("travel".into(), json!("0-25 %"));
        assert_eq!(rec.field_text("travel").as_deref(), Some("0-25 %"));
    }

    #[test]
    fn merge_empty_never_erases() {
        let mut stored = sample();
        let mut fresh = JobRecord::new("1790412");
        fresh.title = "Software Engineer II".into();
        // Empty qualifications on the fresh extraction must not clobber.
        stored.merge_from(&fresh);
        assert_eq!(stored.title, "Software Engineer II");
        assert_eq!(stored.qualifications.required, "Python experience.");
        assert_eq!(stored.locations.len(), 1);
    }

    #[test]
    fn merge_keeps_discovery_date() {
        let mut stored = sample();
        stored.discovery_date = NaiveDate::from_ymd_opt(2025, 9, 1);
        let mut fresh = sample();
        fresh.discovery_date = NaiveDate::from_ymd_opt(2025, 9, 9);
        stored.merge_from(&fresh);
        assert_eq!(stored.discovery_date, NaiveDate::from_ymd_opt(2025, 9, 1));
    }

    #[test]
    fn serde_round_trip_keeps_extras() {
        let mut rec = sample();
        rec.extra.insert("profession".into(), json!("Engineering"));
        let blob = serde_json::to_string(&rec).unwrap();
        let back: JobRecord = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, rec);
    }
}
