pub mod keywords;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{JobRecord, SCANNABLE_FIELDS};

/// Field name that materializes its keywords over every scannable field.
pub const WILDCARD_FIELD: &str = "*";

/// Keyword lists per field name for one named avoid-rule.
pub type FieldKeywords = IndexMap<String, Vec<String>>;

/// User-authored rule configuration: rule name → field → keywords. Pure
/// data, passed in explicitly; multiple rule sets can run side by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: IndexMap<String, FieldKeywords>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One successful rule/field/keyword match against a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidHit {
    pub rule: String,
    pub field: String,
    pub keyword: String,
    pub record_id: String,
}

/// Evaluate every rule against one record. Each keyword that fires yields
/// one hit; zero hits means the record is kept. Disposition stays with the
/// caller — the hit list says which rule and field triggered and why.
/// Deterministic and order-stable for a given record and rule set.
pub fn evaluate(record: &JobRecord, rules: &RuleSet) -> Vec<AvoidHit> {
    let mut hits = Vec::new();

    for (rule_name, per_field) in &rules.rules {
        for (field, kws) in materialize_fields(per_field) {
            // Unknown field names are schema drift, not errors.
            let Some(blob) = record.field_text(field) else {
                continue;
            };
            if blob.is_empty() {
                continue;
            }
            for kw in kws {
                if keywords::matches(&blob, kw) {
                    hits.push(AvoidHit {
                        rule: rule_name.clone(),
                        field: field.to_string(),
                        keyword: kw.clone(),
                        record_id: record.id.clone(),
                    });
                }
            }
        }
    }

    hits
}

/// Run the whole detailed index through the rule set, producing the filtered
/// store content: id → hits, only for records that had any.
pub fn evaluate_index(
    db: &IndexMap<String, JobRecord>,
    rules: &RuleSet,
) -> IndexMap<String, Vec<AvoidHit>> {
    let mut out = IndexMap::new();
    for (id, rec) in db {
        let hits = evaluate(rec, rules);
        if !hits.is_empty() {
            out.insert(id.clone(), hits);
        }
    }
    debug!(scanned = db.len(), flagged = out.len(), "rule evaluation pass");
    out
}

/// Expand a rule's field map into concrete (field, keywords) pairs, folding
/// wildcard keywords into every scannable field. A keyword listed under both
/// `*` and an explicit field is unioned so each (field, keyword) pair is
/// tested exactly once.
fn materialize_fields(per_field: &FieldKeywords) -> Vec<(&str, Vec<&String>)> {
    let mut out: Vec<(&str, Vec<&String>)> = Vec::new();

    if let Some(wild_kws) = per_field.get(WILDCARD_FIELD) {
        for field in SCANNABLE_FIELDS {
            out.push((field, wild_kws.iter().collect()));
        }
    }
    for (field, kws) in per_field {
        if field == WILDCARD_FIELD {
            continue;
        }
        match out.iter_mut().find(|(f, _)| *f == field.as_str()) {
            Some((_, merged)) => {
                for kw in kws {
                    if !merged.contains(&kw) {
                        merged.push(kw);
                    }
                }
            }
            None => out.push((field.as_str(), kws.iter().collect())),
        }
    }
    out
}
