use serde_json::Value;

/// `@type` values that mark a job-posting block in embedded structured data.
const POSTING_TYPES: &[&str] = &["JobPosting", "Posting"];

/// Pull the location list out of a parsed JSON-LD block. Accepts a single
/// posting object or an array of them; `jobLocation` may itself be an object
/// or an array. Entries come back as "Locality, Region, Country" with the
/// parts the address actually has, deduplicated in first-seen order.
pub fn extract_locations(block: &Value) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    let items: Vec<&Value> = match block {
        Value::Array(a) => a.iter().collect(),
        other => vec![other],
    };

    for item in items {
        let Some(obj) = item.as_object() else { continue };
        let is_posting = obj
            .get("@type")
            .and_then(Value::as_str)
            .is_some_and(|t| POSTING_TYPES.contains(&t));
        if !is_posting {
            continue;
        }

        let locations: Vec<&Value> = match obj.get("jobLocation") {
            Some(Value::Array(a)) => a.iter().collect(),
            Some(v @ Value::Object(_)) => vec![v],
            _ => continue,
        };

        for loc in locations {
            let Some(addr) = loc.get("address").and_then(Value::as_object) else {
                continue;
            };
            let parts: Vec<&str> = ["addressLocality", "addressRegion", "addressCountry"]
                .iter()
                .filter_map(|k| addr.get(*k).and_then(Value::as_str))
                .filter(|s| !s.is_empty())
                .collect();
            if parts.is_empty() {
                continue;
            }
            let joined = parts.join(", ");
            if !out.contains(&joined) {
                out.push(joined);
            }
        }
    }

    out
}
