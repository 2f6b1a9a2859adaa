use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse any run of whitespace (newlines, tabs included) to a single
/// space and trim both ends. Idempotent.
pub fn norm(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

/// `norm` for optional input; `None` yields the empty string.
pub fn norm_opt(s: Option<&str>) -> String {
    norm(s.unwrap_or(""))
}

/// Flatten an arbitrary structured value into a lower-cased searchable blob.
/// Lists join their items with " | "; nested objects are serialized as JSON
/// so keyword rules can scan semi-structured fields uniformly.
pub fn to_text(val: &Value) -> String {
    match val {
        Value::Null => String::new(),
        Value::String(s) => norm(s).to_lowercase(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|x| match x {
                    Value::Object(_) => x.to_string(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            norm(&parts.join(" | ")).to_lowercase()
        }
        Value::Object(_) => norm(&val.to_string()).to_lowercase(),
        other => norm(&other.to_string()).to_lowercase(),
    }
}
