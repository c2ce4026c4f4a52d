use serde_json::Value;

use super::icon;
use super::{Record, ResourceType};

/// Borrowed view over the candidate fields we consume. Missing or mistyped fields are `None`.
struct RawCandidate<'a> {
    en: Option<&'a str>,
    icon: Option<&'a str>,
    kind: Option<&'a str>,
    id: Option<i64>,
    description: Option<&'a str>,
}

impl<'a> RawCandidate<'a> {
    fn from_value(v: &'a Value) -> Self {
        Self {
            en: v.get("en").and_then(Value::as_str),
            icon: v.get("icon").and_then(Value::as_str),
            kind: v.get("type").and_then(Value::as_str),
            id: v.get("id").and_then(Value::as_i64),
            description: v.get("description").and_then(|d| d.get("en")).and_then(Value::as_str),
        }
    }
}

/// Build a `Record` from the first search candidate. Never fails.
pub fn normalize(raw: &Value, kind: ResourceType, fallback_name: &str) -> Record {
    let c = RawCandidate::from_value(raw);
    let icon_path = c.icon.unwrap_or("");

    let resource_type = match kind.forced_record_type() {
        Some(forced) => forced.to_string(),
        None => c.kind.unwrap_or("").to_string(),
    };

    Record {
        name: c.en.unwrap_or(fallback_name).to_string(),
        icon_id: icon::icon_id(icon_path),
        resource_type,
        numeric_id: c.id.unwrap_or(0),
        icon_url: icon::icon_url(icon_path),
        description: c.description.unwrap_or(kind.default_description()).to_string(),
    }
}
