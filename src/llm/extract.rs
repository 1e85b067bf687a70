//! Best-effort recovery of a JSON object from model output
//!
//! Recovery is two-tiered: the whole response is parsed first; failing that,
//! the span from the first `{` to the last `}` is parsed. Anything else
//! yields `None`. Only JSON objects count as a successful parse.

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// A recovered JSON object
pub type StructuredObject = Map<String, Value>;

fn parse_object(text: &str) -> Option<StructuredObject> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Recovers the JSON object embedded in `raw`, if there is one
pub fn parse_structured(raw: &str) -> Option<StructuredObject> {
    if let Some(map) = parse_object(raw) {
        return Some(map);
    }

    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        warn!(
            response_length = raw.len(),
            "No JSON object delimiters in model output"
        );
        return None;
    };

    if start >= end {
        warn!("Mismatched JSON object delimiters in model output");
        return None;
    }

    debug!(start, end, "Retrying JSON parse on bracketed slice");
    let recovered = parse_object(&raw[start..=end]);
    if recovered.is_none() {
        warn!(
            preview = %raw.chars().take(100).collect::<String>(),
            "Could not recover JSON object from model output"
        );
    }
    recovered
}

/// Like [`parse_structured`], but degrades to an empty object
pub fn parse_structured_or_empty(raw: &str) -> StructuredObject {
    parse_structured(raw).unwrap_or_default()
}
