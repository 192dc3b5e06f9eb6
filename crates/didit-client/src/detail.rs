//! Extraction of a human-readable detail from provider error bodies.
//!
//! Error bodies are not typed. Strategies are tried in order and the first
//! one that yields a value wins; the raw body is the last resort.

use serde_json::Value;

/// One way of pulling a detail string out of an error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStrategy {
    /// A top-level field of a JSON object body
    JsonField(&'static str),

    /// The body text as received
    RawBody,
}

/// Strategies applied to provider error bodies, in priority order
pub const DETAIL_STRATEGIES: &[DetailStrategy] = &[
    DetailStrategy::JsonField("detail"),
    DetailStrategy::JsonField("message"),
    DetailStrategy::RawBody,
];

impl DetailStrategy {
    /// Apply this strategy. `parsed` is the body parsed as JSON, if it was JSON.
    fn apply(&self, body: &str, parsed: Option<&Value>) -> Option<String> {
        match self {
            DetailStrategy::JsonField(name) => parsed?.get(name).and_then(present_text),
            DetailStrategy::RawBody => Some(body.to_string()),
        }
    }
}

/// Extract a detail using [`DETAIL_STRATEGIES`]
pub fn extract_detail(body: &str) -> String {
    extract_detail_with(body, DETAIL_STRATEGIES)
}

/// Extract a detail using the given strategies, first match wins
pub fn extract_detail_with(body: &str, strategies: &[DetailStrategy]) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();

    strategies
        .iter()
        .find_map(|strategy| strategy.apply(body, parsed.as_ref()))
        .unwrap_or_else(|| body.to_string())
}

/// Render a field value as text when it carries something.
///
/// Empty strings, `null`, `false` and zero count as absent. Arrays and
/// objects (validation error lists, for instance) are rendered as JSON.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Bool(true) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}
