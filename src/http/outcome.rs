//! Normalized request outcomes

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Response body, parsed when possible
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Body {
    Json(Value),
    /// Body that was not valid JSON (HTML error pages, empty bodies)
    Raw(String),
}

impl Body {
    /// Parse a response body, keeping the raw text if it is not JSON
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Raw(text),
        }
    }
}

/// Result of executing one request
///
/// A transport failure has no status and no body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Response { status: u16, body: Body },
    Transport { error: String },
}

impl Outcome {
    pub fn response(status: u16, body: Body) -> Self {
        Outcome::Response { status, body }
    }

    pub fn transport(error: impl Into<String>) -> Self {
        Outcome::Transport {
            error: error.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Response { status, .. } => Some(*status),
            Outcome::Transport { .. } => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Outcome::Transport { .. })
    }

    /// Parsed JSON body, if the server sent one
    pub fn json(&self) -> Option<&Value> {
        match self {
            Outcome::Response {
                body: Body::Json(value),
                ..
            } => Some(value),
            _ => None,
        }
    }

    /// Top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json().and_then(|v| v.get(name))
    }

    /// Top-level field rendered as text; numbers are formatted, other
    /// non-string values are ignored
    pub fn field_str(&self, name: &str) -> Option<String> {
        self.field(name).and_then(value_text)
    }

    /// Number of entries in a JSON array or object body, 0 otherwise
    pub fn count(&self) -> usize {
        match self.json() {
            Some(Value::Array(items)) => items.len(),
            Some(Value::Object(map)) => map.len(),
            _ => 0,
        }
    }
}

/// Render a scalar JSON value as plain text
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Response {
                status,
                body: Body::Json(value),
            } => write!(f, "status {}: {}", status, value),
            Outcome::Response {
                status,
                body: Body::Raw(text),
            } => write!(f, "status {} (raw): {}", status, text),
            Outcome::Transport { error } => write!(f, "transport error: {}", error),
        }
    }
}
