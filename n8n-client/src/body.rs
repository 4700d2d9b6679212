//! Response body parsing.

use serde::Serialize;
use serde_json::Value;

/// Maximum number of characters of a text body used as an error message.
const MAX_TEXT_MESSAGE_CHARS: usize = 500;

/// A response body, parsed best-effort.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum ParsedBody {
    /// Body was valid JSON.
    Json(Value),
    /// Body was not JSON but valid UTF-8 text.
    Text(String),
    /// Body was absent or unreadable.
    #[default]
    Empty,
}

impl ParsedBody {
    /// Parse raw body bytes: JSON first, then UTF-8 text, then `Empty`.
    pub fn parse(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::Empty;
        }
        if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
            return Self::Json(value);
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(_) => Self::Empty,
        }
    }

    /// The JSON value, if the body parsed as JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, if the body was plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether no body could be read.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Convert into a JSON value. Text becomes a JSON string, `Empty` becomes null.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Derive an error message from the body.
    ///
    /// Checks a usable `message` field on a JSON object, then the first 500
    /// characters of a non-empty string body (plain text or a JSON string).
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Json(Value::String(text)) => truncate_message(text),
            Self::Json(value) => value.get("message").and_then(message_field),
            Self::Text(text) => truncate_message(text),
            Self::Empty => None,
        }
    }
}

/// Render a `message` field. Null, false, zero and empty strings are unusable.
fn message_field(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn truncate_message(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_TEXT_MESSAGE_CHARS).collect())
}
