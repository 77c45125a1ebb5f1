//! Log line type handed to sinks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single formatted diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    /// RFC 3339 timestamp with milliseconds
    pub ts: String,

    /// trace, debug, info, warn, error
    pub level: String,

    /// Module path (e.g. "emerson_core::copy")
    pub target: String,

    pub msg: String,

    /// Structured fields recorded with the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
}

impl LogLine {
    pub fn new(level: impl Into<String>, target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            ts: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            level: level.into(),
            target: target.into(),
            msg: msg.into(),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Look up a recorded field rendered as a string.
    pub fn field(&self, name: &str) -> Option<String> {
        let value = self.fields.as_ref()?.get(name)?;
        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// `msg key=value ...` rendering used by text sinks.
    pub fn to_text(&self) -> String {
        let mut out = format!("[{}] {}: {}", self.level, self.target, self.msg);
        if let Some(Value::Object(fields)) = &self.fields {
            for (key, value) in fields {
                match value {
                    Value::String(s) => out.push_str(&format!(" {}={}", key, s)),
                    other => out.push_str(&format!(" {}={}", key, other)),
                }
            }
        }
        out
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rendering_includes_fields() {
        let line = LogLine::new("error", "emerson_core::copy", "Failed to copy")
            .with_fields(serde_json::json!({ "error": "denied" }));
        assert_eq!(line.to_text(), "[error] emerson_core::copy: Failed to copy error=denied");
        assert_eq!(line.field("error").as_deref(), Some("denied"));
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let line = LogLine::new("info", "t", "m");
        let json = line.to_json().unwrap();
        assert!(!json.contains("fields"));
        let parsed: LogLine = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, line);
    }
}
