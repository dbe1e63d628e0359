//! construction-time errors

use serde_json::Value as JsonValue;
use thiserror::Error;

/// a raw value did not match any recognized statement shape
///
/// `path` locates the offending value inside the predicate, e.g. `[0].or[2].not`;
/// it is empty when a lone statement was parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid statement{}: {reason} (got {value})", at_path(.path))]
pub struct InvalidStatementError {
    pub path: String,
    pub reason: String,
    pub value: JsonValue,
}

impl InvalidStatementError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>, value: &JsonValue) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
            value: value.clone(),
        }
    }

    /// prefix the path, used when a statement is nested in a larger document
    pub fn within(mut self, prefix: &str) -> Self {
        self.path = format!("{}{}", prefix, self.path);
        self
    }
}

fn at_path(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {}", path)
    }
}
