//! Error types for the sentiment engine.
//!
//! Scoring itself never fails: every `&str` (empty included) maps to a defined
//! result. Errors only appear at the edges, when a request body or a vocabulary
//! document does not have the expected shape.

use std::fmt;

/// Errors raised at the boundaries of the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentError {
    /// Request payload failed validation (missing or non-string `text`, etc.)
    InvalidInput(String),

    /// Algorithm name did not match any registered analyzer
    UnknownAlgorithm(String),

    /// Vocabulary or ensemble configuration could not be parsed or validated
    Config(String),
}

impl fmt::Display for SentimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            SentimentError::UnknownAlgorithm(name) => write!(f, "Unknown algorithm: {}", name),
            SentimentError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SentimentError {}

impl From<serde_json::Error> for SentimentError {
    fn from(err: serde_json::Error) -> Self {
        SentimentError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let e = SentimentError::InvalidInput("`text` must be a string".into());
        assert_eq!(e.to_string(), "Invalid input: `text` must be a string");

        let e = SentimentError::UnknownAlgorithm("quantum".into());
        assert_eq!(e.to_string(), "Unknown algorithm: quantum");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: SentimentError = err.into();
        assert!(matches!(e, SentimentError::Config(_)));
    }
}
