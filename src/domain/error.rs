//! Domain-level error types for lmt-config.
//!
//! All errors are typed with `thiserror` and carry enough context
//! (path, line number) to point the user at the offending input.

use std::num::ParseIntError;

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// A line in an input deck could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        line: usize,
        message: String,
        #[source]
        source: Option<ParseIntError>,
    },

    /// Package bookkeeping rejected a registration (e.g. unit collision).
    #[error("Registration error: {message}")]
    Registration { message: String },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a parse error for a token that should have been an integer.
    pub fn parse_int(line: usize, token: &str, err: ParseIntError) -> Self {
        Self::Parse {
            line,
            message: format!("expected an integer, found '{token}'"),
            source: Some(err),
        }
    }

    /// Create a JSON error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
