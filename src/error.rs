//! Error types for gdcolor

use thiserror::Error;

/// Result type alias for gdcolor operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighter error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Theme parse error: {0}")]
    ThemeParse(#[from] toml::de::Error),

    #[error("Invalid color for '{key}': {value}")]
    InvalidColor { key: String, value: String },

    #[error("Line {line} out of range (buffer has {count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    #[error("{0}")]
    Message(String),
}
