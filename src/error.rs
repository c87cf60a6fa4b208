//! Error types for redpot-ui

use thiserror::Error;

/// Main error type for page enhancement.
///
/// DOM behaviors never surface these: a missing element or a malformed data
/// attribute degrades to a no-op or a default. Errors only come from the
/// edges (configuration input and the browser backend).
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type for page enhancement
pub type UiResult<T> = Result<T, UiError>;
