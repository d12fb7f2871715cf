//! Error types for NVSR

use std::io;
use thiserror::Error;

/// Main error type for NVSR
#[derive(Error, Debug)]
pub enum NvsrError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    /// The chosen synthesizer could not be reached or spawned
    #[error("Speech backend unavailable: {0}")]
    BackendUnavailable(String),

    /// An outbound command to the editor could not be delivered
    #[error("Editor host error: {0}")]
    Host(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for NVSR operations
pub type Result<T> = std::result::Result<T, NvsrError>;

impl From<String> for NvsrError {
    fn from(s: String) -> Self {
        NvsrError::Other(s)
    }
}

impl From<&str> for NvsrError {
    fn from(s: &str) -> Self {
        NvsrError::Other(s.to_string())
    }
}
