//! Error types and handling infrastructure for autocat.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Fetch failures surface their own message verbatim
//! - **Context preservation**: Transport and decoding errors keep their source
//! - **Consistency**: Standardized Result type across all modules

use thiserror::Error;

/// The main error type for autocat operations.
///
/// This enum covers all possible error conditions that can occur while talking
/// to the listing API, loading configuration, and driving the terminal.
#[derive(Error, Debug)]
pub enum AutocatError {
    /// Listing fetch failed with a human-readable message.
    ///
    /// The message is displayed as-is in the catalogue error panel.
    #[error("{message}")]
    Fetch { message: String },

    /// HTTP transport errors (connection refused, TLS, body read)
    #[error("HTTP request failed: {source}")]
    Http {
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not valid JSON
    #[error("Failed to decode listing response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// File system related errors (config file unreadable, terminal I/O)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for autocat operations.
pub type Result<T> = std::result::Result<T, AutocatError>;

impl AutocatError {
    /// Create a Fetch error with the message shown to the user
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AutocatError {
    fn from(source: reqwest::Error) -> Self {
        Self::Http { source }
    }
}

impl From<serde_json::Error> for AutocatError {
    fn from(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }
}

// Terminal setup and crossterm polling report io::Error
impl From<std::io::Error> for AutocatError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
