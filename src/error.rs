//! This module defines all error types used throughout the application.
//!
//! The layout core never fails; these errors come from loading instances and
//! configuration and from writing rendered output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Instance document errors
    #[error("Input error: {0}")]
    Input(String),

    /// Instance parsing errors
    #[error("Input parsing error in {file:?}: {message}")]
    InputParse { file: PathBuf, message: String },

    /// Scene rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Instance failed validation
    #[error("Validation failed with {0} error(s)")]
    Validation(usize),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Input(format!("JSON error: {}", err))
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Render(err.to_string())
    }
}
