//! Error types for the files the game reads and writes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the persisted high-score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file {path} not found")]
    NotFound { path: PathBuf },

    #[error("failed to access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("score file {path} has an unknown header")]
    BadMagic { path: PathBuf },

    #[error("score file {path} is truncated ({len} bytes)")]
    Truncated { path: PathBuf, len: usize },
}

/// Errors from the optional settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} not found")]
    NotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error in {path}: {details}")]
    Parse { path: PathBuf, details: String },

    /// A value that must be strictly positive was not.
    #[error("setting `{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}
