//! Failures that can stop the map catalog from being built.
//!
//! Row-level problems (blank names, unknown countries) are not errors: the
//! normalizer skips those rows. What remains here is everything that prevents
//! the sheet export from being read at all, plus bad user input at the edges
//! (config values, facet names, entry ids).
//!
//! Library crates return [`ClimateMapError`]; the `climatemap` binary wraps it
//! in `color-eyre` reports.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClimateMapError {
    /// `climatemap.toml` is missing a home directory, malformed, or holds an
    /// icon template without `{host}`.
    #[error("config error: {message}")]
    Config { message: String },

    /// The spreadsheet export could not be downloaded: unreachable host,
    /// non-2xx status, or a body that failed to decode.
    #[error("network error: {0}")]
    Network(String),

    /// A textual identifier such as `entry-12` did not parse.
    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input was readable but not acceptable: an unknown facet field, or an
    /// export larger than `[sheet] max_response_bytes`.
    #[error("validation error: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, ClimateMapError>;

impl ClimateMapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Attach the file that was being read or written.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
