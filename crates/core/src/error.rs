//! Error types for the mirroring pipeline.

use std::{io, path::PathBuf, result};

/// Errors that can occur while mirroring a font family.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid font family")]
    MissingFamily,

    #[error("invalid font size(s) declaration")]
    MissingSizes,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("transfer from {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed stylesheet at {line}:{column}: {message}")]
    Parse { line: u32, column: u32, message: String },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn http(url: &str, source: reqwest::Error) -> Self {
        Self::Http { url: url.to_owned(), source }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}

pub type Result<T> = result::Result<T, Error>;
