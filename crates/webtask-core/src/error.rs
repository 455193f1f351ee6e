//! Error taxonomy for build-task operations
//!
//! Every operation surfaces failures to the caller; nothing is retried
//! internally, and composite tasks report the first failing branch without
//! rolling back artifacts already written by siblings.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Library-wide error type for webtask operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required settings file (version/CDN) is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Module/view path is empty after trimming.
    #[error("module/view path must be non-empty")]
    EmptyPath,

    /// Requested template bundle or one of its required members is absent.
    #[error("template '{name}' not found: missing {}", missing.display())]
    TemplateNotFound { name: String, missing: PathBuf },

    /// Underlying read/write/delete failure.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source document failed to parse as JSON.
    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TaskError {
    /// Attach a path to an underlying I/O failure.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON parse failure for the given source document.
    pub fn malformed(path: &Path, source: serde_json::Error) -> Self {
        Self::MalformedInput {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
