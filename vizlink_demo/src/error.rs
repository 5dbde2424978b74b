// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for dataset loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or datasets.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A delimited file is malformed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document is malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A date field does not match the expected format.
    #[error("invalid date {value:?}: {source}")]
    Date {
        /// The offending field.
        value: String,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Builds an [`Error::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds an [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result alias using the demo [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
