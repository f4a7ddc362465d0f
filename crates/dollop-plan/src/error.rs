// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error taxonomy shared by every dollop partitioner.

use std::path::PathBuf;

/// Errors that can occur while planning or producing servings.
///
/// Everything except [`ServeError::Io`] is raised by the entry point itself,
/// before the first serving is produced.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Malformed or contradictory partitioning parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The object does not match any recognized container kind.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A path-based stream source does not exist.
    #[error("stream source not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stream handle was not opened for reading.
    #[error("stream handle is not open for reading: {0}")]
    ReadAccessDenied(String),

    /// The underlying source failed while being read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An options file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ServeError {
    /// Shorthand for [`ServeError::InvalidArgument`].
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    /// Shorthand for [`ServeError::UnsupportedType`].
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedType(detail.into())
    }

    /// Returns `true` for [`ServeError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` for [`ServeError::UnsupportedType`].
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType(_))
    }
}
