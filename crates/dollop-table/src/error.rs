// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for table construction and reassembly.

use arrow::error::ArrowError;

/// Errors that can occur when building or joining tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The row labels do not have one entry per row.
    #[error("label length mismatch: {labels} labels for {rows} rows")]
    LabelLengthMismatch { labels: usize, rows: usize },

    /// Some parts carry row labels and others do not.
    #[error("cannot {op} labelled and unlabelled tables together")]
    InconsistentLabels { op: &'static str },

    /// An operation needed at least one table.
    #[error("{op} requires at least one table")]
    Empty { op: &'static str },

    /// An Arrow kernel failed (e.g., mismatched data types or schemas).
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
