// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Tabular`] trait and row-label helpers shared by both table shapes.

use crate::TableError;
use arrow::array::{Array, ArrayRef};
use std::ops::Range;

/// A row collection that can be cut by row position.
///
/// Positions are always `0..num_rows()`, independent of any row labels.
pub trait Tabular: Sized {
    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// The rows in `range`, with every column and row label kept.
    ///
    /// # Panics
    /// Panics if `range` does not lie within `0..num_rows()`.
    fn slice_rows(&self, range: Range<usize>) -> Self;

    /// Optional per-row labels.
    fn labels(&self) -> Option<&ArrayRef>;
}

/// Compares two optional label arrays by value.
pub(crate) fn labels_eq(a: Option<&ArrayRef>, b: Option<&ArrayRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => **a == **b,
        (None, None) => true,
        _ => false,
    }
}

pub(crate) fn check_labels(labels: &ArrayRef, rows: usize) -> Result<(), TableError> {
    if labels.len() != rows {
        return Err(TableError::LabelLengthMismatch {
            labels: labels.len(),
            rows,
        });
    }
    Ok(())
}

/// Joins the labels of consecutive parts; all parts must agree on having labels.
pub(crate) fn concat_labels<'a, I>(parts: I, op: &'static str) -> Result<Option<ArrayRef>, TableError>
where
    I: IntoIterator<Item = Option<&'a ArrayRef>>,
{
    let parts: Vec<Option<&ArrayRef>> = parts.into_iter().collect();
    if parts.iter().all(Option::is_none) {
        return Ok(None);
    }
    let labels: Option<Vec<&dyn Array>> = parts.iter().map(|p| p.map(|a| &**a)).collect();
    let labels = labels.ok_or(TableError::InconsistentLabels { op })?;
    Ok(Some(arrow::compute::concat(&labels)?))
}
