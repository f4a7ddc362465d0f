// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Single-column tables.

use crate::tabular::{check_labels, concat_labels, labels_eq};
use crate::{TableError, Tabular};
use arrow::array::{Array, ArrayRef};
use std::ops::Range;

/// A named column of values with optional row labels.
///
/// Slicing is zero-copy: the returned column shares Arrow buffers with
/// its source.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    values: ArrayRef,
    labels: Option<ArrayRef>,
}

impl Column {
    /// Creates an unlabelled column.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use arrow::array::Int64Array;
    /// use dollop_table::{Column, Tabular};
    ///
    /// let c = Column::new("x", Arc::new(Int64Array::from(vec![1, 2, 3])));
    /// assert_eq!(c.num_rows(), 3);
    /// assert_eq!(c.slice_rows(1..3).num_rows(), 2);
    /// ```
    pub fn new(name: impl Into<String>, values: ArrayRef) -> Self {
        Self {
            name: name.into(),
            values,
            labels: None,
        }
    }

    /// Attaches one label per row.
    ///
    /// # Errors
    /// [`TableError::LabelLengthMismatch`] if the lengths differ.
    pub fn with_labels(mut self, labels: ArrayRef) -> Result<Self, TableError> {
        check_labels(&labels, self.values.len())?;
        self.labels = Some(labels);
        Ok(self)
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values.
    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    /// Joins consecutive parts of a column back together.
    ///
    /// The result takes the first part's name.
    ///
    /// # Errors
    /// [`TableError::Empty`], [`TableError::InconsistentLabels`], or an Arrow
    /// error if the value types differ.
    pub fn concat(parts: &[Column]) -> Result<Column, TableError> {
        let first = parts.first().ok_or(TableError::Empty { op: "concat" })?;
        let values: Vec<&dyn Array> = parts.iter().map(|p| p.values.as_ref()).collect();
        Ok(Column {
            name: first.name.clone(),
            values: arrow::compute::concat(&values)?,
            labels: concat_labels(parts.iter().map(|p| p.labels.as_ref()), "concat")?,
        })
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && *self.values == *other.values
            && labels_eq(self.labels.as_ref(), other.labels.as_ref())
    }
}

impl Tabular for Column {
    fn num_rows(&self) -> usize {
        self.values.len()
    }

    fn slice_rows(&self, range: Range<usize>) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values.slice(range.start, range.len()),
            labels: self.labels.as_ref().map(|l| l.slice(range.start, range.len())),
        }
    }

    fn labels(&self) -> Option<&ArrayRef> {
        self.labels.as_ref()
    }
}
