// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Multi-column tables.

use crate::tabular::{check_labels, concat_labels, labels_eq};
use crate::{TableError, Tabular};
use arrow::array::{Array, ArrayRef};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::ops::Range;

/// A record batch with optional row labels.
///
/// Every column has the same number of rows. Slicing is zero-copy.
#[derive(Debug, Clone)]
pub struct Frame {
    batch: RecordBatch,
    labels: Option<ArrayRef>,
}

impl Frame {
    /// Wraps a record batch without row labels.
    pub fn new(batch: RecordBatch) -> Self {
        Self {
            batch,
            labels: None,
        }
    }

    /// Attaches one label per row.
    ///
    /// # Errors
    /// [`TableError::LabelLengthMismatch`] if the lengths differ.
    pub fn with_labels(mut self, labels: ArrayRef) -> Result<Self, TableError> {
        check_labels(&labels, self.batch.num_rows())?;
        self.labels = Some(labels);
        Ok(self)
    }

    /// Returns the underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Returns the column called `name`, if present.
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Joins consecutive parts of a frame back together.
    ///
    /// # Errors
    /// [`TableError::Empty`], [`TableError::InconsistentLabels`], or an Arrow
    /// error if the schemas differ.
    pub fn concat(parts: &[Frame]) -> Result<Frame, TableError> {
        let first = parts.first().ok_or(TableError::Empty { op: "concat" })?;
        let batch = arrow::compute::concat_batches(&first.schema(), parts.iter().map(|p| &p.batch))?;
        Ok(Frame {
            batch,
            labels: concat_labels(parts.iter().map(|p| p.labels.as_ref()), "concat")?,
        })
    }
}

impl From<RecordBatch> for Frame {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.batch == other.batch && labels_eq(self.labels.as_ref(), other.labels.as_ref())
    }
}

impl Tabular for Frame {
    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    fn slice_rows(&self, range: Range<usize>) -> Self {
        Self {
            batch: self.batch.slice(range.start, range.len()),
            labels: self.labels.as_ref().map(|l| l.slice(range.start, range.len())),
        }
    }

    fn labels(&self) -> Option<&ArrayRef> {
        self.labels.as_ref()
    }
}
