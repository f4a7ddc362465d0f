// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Row partitioning for tables.

use crate::{Partitionable, Servings};
use dollop_plan::{validate, ServeError};
use dollop_table::Tabular;
use std::ops::Range;

/// A borrowed table, cut by row position.
#[derive(Debug)]
pub struct Rows<'a, T>(&'a T);

impl<T> Clone for Rows<'_, T> {
    fn clone(&self) -> Self {
        Rows(self.0)
    }
}

impl<T: Tabular> Partitionable for Rows<'_, T> {
    type Serving = T;

    fn length_along(&self) -> usize {
        self.0.num_rows()
    }

    fn slice_along(&self, range: Range<usize>) -> T {
        self.0.slice_rows(range)
    }
}

/// Servings of a table's rows.
pub type RowServings<'a, T> = Servings<Rows<'a, T>>;

/// Splits a table into servings of consecutive rows.
///
/// Rows are chosen by position, never by label. Each serving has every
/// column of the source and the labels of its own rows.
///
/// # Errors
/// [`ServeError::InvalidArgument`] if the mode knobs are invalid.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use arrow::array::Int64Array;
/// use dollop::{partition_rows, Column, Tabular};
///
/// let column = Column::new("x", Arc::new(Int64Array::from_iter_values(0..10)));
/// let rows: Vec<usize> = partition_rows(&column, None, Some(3))
///     .unwrap()
///     .map(|c| c.num_rows())
///     .collect();
/// assert_eq!(rows, vec![4, 3, 3]);
/// ```
pub fn partition_rows<T: Tabular>(
    table: &T,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
) -> Result<RowServings<'_, T>, ServeError> {
    let mode = validate(fixed_size, target_count)?;
    Ok(Servings::new(Rows(table), mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use dollop_table::{Column, Frame};
    use std::sync::Arc;

    fn frame(rows: i64) -> Frame {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, false),
        ]));
        let names: Vec<String> = (0..rows).map(|i| format!("n{i}")).collect();
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from_iter_values(0..rows)),
                Arc::new(StringArray::from(names)),
            ],
        )
        .unwrap();
        let labels: Vec<String> = (0..rows).map(|i| format!("r{}", rows - i)).collect();
        Frame::new(batch)
            .with_labels(Arc::new(StringArray::from(labels)))
            .unwrap()
    }

    #[test]
    fn test_frame_fixed_size() {
        let f = frame(10);
        let servings: Vec<Frame> = partition_rows(&f, Some(3), None).unwrap().collect();
        let rows: Vec<usize> = servings.iter().map(|s| s.num_rows()).collect();
        assert_eq!(rows, vec![3, 3, 3, 1]);
        assert!(servings.iter().all(|s| s.schema() == f.schema()));
        assert_eq!(Frame::concat(&servings).unwrap(), f);
    }

    #[test]
    fn test_rows_are_positional() {
        let f = frame(4);
        let second = partition_rows(&f, None, Some(2)).unwrap().nth(1).unwrap();
        let ids = second.column("id").unwrap().as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(ids.value(0), 2);
        let labels = second.labels().unwrap().as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(labels.value(0), "r2");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_column_target_count() {
        let c = Column::new("v", Arc::new(Int64Array::from_iter_values(0..10)));
        let servings: Vec<Column> = partition_rows(&c, None, Some(10)).unwrap().collect();
        assert_eq!(servings.len(), 10);
        assert!(servings.iter().all(|s| s.num_rows() == 1 && s.name() == "v"));
        assert_eq!(Column::concat(&servings).unwrap(), c);
    }

    #[test]
    fn test_empty_table() {
        let f = frame(0);
        assert_eq!(partition_rows(&f, Some(2), None).unwrap().count(), 0);
        let servings: Vec<Frame> = partition_rows(&f, None, Some(2)).unwrap().collect();
        assert!(servings.iter().all(|s| s.num_rows() == 0));
    }

    #[test]
    fn test_mutual_exclusivity() {
        let f = frame(3);
        assert!(partition_rows(&f, Some(1), Some(1)).unwrap_err().is_invalid_argument());
    }
}
