// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dollop-table
//!
//! Arrow-backed row collections that can be cut by row position.
//!
//! Two shapes are provided:
//!
//! - [`Column`]: one named array.
//! - [`Frame`]: a [`RecordBatch`](arrow::record_batch::RecordBatch) of
//!   equal-length columns.
//!
//! Either may carry per-row labels. Labels travel with the rows they
//! belong to but never affect positions: row `i` is always the `i`-th row.

mod column;
mod error;
mod frame;
mod tabular;

pub use column::Column;
pub use error::TableError;
pub use frame::Frame;
pub use tabular::Tabular;
