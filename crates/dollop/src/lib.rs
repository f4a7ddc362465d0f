// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dollop
//!
//! Serve ordered collections in bite-sized pieces.
//!
//! A *serving* is a contiguous piece of a source. Servings come out in
//! order, lazily, and concatenating them rebuilds the source. Every entry
//! point takes exactly one of two knobs:
//!
//! | Knob | Result |
//! |---|---|
//! | `fixed_size = n` | servings of `n` elements; the last may be shorter |
//! | `target_count = k` | exactly `k` servings whose sizes differ by at most one, larger first |
//!
//! # Entry points
//!
//! - [`partition_sequence`]: slices, vectors, strings, index ranges.
//! - [`partition_array`]: [`Tensor`]s and (feature `ndarray`) ndarray
//!   arrays, along one axis.
//! - [`partition_rows`]: (feature `table`) Arrow-backed [`Column`]s and
//!   [`Frame`]s, by row position.
//! - [`partition_stream`]: lines or characters of a file or open handle,
//!   by fixed size only.
//! - [`partition_auto`]: classifies an [`Input`] and picks one of the above.
//!
//! Planning is exposed on its own through [`plan`] and [`calculate_plan`].
//!
//! # Logging
//! Entry points log their plan at `debug` level and stream groups at
//! `trace` level through `tracing`. No subscriber is installed.

mod array;
mod config;
mod dispatch;
mod partition;
#[cfg(feature = "table")]
mod rows;
mod sequence;
mod stream;

pub use array::{partition_array, ArrayServings, AxisArray, AxisView};
pub use config::ServeOptions;
pub use dispatch::{partition_auto, AutoServings, Input, Kind, Serving};
pub use partition::{serve, Partitionable, Servings};
#[cfg(feature = "table")]
pub use rows::{partition_rows, RowServings, Rows};
pub use sequence::{partition_sequence, OrderedSequence, Text};
pub use stream::partition_stream;

pub use dollop_plan::{calculate_plan, plan, validate, Mode, PlanRanges, ServeError, ServingPlan};
pub use dollop_stream::{Access, Chunk, Encoding, SourceHandle, StreamServings, StreamSource, Unit};
#[cfg(feature = "table")]
pub use dollop_table::{Column, Frame, TableError, Tabular};
pub use dollop_tensor::{concatenate, Shape, Tensor, TensorError};

#[cfg(feature = "ndarray")]
pub use ndarray;
