// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for tensor construction and views.

use crate::Shape;

/// Errors that can occur when building or viewing a tensor.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// The provided buffer length does not match the element count of the shape.
    #[error("buffer size mismatch for shape {shape}: expected {expected} elements, got {actual}")]
    BufferSizeMismatch {
        shape: Shape,
        expected: usize,
        actual: usize,
    },

    /// Two tensors have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The axis list is not a permutation of `0..rank`.
    #[error("invalid axis permutation {axes:?} for a rank-{rank} tensor")]
    InvalidPermutation { axes: Vec<usize>, rank: usize },

    /// The axis does not exist.
    #[error("axis {axis} out of range for a rank-{rank} tensor")]
    AxisOutOfRange { axis: usize, rank: usize },

    /// The range does not fit inside the axis.
    #[error("range {start}..{end} out of bounds for axis {axis} of extent {extent}")]
    RangeOutOfBounds {
        axis: usize,
        start: usize,
        end: usize,
        extent: usize,
    },

    /// An operation needed at least one tensor.
    #[error("{op} requires at least one tensor")]
    Empty { op: &'static str },
}
