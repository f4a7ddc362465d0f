// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Extents of a tensor, one per axis.

use std::fmt;

/// The extent of every axis of a [`crate::Tensor`], outermost first.
///
/// A rank-0 shape describes a scalar and holds exactly one element.
///
/// # Examples
/// ```
/// use dollop_tensor::Shape;
///
/// let s = Shape::new(vec![4, 0, 2]);
/// assert_eq!(s.rank(), 3);
/// assert_eq!(s.num_elements(), 0);
/// assert_eq!(s.to_string(), "[4, 0, 2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// The rank-0 shape.
    pub fn scalar() -> Self {
        Self::new(Vec::new())
    }

    pub fn vector(len: usize) -> Self {
        Self::new(vec![len])
    }

    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self::new(vec![rows, cols])
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Product of all extents (1 for a scalar, 0 if any axis is empty).
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Extent of `axis`, if the shape has that many axes.
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.dims.get(axis).copied()
    }

    /// Element strides of a packed row-major buffer with this shape.
    ///
    /// The last axis has stride 1; each earlier axis steps over one full
    /// block of the axes after it.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.rank()];
        let mut block = 1;
        for (stride, extent) in strides.iter_mut().zip(&self.dims).rev() {
            *stride = block;
            block *= extent;
        }
        strides
    }

    /// Reorders the extents so that axis `i` of the result is axis
    /// `axes[i]` of `self`. `axes` must be a permutation of `0..rank`.
    pub(crate) fn permuted(&self, axes: &[usize]) -> Shape {
        Shape::new(axes.iter().map(|&a| self.dims[a]).collect())
    }

    /// Same shape with the extent of `axis` replaced.
    pub(crate) fn with_dim(&self, axis: usize, extent: usize) -> Shape {
        let mut dims = self.dims.clone();
        dims[axis] = extent;
        Shape::new(dims)
    }

    /// Returns `true` if both shapes have the same rank and agree on every
    /// axis other than `axis`.
    pub fn matches_except(&self, other: &Shape, axis: usize) -> bool {
        self.rank() == other.rank()
            && self
                .dims
                .iter()
                .zip(&other.dims)
                .enumerate()
                .all(|(i, (a, b))| i == axis || a == b)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.dims.iter().map(usize::to_string).collect();
        write!(f, "[{}]", dims.join(", "))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims.to_vec())
    }
}
