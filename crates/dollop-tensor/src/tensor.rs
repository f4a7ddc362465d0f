// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type: a strided view over a shared buffer.

use crate::{Shape, TensorError};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::Arc;

/// An n-dimensional tensor backed by a reference-counted buffer.
///
/// A `Tensor` is a window into its buffer described by an offset, a
/// [`Shape`] and one stride per dimension. Reordering axes and slicing
/// along an axis only rewrite that description, so both are O(rank) and
/// never copy elements. Clones share the buffer.
///
/// # Memory Layout
/// Tensors built with [`from_vec`](Tensor::from_vec) are row-major (C order).
/// Views produced by [`permuted`](Tensor::permuted) or
/// [`slice_axis`](Tensor::slice_axis) may not be; logical order is always
/// available through [`iter`](Tensor::iter).
pub struct Tensor<T> {
    data: Arc<[T]>,
    offset: usize,
    shape: Shape,
    strides: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Creates a row-major tensor from owned values.
    ///
    /// # Examples
    /// ```
    /// use dollop_tensor::{Tensor, Shape};
    /// let t = Tensor::from_vec(Shape::matrix(2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&4));
    /// ```
    ///
    /// # Errors
    /// [`TensorError::BufferSizeMismatch`] if `values.len()` differs from
    /// `shape.num_elements()`.
    pub fn from_vec(shape: Shape, values: Vec<T>) -> Result<Self, TensorError> {
        let expected = shape.num_elements();
        if values.len() != expected {
            return Err(TensorError::BufferSizeMismatch {
                shape,
                expected,
                actual: values.len(),
            });
        }
        let strides = shape.strides();
        Ok(Self {
            data: values.into(),
            offset: 0,
            shape,
            strides,
        })
    }

    /// Creates a tensor whose element at each index is `f(index)`.
    pub fn from_shape_fn<F>(shape: Shape, mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let total = shape.num_elements();
        let mut values = Vec::with_capacity(total);
        let mut index = vec![0usize; shape.rank()];
        for _ in 0..total {
            values.push(f(&index));
            advance(&mut index, shape.dims());
        }
        let strides = shape.strides();
        Self {
            data: values.into(),
            offset: 0,
            shape,
            strides,
        }
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value].into(),
            offset: 0,
            shape: Shape::scalar(),
            strides: vec![],
        }
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the extent of `axis`, or `None` if the axis does not exist.
    pub fn len_of(&self, axis: usize) -> Option<usize> {
        self.shape.dim(axis)
    }

    /// Returns the number of elements in the view.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Returns the per-dimension strides, in elements.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Returns `true` if the view is row-major and gap-free.
    pub fn is_contiguous(&self) -> bool {
        let dims = self.shape.dims();
        let row_major = self.shape.strides();
        self.num_elements() == 0
            || significant_strides(dims, &self.strides) == significant_strides(dims, &row_major)
    }

    /// Returns `true` if both tensors view the same buffer.
    pub fn shares_buffer(&self, other: &Tensor<T>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Returns the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let in_bounds = index.iter().zip(self.shape.dims()).all(|(i, d)| i < d);
        if index.len() != self.rank() || !in_bounds {
            return None;
        }
        self.data.get(self.position(index))
    }

    /// Iterates elements in logical row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tensor: self,
            index: vec![0; self.rank()],
            remaining: self.num_elements(),
        }
    }

    /// Returns a view with axes reordered: view axis `i` is source axis `axes[i]`.
    ///
    /// # Errors
    /// [`TensorError::InvalidPermutation`] unless `axes` is a permutation of
    /// `0..rank`.
    pub fn permuted(&self, axes: &[usize]) -> Result<Self, TensorError> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        let valid = axes.len() == rank
            && axes.iter().all(|&a| a < rank && !std::mem::replace(&mut seen[a], true));
        if !valid {
            return Err(TensorError::InvalidPermutation {
                axes: axes.to_vec(),
                rank,
            });
        }

        Ok(Self {
            data: Arc::clone(&self.data),
            offset: self.offset,
            shape: self.shape.permuted(axes),
            strides: axes.iter().map(|&a| self.strides[a]).collect(),
        })
    }

    /// Returns a view restricted to `range` along `axis`.
    ///
    /// # Errors
    /// [`TensorError::AxisOutOfRange`] or [`TensorError::RangeOutOfBounds`].
    pub fn slice_axis(&self, axis: usize, range: Range<usize>) -> Result<Self, TensorError> {
        let extent = self.len_of(axis).ok_or(TensorError::AxisOutOfRange {
            axis,
            rank: self.rank(),
        })?;
        if range.start > range.end || range.end > extent {
            return Err(TensorError::RangeOutOfBounds {
                axis,
                start: range.start,
                end: range.end,
                extent,
            });
        }

        let offset = if range.is_empty() {
            self.offset
        } else {
            self.offset + range.start * self.strides[axis]
        };
        Ok(Self {
            data: Arc::clone(&self.data),
            offset,
            shape: self.shape.with_dim(axis, range.len()),
            strides: self.strides.clone(),
        })
    }

    fn position(&self, index: &[usize]) -> usize {
        self.offset
            + index
                .iter()
                .zip(&self.strides)
                .map(|(i, s)| i * s)
                .sum::<usize>()
    }
}

impl<T: Clone> Tensor<T> {
    /// Creates a tensor with every element set to `value`.
    pub fn full(shape: Shape, value: T) -> Self {
        let values = vec![value; shape.num_elements()];
        let strides = shape.strides();
        Self {
            data: values.into(),
            offset: 0,
            shape,
            strides,
        }
    }

    /// Copies the elements into a vector in logical row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Returns a row-major copy, or a cheap clone if already contiguous.
    pub fn to_contiguous(&self) -> Self {
        if self.is_contiguous() && self.offset == 0 && self.data.len() == self.num_elements() {
            return self.clone();
        }
        let strides = self.shape.strides();
        Self {
            data: self.to_vec().into(),
            offset: 0,
            shape: self.shape.clone(),
            strides,
        }
    }
}

/// Strides of the dimensions that actually step (extent > 1).
fn significant_strides(dims: &[usize], strides: &[usize]) -> Vec<usize> {
    dims.iter()
        .zip(strides)
        .filter(|(d, _)| **d > 1)
        .map(|(_, s)| *s)
        .collect()
}

/// Increments a row-major multi-index by one, carrying into earlier axes.
fn advance(index: &mut [usize], dims: &[usize]) {
    for axis in (0..index.len()).rev() {
        index[axis] += 1;
        if index[axis] < dims[axis] {
            return;
        }
        index[axis] = 0;
    }
}

impl<T> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            offset: self.offset,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Tensor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.iter().eq(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("values", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Row-major iterator over a [`Tensor`]'s elements.
pub struct Iter<'a, T> {
    tensor: &'a Tensor<T>,
    index: Vec<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.tensor.data.get(self.tensor.position(&self.index));
        advance(&mut self.index, self.tensor.shape.dims());
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tensor<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
