// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Joining tensors along an axis.

use crate::{Shape, Tensor, TensorError};

/// Concatenates `tensors` along `axis` into a new row-major tensor.
///
/// Every input must have the same rank and agree on all extents except
/// `axis`. This is the inverse of partitioning a tensor along `axis`.
///
/// # Examples
/// ```
/// use dollop_tensor::{concatenate, Shape, Tensor};
///
/// let a = Tensor::from_vec(Shape::matrix(2, 1), vec![1, 3]).unwrap();
/// let b = Tensor::from_vec(Shape::matrix(2, 1), vec![2, 4]).unwrap();
/// let ab = concatenate(1, &[a, b]).unwrap();
/// assert_eq!(ab.to_vec(), vec![1, 2, 3, 4]);
/// ```
///
/// # Errors
/// [`TensorError::Empty`] for no inputs, [`TensorError::AxisOutOfRange`],
/// or [`TensorError::ShapeMismatch`] when extents disagree.
pub fn concatenate<T: Clone>(axis: usize, tensors: &[Tensor<T>]) -> Result<Tensor<T>, TensorError> {
    let first = tensors.first().ok_or(TensorError::Empty { op: "concatenate" })?;
    let rank = first.rank();
    if axis >= rank {
        return Err(TensorError::AxisOutOfRange { axis, rank });
    }
    for t in &tensors[1..] {
        if !first.shape().matches_except(t.shape(), axis) {
            return Err(TensorError::ShapeMismatch {
                op: "concatenate",
                lhs: first.shape().clone(),
                rhs: t.shape().clone(),
            });
        }
    }

    // With `axis` swapped to the front, each input's row-major order is a
    // contiguous block of the joined result.
    let swap = swap_to_front(rank, axis);
    let mut values = Vec::with_capacity(tensors.iter().map(Tensor::num_elements).sum());
    let mut extent = 0;
    for t in tensors {
        let front = t.permuted(&swap)?;
        values.extend(front.iter().cloned());
        extent += front.len_of(0).unwrap_or(0);
    }

    let mut dims = first.shape().dims().to_vec();
    dims.swap(0, axis);
    dims[0] = extent;
    let joined = Tensor::from_vec(Shape::new(dims), values)?;
    Ok(joined.permuted(&swap)?.to_contiguous())
}

/// The permutation that exchanges `axis` with axis 0. It is its own inverse.
pub fn swap_to_front(rank: usize, axis: usize) -> Vec<usize> {
    let mut axes: Vec<usize> = (0..rank).collect();
    axes.swap(0, axis);
    axes
}
