// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Axis partitioning for n-dimensional arrays.
//!
//! The chosen axis is swapped to the front, the leading dimension is cut
//! by the plan, and each piece is swapped back before it is handed out.
//! Both swaps are view-level metadata changes, so no element is copied.
//!
//! Supported arrays:
//!
//! - [`Tensor`] and `&Tensor`, serving `Tensor`s that share the buffer.
//! - With the `ndarray` feature, any `&ArrayBase` or `ArrayView`, serving
//!   `ArrayView`s of the same dimensionality.

use crate::{Partitionable, Servings};
use dollop_plan::{validate, ServeError};
use dollop_tensor::{swap_to_front, Tensor};
use std::ops::Range;

/// An array that can be viewed with its axes reordered and its leading
/// axis cut.
///
/// `extent`, `permuted` and `slice_leading` are only ever called with
/// arguments that [`partition_array`] has already checked against
/// [`rank`](AxisArray::rank).
pub trait AxisArray {
    /// The view type produced by reordering or cutting.
    type View: AxisArray<View = Self::View>;

    /// Number of axes.
    fn rank(&self) -> usize;

    /// Length of `axis`.
    fn extent(&self, axis: usize) -> usize;

    /// A view whose axis `i` is this array's axis `axes[i]`.
    fn permuted(&self, axes: &[usize]) -> Self::View;

    /// A view of `range` along axis 0.
    fn slice_leading(&self, range: Range<usize>) -> Self::View;
}

impl<T> AxisArray for Tensor<T> {
    type View = Tensor<T>;

    fn rank(&self) -> usize {
        Tensor::rank(self)
    }

    fn extent(&self, axis: usize) -> usize {
        self.shape().dims()[axis]
    }

    fn permuted(&self, axes: &[usize]) -> Tensor<T> {
        Tensor::permuted(self, axes).expect("axes validated by partition_array")
    }

    fn slice_leading(&self, range: Range<usize>) -> Tensor<T> {
        self.slice_axis(0, range).expect("range drawn from a plan over axis 0")
    }
}

impl<T> AxisArray for &Tensor<T> {
    type View = Tensor<T>;

    fn rank(&self) -> usize {
        Tensor::rank(self)
    }

    fn extent(&self, axis: usize) -> usize {
        <Tensor<T> as AxisArray>::extent(self, axis)
    }

    fn permuted(&self, axes: &[usize]) -> Tensor<T> {
        <Tensor<T> as AxisArray>::permuted(self, axes)
    }

    fn slice_leading(&self, range: Range<usize>) -> Tensor<T> {
        <Tensor<T> as AxisArray>::slice_leading(self, range)
    }
}

#[cfg(feature = "ndarray")]
mod nd {
    use super::AxisArray;
    use ndarray::{ArrayBase, ArrayView, Axis, Data, Dimension, Slice};
    use std::ops::Range;

    fn to_dim<D: Dimension>(axes: &[usize]) -> D {
        let mut dim = D::zeros(axes.len());
        dim.slice_mut().copy_from_slice(axes);
        dim
    }

    impl<'a, A, D: Dimension> AxisArray for ArrayView<'a, A, D> {
        type View = ArrayView<'a, A, D>;

        fn rank(&self) -> usize {
            self.ndim()
        }

        fn extent(&self, axis: usize) -> usize {
            self.len_of(Axis(axis))
        }

        fn permuted(&self, axes: &[usize]) -> ArrayView<'a, A, D> {
            self.clone().permuted_axes(to_dim::<D>(axes))
        }

        fn slice_leading(&self, range: Range<usize>) -> ArrayView<'a, A, D> {
            self.clone().slice_axis_move(Axis(0), Slice::from(range))
        }
    }

    impl<'a, A, S, D> AxisArray for &'a ArrayBase<S, D>
    where
        A: 'a,
        S: Data<Elem = A>,
        D: Dimension,
    {
        type View = ArrayView<'a, A, D>;

        fn rank(&self) -> usize {
            self.ndim()
        }

        fn extent(&self, axis: usize) -> usize {
            self.len_of(Axis(axis))
        }

        fn permuted(&self, axes: &[usize]) -> ArrayView<'a, A, D> {
            let array: &'a ArrayBase<S, D> = *self;
            array.view().permuted(axes)
        }

        fn slice_leading(&self, range: Range<usize>) -> ArrayView<'a, A, D> {
            let array: &'a ArrayBase<S, D> = *self;
            array.view().slice_leading(range)
        }
    }
}

/// An array view with the partitioned axis in front.
///
/// Cutting it yields pieces with the original axis order restored.
#[derive(Debug, Clone)]
pub struct AxisView<V> {
    leading: V,
    restore: Vec<usize>,
    axis: usize,
}

impl<V> AxisView<V> {
    /// The axis being partitioned, in the source's axis order.
    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<V: AxisArray<View = V>> Partitionable for AxisView<V> {
    type Serving = V;

    fn length_along(&self) -> usize {
        self.leading.extent(0)
    }

    fn slice_along(&self, range: Range<usize>) -> V {
        self.leading.slice_leading(range).permuted(&self.restore)
    }
}

/// Servings of an array along one axis.
pub type ArrayServings<V> = Servings<AxisView<V>>;

/// Splits an array along `axis` into contiguous servings.
///
/// Every serving keeps every other axis intact; their extents along
/// `axis` add up to the source's.
///
/// # Errors
/// [`ServeError::InvalidArgument`] if the mode knobs are invalid, if the
/// array is zero-dimensional, or if `axis` is not one of its axes.
///
/// # Examples
/// ```
/// use dollop::{partition_array, Shape, Tensor};
///
/// let t = Tensor::from_shape_fn(Shape::new(vec![2, 5]), |ix| ix[0] * 10 + ix[1]);
/// let servings: Vec<Tensor<usize>> = partition_array(&t, Some(2), None, 1).unwrap().collect();
/// assert_eq!(servings.len(), 3);
/// assert_eq!(servings[2].shape().dims(), &[2, 1]);
/// assert_eq!(servings[2].to_vec(), vec![4, 14]);
/// ```
pub fn partition_array<A: AxisArray>(
    array: A,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
    axis: usize,
) -> Result<ArrayServings<A::View>, ServeError> {
    let mode = validate(fixed_size, target_count)?;
    let rank = array.rank();
    if rank == 0 {
        return Err(ServeError::invalid("cannot partition a zero-dimensional array"));
    }
    if axis >= rank {
        return Err(ServeError::invalid(format!(
            "axis {axis} is out of range for an array with {rank} dimensions"
        )));
    }

    // Swapping two axes is its own inverse.
    let order = swap_to_front(rank, axis);
    let leading = array.permuted(&order);
    Ok(Servings::new(
        AxisView {
            leading,
            restore: order,
            axis,
        },
        mode,
    ))
}
