// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The shared contract behind every length-aware partitioner.
//!
//! Anything with a known length along the partitioned dimension and a way
//! to cut out a contiguous range of it implements [`Partitionable`].
//! [`Servings`] then walks a [`ServingPlan`] over it, cutting one serving
//! per pulled range.

use dollop_plan::{calculate_plan, validate, Mode, PlanRanges, ServeError, ServingPlan};
use std::iter::FusedIterator;
use std::ops::Range;

/// A source that can be cut into contiguous pieces along one dimension.
///
/// Implement this for your own container to serve it with [`serve`].
pub trait Partitionable {
    /// What one piece looks like.
    type Serving;

    /// Number of elements along the partitioned dimension.
    fn length_along(&self) -> usize;

    /// The piece covering `range` of the partitioned dimension.
    ///
    /// `range` always lies within `0..self.length_along()`.
    fn slice_along(&self, range: Range<usize>) -> Self::Serving;
}

/// Lazy iterator over the servings of a [`Partitionable`] source.
///
/// Each serving is cut when it is pulled. Servings come out in index
/// order and together cover the source exactly once.
#[derive(Debug, Clone)]
pub struct Servings<S> {
    source: S,
    plan: ServingPlan,
    ranges: PlanRanges,
}

impl<S: Partitionable> Servings<S> {
    pub(crate) fn new(source: S, mode: Mode) -> Self {
        let plan = calculate_plan(source.length_along(), mode);
        debug_assert!(plan.is_gapless(), "malformed plan: {plan:?}");
        tracing::debug!("{}", plan.summary());
        Self {
            source,
            plan,
            ranges: plan.iter(),
        }
    }

    /// Returns the plan being served.
    pub fn plan(&self) -> &ServingPlan {
        &self.plan
    }

    /// Returns the source being served.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: Partitionable> Iterator for Servings<S> {
    type Item = S::Serving;

    fn next(&mut self) -> Option<S::Serving> {
        let range = self.ranges.next()?;
        Some(self.source.slice_along(range))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranges.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<S::Serving> {
        let range = self.ranges.nth(n)?;
        Some(self.source.slice_along(range))
    }
}

impl<S: Partitionable> DoubleEndedIterator for Servings<S> {
    fn next_back(&mut self) -> Option<S::Serving> {
        let range = self.ranges.next_back()?;
        Some(self.source.slice_along(range))
    }
}

impl<S: Partitionable> ExactSizeIterator for Servings<S> {}
impl<S: Partitionable> FusedIterator for Servings<S> {}

/// Serves any [`Partitionable`] source.
///
/// # Errors
/// [`ServeError::InvalidArgument`] unless exactly one of `fixed_size` and
/// `target_count` is given and positive.
///
/// # Examples
/// ```
/// use std::ops::Range;
/// use dollop::{serve, Partitionable};
///
/// struct Pages(usize);
///
/// impl Partitionable for Pages {
///     type Serving = Range<usize>;
///     fn length_along(&self) -> usize {
///         self.0
///     }
///     fn slice_along(&self, range: Range<usize>) -> Range<usize> {
///         range
///     }
/// }
///
/// let batches: Vec<_> = serve(Pages(5), None, Some(2)).unwrap().collect();
/// assert_eq!(batches, vec![0..3, 3..5]);
/// ```
pub fn serve<S: Partitionable>(
    source: S,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
) -> Result<Servings<S>, ServeError> {
    let mode = validate(fixed_size, target_count)?;
    Ok(Servings::new(source, mode))
}
