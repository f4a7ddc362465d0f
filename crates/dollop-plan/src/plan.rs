// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Serving plan: the output of the plan calculator.
//!
//! A plan is an ordered list of half-open index ranges over `[0, total)`.
//! Ranges are contiguous, in index order, and cover the total exactly once.
//! The plan is the contract between the calculator and every partitioner:
//! each range becomes exactly one serving.
//!
//! Ranges are derived from `(total, mode)` on demand rather than stored, so
//! a plan for a million servings costs the same as a plan for one.

use crate::{validate, Mode, ServeError};
use std::iter::FusedIterator;
use std::ops::Range;

/// The ordered ranges for one partition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ServingPlan {
    /// Number of elements being partitioned.
    total: usize,
    /// The validated partitioning mode.
    mode: Mode,
}

/// Computes the serving plan for `total` elements under `mode`.
///
/// Under [`Mode::FixedSize`] the plan has `⌈total / n⌉` ranges; under
/// [`Mode::TargetCount`] it has exactly `k` ranges, the first
/// `total % k` of which are one element longer than the rest.
///
/// # Examples
/// ```
/// use dollop_plan::{calculate_plan, Mode};
///
/// let plan = calculate_plan(10, Mode::fixed_size(3).unwrap());
/// assert_eq!(plan.sizes(), vec![3, 3, 3, 1]);
///
/// let plan = calculate_plan(10, Mode::target_count(3).unwrap());
/// assert_eq!(plan.sizes(), vec![4, 3, 3]);
/// ```
pub fn calculate_plan(total: usize, mode: Mode) -> ServingPlan {
    ServingPlan { total, mode }
}

/// Validates the two mode knobs, then computes the plan.
///
/// # Errors
/// Whatever [`validate`] rejects.
pub fn plan(
    total: usize,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
) -> Result<ServingPlan, ServeError> {
    let mode = validate(fixed_size, target_count)?;
    Ok(calculate_plan(total, mode))
}

impl ServingPlan {
    /// Returns the number of elements being partitioned.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the partitioning mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of servings in the plan.
    pub fn len(&self) -> usize {
        match self.mode {
            Mode::FixedSize(n) => self.total.div_ceil(n.get()),
            Mode::TargetCount(k) => k.get(),
        }
    }

    /// Returns `true` if the plan produces no servings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the range of serving `index`, or `None` past the end.
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.len() {
            return None;
        }
        let range = match self.mode {
            Mode::FixedSize(n) => {
                let start = index * n.get();
                start..start + n.get().min(self.total - start)
            }
            Mode::TargetCount(k) => {
                let base = self.total / k.get();
                let remainder = self.total % k.get();
                let start = index * base + index.min(remainder);
                let size = if index < remainder { base + 1 } else { base };
                start..start + size
            }
        };
        Some(range)
    }

    /// Returns an iterator over the plan's ranges in serving order.
    pub fn iter(&self) -> PlanRanges {
        PlanRanges {
            plan: *self,
            front: 0,
            back: self.len(),
        }
    }

    /// Collects every range.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.iter().collect()
    }

    /// Collects the size of every serving.
    pub fn sizes(&self) -> Vec<usize> {
        self.iter().map(|r| r.len()).collect()
    }

    /// Checks every structural invariant of the plan.
    ///
    /// - The first range starts at 0 and the last stops at `total`.
    /// - Each range starts where the previous one stopped.
    /// - No fixed-size range is empty. A target count larger than `total`
    ///   necessarily ends in empty ranges.
    /// - Sizes follow the mode (fixed size except the tail; front-loaded
    ///   remainder for a target count).
    pub fn is_gapless(&self) -> bool {
        let mut expected_start = 0;
        let mut previous_size = usize::MAX;

        for (i, range) in self.iter().enumerate() {
            if range.start != expected_start || range.end < range.start {
                return false;
            }
            if range.is_empty() && self.mode.is_fixed_size() {
                return false;
            }

            let size = range.len();
            let last = i + 1 == self.len();
            let size_ok = match self.mode {
                Mode::FixedSize(n) => size == n.get() || (last && size < n.get()),
                Mode::TargetCount(k) => {
                    let base = self.total / k.get();
                    (size == base || size == base + 1) && size <= previous_size
                }
            };
            if !size_ok {
                return false;
            }

            previous_size = size;
            expected_start = range.end;
        }

        expected_start == self.total
    }

    /// Returns a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let (largest, smallest) = match (self.range(0), self.len().checked_sub(1)) {
            (Some(first), Some(last)) => {
                let last = self.range(last).map_or(0, |r| r.len());
                (first.len(), last)
            }
            _ => (0, 0),
        };
        format!(
            "Plan [{}]: {} servings over {} items, largest {}, smallest {}",
            self.mode,
            self.len(),
            self.total,
            largest,
            smallest,
        )
    }
}

impl IntoIterator for ServingPlan {
    type Item = Range<usize>;
    type IntoIter = PlanRanges;

    fn into_iter(self) -> PlanRanges {
        self.iter()
    }
}

impl IntoIterator for &ServingPlan {
    type Item = Range<usize>;
    type IntoIter = PlanRanges;

    fn into_iter(self) -> PlanRanges {
        self.iter()
    }
}

/// Cursor over the ranges of a [`ServingPlan`].
#[derive(Debug, Clone)]
pub struct PlanRanges {
    plan: ServingPlan,
    front: usize,
    back: usize,
}

impl Iterator for PlanRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.front >= self.back {
            return None;
        }
        let range = self.plan.range(self.front);
        self.front += 1;
        range
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Range<usize>> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for PlanRanges {
    fn next_back(&mut self) -> Option<Range<usize>> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.plan.range(self.back)
    }
}

impl ExactSizeIterator for PlanRanges {}
impl FusedIterator for PlanRanges {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(total: usize, n: usize) -> ServingPlan {
        calculate_plan(total, Mode::fixed_size(n).unwrap())
    }

    fn count(total: usize, k: usize) -> ServingPlan {
        calculate_plan(total, Mode::target_count(k).unwrap())
    }

    #[test]
    fn test_fixed_size_with_remainder() {
        let plan = fixed(10, 3);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.ranges(), vec![0..3, 3..6, 6..9, 9..10]);
        assert!(plan.is_gapless());
    }

    #[test]
    fn test_fixed_size_exact() {
        assert_eq!(fixed(10, 10).sizes(), vec![10]);
        assert_eq!(fixed(10, 5).sizes(), vec![5, 5]);
    }

    #[test]
    fn test_fixed_size_larger_than_total() {
        assert_eq!(fixed(10, 15).ranges(), vec![0..10]);
    }

    #[test]
    fn test_fixed_size_empty_total() {
        let plan = fixed(0, 3);
        assert!(plan.is_empty());
        assert_eq!(plan.iter().count(), 0);
        assert!(plan.is_gapless());
    }

    #[test]
    fn test_target_count_front_loads_remainder() {
        let plan = count(10, 3);
        assert_eq!(plan.ranges(), vec![0..4, 4..7, 7..10]);
        assert!(plan.is_gapless());
    }

    #[test]
    fn test_target_count_one_each() {
        assert_eq!(count(10, 10).sizes(), vec![1; 10]);
    }

    #[test]
    fn test_target_count_more_than_total() {
        let plan = count(3, 5);
        assert_eq!(plan.sizes(), vec![1, 1, 1, 0, 0]);
        assert_eq!(plan.ranges()[4], 3..3);
        assert!(plan.is_gapless());
    }

    #[test]
    fn test_target_count_empty_total() {
        let plan = count(0, 3);
        assert_eq!(plan.ranges(), vec![0..0, 0..0, 0..0]);
        assert!(plan.is_gapless());
    }

    #[test]
    fn test_plan_validates_arguments() {
        assert!(plan(10, Some(3), Some(3)).is_err());
        assert!(plan(10, None, None).is_err());
        assert!(plan(10, Some(0), None).is_err());
        assert_eq!(plan(10, None, Some(2)).unwrap().sizes(), vec![5, 5]);
    }

    #[test]
    fn test_range_out_of_bounds() {
        assert_eq!(fixed(10, 3).range(4), None);
        assert_eq!(count(10, 3).range(3), None);
    }

    #[test]
    fn test_double_ended() {
        let mut it = fixed(7, 2).iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next_back(), Some(6..7));
        assert_eq!(it.next(), Some(0..2));
        assert_eq!(it.len(), 2);
        assert_eq!(it.nth(1), Some(4..6));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_gapless_over_many_totals() {
        for total in 0..60 {
            for n in 1..15 {
                assert!(fixed(total, n).is_gapless(), "fixed {total}/{n}");
                assert!(count(total, n).is_gapless(), "count {total}/{n}");
            }
        }
    }

    #[test]
    fn test_huge_target_count_is_cheap() {
        let plan = count(5, 1_000_000_000);
        assert_eq!(plan.len(), 1_000_000_000);
        assert_eq!(plan.range(4), Some(4..5));
        assert_eq!(plan.range(999_999_999), Some(5..5));
    }

    #[test]
    fn test_summary() {
        let s = count(10, 3).summary();
        assert!(s.contains("target_count=3"));
        assert!(s.contains("3 servings"));
        assert!(s.contains("10 items"));
        assert!(s.contains("largest 4"));
    }
}
