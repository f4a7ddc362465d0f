// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning modes and the argument validator.
//!
//! Callers describe a partition with two optional knobs, `fixed_size` and
//! `target_count`. Exactly one must be set, and it must be positive.
//! [`validate`] checks both rules and hands back a [`Mode`], which cannot
//! hold an invalid combination.

use crate::ServeError;
use std::fmt;
use std::num::NonZeroUsize;

/// How a total is divided into servings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// At most `n` elements per serving; only the last may be shorter.
    FixedSize(NonZeroUsize),
    /// Exactly `k` servings of near-equal size, larger ones first.
    TargetCount(NonZeroUsize),
}

impl Mode {
    /// Fixed-size mode.
    ///
    /// # Errors
    /// [`ServeError::InvalidArgument`] if `n` is zero.
    pub fn fixed_size(n: usize) -> Result<Self, ServeError> {
        NonZeroUsize::new(n)
            .map(Mode::FixedSize)
            .ok_or_else(|| ServeError::invalid("`fixed_size` must be an integer > 0, got 0"))
    }

    /// Target-count mode.
    ///
    /// # Errors
    /// [`ServeError::InvalidArgument`] if `k` is zero.
    pub fn target_count(k: usize) -> Result<Self, ServeError> {
        NonZeroUsize::new(k)
            .map(Mode::TargetCount)
            .ok_or_else(|| ServeError::invalid("`target_count` must be an integer > 0, got 0"))
    }

    /// The mode's parameter (serving size or serving count).
    pub fn get(self) -> usize {
        match self {
            Mode::FixedSize(n) | Mode::TargetCount(n) => n.get(),
        }
    }

    /// Returns `true` for [`Mode::FixedSize`].
    pub fn is_fixed_size(self) -> bool {
        matches!(self, Mode::FixedSize(_))
    }

    /// Returns `true` for [`Mode::TargetCount`].
    pub fn is_target_count(self) -> bool {
        matches!(self, Mode::TargetCount(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::FixedSize(n) => write!(f, "fixed_size={n}"),
            Mode::TargetCount(k) => write!(f, "target_count={k}"),
        }
    }
}

/// Checks the mutual exclusivity and positivity of the two mode knobs.
///
/// # Errors
/// [`ServeError::InvalidArgument`] when both or neither are set, or when
/// the one that is set is zero.
///
/// # Examples
/// ```
/// use dollop_plan::{validate, Mode};
///
/// assert!(validate(Some(3), None).unwrap().is_fixed_size());
/// assert!(validate(Some(3), Some(2)).is_err());
/// assert!(validate(None, None).is_err());
/// assert!(validate(None, Some(0)).is_err());
/// ```
pub fn validate(fixed_size: Option<usize>, target_count: Option<usize>) -> Result<Mode, ServeError> {
    match (fixed_size, target_count) {
        (Some(n), None) => Mode::fixed_size(n),
        (None, Some(k)) => Mode::target_count(k),
        _ => Err(ServeError::invalid(
            "exactly one of `fixed_size` or `target_count` must be specified",
        )),
    }
}
