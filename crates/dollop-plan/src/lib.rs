// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dollop-plan
//!
//! Computes where to cut an ordered collection of `total` elements into
//! contiguous servings.
//!
//! # Modes
//!
//! | Mode | Servings | Sizes |
//! |---|---|---|
//! | [`Mode::FixedSize`] | `⌈total / n⌉` | `n`, last may be shorter |
//! | [`Mode::TargetCount`] | exactly `k` | `⌈total / k⌉` first, then `⌊total / k⌋` |
//!
//! Plans are pure arithmetic and allocate nothing per range. Every
//! container-specific partitioner in the workspace asks this crate for its
//! ranges.
//!
//! # Example
//! ```
//! use dollop_plan::plan;
//!
//! let p = plan(10, None, Some(3)).unwrap();
//! assert_eq!(p.ranges(), vec![0..4, 4..7, 7..10]);
//! ```

mod error;
mod mode;
mod plan;

pub use error::ServeError;
pub use mode::{validate, Mode};
pub use plan::{calculate_plan, plan, PlanRanges, ServingPlan};
