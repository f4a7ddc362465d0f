// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dollop-tensor
//!
//! A small strided tensor for partitioning along arbitrary axes.
//!
//! This crate provides:
//! - [`Tensor`]: an n-dimensional tensor over an `Arc`-shared buffer.
//! - [`Shape`]: runtime shape descriptors with row-major strides.
//! - [`concatenate`]: joins tensors back together along an axis.
//!
//! # Design Goals
//! - Zero-copy views: [`Tensor::permuted`] and [`Tensor::slice_axis`] only
//!   rewrite offset, shape and strides.
//! - Clones are cheap and share the buffer, so views can be handed out
//!   without lifetimes.
//! - Clean error types via `thiserror`.

mod concat;
mod error;
mod shape;
mod tensor;

pub use concat::{concatenate, swap_to_front};
pub use error::TensorError;
pub use shape::Shape;
pub use tensor::{Iter, Tensor};
