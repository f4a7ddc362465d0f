// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dollop-stream
//!
//! Groups the lines or characters of a file-like source into servings,
//! pulling only as much as each serving needs.
//!
//! A stream's length is unknown up front, so it can only be served by
//! fixed size: `size` units per group, with a shorter final group if the
//! content runs out part way. An empty source produces no groups.
//!
//! ## Sources
//!
//! - [`StreamSource::path`]: opened when serving starts and closed when the
//!   iterator finishes or is dropped.
//! - [`StreamSource::handle`]: any [`SourceHandle`] the caller already holds.
//!   It must be readable and is left open.

mod servings;
mod source;
mod unit;

pub use servings::{serve, Chunk, StreamServings};
pub use source::{Access, SourceHandle, StreamSource};
pub use unit::{Encoding, Unit};
