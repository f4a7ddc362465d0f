// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Flat ordered sequences: slices, vectors, strings and index ranges.

use crate::{Partitionable, Servings};
use dollop_plan::{validate, ServeError};
use std::ops::Range;

/// A flat sequence whose servings have the same shape as the source.
///
/// Slices and vectors serve subslices, strings serve substrings cut on
/// character boundaries, and ranges serve subranges. [`into_source`]
/// turns the sequence into the value [`Servings`] actually cuts, which
/// for strings means locating every character boundary once up front.
///
/// [`into_source`]: OrderedSequence::into_source
pub trait OrderedSequence {
    /// The partitionable form of the sequence.
    type Source: Partitionable;

    fn into_source(self) -> Self::Source;
}

impl<'a, T> Partitionable for &'a [T] {
    type Serving = &'a [T];

    fn length_along(&self) -> usize {
        self.len()
    }

    fn slice_along(&self, range: Range<usize>) -> &'a [T] {
        let items: &'a [T] = *self;
        &items[range]
    }
}

impl Partitionable for Range<usize> {
    type Serving = Range<usize>;

    fn length_along(&self) -> usize {
        self.len()
    }

    fn slice_along(&self, range: Range<usize>) -> Range<usize> {
        self.start + range.start..self.start + range.end
    }
}

/// A string measured and cut in characters, never inside one.
///
/// ASCII text is cut by byte offset directly. Anything else keeps the byte
/// offset of every character boundary, so each cut is a constant-time
/// lookup however many servings are drawn.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    text: &'a str,
    bounds: Option<Vec<usize>>,
}

impl<'a> Text<'a> {
    pub fn new(text: &'a str) -> Self {
        let bounds = (!text.is_ascii()).then(|| {
            text.char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .collect()
        });
        Self { text, bounds }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    fn offset(&self, index: usize) -> usize {
        match &self.bounds {
            Some(bounds) => bounds[index],
            None => index,
        }
    }
}

impl<'a> Partitionable for Text<'a> {
    type Serving = &'a str;

    fn length_along(&self) -> usize {
        match &self.bounds {
            Some(bounds) => bounds.len() - 1,
            None => self.text.len(),
        }
    }

    fn slice_along(&self, range: Range<usize>) -> &'a str {
        let text: &'a str = self.text;
        &text[self.offset(range.start)..self.offset(range.end)]
    }
}

impl<'a, T> OrderedSequence for &'a [T] {
    type Source = &'a [T];

    fn into_source(self) -> &'a [T] {
        self
    }
}

impl<'a, T> OrderedSequence for &'a Vec<T> {
    type Source = &'a [T];

    fn into_source(self) -> &'a [T] {
        self.as_slice()
    }
}

impl<'a, T, const N: usize> OrderedSequence for &'a [T; N] {
    type Source = &'a [T];

    fn into_source(self) -> &'a [T] {
        self.as_slice()
    }
}

impl<'a> OrderedSequence for &'a str {
    type Source = Text<'a>;

    fn into_source(self) -> Text<'a> {
        Text::new(self)
    }
}

impl<'a> OrderedSequence for &'a String {
    type Source = Text<'a>;

    fn into_source(self) -> Text<'a> {
        Text::new(self.as_str())
    }
}

impl<'a> OrderedSequence for Text<'a> {
    type Source = Text<'a>;

    fn into_source(self) -> Text<'a> {
        self
    }
}

impl OrderedSequence for Range<usize> {
    type Source = Range<usize>;

    fn into_source(self) -> Range<usize> {
        self
    }
}

/// Splits an ordered sequence into contiguous servings.
///
/// Exactly one of `fixed_size` (at most that many elements per serving)
/// and `target_count` (exactly that many near-equal servings) must be given.
///
/// # Errors
/// [`ServeError::InvalidArgument`] if both or neither are given, or if the
/// given one is zero.
///
/// # Examples
/// ```
/// use dollop::partition_sequence;
///
/// let items: Vec<u32> = (0..10).collect();
/// let servings: Vec<&[u32]> = partition_sequence(&items, Some(3), None).unwrap().collect();
/// assert_eq!(servings.len(), 4);
/// assert_eq!(servings[3], &[9]);
///
/// let words: Vec<&str> = partition_sequence("héllo", None, Some(2)).unwrap().collect();
/// assert_eq!(words, ["hél", "lo"]);
/// ```
pub fn partition_sequence<S: OrderedSequence>(
    items: S,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
) -> Result<Servings<S::Source>, ServeError> {
    let mode = validate(fixed_size, target_count)?;
    Ok(Servings::new(items.into_source(), mode))
}
