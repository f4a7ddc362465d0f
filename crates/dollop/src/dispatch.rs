// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Automatic dispatch: classify an input and hand it to the matching
//! partitioner.
//!
//! Classification checks capabilities in a fixed order and the first match
//! wins:
//!
//! 1. ordered sequence (slices, strings, ranges)
//! 2. stream (paths and open handles)
//! 3. table (columns and frames)
//! 4. array (tensors and ndarray views)
//!
//! Anything else is [`Kind::Unrecognized`] and rejected.

use crate::{partition_array, partition_sequence, partition_stream, ArrayServings, ServeOptions, Servings, Text};
use dollop_plan::ServeError;
use dollop_stream::{Chunk, StreamServings, StreamSource};
use dollop_tensor::Tensor;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

#[cfg(feature = "table")]
use crate::{partition_rows, RowServings};
#[cfg(feature = "table")]
use dollop_table::{Column, Frame};

#[cfg(feature = "ndarray")]
use ndarray::{ArrayD, ArrayViewD};

/// The container kinds the dispatcher knows how to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    OrderedSequence,
    Stream,
    Table,
    Array,
    Unrecognized,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::OrderedSequence => "ordered sequence",
            Kind::Stream => "stream",
            Kind::Table => "table",
            Kind::Array => "array",
            Kind::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Any value that might be served.
///
/// Build one with `From`/`Into` from the container itself. Numbers and
/// null are representable so that they can be rejected at runtime.
///
/// `T` is the element type of slices and arrays. Inputs without one
/// (strings, ranges, streams, tables) leave it at `()`.
#[derive(Debug)]
pub enum Input<'a, T = ()> {
    Items(&'a [T]),
    Text(&'a str),
    Range(Range<usize>),
    Stream(StreamSource<'a>),
    #[cfg(feature = "table")]
    Column(&'a Column),
    #[cfg(feature = "table")]
    Frame(&'a Frame),
    Tensor(&'a Tensor<T>),
    #[cfg(feature = "ndarray")]
    NdArray(ArrayViewD<'a, T>),
    Int(i64),
    Float(f64),
    Null,
}

impl<T> Input<'_, T> {
    /// Has a length and type-preserving contiguous slicing.
    pub fn is_ordered_sequence(&self) -> bool {
        matches!(self, Input::Items(_) | Input::Text(_) | Input::Range(_))
    }

    /// Can be read line by line or character by character.
    pub fn is_stream(&self) -> bool {
        matches!(self, Input::Stream(_))
    }

    /// Has positionally addressable rows.
    pub fn is_table(&self) -> bool {
        #[cfg(feature = "table")]
        if matches!(self, Input::Column(_) | Input::Frame(_)) {
            return true;
        }
        false
    }

    /// Has axes that can be reordered and cut.
    pub fn is_array(&self) -> bool {
        #[cfg(feature = "ndarray")]
        if matches!(self, Input::NdArray(_)) {
            return true;
        }
        matches!(self, Input::Tensor(_))
    }

    /// Classifies the input; the first matching capability wins.
    pub fn kind(&self) -> Kind {
        if self.is_ordered_sequence() {
            Kind::OrderedSequence
        } else if self.is_stream() {
            Kind::Stream
        } else if self.is_table() {
            Kind::Table
        } else if self.is_array() {
            Kind::Array
        } else {
            Kind::Unrecognized
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Input::Items(_) => "slice",
            Input::Text(_) => "str",
            Input::Range(_) => "range",
            Input::Stream(_) => "stream source",
            #[cfg(feature = "table")]
            Input::Column(_) => "column",
            #[cfg(feature = "table")]
            Input::Frame(_) => "frame",
            Input::Tensor(_) => "tensor",
            #[cfg(feature = "ndarray")]
            Input::NdArray(_) => "ndarray view",
            Input::Int(_) => "integer",
            Input::Float(_) => "float",
            Input::Null => "null",
        }
    }
}

impl<'a, T> From<&'a [T]> for Input<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Input::Items(items)
    }
}

impl<'a, T> From<&'a Vec<T>> for Input<'a, T> {
    fn from(items: &'a Vec<T>) -> Self {
        Input::Items(items)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Input<'a, T> {
    fn from(items: &'a [T; N]) -> Self {
        Input::Items(items)
    }
}

impl<'a, T> From<&'a str> for Input<'a, T> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a, T> From<&'a String> for Input<'a, T> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<T> From<Range<usize>> for Input<'_, T> {
    fn from(range: Range<usize>) -> Self {
        Input::Range(range)
    }
}

impl<'a, T> From<StreamSource<'a>> for Input<'a, T> {
    fn from(source: StreamSource<'a>) -> Self {
        Input::Stream(source)
    }
}

impl<T> From<&Path> for Input<'_, T> {
    fn from(path: &Path) -> Self {
        Input::Stream(StreamSource::path(path))
    }
}

impl<T> From<PathBuf> for Input<'_, T> {
    fn from(path: PathBuf) -> Self {
        Input::Stream(StreamSource::path(path))
    }
}

#[cfg(feature = "table")]
impl<'a, T> From<&'a Column> for Input<'a, T> {
    fn from(column: &'a Column) -> Self {
        Input::Column(column)
    }
}

#[cfg(feature = "table")]
impl<'a, T> From<&'a Frame> for Input<'a, T> {
    fn from(frame: &'a Frame) -> Self {
        Input::Frame(frame)
    }
}

impl<'a, T> From<&'a Tensor<T>> for Input<'a, T> {
    fn from(tensor: &'a Tensor<T>) -> Self {
        Input::Tensor(tensor)
    }
}

#[cfg(feature = "ndarray")]
impl<'a, T> From<ArrayViewD<'a, T>> for Input<'a, T> {
    fn from(view: ArrayViewD<'a, T>) -> Self {
        Input::NdArray(view)
    }
}

#[cfg(feature = "ndarray")]
impl<'a, T> From<&'a ArrayD<T>> for Input<'a, T> {
    fn from(array: &'a ArrayD<T>) -> Self {
        Input::NdArray(array.view())
    }
}

impl<T> From<i64> for Input<'_, T> {
    fn from(value: i64) -> Self {
        Input::Int(value)
    }
}

impl<T> From<f64> for Input<'_, T> {
    fn from(value: f64) -> Self {
        Input::Float(value)
    }
}

/// One serving, of the same kind as the input it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Serving<'a, T = ()> {
    Items(&'a [T]),
    Text(&'a str),
    Range(Range<usize>),
    Chunk(Chunk),
    #[cfg(feature = "table")]
    Column(Column),
    #[cfg(feature = "table")]
    Frame(Frame),
    Tensor(Tensor<T>),
    #[cfg(feature = "ndarray")]
    NdArray(ArrayViewD<'a, T>),
}

impl<'a, T> Serving<'a, T> {
    pub fn kind(&self) -> Kind {
        match self {
            Serving::Items(_) | Serving::Text(_) | Serving::Range(_) => Kind::OrderedSequence,
            Serving::Chunk(_) => Kind::Stream,
            #[cfg(feature = "table")]
            Serving::Column(_) | Serving::Frame(_) => Kind::Table,
            Serving::Tensor(_) => Kind::Array,
            #[cfg(feature = "ndarray")]
            Serving::NdArray(_) => Kind::Array,
        }
    }

    pub fn as_items(&self) -> Option<&'a [T]> {
        match self {
            Serving::Items(items) => Some(*items),
            _ => None,
        }
    }

    /// Returns the text of a string serving or a text stream chunk.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Serving::Text(text) => Some(*text),
            Serving::Chunk(chunk) => chunk.as_text(),
            _ => None,
        }
    }

    pub fn into_tensor(self) -> Option<Tensor<T>> {
        match self {
            Serving::Tensor(t) => Some(t),
            _ => None,
        }
    }
}

enum Inner<'a, T> {
    Items(Servings<&'a [T]>),
    Text(Servings<Text<'a>>),
    Range(Servings<Range<usize>>),
    Stream(StreamServings<'a>),
    #[cfg(feature = "table")]
    Column(RowServings<'a, Column>),
    #[cfg(feature = "table")]
    Frame(RowServings<'a, Frame>),
    Tensor(ArrayServings<Tensor<T>>),
    #[cfg(feature = "ndarray")]
    NdArray(ArrayServings<ArrayViewD<'a, T>>),
}

/// Servings of an automatically classified input.
pub struct AutoServings<'a, T = ()> {
    kind: Kind,
    inner: Inner<'a, T>,
}

impl<T> AutoServings<'_, T> {
    /// The kind the input was classified as.
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

impl<T> fmt::Debug for AutoServings<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoServings").field("kind", &self.kind).finish_non_exhaustive()
    }
}

impl<'a, T> Iterator for AutoServings<'a, T> {
    type Item = Result<Serving<'a, T>, ServeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let serving = match &mut self.inner {
            Inner::Items(s) => Serving::Items(s.next()?),
            Inner::Text(s) => Serving::Text(s.next()?),
            Inner::Range(s) => Serving::Range(s.next()?),
            Inner::Stream(s) => return s.next().map(|chunk| chunk.map(Serving::Chunk)),
            #[cfg(feature = "table")]
            Inner::Column(s) => Serving::Column(s.next()?),
            #[cfg(feature = "table")]
            Inner::Frame(s) => Serving::Frame(s.next()?),
            Inner::Tensor(s) => Serving::Tensor(s.next()?),
            #[cfg(feature = "ndarray")]
            Inner::NdArray(s) => Serving::NdArray(s.next()?),
        };
        Some(Ok(serving))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Items(s) => s.size_hint(),
            Inner::Text(s) => s.size_hint(),
            Inner::Range(s) => s.size_hint(),
            Inner::Stream(s) => s.size_hint(),
            #[cfg(feature = "table")]
            Inner::Column(s) => s.size_hint(),
            #[cfg(feature = "table")]
            Inner::Frame(s) => s.size_hint(),
            Inner::Tensor(s) => s.size_hint(),
            #[cfg(feature = "ndarray")]
            Inner::NdArray(s) => s.size_hint(),
        }
    }
}

impl<T> std::iter::FusedIterator for AutoServings<'_, T> {}

/// Classifies `input` and serves it with the matching partitioner.
///
/// `options.axis` is only accepted for arrays and `options.unit` only for
/// streams.
///
/// # Errors
/// - [`ServeError::UnsupportedType`] if the input is not a recognized
///   container.
/// - [`ServeError::InvalidArgument`] for a kind-specific option given to
///   the wrong kind, or anything the matched partitioner rejects.
/// - Stream errors as for [`partition_stream`].
///
/// # Examples
/// ```
/// use dollop::{partition_auto, Kind, ServeOptions};
///
/// let items = vec![1, 2, 3, 4, 5];
/// let servings = partition_auto::<i32, _>(&items, &ServeOptions::target_count(2)).unwrap();
/// assert_eq!(servings.kind(), Kind::OrderedSequence);
/// let sizes: Vec<usize> = servings.map(|s| s.unwrap().as_items().unwrap().len()).collect();
/// assert_eq!(sizes, vec![3, 2]);
///
/// let err = partition_auto::<i32, _>(42i64, &ServeOptions::fixed_size(1)).unwrap_err();
/// assert!(err.is_unsupported_type());
///
/// // Untyped inputs can name the result type instead of the element type.
/// let words: dollop::AutoServings<'_> = partition_auto("abcdef", &ServeOptions::fixed_size(4)).unwrap();
/// assert_eq!(words.count(), 2);
/// ```
pub fn partition_auto<'a, T, I>(input: I, options: &ServeOptions) -> Result<AutoServings<'a, T>, ServeError>
where
    I: Into<Input<'a, T>>,
{
    let input = input.into();
    let kind = input.kind();
    let name = input.type_name();
    tracing::debug!("dispatch: {name} classified as {kind}");

    if kind == Kind::Unrecognized {
        return Err(unrecognized(name));
    }
    if options.axis.is_some() && kind != Kind::Array {
        return Err(ServeError::invalid(format!("`axis` only applies to arrays, not a {kind}")));
    }
    if options.unit.is_some() && kind != Kind::Stream {
        return Err(ServeError::invalid(format!("`unit` only applies to streams, not a {kind}")));
    }

    let (fixed_size, target_count) = (options.fixed_size, options.target_count);
    let axis = options.axis.unwrap_or(0);
    let inner = match input {
        Input::Items(items) => Inner::Items(partition_sequence(items, fixed_size, target_count)?),
        Input::Text(text) => Inner::Text(partition_sequence(text, fixed_size, target_count)?),
        Input::Range(range) => Inner::Range(partition_sequence(range, fixed_size, target_count)?),
        Input::Stream(source) => Inner::Stream(partition_stream(
            source,
            fixed_size,
            target_count,
            options.unit.unwrap_or_default(),
        )?),
        #[cfg(feature = "table")]
        Input::Column(column) => Inner::Column(partition_rows(column, fixed_size, target_count)?),
        #[cfg(feature = "table")]
        Input::Frame(frame) => Inner::Frame(partition_rows(frame, fixed_size, target_count)?),
        Input::Tensor(tensor) => Inner::Tensor(partition_array(tensor, fixed_size, target_count, axis)?),
        #[cfg(feature = "ndarray")]
        Input::NdArray(view) => Inner::NdArray(partition_array(view, fixed_size, target_count, axis)?),
        Input::Int(_) | Input::Float(_) | Input::Null => return Err(unrecognized(name)),
    };
    Ok(AutoServings { kind, inner })
}

fn unrecognized(name: &str) -> ServeError {
    ServeError::unsupported(format!("{name} is not a sequence, stream, table or array"))
}
