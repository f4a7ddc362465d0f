// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The pull-based group reader.

use crate::source::{check_readable, OpenedFile, Origin};
use crate::{Encoding, SourceHandle, StreamSource, Unit};
use dollop_plan::ServeError;
use std::io::{self, BufRead};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// One stream serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// From a text source.
    Text(String),
    /// From a binary source.
    Bytes(Vec<u8>),
}

impl Chunk {
    /// Returns the text of a text chunk.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Chunk::Text(s) => Some(s),
            Chunk::Bytes(_) => None,
        }
    }

    /// Returns the raw bytes of either kind of chunk.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Chunk::Text(s) => s.as_bytes(),
            Chunk::Bytes(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Chunk::Text(s) => s.into_bytes(),
            Chunk::Bytes(b) => b,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Reader<'a> {
    Owned(OpenedFile),
    Borrowed(&'a mut dyn SourceHandle),
}

/// Iterator over the groups of a stream.
///
/// Each call to `next` pulls up to `size` units. A path source is closed as
/// soon as the stream is exhausted, fails, or the iterator is dropped.
/// After an error the iterator yields nothing more.
pub struct StreamServings<'a> {
    reader: Option<Reader<'a>>,
    size: usize,
    unit: Unit,
    encoding: Encoding,
    produced: usize,
}

/// Opens `source` and prepares to pull groups of `size` units.
///
/// # Errors
/// - [`ServeError::NotFound`] if a path source does not exist.
/// - [`ServeError::ReadAccessDenied`] if a handle is not open for reading.
/// - [`ServeError::Io`] if the source cannot be opened or probed.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use std::num::NonZeroUsize;
/// use dollop_stream::{serve, StreamSource, Unit};
///
/// let mut cursor = Cursor::new("one\ntwo\nthree\n");
/// let size = NonZeroUsize::new(2).unwrap();
/// let groups: Vec<String> = serve(StreamSource::handle(&mut cursor), size, Unit::Line)
///     .unwrap()
///     .map(|g| g.unwrap().as_text().unwrap().to_owned())
///     .collect();
/// assert_eq!(groups, ["one\ntwo\n", "three\n"]);
/// ```
pub fn serve<'a>(
    source: StreamSource<'a>,
    size: NonZeroUsize,
    unit: Unit,
) -> Result<StreamServings<'a>, ServeError> {
    let encoding = source.encoding();
    let reader = match source.origin {
        Origin::Path(path) => Reader::Owned(OpenedFile::open(path)?),
        Origin::Handle(handle) => {
            check_readable(&*handle)?;
            Reader::Borrowed(handle)
        }
    };
    Ok(StreamServings {
        reader: Some(reader),
        size: size.get(),
        unit,
        encoding,
        produced: 0,
    })
}

impl StreamServings<'_> {
    /// Number of groups produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Returns `true` once the iterator will yield nothing more.
    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }

    fn finish(&mut self) {
        self.reader = None;
    }

    fn pull(&mut self) -> Option<io::Result<(Vec<u8>, usize)>> {
        let (size, unit, encoding) = (self.size, self.unit, self.encoding);
        let result = match self.reader.as_mut()? {
            Reader::Owned(file) => read_group(&mut file.reader, size, unit, encoding),
            Reader::Borrowed(handle) => read_group(&mut **handle, size, unit, encoding),
        };
        Some(result)
    }
}

impl Iterator for StreamServings<'_> {
    type Item = Result<Chunk, ServeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (bytes, units) = match self.pull()? {
            Ok(group) => group,
            Err(e) => {
                self.finish();
                return Some(Err(ServeError::Io(e)));
            }
        };
        if units == 0 {
            self.finish();
            return None;
        }
        if units < self.size {
            self.finish();
        }

        let chunk = match self.encoding {
            Encoding::Binary => Chunk::Bytes(bytes),
            Encoding::Text => match String::from_utf8(bytes) {
                Ok(text) => Chunk::Text(text),
                Err(e) => {
                    self.finish();
                    return Some(Err(ServeError::Io(io::Error::new(io::ErrorKind::InvalidData, e))));
                }
            },
        };
        self.produced += 1;
        tracing::trace!(
            "stream: group {} ({} {}s, {} bytes)",
            self.produced,
            units,
            self.unit,
            chunk.len(),
        );
        Some(Ok(chunk))
    }
}

impl FusedIterator for StreamServings<'_> {}

impl std::fmt::Debug for StreamServings<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamServings")
            .field("size", &self.size)
            .field("unit", &self.unit)
            .field("encoding", &self.encoding)
            .field("produced", &self.produced)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Reads up to `size` units, returning the bytes and how many units they hold.
fn read_group<R: BufRead + ?Sized>(
    reader: &mut R,
    size: usize,
    unit: Unit,
    encoding: Encoding,
) -> io::Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut units = 0;
    while units < size {
        let more = match unit {
            Unit::Line if encoding == Encoding::Text => read_text_line(reader, &mut buf)?,
            Unit::Line => reader.read_until(b'\n', &mut buf)? > 0,
            Unit::Char => read_char(reader, &mut buf, encoding)?,
        };
        if !more {
            break;
        }
        units += 1;
    }
    Ok((buf, units))
}

/// Appends one text line to `buf`, ending at `\n`, `\r\n` or a bare `\r`.
/// The terminator is kept as read. `false` at end of stream.
fn read_text_line<R: BufRead + ?Sized>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    let start = buf.len();
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(buf.len() > start);
        }
        let Some(end) = available.iter().position(|&b| b == b'\n' || b == b'\r') else {
            let n = available.len();
            buf.extend_from_slice(available);
            reader.consume(n);
            continue;
        };
        let carriage_return = available[end] == b'\r';
        buf.extend_from_slice(&available[..=end]);
        reader.consume(end + 1);
        if carriage_return && reader.fill_buf()?.first() == Some(&b'\n') {
            buf.push(b'\n');
            reader.consume(1);
        }
        return Ok(true);
    }
}

/// Appends one character to `buf`; `false` at end of stream.
fn read_char<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    encoding: Encoding,
) -> io::Result<bool> {
    let first = match reader.fill_buf()?.first() {
        Some(&b) => b,
        None => return Ok(false),
    };
    reader.consume(1);
    buf.push(first);
    if encoding == Encoding::Binary {
        return Ok(true);
    }

    let width = utf8_width(first).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
    })?;
    if width > 1 {
        let mut rest = [0u8; 3];
        reader.read_exact(&mut rest[..width - 1])?;
        buf.extend_from_slice(&rest[..width - 1]);
    }
    Ok(true)
}

/// Encoded length of a UTF-8 scalar from its leading byte.
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
