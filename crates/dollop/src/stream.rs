// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Entry point for stream sources.

use dollop_plan::{validate, Mode, ServeError};
use dollop_stream::{serve, StreamServings, StreamSource, Unit};

/// Groups a stream's lines or characters into servings of `fixed_size` units.
///
/// A stream's length is not known before it is read, so `target_count`
/// is rejected.
///
/// # Errors
/// - [`ServeError::InvalidArgument`] if the mode knobs are invalid or
///   `target_count` is used.
/// - [`ServeError::ReadAccessDenied`] if a handle is not open for reading.
/// - [`ServeError::NotFound`] if a path does not exist.
///
/// Failures while reading surface from the iterator as [`ServeError::Io`].
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use dollop::{partition_stream, StreamSource, Unit};
///
/// let mut poem = Cursor::new("fog\ncomes\non little\ncat feet\n");
/// let servings: Vec<String> = partition_stream(StreamSource::handle(&mut poem), Some(3), None, Unit::Line)
///     .unwrap()
///     .map(|c| c.unwrap().as_text().unwrap().to_owned())
///     .collect();
/// assert_eq!(servings, ["fog\ncomes\non little\n", "cat feet\n"]);
/// ```
pub fn partition_stream<'a>(
    source: StreamSource<'a>,
    fixed_size: Option<usize>,
    target_count: Option<usize>,
    unit: Unit,
) -> Result<StreamServings<'a>, ServeError> {
    let Mode::FixedSize(size) = validate(fixed_size, target_count)? else {
        return Err(ServeError::invalid(
            "`target_count` is not supported for streams, use `fixed_size`",
        ));
    };
    tracing::debug!("stream: serving {size} {unit}(s) per group from {source:?}");
    serve(source, size, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_target_count_rejected() {
        let mut cursor = Cursor::new("a\n");
        let err = partition_stream(StreamSource::handle(&mut cursor), None, Some(2), Unit::Line).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("target_count"));
    }

    #[test]
    fn test_mutual_exclusivity() {
        let mut cursor = Cursor::new("a\n");
        let err = partition_stream(StreamSource::handle(&mut cursor), Some(1), Some(1), Unit::Char).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = partition_stream(StreamSource::path(dir.path().join("nope.txt")), Some(1), None, Unit::Line)
            .unwrap_err();
        assert!(matches!(err, ServeError::NotFound { .. }));
    }

    #[test]
    fn test_char_groups() {
        let mut cursor = Cursor::new("abcde");
        let groups: Vec<String> = partition_stream(StreamSource::handle(&mut cursor), Some(2), None, Unit::Char)
            .unwrap()
            .map(|c| c.unwrap().as_text().unwrap().to_owned())
            .collect();
        assert_eq!(groups, ["ab", "cd", "e"]);
    }
}
