// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: every container kind served end to end.
//!
//! Each kind is checked for reconstruction under both modes, for the
//! serving counts the plan promises, and for the errors its entry point
//! must raise before any serving is produced.

use dollop::{
    concatenate, partition_array, partition_auto, partition_rows, partition_sequence,
    partition_stream, plan, Chunk, Column, Frame, Kind, ServeError, ServeOptions, Shape,
    StreamSource, Tensor, Unit,
};
use std::io::{BufReader, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

// ── Helpers ────────────────────────────────────────────────────

const POEM: &str = "\"Fog\"\n\
by Carl Sandburg\n\
\n\
The fog comes\n\
on little cat feet.\n\
\n\
It sits looking\n\
over harbor and city\n\
on silent haunches\n\
and then moves on.";

const BLANKS: &str = "\n\n\nnice to\n\nmeet you\n\n\n\nwhere you been?\n";

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn text_groups(path: &Path, size: usize, unit: Unit) -> Vec<String> {
    partition_stream(StreamSource::path(path), Some(size), None, unit)
        .unwrap()
        .map(|c| c.unwrap().as_text().unwrap().to_owned())
        .collect()
}

fn scores(rows: i64) -> Frame {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("score", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(0..rows)),
            Arc::new(Float64Array::from_iter_values((0..rows).map(|i| i as f64 / 4.0))),
        ],
    )
    .unwrap();
    let labels: Vec<String> = (0..rows).map(|i| format!("row-{i}")).collect();
    Frame::new(batch).with_labels(Arc::new(StringArray::from(labels))).unwrap()
}

// ── Plan ───────────────────────────────────────────────────────

#[test]
fn test_plan_counts() {
    assert_eq!(plan(10, Some(3), None).unwrap().sizes(), vec![3, 3, 3, 1]);
    assert_eq!(plan(10, Some(10), None).unwrap().sizes(), vec![10]);
    assert!(plan(0, Some(3), None).unwrap().is_empty());
    assert_eq!(plan(10, None, Some(3)).unwrap().sizes(), vec![4, 3, 3]);
    assert_eq!(plan(10, None, Some(10)).unwrap().sizes(), vec![1; 10]);
    assert_eq!(plan(0, None, Some(3)).unwrap().sizes(), vec![0, 0, 0]);
}

// ── Reconstruction ─────────────────────────────────────────────

#[test]
fn test_sequence_reconstruction() {
    let items: Vec<u32> = (0..97).collect();
    for n in 1..20 {
        let fixed: Vec<&[u32]> = partition_sequence(&items, Some(n), None).unwrap().collect();
        assert_eq!(fixed.concat(), items);
        let counted: Vec<&[u32]> = partition_sequence(&items, None, Some(n)).unwrap().collect();
        assert_eq!(counted.len(), n);
        assert_eq!(counted.concat(), items);
    }
}

#[test]
fn test_string_reconstruction() {
    for k in 1..12 {
        let pieces: Vec<&str> = partition_sequence(POEM, None, Some(k)).unwrap().collect();
        assert_eq!(pieces.concat(), POEM);
    }
}

#[test]
fn test_array_reconstruction_along_axis_1() {
    let t = Tensor::from_shape_fn(Shape::new(vec![3, 7, 2]), |ix| (ix[0], ix[1], ix[2]));
    for (fixed, count) in [(Some(3), None), (None, Some(3))] {
        let servings: Vec<Tensor<(usize, usize, usize)>> =
            partition_array(&t, fixed, count, 1).unwrap().collect();
        for s in &servings {
            assert_eq!(s.shape().dim(0), Some(3));
            assert_eq!(s.shape().dim(2), Some(2));
        }
        let along: usize = servings.iter().map(|s| s.shape().dims()[1]).sum();
        assert_eq!(along, 7);
        assert_eq!(concatenate(1, &servings).unwrap(), t);
    }
}

#[test]
fn test_ndarray_reconstruction_along_axis_1() {
    use dollop::ndarray::{concatenate, Array3, Axis};

    let a = Array3::from_shape_fn((3, 7, 2), |(i, j, k)| i * 100 + j * 10 + k);
    let servings: Vec<_> = partition_array(&a, None, Some(3), 1).unwrap().collect();
    let extents: Vec<usize> = servings.iter().map(|v| v.len_of(Axis(1))).collect();
    assert_eq!(extents, vec![3, 2, 2]);
    assert!(servings.iter().all(|v| v.len_of(Axis(0)) == 3 && v.len_of(Axis(2)) == 2));
    assert_eq!(concatenate(Axis(1), &servings).unwrap(), a);
}

#[test]
fn test_table_reconstruction() {
    let frame = scores(23);
    for (fixed, count) in [(Some(5), None), (None, Some(4))] {
        let servings: Vec<Frame> = partition_rows(&frame, fixed, count).unwrap().collect();
        assert_eq!(Frame::concat(&servings).unwrap(), frame);
    }

    let column = Column::new("id", Arc::new(Int64Array::from_iter_values(0..9)));
    let servings: Vec<Column> = partition_rows(&column, Some(4), None).unwrap().collect();
    assert_eq!(servings.len(), 3);
    assert_eq!(Column::concat(&servings).unwrap(), column);
}

#[test]
fn test_stream_reconstruction() {
    let file = write_temp(POEM);
    for size in [1, 3, 5, 20] {
        assert_eq!(text_groups(file.path(), size, Unit::Line).concat(), POEM);
        assert_eq!(text_groups(file.path(), size, Unit::Char).concat(), POEM);
    }
}

// ── Streams ────────────────────────────────────────────────────

#[test]
fn test_stream_line_counts() {
    let file = write_temp(POEM);
    let cases = [(10, vec![10]), (5, vec![5, 5]), (3, vec![3, 3, 3, 1]), (20, vec![10])];
    for (size, expected) in cases {
        let lines: Vec<usize> = text_groups(file.path(), size, Unit::Line)
            .iter()
            .map(|g| g.lines().count())
            .collect();
        assert_eq!(lines, expected, "groups of {size}");
    }
}

#[test]
fn test_stream_char_counts() {
    let file = write_temp(POEM);
    assert_eq!(POEM.chars().count(), 133);
    let cases = [(133, 1, 133), (19, 7, 19), (20, 7, 13), (200, 1, 133)];
    for (size, groups, last) in cases {
        let out = text_groups(file.path(), size, Unit::Char);
        assert_eq!(out.len(), groups, "groups of {size}");
        assert_eq!(out.last().unwrap().chars().count(), last);
    }
}

#[test]
fn test_stream_blank_lines() {
    let file = write_temp(BLANKS);
    let groups = text_groups(file.path(), 3, Unit::Line);
    assert_eq!(groups, ["\n\n\n", "nice to\n\nmeet you\n", "\n\n\n", "where you been?\n"]);
}

#[test]
fn test_stream_empty_source() {
    let file = write_temp("");
    for unit in [Unit::Line, Unit::Char] {
        assert!(text_groups(file.path(), 10, unit).is_empty());
    }
}

#[test]
fn test_stream_binary_handle() {
    let file = write_temp(BLANKS);
    let mut reader = BufReader::new(std::fs::File::open(file.path()).unwrap());
    let chunks: Vec<Chunk> =
        partition_stream(StreamSource::handle(&mut reader).binary(), Some(17), None, Unit::Char)
            .unwrap()
            .map(Result::unwrap)
            .collect();
    assert_eq!(chunks.iter().map(Chunk::len).collect::<Vec<_>>(), vec![17, 17, 6]);
    assert!(chunks.iter().all(|c| matches!(c, Chunk::Bytes(_))));
    let bytes: Vec<u8> = chunks.into_iter().flat_map(Chunk::into_bytes).collect();
    assert_eq!(bytes, BLANKS.as_bytes());
}

#[cfg(unix)]
#[test]
fn test_stream_write_only_handle() {
    let file = write_temp("some content\n");
    let handle = std::fs::OpenOptions::new().write(true).open(file.path()).unwrap();
    let mut reader = BufReader::new(handle);
    let err = partition_stream(StreamSource::handle(&mut reader), Some(1), None, Unit::Line).unwrap_err();
    assert!(matches!(err, ServeError::ReadAccessDenied(_)), "{err}");
}

#[test]
fn test_stream_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = partition_stream(StreamSource::path(dir.path().join("file.txt")), Some(1), None, Unit::Line)
        .unwrap_err();
    assert!(matches!(err, ServeError::NotFound { .. }), "{err}");
}

#[test]
fn test_stream_unknown_unit() {
    let err = "words".parse::<Unit>().unwrap_err();
    assert!(err.is_invalid_argument());
}

// ── Argument validation across kinds ───────────────────────────

#[test]
fn test_mutual_exclusivity_for_every_kind() {
    let items = [1, 2, 3];
    assert!(partition_sequence(&items, Some(1), Some(1)).unwrap_err().is_invalid_argument());

    let t = Tensor::full(Shape::matrix(2, 2), 0);
    assert!(partition_array(&t, Some(1), Some(1), 0).unwrap_err().is_invalid_argument());

    let frame = scores(4);
    assert!(partition_rows(&frame, Some(1), Some(1)).unwrap_err().is_invalid_argument());

    let mut cursor = Cursor::new("x\n");
    let err = partition_stream(StreamSource::handle(&mut cursor), Some(1), Some(1), Unit::Line).unwrap_err();
    assert!(err.is_invalid_argument());

    let both = ServeOptions {
        fixed_size: Some(1),
        target_count: Some(1),
        ..Default::default()
    };
    assert!(partition_auto::<i32, _>(&items, &both).unwrap_err().is_invalid_argument());
}

#[test]
fn test_zero_dimensional_array() {
    let t = Tensor::scalar(3.5f64);
    assert!(partition_array(&t, Some(1), None, 0).unwrap_err().is_invalid_argument());
}

// ── Dispatch ───────────────────────────────────────────────────

#[test]
fn test_auto_rejects_scalars() {
    let err = partition_auto::<i32, _>(7i64, &ServeOptions::fixed_size(2)).unwrap_err();
    assert!(err.is_unsupported_type());
    let err = partition_auto::<i32, _>(7.0f64, &ServeOptions::fixed_size(2)).unwrap_err();
    assert!(err.is_unsupported_type());
}

#[test]
fn test_auto_stream_from_path() {
    let file = write_temp(POEM);
    let servings = partition_auto::<(), _>(file.path(), &ServeOptions::fixed_size(4)).unwrap();
    assert_eq!(servings.kind(), Kind::Stream);
    let text: String = servings
        .map(|s| s.unwrap().as_text().unwrap().to_owned())
        .collect();
    assert_eq!(text, POEM);
}

#[test]
fn test_auto_from_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("serve.toml");
    std::fs::write(&path, "target_count = 2\naxis = 1\n").unwrap();
    let options = ServeOptions::from_file(&path).unwrap();

    let t = Tensor::from_shape_fn(Shape::matrix(2, 5), |ix| ix[0] * 5 + ix[1]);
    let servings: Vec<Tensor<usize>> = partition_auto::<usize, _>(&t, &options)
        .unwrap()
        .map(|s| s.unwrap().into_tensor().unwrap())
        .collect();
    assert_eq!(servings[0].to_vec(), vec![0, 1, 2, 5, 6, 7]);
    assert_eq!(servings[1].to_vec(), vec![3, 4, 8, 9]);
}

#[test]
fn test_auto_table() {
    let frame = scores(6);
    let servings = partition_auto::<(), _>(&frame, &ServeOptions::fixed_size(4)).unwrap();
    assert_eq!(servings.kind(), Kind::Table);
    assert_eq!(servings.count(), 2);
}
