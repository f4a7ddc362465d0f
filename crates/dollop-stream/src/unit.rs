// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! What a stream is counted in, and how its bytes are handed back.

use dollop_plan::ServeError;
use std::fmt;
use std::str::FromStr;

/// The unit a stream serving is measured in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// One line, terminator included.
    ///
    /// Text lines end at `\n`, `\r\n` or a bare `\r`; binary lines end at
    /// `\n` only.
    #[default]
    #[serde(alias = "lines")]
    Line,
    /// One character: a UTF-8 scalar for text, one byte for binary.
    #[serde(alias = "chars", alias = "character", alias = "characters")]
    Char,
}

impl FromStr for Unit {
    type Err = ServeError;

    /// Parses `line`/`lines` or `char`/`chars`/`character`/`characters`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" | "lines" => Ok(Unit::Line),
            "char" | "chars" | "character" | "characters" => Ok(Unit::Char),
            other => Err(ServeError::invalid(format!(
                "unknown stream unit '{other}', expected 'line' or 'char'"
            ))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Line => write!(f, "line"),
            Unit::Char => write!(f, "char"),
        }
    }
}

/// Whether a source's content is text or raw bytes.
///
/// Servings from a text source are `String`s; servings from a binary
/// source are byte vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    Text,
    Binary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        for s in ["line", "lines"] {
            assert_eq!(s.parse::<Unit>().unwrap(), Unit::Line);
        }
        for s in ["char", "chars", "character", "characters"] {
            assert_eq!(s.parse::<Unit>().unwrap(), Unit::Char);
        }
    }

    #[test]
    fn test_parse_unknown_unit() {
        let err = "words".parse::<Unit>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("words"));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Unit::default(), Unit::Line);
        assert_eq!(Encoding::default(), Encoding::Text);
        assert_eq!(Unit::Char.to_string(), "char");
    }
}
