// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Serving options loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! fixed_size = 3
//! axis = 1        # arrays only
//! unit = "char"   # streams only
//! ```

use dollop_plan::{validate, Mode, ServeError};
use dollop_stream::Unit;
use std::path::Path;

/// Options for [`partition_auto`](crate::partition_auto).
///
/// Exactly one of `fixed_size` and `target_count` must be set. `axis`
/// applies to arrays (default 0) and `unit` to streams (default
/// [`Unit::Line`]); setting either for another kind of input is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServeOptions {
    /// Maximum number of elements per serving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<usize>,
    /// Number of near-equal servings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<usize>,
    /// Array axis to partition along.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<usize>,
    /// Stream unit: `"line"` or `"char"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

impl ServeOptions {
    /// At most `n` elements per serving.
    pub fn fixed_size(n: usize) -> Self {
        Self {
            fixed_size: Some(n),
            ..Default::default()
        }
    }

    /// Exactly `k` servings.
    pub fn target_count(k: usize) -> Self {
        Self {
            target_count: Some(k),
            ..Default::default()
        }
    }

    pub fn with_axis(mut self, axis: usize) -> Self {
        self.axis = Some(axis);
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Validates the mode knobs.
    pub fn mode(&self) -> Result<Mode, ServeError> {
        validate(self.fixed_size, self.target_count)
    }

    /// Loads options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ServeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServeError::Config(format!("cannot read options '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses options from a TOML string.
    ///
    /// # Errors
    /// [`ServeError::InvalidArgument`] for an unknown `unit` name, and
    /// [`ServeError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml(toml_str: &str) -> Result<Self, ServeError> {
        let table: toml::Table = toml_str
            .parse()
            .map_err(|e| ServeError::Config(format!("TOML parse error: {e}")))?;
        if let Some(unit) = table.get("unit").and_then(toml::Value::as_str) {
            unit.parse::<Unit>()?;
        }
        table
            .try_into::<Self>()
            .map_err(|e| ServeError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises options to TOML.
    pub fn to_toml(&self) -> Result<String, ServeError> {
        toml::to_string_pretty(self)
            .map_err(|e| ServeError::Config(format!("TOML serialise error: {e}")))
    }
}
