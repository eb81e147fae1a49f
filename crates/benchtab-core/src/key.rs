// Dweve Benchtab - Benchmark Record Reducer
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Grouping keys and run status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel marking a failed benchmark run in the status column.
pub const ERROR_SENTINEL: &str = "ERROR";

/// A benchmark parameter value used for grouping and sorting.
///
/// Integer literals become [`Key::Int`] so that matrix sizes and strides
/// sort numerically; everything else is kept verbatim as [`Key::Text`].
/// Every integer orders before every text.
///
/// # Examples
///
/// ```
/// use benchtab_core::Key;
///
/// assert_eq!(Key::parse(" 1000 "), Key::Int(1000));
/// assert_eq!(Key::parse("O2"), Key::Text("O2".to_string()));
/// assert!(Key::Int(5000) < Key::Int(10000));
/// assert!(Key::Int(10000) < Key::Text("O0".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integral parameter (matrix size, block size, stride).
    Int(i64),
    /// Any other label (optimization level, variant name).
    Text(String),
}

impl Key {
    /// Parse a key from field text, trimming surrounding whitespace.
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Key::Int(n),
            Err(_) => Key::Text(trimmed.to_string()),
        }
    }

    /// Returns the integer value, if this is an integral key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Text(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps width/alignment specifiers working in table output
        match self {
            Key::Int(n) => f.pad(&n.to_string()),
            Key::Text(s) => f.pad(s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::parse(s)
    }
}

/// Outcome of a benchmark run as reported by the measurement tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The run completed.
    #[serde(rename = "OK")]
    Ok,
    /// The run failed; its measurements are meaningless.
    #[serde(rename = "ERROR")]
    Error,
}

impl Status {
    /// Classify a status field.
    ///
    /// Only the sentinel `ERROR` marks a failed run, compared
    /// case-sensitively after trimming surrounding whitespace; any other
    /// text, including `error` or `FAILED`, counts as completed.
    pub fn parse(field: &str) -> Self {
        if field.trim() == ERROR_SENTINEL {
            Status::Error
        } else {
            Status::Ok
        }
    }

    /// Canonical text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Error => ERROR_SENTINEL,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
