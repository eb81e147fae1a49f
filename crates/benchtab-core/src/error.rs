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

//! Error types for the record reducer.

use thiserror::Error;

/// Errors raised while reducing benchmark records.
///
/// Every variant is fatal for the batch it occurs in: the reducer never
/// skips a malformed row or retries an operation. The only rows that are
/// dropped silently are the ones whose status carries the `ERROR` sentinel.
///
/// # Examples
///
/// ```
/// use benchtab_core::ReduceError;
///
/// let err = ReduceError::MalformedRecord {
///     row: 3,
///     column: "GFLOPS".to_string(),
///     value: "n/a".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Malformed record at row 3: column 'GFLOPS' has unusable value 'n/a'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReduceError {
    /// A retained row has a numeric field that does not parse, or parses to
    /// a negative or non-finite number.
    #[error("Malformed record at row {row}: column '{column}' has unusable value '{value}'")]
    MalformedRecord {
        /// Zero-based index of the row in the input sequence.
        row: usize,
        /// Column holding the offending value.
        column: String,
        /// The raw field text.
        value: String,
    },

    /// The reducer was configured with values it cannot work with.
    ///
    /// Raised for a non-positive theoretical peak, a missing required
    /// column, or a comparison label that matches no record.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A best/worst/statistics view was requested on an empty group.
    #[error("Group contains no records")]
    EmptyGroup,

    /// A ratio was requested against a zero denominator.
    #[error("Division by zero while computing {context}")]
    DivisionByZero {
        /// What was being computed.
        context: String,
    },
}

/// Convenience type alias for `Result` with `ReduceError`.
pub type Result<T> = std::result::Result<T, ReduceError>;

impl ReduceError {
    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error for a column absent from a row.
    pub fn missing_column(column: &str) -> Self {
        Self::invalid_config("columns", format!("missing required column '{}'", column))
    }

    /// Create a division-by-zero error.
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }
}
