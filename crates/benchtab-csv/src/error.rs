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

//! Error types for CSV ingestion and export.

use benchtab_core::ReduceError;
use thiserror::Error;

/// CSV ingestion and export error types.
///
/// # Examples
///
/// ```
/// use benchtab_csv::CsvError;
///
/// let err = CsvError::InvalidHeader {
///     position: 2,
///     reason: "duplicate column name 'NB'".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Invalid header at position 2: duplicate column name 'NB'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific line.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtab_csv::CsvError;
    ///
    /// let err = CsvError::ParseError {
    ///     line: 42,
    ///     message: "found record with 4 fields, but the previous record has 5 fields".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// Invalid header format or content.
    #[error("Invalid header at position {position}: {reason}")]
    InvalidHeader {
        /// Position of the invalid header (0-based).
        position: usize,
        /// Reason the header is invalid.
        reason: String,
    },

    /// Row count exceeded security limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtab_csv::CsvError;
    ///
    /// let err = CsvError::SecurityLimit {
    ///     limit: 1_000_000,
    ///     actual: 1_000_001,
    /// };
    /// assert!(err.to_string().contains("Security limit"));
    /// ```
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Actual row count encountered.
        actual: usize,
    },

    /// Input bytes are not valid text in the detected encoding.
    #[error("Invalid {encoding} input: {reason}")]
    Encoding {
        /// Detected encoding name.
        encoding: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Reducer error raised while cleaning or exporting records.
    #[error(transparent)]
    Reduce(#[from] ReduceError),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;
