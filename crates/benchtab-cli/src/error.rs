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

//! Structured error types for the Benchtab CLI.
//!
//! All command handlers return `Result<T, CliError>`; `main` prints the
//! message and exits with status 1.

use benchtab_core::ReduceError;
use benchtab_csv::CsvError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Benchtab CLI operations.
///
/// # Cloning
///
/// Implements `Clone` so results from parallel file loading can be collected
/// and reported after the fact.
///
/// # Examples
///
/// ```rust,no_run
/// use benchtab_cli::error::CliError;
///
/// fn read(path: &str) -> Result<Vec<u8>, CliError> {
///     std::fs::read(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read, write, or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// A result file could not be read or cleaned.
    #[error("Failed to load '{path}': {message}")]
    Load {
        /// The offending input file
        path: PathBuf,
        /// The underlying CSV or reducer error
        message: String,
    },

    /// Hardware profile could not be parsed.
    #[error("Invalid hardware profile '{path}': {message}")]
    Profile {
        /// The profile file
        path: PathBuf,
        /// The parser error message
        message: String,
    },

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Reducer error.
    #[error("{0}")]
    Reduce(String),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Attach the input path to a CSV ingestion error.
    pub fn load(path: impl Into<PathBuf>, source: CsvError) -> Self {
        Self::Load {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a hardware profile error.
    pub fn profile(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Profile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<CsvError> for CliError {
    fn from(source: CsvError) -> Self {
        Self::Csv(source.to_string())
    }
}

impl From<ReduceError> for CliError {
    fn from(source: ReduceError) -> Self {
        Self::Reduce(source.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "hpl_results.csv",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("hpl_results.csv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_file_too_large_display() {
        let err = CliError::file_too_large("big.csv", 200_000_000, 100 * 1024 * 1024);
        let msg = err.to_string();
        assert!(msg.contains("big.csv"));
        assert!(msg.contains("200000000 bytes"));
        assert!(msg.contains("100 MB"));
    }

    #[test]
    fn test_load_error_keeps_source_message() {
        let err = CliError::load(
            "o0.csv",
            CsvError::SecurityLimit {
                limit: 10,
                actual: 11,
            },
        );
        assert_eq!(
            err.to_string(),
            "Failed to load 'o0.csv': Security limit exceeded: row count 11 exceeds maximum 10"
        );
    }

    #[test]
    fn test_reduce_error_passes_through() {
        let err: CliError = ReduceError::invalid_config("theoretical_peak", "must be positive").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'theoretical_peak': must be positive"
        );
    }

    #[test]
    fn test_json_format_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::JsonFormat { .. }));
    }

    #[test]
    fn test_error_cloning() {
        let err = CliError::invalid_input("no input files");
        assert_eq!(err.to_string(), err.clone().to_string());
    }
}
