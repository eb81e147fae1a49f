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

//! CLI command implementations

mod analyze;
mod compare;
mod completion;
mod export;
mod load;

pub use analyze::analyze;
pub use compare::compare;
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use export::export;
pub use load::{load_records, LoadedRecords};

use crate::error::CliError;
use std::fs;
use std::io::{self, Write};

/// Default maximum file size to prevent OOM attacks (1 GB)
/// Can be overridden via BENCHTAB_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable holding the maximum input size in bytes.
pub const MAX_FILE_SIZE_ENV: &str = "BENCHTAB_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

fn check_file_size(path: &str) -> Result<(), CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max_file_size = get_max_file_size();

    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }
    Ok(())
}

/// Read a file's raw bytes with size validation.
///
/// Result files may be UTF-16, so decoding is left to the CSV layer.
///
/// # Errors
///
/// - `Io` if the metadata or contents cannot be read
/// - `FileTooLarge` if the file exceeds the limit set by
///   `BENCHTAB_MAX_FILE_SIZE` (default 1 GB)
pub fn read_file_bytes(path: &str) -> Result<Vec<u8>, CliError> {
    check_file_size(path)?;
    fs::read(path).map_err(|e| CliError::io_error(path, e))
}

/// Read a UTF-8 text file with size validation.
///
/// # Examples
///
/// ```no_run
/// use benchtab_cli::commands::read_file;
///
/// # fn main() -> Result<(), benchtab_cli::error::CliError> {
/// let profile = read_file("laptop.yaml")?;
/// assert!(!profile.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn read_file(path: &str) -> Result<String, CliError> {
    check_file_size(path)?;
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Write content to a file or stdout.
///
/// # Errors
///
/// `Io` if the file cannot be written.
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::io_error("<stdout>", e))
        }
    }
}
