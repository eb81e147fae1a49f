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

//! Read benchmark result CSV files into raw rows.

use crate::error::{CsvError, Result};
use benchtab_core::{clean_with_report, CleanReport, ColumnMap, RawRow};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Read;
use tracing::debug;

/// Default maximum number of rows to prevent memory exhaustion.
///
/// Benchmark sweeps are tens to hundreds of rows; anything near this limit
/// is not a result file.
///
/// # Examples
///
/// ```
/// # use benchtab_csv::FromCsvConfig;
/// let config = FromCsvConfig::default();
/// assert_eq!(config.max_rows, 1_000_000);
///
/// let config = FromCsvConfig {
///     max_rows: 10_000,
///     ..Default::default()
/// };
/// ```
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Configuration for CSV parsing.
///
/// # Examples
///
/// ```
/// use benchtab_csv::FromCsvConfig;
///
/// let config = FromCsvConfig {
///     delimiter: b';',
///     ..Default::default()
/// };
/// assert!(config.trim);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromCsvConfig {
    /// Field delimiter character (default: `,`).
    pub delimiter: u8,

    /// Maximum number of data rows (default: [`DEFAULT_MAX_ROWS`]).
    pub max_rows: usize,

    /// Trim whitespace around every field (default: `true`).
    ///
    /// Header names are always trimmed.
    pub trim: bool,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_rows: DEFAULT_MAX_ROWS,
            trim: true,
        }
    }
}

/// Parse CSV text into raw rows keyed by header name.
///
/// The first line is the header. Rows come back in file order.
///
/// # Errors
///
/// - `InvalidHeader` for an empty or duplicate column name
/// - `ParseError` for a malformed line, including rows whose field count
///   differs from the header
/// - `SecurityLimit` when the file has more than `max_rows` data rows
///
/// # Examples
///
/// ```
/// use benchtab_csv::{read_rows, FromCsvConfig};
///
/// let csv = "N,NB,Time(s),GFLOPS,Status\n1000,32,1.0,50,OK\n1000,64,0.8,62.5,OK\n";
/// let rows = read_rows(csv, &FromCsvConfig::default()).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].get("GFLOPS"), Some("62.5"));
/// ```
pub fn read_rows(csv: &str, config: &FromCsvConfig) -> Result<Vec<RawRow>> {
    read_rows_from_reader(csv.as_bytes(), config)
}

/// Parse CSV bytes, detecting the text encoding from the byte order mark.
///
/// UTF-8 with or without BOM and UTF-16 (LE or BE) with BOM are accepted.
///
/// # Errors
///
/// `Encoding` if the bytes are not valid text in the detected encoding,
/// otherwise as [`read_rows`].
///
/// # Examples
///
/// ```
/// use benchtab_csv::{read_rows_from_bytes, FromCsvConfig};
///
/// let mut bytes = vec![0xFF, 0xFE];
/// for unit in "stride,rate(MB/s)\n1,812.5\n".encode_utf16() {
///     bytes.extend_from_slice(&unit.to_le_bytes());
/// }
/// let rows = read_rows_from_bytes(&bytes, &FromCsvConfig::default()).unwrap();
/// assert_eq!(rows[0].get("rate(MB/s)"), Some("812.5"));
/// ```
pub fn read_rows_from_bytes(bytes: &[u8], config: &FromCsvConfig) -> Result<Vec<RawRow>> {
    let text = decode(bytes)?;
    read_rows(&text, config)
}

/// Parse CSV from any reader.
///
/// The reader must yield UTF-8; use [`read_rows_from_bytes`] for files that
/// may be UTF-16.
pub fn read_rows_from_reader<R: Read>(reader: R, config: &FromCsvConfig) -> Result<Vec<RawRow>> {
    read_table(reader, config).map(|(_, rows)| rows)
}

/// Validated header names and rows of one table.
fn read_table<R: Read>(reader: R, config: &FromCsvConfig) -> Result<(Vec<String>, Vec<RawRow>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers = validate_headers(csv_reader.headers().map_err(|e| parse_error(e, 1))?)?;

    let mut rows = Vec::new();
    for (record_idx, result) in csv_reader.records().enumerate() {
        // Security: Limit row count to prevent memory exhaustion
        if record_idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: record_idx + 1,
            });
        }

        let record = result.map_err(|e| parse_error(e, record_idx + 2))?;
        rows.push(
            headers
                .iter()
                .map(String::as_str)
                .zip(record.iter())
                .collect::<RawRow>(),
        );
    }

    debug!(rows = rows.len(), columns = headers.len(), "read CSV rows");
    Ok((headers, rows))
}

/// Read CSV bytes and clean them into run records in one step.
///
/// The header is checked against [`ColumnMap::required_columns`] before any
/// row is cleaned, so a wrong column mapping fails even when the file has
/// no rows or only `ERROR` rows.
///
/// # Errors
///
/// Any ingestion error, or [`CsvError::Reduce`] for a missing required
/// column or when cleaning fails.
///
/// # Examples
///
/// ```
/// use benchtab_core::ColumnMap;
/// use benchtab_csv::{read_records, FromCsvConfig};
///
/// let csv = b"N,NB,Time(s),GFLOPS,Status\n1000,32,1.0,50,OK\n1000,64,ERROR,ERROR,ERROR\n";
/// let report = read_records(csv, &FromCsvConfig::default(), &ColumnMap::hpl()).unwrap();
/// assert_eq!(report.records.len(), 1);
/// assert_eq!(report.dropped, vec![1]);
/// ```
pub fn read_records(
    bytes: &[u8],
    config: &FromCsvConfig,
    columns: &ColumnMap,
) -> Result<CleanReport> {
    let text = decode(bytes)?;
    let (headers, rows) = read_table(text.as_bytes(), config)?;
    columns.check_headers(headers.iter().map(String::as_str))?;
    Ok(clean_with_report(&rows, columns)?)
}

fn validate_headers(record: &csv::StringRecord) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(record.len());

    for (position, raw) in record.iter().enumerate() {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CsvError::InvalidHeader {
                position,
                reason: "empty column name".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(CsvError::InvalidHeader {
                position,
                reason: format!("duplicate column name '{}'", name),
            });
        }
        names.push(name.to_string());
    }

    Ok(names)
}

fn parse_error(err: csv::Error, fallback_line: usize) -> CsvError {
    let line = err
        .position()
        .map(|pos| pos.line() as usize)
        .unwrap_or(fallback_line);
    CsvError::ParseError {
        line,
        message: err.to_string(),
    }
}

/// Decode file bytes to text based on the byte order mark.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes, "UTF-16LE"),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes, "UTF-16BE"),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|e| CsvError::Encoding {
            encoding: "UTF-8",
            reason: e.to_string(),
        })
}

fn decode_utf16(
    bytes: &[u8],
    unit: fn([u8; 2]) -> u16,
    encoding: &'static str,
) -> Result<Cow<'static, str>> {
    if bytes.len() % 2 != 0 {
        return Err(CsvError::Encoding {
            encoding,
            reason: "odd number of bytes".to_string(),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    debug!(encoding, units = units.len(), "decoding UTF-16 input");
    String::from_utf16(&units)
        .map(Cow::Owned)
        .map_err(|e| CsvError::Encoding {
            encoding,
            reason: e.to_string(),
        })
}
