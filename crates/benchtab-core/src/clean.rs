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

//! Row validation: raw rows in, typed run records out.

use crate::config::{ColumnMap, SecondarySource};
use crate::error::{ReduceError, Result};
use crate::key::{Key, Status};
use crate::record::{RawRow, RunRecord};
use tracing::debug;

/// Outcome of cleaning, including which rows the `ERROR` filter removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    /// Retained records, in input order.
    pub records: Vec<RunRecord>,
    /// Zero-based indices of rows dropped for carrying the `ERROR` status.
    pub dropped: Vec<usize>,
}

impl CleanReport {
    /// Number of input rows seen.
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.dropped.len()
    }
}

/// Turn raw rows into run records.
///
/// Rows whose status is the `ERROR` sentinel are dropped. Every other row
/// must carry finite, non-negative numbers in its elapsed and throughput
/// columns; the first row that does not aborts the batch with
/// [`ReduceError::MalformedRecord`]. Output order follows input order.
///
/// The status match is case-sensitive, but surrounding whitespace in the
/// field is ignored: ` ERROR ` is dropped, `error` is kept. An elapsed time
/// of exactly 0 is accepted (timers with coarse resolution report it);
/// views that divide by elapsed time report `DivisionByZero` instead.
///
/// Headers are not checked here; rows are looked up lazily, so an input
/// with no retained rows never reports a missing column. Check the header
/// first with [`ColumnMap::check_headers`].
///
/// # Errors
///
/// - `MalformedRecord` for an unusable numeric field in a retained row
/// - `InvalidConfiguration` when a row lacks a configured column
///
/// # Examples
///
/// ```
/// use benchtab_core::{clean, ColumnMap, RawRow};
///
/// let rows = vec![
///     RawRow::from_iter([("N", "1000"), ("NB", "32"), ("Time(s)", "1.0"), ("GFLOPS", "50"), ("Status", "OK")]),
///     RawRow::from_iter([("N", "1000"), ("NB", "64"), ("Time(s)", "ERROR"), ("GFLOPS", "ERROR"), ("Status", "ERROR")]),
/// ];
/// let records = clean(&rows, &ColumnMap::hpl()).unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub fn clean(rows: &[RawRow], columns: &ColumnMap) -> Result<Vec<RunRecord>> {
    clean_with_report(rows, columns).map(|report| report.records)
}

/// Like [`clean`], also reporting which rows were dropped.
pub fn clean_with_report(rows: &[RawRow], columns: &ColumnMap) -> Result<CleanReport> {
    let mut records = Vec::with_capacity(rows.len());
    let mut dropped = Vec::new();

    for (row_idx, raw) in rows.iter().enumerate() {
        let row = raw.normalized();

        let status = match &columns.status {
            Some(column) => Status::parse(required(&row, column)?),
            None => Status::Ok,
        };
        if status == Status::Error {
            debug!(row = row_idx, "dropping row with ERROR status");
            dropped.push(row_idx);
            continue;
        }

        let primary_key = Key::parse(required(&row, &columns.primary)?);
        let secondary_key = match &columns.secondary {
            SecondarySource::Column(column) => Key::parse(required(&row, column)?),
            SecondarySource::Label(label) => Key::parse(label),
        };
        let elapsed_seconds = measurement(&row, &columns.elapsed, row_idx)?;
        let throughput = measurement(&row, &columns.throughput, row_idx)?;

        records.push(RunRecord {
            row: row_idx,
            primary_key,
            secondary_key,
            elapsed_seconds,
            throughput,
            status,
        });
    }

    debug!(
        retained = records.len(),
        dropped = dropped.len(),
        "cleaned benchmark rows"
    );

    Ok(CleanReport { records, dropped })
}

fn required<'a>(row: &'a RawRow, column: &str) -> Result<&'a str> {
    row.get(column)
        .ok_or_else(|| ReduceError::missing_column(column))
}

fn measurement(row: &RawRow, column: &str, row_idx: usize) -> Result<f64> {
    let field = required(row, column)?;
    let malformed = || ReduceError::MalformedRecord {
        row: row_idx,
        column: column.trim().to_string(),
        value: field.to_string(),
    };

    let value = field.trim().parse::<f64>().map_err(|_| malformed())?;
    if !value.is_finite() || value < 0.0 {
        return Err(malformed());
    }
    Ok(value)
}
