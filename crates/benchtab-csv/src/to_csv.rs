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

//! Write derived records as an enriched CSV table.

use crate::error::{CsvError, Result};
use benchtab_core::{ColumnMap, DerivedRecord};
use std::io::Write;
use tracing::debug;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
    /// Decimal places for the efficiency column (default: full precision)
    pub efficiency_precision: Option<usize>,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
            efficiency_precision: None,
        }
    }
}

/// Header row of an enriched export under `columns`.
///
/// The status column is only present when `columns` has one.
pub fn enriched_headers(columns: &ColumnMap) -> Vec<&str> {
    let mut headers = vec![
        columns.primary.as_str(),
        columns.secondary_name(),
        columns.elapsed.as_str(),
        columns.throughput.as_str(),
        columns.efficiency.as_str(),
    ];
    if let Some(status) = &columns.status {
        headers.push(status);
    }
    headers
}

/// Write `records` sorted by (primary, secondary) with an efficiency column.
///
/// Records with equal keys keep their input order.
///
/// # Examples
///
/// ```
/// use benchtab_core::{derive, ColumnMap, Key, RunRecord, Status};
/// use benchtab_csv::{write_enriched, ToCsvConfig};
///
/// let run = |n: i64, gflops: f64| RunRecord {
///     row: 0,
///     primary_key: Key::Int(n),
///     secondary_key: Key::Int(64),
///     elapsed_seconds: 1.0,
///     throughput: gflops,
///     status: Status::Ok,
/// };
/// let records = derive(&[run(5000, 54.0), run(1000, 48.0)], 60.0).unwrap();
///
/// let mut out = Vec::new();
/// write_enriched(&records, &ColumnMap::hpl(), &mut out, &ToCsvConfig::default()).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("N,NB,Time(s),GFLOPS,Efficiency(%),Status\n1000,64,1,48,80,OK\n"));
/// ```
pub fn write_enriched<W: Write>(
    records: &[DerivedRecord],
    columns: &ColumnMap,
    writer: W,
    config: &ToCsvConfig,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(enriched_headers(columns))?;
    }

    let mut sorted: Vec<&DerivedRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.record.primary_key, &a.record.secondary_key)
            .cmp(&(&b.record.primary_key, &b.record.secondary_key))
    });

    for derived in &sorted {
        let record = &derived.record;
        let efficiency = match config.efficiency_precision {
            Some(places) => format!("{:.*}", places, derived.efficiency_pct),
            None => derived.efficiency_pct.to_string(),
        };
        let mut fields = vec![
            record.primary_key.to_string(),
            record.secondary_key.to_string(),
            record.elapsed_seconds.to_string(),
            record.throughput.to_string(),
            efficiency,
        ];
        if columns.status.is_some() {
            fields.push(record.status.to_string());
        }
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    debug!(rows = sorted.len(), "wrote enriched CSV");
    Ok(())
}

/// Same as [`write_enriched`], returning the CSV text.
pub fn to_enriched_csv(
    records: &[DerivedRecord],
    columns: &ColumnMap,
    config: &ToCsvConfig,
) -> Result<String> {
    let mut buffer = Vec::with_capacity(64 * (records.len() + 1));
    write_enriched(records, columns, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| CsvError::Other("CSV output is not valid UTF-8".to_string()))
}
