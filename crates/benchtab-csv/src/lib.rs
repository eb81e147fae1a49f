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

//! CSV ingestion and enriched export for benchmark result tables.
//!
//! Reads result files written by benchmark drivers into [`RawRow`]s for
//! the reducer, and writes derived records back out with an efficiency
//! column.
//!
//! # Features
//!
//! - **Encoding detection**: UTF-8 (with or without BOM) and UTF-16 with BOM
//! - **Header validation**: empty and duplicate column names are rejected
//! - **Security limits**: configurable maximum row count
//! - **Sorted export**: rows ordered by primary then secondary key
//!
//! # Examples
//!
//! ```
//! use benchtab_core::{derive, ColumnMap};
//! use benchtab_csv::{read_records, to_enriched_csv, FromCsvConfig, ToCsvConfig};
//!
//! let csv = "N,NB,Time(s),GFLOPS,Status\n\
//!            5000,64,3.1,53.7,OK\n\
//!            1000,64,0.8,62.5,OK\n\
//!            1000,32,1.0,50,OK\n";
//!
//! let columns = ColumnMap::hpl();
//! let report = read_records(csv.as_bytes(), &FromCsvConfig::default(), &columns).unwrap();
//! let derived = derive(&report.records, 60.0).unwrap();
//!
//! let out = to_enriched_csv(&derived, &columns, &ToCsvConfig::default()).unwrap();
//! let first = out.lines().nth(1).unwrap();
//! assert!(first.starts_with("1000,32,"));
//! ```
//!
//! [`RawRow`]: benchtab_core::RawRow

mod error;
mod from_csv;
mod to_csv;

pub use error::{CsvError, Result};
pub use from_csv::{
    decode, read_records, read_rows, read_rows_from_bytes, read_rows_from_reader, FromCsvConfig,
    DEFAULT_MAX_ROWS,
};
pub use to_csv::{enriched_headers, to_enriched_csv, write_enriched, ToCsvConfig};
