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

//! Core reducer for tabular benchmark results.
//!
//! Turns raw result rows (one per benchmark run) into cleaned records,
//! attaches an efficiency percentage relative to a theoretical peak, and
//! reduces them into grouped summaries:
//!
//! - [`clean`]: drop `ERROR` rows, parse keys and measurements
//! - [`derive`]: `efficiency_pct = throughput / peak * 100`
//! - [`summarize_by`]: per-key statistics with best and worst records
//! - [`improvement`]: best-over-worst throughput ratio of a group
//! - [`speedup`] and [`normalize`]: cross-configuration views
//! - [`analyze`]: everything above in one pass
//!
//! The same reducer handles HPL sweeps (N by NB) and memory-stride sweeps
//! (stride by optimization level); [`ColumnMap`] says which column plays
//! which role.
//!
//! # Example
//!
//! ```
//! use benchtab_core::{clean, derive, improvement, summarize_by, ColumnMap, Key, RawRow};
//!
//! let rows = vec![
//!     RawRow::from_iter([("N", "1000"), ("NB", "32"), ("Time(s)", "1.0"), ("GFLOPS", "50"), ("Status", "OK")]),
//!     RawRow::from_iter([("N", "1000"), ("NB", "64"), ("Time(s)", "0.8"), ("GFLOPS", "62.5"), ("Status", "OK")]),
//!     RawRow::from_iter([("N", "1000"), ("NB", "128"), ("Time(s)", "5.0"), ("GFLOPS", "10"), ("Status", "ERROR")]),
//! ];
//!
//! let records = derive(&clean(&rows, &ColumnMap::hpl()).unwrap(), 60.0).unwrap();
//! let groups = summarize_by(&records, |r| r.record.primary_key.clone());
//! let group = &groups[&Key::Int(1000)];
//!
//! assert_eq!(group.len(), 2);
//! assert_eq!(group.best.record.secondary_key, Key::Int(64));
//! assert_eq!(improvement(&group.records).unwrap().ratio, 1.25);
//! ```

pub mod analysis;
mod clean;
pub mod compare;
pub mod config;
mod derive;
mod error;
mod improvement;
mod key;
pub mod overview;
mod record;
pub mod stats;
pub mod summary;

pub use analysis::{analyze, analyze_records, Analysis, OptimalParameter};
pub use clean::{clean, clean_with_report, CleanReport};
pub use compare::{
    normalize, speedup, NormalizedPoint, NormalizedSeries, RatioAt, SpeedupPoint, SpeedupReport,
};
pub use config::{ColumnMap, GroupBy, ReducerConfig, SecondarySource};
pub use derive::{derive, efficiency_pct, validate_peak};
pub use error::{ReduceError, Result};
pub use improvement::{improvement, Improvement};
pub use key::{Key, Status, ERROR_SENTINEL};
pub use overview::Overview;
pub use record::{DerivedRecord, Measured, RawRow, RunRecord};
pub use stats::Statistics;
pub use summary::{best, summarize_by, worst, GroupSummary};
