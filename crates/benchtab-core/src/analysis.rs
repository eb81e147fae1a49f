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

//! End-to-end reduction: clean, derive, then every summary view.

use crate::clean::clean_with_report;
use crate::config::{ColumnMap, GroupBy, ReducerConfig};
use crate::derive::derive;
use crate::error::{ReduceError, Result};
use crate::improvement::Improvement;
use crate::key::Key;
use crate::overview::Overview;
use crate::record::{DerivedRecord, RawRow};
use crate::summary::{summarize_by, GroupSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Best setting of the varied parameter for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalParameter {
    /// Key of the group (e.g. N).
    pub group_key: Key,
    /// Varied parameter of the best record (e.g. NB).
    pub parameter: Key,
    pub elapsed_seconds: f64,
    pub throughput: f64,
    pub efficiency_pct: f64,
}

/// Every view over one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Column mapping the rows were read with.
    pub columns: ColumnMap,
    /// System description from the configuration.
    pub metadata: BTreeMap<String, String>,
    pub theoretical_peak: f64,
    /// Selector used for `groups`.
    pub group_by: GroupBy,
    pub overview: Overview,
    /// Summaries by the configured key.
    pub groups: BTreeMap<Key, GroupSummary<Key>>,
    /// Summaries by the complementary key.
    pub parameter_effect: BTreeMap<Key, GroupSummary<Key>>,
    /// Best-over-worst per group. Groups whose worst throughput is 0 are
    /// left out.
    pub improvements: BTreeMap<Key, Improvement>,
    /// Best parameter per group, ascending by group key.
    pub optimal: Vec<OptimalParameter>,
    /// Derived records in input order.
    #[serde(skip)]
    pub records: Vec<DerivedRecord>,
}

impl Analysis {
    /// Name of the grouping key column.
    pub fn group_key_name(&self) -> &str {
        self.group_by.key_name(&self.columns)
    }

    /// Name of the varied parameter column.
    pub fn parameter_name(&self) -> &str {
        self.group_by.other().key_name(&self.columns)
    }
}

/// Run the whole pipeline over raw rows.
///
/// # Errors
///
/// Any error from configuration validation, [`clean`](crate::clean) or
/// [`derive`](crate::derive). No partial result is returned.
///
/// # Examples
///
/// ```
/// use benchtab_core::{analyze, Key, RawRow, ReducerConfig};
///
/// let row = |nb: &str, t: &str, g: &str, s: &str| {
///     RawRow::from_iter([("N", "1000"), ("NB", nb), ("Time(s)", t), ("GFLOPS", g), ("Status", s)])
/// };
/// let rows = vec![
///     row("32", "1.0", "50", "OK"),
///     row("64", "0.8", "62.5", "OK"),
///     row("128", "5.0", "10", "ERROR"),
/// ];
/// let analysis = analyze(&rows, &ReducerConfig::new(60.0)).unwrap();
/// assert_eq!(analysis.overview.dropped_errors, 1);
/// assert_eq!(analysis.improvements[&Key::Int(1000)].ratio, 1.25);
/// assert_eq!(analysis.optimal[0].parameter, Key::Int(64));
/// ```
pub fn analyze(rows: &[RawRow], config: &ReducerConfig) -> Result<Analysis> {
    config.validate()?;
    let report = clean_with_report(rows, &config.columns)?;
    let derived = derive(&report.records, config.theoretical_peak)?;
    analyze_records(derived, report.dropped.len(), config)
}

/// Run the summary views over already derived records.
///
/// `dropped_errors` is only carried into the overview.
pub fn analyze_records(
    records: Vec<DerivedRecord>,
    dropped_errors: usize,
    config: &ReducerConfig,
) -> Result<Analysis> {
    config.validate()?;
    let group_by = config.group_by;
    let varied = group_by.other();

    let groups = summarize_by(&records, |r| group_by.select(r).clone());
    let parameter_effect = summarize_by(&records, |r| varied.select(r).clone());

    let mut improvements = BTreeMap::new();
    for (key, summary) in &groups {
        match summary.improvement() {
            Ok(gain) => {
                improvements.insert(key.clone(), gain);
            }
            Err(ReduceError::DivisionByZero { .. }) => {
                warn!(group = %key, "worst throughput is 0, skipping improvement");
            }
            Err(e) => return Err(e),
        }
    }

    let optimal = groups
        .values()
        .map(|summary| OptimalParameter {
            group_key: summary.key.clone(),
            parameter: varied.select(&summary.best).clone(),
            elapsed_seconds: summary.best.record.elapsed_seconds,
            throughput: summary.best.record.throughput,
            efficiency_pct: summary.best.efficiency_pct,
        })
        .collect();

    let overview = Overview::build(&records, dropped_errors, config.theoretical_peak);
    info!(
        retained = overview.retained,
        dropped = dropped_errors,
        groups = groups.len(),
        "analysis complete"
    );

    Ok(Analysis {
        columns: config.columns.clone(),
        metadata: config.metadata.clone(),
        theoretical_peak: config.theoretical_peak,
        group_by,
        overview,
        groups,
        parameter_effect,
        improvements,
        optimal,
        records,
    })
}
