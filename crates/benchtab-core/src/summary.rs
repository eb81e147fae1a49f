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

//! Grouping and per-group summaries.
//!
//! Best and worst selection is stable: among records with equal throughput
//! the one that appears first in the input wins.

use crate::error::{ReduceError, Result};
use crate::improvement::Improvement;
use crate::record::DerivedRecord;
use crate::stats::Statistics;
use serde::Serialize;
use std::collections::BTreeMap;

/// Record with the highest throughput; first occurrence on ties.
///
/// # Errors
///
/// `EmptyGroup` if `group` is empty.
pub fn best(group: &[DerivedRecord]) -> Result<&DerivedRecord> {
    best_index(group)
        .map(|idx| &group[idx])
        .ok_or(ReduceError::EmptyGroup)
}

/// Record with the lowest throughput; first occurrence on ties.
///
/// # Errors
///
/// `EmptyGroup` if `group` is empty.
pub fn worst(group: &[DerivedRecord]) -> Result<&DerivedRecord> {
    worst_index(group)
        .map(|idx| &group[idx])
        .ok_or(ReduceError::EmptyGroup)
}

fn best_index(group: &[DerivedRecord]) -> Option<usize> {
    extreme_index(group, |candidate, current| candidate > current)
}

fn worst_index(group: &[DerivedRecord]) -> Option<usize> {
    extreme_index(group, |candidate, current| candidate < current)
}

// Strict comparison keeps the earliest record on ties.
fn extreme_index(group: &[DerivedRecord], beats: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut iter = group.iter().enumerate();
    let (mut found, first) = iter.next()?;
    let mut current = first.record.throughput;
    for (idx, record) in iter {
        if beats(record.record.throughput, current) {
            found = idx;
            current = record.record.throughput;
        }
    }
    Some(found)
}

/// Reduction of all records sharing one key value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary<K> {
    /// The shared key value.
    pub key: K,
    /// Member records in input order.
    #[serde(skip)]
    pub records: Vec<DerivedRecord>,
    /// Record with the highest throughput.
    pub best: DerivedRecord,
    /// Record with the lowest throughput.
    pub worst: DerivedRecord,
    /// Statistics of `elapsed_seconds`.
    pub elapsed: Statistics,
    /// Statistics of `throughput`.
    pub throughput: Statistics,
    /// Statistics of `efficiency_pct`.
    pub efficiency: Statistics,
}

impl<K> GroupSummary<K> {
    /// Summarizes an externally assembled group.
    ///
    /// # Errors
    ///
    /// `EmptyGroup` if `records` is empty.
    pub fn from_records(key: K, records: Vec<DerivedRecord>) -> Result<Self> {
        let best = best_index(&records).ok_or(ReduceError::EmptyGroup)?;
        let worst = worst_index(&records).ok_or(ReduceError::EmptyGroup)?;

        let elapsed: Vec<f64> = records.iter().map(|r| r.record.elapsed_seconds).collect();
        let throughput: Vec<f64> = records.iter().map(|r| r.record.throughput).collect();
        let efficiency: Vec<f64> = records.iter().map(|r| r.efficiency_pct).collect();

        Ok(Self {
            key,
            best: records[best].clone(),
            worst: records[worst].clone(),
            elapsed: Statistics::compute(&elapsed),
            throughput: Statistics::compute(&throughput),
            efficiency: Statistics::compute(&efficiency),
            records,
        })
    }

    /// Number of member records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for summaries built by this module.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best-versus-worst throughput ratio of this group.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if the worst throughput is 0.
    pub fn improvement(&self) -> Result<Improvement> {
        Improvement::between(self.best.record.throughput, self.worst.record.throughput)
    }
}

/// Partition `records` by `key_selector` and summarize every partition.
///
/// The map holds exactly one entry per distinct key, ordered by key.
/// Records keep their input order inside each group, which is what makes
/// best/worst tie-breaking deterministic.
///
/// # Examples
///
/// ```
/// use benchtab_core::{clean, derive, summarize_by, ColumnMap, Key, RawRow};
///
/// let rows: Vec<RawRow> = [("32", "1.0", "50"), ("64", "0.8", "62.5")]
///     .iter()
///     .map(|&(nb, t, g)| RawRow::from_iter([("N", "1000"), ("NB", nb), ("Time(s)", t), ("GFLOPS", g), ("Status", "OK")]))
///     .collect();
/// let records = derive(&clean(&rows, &ColumnMap::hpl()).unwrap(), 60.0).unwrap();
///
/// let groups = summarize_by(&records, |r| r.record.primary_key.clone());
/// let group = &groups[&Key::Int(1000)];
/// assert_eq!(group.best.record.secondary_key, Key::Int(64));
/// assert_eq!(group.worst.record.secondary_key, Key::Int(32));
/// ```
pub fn summarize_by<K, F>(records: &[DerivedRecord], mut key_selector: F) -> BTreeMap<K, GroupSummary<K>>
where
    K: Ord + Clone,
    F: FnMut(&DerivedRecord) -> K,
{
    let mut partitions: BTreeMap<K, Vec<DerivedRecord>> = BTreeMap::new();
    for record in records {
        partitions
            .entry(key_selector(record))
            .or_default()
            .push(record.clone());
    }

    partitions
        .into_iter()
        .filter_map(|(key, members)| {
            GroupSummary::from_records(key.clone(), members)
                .ok()
                .map(|summary| (key, summary))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, Status};
    use crate::record::RunRecord;

    fn rec(primary: i64, secondary: i64, elapsed: f64, throughput: f64) -> DerivedRecord {
        DerivedRecord {
            record: RunRecord {
                row: 0,
                primary_key: Key::Int(primary),
                secondary_key: Key::Int(secondary),
                elapsed_seconds: elapsed,
                throughput,
                status: Status::Ok,
            },
            efficiency_pct: throughput / 60.0 * 100.0,
        }
    }

    #[test]
    fn test_best_and_worst_empty() {
        assert_eq!(best(&[]).unwrap_err(), ReduceError::EmptyGroup);
        assert_eq!(worst(&[]).unwrap_err(), ReduceError::EmptyGroup);
        assert_eq!(
            GroupSummary::from_records(Key::Int(1), vec![]).unwrap_err(),
            ReduceError::EmptyGroup
        );
    }

    #[test]
    fn test_ties_resolve_to_first_occurrence() {
        let group = vec![
            rec(1000, 8, 1.0, 40.0),
            rec(1000, 16, 1.0, 55.0),
            rec(1000, 32, 1.0, 55.0),
            rec(1000, 64, 1.0, 40.0),
        ];
        assert_eq!(best(&group).unwrap().record.secondary_key, Key::Int(16));
        assert_eq!(worst(&group).unwrap().record.secondary_key, Key::Int(8));
    }

    #[test]
    fn test_one_summary_per_key() {
        let records = vec![
            rec(5000, 32, 3.0, 45.0),
            rec(1000, 32, 1.0, 50.0),
            rec(5000, 64, 2.5, 52.0),
            rec(1000, 64, 0.8, 62.5),
        ];
        let groups = summarize_by(&records, |r| r.record.primary_key.clone());
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(keys, vec![Key::Int(1000), Key::Int(5000)]);
        assert_eq!(groups[&Key::Int(5000)].len(), 2);
        assert_eq!(groups[&Key::Int(5000)].best.record.secondary_key, Key::Int(64));
    }

    #[test]
    fn test_statistics_cover_whole_group() {
        let records = vec![
            rec(1000, 8, 2.0, 30.0),
            rec(1000, 16, 1.0, 50.0),
            rec(1000, 32, 1.5, 40.0),
        ];
        let groups = summarize_by(&records, |r| r.record.primary_key.clone());
        let summary = &groups[&Key::Int(1000)];
        assert_eq!(summary.throughput.count, 3);
        assert_eq!(summary.throughput.mean, 40.0);
        assert_eq!(summary.throughput.std_dev, 10.0);
        assert_eq!(summary.elapsed.min, 1.0);
        assert_eq!(summary.elapsed.max, 2.0);
        assert!((summary.efficiency.mean - 66.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_group_by_secondary() {
        let records = vec![
            rec(1000, 32, 1.0, 50.0),
            rec(5000, 32, 3.0, 45.0),
            rec(1000, 64, 0.8, 62.5),
        ];
        let groups = summarize_by(&records, |r| r.record.secondary_key.clone());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Key::Int(32)].len(), 2);
        assert_eq!(groups[&Key::Int(32)].best.record.primary_key, Key::Int(1000));
    }

    #[test]
    fn test_single_record_group() {
        let groups = summarize_by(&[rec(1000, 32, 1.0, 40.0)], |r| r.record.primary_key.clone());
        let summary = &groups[&Key::Int(1000)];
        assert_eq!(summary.throughput.std_dev, 0.0);
        assert_eq!(summary.best, summary.worst);
        let improvement = summary.improvement().unwrap();
        assert_eq!(improvement.ratio, 1.0);
        assert_eq!(improvement.percent, 0.0);
    }
}
