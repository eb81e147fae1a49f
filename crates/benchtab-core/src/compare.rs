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

//! Cross-configuration views: speedup between two secondary keys and
//! throughput normalized against the smallest primary key.
//!
//! Repeated runs of the same (primary, secondary) pair are averaged before
//! any ratio is taken.

use crate::error::{ReduceError, Result};
use crate::key::Key;
use crate::record::Measured;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Speedup of the candidate over the baseline at one primary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupPoint {
    /// Primary key shared by both configurations.
    pub key: Key,
    /// Mean elapsed time of the baseline.
    pub baseline_elapsed: f64,
    /// Mean elapsed time of the candidate.
    pub candidate_elapsed: f64,
    /// `baseline_elapsed / candidate_elapsed`.
    pub ratio: f64,
}

/// A ratio together with the primary key it was observed at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioAt {
    pub key: Key,
    pub ratio: f64,
}

/// Pairwise speedup of two secondary keys across primary keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupReport {
    /// Reference configuration.
    pub baseline: Key,
    /// Configuration being compared against the baseline.
    pub candidate: Key,
    /// One point per shared primary key, ascending.
    pub points: Vec<SpeedupPoint>,
    /// Largest ratio; first occurrence on ties.
    pub max: Option<RatioAt>,
    /// Smallest ratio; first occurrence on ties.
    pub min: Option<RatioAt>,
    /// Mean of all ratios.
    pub mean: Option<f64>,
    /// Primary keys measured for only one of the two configurations.
    pub unmatched: Vec<Key>,
}

/// Compare the elapsed time of `candidate` against `baseline`.
///
/// # Errors
///
/// - `InvalidConfiguration` if either secondary key has no records
/// - `DivisionByZero` if a candidate mean elapsed time is 0
///
/// # Examples
///
/// ```
/// use benchtab_core::{speedup, Key, RunRecord, Status};
///
/// let run = |stride: i64, level: &str, msec: f64| RunRecord {
///     row: 0,
///     primary_key: Key::Int(stride),
///     secondary_key: Key::from(level),
///     elapsed_seconds: msec,
///     throughput: 1.0,
///     status: Status::Ok,
/// };
/// let records = vec![run(1, "O0", 8.0), run(1, "O2", 2.0), run(2, "O0", 9.0), run(2, "O2", 3.0)];
/// let report = speedup(&records, &Key::from("O0"), &Key::from("O2")).unwrap();
/// assert_eq!(report.points[0].ratio, 4.0);
/// assert_eq!(report.max.unwrap().key, Key::Int(1));
/// ```
pub fn speedup<R: Measured>(records: &[R], baseline: &Key, candidate: &Key) -> Result<SpeedupReport> {
    let base = mean_by_primary(records, baseline, |r| r.elapsed_seconds());
    let cand = mean_by_primary(records, candidate, |r| r.elapsed_seconds());

    for (label, series) in [(baseline, &base), (candidate, &cand)] {
        if series.is_empty() {
            return Err(ReduceError::invalid_config(
                "comparison",
                format!("no records for '{}'", label),
            ));
        }
    }

    let mut points = Vec::new();
    let mut unmatched = Vec::new();
    for (key, &baseline_elapsed) in &base {
        let Some(&candidate_elapsed) = cand.get(key) else {
            unmatched.push(key.clone());
            continue;
        };
        if candidate_elapsed == 0.0 {
            return Err(ReduceError::division_by_zero(format!(
                "speedup at {} ('{}' elapsed time is 0)",
                key, candidate
            )));
        }
        points.push(SpeedupPoint {
            key: key.clone(),
            baseline_elapsed,
            candidate_elapsed,
            ratio: baseline_elapsed / candidate_elapsed,
        });
    }
    unmatched.extend(cand.keys().filter(|k| !base.contains_key(*k)).cloned());
    unmatched.sort();

    debug!(
        baseline = %baseline,
        candidate = %candidate,
        points = points.len(),
        unmatched = unmatched.len(),
        "computed speedup"
    );

    let ratios: Vec<f64> = points.iter().map(|p| p.ratio).collect();
    Ok(SpeedupReport {
        baseline: baseline.clone(),
        candidate: candidate.clone(),
        max: extreme(&points, |a, b| a > b),
        min: extreme(&points, |a, b| a < b),
        mean: crate::stats::mean(&ratios),
        points,
        unmatched,
    })
}

fn extreme(points: &[SpeedupPoint], beats: impl Fn(f64, f64) -> bool) -> Option<RatioAt> {
    let mut found = points.first()?;
    for point in &points[1..] {
        if beats(point.ratio, found.ratio) {
            found = point;
        }
    }
    Some(RatioAt {
        key: found.key.clone(),
        ratio: found.ratio,
    })
}

/// Throughput at one primary key relative to the series baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub key: Key,
    /// Mean throughput over repeated runs.
    pub throughput: f64,
    /// `throughput / baseline_throughput * 100`.
    pub relative_pct: f64,
}

/// Normalized throughput of one secondary key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    /// The secondary key this series belongs to.
    pub label: Key,
    /// Smallest primary key of the series.
    pub baseline_key: Key,
    /// Points ascending by primary key; the first is always 100 %.
    pub points: Vec<NormalizedPoint>,
    /// `(1 - last / first) * 100`.
    pub degradation_pct: f64,
    /// Primary key furthest below the baseline; first occurrence on ties.
    pub largest_drop: Key,
}

/// Normalize every secondary key's throughput against its smallest primary key.
///
/// # Errors
///
/// `DivisionByZero` if a baseline throughput is 0.
pub fn normalize<R: Measured>(records: &[R]) -> Result<Vec<NormalizedSeries>> {
    let mut by_label: BTreeMap<Key, BTreeMap<Key, (f64, usize)>> = BTreeMap::new();
    for record in records {
        let slot = by_label
            .entry(record.secondary_key().clone())
            .or_default()
            .entry(record.primary_key().clone())
            .or_insert((0.0, 0));
        slot.0 += record.throughput();
        slot.1 += 1;
    }

    let mut series = Vec::with_capacity(by_label.len());
    for (label, sums) in by_label {
        let means: Vec<(Key, f64)> = sums
            .into_iter()
            .map(|(key, (sum, count))| (key, sum / count as f64))
            .collect();
        // Non-empty: every label entry was created alongside one primary entry.
        let Some((baseline_key, baseline)) = means.first().cloned() else {
            continue;
        };
        if baseline == 0.0 {
            return Err(ReduceError::division_by_zero(format!(
                "normalization of '{}' (throughput at {} is 0)",
                label, baseline_key
            )));
        }

        let last = means.last().map_or(baseline, |(_, t)| *t);
        let mut largest_drop = baseline_key.clone();
        let mut deepest = 0.0;
        for (key, throughput) in &means {
            let drop = baseline - throughput;
            if drop > deepest {
                deepest = drop;
                largest_drop = key.clone();
            }
        }

        series.push(NormalizedSeries {
            points: means
                .iter()
                .map(|(key, throughput)| NormalizedPoint {
                    key: key.clone(),
                    throughput: *throughput,
                    relative_pct: throughput / baseline * 100.0,
                })
                .collect(),
            degradation_pct: (1.0 - last / baseline) * 100.0,
            label,
            baseline_key,
            largest_drop,
        });
    }

    Ok(series)
}

fn mean_by_primary<R: Measured>(
    records: &[R],
    label: &Key,
    value: impl Fn(&R) -> f64,
) -> BTreeMap<Key, f64> {
    let mut sums: BTreeMap<Key, (f64, usize)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.secondary_key() == label) {
        let slot = sums.entry(record.primary_key().clone()).or_insert((0.0, 0));
        slot.0 += value(record);
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect()
}
