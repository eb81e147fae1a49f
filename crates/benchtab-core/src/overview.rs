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

//! Dataset-wide summary.

use crate::key::Key;
use crate::record::DerivedRecord;
use crate::summary::best;
use serde::Serialize;
use std::collections::BTreeSet;

/// Headline numbers for a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    /// Rows seen, including dropped ones.
    pub total_rows: usize,
    /// Rows kept after cleaning.
    pub retained: usize,
    /// Rows dropped for carrying the `ERROR` status.
    pub dropped_errors: usize,
    /// Distinct primary keys, ascending.
    pub primary_keys: Vec<Key>,
    /// Distinct secondary keys, ascending.
    pub secondary_keys: Vec<Key>,
    /// Configured efficiency divisor.
    pub theoretical_peak: f64,
    /// Record with the highest throughput; first occurrence on ties.
    pub peak: Option<DerivedRecord>,
    /// Highest efficiency.
    pub max_efficiency_pct: Option<f64>,
    /// Shortest run.
    pub min_elapsed: Option<f64>,
    /// Longest run.
    pub max_elapsed: Option<f64>,
}

impl Overview {
    /// Summarize derived records; `dropped_errors` comes from cleaning.
    pub fn build(records: &[DerivedRecord], dropped_errors: usize, theoretical_peak: f64) -> Self {
        let primary_keys: BTreeSet<Key> =
            records.iter().map(|r| r.record.primary_key.clone()).collect();
        let secondary_keys: BTreeSet<Key> =
            records.iter().map(|r| r.record.secondary_key.clone()).collect();

        let max_of = |values: &mut dyn Iterator<Item = f64>| values.reduce(f64::max);
        let min_of = |values: &mut dyn Iterator<Item = f64>| values.reduce(f64::min);

        Self {
            total_rows: records.len() + dropped_errors,
            retained: records.len(),
            dropped_errors,
            primary_keys: primary_keys.into_iter().collect(),
            secondary_keys: secondary_keys.into_iter().collect(),
            theoretical_peak,
            peak: best(records).ok().cloned(),
            max_efficiency_pct: max_of(&mut records.iter().map(|r| r.efficiency_pct)),
            min_elapsed: min_of(&mut records.iter().map(|r| r.record.elapsed_seconds)),
            max_elapsed: max_of(&mut records.iter().map(|r| r.record.elapsed_seconds)),
        }
    }
}
