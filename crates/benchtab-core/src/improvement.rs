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

//! Best-versus-worst improvement ratios.

use crate::error::{ReduceError, Result};
use crate::record::DerivedRecord;
use crate::summary::{best, worst};
use serde::Serialize;

/// How much faster the best configuration of a group is than the worst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Improvement {
    /// `best / worst` throughput.
    pub ratio: f64,
    /// `(best - worst) / worst * 100`.
    pub percent: f64,
}

impl Improvement {
    /// Improvement of throughput `best` over throughput `worst`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if `worst` is 0.
    pub fn between(best: f64, worst: f64) -> Result<Self> {
        if worst == 0.0 {
            return Err(ReduceError::division_by_zero(
                "improvement ratio (worst throughput is 0)",
            ));
        }
        Ok(Self {
            ratio: best / worst,
            percent: (best - worst) / worst * 100.0,
        })
    }
}

/// Improvement of the best record of `group` over its worst record.
///
/// A single-record group is its own best and worst, giving a ratio of 1.0
/// and 0 percent.
///
/// # Errors
///
/// - `EmptyGroup` if `group` is empty
/// - `DivisionByZero` if the worst throughput is 0
///
/// # Examples
///
/// ```
/// use benchtab_core::{derive, improvement, Key, RunRecord, Status};
///
/// let run = |nb: i64, gflops: f64| RunRecord {
///     row: 0,
///     primary_key: Key::Int(1000),
///     secondary_key: Key::Int(nb),
///     elapsed_seconds: 1.0,
///     throughput: gflops,
///     status: Status::Ok,
/// };
/// let group = derive(&[run(32, 50.0), run(64, 62.5)], 60.0).unwrap();
/// let gain = improvement(&group).unwrap();
/// assert_eq!(gain.ratio, 1.25);
/// assert_eq!(gain.percent, 25.0);
/// ```
pub fn improvement(group: &[DerivedRecord]) -> Result<Improvement> {
    let best = best(group)?;
    let worst = worst(group)?;
    Improvement::between(best.record.throughput, worst.record.throughput)
}
