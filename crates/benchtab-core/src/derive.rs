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

//! Efficiency derivation.

use crate::error::{ReduceError, Result};
use crate::record::{DerivedRecord, RunRecord};

/// Check that a theoretical peak is usable as a divisor.
pub fn validate_peak(theoretical_peak: f64) -> Result<()> {
    if theoretical_peak.is_finite() && theoretical_peak > 0.0 {
        Ok(())
    } else {
        Err(ReduceError::invalid_config(
            "theoretical_peak",
            format!("must be a positive finite number, got {}", theoretical_peak),
        ))
    }
}

/// Efficiency of `throughput` relative to `theoretical_peak`, in percent.
#[inline]
pub fn efficiency_pct(throughput: f64, theoretical_peak: f64) -> f64 {
    throughput / theoretical_peak * 100.0
}

/// Attach an efficiency percentage to every record.
///
/// Values above 100 are kept as they are: they mean the configured peak
/// underestimates the hardware, which is worth reporting.
///
/// # Errors
///
/// `InvalidConfiguration` if `theoretical_peak` is not a positive finite
/// number.
///
/// # Examples
///
/// ```
/// use benchtab_core::{derive, Key, RunRecord, Status};
///
/// let record = RunRecord {
///     row: 0,
///     primary_key: Key::Int(1000),
///     secondary_key: Key::Int(64),
///     elapsed_seconds: 0.8,
///     throughput: 62.5,
///     status: Status::Ok,
/// };
/// let derived = derive(&[record], 60.0).unwrap();
/// assert!((derived[0].efficiency_pct - 104.1667).abs() < 1e-3);
/// ```
pub fn derive(records: &[RunRecord], theoretical_peak: f64) -> Result<Vec<DerivedRecord>> {
    validate_peak(theoretical_peak)?;

    Ok(records
        .iter()
        .map(|record| DerivedRecord {
            record: record.clone(),
            efficiency_pct: efficiency_pct(record.throughput, theoretical_peak),
        })
        .collect())
}
