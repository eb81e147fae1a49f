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

//! Descriptive statistics over one measured quantity.

use crate::error::{ReduceError, Result};
use serde::Serialize;

/// Count, mean, sample standard deviation and range of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample (N-1) standard deviation; 0 for a single value.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Statistics {
    /// Computes statistics over `values`.
    ///
    /// The standard deviation uses the sample definition (divisor N-1). A
    /// single value has no spread to estimate, and by convention its
    /// standard deviation is reported as 0 rather than as an error.
    ///
    /// # Errors
    ///
    /// `EmptyGroup` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtab_core::Statistics;
    ///
    /// let stats = Statistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert!((stats.std_dev - 2.138).abs() < 1e-3);
    ///
    /// let single = Statistics::from_values(&[40.0]).unwrap();
    /// assert_eq!(single.std_dev, 0.0);
    /// ```
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ReduceError::EmptyGroup);
        }
        Ok(Self::compute(values))
    }

    /// Callers guarantee `values` is non-empty.
    pub(crate) fn compute(values: &[f64]) -> Self {
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        let std_dev = if count > 1 {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            mean,
            std_dev,
            min,
            max,
        }
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_error() {
        assert_eq!(Statistics::from_values(&[]), Err(ReduceError::EmptyGroup));
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let stats = Statistics::from_values(&[40.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 40.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, 40.0);
        assert_eq!(stats.max, 40.0);
    }

    #[test]
    fn test_sample_std_dev() {
        // mean 62.5/50 pair: deviations 6.25, sample variance 2 * 39.0625 / 1
        let stats = Statistics::from_values(&[50.0, 62.5]).unwrap();
        assert_eq!(stats.mean, 56.25);
        assert!((stats.std_dev - 8.838_834_76).abs() < 1e-6);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 62.5);
    }

    #[test]
    fn test_mean_helper() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
