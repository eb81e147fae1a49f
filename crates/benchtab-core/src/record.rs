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

//! Raw rows, cleaned run records and derived records.

use crate::key::{Key, Status};
use serde::Serialize;

/// One untyped input row: column name to field text, in source order.
///
/// Column names may carry stray whitespace (HPL writes headers such as
/// `" GFLOPS"`); lookups through [`RawRow::get`] compare trimmed names.
///
/// # Examples
///
/// ```
/// use benchtab_core::RawRow;
///
/// let row = RawRow::new().with_field(" N ", "1000").with_field("GFLOPS", 50.0);
/// assert_eq!(row.get("N"), Some("1000"));
/// assert_eq!(row.get("GFLOPS"), Some("50"));
/// assert_eq!(row.get("NB"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a field. Lookups return the first field whose trimmed name
    /// matches, so a duplicate column never overrides an earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.fields.push((name.into(), value.to_string()));
    }

    /// Looks up a field by column name, ignoring surrounding whitespace on
    /// both the stored and the requested name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.fields
            .iter()
            .find(|(column, _)| column.trim() == wanted)
            .map(|(_, value)| value.as_str())
    }

    /// Returns a copy whose column names are trimmed.
    pub fn normalized(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, value)| (name.trim().to_string(), value.clone()))
                .collect(),
        }
    }

    /// Iterates over `(column, value)` pairs in source order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// One measured benchmark execution after cleaning.
///
/// `elapsed_seconds` and `throughput` are finite and non-negative. Their unit
/// is whatever the source column carries (seconds and GFLOPS for HPL,
/// milliseconds and MB/s for the stride benchmark).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    /// Zero-based index of the source row.
    pub row: usize,
    /// Primary parameter (matrix size N, stride).
    pub primary_key: Key,
    /// Secondary parameter (block size NB, optimization level).
    pub secondary_key: Key,
    /// Measured run time.
    pub elapsed_seconds: f64,
    /// Measured rate.
    pub throughput: f64,
    /// Always [`Status::Ok`] once cleaned.
    pub status: Status,
}

/// A [`RunRecord`] with its efficiency relative to the theoretical peak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRecord {
    /// The underlying measurement.
    #[serde(flatten)]
    pub record: RunRecord,
    /// `throughput / theoretical_peak * 100`; may exceed 100.
    pub efficiency_pct: f64,
}

/// Read access to the measured fields shared by run and derived records.
///
/// Views that only need keys and measurements (speedup, normalization) are
/// written against this trait so they accept either record kind.
pub trait Measured {
    /// Primary parameter.
    fn primary_key(&self) -> &Key;
    /// Secondary parameter.
    fn secondary_key(&self) -> &Key;
    /// Measured run time.
    fn elapsed_seconds(&self) -> f64;
    /// Measured rate.
    fn throughput(&self) -> f64;
}

impl Measured for RunRecord {
    fn primary_key(&self) -> &Key {
        &self.primary_key
    }

    fn secondary_key(&self) -> &Key {
        &self.secondary_key
    }

    fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    fn throughput(&self) -> f64 {
        self.throughput
    }
}

impl Measured for DerivedRecord {
    fn primary_key(&self) -> &Key {
        &self.record.primary_key
    }

    fn secondary_key(&self) -> &Key {
        &self.record.secondary_key
    }

    fn elapsed_seconds(&self) -> f64 {
        self.record.elapsed_seconds
    }

    fn throughput(&self) -> f64 {
        self.record.throughput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_trims_both_sides() {
        let row = RawRow::from_iter([("  Time(s) ", "1.5")]);
        assert_eq!(row.get("Time(s)"), Some("1.5"));
        assert_eq!(row.get(" Time(s)"), Some("1.5"));
    }

    #[test]
    fn test_first_match_wins() {
        let row = RawRow::new().with_field("N", 1).with_field(" N", 2);
        assert_eq!(row.get("N"), Some("1"));
    }

    #[test]
    fn test_normalized_trims_names_only() {
        let row = RawRow::new().with_field(" Status ", " OK ").normalized();
        let fields: Vec<_> = row.fields().collect();
        assert_eq!(fields, vec![("Status", " OK ")]);
    }

    #[test]
    fn test_measured_views_agree() {
        let record = RunRecord {
            row: 0,
            primary_key: Key::Int(1000),
            secondary_key: Key::Int(32),
            elapsed_seconds: 1.0,
            throughput: 50.0,
            status: Status::Ok,
        };
        let derived = DerivedRecord {
            record: record.clone(),
            efficiency_pct: 50.0,
        };
        assert_eq!(Measured::primary_key(&record), Measured::primary_key(&derived));
        assert_eq!(Measured::throughput(&record), Measured::throughput(&derived));
    }
}
