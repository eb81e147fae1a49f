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

//! Reducer configuration.
//!
//! Column names, the grouping selector and the theoretical peak are all
//! supplied by the caller, so one reducer serves every hardware profile and
//! every benchmark shape.

use crate::derive::validate_peak;
use crate::error::{ReduceError, Result};
use crate::key::Key;
use crate::record::DerivedRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default HPL primary key column (matrix size).
pub const HPL_PRIMARY: &str = "N";
/// Default HPL secondary key column (block size).
pub const HPL_SECONDARY: &str = "NB";
/// Default HPL elapsed-time column.
pub const HPL_ELAPSED: &str = "Time(s)";
/// Default HPL throughput column.
pub const HPL_THROUGHPUT: &str = "GFLOPS";
/// Default HPL status column.
pub const HPL_STATUS: &str = "Status";

/// Stride benchmark primary key column.
pub const STRIDE_PRIMARY: &str = "stride";
/// Stride benchmark elapsed-time column.
pub const STRIDE_ELAPSED: &str = "time(msec)";
/// Stride benchmark throughput column.
pub const STRIDE_THROUGHPUT: &str = "rate(MB/s)";

/// Name of the derived efficiency column in exports.
pub const DEFAULT_EFFICIENCY_COLUMN: &str = "Efficiency(%)";
/// Header used for the secondary key when it comes from a label.
pub const LABEL_COLUMN: &str = "Label";

/// Where a record's secondary key comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondarySource {
    /// Read from the named column of every row.
    Column(String),
    /// Use the same label for every row of the input, e.g. the
    /// optimization level a whole stride file was compiled with.
    Label(String),
}

/// Mapping from record fields to input column names.
///
/// # Examples
///
/// ```
/// use benchtab_core::{ColumnMap, SecondarySource};
///
/// let hpl = ColumnMap::default();
/// assert_eq!(hpl.primary, "N");
/// assert_eq!(hpl.status.as_deref(), Some("Status"));
///
/// let stride = ColumnMap::stride("O2");
/// assert_eq!(stride.secondary, SecondarySource::Label("O2".to_string()));
/// assert_eq!(stride.status, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Primary key column.
    pub primary: String,
    /// Secondary key source.
    pub secondary: SecondarySource,
    /// Elapsed-time column.
    pub elapsed: String,
    /// Throughput column.
    pub throughput: String,
    /// Status column; `None` treats every row as completed.
    pub status: Option<String>,
    /// Header of the derived efficiency column in exports.
    pub efficiency: String,
}

impl ColumnMap {
    /// Column layout written by the HPL driver script.
    pub fn hpl() -> Self {
        Self {
            primary: HPL_PRIMARY.to_string(),
            secondary: SecondarySource::Column(HPL_SECONDARY.to_string()),
            elapsed: HPL_ELAPSED.to_string(),
            throughput: HPL_THROUGHPUT.to_string(),
            status: Some(HPL_STATUS.to_string()),
            efficiency: DEFAULT_EFFICIENCY_COLUMN.to_string(),
        }
    }

    /// Column layout of one stride benchmark file, labelled with the
    /// optimization level it was built with.
    pub fn stride(label: impl Into<String>) -> Self {
        Self {
            primary: STRIDE_PRIMARY.to_string(),
            secondary: SecondarySource::Label(label.into()),
            elapsed: STRIDE_ELAPSED.to_string(),
            throughput: STRIDE_THROUGHPUT.to_string(),
            status: None,
            efficiency: DEFAULT_EFFICIENCY_COLUMN.to_string(),
        }
    }

    /// Sets the primary key column.
    pub fn with_primary(mut self, column: impl Into<String>) -> Self {
        self.primary = column.into();
        self
    }

    /// Reads the secondary key from a column.
    pub fn with_secondary_column(mut self, column: impl Into<String>) -> Self {
        self.secondary = SecondarySource::Column(column.into());
        self
    }

    /// Uses a constant secondary key for every row.
    pub fn with_secondary_label(mut self, label: impl Into<String>) -> Self {
        self.secondary = SecondarySource::Label(label.into());
        self
    }

    /// Sets the elapsed-time column.
    pub fn with_elapsed(mut self, column: impl Into<String>) -> Self {
        self.elapsed = column.into();
        self
    }

    /// Sets the throughput column.
    pub fn with_throughput(mut self, column: impl Into<String>) -> Self {
        self.throughput = column.into();
        self
    }

    /// Sets or clears the status column.
    pub fn with_status(mut self, column: Option<String>) -> Self {
        self.status = column;
        self
    }

    /// Sets the exported efficiency header.
    pub fn with_efficiency(mut self, column: impl Into<String>) -> Self {
        self.efficiency = column.into();
        self
    }

    /// Display name of the secondary key.
    pub fn secondary_name(&self) -> &str {
        match &self.secondary {
            SecondarySource::Column(name) => name,
            SecondarySource::Label(_) => LABEL_COLUMN,
        }
    }

    /// Columns every input table must carry. A labelled secondary key
    /// needs no column.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.primary.as_str()];
        if let SecondarySource::Column(name) = &self.secondary {
            columns.push(name);
        }
        columns.push(&self.elapsed);
        columns.push(&self.throughput);
        if let Some(status) = &self.status {
            columns.push(status);
        }
        columns
    }

    /// Check a table header against [`required_columns`](Self::required_columns).
    ///
    /// Names are compared after trimming, so this holds even for a table
    /// with no data rows.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` naming the first required column not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtab_core::ColumnMap;
    ///
    /// let columns = ColumnMap::hpl();
    /// assert!(columns.check_headers(["N", " NB ", "Time(s)", "GFLOPS", "Status"]).is_ok());
    /// assert!(columns.check_headers(["N", "NB", "Time(s)", "GFLOPZ", "Status"]).is_err());
    /// ```
    pub fn check_headers<'a, I>(&self, headers: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: Vec<&str> = headers.into_iter().map(str::trim).collect();
        match self
            .required_columns()
            .into_iter()
            .find(|column| !present.contains(&column.trim()))
        {
            Some(missing) => Err(ReduceError::missing_column(missing.trim())),
            None => Ok(()),
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::hpl()
    }
}

/// Which key partitions records into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group by the primary key (N, stride).
    #[default]
    Primary,
    /// Group by the secondary key (NB, optimization level).
    Secondary,
}

impl GroupBy {
    /// Key of `record` under this selector.
    pub fn select<'a>(&self, record: &'a DerivedRecord) -> &'a Key {
        match self {
            GroupBy::Primary => &record.record.primary_key,
            GroupBy::Secondary => &record.record.secondary_key,
        }
    }

    /// The complementary selector: the parameter varied inside a group.
    pub fn other(&self) -> GroupBy {
        match self {
            GroupBy::Primary => GroupBy::Secondary,
            GroupBy::Secondary => GroupBy::Primary,
        }
    }

    /// Display name of the selected key under `columns`.
    pub fn key_name<'a>(&self, columns: &'a ColumnMap) -> &'a str {
        match self {
            GroupBy::Primary => &columns.primary,
            GroupBy::Secondary => columns.secondary_name(),
        }
    }
}

/// Everything the reducer needs to know about a dataset.
///
/// There is no `Default`: the theoretical peak belongs to the hardware
/// being measured and must always be stated.
///
/// # Examples
///
/// ```
/// use benchtab_core::{ColumnMap, GroupBy, ReducerConfig};
///
/// let config = ReducerConfig::new(60.0)
///     .with_columns(ColumnMap::hpl())
///     .with_group_by(GroupBy::Primary)
///     .with_metadata("CPU", "Intel Core i7-1255U");
/// assert!(config.validate().is_ok());
/// assert!(ReducerConfig::new(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducerConfig {
    /// Upper-bound throughput used as the efficiency divisor.
    pub theoretical_peak: f64,
    /// Column mapping.
    #[serde(default)]
    pub columns: ColumnMap,
    /// Grouping selector for the main summary.
    #[serde(default)]
    pub group_by: GroupBy,
    /// Free-form system description carried into reports.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ReducerConfig {
    /// Creates a configuration with HPL columns grouped by primary key.
    pub fn new(theoretical_peak: f64) -> Self {
        Self {
            theoretical_peak,
            columns: ColumnMap::default(),
            group_by: GroupBy::default(),
            metadata: BTreeMap::new(),
        }
    }

    /// Sets the column mapping.
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the grouping selector.
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Adds one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Checks the theoretical peak.
    pub fn validate(&self) -> Result<()> {
        validate_peak(self.theoretical_peak)
    }
}
