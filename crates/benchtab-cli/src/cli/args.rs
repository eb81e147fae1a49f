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

//! Arguments shared by several commands.

use crate::config::HardwareProfile;
use crate::error::CliError;
use benchtab_core::config::HPL_SECONDARY;
use benchtab_core::{ColumnMap, GroupBy};
use benchtab_csv::FromCsvConfig;
use clap::{Args, ValueEnum};
use std::path::Path;

/// How result columns map onto record fields.
#[derive(Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    /// Use the stride benchmark layout (stride, time(msec), rate(MB/s)),
    /// labelling every file by name
    #[arg(long)]
    pub stride: bool,

    /// Primary key column [default: N]
    #[arg(long, value_name = "COLUMN")]
    pub primary: Option<String>,

    /// Secondary key column [default: NB]
    #[arg(long, value_name = "COLUMN", conflicts_with_all = ["label_files", "labels"])]
    pub secondary: Option<String>,

    /// Elapsed-time column [default: Time(s)]
    #[arg(long, value_name = "COLUMN")]
    pub elapsed: Option<String>,

    /// Throughput column [default: GFLOPS]
    #[arg(long, value_name = "COLUMN")]
    pub throughput: Option<String>,

    /// Status column [default: Status]
    #[arg(long, value_name = "COLUMN", conflicts_with = "no_status")]
    pub status: Option<String>,

    /// Treat every row as completed (no status column)
    #[arg(long)]
    pub no_status: bool,

    /// Take the secondary key from a per-file label instead of a column
    #[arg(long)]
    pub label_files: bool,

    /// Per-file labels, in input order [default: file stems]
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub labels: Vec<String>,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,
}

impl ColumnArgs {
    /// Whether secondary keys come from per-file labels.
    pub fn labelled(&self) -> bool {
        self.stride || self.label_files || !self.labels.is_empty()
    }

    /// Column mapping for the `index`-th of `total` input files.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `--labels` does not name every file.
    pub fn column_map(&self, file: &str, index: usize, total: usize) -> Result<ColumnMap, CliError> {
        if !self.labels.is_empty() && self.labels.len() != total {
            return Err(CliError::invalid_input(format!(
                "--labels has {} entries for {} input files",
                self.labels.len(),
                total
            )));
        }

        let mut map = if self.stride {
            ColumnMap::stride(self.label_for(file, index))
        } else {
            ColumnMap::hpl()
        };

        if let Some(primary) = &self.primary {
            map = map.with_primary(primary);
        }
        if self.labelled() {
            map = map.with_secondary_label(self.label_for(file, index));
        } else {
            map = map.with_secondary_column(self.secondary.as_deref().unwrap_or(HPL_SECONDARY));
        }
        if let Some(elapsed) = &self.elapsed {
            map = map.with_elapsed(elapsed);
        }
        if let Some(throughput) = &self.throughput {
            map = map.with_throughput(throughput);
        }
        if self.no_status {
            map = map.with_status(None);
        } else if let Some(status) = &self.status {
            map = map.with_status(Some(status.clone()));
        }

        Ok(map)
    }

    fn label_for(&self, file: &str, index: usize) -> String {
        self.labels.get(index).cloned().unwrap_or_else(|| {
            Path::new(file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.to_string())
        })
    }

    /// CSV reader settings.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a non-ASCII delimiter.
    pub fn csv_config(&self) -> Result<FromCsvConfig, CliError> {
        if !self.delimiter.is_ascii() {
            return Err(CliError::invalid_input(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            )));
        }
        Ok(FromCsvConfig {
            delimiter: self.delimiter as u8,
            ..Default::default()
        })
    }
}

/// Where the theoretical peak comes from.
#[derive(Args, Debug, Clone)]
pub struct PeakArgs {
    /// Theoretical peak throughput of the machine
    #[arg(long, value_name = "PEAK", required_unless_present = "profile")]
    pub peak: Option<f64>,

    /// Hardware profile (YAML, or JSON by extension) with the peak and system facts
    #[arg(long, value_name = "PATH", conflicts_with = "peak")]
    pub profile: Option<String>,
}

impl PeakArgs {
    /// Resolve the hardware profile.
    pub fn hardware_profile(&self) -> Result<HardwareProfile, CliError> {
        match (&self.profile, self.peak) {
            (Some(path), _) => HardwareProfile::load(path),
            (None, Some(peak)) => Ok(HardwareProfile::from_peak(peak)),
            (None, None) => Err(CliError::invalid_input("either --peak or --profile is required")),
        }
    }
}

/// Report output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain-text tables
    #[default]
    Text,
    /// Markdown tables
    Markdown,
    /// Pretty-printed JSON
    Json,
}

/// Grouping key for the main summary.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupByArg {
    /// Group by the primary key (N, stride)
    #[default]
    Primary,
    /// Group by the secondary key (NB, label)
    Secondary,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::Primary => GroupBy::Primary,
            GroupByArg::Secondary => GroupBy::Secondary,
        }
    }
}
