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

//! Reduction commands: full analysis, enriched export and comparison.

use super::args::{ColumnArgs, GroupByArg, PeakArgs, ReportFormat};
use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Commands that read result files and reduce them.
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Analyze benchmark result files
    ///
    /// Drops failed runs, derives efficiency against the theoretical peak and
    /// prints per-group statistics, best and worst configurations, the gain
    /// of best over worst and the optimal parameter per group.
    Analyze {
        /// Result CSV files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        #[command(flatten)]
        peak: PeakArgs,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Key to group the main summary by
        #[arg(long, value_enum, default_value_t = GroupByArg::Primary)]
        group_by: GroupByArg,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export cleaned records with an efficiency column as CSV
    ///
    /// Rows are sorted by primary then secondary key.
    Export {
        /// Result CSV files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        #[command(flatten)]
        peak: PeakArgs,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Decimal places for the efficiency column
        #[arg(long, value_name = "DIGITS")]
        precision: Option<usize>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compare two configurations: speedup and normalized throughput
    Compare {
        /// Result CSV files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Secondary key of the reference configuration (e.g. O0)
        #[arg(long)]
        baseline: String,

        /// Secondary key of the compared configuration (e.g. O2)
        #[arg(long)]
        candidate: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl ReportCommands {
    /// Execute the report command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            ReportCommands::Analyze {
                files,
                peak,
                columns,
                group_by,
                format,
                output,
            } => commands::analyze(&files, &peak, &columns, group_by.into(), format, output.as_deref()),
            ReportCommands::Export {
                files,
                peak,
                columns,
                precision,
                output,
            } => commands::export(&files, &peak, &columns, precision, output.as_deref()),
            ReportCommands::Compare {
                files,
                columns,
                baseline,
                candidate,
                format,
                output,
            } => commands::compare(&files, &columns, &baseline, &candidate, format, output.as_deref()),
        }
    }
}
