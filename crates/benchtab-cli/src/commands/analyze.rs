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

//! Analyze command - full reduction report

use super::{load_records, write_output};
use crate::cli::{ColumnArgs, PeakArgs, ReportFormat};
use crate::error::CliError;
use crate::report::render_analysis;
use benchtab_core::{analyze_records, derive, GroupBy};

/// Load result files and print the full analysis.
///
/// # Errors
///
/// Any load, configuration, reducer or output error.
pub fn analyze(
    files: &[String],
    peak: &PeakArgs,
    columns: &ColumnArgs,
    group_by: GroupBy,
    format: ReportFormat,
    output: Option<&str>,
) -> Result<(), CliError> {
    let profile = peak.hardware_profile()?;
    let loaded = load_records(files, columns)?;
    let config = profile.reducer_config(loaded.columns, group_by);

    let derived = derive(&loaded.records, config.theoretical_peak)?;
    let analysis = analyze_records(derived, loaded.dropped, &config)?;

    if output.is_some() {
        colored::control::set_override(false);
    }
    write_output(&render_analysis(&analysis, format)?, output)
}
