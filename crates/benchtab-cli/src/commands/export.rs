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

//! Export command - enriched CSV

use super::{load_records, write_output};
use crate::cli::{ColumnArgs, PeakArgs};
use crate::error::CliError;
use benchtab_core::derive;
use benchtab_csv::{to_enriched_csv, ToCsvConfig};

/// Write cleaned records with an efficiency column, sorted by key.
///
/// # Errors
///
/// Any load, reducer, CSV or output error.
pub fn export(
    files: &[String],
    peak: &PeakArgs,
    columns: &ColumnArgs,
    precision: Option<usize>,
    output: Option<&str>,
) -> Result<(), CliError> {
    let profile = peak.hardware_profile()?;
    let loaded = load_records(files, columns)?;
    let derived = derive(&loaded.records, profile.theoretical_peak)?;

    let config = ToCsvConfig {
        efficiency_precision: precision,
        ..Default::default()
    };
    let csv = to_enriched_csv(&derived, &loaded.columns, &config)?;
    write_output(&csv, output)
}
