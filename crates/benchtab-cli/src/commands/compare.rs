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

//! Compare command - speedup and normalized throughput of two configurations

use super::{load_records, write_output};
use crate::cli::{ColumnArgs, ReportFormat};
use crate::error::CliError;
use crate::report::{render_comparison, Comparison};
use benchtab_core::{normalize, speedup, Key};

/// Compare `candidate` against `baseline` across primary keys.
///
/// Labels are parsed like any key, so `--baseline 32` matches an integral
/// secondary key.
///
/// # Errors
///
/// Any load or output error; `Reduce` if a label matches no record or a
/// ratio would divide by zero.
pub fn compare(
    files: &[String],
    columns: &ColumnArgs,
    baseline: &str,
    candidate: &str,
    format: ReportFormat,
    output: Option<&str>,
) -> Result<(), CliError> {
    let loaded = load_records(files, columns)?;

    let comparison = Comparison {
        key_name: loaded.columns.primary.clone(),
        speedup: speedup(&loaded.records, &Key::parse(baseline), &Key::parse(candidate))?,
        series: normalize(&loaded.records)?,
    };

    if output.is_some() {
        colored::control::set_override(false);
    }
    write_output(&render_comparison(&comparison, format)?, output)
}
