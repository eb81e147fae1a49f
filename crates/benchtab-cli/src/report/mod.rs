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

//! Report rendering for analysis and comparison results.
//!
//! Every renderer returns the full report as a `String`; the command
//! decides whether it goes to stdout or a file.

mod console;
mod json;
mod markdown;

use crate::cli::ReportFormat;
use crate::error::CliError;
use benchtab_core::{Analysis, NormalizedSeries, SpeedupReport};
use serde::Serialize;

pub use console::{analysis_text, comparison_text};
pub use json::to_json;
pub use markdown::{analysis_markdown, comparison_markdown};

/// Speedup and normalization views over one set of records.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Primary key column name.
    pub key_name: String,
    pub speedup: SpeedupReport,
    pub series: Vec<NormalizedSeries>,
}

/// Render an analysis in `format`.
pub fn render_analysis(analysis: &Analysis, format: ReportFormat) -> Result<String, CliError> {
    match format {
        ReportFormat::Text => Ok(analysis_text(analysis)),
        ReportFormat::Markdown => Ok(analysis_markdown(analysis)),
        ReportFormat::Json => to_json(analysis),
    }
}

/// Render a comparison in `format`.
pub fn render_comparison(comparison: &Comparison, format: ReportFormat) -> Result<String, CliError> {
    match format {
        ReportFormat::Text => Ok(comparison_text(comparison)),
        ReportFormat::Markdown => Ok(comparison_markdown(comparison)),
        ReportFormat::Json => to_json(comparison),
    }
}

/// Format an optional number, or `N/A`.
pub(crate) fn opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "N/A".to_string())
}
