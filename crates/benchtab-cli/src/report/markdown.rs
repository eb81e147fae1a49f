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

//! Markdown export for reports.

use super::{opt, Comparison};
use benchtab_core::{Analysis, GroupSummary, Key};
use std::collections::BTreeMap;

/// Render the full analysis as Markdown.
pub fn analysis_markdown(analysis: &Analysis) -> String {
    let key = analysis.group_key_name();
    let param = analysis.parameter_name();
    let overview = &analysis.overview;
    let mut md = String::new();

    md.push_str("# Benchmark Analysis\n\n");

    if !analysis.metadata.is_empty() {
        md.push_str("## System\n\n");
        for (name, value) in &analysis.metadata {
            md.push_str(&format!("- **{}:** {}\n", name, value));
        }
        md.push('\n');
    }

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "- **Theoretical peak:** {:.2}\n",
        analysis.theoretical_peak
    ));
    md.push_str(&format!(
        "- **Runs:** {} total, {} completed, {} failed\n",
        overview.total_rows, overview.retained, overview.dropped_errors
    ));
    if let Some(peak) = &overview.peak {
        md.push_str(&format!(
            "- **Peak throughput:** {:.2} ({}={}, {}={})\n",
            peak.record.throughput,
            analysis.columns.primary,
            peak.record.primary_key,
            analysis.columns.secondary_name(),
            peak.record.secondary_key
        ));
    }
    md.push_str(&format!(
        "- **Max efficiency:** {}%\n\n",
        opt(overview.max_efficiency_pct, 2)
    ));

    md.push_str(&format!("## Best and Worst {} per {}\n\n", param, key));
    md.push_str(&format!(
        "| {} | Best {} | Throughput | Efficiency (%) | Worst {} | Throughput | Efficiency (%) | Gain (%) |\n",
        key, param, param
    ));
    md.push_str("|---|---|---|---|---|---|---|---|\n");
    for (group_key, summary) in &analysis.groups {
        let gain = analysis
            .improvements
            .get(group_key)
            .map(|g| format!("{:.1}", g.percent))
            .unwrap_or_else(|| "N/A".to_string());
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.1} | {} | {:.2} | {:.1} | {} |\n",
            group_key,
            analysis.group_by.other().select(&summary.best),
            summary.best.record.throughput,
            summary.best.efficiency_pct,
            analysis.group_by.other().select(&summary.worst),
            summary.worst.record.throughput,
            summary.worst.efficiency_pct,
            gain
        ));
    }

    md.push_str(&format!("\n## Statistics by {}\n\n", key));
    stats_table(&mut md, key, &analysis.groups);

    md.push_str(&format!("\n## Statistics by {}\n\n", param));
    stats_table(&mut md, param, &analysis.parameter_effect);

    md.push_str(&format!("\n## Optimal {} per {}\n\n", param, key));
    md.push_str(&format!(
        "| {} | {} | Elapsed | Throughput | Efficiency (%) |\n",
        key, param
    ));
    md.push_str("|---|---|---|---|---|\n");
    for optimal in &analysis.optimal {
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} | {:.1} |\n",
            optimal.group_key,
            optimal.parameter,
            optimal.elapsed_seconds,
            optimal.throughput,
            optimal.efficiency_pct
        ));
    }

    md
}

fn stats_table(md: &mut String, key: &str, groups: &BTreeMap<Key, GroupSummary<Key>>) {
    md.push_str(&format!(
        "| {} | Runs | Mean | Std | Min | Max | Efficiency (%) | Elapsed |\n",
        key
    ));
    md.push_str("|---|---|---|---|---|---|---|---|\n");
    for (group_key, summary) in groups {
        let t = &summary.throughput;
        md.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.1} | {:.2} |\n",
            group_key,
            t.count,
            t.mean,
            t.std_dev,
            t.min,
            t.max,
            summary.efficiency.mean,
            summary.elapsed.mean
        ));
    }
}

/// Render a comparison as Markdown.
pub fn comparison_markdown(comparison: &Comparison) -> String {
    let speedup = &comparison.speedup;
    let key = &comparison.key_name;
    let mut md = String::new();

    md.push_str(&format!(
        "# Comparison: {} vs {}\n\n## Speedup\n\n",
        speedup.candidate, speedup.baseline
    ));
    md.push_str(&format!(
        "| {} | {} time | {} time | Speedup |\n|---|---|---|---|\n",
        key, speedup.baseline, speedup.candidate
    ));
    for point in &speedup.points {
        md.push_str(&format!(
            "| {} | {:.3} | {:.3} | {:.2}x |\n",
            point.key, point.baseline_elapsed, point.candidate_elapsed, point.ratio
        ));
    }
    md.push('\n');
    if let (Some(max), Some(min)) = (&speedup.max, &speedup.min) {
        md.push_str(&format!(
            "- **Maximum:** {:.2}x at {}={}\n- **Minimum:** {:.2}x at {}={}\n",
            max.ratio, key, max.key, min.ratio, key, min.key
        ));
    }
    md.push_str(&format!("- **Average:** {}x\n", opt(speedup.mean, 2)));

    md.push_str("\n## Relative Throughput\n\n");
    md.push_str("| Label | Baseline | Degradation (%) | Largest drop |\n|---|---|---|---|\n");
    for series in &comparison.series {
        md.push_str(&format!(
            "| {} | {}={} | {:.1} | {}={} |\n",
            series.label, key, series.baseline_key, series.degradation_pct, key, series.largest_drop
        ));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_analysis_markdown() {
        let md = analysis_markdown(&fixtures::analysis());
        assert!(md.starts_with("# Benchmark Analysis"));
        assert!(md.contains("- **CPU:** Intel Core i7-1255U"));
        assert!(md.contains("| 1000 | 64 | 62.50 | 104.2 | 32 | 50.00 | 83.3 | 25.0 |"));
        assert!(md.contains("## Optimal NB per N"));
    }

    #[test]
    fn test_comparison_markdown_to_file() {
        let temp = NamedTempFile::new().unwrap();
        fs::write(temp.path(), comparison_markdown(&fixtures::comparison())).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("# Comparison: O2 vs O0"));
        assert!(content.contains("| 1 | 10.000 | 2.500 | 4.00x |"));
        assert!(content.contains("| O0 | stride=1 | 12.5 | stride=2 |"));
    }
}
