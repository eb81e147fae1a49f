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

//! Console reporter.
//!
//! Headings are colored through `colored`, which honors `NO_COLOR` and
//! `CLICOLOR_FORCE`; table rows are always plain.

use super::{opt, Comparison};
use benchtab_core::{Analysis, GroupSummary, Key};
use colored::Colorize;
use std::collections::BTreeMap;

const WIDTH: usize = 80;

fn banner(out: &mut String, title: &str) {
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out.push_str(&format!("{}\n", title.bold()));
    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", title.bright_blue().bold()));
    out.push_str(&format!("{}\n", "-".repeat(WIDTH)));
}

/// Render the full analysis as plain-text tables.
pub fn analysis_text(analysis: &Analysis) -> String {
    let key = analysis.group_key_name();
    let param = analysis.parameter_name();
    let overview = &analysis.overview;
    let mut out = String::new();

    banner(&mut out, "BENCHMARK ANALYSIS");
    for (name, value) in &analysis.metadata {
        out.push_str(&format!("{:<20} {}\n", format!("{}:", name), value));
    }
    out.push_str(&format!(
        "{:<20} {:.2}\n",
        "Theoretical peak:", analysis.theoretical_peak
    ));

    section(&mut out, "SUMMARY");
    out.push_str(&format!(
        "Runs: {} total, {} completed, {} failed\n",
        overview.total_rows, overview.retained, overview.dropped_errors
    ));
    if let Some(peak) = &overview.peak {
        out.push_str(&format!(
            "Peak throughput: {:.2} ({}={}, {}={})\n",
            peak.record.throughput,
            analysis.columns.primary,
            peak.record.primary_key,
            analysis.columns.secondary_name(),
            peak.record.secondary_key
        ));
    }
    out.push_str(&format!(
        "Max efficiency: {}%\n",
        opt(overview.max_efficiency_pct, 2)
    ));
    out.push_str(&format!(
        "Elapsed range: {} .. {}\n",
        opt(overview.min_elapsed, 2),
        opt(overview.max_elapsed, 2)
    ));
    out.push_str(&format!(
        "{} values: {}\n{} values: {}\n",
        analysis.columns.primary,
        join(&overview.primary_keys),
        analysis.columns.secondary_name(),
        join(&overview.secondary_keys)
    ));

    section(&mut out, &format!("BEST AND WORST {} PER {}", param, key));
    out.push_str(&format!(
        "{:>10} | {:>8} {:>10} {:>8} | {:>8} {:>10} {:>8} | {:>8}\n",
        key, "best", "thrpt", "eff%", "worst", "thrpt", "eff%", "gain%"
    ));
    for (group_key, summary) in &analysis.groups {
        let gain = analysis
            .improvements
            .get(group_key)
            .map(|g| format!("{:>8.1}", g.percent))
            .unwrap_or_else(|| format!("{:>8}", "N/A"));
        out.push_str(&format!(
            "{:>10} | {:>8} {:>10.2} {:>8.1} | {:>8} {:>10.2} {:>8.1} | {}\n",
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

    section(&mut out, &format!("STATISTICS BY {}", key));
    stats_table(&mut out, key, &analysis.groups);

    section(&mut out, &format!("STATISTICS BY {}", param));
    stats_table(&mut out, param, &analysis.parameter_effect);

    section(&mut out, &format!("OPTIMAL {} PER {}", param, key));
    out.push_str(&format!(
        "{:>10} {:>10} {:>10} {:>12} {:>8}\n",
        key, param, "elapsed", "throughput", "eff%"
    ));
    for optimal in &analysis.optimal {
        out.push_str(&format!(
            "{:>10} {:>10} {:>10.2} {:>12.2} {:>8.1}\n",
            optimal.group_key,
            optimal.parameter,
            optimal.elapsed_seconds,
            optimal.throughput,
            optimal.efficiency_pct
        ));
    }

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out
}

fn stats_table(out: &mut String, key: &str, groups: &BTreeMap<Key, GroupSummary<Key>>) {
    out.push_str(&format!(
        "{:>10} {:>5} {:>10} {:>10} {:>10} {:>10} {:>8} {:>10}\n",
        key, "runs", "mean", "std", "min", "max", "eff%", "elapsed"
    ));
    for (group_key, summary) in groups {
        let t = &summary.throughput;
        out.push_str(&format!(
            "{:>10} {:>5} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.1} {:>10.2}\n",
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

fn join(keys: &[Key]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a comparison as plain-text tables.
pub fn comparison_text(comparison: &Comparison) -> String {
    let speedup = &comparison.speedup;
    let key = &comparison.key_name;
    let mut out = String::new();

    banner(
        &mut out,
        &format!("COMPARISON: {} vs {}", speedup.candidate, speedup.baseline),
    );

    section(&mut out, "SPEEDUP (baseline time / candidate time)");
    out.push_str(&format!(
        "{:>10} {:>12} {:>12} {:>9}\n",
        key,
        speedup.baseline.to_string(),
        speedup.candidate.to_string(),
        "speedup"
    ));
    for point in &speedup.points {
        out.push_str(&format!(
            "{:>10} {:>12.3} {:>12.3} {:>8.2}x\n",
            point.key, point.baseline_elapsed, point.candidate_elapsed, point.ratio
        ));
    }
    if let Some(max) = &speedup.max {
        out.push_str(&format!("Maximum speedup: {:.2}x ({}={})\n", max.ratio, key, max.key));
    }
    if let Some(min) = &speedup.min {
        out.push_str(&format!("Minimum speedup: {:.2}x ({}={})\n", min.ratio, key, min.key));
    }
    out.push_str(&format!("Average speedup: {}x\n", opt(speedup.mean, 2)));
    if !speedup.unmatched.is_empty() {
        out.push_str(&format!("Unmatched {}: {}\n", key, join(&speedup.unmatched)));
    }

    for series in &comparison.series {
        section(
            &mut out,
            &format!("{}: THROUGHPUT RELATIVE TO {}={}", series.label, key, series.baseline_key),
        );
        for point in &series.points {
            out.push_str(&format!(
                "{:>10} {:>12.2} {:>8.1}%\n",
                point.key, point.throughput, point.relative_pct
            ));
        }
        out.push_str(&format!(
            "Performance degradation: {:.1}%\nLargest drop at {}={}\n",
            series.degradation_pct, key, series.largest_drop
        ));
    }

    out.push_str(&format!("{}\n", "=".repeat(WIDTH)));
    out
}
