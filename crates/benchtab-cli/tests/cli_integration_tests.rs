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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

const HPL_RESULTS: &str = "N,NB,Time(s),GFLOPS,Status\n\
                           1000,32,1.00,50.0,OK\n\
                           1000,64,0.80,62.5,OK\n\
                           1000,128,ERROR,ERROR,ERROR\n\
                           5000,32,3.40,49.0,OK\n\
                           5000,64,3.10,53.7,OK\n";

// Test helper to create a benchtab command
fn benchtab_cmd() -> Command {
    let mut cmd = Command::cargo_bin("benchtab").expect("Failed to find benchtab binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// Test helper to create a temporary file with content
fn create_temp_file(content: &[u8], suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    benchtab_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchtab - benchmark result reducer"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_version_output() {
    benchtab_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("benchtab"));
}

#[test]
fn test_no_subcommand_fails() {
    benchtab_cmd().assert().failure();
}

// ===== Analyze Command Tests =====

#[test]
fn test_analyze_text_report() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Runs: 5 total, 4 completed, 1 failed"))
        .stdout(predicate::str::contains("Peak throughput: 62.50 (N=1000, NB=64)"))
        .stdout(predicate::str::contains("OPTIMAL NB PER N"));
}

#[test]
fn test_analyze_json_report() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    let output = benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["overview"]["retained"], 4);
    assert_eq!(value["improvements"]["1000"]["ratio"], 1.25);
    assert_eq!(value["optimal"][1]["parameter"], 64);
}

#[test]
fn test_analyze_with_profile_to_markdown_file() {
    let input = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");
    let profile = create_temp_file(
        b"name: lab-laptop\ntheoretical_peak: 60\nsystem:\n  CPU: Intel Core i7-1255U\n  Cores: 10\n",
        ".yaml",
    );
    let output = NamedTempFile::new().unwrap();

    benchtab_cmd()
        .arg("analyze")
        .arg(input.path())
        .arg("--profile")
        .arg(profile.path())
        .args(["--format", "markdown", "-o"])
        .arg(output.path())
        .assert()
        .success();

    let md = fs::read_to_string(output.path()).unwrap();
    assert!(md.contains("- **CPU:** Intel Core i7-1255U"));
    assert!(md.contains("- **Cores:** 10"));
    assert!(md.contains("| 1000 | 64 | 62.50 | 104.2 | 32 | 50.00 | 83.3 | 25.0 |"));
}

#[test]
fn test_analyze_group_by_secondary() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60", "--group-by", "secondary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OPTIMAL N PER NB"));
}

#[test]
fn test_analyze_requires_peak() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--peak"));
}

#[test]
fn test_analyze_zero_peak_fails() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid configuration for 'theoretical_peak'"));
}

#[test]
fn test_analyze_malformed_value_fails() {
    let file = create_temp_file(b"N,NB,Time(s),GFLOPS,Status\n1000,32,1.0,n/a,OK\n", ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Malformed record at row 0"));
}

#[test]
fn test_analyze_misspelled_column_with_only_failed_rows() {
    let file = create_temp_file(
        b"N,NB,Time(s),GFLOPS,Status\n1000,32,ERROR,ERROR,ERROR\n",
        ".csv",
    );

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60", "--throughput", "Gflops"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing required column 'Gflops'"));
}

#[test]
fn test_analyze_missing_file() {
    benchtab_cmd()
        .args(["analyze", "/no/such/results.csv", "--peak", "60"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/no/such/results.csv"));
}

#[test]
fn test_file_size_limit() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .env("BENCHTAB_MAX_FILE_SIZE", "10")
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");

    benchtab_cmd()
        .arg("analyze")
        .arg(file.path())
        .args(["--peak", "60", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded inputs"));
}

// ===== Export Command Tests =====

#[test]
fn test_export_sorted_with_efficiency() {
    let file = create_temp_file(HPL_RESULTS.as_bytes(), ".csv");
    let output = NamedTempFile::new().unwrap();

    benchtab_cmd()
        .arg("export")
        .arg(file.path())
        .args(["--peak", "60", "--precision", "2", "-o"])
        .arg(output.path())
        .assert()
        .success();

    let csv = fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "N,NB,Time(s),GFLOPS,Efficiency(%),Status");
    assert_eq!(lines[1], "1000,32,1,50,83.33,OK");
    assert_eq!(lines[2], "1000,64,0.8,62.5,104.17,OK");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_export_custom_columns_without_status() {
    let file = create_temp_file(b"size;block;secs;rate\n2;8;1.5;30\n1;8;0.5;20\n", ".csv");

    benchtab_cmd()
        .arg("export")
        .arg(file.path())
        .args([
            "--peak",
            "40",
            "--primary",
            "size",
            "--secondary",
            "block",
            "--elapsed",
            "secs",
            "--throughput",
            "rate",
            "--no-status",
            "--delimiter",
            ";",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "size,block,secs,rate,Efficiency(%)\n1,8,0.5,20,50\n2,8,1.5,30,75\n",
        ));
}

// ===== Compare Command Tests =====

#[test]
fn test_compare_utf16_stride_files() {
    let o0 = create_temp_file(
        &utf16le("stride,time(msec),rate(MB/s)\n1,10.0,800.0\n2,12.0,700.0\n4,20.0,400.0\n"),
        ".csv",
    );
    let o2 = create_temp_file(
        &utf16le("stride,time(msec),rate(MB/s)\n1,2.5,3200.0\n2,3.0,2800.0\n4,10.0,800.0\n"),
        ".csv",
    );

    benchtab_cmd()
        .arg("compare")
        .arg(o0.path())
        .arg(o2.path())
        .args(["--stride", "--labels", "O0,O2", "--baseline", "O0", "--candidate", "O2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maximum speedup: 4.00x (stride=1)"))
        .stdout(predicate::str::contains("Minimum speedup: 2.00x (stride=4)"))
        .stdout(predicate::str::contains("Performance degradation: 50.0%"))
        .stdout(predicate::str::contains("Performance degradation: 75.0%"));
}

#[test]
fn test_compare_unknown_label() {
    let o0 = create_temp_file(b"stride,time(msec),rate(MB/s)\n1,10.0,800.0\n", ".csv");

    benchtab_cmd()
        .arg("compare")
        .arg(o0.path())
        .args(["--stride", "--labels", "O0", "--baseline", "O0", "--candidate", "O3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no records for 'O3'"));
}

#[test]
fn test_compare_label_count_mismatch() {
    let o0 = create_temp_file(b"stride,time(msec),rate(MB/s)\n1,10.0,800.0\n", ".csv");

    benchtab_cmd()
        .arg("compare")
        .arg(o0.path())
        .args(["--stride", "--labels", "O0,O2", "--baseline", "O0", "--candidate", "O2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--labels has 2 entries for 1 input files"));
}

// ===== Completion Command Tests =====

#[test]
fn test_completion_bash() {
    benchtab_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchtab"));
}

#[test]
fn test_completion_install_instructions() {
    benchtab_cmd()
        .args(["completion", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("benchtab completion zsh"));
}

#[test]
fn test_completion_unsupported_shell() {
    benchtab_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell"));
}
