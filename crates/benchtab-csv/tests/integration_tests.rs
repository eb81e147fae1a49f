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

//! Integration tests: result files on disk through ingestion and export.

use benchtab_core::{derive, ColumnMap, Key, RunRecord};
use benchtab_csv::{
    read_records, read_rows, write_enriched, CsvError, FromCsvConfig, ToCsvConfig,
};
use proptest::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const HPL_RESULTS: &str = "N,NB,Time(s),GFLOPS,Status\n\
                           5000,128,3.90,42.7,OK\n\
                           1000,64,0.80,62.5,OK\n\
                           1000,128,ERROR,ERROR,ERROR\n\
                           1000,32,1.00,50.0,OK\n\
                           5000,64,3.10,53.7,OK\n";

fn utf16le_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    file.write_all(&bytes).unwrap();
    file
}

#[test]
fn test_hpl_file_to_enriched_export() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(HPL_RESULTS.as_bytes()).unwrap();

    let columns = ColumnMap::hpl();
    let bytes = fs::read(input.path()).unwrap();
    let report = read_records(&bytes, &FromCsvConfig::default(), &columns).unwrap();
    assert_eq!(report.dropped, vec![2]);

    let derived = derive(&report.records, 60.0).unwrap();
    let output = NamedTempFile::new().unwrap();
    write_enriched(
        &derived,
        &columns,
        fs::File::create(output.path()).unwrap(),
        &ToCsvConfig {
            efficiency_precision: Some(2),
            ..Default::default()
        },
    )
    .unwrap();

    let exported = fs::read_to_string(output.path()).unwrap();
    let rows = read_rows(&exported, &FromCsvConfig::default()).unwrap();
    let order: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.get("N").unwrap(), r.get("NB").unwrap()))
        .collect();
    assert_eq!(
        order,
        vec![("1000", "32"), ("1000", "64"), ("5000", "64"), ("5000", "128")]
    );
    assert_eq!(rows[1].get("Efficiency(%)"), Some("104.17"));
    assert!(rows.iter().all(|r| r.get("Status") == Some("OK")));
}

#[test]
fn test_utf16_stride_files_with_labels() {
    let o0 = utf16le_file("stride,time(msec),rate(MB/s)\n1,10.0,800.0\n2,12.0,700.0\n");
    let o2 = utf16le_file("stride,time(msec),rate(MB/s)\n1,2.5,3200.0\n2,3.0,2800.0\n");

    let mut records: Vec<RunRecord> = Vec::new();
    for (file, label) in [(&o0, "O0"), (&o2, "O2")] {
        let bytes = fs::read(file.path()).unwrap();
        let report = read_records(&bytes, &FromCsvConfig::default(), &ColumnMap::stride(label)).unwrap();
        records.extend(report.records);
    }

    assert_eq!(records.len(), 4);
    assert_eq!(records[2].secondary_key, Key::from("O2"));
    assert_eq!(records[3].elapsed_seconds, 3.0);
}

#[test]
fn test_missing_column_is_configuration_error() {
    let csv = b"N,NB,Time(s),Gflops,Status\n1000,32,1.0,50,OK\n";
    let err = read_records(csv, &FromCsvConfig::default(), &ColumnMap::hpl()).unwrap_err();
    assert!(matches!(
        err,
        CsvError::Reduce(benchtab_core::ReduceError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_header_only_file_checks_columns() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(b"N,NB,Time(s),GFLOPS\n").unwrap();

    let bytes = fs::read(input.path()).unwrap();
    let err = read_records(&bytes, &FromCsvConfig::default(), &ColumnMap::hpl()).unwrap_err();
    assert!(matches!(
        err,
        CsvError::Reduce(benchtab_core::ReduceError::InvalidConfiguration { .. })
    ));
    assert!(err.to_string().contains("'Status'"));

    let ok = read_records(&bytes, &FromCsvConfig::default(), &ColumnMap::hpl().with_status(None))
        .unwrap();
    assert_eq!(ok.total_rows(), 0);
}

#[test]
fn test_all_error_rows_still_check_columns() {
    let csv = b"N,NB,Time(s),GFLOPZ,Status\n1000,32,ERROR,ERROR,ERROR\n";
    let err = read_records(csv, &FromCsvConfig::default(), &ColumnMap::hpl()).unwrap_err();
    assert!(matches!(
        err,
        CsvError::Reduce(benchtab_core::ReduceError::InvalidConfiguration { .. })
    ));
    assert!(err.to_string().contains("'GFLOPS'"));
}

#[test]
fn test_all_error_rows_with_valid_header() {
    let csv = b" N ,NB,Time(s),GFLOPS, Status\n1000,32,ERROR,ERROR,ERROR\n";
    let report = read_records(csv, &FromCsvConfig::default(), &ColumnMap::hpl()).unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.dropped, vec![0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: exported rows are ordered by (N, NB) and keep every record.
    #[test]
    fn prop_export_sorted(rows in prop::collection::vec((1_i64..20, 1_i64..8, 0.1_f64..90.0), 0..30)) {
        let mut csv = String::from("N,NB,Time(s),GFLOPS,Status\n");
        for (n, nb, g) in &rows {
            csv.push_str(&format!("{},{},1.0,{},OK\n", n * 1000, nb * 32, g));
        }
        let columns = ColumnMap::hpl();
        let report = read_records(csv.as_bytes(), &FromCsvConfig::default(), &columns).unwrap();
        let derived = derive(&report.records, 60.0).unwrap();

        let mut out = Vec::new();
        write_enriched(&derived, &columns, &mut out, &ToCsvConfig::default()).unwrap();
        let back = read_rows(std::str::from_utf8(&out).unwrap(), &FromCsvConfig::default()).unwrap();

        prop_assert_eq!(back.len(), rows.len());
        let keys: Vec<(i64, i64)> = back
            .iter()
            .map(|r| (r.get("N").unwrap().parse().unwrap(), r.get("NB").unwrap().parse().unwrap()))
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
