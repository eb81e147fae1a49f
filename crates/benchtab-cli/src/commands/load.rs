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

//! Parallel loading of result files.

use super::read_file_bytes;
use crate::cli::ColumnArgs;
use crate::error::CliError;
use benchtab_core::{ColumnMap, RunRecord};
use benchtab_csv::read_records;
use rayon::prelude::*;
use tracing::{debug, info};

/// Cleaned records from every input file, in input order.
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    /// Records of all files concatenated.
    pub records: Vec<RunRecord>,
    /// Rows dropped for an `ERROR` status, over all files.
    pub dropped: usize,
    /// Column mapping of the first file; it names the export headers.
    pub columns: ColumnMap,
}

/// Read, decode and clean `files` in parallel.
///
/// Any failing file fails the whole load; the error names the file.
///
/// # Errors
///
/// `InvalidInput` when `files` is empty or the column flags are
/// inconsistent, `Io`/`FileTooLarge` for unreadable input, `Load` for CSV or
/// cleaning errors.
pub fn load_records(files: &[String], columns: &ColumnArgs) -> Result<LoadedRecords, CliError> {
    if files.is_empty() {
        return Err(CliError::invalid_input("no input files"));
    }
    let csv_config = columns.csv_config()?;
    let maps = files
        .iter()
        .enumerate()
        .map(|(idx, file)| columns.column_map(file, idx, files.len()))
        .collect::<Result<Vec<_>, _>>()?;

    let reports = files
        .par_iter()
        .zip(maps.par_iter())
        .map(|(file, map)| {
            let bytes = read_file_bytes(file)?;
            let report =
                read_records(&bytes, &csv_config, map).map_err(|e| CliError::load(file, e))?;
            debug!(
                file = %file,
                retained = report.records.len(),
                dropped = report.dropped.len(),
                "loaded result file"
            );
            Ok(report)
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    let dropped = reports.iter().map(|r| r.dropped.len()).sum();
    let records: Vec<RunRecord> = reports.into_iter().flat_map(|r| r.records).collect();
    info!(files = files.len(), records = records.len(), dropped, "loaded inputs");

    Ok(LoadedRecords {
        records,
        dropped,
        columns: maps.into_iter().next().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtab_core::Key;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn path(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    #[test]
    fn test_load_preserves_file_order() {
        let o0 = csv_file("stride,time(msec),rate(MB/s)\n1,10,800\n2,12,700\n");
        let o2 = csv_file("stride,time(msec),rate(MB/s)\n1,2.5,3200\n");
        let columns = ColumnArgs {
            stride: true,
            labels: vec!["O0".to_string(), "O2".to_string()],
            delimiter: ',',
            ..Default::default()
        };

        let loaded = load_records(&[path(&o0), path(&o2)], &columns).unwrap();
        let labels: Vec<Key> = loaded.records.iter().map(|r| r.secondary_key.clone()).collect();
        assert_eq!(labels, vec![Key::from("O0"), Key::from("O0"), Key::from("O2")]);
        assert_eq!(loaded.columns.primary, "stride");
    }

    #[test]
    fn test_load_counts_dropped_rows() {
        let hpl = csv_file("N,NB,Time(s),GFLOPS,Status\n1000,32,1.0,50,OK\n1000,64,ERROR,ERROR,ERROR\n");
        let columns = ColumnArgs {
            delimiter: ',',
            ..Default::default()
        };
        let loaded = load_records(&[path(&hpl)], &columns).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.dropped, 1);
    }

    #[test]
    fn test_load_error_names_file() {
        let bad = csv_file("N,NB,Time(s),GFLOPS,Status\n1000,32,1.0,oops,OK\n");
        let columns = ColumnArgs {
            delimiter: ',',
            ..Default::default()
        };
        let err = load_records(&[path(&bad)], &columns).unwrap_err();
        assert!(matches!(err, CliError::Load { .. }));
        assert!(err.to_string().contains(&path(&bad)));
    }

    #[test]
    fn test_no_files() {
        assert!(load_records(&[], &ColumnArgs::default()).is_err());
    }
}
