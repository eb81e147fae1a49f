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

//! JSON export for reports.

use crate::error::CliError;
use serde::Serialize;

/// Serialize a report as pretty-printed JSON with a trailing newline.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_analysis_json() {
        let json = to_json(&fixtures::analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["theoretical_peak"], 60.0);
        assert_eq!(value["overview"]["dropped_errors"], 1);
        assert_eq!(value["metadata"]["CPU"], "Intel Core i7-1255U");
        assert_eq!(value["optimal"][0]["parameter"], 64);
    }

    #[test]
    fn test_comparison_json() {
        let json = to_json(&fixtures::comparison()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["speedup"]["points"][0]["ratio"], 4.0);
        assert_eq!(value["series"][0]["label"], "O0");
    }
}
