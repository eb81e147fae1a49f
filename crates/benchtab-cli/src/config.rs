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

//! Hardware profiles: the theoretical peak and system description of the
//! machine a benchmark ran on.
//!
//! Profiles are YAML by default; files ending in `.json` are read as JSON.
//!
//! ```yaml
//! name: lab-laptop
//! theoretical_peak: 60.0
//! system:
//!   CPU: Intel Core i7-1255U
//!   Cores: 10
//!   BLAS: OpenBLAS 0.3.20
//! ```

use crate::commands::read_file;
use crate::error::CliError;
use benchtab_core::{validate_peak, ColumnMap, GroupBy, ReducerConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Description of the measured hardware.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HardwareProfile {
    /// Optional profile name, shown in report headers.
    #[serde(default)]
    pub name: Option<String>,
    /// Upper-bound throughput of the machine.
    pub theoretical_peak: f64,
    /// Free-form system facts. Scalar values of any type are accepted.
    #[serde(default)]
    pub system: BTreeMap<String, serde_json::Value>,
}

impl HardwareProfile {
    /// Profile with only a peak, as given by `--peak`.
    pub fn from_peak(theoretical_peak: f64) -> Self {
        Self {
            name: None,
            theoretical_peak,
            system: BTreeMap::new(),
        }
    }

    /// Parse profile text, as JSON when `json` is set and YAML otherwise.
    pub fn parse(text: &str, json: bool) -> Result<Self, String> {
        if json {
            serde_json::from_str(text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(text).map_err(|e| e.to_string())
        }
    }

    /// Load and validate a profile file.
    ///
    /// # Errors
    ///
    /// I/O and size-limit errors from [`read_file`], `Profile` for a parse
    /// failure or an unusable theoretical peak.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let text = read_file(path)?;
        let json = Path::new(path)
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let profile = Self::parse(&text, json).map_err(|e| CliError::profile(path, e))?;
        validate_peak(profile.theoretical_peak).map_err(|e| CliError::profile(path, e.to_string()))?;

        debug!(path, peak = profile.theoretical_peak, "loaded hardware profile");
        Ok(profile)
    }

    /// System facts rendered as strings, in key order.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut metadata: BTreeMap<String, String> = self
            .system
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect();
        if let Some(name) = &self.name {
            metadata.entry("Profile".to_string()).or_insert_with(|| name.clone());
        }
        metadata
    }

    /// Reducer configuration for this machine.
    pub fn reducer_config(&self, columns: ColumnMap, group_by: GroupBy) -> ReducerConfig {
        let mut config = ReducerConfig::new(self.theoretical_peak)
            .with_columns(columns)
            .with_group_by(group_by);
        config.metadata = self.metadata();
        config
    }
}
