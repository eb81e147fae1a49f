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

//! Benchtab CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Reports
//!
//! - **analyze**: Clean, derive efficiency and summarize result files
//! - **export**: Write the cleaned records with an efficiency column as CSV
//! - **compare**: Speedup of one configuration over another, plus
//!   throughput normalized against the smallest primary key
//!
//! ## Utilities
//!
//! - **completion**: Generate shell completion scripts (bash, zsh, fish, powershell, elvish)
//!
//! # Security
//!
//! - **File size limits**: Inputs larger than `BENCHTAB_MAX_FILE_SIZE` bytes
//!   (default 1 GB) are rejected before reading
//! - **Row limits**: CSV ingestion stops at one million rows
//!
//! # Performance
//!
//! Multiple input files are read and cleaned in parallel with rayon; the
//! reduction itself is sequential.
//!
//! # Error Handling
//!
//! All commands return `Result<(), CliError>`. Errors name the offending
//! file where one is involved.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;

use clap::Parser;

/// Benchtab - benchmark result reducer
///
/// # Examples
///
/// ```bash
/// # Analyze an HPL sweep against a 60 GFLOPS peak
/// benchtab analyze hpl_results.csv --peak 60
///
/// # Same, with system facts from a hardware profile, as Markdown
/// benchtab analyze hpl_results.csv --profile laptop.yaml --format markdown
///
/// # Enriched CSV sorted by N, NB
/// benchtab export hpl_results.csv --peak 60 -o hpl_enriched.csv
///
/// # Stride sweeps at two optimization levels
/// benchtab compare o0.csv o2.csv --stride --labels O0,O2 --baseline O0 --candidate O2
/// ```
#[derive(Parser)]
#[command(name = "benchtab")]
#[command(author, version, about = "Benchtab - benchmark result reducer", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: cli::Commands,
}

impl Cli {
    /// Default log directive for the verbosity level.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "benchtab=warn",
            1 => "benchtab=debug",
            _ => "benchtab=trace",
        }
    }
}
