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

//! Reduction pipeline benchmarks.
//!
//! Measures clean + derive + summarize over synthetic HPL sweeps of
//! increasing size, with one row in twenty marked `ERROR`.

use benchtab_core::{analyze, clean, derive, summarize_by, ColumnMap, RawRow, ReducerConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const STANDARD_SIZES: [usize; 3] = [100, 1_000, 10_000];
const BLOCK_SIZES: [i64; 6] = [32, 64, 96, 128, 192, 256];

fn generate_sweep(rows: usize) -> Vec<RawRow> {
    (0..rows)
        .map(|i| {
            let n = 1000 * (1 + (i / BLOCK_SIZES.len()) as i64);
            let nb = BLOCK_SIZES[i % BLOCK_SIZES.len()];
            let gflops = 40.0 + (i % 17) as f64;
            let status = if i % 20 == 19 { "ERROR" } else { "OK" };
            RawRow::new()
                .with_field("N", n)
                .with_field("NB", nb)
                .with_field("Time(s)", format!("{:.3}", n as f64 / 1000.0 / gflops))
                .with_field("GFLOPS", format!("{:.2}", gflops))
                .with_field("Status", status)
        })
        .collect()
}

fn bench_clean_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_derive");
    let columns = ColumnMap::hpl();

    for size in STANDARD_SIZES {
        let rows = generate_sweep(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let records = clean(black_box(rows), &columns).unwrap();
                derive(&records, 60.0).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_by");

    for size in STANDARD_SIZES {
        let records = derive(&clean(&generate_sweep(size), &ColumnMap::hpl()).unwrap(), 60.0).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("primary", size), &records, |b, records| {
            b.iter(|| summarize_by(black_box(records), |r| r.record.primary_key.clone()))
        });
        group.bench_with_input(BenchmarkId::new("secondary", size), &records, |b, records| {
            b.iter(|| summarize_by(black_box(records), |r| r.record.secondary_key.clone()))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let config = ReducerConfig::new(60.0);

    for size in STANDARD_SIZES {
        let rows = generate_sweep(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| analyze(black_box(rows), &config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clean_derive, bench_summarize, bench_analyze);
criterion_main!(benches);
