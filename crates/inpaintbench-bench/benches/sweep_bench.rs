// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmark for a full default sweep on a small reference image.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use inpaintbench_bench::{BenchmarkOrchestrator, SourceImage};
use inpaintbench_core::config::BenchConfig;
use inpaintbench_sampling::Raster;

/// Twelve-configuration sweep over a 64x64 image, on a multi-threaded runtime.
fn bench_default_sweep(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let source = Arc::new(SourceImage::new(
        "bench",
        Raster::from_fn(64, 64, |x, y| ((x * 7 + y * 3) % 256) as f32),
    ));
    let orchestrator = BenchmarkOrchestrator::new(BenchConfig {
        biharmonic_iterations: 50,
        ..BenchConfig::default()
    })
    .expect("valid config");

    c.bench_function("default_sweep (64x64, 12 tasks)", |b| {
        b.iter(|| {
            let report = runtime
                .block_on(orchestrator.run(Arc::clone(&source)))
                .expect("sweep runs");
            black_box(report);
        });
    });
}

criterion_group!(benches, bench_default_sweep);
criterion_main!(benches);
