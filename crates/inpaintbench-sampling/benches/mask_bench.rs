// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for mask generation in the inpaintbench-sampling crate.
// Random masks are measured near full removal, where a retry-until-unique
// sampler would degrade; spiral masks are measured at the densest level.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use inpaintbench_sampling::{MaskGenerator, RandomMask, SpiralMask};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Random mask on a 256x256 canvas at 50 % and 99 % removal.
fn bench_random_mask(c: &mut Criterion) {
    let generator = RandomMask::new(7);
    for percent in [50.0, 99.0] {
        c.bench_function(&format!("random_mask (256x256, {percent}%)"), |b| {
            b.iter(|| {
                let mask = generator
                    .generate(black_box(256), black_box(256), black_box(percent))
                    .expect("valid percent");
                black_box(mask);
            });
        });
    }
}

/// Spiral mask on a 256x256 canvas at the 80 % calibration level.
fn bench_spiral_mask(c: &mut Criterion) {
    let generator = SpiralMask::default();
    c.bench_function("spiral_mask (256x256, 80%)", |b| {
        b.iter(|| {
            let mask = generator
                .generate(black_box(256), black_box(256), black_box(80.0))
                .expect("supported level");
            black_box(mask);
        });
    });
}

criterion_group!(benches, bench_random_mask, bench_spiral_mask);
criterion_main!(benches);
