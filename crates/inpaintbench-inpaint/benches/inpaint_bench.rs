// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the reference inpainting collaborators.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use inpaintbench_core::types::{InpaintMethod, MaskEncoding};
use inpaintbench_inpaint::{BiharmonicInpainter, ClassicalInpainter, Inpainter};
use inpaintbench_sampling::{MaskGenerator, RandomMask, Raster};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Smooth 128x128 test pattern with 50 % of its pixels knocked out.
fn fixture() -> (Raster, inpaintbench_sampling::Mask) {
    let image = Raster::from_fn(128, 128, |x, y| {
        let (fx, fy) = (x as f32 / 16.0, y as f32 / 16.0);
        127.5 + 100.0 * fx.sin() * fy.cos()
    });
    let mask = RandomMask::new(1).generate(128, 128, 50.0).expect("valid percent");
    let defect = image.apply_defect(&mask).expect("matching shape");
    (defect, mask)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_classical(c: &mut Criterion) {
    let (defect, mask) = fixture();
    let encoded = mask.encode(MaskEncoding::Numeric);
    for method in [InpaintMethod::Telea, InpaintMethod::NavierStokes] {
        let inpainter = ClassicalInpainter::new(1, method).expect("valid radius");
        c.bench_function(&format!("classical_{method} (128x128, 50%)"), |b| {
            b.iter(|| black_box(inpainter.inpaint(black_box(&defect), &encoded)));
        });
    }
}

fn bench_biharmonic(c: &mut Criterion) {
    let (defect, mask) = fixture();
    let encoded = mask.encode(MaskEncoding::Boolean);
    let inpainter = BiharmonicInpainter::new(50);
    c.bench_function("biharmonic (128x128, 50%, 50 sweeps)", |b| {
        b.iter(|| black_box(inpainter.inpaint(black_box(&defect), &encoded)));
    });
}

criterion_group!(benches, bench_classical, bench_biharmonic);
criterion_main!(benches);
