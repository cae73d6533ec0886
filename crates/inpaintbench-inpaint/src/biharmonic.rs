// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Biharmonic inpainting: missing cells relax towards a solution of
// Δ²u = 0 with the known cells as boundary data, one channel at a time.

use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::{AlgorithmKind, MaskEncoding};
use inpaintbench_sampling::{EncodedMask, Raster};
use tracing::{debug, instrument};

use crate::Inpainter;
use crate::fill::peel_fill;

/// Largest per-sweep change (in intensity units) treated as converged.
const TOLERANCE: f32 = 1e-3;

/// Gauss-Seidel relaxation of the 13-point biharmonic stencil.
///
/// Missing cells are first seeded by a radius-1 neighbourhood fill so the
/// relaxation starts close to the answer; borders are mirrored and samples are
/// kept within the 8-bit range after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiharmonicInpainter {
    iterations: u32,
}

impl Default for BiharmonicInpainter {
    fn default() -> Self {
        Self { iterations: 200 }
    }
}

impl BiharmonicInpainter {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Inpainter for BiharmonicInpainter {
    fn algorithm(&self) -> AlgorithmKind {
        AlgorithmKind::Biharmonic
    }

    #[instrument(skip_all, fields(iterations = self.iterations))]
    fn inpaint(&self, image: &Raster, mask: &EncodedMask) -> Result<Raster> {
        let EncodedMask::Boolean(cells) = mask else {
            return Err(BenchError::MaskEncodingMismatch {
                algorithm: AlgorithmKind::Biharmonic.to_string(),
                expected: MaskEncoding::Boolean.to_string(),
                actual: mask.encoding().to_string(),
            });
        };
        crate::check_dimensions(image, mask)?;
        let missing = cells.as_slice();

        let (width, height) = image.dimensions();
        let mut planes = Vec::with_capacity(image.channels());
        for c in 0..image.channels() {
            let mut channel = image.channel(c);
            peel_fill(channel.as_mut_slice(), width, height, missing, 1);
            let sweeps = relax(channel.as_mut_slice(), width, height, missing, self.iterations);
            debug!(channel = c, sweeps, "biharmonic relaxation finished");
            planes.push(channel);
        }
        Raster::from_planes(&planes)
    }
}

/// Reflect `i` into `[0, n)` without repeating the edge sample.
fn mirror(i: i64, n: i64) -> usize {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let m = i.rem_euclid(period);
    (if m >= n { period - m } else { m }) as usize
}

/// Run up to `iterations` sweeps; returns the number actually performed.
fn relax(plane: &mut [f32], width: u32, height: u32, missing: &[bool], iterations: u32) -> u32 {
    let (w, h) = (width as i64, height as i64);
    let targets: Vec<usize> = (0..plane.len()).filter(|&i| missing[i]).collect();
    if targets.is_empty() {
        return 0;
    }
    let at = |p: &[f32], x: i64, y: i64| p[mirror(y, h) * w as usize + mirror(x, w)];

    for sweep in 1..=iterations {
        let mut max_change = 0.0f32;
        for &idx in &targets {
            let (x, y) = ((idx as i64) % w, (idx as i64) / w);
            let next = {
                let p: &[f32] = plane;
                let near = at(p, x - 1, y) + at(p, x + 1, y) + at(p, x, y - 1) + at(p, x, y + 1);
                let diagonal = at(p, x - 1, y - 1)
                    + at(p, x + 1, y - 1)
                    + at(p, x - 1, y + 1)
                    + at(p, x + 1, y + 1);
                let far = at(p, x - 2, y) + at(p, x + 2, y) + at(p, x, y - 2) + at(p, x, y + 2);
                ((8.0 * near - 2.0 * diagonal - far) / 20.0).clamp(0.0, 255.0)
            };
            max_change = max_change.max((next - plane[idx]).abs());
            plane[idx] = next;
        }
        if max_change < TOLERANCE {
            return sweep;
        }
    }
    iterations
}
