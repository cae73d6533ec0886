// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Uniform random sparsity: flag an exact number of distinct pixels.

use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::MaskKind;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::{Mask, MaskGenerator};

/// Random mask generator seeded for reproducibility.
///
/// Flags exactly `floor(width * height * percent / 100)` distinct cells, drawn
/// uniformly without replacement by shuffling every linear index and keeping
/// a prefix. Cost is linear in the pixel count at every percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomMask {
    seed: u64,
}

impl RandomMask {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MaskGenerator for RandomMask {
    fn kind(&self) -> MaskKind {
        MaskKind::Random
    }

    fn check(&self, width: u32, height: u32, percent: f64) -> Result<()> {
        flagged_count(width, height, percent).map(|_| ())
    }

    #[instrument(skip(self), fields(seed = self.seed))]
    fn generate(&self, width: u32, height: u32, percent: f64) -> Result<Mask> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let flagged = flag_pixels(width, height, percent, &mut rng)?;
        debug!(flagged = flagged.len(), "random mask built");
        Mask::from_missing_indices(width, height, flagged)
    }
}

/// Number of cells a `percent` mask flags on a `width` x `height` image.
///
/// Integral percentages are computed in integer arithmetic so the floor is
/// exact; fractional ones fall back to `f64`.
pub fn flagged_count(width: u32, height: u32, percent: f64) -> Result<usize> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(BenchError::InvalidPercent(percent));
    }
    let total = width as u64 * height as u64;
    let count = if percent.fract() == 0.0 {
        total * percent as u64 / 100
    } else {
        (total as f64 * percent / 100.0).floor() as u64
    };
    Ok(count as usize)
}

/// Linear indices (`y * width + x`) of the flagged cells, in draw order.
pub fn flag_pixels(width: u32, height: u32, percent: f64, rng: &mut StdRng) -> Result<Vec<usize>> {
    let count = flagged_count(width, height, percent)?;
    let mut indices: Vec<usize> = (0..width as usize * height as usize).collect();
    indices.shuffle(rng);
    indices.truncate(count);
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn flags_exact_count_of_distinct_cells() {
        let shapes = [(1, 1), (7, 3), (64, 64), (100, 37), (13, 200)];
        let percents = [0.0, 0.5, 1.0, 12.5, 20.0, 33.0, 50.0, 66.6, 80.0, 99.9, 100.0];
        for &(w, h) in &shapes {
            for &p in &percents {
                let mut rng = StdRng::seed_from_u64(42);
                let flagged = flag_pixels(w, h, p, &mut rng).unwrap();
                let expected = ((w * h) as f64 * p / 100.0).floor() as usize;
                assert_eq!(flagged.len(), expected, "{w}x{h} at {p}%");

                let coords: HashSet<(usize, usize)> = flagged
                    .iter()
                    .map(|&i| (i % w as usize, i / w as usize))
                    .collect();
                assert_eq!(coords.len(), expected, "duplicates at {w}x{h} {p}%");
                assert!(coords.iter().all(|&(x, y)| x < w as usize && y < h as usize));

                let mask = RandomMask::new(42).generate(w, h, p).unwrap();
                assert_eq!(mask.missing_count(), expected);
                assert_eq!(mask.dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn same_seed_same_mask() {
        let a = RandomMask::new(9).generate(32, 32, 50.0).unwrap();
        let b = RandomMask::new(9).generate(32, 32, 50.0).unwrap();
        let c = RandomMask::new(10).generate(32, 32, 50.0).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn full_removal_flags_everything() {
        let mask = RandomMask::new(1).generate(50, 40, 100.0).unwrap();
        assert_eq!(mask.missing_count(), 2000);
    }

    #[test]
    fn out_of_range_percent_fails_fast() {
        for bad in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let err = RandomMask::new(0).generate(8, 8, bad).unwrap_err();
            assert!(err.is_configuration(), "{bad} should be rejected");
        }
    }

    #[test]
    fn integral_percent_uses_exact_floor() {
        assert_eq!(flagged_count(10, 10, 29.0).unwrap(), 29);
        assert_eq!(flagged_count(3, 3, 50.0).unwrap(), 4);
        assert_eq!(flagged_count(0, 10, 50.0).unwrap(), 0);
    }
}
