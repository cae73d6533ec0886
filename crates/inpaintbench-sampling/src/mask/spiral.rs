// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spiral sparsity: a dose-limited raster scan modelled as a Fermat
// (constant angular velocity) spiral.
//
// For i in [0, t): r = sqrt(i), theta = frequency * r. The raw trajectory is
// min-max normalised per axis into [0, L-1] so it always fits the canvas,
// then rounded to pixels. Pixels the scan visits are known; every other pixel
// is flagged for reconstruction.

use std::collections::HashSet;
use std::f64::consts::PI;

use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::MaskKind;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Mask, MaskGenerator};

/// Angular frequency the calibration table was fitted at.
pub const DEFAULT_FREQUENCY: f64 = 1.0;

/// Empirical mapping from removal level to trajectory length.
///
/// For a square canvas of side `L` with inscribed disk area `A = pi * (L/2)^2`,
/// the trajectory uses `floor(A / divisor)` points. The divisors were fitted
/// against the share of the disk the scan visits, so a removal level `p` uses
/// the row for coverage `100 - p`. Only the tabulated levels are accepted;
/// there is no interpolation between them.
pub struct SpiralCalibration;

impl SpiralCalibration {
    /// `(percent of the disk visited, area divisor)`.
    pub const COVERAGE_LEVELS: [(f64, f64); 3] = [(20.0, 2.6), (50.0, 0.46), (80.0, 0.19)];

    pub fn supports(percent: f64) -> bool {
        Self::divisor(percent).is_ok()
    }

    /// Area divisor for removing `percent` of the disk, or a configuration error.
    pub fn divisor(percent: f64) -> Result<f64> {
        let coverage = 100.0 - percent;
        Self::COVERAGE_LEVELS
            .iter()
            .find(|&&(c, _)| c == coverage)
            .map(|&(_, d)| d)
            .ok_or(BenchError::UnsupportedSpiralPercent(percent))
    }

    /// Area of the disk inscribed in a `side` x `side` canvas.
    pub fn disk_area(side: u32) -> f64 {
        PI * (side as f64 / 2.0).powi(2)
    }

    /// Total trajectory points for a `side` x `side` canvas at `percent`.
    pub fn total_points(side: u32, percent: f64) -> Result<usize> {
        let divisor = Self::divisor(percent)?;
        Ok((Self::disk_area(side) / divisor).floor() as usize)
    }
}

/// Coverage figures for one realised trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStats {
    pub total_points: usize,
    /// Distinct pixels after rounding.
    pub unique_points: usize,
    /// Points that landed on an already visited pixel.
    pub duplicate_points: usize,
    /// Unique pixels as a percentage of the inscribed disk area.
    pub disk_coverage_percent: f64,
}

/// Raw (unscaled) trajectory points.
pub fn trajectory(frequency: f64, total_points: usize) -> Vec<(f64, f64)> {
    (0..total_points)
        .map(|i| {
            let r = (i as f64).sqrt();
            let theta = frequency * r;
            (r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Map raw points onto integer pixels of a `side` x `side` canvas.
///
/// Each axis is normalised independently, so the extremes of the trajectory
/// land on `0` and `side - 1`. An axis with no extent maps to `0`.
pub fn rescale_to_canvas(points: &[(f64, f64)], side: u32) -> Vec<(u32, u32)> {
    if side == 0 {
        return Vec::new();
    }
    let span = (side - 1) as f64;
    let xs = axis_scaler(points.iter().map(|p| p.0), span);
    let ys = axis_scaler(points.iter().map(|p| p.1), span);
    points.iter().map(|&(x, y)| (xs(x), ys(y))).collect()
}

fn axis_scaler(values: impl Iterator<Item = f64>, span: f64) -> impl Fn(f64) -> u32 {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let extent = hi - lo;
    move |v| {
        if extent > 0.0 && extent.is_finite() {
            ((v - lo) / extent * span).round() as u32
        } else {
            0
        }
    }
}

/// Spiral scan mask generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralMask {
    frequency: f64,
}

impl Default for SpiralMask {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
        }
    }
}

impl SpiralMask {
    pub fn new(frequency: f64) -> Result<Self> {
        if !frequency.is_finite() {
            return Err(BenchError::InvalidConfig(format!(
                "spiral frequency must be finite, got {frequency}"
            )));
        }
        Ok(Self { frequency })
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Visited-pixel grid for a trajectory of `total_points` on a `side` canvas.
    pub fn visit(&self, side: u32, total_points: usize) -> (Vec<bool>, TrajectoryStats) {
        let pixels = rescale_to_canvas(&trajectory(self.frequency, total_points), side);
        let mut visited = vec![false; side as usize * side as usize];
        let mut unique = HashSet::with_capacity(pixels.len());
        for &(x, y) in &pixels {
            if unique.insert((x, y)) {
                visited[y as usize * side as usize + x as usize] = true;
            }
        }
        let area = SpiralCalibration::disk_area(side);
        let stats = TrajectoryStats {
            total_points,
            unique_points: unique.len(),
            duplicate_points: total_points - unique.len(),
            disk_coverage_percent: if area > 0.0 {
                unique.len() as f64 * 100.0 / area
            } else {
                0.0
            },
        };
        (visited, stats)
    }

    /// Build the mask and report how the trajectory covered the canvas.
    #[instrument(skip(self), fields(frequency = self.frequency))]
    pub fn generate_with_stats(
        &self,
        width: u32,
        height: u32,
        percent: f64,
    ) -> Result<(Mask, TrajectoryStats)> {
        self.check(width, height, percent)?;
        let total_points = SpiralCalibration::total_points(width, percent)?;
        let (visited, stats) = self.visit(width, total_points);
        debug!(
            total_points = stats.total_points,
            unique_points = stats.unique_points,
            duplicate_points = stats.duplicate_points,
            disk_coverage = stats.disk_coverage_percent,
            "spiral trajectory realised"
        );
        let mask = Mask::from_visited(width, height, visited)?;
        Ok((mask, stats))
    }
}

impl MaskGenerator for SpiralMask {
    fn kind(&self) -> MaskKind {
        MaskKind::Spiral
    }

    fn check(&self, width: u32, height: u32, percent: f64) -> Result<()> {
        if width != height {
            return Err(BenchError::NonSquareImage { width, height });
        }
        if width == 0 {
            return Err(BenchError::InvalidConfig("image has no pixels".into()));
        }
        SpiralCalibration::divisor(percent).map(|_| ())
    }

    fn generate(&self, width: u32, height: u32, percent: f64) -> Result<Mask> {
        self.generate_with_stats(width, height, percent)
            .map(|(mask, _)| mask)
    }
}
