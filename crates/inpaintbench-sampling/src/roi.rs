// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Circular region of interest: the disk a spiral scan actually covers.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;
use inpaintbench_core::error::{BenchError, Result};

use crate::raster::Raster;

const INSIDE: u8 = 255;

/// Centred disk of diameter `min(width, height)` over a `width` x `height` grid.
///
/// The spiral trajectory is rescaled into the square canvas, so only the
/// inscribed disk is sampled; corner pixels are identical zeros in both
/// operands once the ROI is applied and do not dilute the metric.
#[derive(Debug, Clone)]
pub struct CircleRoi {
    stencil: GrayImage,
}

impl CircleRoi {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let mut stencil = GrayImage::new(width, height);
        if width > 0 && height > 0 {
            let radius = (width.min(height) / 2) as i32;
            let center = ((width / 2) as i32, (height / 2) as i32);
            draw_filled_circle_mut(&mut stencil, center, radius, Luma([INSIDE]));
        }
        Self { stencil }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.stencil.dimensions()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.stencil.get_pixel(x, y)[0] == INSIDE
    }

    /// Number of cells inside the disk.
    pub fn area(&self) -> usize {
        self.stencil.pixels().filter(|p| p[0] == INSIDE).count()
    }

    /// Copy of `raster` with every sample outside the disk set to zero.
    pub fn apply(&self, raster: &Raster) -> Result<Raster> {
        if raster.dimensions() != self.dimensions() {
            let (w, h) = self.dimensions();
            return Err(BenchError::ShapeMismatch(format!(
                "ROI {}x{} does not match image {}x{}",
                w,
                h,
                raster.width(),
                raster.height()
            )));
        }
        Ok(self.zero_outside(raster))
    }

    fn zero_outside(&self, raster: &Raster) -> Raster {
        let channels = raster.channels();
        let mut out = raster.clone();
        for (px, inside) in out
            .as_mut_slice()
            .chunks_exact_mut(channels)
            .zip(self.stencil.as_raw())
        {
            if *inside != INSIDE {
                px.fill(0.0);
            }
        }
        out
    }
}

/// Apply the centred-disk ROI sized to `raster` itself.
pub fn circle_roi(raster: &Raster) -> Raster {
    let (width, height) = raster.dimensions();
    CircleRoi::for_dimensions(width, height).zero_outside(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise(side: u32, channels: usize) -> Raster {
        let len = side as usize * side as usize * channels;
        let data = (0..len).map(|i| ((i * 37) % 251) as f32 + 1.0).collect();
        Raster::from_vec(side, side, channels, data).unwrap()
    }

    #[test]
    fn roi_is_idempotent() {
        for side in [1, 2, 9, 64, 101] {
            for channels in [1, 3] {
                let img = noise(side, channels);
                let once = circle_roi(&img);
                assert_eq!(circle_roi(&once), once, "side {side} channels {channels}");
            }
        }
    }

    #[test]
    fn corners_are_zeroed_and_centre_kept() {
        let img = noise(64, 1);
        let out = circle_roi(&img);
        assert_eq!(out.get(0, 0, 0), 0.0);
        assert_eq!(out.get(63, 63, 0), 0.0);
        assert_eq!(out.get(0, 63, 0), 0.0);
        assert_eq!(out.get(32, 32, 0), img.get(32, 32, 0));
        assert_eq!(out.get(32, 1, 0), img.get(32, 1, 0));
    }

    #[test]
    fn disk_area_is_close_to_pi_r_squared() {
        let roi = CircleRoi::for_dimensions(100, 100);
        let expected = std::f64::consts::PI * 50.0 * 50.0;
        let area = roi.area() as f64;
        assert!((area - expected).abs() / expected < 0.05, "area {area}");
    }

    #[test]
    fn apply_rejects_wrong_shape() {
        let roi = CircleRoi::for_dimensions(10, 10);
        assert!(roi.apply(&noise(12, 1)).is_err());
    }
}
