// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fidelity metric: mean squared error between a reconstruction and the
// reference, optionally restricted to the spiral's circular ROI.

use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::MaskKind;

use crate::raster::Raster;
use crate::roi::CircleRoi;

/// Sum of squared differences divided by `width * height`.
///
/// Both operands must be single planes of the same size; multi-channel images
/// are reduced with [`Raster::to_grayscale`] first so channels never inflate the
/// pixel count.
pub fn mse(a: &Raster, b: &Raster) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(BenchError::ShapeMismatch(format!(
            "cannot compare {}x{} with {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }
    if a.channels() != 1 || b.channels() != 1 {
        return Err(BenchError::ShapeMismatch(format!(
            "MSE needs single-plane images, got {} and {} channels",
            a.channels(),
            b.channels()
        )));
    }
    if a.pixel_count() == 0 {
        return Ok(0.0);
    }
    let sum: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();
    Ok(sum / a.pixel_count() as f64)
}

/// MSE as scored for a configuration using `mask_kind`: spiral results are
/// compared inside the centred disk only, random results over the full frame.
pub fn mse_for(a: &Raster, b: &Raster, mask_kind: MaskKind) -> Result<f64> {
    if mask_kind.uses_circle_roi() {
        let roi = CircleRoi::for_dimensions(a.width(), a.height());
        mse(&roi.apply(a)?, &roi.apply(b)?)
    } else {
        mse(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(side: u32, offset: f32) -> Raster {
        Raster::from_fn(side, side, |x, y| (x * 3 + y * 5) as f32 % 255.0 + offset)
    }

    #[test]
    fn identical_images_have_zero_error() {
        let img = ramp(16, 0.0);
        assert_eq!(mse(&img, &img).unwrap(), 0.0);
        assert_eq!(mse_for(&img, &img, MaskKind::Spiral).unwrap(), 0.0);
    }

    #[test]
    fn error_is_symmetric() {
        let a = ramp(16, 0.0);
        let b = Raster::from_fn(16, 16, |x, y| ((x * y) % 97) as f32);
        for kind in MaskKind::ALL {
            assert_eq!(
                mse_for(&a, &b, kind).unwrap(),
                mse_for(&b, &a, kind).unwrap()
            );
        }
    }

    #[test]
    fn constant_offset_gives_offset_squared() {
        let a = ramp(8, 0.0);
        let b = ramp(8, 2.0);
        assert!((mse(&a, &b).unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn spiral_scoring_ignores_corners() {
        let a = Raster::new(32, 32, 1);
        let mut b = a.clone();
        b.set(0, 0, 0, 100.0);
        b.set(31, 31, 0, 100.0);
        assert!(mse(&a, &b).unwrap() > 0.0);
        assert_eq!(mse_for(&a, &b, MaskKind::Spiral).unwrap(), 0.0);
        assert!(mse_for(&a, &b, MaskKind::Random).unwrap() > 0.0);
    }

    #[test]
    fn divides_by_spatial_pixels_only() {
        let a = Raster::new(4, 4, 1);
        let b = Raster::from_fn(4, 4, |_, _| 1.0);
        assert_eq!(mse(&a, &b).unwrap(), 1.0);
    }

    #[test]
    fn rejects_mismatched_or_multichannel_operands() {
        let a = ramp(8, 0.0);
        assert!(mse(&a, &ramp(9, 0.0)).is_err());
        let rgb = Raster::new(8, 8, 3);
        assert!(mse(&a, &rgb).is_err());
        assert!(mse(&rgb.to_grayscale(), &a).is_ok());
    }
}
