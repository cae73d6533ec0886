// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Classical neighbourhood inpainting: missing cells are filled from the
// boundary inwards, each from the already settled cells around it.

use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::{AlgorithmKind, InpaintMethod, MaskEncoding};
use inpaintbench_sampling::{EncodedMask, Raster};
use tracing::{debug, instrument};

use crate::Inpainter;
use crate::fill::peel_fill;

/// Gauss-Seidel sweeps of the smoothing pass used by [`InpaintMethod::NavierStokes`].
const DIFFUSION_SWEEPS: usize = 64;

/// Distance-ordered fill consuming a numeric mask.
///
/// [`InpaintMethod::Telea`] stops after the weighted-average propagation.
/// [`InpaintMethod::NavierStokes`] follows it with harmonic smoothing of the
/// filled region, which removes most of the directional streaks the
/// propagation leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicalInpainter {
    radius: u32,
    method: InpaintMethod,
}

impl ClassicalInpainter {
    pub fn new(radius: u32, method: InpaintMethod) -> Result<Self> {
        if radius == 0 {
            return Err(BenchError::InvalidConfig(
                "classical inpainting radius must be at least 1".into(),
            ));
        }
        Ok(Self { radius, method })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn method(&self) -> InpaintMethod {
        self.method
    }
}

impl Inpainter for ClassicalInpainter {
    fn algorithm(&self) -> AlgorithmKind {
        AlgorithmKind::Classical
    }

    #[instrument(skip_all, fields(radius = self.radius, method = %self.method))]
    fn inpaint(&self, image: &Raster, mask: &EncodedMask) -> Result<Raster> {
        let EncodedMask::Numeric(plane) = mask else {
            return Err(BenchError::MaskEncodingMismatch {
                algorithm: AlgorithmKind::Classical.to_string(),
                expected: MaskEncoding::Numeric.to_string(),
                actual: mask.encoding().to_string(),
            });
        };
        crate::check_dimensions(image, mask)?;
        let missing: Vec<bool> = plane.as_raw().iter().map(|&v| v != 0).collect();

        let (width, height) = image.dimensions();
        let mut planes = Vec::with_capacity(image.channels());
        for c in 0..image.channels() {
            let mut channel = image.channel(c);
            peel_fill(channel.as_mut_slice(), width, height, &missing, self.radius);
            if self.method == InpaintMethod::NavierStokes {
                diffuse(channel.as_mut_slice(), width, height, &missing, DIFFUSION_SWEEPS);
            }
            planes.push(channel);
        }
        debug!(channels = planes.len(), "classical fill complete");
        Raster::from_planes(&planes)
    }
}

/// Replace each missing cell by the mean of its 4-neighbours, in place.
fn diffuse(plane: &mut [f32], width: u32, height: u32, missing: &[bool], sweeps: usize) {
    let (w, h) = (width as usize, height as usize);
    for _ in 0..sweeps {
        for idx in (0..plane.len()).filter(|&i| missing[i]) {
            let (x, y) = (idx % w, idx / w);
            let mut sum = 0.0f32;
            let mut count = 0u32;
            if x > 0 {
                sum += plane[idx - 1];
                count += 1;
            }
            if x + 1 < w {
                sum += plane[idx + 1];
                count += 1;
            }
            if y > 0 {
                sum += plane[idx - w];
                count += 1;
            }
            if y + 1 < h {
                sum += plane[idx + w];
                count += 1;
            }
            if count > 0 {
                plane[idx] = sum / count as f32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inpaintbench_core::types::MaskKind;
    use inpaintbench_sampling::{Mask, MaskGenerator, RandomMask};

    fn holes(side: u32) -> Mask {
        RandomMask::new(3).generate(side, side, 40.0).unwrap()
    }

    #[test]
    fn constant_image_is_restored_exactly() {
        let image = Raster::from_fn(16, 16, |_, _| 77.0);
        let mask = holes(16);
        let defect = image.apply_defect(&mask).unwrap();
        for method in [InpaintMethod::Telea, InpaintMethod::NavierStokes] {
            let filled = ClassicalInpainter::new(2, method)
                .unwrap()
                .inpaint(&defect, &mask.encode(MaskEncoding::Numeric))
                .unwrap();
            for &v in filled.as_slice() {
                assert!((v - 77.0).abs() < 1e-3, "{method}: {v}");
            }
        }
    }

    #[test]
    fn known_cells_are_never_modified() {
        let image = Raster::from_fn(12, 12, |x, y| (x * 20 + y) as f32);
        let mask = holes(12);
        let defect = image.apply_defect(&mask).unwrap();
        let filled = ClassicalInpainter::new(1, InpaintMethod::NavierStokes)
            .unwrap()
            .inpaint(&defect, &mask.encode(MaskEncoding::Numeric))
            .unwrap();
        for (i, (&a, &b)) in defect.as_slice().iter().zip(filled.as_slice()).enumerate() {
            if !mask.is_missing_index(i) {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn fill_beats_the_zeroed_defect() {
        let image = Raster::from_fn(32, 32, |x, y| 100.0 + x as f32 + y as f32);
        let mask = holes(32);
        let defect = image.apply_defect(&mask).unwrap();
        let filled = ClassicalInpainter::new(1, InpaintMethod::Telea)
            .unwrap()
            .inpaint(&defect, &mask.encode(MaskEncoding::Numeric))
            .unwrap();
        let before = inpaintbench_sampling::mse_for(&image, &defect, MaskKind::Random).unwrap();
        let after = inpaintbench_sampling::mse_for(&image, &filled, MaskKind::Random).unwrap();
        assert!(after < before / 100.0, "before {before} after {after}");
    }

    #[test]
    fn boolean_mask_is_rejected() {
        let image = Raster::new(4, 4, 1);
        let mask = Mask::from_missing(4, 4, vec![false; 16]).unwrap();
        let err = ClassicalInpainter::new(1, InpaintMethod::Telea)
            .unwrap()
            .inpaint(&image, &mask.encode(MaskEncoding::Boolean))
            .unwrap_err();
        assert!(matches!(err, BenchError::MaskEncodingMismatch { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(ClassicalInpainter::new(0, InpaintMethod::Telea).is_err());
    }

    #[test]
    fn fully_masked_image_stays_blank() {
        let image = Raster::new(5, 5, 1);
        let mask = Mask::from_missing(5, 5, vec![true; 25]).unwrap();
        let filled = ClassicalInpainter::new(1, InpaintMethod::NavierStokes)
            .unwrap()
            .inpaint(&image, &mask.encode(MaskEncoding::Numeric))
            .unwrap();
        assert!(filled.as_slice().iter().all(|&v| v == 0.0));
    }
}
