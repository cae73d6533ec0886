// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory raster: a width x height x channels grid of f32 intensity samples
// on the 8-bit scale (0..=255), stored row-major with interleaved channels.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use inpaintbench_core::error::{BenchError, Result};
use sha2::{Digest, Sha256};

use crate::mask::Mask;

/// Luma weights for RGB → single-plane reduction (ITU-R BT.709 primaries).
const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// A 2D (one channel) or 3D (three channel) grid of intensity samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<f32>,
}

impl Raster {
    // -- Construction ---------------------------------------------------------

    /// A zero-filled raster.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        let len = width as usize * height as usize * channels;
        Self {
            width,
            height,
            channels,
            data: vec![0.0; len],
        }
    }

    /// Wrap existing samples; the length must equal `width * height * channels`.
    pub fn from_vec(width: u32, height: u32, channels: usize, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * channels;
        if channels == 0 || data.len() != expected {
            return Err(BenchError::ShapeMismatch(format!(
                "{width}x{height}x{channels} raster needs {expected} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build a single-plane raster from a function of `(x, y)`.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    /// Convert a decoded image. Colour images keep three channels (alpha is
    /// dropped); grayscale images become a single plane.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        if image.color().has_color() {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            let data = rgb.as_raw().iter().map(|&v| v as f32).collect();
            Self {
                width,
                height,
                channels: 3,
                data,
            }
        } else {
            let luma = image.to_luma8();
            let (width, height) = luma.dimensions();
            let data = luma.as_raw().iter().map(|&v| v as f32).collect();
            Self {
                width,
                height,
                channels: 1,
                data,
            }
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Number of spatial cells (`width * height`), independent of channels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sample at `(x, y)` in channel `c`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32, c: usize) -> f32 {
        self.data[self.offset(x, y, c)]
    }

    pub fn set(&mut self, x: u32, y: u32, c: usize, value: f32) {
        let offset = self.offset(x, y, c);
        self.data[offset] = value;
    }

    fn offset(&self, x: u32, y: u32, c: usize) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels + c
    }

    /// Copy of channel `c` as a single-plane raster.
    pub fn channel(&self, c: usize) -> Raster {
        let data = self
            .data
            .iter()
            .skip(c)
            .step_by(self.channels)
            .copied()
            .collect();
        Raster {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        }
    }

    /// Reassemble planes produced by [`Raster::channel`].
    pub fn from_planes(planes: &[Raster]) -> Result<Self> {
        let first = planes
            .first()
            .ok_or_else(|| BenchError::ShapeMismatch("no planes to merge".into()))?;
        let (width, height) = first.dimensions();
        if planes
            .iter()
            .any(|p| p.dimensions() != (width, height) || p.channels != 1)
        {
            return Err(BenchError::ShapeMismatch(
                "planes must be single-channel and share dimensions".into(),
            ));
        }
        let channels = planes.len();
        let mut data = Vec::with_capacity(first.pixel_count() * channels);
        for i in 0..first.pixel_count() {
            for plane in planes {
                data.push(plane.data[i]);
            }
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    // -- Transformations --------------------------------------------------------

    /// Reduce to a single comparable plane. Single-plane rasters are cloned.
    pub fn to_grayscale(&self) -> Raster {
        if self.channels == 1 {
            return self.clone();
        }
        let data = self
            .data
            .chunks_exact(self.channels)
            .map(|px| {
                if px.len() >= 3 {
                    px[0] * LUMA_WEIGHTS[0] + px[1] * LUMA_WEIGHTS[1] + px[2] * LUMA_WEIGHTS[2]
                } else {
                    px.iter().sum::<f32>() / px.len() as f32
                }
            })
            .collect();
        Raster {
            width: self.width,
            height: self.height,
            channels: 1,
            data,
        }
    }

    /// Zero every sample (all channels) in cells the mask flags for
    /// reconstruction.
    pub fn apply_defect(&self, mask: &Mask) -> Result<Raster> {
        if mask.dimensions() != self.dimensions() {
            return Err(BenchError::ShapeMismatch(format!(
                "mask {}x{} does not match image {}x{}",
                mask.width(),
                mask.height(),
                self.width,
                self.height
            )));
        }
        let mut out = self.clone();
        for (cell, px) in out.data.chunks_exact_mut(self.channels).enumerate() {
            if mask.is_missing_index(cell) {
                px.fill(0.0);
            }
        }
        Ok(out)
    }

    // -- Output ---------------------------------------------------------------

    /// Quantise back to an 8-bit image for encoding.
    pub fn to_dynamic(&self) -> DynamicImage {
        let quantise = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        if self.channels >= 3 {
            let img = RgbImage::from_fn(self.width, self.height, |x, y| {
                Rgb([
                    quantise(self.get(x, y, 0)),
                    quantise(self.get(x, y, 1)),
                    quantise(self.get(x, y, 2)),
                ])
            });
            DynamicImage::ImageRgb8(img)
        } else {
            let gray = self.to_grayscale();
            let img = GrayImage::from_fn(self.width, self.height, |x, y| {
                Luma([quantise(gray.get(x, y, 0))])
            });
            DynamicImage::ImageLuma8(img)
        }
    }

    /// SHA-256 fingerprint of the shape and samples, as lowercase hex.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update((self.channels as u32).to_le_bytes());
        for sample in &self.data {
            hasher.update(sample.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
