// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: load a reference image, optionally rescale it, and hand it
// to the benchmark as a `Raster`. Also encodes rasters and masks back to PNG
// for stage artifacts. Built on the `image` crate.

use image::{DynamicImage, ImageFormat};
use inpaintbench_core::error::{BenchError, Result};
use tracing::{debug, info, instrument};

use crate::mask::Mask;
use crate::raster::Raster;

/// Loading pipeline for a single source image.
///
/// Each transformation consumes `self` and returns a new processor, enabling
/// method chaining.
///
/// ```ignore
/// let raster = ImageProcessor::open("liposome.tif")?
///     .scale(0.5)?
///     .into_raster();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BenchError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (PNG, TIFF, JPEG, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| BenchError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations --------------------------------------------------------

    /// Scale both axes by `factor` (Lanczos3). Each axis keeps at least one
    /// pixel.
    #[instrument(skip(self), fields(factor))]
    pub fn scale(self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(BenchError::InvalidConfig(format!(
                "resize factor must be positive, got {factor}"
            )));
        }
        let width = ((self.image.width() as f64 * factor) as u32).max(1);
        let height = ((self.image.height() as f64 * factor) as u32).max(1);
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Rescaling image"
        );
        let resized = self
            .image
            .resize_exact(width, height, image::imageops::FilterType::Lanczos3);
        Ok(Self { image: resized })
    }

    /// Consume the processor and return the samples.
    pub fn into_raster(self) -> Raster {
        Raster::from_dynamic(&self.image)
    }
}

// -- Output -------------------------------------------------------------------

/// Encode a raster as PNG bytes.
pub fn raster_to_png_bytes(raster: &Raster) -> Result<Vec<u8>> {
    encode_to_format(&raster.to_dynamic(), ImageFormat::Png)
}

/// Write a raster to a file. The format is inferred from the file extension.
pub fn save_raster(raster: &Raster, path: impl AsRef<std::path::Path>) -> Result<()> {
    save_dynamic(&raster.to_dynamic(), path.as_ref())
}

/// Write a mask as a black (known) / white (reconstruct) image.
pub fn save_mask(mask: &Mask, path: impl AsRef<std::path::Path>) -> Result<()> {
    save_dynamic(&DynamicImage::ImageLuma8(mask.to_image()), path.as_ref())
}

fn save_dynamic(image: &DynamicImage, path: &std::path::Path) -> Result<()> {
    image.save(path).map_err(|err| {
        BenchError::ImageError(format!(
            "failed to save image to {}: {}",
            path.display(),
            err
        ))
    })
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| BenchError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(40, 20, |x, y| {
            Rgb([(x * 6) as u8, (y * 12) as u8, 128])
        }))
    }

    #[test]
    fn scale_halves_both_axes() {
        let raster = ImageProcessor::from_dynamic(gradient())
            .scale(0.5)
            .unwrap()
            .into_raster();
        assert_eq!(raster.dimensions(), (20, 10));
        assert_eq!(raster.channels(), 3);
    }

    #[test]
    fn scale_rejects_non_positive_factor() {
        let err = ImageProcessor::from_dynamic(gradient()).scale(0.0);
        assert!(matches!(err, Err(BenchError::InvalidConfig(_))));
    }

    #[test]
    fn png_bytes_decode_back_to_same_shape() {
        let raster = ImageProcessor::from_dynamic(gradient()).into_raster();
        let bytes = raster_to_png_bytes(&raster).unwrap();
        let decoded = ImageProcessor::from_bytes(&bytes).unwrap().into_raster();
        assert_eq!(decoded, raster);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = ImageProcessor::from_bytes(b"not an image");
        assert!(matches!(err, Err(BenchError::ImageError(_))));
    }
}
