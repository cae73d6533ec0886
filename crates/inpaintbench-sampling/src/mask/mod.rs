// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Mask generation: which pixels of a reference image are treated as missing.
//
// Every generator produces the same canonical `Mask`: one flag per spatial
// cell, `true` meaning "value unknown, to be reconstructed". The numeric and
// boolean encodings the inpainting primitives consume are pure conversions of
// that grid.

pub mod random;
pub mod spiral;

use image::{GrayImage, Luma};
use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::{MaskEncoding, MaskKind};

pub const MASK_KNOWN: u8 = 0;
pub const MASK_MISSING: u8 = 1;

/// A mask generator maps an image shape and a target percentage to a mask.
///
/// Implementations are pure: the same inputs (and seed) always yield the same
/// mask, and no state is shared between calls.
pub trait MaskGenerator: Send + Sync {
    /// Which sampling strategy this generator implements.
    fn kind(&self) -> MaskKind;

    /// Reject inputs this generator cannot serve, without building a mask.
    fn check(&self, width: u32, height: u32, percent: f64) -> Result<()>;

    /// Build the mask for an image of `width` x `height`.
    fn generate(&self, width: u32, height: u32, percent: f64) -> Result<Mask>;
}

/// Canonical mask: one flag per spatial cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    missing: Vec<bool>,
}

impl Mask {
    /// Build from per-cell "to be reconstructed" flags.
    pub fn from_missing(width: u32, height: u32, missing: Vec<bool>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if missing.len() != expected {
            return Err(BenchError::ShapeMismatch(format!(
                "{width}x{height} mask needs {expected} cells, got {}",
                missing.len()
            )));
        }
        Ok(Self {
            width,
            height,
            missing,
        })
    }

    /// Build from per-cell "visited" flags of a scan: visited cells are known,
    /// everything else is flagged for reconstruction.
    pub fn from_visited(width: u32, height: u32, visited: Vec<bool>) -> Result<Self> {
        let missing = visited.into_iter().map(|v| !v).collect();
        Self::from_missing(width, height, missing)
    }

    /// Flag the given linear cell indices; everything else is known.
    pub fn from_missing_indices(
        width: u32,
        height: u32,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<Self> {
        let len = width as usize * height as usize;
        let mut missing = vec![false; len];
        for idx in indices {
            let cell = missing.get_mut(idx).ok_or_else(|| {
                BenchError::ShapeMismatch(format!("cell {idx} outside {width}x{height} mask"))
            })?;
            *cell = true;
        }
        Ok(Self {
            width,
            height,
            missing,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_missing(&self, x: u32, y: u32) -> bool {
        self.missing[y as usize * self.width as usize + x as usize]
    }

    pub fn is_missing_index(&self, idx: usize) -> bool {
        self.missing[idx]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.missing
    }

    /// Number of cells flagged for reconstruction.
    pub fn missing_count(&self) -> usize {
        self.missing.iter().filter(|&&m| m).count()
    }

    /// Flagged cells as a percentage of all cells (0 for an empty mask).
    pub fn missing_percent(&self) -> f64 {
        if self.missing.is_empty() {
            return 0.0;
        }
        self.missing_count() as f64 * 100.0 / self.missing.len() as f64
    }

    // -- Encodings --------------------------------------------------------------

    /// Encode for the consumer that expects `encoding`.
    pub fn encode(&self, encoding: MaskEncoding) -> EncodedMask {
        match encoding {
            MaskEncoding::Numeric => EncodedMask::Numeric(self.to_numeric()),
            MaskEncoding::Boolean => EncodedMask::Boolean(self.to_boolean()),
        }
    }

    /// `u8` plane with [`MASK_MISSING`] on flagged cells and [`MASK_KNOWN`] elsewhere.
    pub fn to_numeric(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_missing(x, y) {
                MASK_MISSING
            } else {
                MASK_KNOWN
            }])
        })
    }

    /// Boolean grid over the spatial dimensions, `true` on flagged cells.
    pub fn to_boolean(&self) -> BooleanMask {
        BooleanMask {
            width: self.width,
            height: self.height,
            cells: self.missing.clone(),
        }
    }

    /// Viewable rendering: white where pixels are reconstructed.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_missing(x, y) { 255 } else { 0 }])
        })
    }
}

/// Boolean encoding of a mask over the spatial dimensions only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BooleanMask {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}

/// A mask in the encoding a particular inpainting primitive consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedMask {
    Numeric(GrayImage),
    Boolean(BooleanMask),
}

impl EncodedMask {
    pub fn encoding(&self) -> MaskEncoding {
        match self {
            Self::Numeric(_) => MaskEncoding::Numeric,
            Self::Boolean(_) => MaskEncoding::Boolean,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Numeric(img) => img.dimensions(),
            Self::Boolean(mask) => mask.dimensions(),
        }
    }

    /// Row-major "to be reconstructed" flags, whichever the encoding.
    pub fn missing_cells(&self) -> Vec<bool> {
        match self {
            Self::Numeric(img) => img.as_raw().iter().map(|&v| v != MASK_KNOWN).collect(),
            Self::Boolean(mask) => mask.cells.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Mask {
        Mask::from_missing(3, 2, vec![true, false, true, false, true, false]).unwrap()
    }

    #[test]
    fn visited_cells_are_known() {
        let mask = Mask::from_visited(2, 1, vec![true, false]).unwrap();
        assert!(!mask.is_missing(0, 0));
        assert!(mask.is_missing(1, 0));
    }

    #[test]
    fn both_encodings_agree_with_canonical_grid() {
        let mask = checker();
        let numeric = mask.to_numeric();
        let boolean = mask.to_boolean();
        assert_eq!(numeric.dimensions(), (3, 2));
        assert_eq!(boolean.dimensions(), (3, 2));
        for y in 0..2 {
            for x in 0..3 {
                let expected = mask.is_missing(x, y);
                assert_eq!(numeric.get_pixel(x, y)[0] == MASK_MISSING, expected);
                assert_eq!(boolean.get(x, y), expected);
            }
        }
        assert_eq!(
            mask.encode(MaskEncoding::Numeric).missing_cells(),
            mask.encode(MaskEncoding::Boolean).missing_cells()
        );
    }

    #[test]
    fn counts_and_percent() {
        let mask = checker();
        assert_eq!(mask.missing_count(), 3);
        assert!((mask.missing_percent() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn indices_outside_the_grid_are_rejected() {
        assert!(Mask::from_missing_indices(2, 2, [0, 4]).is_err());
        let mask = Mask::from_missing_indices(2, 2, [3]).unwrap();
        assert!(mask.is_missing(1, 1));
    }

    #[test]
    fn encoded_mask_reports_its_encoding() {
        let mask = checker();
        assert_eq!(
            mask.encode(MaskEncoding::Boolean).encoding(),
            MaskEncoding::Boolean
        );
        assert_eq!(mask.encode(MaskEncoding::Numeric).dimensions(), (3, 2));
    }
}
