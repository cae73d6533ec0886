// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// inpaintbench-inpaint: Inpainting collaborators scored by the benchmark.
//
// The harness only sees the `Inpainter` trait. Two reference implementations
// ship here so a sweep runs end to end: a distance-ordered neighbourhood fill
// (classical, numeric mask) and a biharmonic relaxation (boolean mask).

pub mod biharmonic;
pub mod classical;
mod fill;

pub use biharmonic::BiharmonicInpainter;
pub use classical::ClassicalInpainter;

use std::sync::Arc;

use inpaintbench_core::config::BenchConfig;
use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::AlgorithmKind;
use inpaintbench_sampling::{EncodedMask, Raster};

/// A pixel-filling primitive.
///
/// `inpaint` receives the defect image (flagged cells already zeroed) and the
/// mask in the encoding reported by `algorithm().mask_encoding()`. It returns
/// a raster with the same shape as its input. Implementations must not panic
/// on valid input; the harness turns a panic into a failed task all the same.
pub trait Inpainter: Send + Sync {
    fn algorithm(&self) -> AlgorithmKind;

    fn inpaint(&self, image: &Raster, mask: &EncodedMask) -> Result<Raster>;
}

/// The reference collaborator for `algorithm`, parameterised from `config`.
pub fn reference_inpainter(
    algorithm: AlgorithmKind,
    config: &BenchConfig,
) -> Result<Arc<dyn Inpainter>> {
    let inpainter: Arc<dyn Inpainter> = match algorithm {
        AlgorithmKind::Classical => Arc::new(ClassicalInpainter::new(
            config.classical_radius,
            config.classical_method,
        )?),
        AlgorithmKind::Biharmonic => Arc::new(BiharmonicInpainter::new(config.biharmonic_iterations)),
    };
    Ok(inpainter)
}

pub(crate) fn check_dimensions(image: &Raster, mask: &EncodedMask) -> Result<()> {
    if image.dimensions() != mask.dimensions() {
        let (mw, mh) = mask.dimensions();
        return Err(BenchError::ShapeMismatch(format!(
            "mask {mw}x{mh} does not match image {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}
