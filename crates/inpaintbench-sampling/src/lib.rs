// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// inpaintbench-sampling: Sampling and evaluation scaffolding.
//
// Provides the in-memory raster type, image loading and encoding, the random
// and spiral mask generators, the centred-disk region of interest, and the
// mean squared error metric.

pub mod image;
pub mod mask;
pub mod metric;
pub mod raster;
pub mod roi;

// Re-export the primary types so callers can use `inpaintbench_sampling::Mask` etc.
pub use self::image::processor::ImageProcessor;
pub use mask::random::RandomMask;
pub use mask::spiral::{SpiralCalibration, SpiralMask, TrajectoryStats};
pub use mask::{BooleanMask, EncodedMask, Mask, MaskGenerator};
pub use metric::{mse, mse_for};
pub use raster::Raster;
pub use roi::CircleRoi;
