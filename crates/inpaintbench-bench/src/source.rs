// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reference image a sweep is scored against.

use std::path::Path;

use inpaintbench_core::error::Result;
use inpaintbench_core::types::SourceIdentity;
use inpaintbench_sampling::{ImageProcessor, Raster};
use tracing::{info, instrument};

/// A decoded reference image together with its single-plane reduction.
///
/// The grayscale plane is computed once here and shared read-only by every
/// task, so no task repeats the conversion.
#[derive(Debug, Clone)]
pub struct SourceImage {
    identity: SourceIdentity,
    raster: Raster,
    gray: Raster,
}

impl SourceImage {
    /// Wrap an in-memory raster under a caller-chosen label.
    pub fn new(name: impl Into<String>, raster: Raster) -> Self {
        let identity = SourceIdentity {
            name: name.into(),
            digest: raster.digest(),
        };
        let gray = raster.to_grayscale();
        Self {
            identity,
            raster,
            gray,
        }
    }

    /// Decode `path`, optionally rescaling it by `resize`, and label it with
    /// the file stem.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), resize))]
    pub fn load(path: impl AsRef<Path>, resize: Option<f64>) -> Result<Self> {
        let path = path.as_ref();
        let mut processor = ImageProcessor::open(path)?;
        if let Some(factor) = resize {
            processor = processor.scale(factor)?;
        }
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "source".to_owned());
        let source = Self::new(name, processor.into_raster());
        info!(
            source = %source.identity,
            width = source.raster.width(),
            height = source.raster.height(),
            channels = source.raster.channels(),
            "reference image loaded"
        );
        Ok(source)
    }

    pub fn identity(&self) -> &SourceIdentity {
        &self.identity
    }

    /// Samples as decoded (one or three channels).
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Single-plane reduction used for scoring and by single-plane collaborators.
    pub fn gray(&self) -> &Raster {
        &self.gray
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }
}
