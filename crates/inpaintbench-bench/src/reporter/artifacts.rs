// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stage artifacts: the original, mask, defect and filled images of each task
// written out as PNG files.

use std::path::{Path, PathBuf};

use inpaintbench_core::error::Result;
use inpaintbench_sampling::image::processor::{save_mask, save_raster};
use tracing::debug;

use super::ResultSink;
use crate::orchestrator::BenchmarkResult;
use crate::report::BenchmarkReport;

/// Writes `<source>_<percent>_<algorithm>_<mask>_<stage>.png` for every result
/// that carries captured artifacts; results without them are skipped.
pub struct ArtifactSink {
    dir: PathBuf,
}

impl ArtifactSink {
    /// Target `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of `stage` for `result`.
    pub fn artifact_path(&self, result: &BenchmarkResult, stage: &str) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_{}_{}_{}.png",
            result.source.name,
            result.task.percent,
            result.task.algorithm,
            result.task.mask_kind,
            stage
        ))
    }
}

impl ResultSink for ArtifactSink {
    fn name(&self) -> &str {
        "artifacts"
    }

    fn record(&mut self, _report: &BenchmarkReport, result: &BenchmarkResult) -> Result<()> {
        let Some(artifacts) = &result.artifacts else {
            return Ok(());
        };
        save_raster(&artifacts.original, self.artifact_path(result, "original"))?;
        save_mask(&artifacts.mask, self.artifact_path(result, "mask"))?;
        save_raster(&artifacts.defect, self.artifact_path(result, "defect"))?;
        save_raster(&artifacts.filled, self.artifact_path(result, "filled"))?;
        debug!(task = %result.task, dir = %self.dir.display(), "artifacts written");
        Ok(())
    }
}
