// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Benchmark orchestration: enumerate the configuration space, run every
// configuration as an isolated blocking task on a bounded pool, and gather
// the results back in enumeration order.
//
// Failure policy:
//   * configuration errors are found before dispatch and abort the run;
//   * a collaborator error or panic inside a task becomes a `Failed` sentinel
//     for that task only, and the sweep continues.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use inpaintbench_core::config::BenchConfig;
use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::{
    AlgorithmKind, MaskKind, RunId, SourceIdentity, TaskOutcome, TaskSpec,
};
use inpaintbench_inpaint::{Inpainter, reference_inpainter};
use inpaintbench_sampling::{Mask, MaskGenerator, RandomMask, Raster, SpiralMask, mse_for};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::report::BenchmarkReport;
use crate::source::SourceImage;

/// Multiplier spreading consecutive task indices across the seed space
/// (2^64 divided by the golden ratio).
const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for the random mask of task `index`.
pub fn task_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64).wrapping_mul(SEED_SPREAD)
}

/// One unit of work: a point of the configuration space and the shared source.
#[derive(Debug, Clone)]
pub struct BenchmarkTask {
    pub spec: TaskSpec,
    pub source: Arc<SourceImage>,
}

/// Intermediate images of one task, kept only when artifact capture is on.
#[derive(Debug, Clone, PartialEq)]
pub struct StageArtifacts {
    /// The plane (or planes) handed to the collaborator, before masking.
    pub original: Raster,
    pub mask: Mask,
    pub defect: Raster,
    pub filled: Raster,
}

/// Outcome of one task, tagged with the configuration that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub task: TaskSpec,
    pub source: SourceIdentity,
    pub outcome: TaskOutcome,
    #[serde(skip)]
    pub artifacts: Option<StageArtifacts>,
}

impl BenchmarkResult {
    /// Sentinel for a task that did not produce a score.
    pub fn failed(task: TaskSpec, source: SourceIdentity, reason: impl Into<String>) -> Self {
        Self {
            task,
            source,
            outcome: TaskOutcome::Failed {
                reason: reason.into(),
            },
            artifacts: None,
        }
    }
}

/// Runs configuration sweeps against one reference image at a time.
pub struct BenchmarkOrchestrator {
    config: BenchConfig,
    inpainters: HashMap<AlgorithmKind, Arc<dyn Inpainter>>,
}

impl BenchmarkOrchestrator {
    /// Validate `config` and wire up the reference collaborators it selects.
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let mut inpainters = HashMap::new();
        for &algorithm in &config.algorithms {
            inpainters.insert(algorithm, reference_inpainter(algorithm, &config)?);
        }
        Ok(Self { config, inpainters })
    }

    /// Replace the collaborator used for `inpainter.algorithm()`.
    pub fn with_inpainter(mut self, inpainter: Arc<dyn Inpainter>) -> Self {
        self.inpainters.insert(inpainter.algorithm(), inpainter);
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Tasks in enumeration order (percent, then algorithm, then mask kind).
    pub fn enumerate(&self, source: &Arc<SourceImage>) -> Vec<BenchmarkTask> {
        self.config
            .enumerate_tasks()
            .into_iter()
            .map(|spec| BenchmarkTask {
                spec,
                source: Arc::clone(source),
            })
            .collect()
    }

    /// Reject the sweep before any work starts if a configuration cannot be
    /// served for this source (unsupported spiral level, non-square image,
    /// out-of-range percentage, missing collaborator).
    pub fn validate_plan(&self, source: &SourceImage) -> Result<()> {
        let (width, height) = source.dimensions();
        for spec in self.config.enumerate_tasks() {
            self.generator_for(&spec)?.check(width, height, spec.percent)?;
            self.inpainter_for(spec.algorithm)?;
        }
        Ok(())
    }

    fn generator_for(&self, spec: &TaskSpec) -> Result<Box<dyn MaskGenerator>> {
        let generator: Box<dyn MaskGenerator> = match spec.mask_kind {
            MaskKind::Random => Box::new(RandomMask::new(task_seed(self.config.seed, spec.index))),
            MaskKind::Spiral => Box::new(SpiralMask::new(self.config.spiral_frequency)?),
        };
        Ok(generator)
    }

    fn inpainter_for(&self, algorithm: AlgorithmKind) -> Result<Arc<dyn Inpainter>> {
        self.inpainters
            .get(&algorithm)
            .cloned()
            .ok_or_else(|| BenchError::UnknownAlgorithm(algorithm.to_string()))
    }

    fn worker_count(&self, tasks: usize) -> usize {
        let limit = self.config.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        limit.min(tasks).max(1)
    }

    /// Run the full sweep and return one result per task, in enumeration order.
    #[instrument(skip_all, fields(source = %source.identity()))]
    pub async fn run(&self, source: Arc<SourceImage>) -> Result<BenchmarkReport> {
        self.validate_plan(&source)?;

        let run_id = RunId::new();
        let started_at = Utc::now();
        let identity = source.identity().clone();
        let tasks = self.enumerate(&source);
        let specs: Vec<TaskSpec> = tasks.iter().map(|t| t.spec).collect();
        let workers = self.worker_count(tasks.len());
        info!(%run_id, tasks = tasks.len(), workers, "benchmark sweep started");

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut pending: JoinSet<(usize, Result<BenchmarkResult>)> = JoinSet::new();
        for task in tasks {
            let generator = self.generator_for(&task.spec)?;
            let inpainter = self.inpainter_for(task.spec.algorithm)?;
            let capture = self.config.capture_artifacts;
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| BenchError::TaskPanicked(format!("worker pool closed: {e}")))?;
            pending.spawn_blocking(move || {
                let _permit = permit;
                let index = task.spec.index;
                let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                    execute(&task, generator.as_ref(), inpainter.as_ref(), capture)
                }))
                .unwrap_or_else(|payload| Err(BenchError::TaskPanicked(panic_message(&*payload))));
                (index, result)
            });
        }

        let mut slots: Vec<Option<BenchmarkResult>> = specs.iter().map(|_| None).collect();
        let mut fatal: Option<BenchError> = None;
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok((index, Ok(result))) => slots[index] = Some(result),
                Ok((index, Err(err))) if err.is_configuration() => {
                    error!(task = %specs[index], error = %err, "configuration error inside task");
                    fatal.get_or_insert(err);
                }
                Ok((index, Err(err))) => {
                    warn!(task = %specs[index], error = %err, "task failed; recording sentinel");
                    slots[index] = Some(BenchmarkResult::failed(
                        specs[index],
                        identity.clone(),
                        err.to_string(),
                    ));
                }
                Err(join_err) => warn!(error = %join_err, "task did not complete"),
            }
        }
        if let Some(err) = fatal {
            return Err(err);
        }

        let results: Vec<BenchmarkResult> = slots
            .into_iter()
            .zip(&specs)
            .map(|(slot, spec)| {
                slot.unwrap_or_else(|| {
                    BenchmarkResult::failed(*spec, identity.clone(), "task did not complete")
                })
            })
            .collect();
        let report = BenchmarkReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            source: identity,
            resize: self.config.resize,
            results,
        };
        info!(
            %run_id,
            scored = report.scored_count(),
            failed = report.failed_count(),
            "benchmark sweep finished"
        );
        Ok(report)
    }
}

/// Generate, mask, fill and score a single configuration.
fn execute(
    task: &BenchmarkTask,
    generator: &dyn MaskGenerator,
    inpainter: &dyn Inpainter,
    capture: bool,
) -> Result<BenchmarkResult> {
    let spec = task.spec;
    let source = &task.source;
    let (width, height) = source.dimensions();

    let mask = generator.generate(width, height, spec.percent)?;
    let original = match spec.algorithm {
        AlgorithmKind::Classical => source.gray(),
        AlgorithmKind::Biharmonic => source.raster(),
    };
    let defect = original.apply_defect(&mask)?;
    let filled = inpainter.inpaint(&defect, &mask.encode(spec.algorithm.mask_encoding()))?;
    if filled.dimensions() != original.dimensions() {
        return Err(BenchError::ShapeMismatch(format!(
            "{} returned {}x{} for a {}x{} input",
            spec.algorithm,
            filled.width(),
            filled.height(),
            width,
            height
        )));
    }

    let mse = mse_for(source.gray(), &filled.to_grayscale(), spec.mask_kind)?;
    let realized_removed_percent = mask.missing_percent();
    debug!(task = %spec, mse, realized_removed_percent, "task scored");

    let artifacts = capture.then(|| StageArtifacts {
        original: original.clone(),
        mask,
        defect,
        filled,
    });
    Ok(BenchmarkResult {
        task: spec,
        source: source.identity().clone(),
        outcome: TaskOutcome::Scored {
            mse,
            realized_removed_percent,
        },
        artifacts,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_owned()
    }
}
