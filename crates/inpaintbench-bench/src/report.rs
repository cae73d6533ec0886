// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Aggregated outcome of one sweep.

use chrono::{DateTime, Utc};
use inpaintbench_core::types::{AlgorithmKind, MaskKind, RunId, SourceIdentity};
use serde::{Deserialize, Serialize};

use crate::orchestrator::BenchmarkResult;

/// Every result of one run, in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub source: SourceIdentity,
    /// Scale factor the source was loaded with, if any.
    pub resize: Option<f64>,
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    pub fn scored_count(&self) -> usize {
        self.results.len() - self.failed_count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }

    /// MSE of the first result matching the configuration, if it was scored.
    pub fn mse_of(&self, percent: f64, algorithm: AlgorithmKind, mask_kind: MaskKind) -> Option<f64> {
        self.results
            .iter()
            .find(|r| {
                r.task.percent == percent
                    && r.task.algorithm == algorithm
                    && r.task.mask_kind == mask_kind
            })
            .and_then(|r| r.outcome.mse())
    }

    /// Pretty JSON rendering (artifacts are never serialised).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
