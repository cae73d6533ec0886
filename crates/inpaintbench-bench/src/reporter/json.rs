// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-report JSON export.

use std::path::PathBuf;

use inpaintbench_core::error::Result;
use tracing::debug;

use super::ResultSink;
use crate::orchestrator::BenchmarkResult;
use crate::report::BenchmarkReport;

/// Writes the ordered report as pretty JSON once all records were offered.
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSink for JsonReportSink {
    fn name(&self) -> &str {
        "json"
    }

    fn record(&mut self, _report: &BenchmarkReport, _result: &BenchmarkResult) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &BenchmarkReport) -> Result<()> {
        std::fs::write(&self.path, report.to_json()?)?;
        debug!(path = %self.path.display(), "JSON report written");
        Ok(())
    }
}
