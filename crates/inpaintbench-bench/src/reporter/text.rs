// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text result log, one line per result.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use inpaintbench_core::error::Result;
use inpaintbench_core::types::TaskOutcome;

use super::ResultSink;
use crate::orchestrator::BenchmarkResult;
use crate::report::BenchmarkReport;

/// Human-readable line for one result: `"<percent>%, <algorithm>, <mask>, <mse>"`.
///
/// Failed tasks print `failed (<reason>)` in place of the score.
pub fn text_record(result: &BenchmarkResult) -> String {
    let score = match &result.outcome {
        TaskOutcome::Scored { mse, .. } => mse.to_string(),
        TaskOutcome::Failed { reason } => format!("failed ({reason})"),
    };
    format!(
        "{}%, {}, {}, {}",
        result.task.percent, result.task.algorithm, result.task.mask_kind, score
    )
}

/// Appends [`text_record`] lines to a file, creating it on first write.
pub struct TextRecordSink {
    path: PathBuf,
    file: Option<File>,
}

impl TextRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?,
        };
        Ok(self.file.insert(file))
    }
}

impl ResultSink for TextRecordSink {
    fn name(&self) -> &str {
        "text"
    }

    fn record(&mut self, _report: &BenchmarkReport, result: &BenchmarkResult) -> Result<()> {
        let line = text_record(result);
        writeln!(self.file()?, "{line}")?;
        Ok(())
    }

    fn finish(&mut self, _report: &BenchmarkReport) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::ResultReporter;
    use crate::reporter::tests::sample_report;

    #[test]
    fn record_line_format() {
        let report = sample_report();
        assert_eq!(text_record(&report.results[1]), "20%, biharmonic, spiral, 1.5");

        let failed = BenchmarkResult::failed(report.results[0].task, report.source.clone(), "boom");
        assert_eq!(text_record(&failed), "20%, biharmonic, random, failed (boom)");
    }

    #[test]
    fn appends_one_line_per_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let report = sample_report();
        let mut reporter = ResultReporter::new().with_sink(TextRecordSink::new(&path));
        reporter.report(&report);
        reporter.report(&report);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next(), Some("20%, biharmonic, random, 0"));
    }

    #[test]
    fn unwritable_path_fails_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.txt");
        let summary = ResultReporter::new()
            .with_sink(TextRecordSink::new(path))
            .report(&sample_report());
        assert_eq!(summary.written, 0);
        assert_eq!(summary.failed, 4);
    }
}
