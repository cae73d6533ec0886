// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// inpaintbench-bench: Concurrent benchmark sweeps for inpaintbench.
//
// The orchestrator fans a configuration space out over a bounded pool of
// blocking tasks and returns an ordered report; the reporter persists that
// report to SQLite, a text log, PNG artifacts and JSON.

pub mod orchestrator;
pub mod report;
pub mod reporter;
pub mod source;

pub use orchestrator::{BenchmarkOrchestrator, BenchmarkResult, BenchmarkTask, StageArtifacts};
pub use report::BenchmarkReport;
pub use reporter::{
    ArtifactSink, JsonReportSink, ReportSummary, ResultReporter, ResultSink, SqliteSink,
    TextRecordSink,
};
pub use source::SourceImage;
