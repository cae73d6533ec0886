// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result reporting: fan a finished report out to any number of sinks.
//
// Every record is written on its own. A record or sink that fails is logged
// and counted, and the remaining records and sinks are still written.

pub mod artifacts;
pub mod json;
pub mod sqlite;
pub mod text;

pub use artifacts::ArtifactSink;
pub use json::JsonReportSink;
pub use sqlite::SqliteSink;
pub use text::TextRecordSink;

use inpaintbench_core::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::orchestrator::BenchmarkResult;
use crate::report::BenchmarkReport;

/// A destination for benchmark results.
///
/// Sinks are synchronous; call the reporter from `spawn_blocking` when
/// running inside an async context.
pub trait ResultSink: Send {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Persist one result of `report`.
    fn record(&mut self, report: &BenchmarkReport, result: &BenchmarkResult) -> Result<()>;

    /// Called once after every record was offered.
    fn finish(&mut self, _report: &BenchmarkReport) -> Result<()> {
        Ok(())
    }
}

/// Tally of one reporting pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Successful writes, counted per sink and per record.
    pub written: usize,
    /// Failed writes, including failed `finish` calls.
    pub failed: usize,
}

/// Writes reports to every registered sink, isolating failures.
#[derive(Default)]
pub struct ResultReporter {
    sinks: Vec<Box<dyn ResultSink>>,
}

impl ResultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn ResultSink>) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Offer every result to every sink.
    #[instrument(skip_all, fields(run_id = %report.run_id, sinks = self.sinks.len()))]
    pub fn report(&mut self, report: &BenchmarkReport) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for sink in &mut self.sinks {
            for result in &report.results {
                match sink.record(report, result) {
                    Ok(()) => summary.written += 1,
                    Err(err) => {
                        summary.failed += 1;
                        warn!(sink = sink.name(), task = %result.task, error = %err, "failed to persist result");
                    }
                }
            }
            if let Err(err) = sink.finish(report) {
                summary.failed += 1;
                warn!(sink = sink.name(), error = %err, "failed to finalise sink");
            }
        }
        info!(written = summary.written, failed = summary.failed, "report persisted");
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use inpaintbench_core::config::BenchConfig;
    use inpaintbench_core::error::BenchError;
    use inpaintbench_core::types::{AlgorithmKind, RunId, SourceIdentity, TaskOutcome};

    /// Four scored biharmonic results at 20 % and 50 %.
    pub(crate) fn sample_report() -> BenchmarkReport {
        let source = SourceIdentity {
            name: "liposome".into(),
            digest: "cd".repeat(32),
        };
        let config = BenchConfig {
            percents: vec![20.0, 50.0],
            algorithms: vec![AlgorithmKind::Biharmonic],
            ..BenchConfig::default()
        };
        let results = config
            .enumerate_tasks()
            .into_iter()
            .map(|task| BenchmarkResult {
                task,
                source: source.clone(),
                outcome: TaskOutcome::Scored {
                    mse: task.index as f64 * 1.5,
                    realized_removed_percent: task.percent,
                },
                artifacts: None,
            })
            .collect();
        BenchmarkReport {
            run_id: RunId::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            source,
            resize: None,
            results,
        }
    }

    /// Fails every other record and its finish call.
    struct Flaky {
        seen: usize,
    }

    impl ResultSink for Flaky {
        fn name(&self) -> &str {
            "flaky"
        }

        fn record(&mut self, _: &BenchmarkReport, _: &BenchmarkResult) -> Result<()> {
            self.seen += 1;
            if self.seen % 2 == 0 {
                Err(BenchError::Database("disk full".into()))
            } else {
                Ok(())
            }
        }

        fn finish(&mut self, _: &BenchmarkReport) -> Result<()> {
            Err(BenchError::Database("disk full".into()))
        }
    }

    #[test]
    fn failing_sink_does_not_stop_the_others() {
        let report = sample_report();
        let db = SqliteSink::open_in_memory().unwrap();
        let mut reporter = ResultReporter::new()
            .with_sink(Flaky { seen: 0 })
            .with_sink(db);
        let summary = reporter.report(&report);

        // flaky: 2 ok, 2 failed records and a failed finish; sqlite: 4 ok.
        assert_eq!(summary.written, 6);
        assert_eq!(summary.failed, 3);
    }

    #[test]
    fn empty_reporter_writes_nothing() {
        let mut reporter = ResultReporter::new();
        assert!(reporter.is_empty());
        assert_eq!(reporter.report(&sample_report()), ReportSummary::default());
    }
}
