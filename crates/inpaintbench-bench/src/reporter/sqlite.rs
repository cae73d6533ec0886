// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SQLite result store: one row per benchmark result, keyed by run.

use std::path::Path;

use chrono::Utc;
use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::{RunId, TaskOutcome};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, instrument};

use super::ResultSink;
use crate::orchestrator::BenchmarkResult;
use crate::report::BenchmarkReport;

/// SQLite schema for the results table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS results (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        run_id TEXT NOT NULL,
        recorded_at TEXT NOT NULL,
        source_name TEXT NOT NULL,
        source_digest TEXT NOT NULL,
        resize REAL,
        task_index INTEGER NOT NULL,
        percent REAL NOT NULL,
        algorithm TEXT NOT NULL,
        mask_kind TEXT NOT NULL,
        status TEXT NOT NULL,
        mse REAL,
        realized_removed_percent REAL,
        failure TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_results_run ON results (run_id, task_index);
"#;

fn db_err(context: &str) -> impl Fn(rusqlite::Error) -> BenchError + '_ {
    move |e| BenchError::Database(format!("{context}: {e}"))
}

/// Result store backed by a SQLite database.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) the database at `path` in WAL mode.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(db_err("open"))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err("WAL pragma"))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(db_err("create table"))?;
        info!("results database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(db_err("open in-memory"))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(db_err("create table"))?;
        debug!("in-memory results database opened");
        Ok(Self { conn })
    }

    /// Number of rows stored for `run_id`.
    pub fn count_for_run(&self, run_id: &RunId) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM results WHERE run_id = ?1",
                params![run_id.to_string()],
                |row| row.get(0),
            )
            .map_err(db_err("count results"))?;
        Ok(count as usize)
    }

    /// Stored MSE of task `index` in `run_id`; `None` when the task failed or
    /// was never recorded.
    pub fn mse_for_task(&self, run_id: &RunId, index: usize) -> Result<Option<f64>> {
        let mse: Option<Option<f64>> = self
            .conn
            .query_row(
                "SELECT mse FROM results WHERE run_id = ?1 AND task_index = ?2",
                params![run_id.to_string(), index as i64],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err("query result"))?;
        Ok(mse.flatten())
    }
}

impl ResultSink for SqliteSink {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn record(&mut self, report: &BenchmarkReport, result: &BenchmarkResult) -> Result<()> {
        let (status, mse, realized, failure) = match &result.outcome {
            TaskOutcome::Scored {
                mse,
                realized_removed_percent,
            } => ("scored", Some(*mse), Some(*realized_removed_percent), None),
            TaskOutcome::Failed { reason } => ("failed", None, None, Some(reason.as_str())),
        };
        self.conn
            .execute(
                "INSERT INTO results (run_id, recorded_at, source_name, source_digest, resize,
                 task_index, percent, algorithm, mask_kind, status, mse,
                 realized_removed_percent, failure)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    report.run_id.to_string(),
                    Utc::now().to_rfc3339(),
                    result.source.name,
                    result.source.digest,
                    report.resize,
                    result.task.index as i64,
                    result.task.percent,
                    result.task.algorithm.as_str(),
                    result.task.mask_kind.as_str(),
                    status,
                    mse,
                    realized,
                    failure,
                ],
            )
            .map_err(db_err("insert result"))?;
        debug!(task = %result.task, "result stored");
        Ok(())
    }
}
