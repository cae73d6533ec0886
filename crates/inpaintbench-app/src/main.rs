// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// inpaintbench: sparse-sampling inpainting benchmark.
//
// Entry point. Initialises logging, parses the command line, and runs the
// requested sweep, mask rendering or config export.

mod cli;
mod output_dir;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use inpaintbench_bench::reporter::text::text_record;
use inpaintbench_bench::{
    ArtifactSink, BenchmarkOrchestrator, BenchmarkReport, JsonReportSink, ResultReporter,
    SourceImage, SqliteSink, TextRecordSink,
};
use inpaintbench_core::config::BenchConfig;
use inpaintbench_core::error::{BenchError, Result};
use inpaintbench_core::types::MaskKind;
use inpaintbench_sampling::image::processor::save_mask;
use inpaintbench_sampling::{MaskGenerator, RandomMask, SpiralMask};
use tracing::{info, warn};

use cli::{Cli, Command, ConfigArgs, MaskArgs, RunArgs};
use output_dir::{output_dir, output_subdir};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Mask(args) => render_mask(&args),
        Command::Config(args) => export_config(&args),
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;
    let out = output_dir(config.output_dir.as_deref())?;
    info!(output = %out.display(), "inpaintbench starting");

    for factor in args.resize_factors(&config) {
        let sweep_config = BenchConfig {
            resize: factor,
            ..config.clone()
        };
        let orchestrator = BenchmarkOrchestrator::new(sweep_config)?;
        let source = Arc::new(SourceImage::load(&args.image, factor)?);
        let report = orchestrator.run(source).await?;

        for result in &report.results {
            println!("{}", text_record(result));
        }

        let mut reporter = build_reporter(orchestrator.config(), &out, &report, args.no_db);
        let summary = tokio::task::spawn_blocking(move || reporter.report(&report))
            .await
            .map_err(|e| BenchError::TaskPanicked(format!("reporter: {e}")))?;
        if summary.failed > 0 {
            warn!(failed = summary.failed, "some results were not persisted");
        }
    }
    Ok(())
}

/// Assemble the sinks for one report. A sink that cannot be opened is logged
/// and left out; the others still run.
fn build_reporter(
    config: &BenchConfig,
    out: &Path,
    report: &BenchmarkReport,
    no_db: bool,
) -> ResultReporter {
    let mut reporter = ResultReporter::new()
        .with_sink(TextRecordSink::new(out.join("results.txt")))
        .with_sink(JsonReportSink::new(
            out.join(format!("{}_{}.json", report.source.name, report.run_id)),
        ));
    if !no_db {
        match SqliteSink::open(out.join("results.db")) {
            Ok(sink) => reporter.add_sink(Box::new(sink)),
            Err(err) => warn!(error = %err, "results database unavailable"),
        }
    }
    if config.capture_artifacts {
        let dir = output_subdir(out, "artifacts")
            .and_then(|dir| ArtifactSink::new(dir.join(report.run_id.to_string())));
        match dir {
            Ok(sink) => reporter.add_sink(Box::new(sink)),
            Err(err) => warn!(error = %err, "artifact directory unavailable"),
        }
    }
    reporter
}

fn render_mask(args: &MaskArgs) -> Result<()> {
    let mask = match args.kind {
        MaskKind::Random => {
            RandomMask::new(args.seed).generate(args.width, args.height, args.percent)?
        }
        MaskKind::Spiral => {
            let (mask, stats) = SpiralMask::new(args.frequency)?.generate_with_stats(
                args.width,
                args.height,
                args.percent,
            )?;
            info!(
                total_points = stats.total_points,
                unique_points = stats.unique_points,
                duplicate_points = stats.duplicate_points,
                disk_coverage = stats.disk_coverage_percent,
                "spiral trajectory"
            );
            mask
        }
    };
    save_mask(&mask, &args.output)?;
    info!(
        kind = %args.kind,
        requested = args.percent,
        realized = mask.missing_percent(),
        path = %args.output.display(),
        "mask written"
    );
    Ok(())
}

fn export_config(args: &ConfigArgs) -> Result<()> {
    let config = BenchConfig::default();
    match &args.output {
        Some(path) => {
            config.save(path)?;
            info!(path = %path.display(), "default configuration written");
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
