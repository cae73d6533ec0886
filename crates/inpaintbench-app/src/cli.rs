// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line interface. Flags overlay the JSON configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use inpaintbench_core::config::BenchConfig;
use inpaintbench_core::types::{AlgorithmKind, InpaintMethod, MaskKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep removal levels, algorithms and mask kinds over one reference image.
    Run(RunArgs),
    /// Render a single mask to an image file for inspection.
    Mask(MaskArgs),
    /// Print (or write) the default configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Reference image to score against.
    pub image: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Percentages of pixels to remove.
    #[arg(short, long, value_delimiter = ',')]
    pub percent: Vec<f64>,

    /// Inpainting algorithms (classical, biharmonic).
    #[arg(short, long, value_delimiter = ',')]
    pub algorithm: Vec<AlgorithmKind>,

    /// Mask kinds (random, spiral).
    #[arg(short, long, value_delimiter = ',')]
    pub mask: Vec<MaskKind>,

    /// Base seed for random masks.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Angular frequency of the spiral trajectory.
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Neighbourhood radius of the classical algorithm.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Classical interpolation model (telea, navier-stokes).
    #[arg(long)]
    pub method: Option<InpaintMethod>,

    /// Relaxation sweeps of the biharmonic algorithm.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Maximum number of configurations evaluated at once.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Resize factors; one full sweep runs per factor.
    #[arg(short, long, value_delimiter = ',')]
    pub resize: Vec<f64>,

    /// Save original, mask, defect and filled images for every configuration.
    #[arg(long)]
    pub artifacts: bool,

    /// Directory for the results database, text log, JSON report and artifacts.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the SQLite results database.
    #[arg(long)]
    pub no_db: bool,
}

impl RunArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut BenchConfig) {
        if !self.percent.is_empty() {
            config.percents = self.percent.clone();
        }
        if !self.algorithm.is_empty() {
            config.algorithms = self.algorithm.clone();
        }
        if !self.mask.is_empty() {
            config.mask_kinds = self.mask.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(frequency) = self.frequency {
            config.spiral_frequency = frequency;
        }
        if let Some(radius) = self.radius {
            config.classical_radius = radius;
        }
        if let Some(method) = self.method {
            config.classical_method = method;
        }
        if let Some(iterations) = self.iterations {
            config.biharmonic_iterations = iterations;
        }
        if self.workers.is_some() {
            config.max_workers = self.workers;
        }
        if self.artifacts {
            config.capture_artifacts = true;
        }
        if let Some(output) = &self.output {
            config.output_dir = Some(output.clone());
        }
    }

    /// Resize factors to sweep; `[None]` or the configured factor when no
    /// flag was given.
    pub fn resize_factors(&self, config: &BenchConfig) -> Vec<Option<f64>> {
        if self.resize.is_empty() {
            vec![config.resize]
        } else {
            self.resize.iter().copied().map(Some).collect()
        }
    }
}

#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Sampling pattern.
    #[arg(short, long, default_value = "spiral")]
    pub kind: MaskKind,

    /// Percentage of pixels to remove.
    #[arg(short, long, default_value_t = 50.0)]
    pub percent: f64,

    #[arg(long, default_value_t = 256)]
    pub width: u32,

    #[arg(long, default_value_t = 256)]
    pub height: u32,

    /// Seed for random masks.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Angular frequency for spiral masks.
    #[arg(long, default_value_t = inpaintbench_sampling::mask::spiral::DEFAULT_FREQUENCY)]
    pub frequency: f64,

    /// Where to write the mask image (white = reconstructed).
    #[arg(short, long, default_value = "mask.png")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
