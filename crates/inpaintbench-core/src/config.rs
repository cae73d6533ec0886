// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Benchmark configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::types::{AlgorithmKind, InpaintMethod, MaskKind, TaskSpec};

/// Settings for one benchmark sweep.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Percentages of pixels to remove.
    pub percents: Vec<f64>,
    /// Inpainting primitives to score.
    pub algorithms: Vec<AlgorithmKind>,
    /// Sampling patterns to generate.
    pub mask_kinds: Vec<MaskKind>,
    /// Base seed for random masks; each task derives its own from it.
    pub seed: u64,
    /// Angular frequency of the spiral trajectory.
    pub spiral_frequency: f64,
    /// Neighbourhood radius for the classical primitive.
    pub classical_radius: u32,
    /// Interpolation model for the classical primitive.
    pub classical_method: InpaintMethod,
    /// Relaxation sweeps for the biharmonic primitive.
    pub biharmonic_iterations: u32,
    /// Upper bound on concurrently running tasks (defaults to available parallelism).
    pub max_workers: Option<usize>,
    /// Scale factor applied to the source image on load.
    pub resize: Option<f64>,
    /// Keep original/mask/defect/filled images on each result.
    pub capture_artifacts: bool,
    /// Directory for reports and artifacts.
    pub output_dir: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            percents: vec![20.0, 50.0, 80.0],
            algorithms: AlgorithmKind::ALL.to_vec(),
            mask_kinds: MaskKind::ALL.to_vec(),
            seed: 0x5EED_1234,
            spiral_frequency: 1.0,
            classical_radius: 1,
            classical_method: InpaintMethod::Telea,
            biharmonic_iterations: 200,
            max_workers: None,
            resize: None,
            capture_artifacts: false,
            output_dir: None,
        }
    }
}

impl BenchConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Write this configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Check the ranges that do not depend on the source image.
    ///
    /// Mask-specific checks (supported spiral levels, square input) happen when
    /// a sweep is planned against a concrete image.
    pub fn validate(&self) -> Result<()> {
        if self.percents.is_empty() || self.algorithms.is_empty() || self.mask_kinds.is_empty()
        {
            return Err(BenchError::InvalidConfig(
                "percents, algorithms and mask_kinds must each list at least one value".into(),
            ));
        }
        if let Some(axis) = self.duplicated_axis() {
            return Err(BenchError::InvalidConfig(format!(
                "{axis} must not list the same value twice"
            )));
        }
        if let Some(&bad) = self
            .percents
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0 || **p > 100.0)
        {
            return Err(BenchError::InvalidPercent(bad));
        }
        if !self.spiral_frequency.is_finite() {
            return Err(BenchError::InvalidConfig(format!(
                "spiral_frequency must be finite, got {}",
                self.spiral_frequency
            )));
        }
        if self.classical_radius == 0 {
            return Err(BenchError::InvalidConfig(
                "classical_radius must be at least 1".into(),
            ));
        }
        if self.max_workers == Some(0) {
            return Err(BenchError::InvalidConfig(
                "max_workers must be at least 1".into(),
            ));
        }
        if let Some(factor) = self.resize {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(BenchError::InvalidConfig(format!(
                    "resize factor must be positive, got {factor}"
                )));
            }
        }
        Ok(())
    }

    /// Name of the first axis that repeats a value, if any.
    fn duplicated_axis(&self) -> Option<&'static str> {
        fn repeats<T: PartialEq>(values: &[T]) -> bool {
            values
                .iter()
                .enumerate()
                .any(|(i, v)| values[..i].contains(v))
        }
        if repeats(&self.percents) {
            Some("percents")
        } else if repeats(&self.algorithms) {
            Some("algorithms")
        } else if repeats(&self.mask_kinds) {
            Some("mask_kinds")
        } else {
            None
        }
    }

    /// Enumerate the configuration cross-product.
    ///
    /// Order is percent, then algorithm, then mask kind; `TaskSpec::index`
    /// records the position.
    pub fn enumerate_tasks(&self) -> Vec<TaskSpec> {
        let mut tasks =
            Vec::with_capacity(self.percents.len() * self.algorithms.len() * self.mask_kinds.len());
        for &percent in &self.percents {
            for &algorithm in &self.algorithms {
                for &mask_kind in &self.mask_kinds {
                    tasks.push(TaskSpec {
                        index: tasks.len(),
                        percent,
                        algorithm,
                        mask_kind,
                    });
                }
            }
        }
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_enumerates_twelve_tasks_in_order() {
        let tasks = BenchConfig::default().enumerate_tasks();
        assert_eq!(tasks.len(), 12);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.index, i);
        }
        assert_eq!(tasks[0].percent, 20.0);
        assert_eq!(tasks[0].algorithm, AlgorithmKind::Classical);
        assert_eq!(tasks[0].mask_kind, MaskKind::Random);
        assert_eq!(tasks[1].mask_kind, MaskKind::Spiral);
        assert_eq!(tasks[11].percent, 80.0);
        assert_eq!(tasks[11].algorithm, AlgorithmKind::Biharmonic);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            BenchConfig::from_json_str(r#"{ "percents": [10, 90], "mask_kinds": ["random"] }"#)
                .unwrap();
        assert_eq!(config.percents, vec![10.0, 90.0]);
        assert_eq!(config.mask_kinds, vec![MaskKind::Random]);
        assert_eq!(config.algorithms, AlgorithmKind::ALL.to_vec());
        assert_eq!(config.enumerate_tasks().len(), 4);
    }

    #[test]
    fn unknown_algorithm_in_json_is_rejected() {
        let err = BenchConfig::from_json_str(r#"{ "algorithms": ["dictionary"] }"#);
        assert!(err.is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_percent() {
        let config = BenchConfig {
            percents: vec![50.0, 101.0],
            ..BenchConfig::default()
        };
        match config.validate() {
            Err(BenchError::InvalidPercent(p)) => assert_eq!(p, 101.0),
            other => panic!("expected InvalidPercent, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_axes_and_zero_workers() {
        let empty = BenchConfig {
            algorithms: Vec::new(),
            ..BenchConfig::default()
        };
        assert!(empty.validate().unwrap_err().is_configuration());

        let zero = BenchConfig {
            max_workers: Some(0),
            ..BenchConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn validate_rejects_repeated_axis_values() {
        let config = BenchConfig {
            percents: vec![20.0, 20.0],
            ..BenchConfig::default()
        };
        match config.validate() {
            Err(BenchError::InvalidConfig(msg)) => assert!(msg.contains("percents")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }

        let config = BenchConfig {
            mask_kinds: vec![MaskKind::Spiral, MaskKind::Random, MaskKind::Spiral],
            ..BenchConfig::default()
        };
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn save_and_load_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        let config = BenchConfig {
            seed: 7,
            resize: Some(0.5),
            ..BenchConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(BenchConfig::load(&path).unwrap(), config);
    }
}
