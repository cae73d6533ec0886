// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the inpainting benchmark.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BenchError;

/// Unique identifier for one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampling strategy that decides which pixels go missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskKind {
    /// Uniform random subset of pixels, drawn without replacement.
    Random,
    /// Pixels off a Fermat spiral scan trajectory.
    Spiral,
}

impl MaskKind {
    pub const ALL: [MaskKind; 2] = [MaskKind::Random, MaskKind::Spiral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Spiral => "spiral",
        }
    }

    /// Whether fidelity for this kind is scored inside the centred disk only.
    pub fn uses_circle_roi(&self) -> bool {
        matches!(self, Self::Spiral)
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaskKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "spiral" => Ok(Self::Spiral),
            other => Err(BenchError::UnknownMaskKind(other.to_owned())),
        }
    }
}

/// Inpainting primitive a task is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Neighbourhood-propagation inpainting on a single plane.
    Classical,
    /// Biharmonic PDE inpainting, applied per channel.
    Biharmonic,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 2] = [AlgorithmKind::Classical, AlgorithmKind::Biharmonic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Biharmonic => "biharmonic",
        }
    }

    /// The mask encoding this primitive consumes.
    pub fn mask_encoding(&self) -> MaskEncoding {
        match self {
            Self::Classical => MaskEncoding::Numeric,
            Self::Biharmonic => MaskEncoding::Boolean,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "algorithm" is the name older result files use for the classical primitive.
            "classical" | "algorithm" => Ok(Self::Classical),
            "biharmonic" => Ok(Self::Biharmonic),
            other => Err(BenchError::UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Output encoding of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskEncoding {
    /// `u8` plane, 1 = reconstruct, 0 = known.
    Numeric,
    /// `bool` per spatial cell, `true` = reconstruct.
    Boolean,
}

impl fmt::Display for MaskEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Boolean => f.write_str("boolean"),
        }
    }
}

/// Interpolation model used by the classical primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InpaintMethod {
    /// Fast-marching style: distance-ordered weighted averaging.
    Telea,
    /// Fluid-dynamics style: propagation followed by smoothness diffusion.
    NavierStokes,
}

impl fmt::Display for InpaintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telea => f.write_str("telea"),
            Self::NavierStokes => f.write_str("navier-stokes"),
        }
    }
}

impl FromStr for InpaintMethod {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telea" | "fmm" => Ok(Self::Telea),
            "navier-stokes" | "ns" => Ok(Self::NavierStokes),
            other => Err(BenchError::UnknownInpaintMethod(other.to_owned())),
        }
    }
}

/// Requested sparsity of one mask.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparsityConfig {
    /// Percentage of pixels to mark for reconstruction.
    pub percent_removed: f64,
    pub mask_kind: MaskKind,
    pub encoding: MaskEncoding,
}

impl SparsityConfig {
    pub fn new(percent_removed: f64, mask_kind: MaskKind, encoding: MaskEncoding) -> Self {
        Self {
            percent_removed,
            mask_kind,
            encoding,
        }
    }
}

/// Identity of the reference image a run was scored against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceIdentity {
    /// File stem (or caller-supplied label).
    pub name: String,
    /// SHA-256 hex digest of the decoded samples.
    pub digest: String,
}

impl fmt::Display for SourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.digest.get(..12).unwrap_or(&self.digest);
        write!(f, "{}@{}", self.name, short)
    }
}

/// One point of the configuration cross-product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Position in enumeration order.
    pub index: usize,
    pub percent: f64,
    pub algorithm: AlgorithmKind,
    pub mask_kind: MaskKind,
}

impl TaskSpec {
    /// Sparsity request this task hands to its mask generator.
    pub fn sparsity(&self) -> SparsityConfig {
        SparsityConfig::new(self.percent, self.mask_kind, self.algorithm.mask_encoding())
    }
}

impl fmt::Display for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}% {} {}",
            self.index, self.percent, self.algorithm, self.mask_kind
        )
    }
}

/// What a single task produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TaskOutcome {
    Scored {
        mse: f64,
        /// Fraction of pixels actually flagged by the mask, in percent.
        realized_removed_percent: f64,
    },
    /// Sentinel recorded when the task failed in isolation.
    Failed { reason: String },
}

impl TaskOutcome {
    pub fn mse(&self) -> Option<f64> {
        match self {
            Self::Scored { mse, .. } => Some(*mse),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("Spiral".parse::<MaskKind>().unwrap(), MaskKind::Spiral);
        assert_eq!(" random ".parse::<MaskKind>().unwrap(), MaskKind::Random);
        assert_eq!(
            "algorithm".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::Classical
        );
        assert_eq!("ns".parse::<InpaintMethod>().unwrap(), InpaintMethod::NavierStokes);
    }

    #[test]
    fn unknown_kind_is_a_configuration_error() {
        let err = "zigzag".parse::<MaskKind>().unwrap_err();
        assert!(err.is_configuration());
        assert!("dictionary".parse::<AlgorithmKind>().unwrap_err().is_configuration());
    }

    #[test]
    fn each_algorithm_has_one_encoding() {
        assert_eq!(AlgorithmKind::Classical.mask_encoding(), MaskEncoding::Numeric);
        assert_eq!(AlgorithmKind::Biharmonic.mask_encoding(), MaskEncoding::Boolean);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let scored = TaskOutcome::Scored {
            mse: 1.5,
            realized_removed_percent: 50.0,
        };
        let json = serde_json::to_string(&scored).unwrap();
        assert!(json.contains("\"status\":\"scored\""));

        let failed = TaskOutcome::Failed {
            reason: "boom".into(),
        };
        assert!(failed.is_failed());
        assert_eq!(failed.mse(), None);
    }

    #[test]
    fn source_identity_display_shortens_digest() {
        let id = SourceIdentity {
            name: "liposome".into(),
            digest: "0123456789abcdef0123".into(),
        };
        assert_eq!(id.to_string(), "liposome@0123456789ab");
    }
}
