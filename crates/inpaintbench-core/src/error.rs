// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for inpaintbench.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for all inpaintbench operations.
#[derive(Debug, Error)]
pub enum BenchError {
    // -- Configuration errors (fatal, never retried) --
    #[error("percent must lie in [0, 100], got {0}")]
    InvalidPercent(f64),

    #[error("spiral masks support 20, 50 or 80 percent removed, got {0}")]
    UnsupportedSpiralPercent(f64),

    #[error("spiral masks require a square image, got {width}x{height}")]
    NonSquareImage { width: u32, height: u32 },

    #[error("unknown mask kind: {0}")]
    UnknownMaskKind(String),

    #[error("unknown inpainting algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown inpainting method: {0}")]
    UnknownInpaintMethod(String),

    #[error("{algorithm} inpainting expects a {expected} mask, got {actual}")]
    MaskEncodingMismatch {
        algorithm: String,
        expected: String,
        actual: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Collaborator errors (fail the owning task only) --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("inpainting failed: {0}")]
    Inpaint(String),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("benchmark task failed to complete: {0}")]
    TaskPanicked(String),

    // -- Persistence errors (logged, run continues) --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How the benchmark harness reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Malformed request. Fails the whole run before (or instead of) producing results.
    Configuration,
    /// An inpainting primitive or image decode failed. Only the owning task fails.
    Collaborator,
    /// A record or artifact could not be written. Logged and skipped.
    Persistence,
}

impl BenchError {
    /// Classify this error for the isolate-and-continue policy.
    pub fn class(&self) -> ErrorClass {
        match self {
            BenchError::InvalidPercent(_)
            | BenchError::UnsupportedSpiralPercent(_)
            | BenchError::NonSquareImage { .. }
            | BenchError::UnknownMaskKind(_)
            | BenchError::UnknownAlgorithm(_)
            | BenchError::UnknownInpaintMethod(_)
            | BenchError::MaskEncodingMismatch { .. }
            | BenchError::InvalidConfig(_) => ErrorClass::Configuration,

            BenchError::ImageError(_)
            | BenchError::Inpaint(_)
            | BenchError::ShapeMismatch(_)
            | BenchError::TaskPanicked(_) => ErrorClass::Collaborator,

            BenchError::Database(_) | BenchError::Io(_) | BenchError::Serialization(_) => {
                ErrorClass::Persistence
            }
        }
    }

    /// Shorthand for `self.class() == ErrorClass::Configuration`.
    pub fn is_configuration(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BenchError>;
