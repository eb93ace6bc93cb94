// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scrawl.

use thiserror::Error;

/// Top-level error type for all Scrawl operations.
#[derive(Debug, Error)]
pub enum ScrawlError {
    // -- Input errors --
    /// The field image has no usable intensity range, i.e. nothing was written.
    /// Readers recover from this locally and report an empty value.
    #[error("field image is blank (intensity range {range} <= threshold {threshold})")]
    BlankInput { range: u8, threshold: u8 },

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Classifier errors --
    #[error("digit classifier failed: {0}")]
    Model(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScrawlError {
    /// Whether this error means "no handwriting present" rather than a failure.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::BlankInput { .. })
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScrawlError>;
