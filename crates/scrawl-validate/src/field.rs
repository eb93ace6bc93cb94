// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Semantic field kinds and their parameters.

use scrawl_core::error::{Result, ScrawlError};
use serde::{Deserialize, Serialize};

/// Allowed whole-number range of a score field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl ScoreRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// A range starting at zero.
    pub fn up_to(max: u32) -> Self {
        Self { min: 0, max }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(ScrawlError::InvalidConfiguration(format!(
                "score range minimum {} exceeds maximum {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What a handwritten field means, which decides how it is corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A numeric score, optionally limited to a range.
    Score { range: Option<ScoreRange> },
    /// A rider number: `L` followed by up to two digits.
    RiderNumber,
    /// A clock time written as `HMM` or `HHMM`.
    Time,
    /// A body weight in whole units, up to three digits.
    Weight,
}

impl FieldKind {
    pub fn score(max: u32) -> Self {
        Self::Score {
            range: Some(ScoreRange::up_to(max)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Score { range: Some(range) } => range.validate(),
            _ => Ok(()),
        }
    }
}
