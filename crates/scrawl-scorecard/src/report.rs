// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scorecard reports.

use chrono::{DateTime, Utc};
use scrawl_core::FieldValue;
use scrawl_validate::FieldKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cards with at least this many empty fields are treated as unused.
pub const DEFAULT_BLANK_THRESHOLD: usize = 5;

/// Unique identifier for a scorecard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse trust level of a reading, for highlighting values that need a
/// human look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceBand {
    /// 95 and above.
    High,
    /// 85 up to 95.
    Medium,
    Low,
    /// Nothing was read.
    Empty,
}

impl ConfidenceBand {
    pub fn of(value: &FieldValue) -> Self {
        if value.is_empty() {
            Self::Empty
        } else if value.confidence >= 95.0 {
            Self::High
        } else if value.confidence >= 85.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// The corrected value of one field, with the raw OCR text it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReading {
    pub name: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    /// Glyphs as read, before correction.
    pub raw: String,
}

impl FieldReading {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::of(&self.value)
    }
}

/// Every field read from one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardReport {
    pub id: ReportId,
    pub processed_at: DateTime<Utc>,
    /// Name of the layout the card was read with.
    pub layout: String,
    pub fields: Vec<FieldReading>,
}

impl ScorecardReport {
    pub fn new(layout: impl Into<String>, fields: Vec<FieldReading>) -> Self {
        Self {
            id: ReportId::new(),
            processed_at: Utc::now(),
            layout: layout.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldReading> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn blank_count(&self) -> usize {
        self.fields.iter().filter(|f| f.value.is_empty()).count()
    }

    /// Whether at least `threshold` fields are empty.
    pub fn is_blank(&self, threshold: usize) -> bool {
        self.blank_count() >= threshold
    }

    /// Fields whose reading should be checked by a person.
    pub fn needs_review(&self) -> impl Iterator<Item = &FieldReading> {
        self.fields
            .iter()
            .filter(|f| matches!(f.band(), ConfidenceBand::Low | ConfidenceBand::Medium))
    }
}
