// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-field reader configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrawlError};

/// Settings that control how one field image is segmented.
///
/// Every setting is independent of the others and has a default, so a
/// partially written JSON object deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Columns skipped per step of the column scan. Higher is faster but may
    /// miss thin strokes.
    pub column_skip: u32,
    /// Fraction of a digit segment's longest side added as padding before it
    /// is sent to the classifier.
    pub fraction_padding: f32,
    /// Emit `'.'` glyphs for decimal-point segments.
    pub find_decimal_points: bool,
    /// Emit `'-'` glyphs for minus-sign segments.
    pub find_minus_signs: bool,
    /// Max difference between the lightest and darkest pixel for the image to
    /// be treated as blank.
    pub blank_threshold: u8,
    /// Foreground fill fraction above which a digit-sized box is treated as a
    /// scribbled-out digit and ignored.
    pub scribble_threshold: f32,
    /// Derive size thresholds from the image width instead of its height.
    pub use_width_as_reference: bool,
    /// Number of glyphs the field is known to contain, if any. Enables
    /// splitting of touching digits.
    pub expected_glyph_count: Option<usize>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            column_skip: 2,
            fraction_padding: 0.2,
            find_decimal_points: true,
            find_minus_signs: false,
            blank_threshold: 120,
            scribble_threshold: 0.65,
            use_width_as_reference: false,
            expected_glyph_count: None,
        }
    }
}

impl FieldConfig {
    /// Reject settings that would make segmentation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.expected_glyph_count == Some(0) {
            return Err(ScrawlError::InvalidConfiguration(
                "expected_glyph_count must be positive".into(),
            ));
        }
        if !self.fraction_padding.is_finite() || self.fraction_padding < 0.0 {
            return Err(ScrawlError::InvalidConfiguration(format!(
                "fraction_padding must be a non-negative number, got {}",
                self.fraction_padding
            )));
        }
        if !(self.scribble_threshold > 0.0 && self.scribble_threshold <= 1.0) {
            return Err(ScrawlError::InvalidConfiguration(format!(
                "scribble_threshold must be in (0, 1], got {}",
                self.scribble_threshold
            )));
        }
        Ok(())
    }

    /// Builder-style helper for the expected glyph count.
    pub fn with_expected_glyphs(mut self, count: usize) -> Self {
        self.expected_glyph_count = Some(count);
        self
    }
}
