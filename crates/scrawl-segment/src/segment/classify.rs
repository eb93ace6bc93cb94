// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size-based segment classification.

use image::GrayImage;
use scrawl_core::FieldConfig;

use super::{SegmentKind, fill_ratio};

/// Size limits derived from the field image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeThresholds {
    /// Segments at least this tall are digits.
    pub digit_min_height: f32,
    /// Segments smaller than this in both directions are noise.
    pub noise_max_size: f32,
}

/// Classifies traced segments by their size relative to the field.
#[derive(Debug, Clone, Copy)]
pub struct SegmentClassifier {
    pub use_width_as_reference: bool,
    pub scribble_threshold: f32,
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

impl SegmentClassifier {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            use_width_as_reference: config.use_width_as_reference,
            scribble_threshold: config.scribble_threshold,
        }
    }

    /// Thresholds for a field of `(width, height)`.
    ///
    /// By default a digit spans a third of the field height and noise is
    /// under a seventh of it. Wide fields holding many digits use the width
    /// instead: a digit is a 5.5th of it and noise a 21st.
    pub fn thresholds(&self, field: (u32, u32)) -> SizeThresholds {
        let (width, height) = (field.0 as f32, field.1 as f32);
        if self.use_width_as_reference {
            SizeThresholds {
                digit_min_height: width / 5.5,
                noise_max_size: width / 21.0,
            }
        } else {
            SizeThresholds {
                digit_min_height: height / 3.0,
                noise_max_size: height / 7.0,
            }
        }
    }

    /// Classify a segment image cut from a field of `(width, height)`.
    ///
    /// A digit-tall box that is not much taller than wide and is mostly ink
    /// is a scribbled-out digit and counts as noise.
    pub fn classify(&self, segment: &GrayImage, field: (u32, u32)) -> SegmentKind {
        let (w, h) = segment.dimensions();
        if w == 0 || h == 0 {
            return SegmentKind::Noise;
        }
        let limits = self.thresholds(field);

        if h as f32 >= limits.digit_min_height {
            if h < w.saturating_mul(3) && fill_ratio(segment) > self.scribble_threshold {
                return SegmentKind::Noise;
            }
            return SegmentKind::Digit;
        }
        if (h as f32) < limits.noise_max_size && (w as f32) < limits.noise_max_size {
            return SegmentKind::Noise;
        }
        if w >= h.saturating_mul(2) {
            SegmentKind::Minus
        } else {
            SegmentKind::Decimal
        }
    }
}
