// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segment module: traced boxes, their shape class and the helpers that
// prepare digit segments for the classifier.

pub mod classify;
pub mod padding;
pub mod split;

use image::GrayImage;
use serde::{Deserialize, Serialize};

pub use classify::{SegmentClassifier, SizeThresholds};
pub use padding::pad_to_square;
pub use split::try_split_widest;

use crate::geometry::Boundary;

/// Shape class of a traced segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Noise,
    Minus,
    Decimal,
    Digit,
}

/// One traced region of a field image.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Binary pixels inside `bounds`.
    pub image: GrayImage,
    /// Box in field coordinates.
    pub bounds: Boundary,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// How close the box is to square, as a percentage: 100 for a square,
    /// approaching 0 for a long thin box.
    pub fn squareness(&self) -> f64 {
        squareness(self.width(), self.height())
    }
}

/// `100 * min(w, h) / max(w, h)`, or 0 for an empty box.
pub fn squareness(width: u32, height: u32) -> f64 {
    let (lo, hi) = (width.min(height), width.max(height));
    if hi == 0 {
        return 0.0;
    }
    100.0 * f64::from(lo) / f64::from(hi)
}

/// Fraction of pixels that are ink (0 for an empty image).
pub fn fill_ratio(image: &GrayImage) -> f32 {
    let total = image.width() as usize * image.height() as usize;
    if total == 0 {
        return 0.0;
    }
    let ink = image.pixels().filter(|p| p.0[0] > 0).count();
    ink as f32 / total as f32
}
