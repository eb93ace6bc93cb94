// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Splitting of touching digits.

use image::imageops::crop_imm;
use tracing::debug;

use super::{Segment, SegmentKind};
use crate::geometry::Boundary;

/// Split the widest digit segment that is at least as wide as it is tall
/// into left and right halves, in place.
///
/// Returns `false` when no digit segment qualifies. Ties go to the leftmost.
pub fn try_split_widest(segments: &mut Vec<Segment>) -> bool {
    let candidate = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == SegmentKind::Digit && s.width() >= s.height() && s.width() >= 2)
        .fold(None, |best: Option<(usize, u32)>, (i, s)| match best {
            Some((_, w)) if w >= s.width() => best,
            _ => Some((i, s.width())),
        });
    let Some((index, width)) = candidate else {
        return false;
    };

    let whole = segments.remove(index);
    let height = whole.height();
    let left_width = width / 2;
    let right_width = width - left_width;
    let b = whole.bounds;

    let left = Segment {
        image: crop_imm(&whole.image, 0, 0, left_width, height).to_image(),
        bounds: Boundary::new(b.top, b.left + left_width as i32 - 1, b.bottom, b.left),
        kind: SegmentKind::Digit,
    };
    let right = Segment {
        image: crop_imm(&whole.image, left_width, 0, right_width, height).to_image(),
        bounds: Boundary::new(b.top, b.right, b.bottom, b.left + left_width as i32),
        kind: SegmentKind::Digit,
    };

    debug!(index, width, "split touching digits");
    segments.insert(index, right);
    segments.insert(index, left);
    true
}
