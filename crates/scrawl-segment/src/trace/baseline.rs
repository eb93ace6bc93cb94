// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ruled-line detection on a traced box.
//
// A digit written across the printed field border merges with it, and the
// trace then runs the full width of the line. Such a walk makes many
// horizontal moves on the rows of the line. When the busiest row in either
// half of the field exceeds the threshold, the box is collapsed onto the line
// so the caller can claim its band and re-trace the digit on its own.

use serde::{Deserialize, Serialize};

/// Which edge of the field a ruled line was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineSide {
    Top,
    Bottom,
}

/// Tunables for ruled-line detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineRule {
    /// A row is part of a line when its horizontal move count exceeds
    /// `grid_width / line_width_divisor`.
    pub line_width_divisor: f32,
    /// Rows searched on either side of the busiest row for the line's
    /// second edge.
    pub search_window: i32,
}

impl Default for BaselineRule {
    fn default() -> Self {
        Self {
            line_width_divisor: 2.5,
            search_window: 5,
        }
    }
}

/// First row with the highest count in `lo..=hi`, or `None` for an empty range.
fn busiest_row(layers: &[u32], lo: i32, hi: i32) -> Option<i32> {
    if lo > hi || lo < 0 {
        return None;
    }
    let hi = hi.min(layers.len() as i32 - 1);
    (lo..=hi).fold(None, |best: Option<i32>, row| match best {
        Some(b) if layers[row as usize] <= layers[b as usize] => Some(b),
        _ => Some(row),
    })
}

fn count(layers: &[u32], row: Option<i32>) -> u32 {
    row.and_then(|r| layers.get(r as usize)).copied().unwrap_or(0)
}

impl BaselineRule {
    /// Collapse `(top, bottom)` onto a ruled line if the row histogram shows
    /// one. Returns the side the line was found on.
    ///
    /// Only boxes reaching into both halves of the field are considered; the
    /// top half is checked before the bottom half.
    pub fn correct(
        &self,
        top: &mut i32,
        bottom: &mut i32,
        layers: &[u32],
        grid_width: u32,
        grid_height: u32,
    ) -> Option<LineSide> {
        let half = (grid_height / 2) as i32;
        if !(*top < half && *bottom >= half) {
            return None;
        }
        let threshold = grid_width as f32 / self.line_width_divisor;
        let window = self.search_window;
        let exceeds = |row: Option<i32>| count(layers, row) as f32 > threshold;
        let qualifies = |row: Option<i32>| row.is_some() && count(layers, row) as f32 >= threshold;

        let top_peak = busiest_row(layers, *top, (half - 1).min(*bottom));
        if exceeds(top_peak) {
            let c = top_peak.unwrap_or(*top);
            *bottom = if c == *top {
                match busiest_row(layers, c + 1, (c + window).min(*bottom)) {
                    Some(edge) if qualifies(Some(edge)) => edge,
                    _ => *top + 1,
                }
            } else {
                let below = busiest_row(layers, c + 1, (c + window).min(*bottom));
                let above = busiest_row(layers, (c - window).max(*top), c - 1);
                match below {
                    Some(edge) if count(layers, below) > count(layers, above) => edge,
                    _ => c,
                }
            };
            return Some(LineSide::Top);
        }

        let bottom_peak = busiest_row(layers, half.max(*top), *bottom);
        if exceeds(bottom_peak) {
            let c = bottom_peak.unwrap_or(*bottom);
            *top = if c == *bottom {
                match busiest_row(layers, (c - window).max(*top), c - 1) {
                    Some(edge) if qualifies(Some(edge)) => edge,
                    _ => *bottom - 1,
                }
            } else {
                let above = busiest_row(layers, (c - window).max(*top), c - 1);
                let below = busiest_row(layers, c + 1, *bottom);
                match above {
                    Some(edge) if count(layers, above) > count(layers, below) => edge,
                    _ => c,
                }
            };
            return Some(LineSide::Bottom);
        }

        None
    }
}
