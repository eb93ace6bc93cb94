// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Column scan over a binary grid.
//
// The scan walks columns left to right looking for the next ink pixel that
// is not already claimed by a traced glyph. Claimed regions are tracked as
// two stacks of row bands: the upper stack grows downwards from the top edge,
// the lower stack grows upwards from the bottom edge, and each band expires
// once the scan passes its stop column.

use image::GrayImage;
use tracing::trace;

use crate::geometry::Boundary;
use crate::scan::binarize::is_ink;
use crate::trace::LineSide;

/// A claimed row limit that applies until the scan passes `stop_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionBand {
    pub row: u32,
    pub stop_column: u32,
}

/// Mutable progress of one scan over one grid.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    column: u32,
    upper: Vec<ExclusionBand>,
    lower: Vec<ExclusionBand>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The column the next search starts from.
    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn set_column(&mut self, column: u32) {
        self.column = column;
    }

    /// Whether the state has not yet been bound to a grid.
    pub fn is_fresh(&self) -> bool {
        self.upper.is_empty() || self.lower.is_empty()
    }

    fn ensure_initialized(&mut self, width: u32, height: u32) {
        if self.is_fresh() {
            self.column = 0;
            self.upper = vec![ExclusionBand {
                row: 0,
                stop_column: width,
            }];
            self.lower = vec![ExclusionBand {
                row: height,
                stop_column: width,
            }];
        }
    }

    /// Pop bands whose stop column lies left of `column`. The bottom band of
    /// each stack spans the whole grid and is never popped.
    fn drop_stale(&mut self, column: u32) {
        for stack in [&mut self.upper, &mut self.lower] {
            while stack.len() > 1 && stack.last().is_some_and(|b| b.stop_column < column) {
                stack.pop();
            }
        }
    }

    /// Half-open row range `[upper, lower)` currently open to the scan.
    ///
    /// A fresh state allows every row of a grid `height` tall.
    pub fn allowed_rows(&self, height: u32) -> (u32, u32) {
        let upper = self.upper.last().map_or(0, |b| b.row);
        let lower = self.lower.last().map_or(height, |b| b.row);
        (upper, lower.min(height))
    }

    /// Record a traced box so the scan does not find it again.
    ///
    /// Boxes entirely above the middle row claim the rows down to their
    /// bottom edge, boxes entirely below claim the rows up from their top
    /// edge, and boxes straddling the middle move the scan past their right
    /// edge.
    pub fn claim(&mut self, bounds: &Boundary, grid: &GrayImage, column_skip: u32) {
        let (width, height) = grid.dimensions();
        self.ensure_initialized(width, height);
        let half = (height / 2) as i32;
        let right = bounds.right.max(0) as u32;

        if bounds.bottom < half {
            self.upper.push(ExclusionBand {
                row: (bounds.bottom + 1).max(0) as u32,
                stop_column: right,
            });
        } else if bounds.top > half {
            self.lower.push(ExclusionBand {
                row: bounds.top.max(0) as u32,
                stop_column: right,
            });
            self.column = self.column.saturating_add(column_skip + 1);
        } else {
            self.column = right.saturating_add(1);
        }
        trace!(
            column = self.column,
            upper = self.upper.len(),
            lower = self.lower.len(),
            "box claimed"
        );
    }

    /// Record a box collapsed onto a ruled line on `side`.
    ///
    /// The band is always claimed on the line's side, even when a thick line
    /// reaches the middle row, so the glyphs the line touched stay reachable.
    pub fn claim_line(
        &mut self,
        bounds: &Boundary,
        side: LineSide,
        grid: &GrayImage,
        column_skip: u32,
    ) {
        let (width, height) = grid.dimensions();
        self.ensure_initialized(width, height);
        let right = bounds.right.max(0) as u32;

        match side {
            LineSide::Top => self.upper.push(ExclusionBand {
                row: (bounds.bottom + 1).clamp(0, height as i32) as u32,
                stop_column: right,
            }),
            LineSide::Bottom => {
                self.lower.push(ExclusionBand {
                    row: bounds.top.clamp(0, height as i32) as u32,
                    stop_column: right,
                });
                self.column = self.column.saturating_add(column_skip + 1);
            }
        }
        trace!(?side, column = self.column, "ruled line claimed");
    }
}

/// Finds seeds for the contour tracer.
#[derive(Debug, Clone, Copy)]
pub struct ScanCursor {
    column_skip: u32,
}

impl ScanCursor {
    pub fn new(column_skip: u32) -> Self {
        Self { column_skip }
    }

    pub fn column_skip(&self) -> u32 {
        self.column_skip
    }

    /// Return the next unclaimed ink pixel as `(x, y)`, or `None` once the
    /// scan has passed the right edge.
    ///
    /// Rows are searched top to bottom within the open band of each column.
    /// After a miss the scan advances by `column_skip + 1` columns; when the
    /// grid is exhausted the final column is stored back into `state`.
    pub fn next(&self, grid: &GrayImage, state: &mut ScanState) -> Option<(u32, u32)> {
        let (width, height) = grid.dimensions();
        state.ensure_initialized(width, height);

        let step = self.column_skip.saturating_add(1);
        let mut x = state.column;
        while x < width {
            state.drop_stale(x);
            let (upper, lower) = state.allowed_rows(height);
            if let Some(y) = (upper..lower).find(|&y| is_ink(grid, x, y)) {
                state.column = x;
                return Some((x, y));
            }
            x = x.saturating_add(step);
        }
        state.column = x;
        None
    }
}
