// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour tracing: walks the outer boundary of a connected ink region and
// reports its bounding box.

pub mod baseline;
pub mod direction;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use baseline::{BaselineRule, LineSide};
pub use direction::Direction;

use crate::geometry::Boundary;
use crate::scan::binarize::is_ink;
use crate::scan::cursor::ScanState;

/// How a trace ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceOutcome {
    /// The box is the extent of the region containing the seed.
    Clean,
    /// The region ran into a ruled line; the box has been collapsed onto
    /// the line on the given side.
    ///
    /// Unlike a clean trace, the box need not contain the seed. The caller
    /// claims the line's band with [`ScanState::claim_line`] and the seed's
    /// glyph is traced again on its own from the rows left open.
    BaselineClipped(LineSide),
}

/// Raw result of one boundary walk.
#[derive(Debug, Clone)]
pub struct Walk {
    pub bounds: Boundary,
    /// Horizontal moves made on each grid row.
    pub layers: Vec<u32>,
    /// Pixels visited in order, seed first.
    pub path: Vec<(i32, i32)>,
}

/// Traces glyph boundaries from a seed pixel.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryTracer {
    pub baseline: BaselineRule,
}

impl BoundaryTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the boundary of the region containing `seed`, restricted to the
    /// rows `state` leaves open, then apply ruled-line correction.
    ///
    /// `bounds` is overwritten with the resulting box.
    #[instrument(level = "trace", skip_all, fields(x = seed.0, y = seed.1))]
    pub fn trace(
        &self,
        grid: &GrayImage,
        bounds: &mut Boundary,
        seed: (u32, u32),
        state: &ScanState,
    ) -> TraceOutcome {
        let (width, height) = grid.dimensions();
        let rows = state.allowed_rows(height);
        let walk = walk(grid, seed, rows);
        *bounds = walk.bounds;

        match self.baseline.correct(
            &mut bounds.top,
            &mut bounds.bottom,
            &walk.layers,
            width,
            height,
        ) {
            Some(side) => {
                debug!(?side, top = bounds.top, bottom = bounds.bottom, "ruled line clipped");
                TraceOutcome::BaselineClipped(side)
            }
            None => TraceOutcome::Clean,
        }
    }
}

/// Moore-neighbour walk around the region containing `seed`.
///
/// Only rows in `[rows.0, rows.1)` are treated as ink. The walk stops when it
/// returns to the seed, when the seed has no ink neighbour, or after a step
/// cap proportional to the grid area.
pub fn walk(grid: &GrayImage, seed: (u32, u32), rows: (u32, u32)) -> Walk {
    let (width, height) = grid.dimensions();
    let (upper, lower) = (rows.0 as i32, rows.1.min(height) as i32);
    let open = |x: i32, y: i32| {
        x >= 0 && (x as u32) < width && y >= upper && y < lower && is_ink(grid, x as u32, y as u32)
    };

    let start = (seed.0 as i32, seed.1 as i32);
    let mut bounds = Boundary::at(seed.0, seed.1);
    let mut layers = vec![0u32; height as usize];
    let mut path = vec![start];

    let cap = 4 * (width as usize) * (height as usize) + 8;
    let mut here = start;
    let mut search = Direction::North;

    for _ in 0..cap {
        let step = search.probe_order().find_map(|d| {
            let (dx, dy) = d.offset();
            let next = (here.0 + dx, here.1 + dy);
            open(next.0, next.1).then_some((d, next))
        });
        let Some((dir, next)) = step else {
            break;
        };

        bounds.include(next.0, next.1);
        if dir.is_horizontal() {
            layers[next.1 as usize] += 1;
        }
        search = dir.search_start();
        here = next;
        if here == start {
            break;
        }
        path.push(here);
    }

    Walk {
        bounds,
        layers,
        path,
    }
}
