// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inclusive bounding boxes over a pixel grid.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// An inclusive bounding box `(top, right, bottom, left)` in grid coordinates.
///
/// Edges are signed so intermediate arithmetic can step outside the grid;
/// [`Boundary::clamp_to`] must run before the box is used to slice pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Boundary {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Boundary {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// A one-pixel box around `(x, y)`.
    pub fn at(x: u32, y: u32) -> Self {
        let (x, y) = (x as i32, y as i32);
        Self::new(y, x, y, x)
    }

    /// Rows covered (0 for an inverted box).
    pub fn height(&self) -> u32 {
        (self.bottom - self.top + 1).max(0) as u32
    }

    /// Columns covered (0 for an inverted box).
    pub fn width(&self) -> u32 {
        (self.right - self.left + 1).max(0) as u32
    }

    /// Swap inverted edges so that `top <= bottom` and `left <= right`.
    pub fn normalize(&mut self) {
        if self.top > self.bottom {
            std::mem::swap(&mut self.top, &mut self.bottom);
        }
        if self.left > self.right {
            std::mem::swap(&mut self.left, &mut self.right);
        }
    }

    /// Pull every edge inside a `width x height` grid.
    pub fn clamp_to(&mut self, width: u32, height: u32) {
        self.normalize();
        let max_x = width.saturating_sub(1) as i32;
        let max_y = height.saturating_sub(1) as i32;
        self.top = self.top.clamp(0, max_y);
        self.bottom = self.bottom.clamp(0, max_y);
        self.left = self.left.clamp(0, max_x);
        self.right = self.right.clamp(0, max_x);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// Grow the box so it covers `(x, y)`.
    pub fn include(&mut self, x: i32, y: i32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    /// Copy the pixels inside the box (clamped to the grid) into a new image.
    pub fn crop(&self, grid: &GrayImage) -> GrayImage {
        let (width, height) = grid.dimensions();
        if width == 0 || height == 0 {
            return GrayImage::new(0, 0);
        }
        let mut clamped = *self;
        clamped.clamp_to(width, height);
        image::imageops::crop_imm(
            grid,
            clamped.left as u32,
            clamped.top as u32,
            clamped.width(),
            clamped.height(),
        )
        .to_image()
    }
}
