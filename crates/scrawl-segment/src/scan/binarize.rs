// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field image preprocessing: grayscale, blank check, blur, inverted Otsu
// threshold and dilation into a binary ink grid.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::dilate;
use scrawl_core::FieldConfig;
use scrawl_core::error::{Result, ScrawlError};
use tracing::{debug, instrument};

/// Value written for ink pixels in the binary grid.
pub const FOREGROUND: u8 = 255;

/// Converts a photographed field into a binary grid where ink is
/// [`FOREGROUND`] and paper is 0.
#[derive(Debug, Clone)]
pub struct Binarizer {
    /// Images whose darkest and lightest pixels differ by no more than this
    /// are reported as blank.
    pub blank_threshold: u8,
    /// Gaussian blur sigma applied before thresholding. `None` disables it.
    pub blur_sigma: Option<f32>,
    /// Chebyshev radius of the dilation applied after thresholding.
    pub dilation_radius: u8,
}

impl Default for Binarizer {
    fn default() -> Self {
        Self {
            blank_threshold: 120,
            blur_sigma: Some(1.0),
            dilation_radius: 1,
        }
    }
}

impl Binarizer {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            blank_threshold: config.blank_threshold,
            ..Default::default()
        }
    }

    /// Binarize any decoded image.
    pub fn binarize(&self, image: &DynamicImage) -> Result<GrayImage> {
        self.binarize_gray(&image.to_luma8())
    }

    /// Binarize a grayscale image.
    ///
    /// Fails with [`ScrawlError::BlankInput`] when the intensity range is at or
    /// below the blank threshold.
    #[instrument(skip_all, fields(width = gray.width(), height = gray.height()))]
    pub fn binarize_gray(&self, gray: &GrayImage) -> Result<GrayImage> {
        let range = intensity_range(gray);
        if range <= self.blank_threshold {
            debug!(range, threshold = self.blank_threshold, "field looks blank");
            return Err(ScrawlError::BlankInput {
                range,
                threshold: self.blank_threshold,
            });
        }

        let blurred = match self.blur_sigma {
            Some(sigma) if sigma > 0.0 => gaussian_blur_f32(gray, sigma),
            _ => gray.clone(),
        };

        let level = otsu_level(&blurred);
        let mut binary = blurred;
        for pixel in binary.pixels_mut() {
            *pixel = if pixel.0[0] <= level {
                Luma([FOREGROUND])
            } else {
                Luma([0])
            };
        }

        if self.dilation_radius > 0 {
            binary = dilate(&binary, Norm::LInf, self.dilation_radius);
        }

        debug!(level, range, "field binarized");
        Ok(binary)
    }
}

/// Difference between the lightest and darkest pixel (0 for an empty image).
pub fn intensity_range(gray: &GrayImage) -> u8 {
    let mut pixels = gray.pixels().map(|p| p.0[0]);
    let Some(first) = pixels.next() else {
        return 0;
    };
    let (lo, hi) = pixels.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    hi - lo
}

/// Whether a binary grid pixel is ink.
#[inline]
pub fn is_ink(grid: &GrayImage, x: u32, y: u32) -> bool {
    grid.get_pixel(x, y).0[0] > 0
}
