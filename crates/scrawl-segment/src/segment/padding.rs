// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Padding of digit segments onto a near-square canvas for the classifier.

use image::GrayImage;
use image::imageops::replace;

/// Centre `segment` on a zero canvas.
///
/// Every side gets a fixed margin of `fraction` times the longest side; the
/// shorter axis gets extra margin so both axes end up about the same length.
pub fn pad_to_square(segment: &GrayImage, fraction: f32) -> GrayImage {
    let (width, height) = segment.dimensions();
    let longest = width.max(height);
    let shortest = width.min(height);

    let fixed = (longest as f32 * fraction.max(0.0)) as u32;
    let target = longest + 2 * fixed;
    let dynamic = (target - shortest) / 2;

    let (pad_x, pad_y) = if height <= width {
        (fixed, dynamic)
    } else {
        (dynamic, fixed)
    };

    let mut canvas = GrayImage::new(width + 2 * pad_x, height + 2 * pad_y);
    replace(&mut canvas, segment, i64::from(pad_x), i64::from(pad_y));
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn wide_segment_is_padded_to_square() {
        let segment = GrayImage::from_pixel(10, 4, Luma([255]));
        let padded = pad_to_square(&segment, 0.2);
        assert_eq!(padded.dimensions(), (14, 14));
        assert_eq!(padded.get_pixel(2, 5).0[0], 255);
        assert_eq!(padded.get_pixel(1, 5).0[0], 0);
        assert_eq!(padded.get_pixel(2, 4).0[0], 0);
    }

    #[test]
    fn tall_segment_is_padded_to_square() {
        let segment = GrayImage::from_pixel(8, 20, Luma([255]));
        let padded = pad_to_square(&segment, 0.2);
        // fixed = 4, target = 28, sideways margin = 10
        assert_eq!(padded.dimensions(), (28, 28));
        assert_eq!(padded.get_pixel(10, 4).0[0], 255);
        assert_eq!(padded.get_pixel(9, 4).0[0], 0);
    }

    #[test]
    fn zero_fraction_only_squares_up() {
        let segment = GrayImage::from_pixel(6, 3, Luma([255]));
        assert_eq!(pad_to_square(&segment, 0.0).dimensions(), (6, 5));
    }

    #[test]
    fn pixel_count_is_preserved() {
        let segment = GrayImage::from_fn(9, 13, |x, y| Luma([if (x + y) % 3 == 0 { 255 } else { 0 }]));
        let ink = |img: &GrayImage| img.pixels().filter(|p| p.0[0] > 0).count();
        assert_eq!(ink(&pad_to_square(&segment, 0.3)), ink(&segment));
    }
}
