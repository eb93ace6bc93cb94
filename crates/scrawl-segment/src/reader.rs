// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph reader: turns one field image into an ordered glyph sequence.
//
// Pipeline:
//   1. binarize (blank fields short-circuit here)
//   2. column scan + boundary trace until the scan leaves the grid
//   3. size classification of every traced box
//   4. splitting of touching digits when the glyph count is known
//   5. digit boxes padded and sent to the classifier; decimal and minus
//      boxes scored by their shape

use image::{DynamicImage, GrayImage};
use scrawl_classify::DigitClassifier;
use scrawl_core::error::Result;
use scrawl_core::{FieldConfig, Glyph};
use tracing::{debug, info, instrument, trace};

use crate::geometry::Boundary;
use crate::scan::{Binarizer, ScanCursor, ScanState};
use crate::segment::{Segment, SegmentClassifier, SegmentKind, pad_to_square, try_split_widest};
use crate::trace::{BoundaryTracer, TraceOutcome};

/// Reads handwritten glyphs from field images with a given classifier.
pub struct GlyphReader<C> {
    classifier: C,
    config: FieldConfig,
    binarizer: Binarizer,
    cursor: ScanCursor,
    tracer: BoundaryTracer,
    sizer: SegmentClassifier,
}

impl<C: DigitClassifier> GlyphReader<C> {
    // -- Construction ---------------------------------------------------------

    /// Build a reader, rejecting invalid configuration.
    pub fn new(classifier: C, config: FieldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            binarizer: Binarizer::from_config(&config),
            cursor: ScanCursor::new(config.column_skip),
            tracer: BoundaryTracer::new(),
            sizer: SegmentClassifier::from_config(&config),
            classifier,
            config,
        })
    }

    /// Replace the binarizer, e.g. to turn off blurring for synthetic input.
    pub fn with_binarizer(mut self, binarizer: Binarizer) -> Self {
        self.binarizer = Binarizer {
            blank_threshold: self.config.blank_threshold,
            ..binarizer
        };
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    // -- Reading --------------------------------------------------------------

    /// Classify a field that holds a single digit, without segmentation.
    ///
    /// Returns `None` for a blank field.
    #[instrument(skip_all, fields(classifier = self.classifier.name()))]
    pub fn read_digit(&self, image: &DynamicImage) -> Result<Option<Glyph>> {
        let Some(binary) = self.binarize_or_blank(image)? else {
            return Ok(None);
        };
        let prediction = self.classifier.classify(&binary)?;
        Ok(Some(Glyph::digit(prediction.digit, prediction.confidence)))
    }

    /// Read every glyph in a field, left to right.
    ///
    /// A blank field yields an empty sequence. Classifier failures propagate.
    #[instrument(skip_all, fields(classifier = self.classifier.name(), width = image.width(), height = image.height()))]
    pub fn read_glyphs(&self, image: &DynamicImage) -> Result<Vec<Glyph>> {
        let Some(binary) = self.binarize_or_blank(image)? else {
            return Ok(Vec::new());
        };
        let segments = self.segment(&binary);
        let glyphs = self.glyphs_from_segments(&segments)?;
        info!(
            segments = segments.len(),
            glyphs = glyphs.len(),
            text = %scrawl_core::render(&glyphs),
            "field read"
        );
        Ok(glyphs)
    }

    /// Trace and classify every region of a binary grid.
    ///
    /// When an expected glyph count is configured and fewer digits were
    /// found, wide digit boxes are split until the count is met or nothing
    /// is left to split.
    pub fn segment(&self, binary: &GrayImage) -> Vec<Segment> {
        let (width, height) = binary.dimensions();
        let mut state = ScanState::new();
        let mut segments = Vec::new();

        while let Some(seed) = self.cursor.next(binary, &mut state) {
            let mut bounds = Boundary::at(seed.0, seed.1);
            let outcome = self.tracer.trace(binary, &mut bounds, seed, &state);
            match outcome {
                TraceOutcome::BaselineClipped(side) => {
                    state.claim_line(&bounds, side, binary, self.config.column_skip)
                }
                TraceOutcome::Clean => state.claim(&bounds, binary, self.config.column_skip),
            }

            bounds.clamp_to(width, height);
            let image = bounds.crop(binary);
            let kind = self.sizer.classify(&image, (width, height));
            trace!(?seed, ?outcome, ?kind, w = image.width(), h = image.height(), "segment traced");
            segments.push(Segment {
                image,
                bounds,
                kind,
            });
        }

        if let Some(expected) = self.config.expected_glyph_count {
            while digit_count(&segments) < expected && try_split_widest(&mut segments) {}
        }
        segments
    }

    fn glyphs_from_segments(&self, segments: &[Segment]) -> Result<Vec<Glyph>> {
        let mut glyphs = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment.kind {
                SegmentKind::Digit => {
                    let padded = pad_to_square(&segment.image, self.config.fraction_padding);
                    let prediction = self.classifier.classify(&padded)?;
                    glyphs.push(Glyph::digit(prediction.digit, prediction.confidence));
                }
                SegmentKind::Decimal if self.config.find_decimal_points => {
                    glyphs.push(Glyph::decimal(segment.squareness()));
                }
                SegmentKind::Minus if self.config.find_minus_signs => {
                    glyphs.push(Glyph::minus(100.0 - segment.squareness()));
                }
                kind => debug!(?kind, bounds = ?segment.bounds, "segment dropped"),
            }
        }
        Ok(glyphs)
    }

    fn binarize_or_blank(&self, image: &DynamicImage) -> Result<Option<GrayImage>> {
        match self.binarizer.binarize(image) {
            Ok(binary) => Ok(Some(binary)),
            Err(err) if err.is_blank() => {
                debug!(%err, "blank field");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

fn digit_count(segments: &[Segment]) -> usize {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Digit)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{field, grid};
    use image::Luma;
    use scrawl_classify::{FnClassifier, Prediction};
    use scrawl_core::error::ScrawlError;
    use scrawl_core::{Symbol, render};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Classifier that answers with the glyph width modulo 10.
    fn by_width() -> FnClassifier<impl Fn(&GrayImage) -> Result<Prediction> + Send + Sync> {
        FnClassifier(|g: &GrayImage| Prediction::checked(i64::from(g.width() % 10), 95.0))
    }

    fn sharp(config: FieldConfig) -> GlyphReader<FnClassifier<impl Fn(&GrayImage) -> Result<Prediction> + Send + Sync>> {
        GlyphReader::new(by_width(), config)
            .expect("valid config")
            .with_binarizer(Binarizer {
                blur_sigma: None,
                dilation_radius: 0,
                ..Default::default()
            })
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FieldConfig::default().with_expected_glyphs(0);
        assert!(matches!(
            GlyphReader::new(by_width(), config),
            Err(ScrawlError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn blank_field_reads_as_nothing() {
        let reader = GlyphReader::new(by_width(), FieldConfig::default()).expect("reader");
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 20, Luma([230])));
        assert!(reader.read_glyphs(&blank).expect("blank").is_empty());
        assert_eq!(reader.read_digit(&blank).expect("blank"), None);
    }

    #[test]
    fn digits_and_decimal_in_scan_order() {
        // Two digit strokes with a dot between them, near the baseline.
        let image = field(60, 30, &[(5, 4, 9, 26), (22, 22, 26, 26), (35, 4, 41, 26)]);
        let reader = sharp(FieldConfig {
            column_skip: 0,
            ..Default::default()
        });

        let glyphs = reader.read_glyphs(&image).expect("read");
        let symbols: Vec<_> = glyphs.iter().map(|g| g.symbol).collect();
        assert_eq!(symbols.len(), 3);
        assert!(symbols[0].is_digit());
        assert_eq!(symbols[1], Symbol::Decimal);
        assert!(symbols[2].is_digit());
        assert_eq!(glyphs[1].confidence, 100.0);
    }

    #[test]
    fn minus_signs_are_opt_in() {
        let image = field(60, 30, &[(4, 12, 19, 15), (30, 4, 34, 26)]);

        let without = sharp(FieldConfig {
            column_skip: 0,
            ..Default::default()
        });
        let glyphs = without.read_glyphs(&image).expect("read");
        assert_eq!(glyphs.len(), 1);

        let with = sharp(FieldConfig {
            column_skip: 0,
            find_minus_signs: true,
            ..Default::default()
        });
        let glyphs = with.read_glyphs(&image).expect("read");
        assert_eq!(glyphs[0].symbol, Symbol::Minus);
        assert_eq!(glyphs[0].confidence, 75.0);
        assert!(glyphs[1].symbol.is_digit());
    }

    #[test]
    fn decimal_points_can_be_ignored() {
        let image = field(60, 30, &[(5, 4, 9, 26), (22, 22, 26, 26)]);
        let reader = sharp(FieldConfig {
            column_skip: 0,
            find_decimal_points: false,
            ..Default::default()
        });
        let glyphs = reader.read_glyphs(&image).expect("read");
        assert_eq!(glyphs.len(), 1);
    }

    #[test]
    fn touching_digits_are_split_when_count_known() {
        // One wide blob standing in for two merged digits.
        let image = field(120, 30, &[(10, 4, 49, 26)]);
        let calls = AtomicUsize::new(0);
        let classifier = FnClassifier(|_: &GrayImage| {
            calls.fetch_add(1, Ordering::SeqCst);
            Prediction::checked(1, 90.0)
        });
        let config = FieldConfig {
            column_skip: 0,
            scribble_threshold: 1.0,
            ..Default::default()
        }
        .with_expected_glyphs(2);
        let reader = GlyphReader::new(&classifier, config)
            .expect("reader")
            .with_binarizer(Binarizer {
                blur_sigma: None,
                dilation_radius: 0,
                ..Default::default()
            });

        let glyphs = reader.read_glyphs(&image).expect("read");
        assert_eq!(render(&glyphs), "11");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn classifier_failure_propagates() {
        let failing = FnClassifier(|_: &GrayImage| -> Result<Prediction> {
            Err(ScrawlError::Model("offline".into()))
        });
        let reader = GlyphReader::new(failing, FieldConfig::default())
            .expect("reader")
            .with_binarizer(Binarizer {
                blur_sigma: None,
                dilation_radius: 0,
                ..Default::default()
            });
        let image = field(60, 30, &[(5, 4, 9, 26)]);
        assert!(matches!(reader.read_glyphs(&image), Err(ScrawlError::Model(_))));
    }

    #[test]
    fn digit_sent_to_classifier_is_padded() {
        // Stroke 5 wide and 23 tall: fixed margin 4, target 31, sideways 13.
        let image = field(60, 30, &[(5, 4, 9, 26)]);
        let reader = sharp(FieldConfig {
            column_skip: 0,
            ..Default::default()
        });
        let glyphs = reader.read_glyphs(&image).expect("read");
        assert_eq!(glyphs, vec![Glyph::digit(1, 95.0)]);
    }

    #[test]
    fn read_digit_uses_whole_field() {
        let image = field(28, 28, &[(10, 4, 14, 24)]);
        let reader = sharp(FieldConfig::default());
        assert_eq!(
            reader.read_digit(&image).expect("read"),
            Some(Glyph::digit(8, 95.0))
        );
    }

    #[test]
    fn segments_cover_ruled_field() {
        let binary = grid(&[
            "0111111110",
            "0000110000",
            "0011110000",
            "0000100000",
            "0000110000",
            "0000110000",
            "0000010000",
            "0000111100",
            "0000110000",
            "0111111110",
        ]);
        let reader = GlyphReader::new(
            by_width(),
            FieldConfig {
                column_skip: 0,
                ..Default::default()
            },
        )
        .expect("reader");

        let bounds: Vec<_> = reader.segment(&binary).iter().map(|s| s.bounds).collect();
        assert_eq!(
            bounds,
            vec![
                Boundary::new(0, 8, 1, 1),
                Boundary::new(8, 8, 9, 1),
                Boundary::new(2, 7, 7, 2),
            ]
        );
    }
}
