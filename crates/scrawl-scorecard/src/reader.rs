// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-card reading: segment each field image, correct it by kind, collect
// the results into a report.

use std::collections::HashMap;

use image::DynamicImage;
use rand::Rng;
use rand::rngs::ThreadRng;
use scrawl_classify::{DigitClassifier, HttpClassifier};
use scrawl_core::error::Result;
use scrawl_core::{FieldValue, render};
use scrawl_segment::GlyphReader;
use scrawl_validate::FieldValidator;
use tracing::{info, instrument, warn};

use crate::config::ScorecardConfig;
use crate::layout::{FieldSpec, ScorecardLayout};
use crate::report::{FieldReading, ScorecardReport};

/// Reads every field of a scorecard with one classifier.
pub struct ScorecardReader<C, R = ThreadRng> {
    classifier: C,
    config: ScorecardConfig,
    validator: FieldValidator<R>,
}

impl ScorecardReader<HttpClassifier> {
    /// Reader backed by the HTTP model named in `config`.
    pub fn from_config(config: ScorecardConfig) -> Result<Self> {
        let classifier = HttpClassifier::new(config.classifier_config());
        Self::new(classifier, config)
    }
}

impl<C: DigitClassifier> ScorecardReader<C> {
    pub fn new(classifier: C, config: ScorecardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier,
            config,
            validator: FieldValidator::new(),
        })
    }
}

impl<C: DigitClassifier, R: Rng> ScorecardReader<C, R> {
    /// Swap the validator, e.g. for one with a seeded generator.
    pub fn with_validator<R2: Rng>(self, validator: FieldValidator<R2>) -> ScorecardReader<C, R2> {
        ScorecardReader {
            classifier: self.classifier,
            config: self.config,
            validator,
        }
    }

    pub fn config(&self) -> &ScorecardConfig {
        &self.config
    }

    /// Read and correct one field.
    #[instrument(skip(self, layout, image), fields(field = %field.name))]
    pub fn read_field(
        &mut self,
        layout: &ScorecardLayout,
        field: &FieldSpec,
        image: &DynamicImage,
    ) -> Result<FieldReading> {
        let reader = GlyphReader::new(&self.classifier, self.config.field_config(layout, field))?;
        let glyphs = reader.read_glyphs(image)?;
        let value = self.validator.validate(&field.kind, &glyphs);
        Ok(FieldReading {
            name: field.name.clone(),
            kind: field.kind,
            value,
            raw: render(&glyphs),
        })
    }

    /// Read every field of `layout` from `images`, keyed by field name.
    ///
    /// Skipped fields are left out of the report. A field with no image is
    /// reported empty. Classifier failures abort the card.
    #[instrument(skip_all, fields(layout = %layout.name))]
    pub fn read_card(
        &mut self,
        layout: &ScorecardLayout,
        images: &HashMap<String, DynamicImage>,
    ) -> Result<ScorecardReport> {
        layout.validate()?;
        let mut fields = Vec::with_capacity(layout.fields.len());
        for field in layout.readable_fields() {
            let reading = match images.get(&field.name) {
                Some(image) => self.read_field(layout, field, image)?,
                None => {
                    warn!(field = %field.name, "no image for field");
                    FieldReading {
                        name: field.name.clone(),
                        kind: field.kind,
                        value: FieldValue::empty(),
                        raw: String::new(),
                    }
                }
            };
            fields.push(reading);
        }

        let report = ScorecardReport::new(layout.name.clone(), fields);
        info!(
            id = %report.id,
            fields = report.fields.len(),
            blank = report.blank_count(),
            "card read"
        );
        Ok(report)
    }

    /// Read a stack of rider cards, dropping cards with at least
    /// `blank_threshold` empty fields.
    pub fn read_rider_cards(
        &mut self,
        layout: &ScorecardLayout,
        cards: &[HashMap<String, DynamicImage>],
        blank_threshold: usize,
    ) -> Result<Vec<ScorecardReport>> {
        let mut reports = Vec::with_capacity(cards.len());
        for (index, images) in cards.iter().enumerate() {
            let report = self.read_card(layout, images)?;
            if report.is_blank(blank_threshold) {
                info!(index, "blank card skipped");
                continue;
            }
            reports.push(report);
        }
        Ok(reports)
    }
}
