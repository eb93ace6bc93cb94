// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Classifier trait seam.

use std::sync::Arc;

use image::GrayImage;
use scrawl_core::error::{Result, ScrawlError};
use serde::{Deserialize, Serialize};

/// The classifier's answer for one padded glyph image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted digit, 0–9.
    pub digit: u8,
    /// Confidence as a percentage, 0–100.
    pub confidence: f64,
}

impl Prediction {
    /// Build a prediction, rejecting labels and confidences outside the
    /// classifier contract.
    pub fn checked(digit: i64, confidence: f64) -> Result<Self> {
        if !(0..=9).contains(&digit) {
            return Err(ScrawlError::Model(format!(
                "classifier returned label {digit}, expected 0-9"
            )));
        }
        if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
            return Err(ScrawlError::Model(format!(
                "classifier returned confidence {confidence}, expected 0-100"
            )));
        }
        Ok(Self {
            digit: digit as u8,
            confidence,
        })
    }
}

/// Anything that can turn a single-channel glyph image into a digit.
///
/// Implementations must be reentrant if the host classifies several fields
/// concurrently; the engine itself issues one request at a time.
pub trait DigitClassifier: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str {
        "classifier"
    }

    /// Classify one padded glyph (foreground > 0 on a zero background).
    ///
    /// Any transport or model failure is reported as [`ScrawlError::Model`].
    fn classify(&self, glyph: &GrayImage) -> Result<Prediction>;
}

impl<T: DigitClassifier + ?Sized> DigitClassifier for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn classify(&self, glyph: &GrayImage) -> Result<Prediction> {
        (**self).classify(glyph)
    }
}

impl<T: DigitClassifier + ?Sized> DigitClassifier for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn classify(&self, glyph: &GrayImage) -> Result<Prediction> {
        (**self).classify(glyph)
    }
}

impl<T: DigitClassifier + ?Sized> DigitClassifier for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn classify(&self, glyph: &GrayImage) -> Result<Prediction> {
        (**self).classify(glyph)
    }
}

/// Adapts a closure into a classifier. Handy for in-process models and tests.
pub struct FnClassifier<F>(pub F);

impl<F> DigitClassifier for FnClassifier<F>
where
    F: Fn(&GrayImage) -> Result<Prediction> + Send + Sync,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn classify(&self, glyph: &GrayImage) -> Result<Prediction> {
        (self.0)(glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_accepts_contract_values() {
        let p = Prediction::checked(7, 93.5).expect("valid prediction");
        assert_eq!(p.digit, 7);
        assert_eq!(p.confidence, 93.5);
    }

    #[test]
    fn checked_rejects_bad_label() {
        assert!(matches!(
            Prediction::checked(10, 50.0),
            Err(ScrawlError::Model(_))
        ));
        assert!(Prediction::checked(-1, 50.0).is_err());
    }

    #[test]
    fn checked_rejects_bad_confidence() {
        assert!(Prediction::checked(3, 100.5).is_err());
        assert!(Prediction::checked(3, f64::NAN).is_err());
    }

    #[test]
    fn closures_and_boxes_classify() {
        let fixed = FnClassifier(|_: &GrayImage| Prediction::checked(4, 88.0));
        let boxed: Box<dyn DigitClassifier> = Box::new(fixed);
        let glyph = GrayImage::new(3, 3);

        let p = boxed.classify(&glyph).expect("closure classifier");
        assert_eq!(p.digit, 4);
        assert_eq!(boxed.name(), "closure");

        let shared = Arc::new(FnClassifier(|g: &GrayImage| {
            Prediction::checked(i64::from(g.width()), 70.0)
        }));
        assert_eq!(shared.classify(&glyph).expect("arc classifier").digit, 3);
    }
}
