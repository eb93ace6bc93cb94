// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scrawl field reader.

use serde::{Deserialize, Serialize};

/// One recognised symbol in a handwritten field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// A digit 0–9 as returned by the classifier.
    Digit(u8),
    /// A decimal point found by segment shape.
    Decimal,
    /// A minus sign found by segment shape.
    Minus,
    /// A letter inserted during correction (rider numbers start with `L`).
    Letter(char),
}

impl Symbol {
    /// The digit value, if this is a digit.
    pub fn digit(&self) -> Option<u8> {
        match self {
            Self::Digit(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Minus => f.write_str("-"),
            Self::Letter(c) => write!(f, "{c}"),
        }
    }
}

/// A symbol together with the confidence (percent, 0–100) it was read with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub symbol: Symbol,
    pub confidence: f64,
}

impl Glyph {
    pub fn new(symbol: Symbol, confidence: f64) -> Self {
        Self { symbol, confidence }
    }

    pub fn digit(value: u8, confidence: f64) -> Self {
        Self::new(Symbol::Digit(value), confidence)
    }

    pub fn decimal(confidence: f64) -> Self {
        Self::new(Symbol::Decimal, confidence)
    }

    pub fn minus(confidence: f64) -> Self {
        Self::new(Symbol::Minus, confidence)
    }
}

/// Build a glyph sequence from parallel symbol/confidence slices.
///
/// Extra entries in the longer slice are ignored.
pub fn glyphs_from(symbols: &[Symbol], confidences: &[f64]) -> Vec<Glyph> {
    symbols
        .iter()
        .zip(confidences)
        .map(|(symbol, confidence)| Glyph::new(*symbol, *confidence))
        .collect()
}

/// Render a glyph sequence as text (`[1, '.', 5]` → `"1.5"`).
pub fn render(glyphs: &[Glyph]) -> String {
    glyphs.iter().map(|g| g.symbol.to_string()).collect()
}

/// The corrected reading of one semantic field.
///
/// `confidence` is the minimum glyph confidence minus all correction
/// penalties and may be negative after heavy correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub text: String,
    pub confidence: f64,
}

impl FieldValue {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }

    /// The value reported for an unreadable or blank field.
    pub fn empty() -> Self {
        Self::new(String::new(), 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Confidence floored at zero for display.
    pub fn reported_confidence(&self) -> f64 {
        self.confidence.max(0.0)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.1}%)", self.text, self.reported_confidence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mixed_sequence() {
        let glyphs = vec![
            Glyph::digit(1, 90.0),
            Glyph::decimal(80.0),
            Glyph::digit(5, 99.0),
        ];
        assert_eq!(render(&glyphs), "1.5");
    }

    #[test]
    fn letter_renders_as_itself() {
        assert_eq!(Symbol::Letter('L').to_string(), "L");
        assert_eq!(Symbol::Minus.to_string(), "-");
    }

    #[test]
    fn glyphs_from_zips_slices() {
        let glyphs = glyphs_from(&[Symbol::Digit(4), Symbol::Digit(2)], &[91.0, 88.0]);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[1], Glyph::digit(2, 88.0));
    }

    #[test]
    fn reported_confidence_is_floored() {
        let value = FieldValue::new("L2", -7.5);
        assert_eq!(value.reported_confidence(), 0.0);
        assert_eq!(value.confidence, -7.5);
    }

    #[test]
    fn empty_value() {
        let value = FieldValue::empty();
        assert!(value.is_empty());
        assert_eq!(value.confidence, 0.0);
    }
}
