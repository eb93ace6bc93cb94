// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field validator: applies the correction policy for a field kind to a raw
// glyph sequence and reports the corrected value.

use rand::Rng;
use rand::rngs::ThreadRng;
use scrawl_core::{FieldValue, Glyph, Symbol, render};
use tracing::{debug, instrument};

use crate::correction::Correction;
use crate::field::{FieldKind, ScoreRange};
use crate::penalty::Penalty;
use crate::score::correct_score;

/// Confidence given to the `L` prefix of a rider number.
pub const PREFIX_CONFIDENCE: f64 = 90.0;

/// Corrects raw glyph sequences field by field.
///
/// Digit substitution picks among equally plausible replacements at random;
/// pass a seeded generator through [`FieldValidator::with_rng`] for
/// reproducible output.
pub struct FieldValidator<R = ThreadRng> {
    rng: R,
}

impl FieldValidator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for FieldValidator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> FieldValidator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Correct `glyphs` according to `kind`.
    #[instrument(skip(self, glyphs), fields(raw = %render(glyphs)))]
    pub fn validate(&mut self, kind: &FieldKind, glyphs: &[Glyph]) -> FieldValue {
        let value = match kind {
            FieldKind::Score { range } => self.validate_score(glyphs, *range),
            FieldKind::RiderNumber => self.validate_rider_number(glyphs),
            FieldKind::Time => self.validate_time(glyphs),
            FieldKind::Weight => self.validate_weight(glyphs),
        };
        debug!(text = %value.text, confidence = value.confidence, "field corrected");
        value
    }

    /// Scores: at most one decimal point, whole part within the range.
    pub fn validate_score(&mut self, glyphs: &[Glyph], range: Option<ScoreRange>) -> FieldValue {
        let mut c = Correction::new(glyphs);
        correct_score(&mut c, range, &mut self.rng);
        c.finish()
    }

    /// Rider numbers: `L` followed by at most two digits.
    pub fn validate_rider_number(&mut self, glyphs: &[Glyph]) -> FieldValue {
        let mut c = Correction::new(glyphs);
        c.remove_decimals();
        if c.is_empty() {
            return c.finish();
        }

        let prefix = Glyph::new(Symbol::Letter('L'), PREFIX_CONFIDENCE);
        let n = c.len();
        if n >= 3 || (n == 2 && c.glyphs[0].confidence < PREFIX_CONFIDENCE) {
            // The first mark is most likely a badly read L.
            c.glyphs[0] = prefix;
            c.charge(Penalty::Default, "rider prefix substituted");
        } else {
            c.glyphs.insert(0, prefix);
            c.charge(Penalty::Small, "rider prefix inserted");
        }
        c.prune(3, 1);
        c.finish()
    }

    /// Times: up to four digits, minutes tens digit 0–5, hours tens 0–2.
    pub fn validate_time(&mut self, glyphs: &[Glyph]) -> FieldValue {
        let mut c = Correction::new(glyphs);
        c.remove_decimals();
        c.trim_front(4);
        let n = c.len();
        if n >= 2 {
            c.force(n - 2, 0, 5, &mut self.rng);
            if n == 4 {
                c.force(0, 0, 2, &mut self.rng);
            }
        }
        c.finish()
    }

    /// Weights: up to three digits, no leading zeros, hundreds digit 1–3.
    pub fn validate_weight(&mut self, glyphs: &[Glyph]) -> FieldValue {
        let mut c = Correction::new(glyphs);
        c.remove_decimals();
        c.trim_front(3);
        while c.len() > 1 && c.digit_at(0) == Some(0) {
            c.remove(0, Penalty::Small, "leading zero dropped");
        }
        if c.len() == 3 {
            c.force(0, 1, 3, &mut self.rng);
        }
        c.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use scrawl_core::glyphs_from;

    fn validator() -> FieldValidator<StdRng> {
        FieldValidator::with_rng(StdRng::seed_from_u64(42))
    }

    fn digits(values: &[u8], confidences: &[f64]) -> Vec<Glyph> {
        values
            .iter()
            .zip(confidences)
            .map(|(&d, &c)| Glyph::digit(d, c))
            .collect()
    }

    /// Parse `"2.5"`-style readings, every glyph at `confidence`.
    fn reading(text: &str, confidence: f64) -> Vec<Glyph> {
        let symbols: Vec<Symbol> = text
            .chars()
            .map(|ch| match ch {
                '.' => Symbol::Decimal,
                d => Symbol::Digit(d.to_digit(10).map_or(0, |v| v as u8)),
            })
            .collect();
        glyphs_from(&symbols, &vec![confidence; symbols.len()])
    }

    fn score(glyphs: &[Glyph], max: u32, min: u32) -> FieldValue {
        validator().validate_score(glyphs, Some(ScoreRange { min, max }))
    }

    // -- Reference readings ---------------------------------------------------

    #[test]
    fn reference_readings() {
        assert_eq!(
            score(&digits(&[3], &[90.0]), 5, 0),
            FieldValue::new("3", 90.0)
        );
        assert_eq!(
            score(&digits(&[1, 0], &[100.0, 100.0]), 25, 0),
            FieldValue::new("10", 100.0)
        );

        let rider = validator().validate_rider_number(&digits(&[7, 2, 3], &[50.0, 99.0, 99.0]));
        assert_eq!(rider.text, "L23");
        assert!(rider.confidence < 90.0);

        assert_eq!(
            validator().validate_time(&digits(&[1, 2, 3], &[92.0, 98.0, 95.0])),
            FieldValue::new("123", 92.0)
        );
        assert_eq!(
            validator().validate_weight(&digits(&[2, 0, 0], &[95.0, 92.0, 98.0])),
            FieldValue::new("200", 92.0)
        );
    }

    #[test]
    fn empty_input_is_empty_for_every_kind() {
        let kinds = [
            FieldKind::score(25),
            FieldKind::Score { range: None },
            FieldKind::RiderNumber,
            FieldKind::Time,
            FieldKind::Weight,
        ];
        let mut v = validator();
        for kind in &kinds {
            assert_eq!(v.validate(kind, &[]), FieldValue::empty(), "{kind:?}");
        }
    }

    // -- Scores ---------------------------------------------------------------

    #[test]
    fn whole_scores_within_range_are_unchanged() {
        let cases: &[(&[u8], &[f64], &[u32], &str, f64)] = &[
            (&[3], &[90.0], &[3, 5, 10, 25], "3", 90.0),
            (&[5], &[87.6], &[5, 10, 25], "5", 87.6),
            (&[9], &[92.5], &[10, 25], "9", 92.5),
            (&[1, 0], &[100.0, 100.0], &[10, 25], "10", 100.0),
            (&[1, 1], &[95.0, 100.0], &[25], "11", 95.0),
            (&[1, 9], &[95.0, 94.0], &[25], "19", 94.0),
            (&[2, 0], &[80.0, 94.0], &[25], "20", 80.0),
            (&[2, 1], &[91.0, 99.0], &[25], "21", 91.0),
            (&[2, 5], &[91.7, 92.0], &[25], "25", 91.7),
        ];
        for &(values, confidences, maxima, text, confidence) in cases {
            for &max in maxima {
                for min in [0, 1] {
                    let value = score(&digits(values, confidences), max, min);
                    assert_eq!(value, FieldValue::new(text, confidence), "{values:?} max {max} min {min}");
                }
            }
        }
        assert_eq!(score(&digits(&[0], &[99.0]), 3, 0), FieldValue::new("0", 99.0));
    }

    #[test]
    fn fractional_scores_within_range_are_unchanged() {
        let cases: &[(&str, &[f64], &[u32], f64)] = &[
            (".5", &[90.0, 98.0], &[3, 5, 10, 25], 90.0),
            (".46", &[90.0, 98.0, 71.9], &[3, 5, 10, 25], 71.9),
            ("0.5", &[97.0, 90.0, 98.0], &[3, 5, 10, 25], 90.0),
            ("1.5", &[96.0, 92.0, 98.0], &[3, 5, 10, 25], 92.0),
            ("2.4", &[87.0, 91.0, 99.0], &[3, 5, 10, 25], 87.0),
            (".25", &[64.0, 92.0, 94.0], &[3, 5, 10, 25], 64.0),
            ("9.5", &[91.0, 99.0, 93.0], &[10, 25], 91.0),
        ];
        for &(text, confidences, maxima, confidence) in cases {
            let symbols: Vec<Symbol> = reading(text, 0.0).iter().map(|g| g.symbol).collect();
            let glyphs = glyphs_from(&symbols, confidences);
            for &max in maxima {
                assert_eq!(
                    score(&glyphs, max, 0),
                    FieldValue::new(text, confidence),
                    "{text} max {max}"
                );
            }
        }
    }

    #[test]
    fn at_most_one_decimal_point_survives() {
        let cases = [
            ("0..", 0),
            ("21.", 0),
            (".0..", 1),
            (".55.", 1),
            ("5..5", 1),
            ("5.6.5", 1),
            ("5...5", 1),
            (".5..5", 1),
            ("..5.5", 1),
            ("11..5", 1),
            ("11.5.", 1),
        ];
        for (text, points) in cases {
            let value = score(&reading(text, 9.0), 99, 0);
            assert_eq!(value.text.matches('.').count(), points, "{text} -> {}", value.text);
        }
    }

    #[test]
    fn missing_decimal_point_is_inserted() {
        let value = score(&digits(&[2, 5], &[90.0, 80.0]), 5, 0);
        assert_eq!(value, FieldValue::new("2.5", 80.0));

        let value = score(&digits(&[3, 5], &[90.0, 80.0]), 25, 0);
        assert_eq!(value, FieldValue::new("3.5", 80.0));

        let value = score(&digits(&[2, 7, 5], &[90.0, 80.0, 85.0]), 5, 0);
        assert_eq!(value, FieldValue::new("2.75", 80.0));
    }

    #[test]
    fn lone_fraction_digit_becomes_a_half() {
        let value = score(&digits(&[2, 7], &[90.0, 80.0]), 5, 0);
        assert_eq!(value, FieldValue::new("2.5", 75.0));

        let value = score(&digits(&[4, 7], &[90.0, 80.0]), 25, 0);
        assert_eq!(value, FieldValue::new("4.5", 75.0));
    }

    #[test]
    fn overlong_score_is_pruned() {
        let value = score(&digits(&[1, 3, 7], &[90.0, 70.0, 85.0]), 25, 0);
        assert_eq!(value, FieldValue::new("17", 80.0));
    }

    #[test]
    fn out_of_range_digit_is_substituted() {
        let value = score(&digits(&[7], &[90.0]), 5, 0);
        assert!(value.text == "1" || value.text == "2", "{}", value.text);
        assert_eq!(value.confidence, 85.0);
    }

    #[test]
    fn trailing_fraction_zero_dropped() {
        let glyphs = glyphs_from(
            &[Symbol::Digit(2), Symbol::Decimal, Symbol::Digit(5), Symbol::Digit(0)],
            &[90.0, 80.0, 85.0, 88.0],
        );
        assert_eq!(score(&glyphs, 5, 0), FieldValue::new("2.5", 80.0));
    }

    #[test]
    fn unranged_score_only_tidies_points() {
        let glyphs = reading("47.", 90.0);
        let value = validator().validate_score(&glyphs, None);
        assert_eq!(value, FieldValue::new("47", 89.0));
    }

    #[test]
    fn substitution_is_reproducible_with_seed() {
        let glyphs = digits(&[9], &[90.0]);
        let first = score(&glyphs, 5, 0);
        let second = score(&glyphs, 5, 0);
        assert_eq!(first, second);
        assert!(first.text == "0" || first.text == "4", "{}", first.text);
    }

    // -- Rider numbers --------------------------------------------------------

    #[test]
    fn rider_numbers() {
        let cases: &[(&[u8], &[f64], &str, f64)] = &[
            (&[7, 2, 3], &[50.0, 99.0, 99.0], "L23", 85.0),
            (&[1, 1, 8], &[60.0, 99.0, 99.0], "L18", 85.0),
            (&[1, 9], &[45.5, 99.0], "L9", 85.0),
            (&[1, 9], &[97.0, 99.0], "L19", 89.0),
            (&[8, 6, 2, 4], &[37.0, 68.0, 92.0, 93.0], "L24", 80.0),
            (&[4], &[99.0], "L4", 89.0),
        ];
        for &(values, confidences, text, confidence) in cases {
            let value = validator().validate_rider_number(&digits(values, confidences));
            assert_eq!(value, FieldValue::new(text, confidence), "{values:?}");
        }
    }

    #[test]
    fn rider_number_of_only_points_is_empty() {
        let value = validator().validate_rider_number(&reading("..", 90.0));
        assert_eq!(value, FieldValue::empty());
    }

    // -- Times and weights ----------------------------------------------------

    #[test]
    fn plausible_times_are_unchanged() {
        for text in ["43", "59", "100", "123", "159", "347", "409"] {
            let value = validator().validate_time(&reading(text, 99.0));
            assert_eq!(value, FieldValue::new(text, 99.0));
        }
    }

    #[test]
    fn impossible_minutes_are_forced() {
        let value = validator().validate_time(&reading("1275", 99.0));
        // 7 is confused with 1 and 2, both valid tens of minutes.
        assert!(value.text == "1215" || value.text == "1225", "{}", value.text);
        assert_eq!(value.confidence, 94.0);
    }

    #[test]
    fn long_time_is_trimmed_from_the_front() {
        let value = validator().validate_time(&reading("91230", 99.0));
        assert_eq!(value, FieldValue::new("1230", 94.0));
    }

    #[test]
    fn plausible_weights_are_unchanged() {
        for text in ["85", "99", "100", "125", "199", "200", "237"] {
            let value = validator().validate_weight(&reading(text, 95.0));
            assert_eq!(value, FieldValue::new(text, 95.0));
        }
    }

    #[test]
    fn weight_corrections() {
        assert_eq!(
            validator().validate_weight(&reading("085", 95.0)),
            FieldValue::new("85", 94.0)
        );
        assert_eq!(
            validator().validate_weight(&reading("5234", 95.0)),
            FieldValue::new("234", 90.0)
        );
    }

    #[test]
    fn heavy_correction_can_go_negative() {
        let glyphs = reading("0.0.7.", 4.0);
        let value = validator().validate_weight(&glyphs);
        assert_eq!(value.text, "7");
        assert!(value.confidence < 0.0);
        assert_eq!(value.reported_confidence(), 0.0);
    }
}
