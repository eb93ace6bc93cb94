// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Score field correction.
//
// Scores are small whole numbers, sometimes with a half or quarter point
// (`2.5`, `3.75`). Writers often drop the decimal point, so a short reading
// like `25` against a maximum of 5 is read back as `2.5`.

use rand::Rng;
use scrawl_core::{Glyph, Symbol};

use crate::correction::Correction;
use crate::field::ScoreRange;
use crate::penalty::Penalty;

/// Confidence given to a decimal point the corrector inserts.
pub const INSERTED_POINT_CONFIDENCE: f64 = 90.0;

pub(crate) fn correct_score<R: Rng>(c: &mut Correction, range: Option<ScoreRange>, rng: &mut R) {
    c.remove_excess_decimals();

    if let Some(range) = range {
        match c.decimal_position() {
            Some(0) => {}
            Some(point) => {
                let fraction = c.glyphs.split_off(point);
                let mut whole = Correction::new(std::mem::take(&mut c.glyphs));
                enforce_whole(&mut whole, range.max.saturating_sub(1), range.min, false, rng);
                c.penalty += whole.penalty;
                c.glyphs = whole.glyphs;
                c.glyphs.extend(fraction);
            }
            None => enforce_whole(c, range.max, range.min, true, rng),
        }
    }

    drop_trailing_zeros(c);
}

fn digits_of(value: u32) -> Vec<u8> {
    value.to_string().bytes().map(|b| b - b'0').collect()
}

/// Bring a whole-number reading in line with `max`.
fn enforce_whole<R: Rng>(c: &mut Correction, max: u32, min: u32, may_insert_point: bool, rng: &mut R) {
    let caps = digits_of(max);
    let width = caps.len();

    if may_insert_point && insert_point(c, &caps) {
        return;
    }

    c.prune(width, 0);
    match c.len() {
        0 => {}
        1 => {
            let hi = if width == 1 { caps[0] } else { 9 };
            let lo = min.min(u32::from(hi)) as u8;
            c.force(0, lo, hi, rng);
        }
        n if n == width => {
            for (i, &cap) in caps.iter().enumerate() {
                let lo = if i == 0 { 1 } else { 0 };
                c.force(i, lo, cap, rng);
                if c.digit_at(i) != Some(cap) {
                    break;
                }
            }
        }
        _ => c.force(0, 1, 9, rng),
    }
}

/// Read a 2–3 digit reading as `a.5`, `a.25` or `a.75` when the first digit
/// is a plausible whole part. Returns whether a point was inserted.
fn insert_point(c: &mut Correction, caps: &[u8]) -> bool {
    if !(2..=3).contains(&c.len()) || !c.all_digits() {
        return false;
    }
    let Some(first) = c.digit_at(0) else {
        return false;
    };
    let plausible = match caps {
        [only] => first < *only,
        [lead, _] => first > *lead,
        _ => false,
    };
    if !plausible {
        return false;
    }

    let fraction: Vec<u8> = (1..c.len()).filter_map(|i| c.digit_at(i)).collect();
    let point = Glyph::decimal(INSERTED_POINT_CONFIDENCE);
    match fraction.as_slice() {
        [half] => {
            c.glyphs.insert(1, point);
            if *half != 5 {
                c.glyphs[2].symbol = Symbol::Digit(5);
                c.charge(Penalty::Default, "fraction read as a half");
            }
            true
        }
        [2, 5] | [7, 5] => {
            c.glyphs.insert(1, point);
            true
        }
        _ => false,
    }
}

/// Drop trailing zeros while the fraction has more than one digit.
fn drop_trailing_zeros(c: &mut Correction) {
    let Some(point) = c.decimal_position() else {
        return;
    };
    while c.len() - point - 1 > 1 && c.digit_at(c.len() - 1) == Some(0) {
        c.glyphs.pop();
    }
}
