// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editing primitives shared by every field policy. Each edit records its
// penalty; the final confidence is the weakest remaining glyph minus the sum.

use rand::Rng;
use rand::seq::IndexedRandom;
use scrawl_core::{FieldValue, Glyph, Symbol, render};
use tracing::trace;

use crate::penalty::{Penalty, confusable};

/// A glyph sequence under correction together with its accrued penalty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correction {
    pub glyphs: Vec<Glyph>,
    pub penalty: f64,
}

impl Correction {
    pub fn new(glyphs: impl Into<Vec<Glyph>>) -> Self {
        Self {
            glyphs: glyphs.into(),
            penalty: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn charge(&mut self, penalty: Penalty, reason: &'static str) {
        self.penalty += penalty.points();
        trace!(?penalty, reason, "correction");
    }

    pub fn remove(&mut self, index: usize, penalty: Penalty, reason: &'static str) {
        self.glyphs.remove(index);
        self.charge(penalty, reason);
    }

    pub fn digit_at(&self, index: usize) -> Option<u8> {
        self.glyphs.get(index).and_then(|g| g.symbol.digit())
    }

    pub fn all_digits(&self) -> bool {
        self.glyphs.iter().all(|g| g.symbol.is_digit())
    }

    pub fn decimal_position(&self) -> Option<usize> {
        self.glyphs.iter().position(|g| g.symbol.is_decimal())
    }

    // -- Decimal points -------------------------------------------------------

    /// Drop every decimal point.
    pub fn remove_decimals(&mut self) {
        while let Some(index) = self.decimal_position() {
            self.remove(index, Penalty::Small, "decimal point removed");
        }
    }

    /// Drop trailing decimal points, then keep only the most confident of
    /// any remaining ones (the first on ties).
    pub fn remove_excess_decimals(&mut self) {
        while self.glyphs.last().is_some_and(|g| g.symbol.is_decimal()) {
            self.remove(self.glyphs.len() - 1, Penalty::Small, "trailing decimal point");
        }

        let points: Vec<usize> = self
            .glyphs
            .iter()
            .enumerate()
            .filter(|(_, g)| g.symbol.is_decimal())
            .map(|(i, _)| i)
            .collect();
        let Some(&first) = points.first() else {
            return;
        };
        let keep = points.iter().copied().fold(first, |best, i| {
            if self.glyphs[i].confidence > self.glyphs[best].confidence {
                i
            } else {
                best
            }
        });
        for &index in points.iter().rev() {
            if index != keep {
                self.remove(index, Penalty::Small, "duplicate decimal point");
            }
        }
    }

    // -- Length ---------------------------------------------------------------

    /// Delete the least confident digit at or after `from` until at most
    /// `max_len` glyphs remain. Non-digit symbols are never removed.
    pub fn prune(&mut self, max_len: usize, from: usize) {
        while self.glyphs.len() > max_len {
            let weakest = self
                .glyphs
                .iter()
                .enumerate()
                .skip(from)
                .filter(|(_, g)| g.symbol.is_digit())
                .fold(None, |best: Option<(usize, f64)>, (i, g)| match best {
                    Some((_, c)) if c <= g.confidence => best,
                    _ => Some((i, g.confidence)),
                });
            let Some((index, _)) = weakest else {
                return;
            };
            self.remove(index, Penalty::Default, "least confident digit pruned");
        }
    }

    /// Delete glyphs from the front until at most `max_len` remain.
    pub fn trim_front(&mut self, max_len: usize) {
        while self.glyphs.len() > max_len {
            self.remove(0, Penalty::Default, "leading glyph trimmed");
        }
    }

    // -- Digit substitution ---------------------------------------------------

    /// Make the digit at `index` fall inside `[lo, hi]`.
    ///
    /// An out-of-range digit is replaced by a random confusable digit in
    /// range (Default penalty) or, failing that, by a random digit in range
    /// (Large penalty). Non-digits and in-range digits are left alone.
    pub fn force<R: Rng>(&mut self, index: usize, lo: u8, hi: u8, rng: &mut R) {
        let Some(digit) = self.digit_at(index) else {
            return;
        };
        if (lo..=hi).contains(&digit) || lo > hi {
            return;
        }

        let candidates: Vec<u8> = confusable(digit)
            .iter()
            .copied()
            .filter(|d| (lo..=hi).contains(d))
            .collect();
        let (replacement, penalty) = match candidates.choose(rng) {
            Some(&d) => (d, Penalty::Default),
            None => (rng.random_range(lo..=hi), Penalty::Large),
        };
        self.glyphs[index].symbol = Symbol::Digit(replacement);
        self.charge(penalty, "digit forced into range");
    }

    // -- Result ---------------------------------------------------------------

    pub fn finish(self) -> FieldValue {
        let Some(weakest) = self
            .glyphs
            .iter()
            .map(|g| g.confidence)
            .reduce(f64::min)
        else {
            return FieldValue::empty();
        };
        FieldValue::new(render(&self.glyphs), weakest - self.penalty)
    }
}
