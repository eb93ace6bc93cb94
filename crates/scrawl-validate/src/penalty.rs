// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Correction penalties and the digit confusion table.

use serde::{Deserialize, Serialize};

/// Confidence points deducted for one corrective edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Penalty {
    /// Cosmetic edits: stray decimal points, inserted prefixes, leading zeros.
    Small,
    /// Edits that change or drop a digit for a plausible reason.
    Default,
    /// A digit replaced with no evidence at all.
    Large,
}

impl Penalty {
    pub fn points(self) -> f64 {
        match self {
            Self::Small => 1.0,
            Self::Default => 5.0,
            Self::Large => 15.0,
        }
    }
}

/// Digits commonly misread as `digit` in handwriting.
pub fn confusable(digit: u8) -> &'static [u8] {
    match digit {
        0 => &[6, 8, 9],
        1 => &[4, 7],
        2 => &[3, 7],
        3 => &[2, 5, 8],
        4 => &[1, 9],
        5 => &[3, 6, 8],
        6 => &[0, 5, 8],
        7 => &[1, 2],
        8 => &[0, 3, 5, 6, 9],
        9 => &[0, 4, 8],
        _ => &[],
    }
}
