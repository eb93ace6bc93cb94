// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scrawl-validate: correction of raw OCR output for known field kinds.
//
// Each field kind has a policy built from a handful of editing primitives
// (drop decimal points, prune, trim, force a digit into range). Every edit
// costs confidence, so a heavily corrected value reports low confidence
// instead of pretending to be a clean read.

pub mod correction;
pub mod field;
pub mod penalty;
pub mod score;
pub mod validator;

pub use correction::Correction;
pub use field::{FieldKind, ScoreRange};
pub use penalty::{Penalty, confusable};
pub use score::INSERTED_POINT_CONFIDENCE;
pub use validator::{FieldValidator, PREFIX_CONFIDENCE};
