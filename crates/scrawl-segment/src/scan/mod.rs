// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan module: binarization and the column scan that seeds contour tracing.

pub mod binarize;
pub mod cursor;

pub use binarize::{Binarizer, FOREGROUND, intensity_range, is_ink};
pub use cursor::{ExclusionBand, ScanCursor, ScanState};
