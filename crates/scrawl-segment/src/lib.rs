// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scrawl-segment: glyph segmentation for handwritten numeric fields.
//
// Turns a photographed field into a left-to-right list of glyph boxes:
// binarize, scan columns for ink, trace each region's outer boundary, drop
// ruled lines the writing touches, classify boxes by size, and send digit
// boxes to a `DigitClassifier`.

pub mod geometry;
pub mod reader;
pub mod scan;
pub mod segment;
pub mod trace;

pub use geometry::Boundary;
pub use reader::GlyphReader;
pub use scan::{Binarizer, ScanCursor, ScanState};
pub use segment::{Segment, SegmentClassifier, SegmentKind};
pub use trace::{BoundaryTracer, LineSide, TraceOutcome};
