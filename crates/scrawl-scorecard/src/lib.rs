// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scrawl-scorecard: named field layouts for endurance-ride scorecards, the
// reader that turns a card's field images into corrected values, and the
// report it produces.

pub mod config;
pub mod layout;
pub mod reader;
pub mod report;

pub use config::ScorecardConfig;
pub use layout::{FieldSpec, ScorecardLayout};
pub use reader::ScorecardReader;
pub use report::{ConfidenceBand, DEFAULT_BLANK_THRESHOLD, FieldReading, ReportId, ScorecardReport};
