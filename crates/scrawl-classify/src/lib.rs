// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scrawl-classify: the boundary between the segmentation engine and the
// digit image classifier.
//
// The classifier is a trained model owned by another component. This crate
// defines the trait the engine calls and an HTTP adapter for a model served
// behind a TorchServe-style prediction endpoint.

pub mod http;
pub mod traits;

pub use http::{HttpClassifier, HttpClassifierConfig};
pub use traits::{DigitClassifier, FnClassifier, Prediction};
