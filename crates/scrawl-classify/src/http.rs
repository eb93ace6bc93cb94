// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP classifier adapter.
//
// Talks to a digit model served behind a TorchServe-style prediction
// endpoint. The request body is the raw 8-bit pixel buffer of the padded
// glyph; its dimensions travel as the `x` (width) and `y` (height) query
// parameters. The model answers with JSON:
//
// ```json
// { "Digit": 7, "Confidence": 98.2 }
// ```
//
// There are no retries. A failed call surfaces as `ScrawlError::Model`.

use std::time::Duration;

use image::GrayImage;
use scrawl_core::error::{Result, ScrawlError};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::traits::{DigitClassifier, Prediction};

/// Default prediction endpoint of a locally served model.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:6060/predictions/digit-classifier";

/// Configuration for constructing an [`HttpClassifier`].
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    /// Full URL of the prediction endpoint.
    pub endpoint: String,
    /// Overall timeout for one classification request.
    pub timeout: Duration,
}

impl Default for HttpClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpClassifierConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}

/// Body returned by the prediction endpoint.
#[derive(Debug, Deserialize)]
struct PredictionBody {
    #[serde(rename = "Digit")]
    digit: i64,
    #[serde(rename = "Confidence")]
    confidence: f64,
}

/// Blocking HTTP client for a served digit model.
pub struct HttpClassifier {
    config: HttpClassifierConfig,
    agent: ureq::Agent,
}

impl HttpClassifier {
    pub fn new(config: HttpClassifierConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    /// Client for [`DEFAULT_ENDPOINT`].
    pub fn with_defaults() -> Self {
        Self::new(HttpClassifierConfig::default())
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl DigitClassifier for HttpClassifier {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip_all, fields(endpoint = %self.config.endpoint, width = glyph.width(), height = glyph.height()))]
    fn classify(&self, glyph: &GrayImage) -> Result<Prediction> {
        let response = self
            .agent
            .post(&self.config.endpoint)
            .query("x", &glyph.width().to_string())
            .query("y", &glyph.height().to_string())
            .set("Content-Type", "application/octet-stream")
            .send_bytes(glyph.as_raw());

        let body = match response {
            Ok(resp) => resp.into_string().map_err(|err| {
                ScrawlError::Model(format!("failed to read classifier response: {err}"))
            })?,
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                warn!(status = code, "classifier returned an error status");
                return Err(ScrawlError::Model(format!(
                    "classifier returned status {code}: {}",
                    detail.trim()
                )));
            }
            Err(ureq::Error::Transport(err)) => {
                warn!(error = %err, "classifier unreachable");
                return Err(ScrawlError::Model(format!(
                    "classifier request to {} failed: {err}",
                    self.config.endpoint
                )));
            }
        };

        let parsed: PredictionBody = serde_json::from_str(&body).map_err(|err| {
            ScrawlError::Model(format!("malformed classifier response {body:?}: {err}"))
        })?;
        let prediction = Prediction::checked(parsed.digit, parsed.confidence)?;

        debug!(
            digit = prediction.digit,
            confidence = prediction.confidence,
            "glyph classified"
        );
        Ok(prediction)
    }
}
