// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scorecard reader configuration, loadable from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use scrawl_classify::HttpClassifierConfig;
use scrawl_classify::http::DEFAULT_ENDPOINT;
use scrawl_core::FieldConfig;
use scrawl_core::error::{Result, ScrawlError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::layout::{FieldSpec, ScorecardLayout};

/// Settings for reading whole scorecards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Prediction endpoint of the digit model.
    pub classifier_endpoint: String,
    /// Timeout for one classifier request, in milliseconds.
    pub classifier_timeout_ms: u64,
    /// Segmentation settings for every field without an override.
    pub default_field: FieldConfig,
    /// Per-field segmentation settings, keyed by field name.
    pub overrides: HashMap<String, FieldConfig>,
}

impl Default for ScorecardConfig {
    fn default() -> Self {
        Self {
            classifier_endpoint: DEFAULT_ENDPOINT.to_string(),
            classifier_timeout_ms: 10_000,
            default_field: FieldConfig::default(),
            overrides: HashMap::new(),
        }
    }
}

impl ScorecardConfig {
    /// Load and validate a JSON config file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&data)?;
        info!(overrides = config.overrides.len(), "scorecard config loaded");
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.classifier_endpoint.trim().is_empty() {
            return Err(ScrawlError::InvalidConfiguration(
                "classifier_endpoint must not be empty".into(),
            ));
        }
        if self.classifier_timeout_ms == 0 {
            return Err(ScrawlError::InvalidConfiguration(
                "classifier_timeout_ms must be positive".into(),
            ));
        }
        self.default_field.validate()?;
        for (name, field) in &self.overrides {
            field.validate().map_err(|err| {
                ScrawlError::InvalidConfiguration(format!("override for {name:?}: {err}"))
            })?;
        }
        Ok(())
    }

    /// Settings for one field of `layout`: its override if present, else the
    /// default, with the layout's size reference applied.
    pub fn field_config(&self, layout: &ScorecardLayout, field: &FieldSpec) -> FieldConfig {
        let mut config = self
            .overrides
            .get(&field.name)
            .cloned()
            .unwrap_or_else(|| self.default_field.clone());
        if layout.use_width_as_reference {
            config.use_width_as_reference = true;
        }
        config
    }

    pub fn classifier_config(&self) -> HttpClassifierConfig {
        HttpClassifierConfig {
            endpoint: self.classifier_endpoint.clone(),
            timeout: Duration::from_millis(self.classifier_timeout_ms),
        }
    }
}
