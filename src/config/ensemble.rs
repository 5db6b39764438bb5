// src/config/ensemble.rs
//! Ensemble tuning loaded from TOML (`config/ensemble.toml` or `ENSEMBLE_CONFIG_PATH`).
//!
//! ```toml
//! [weights]
//! base = { lexicon = 0.7, pattern = 0.3 }
//! expressive = { lexicon = 0.5, pattern = 0.5 }
//! short_expressive = { lexicon = 0.4, pattern = 0.6 }
//! short_text_words = 10
//!
//! [thresholds]
//! class = 0.15
//! agreement = 0.3
//! progression = 0.2
//! ```
//!
//! Every key is optional; a missing file means built-in defaults.

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

use crate::analyze::weights::Weights;

pub const DEFAULT_ENSEMBLE_CONFIG_PATH: &str = "config/ensemble.toml";
pub const ENV_ENSEMBLE_CONFIG_PATH: &str = "ENSEMBLE_CONFIG_PATH";

fn default_base() -> Weights {
    Weights::new(0.7, 0.3)
}
fn default_expressive() -> Weights {
    Weights::new(0.5, 0.5)
}
fn default_short_expressive() -> Weights {
    Weights::new(0.4, 0.6)
}
fn default_short_text_words() -> usize {
    10
}
fn default_class() -> f64 {
    0.15
}
fn default_agreement() -> f64 {
    0.3
}
fn default_progression() -> f64 {
    0.2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightsSection {
    #[serde(default = "default_base")]
    pub base: Weights,
    /// Used when the text carries an emoticon or `!`.
    #[serde(default = "default_expressive")]
    pub expressive: Weights,
    /// Expressive text shorter than `short_text_words` words.
    #[serde(default = "default_short_expressive")]
    pub short_expressive: Weights,
    #[serde(default = "default_short_text_words")]
    pub short_text_words: usize,
}

impl Default for WeightsSection {
    fn default() -> Self {
        Self {
            base: default_base(),
            expressive: default_expressive(),
            short_expressive: default_short_expressive(),
            short_text_words: default_short_text_words(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsSection {
    /// Ensemble class cut-off (|score| must exceed it).
    #[serde(default = "default_class")]
    pub class: f64,
    /// Sub-scores closer than this are reported as agreeing.
    #[serde(default = "default_agreement")]
    pub agreement: f64,
    /// Mean shift between text halves needed for improving/declining.
    #[serde(default = "default_progression")]
    pub progression: f64,
}

impl Default for ThresholdsSection {
    fn default() -> Self {
        Self {
            class: default_class(),
            agreement: default_agreement(),
            progression: default_progression(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnsembleConfig {
    #[serde(default)]
    pub weights: WeightsSection,
    #[serde(default)]
    pub thresholds: ThresholdsSection,
}

impl EnsembleConfig {
    /// Load from `ENSEMBLE_CONFIG_PATH` or `config/ensemble.toml`.
    /// A missing file is not an error; a malformed one is.
    pub fn from_toml() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_ENSEMBLE_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENSEMBLE_CONFIG_PATH));

        if !path.exists() {
            debug!(target: "sentiment", path = %path.display(), "no ensemble config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read ensemble config at {}: {}",
                path.display(),
                e
            )
        })?;
        let cfg = Self::from_toml_str(&content)?;
        info!(target: "sentiment", path = %path.display(), "loaded ensemble config");
        Ok(cfg)
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut cfg: EnsembleConfig = toml::from_str(toml_str)?;

        for (name, w) in [
            ("base", cfg.weights.base),
            ("expressive", cfg.weights.expressive),
            ("short_expressive", cfg.weights.short_expressive),
        ] {
            if !w.is_valid() {
                anyhow::bail!("weights.{name} must be finite, non-negative and sum to at most 1: {w:?}");
            }
        }

        // Sanitize thresholds
        let t = &mut cfg.thresholds;
        if !(0.0..1.0).contains(&t.class) {
            t.class = default_class();
        }
        if !t.agreement.is_finite() || t.agreement < 0.0 {
            t.agreement = default_agreement();
        }
        if !t.progression.is_finite() || t.progression < 0.0 {
            t.progression = default_progression();
        }

        Ok(cfg)
    }
}
