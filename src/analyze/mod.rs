// src/analyze/mod.rs
//! Analysis pipeline: lexicon scorer, pattern analyzer and the ensemble that
//! fuses them, plus a small registry dispatching by algorithm name.

pub mod context;
pub mod ensemble;
pub mod patterns;
pub mod scorer;
pub mod scoring;
pub mod weights;

use std::sync::Arc;

use serde::Serialize;

use crate::config::EnsembleConfig;
use crate::debug::dev_log_analysis;
use crate::lexicon::Lexicon;
use crate::sentiment::{Algorithm, AnalysisResult, SentimentClass};

// Re-export convenient types.
pub use crate::analyze::context::{ContextFeatures, Progression};
pub use crate::analyze::ensemble::{EnsembleAnalyzer, EnsembleResult};
pub use crate::analyze::patterns::{PatternAnalyzer, PatternFeatureSet};
pub use crate::analyze::scorer::LexiconScorer;
pub use crate::analyze::scoring::{combined_confidence, combined_score, ScoreInputs};
pub use crate::analyze::weights::{TextTraits, Weights};

/// Result of any analyzer, serialized as the inner result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Single(AnalysisResult),
    Ensemble(Box<EnsembleResult>),
}

impl Analysis {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Analysis::Single(r) => r.algorithm,
            Analysis::Ensemble(r) => r.algorithm,
        }
    }

    pub fn sentiment(&self) -> SentimentClass {
        match self {
            Analysis::Single(r) => r.sentiment,
            Analysis::Ensemble(r) => r.sentiment,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Analysis::Single(r) => r.score,
            Analysis::Ensemble(r) => r.score,
        }
    }

    pub fn confidence(&self) -> u8 {
        match self {
            Analysis::Single(r) => r.confidence,
            Analysis::Ensemble(r) => r.confidence,
        }
    }
}

/// All three analyzers sharing one vocabulary.
#[derive(Debug, Clone)]
pub struct Analyzers {
    lexicon: LexiconScorer,
    pattern: PatternAnalyzer,
    ensemble: EnsembleAnalyzer,
}

impl Default for Analyzers {
    fn default() -> Self {
        Self::new(Lexicon::shared_default(), EnsembleConfig::default())
    }
}

impl Analyzers {
    pub fn new(lexicon: Arc<Lexicon>, config: EnsembleConfig) -> Self {
        let scorer = LexiconScorer::new(Arc::clone(&lexicon));
        let pattern = PatternAnalyzer::new(lexicon);
        Self {
            ensemble: EnsembleAnalyzer::new(scorer.clone(), pattern.clone(), config),
            lexicon: scorer,
            pattern,
        }
    }

    /// Vocabulary from `SENTIMENT_LEXICON_PATH` and tuning from `ENSEMBLE_CONFIG_PATH`.
    pub fn from_env() -> anyhow::Result<Self> {
        let lexicon = Lexicon::from_env()?;
        let config = EnsembleConfig::from_toml()?;
        Ok(Self::new(lexicon, config))
    }

    pub fn lexicon(&self) -> &LexiconScorer {
        &self.lexicon
    }

    pub fn pattern(&self) -> &PatternAnalyzer {
        &self.pattern
    }

    pub fn ensemble(&self) -> &EnsembleAnalyzer {
        &self.ensemble
    }

    pub fn analyze(&self, algorithm: Algorithm, text: &str) -> Analysis {
        let out = match algorithm {
            Algorithm::Lexicon => Analysis::Single(self.lexicon.analyze(text)),
            Algorithm::Pattern => Analysis::Single(self.pattern.analyze(text)),
            Algorithm::Ensemble => Analysis::Ensemble(Box::new(self.ensemble.analyze(text))),
        };
        dev_log_analysis(algorithm, text, out.score(), out.confidence());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_algorithm() {
        let a = Analyzers::default();
        for alg in Algorithm::ALL {
            let out = a.analyze(alg, "I love this amazing restaurant!");
            assert_eq!(out.algorithm(), alg);
            assert_eq!(out.sentiment(), SentimentClass::Positive);
        }
    }

    #[test]
    fn untagged_serialization_is_flat() {
        let a = Analyzers::default();
        let v = serde_json::to_value(a.analyze(Algorithm::Ensemble, "Nice!")).unwrap();
        assert_eq!(v["algorithm"], "ensemble");
        assert!(v.get("lexicon").is_some());
        assert!(v.get("context").is_some());

        let v = serde_json::to_value(a.analyze(Algorithm::Lexicon, "Nice!")).unwrap();
        assert_eq!(v["algorithm"], "lexicon");
        assert_eq!(v["annotated_words"][0]["word"], "nice");
    }
}
