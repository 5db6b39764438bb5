//! # Ensemble Combiner
//! Runs the lexicon scorer and the pattern analyzer, weights their scores by text
//! traits, squashes the sum with `tanh` and calibrates confidence from how well
//! the two agree.
//!
//! The lexicon side sees the contrast clause (the scorer narrows it itself); the
//! pattern side always sees the whole text. The two inputs therefore differ for
//! text like "nice view, but awful food!!!", where the `!!!` counts even though
//! the lexicon only reads "awful food".

use serde::Serialize;

use crate::analyze::context::ContextFeatures;
use crate::analyze::patterns::PatternAnalyzer;
use crate::analyze::scorer::LexiconScorer;
use crate::analyze::scoring::{combined_confidence, combined_score, ScoreInputs};
use crate::analyze::weights::{TextTraits, Weights};
use crate::config::EnsembleConfig;
use crate::sentiment::{round2, to_percent, Algorithm, AnalysisResult, Metrics, SentimentClass, NO_TEXT};
use crate::text::words;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleResult {
    pub algorithm: Algorithm,
    pub sentiment: SentimentClass,
    /// Strictly inside (-1, 1) for any non-empty text.
    pub score: f64,
    pub confidence: u8,
    pub emoji: &'static str,
    pub explanation: String,
    pub weights: Weights,
    pub metrics: Metrics,
    pub lexicon: AnalysisResult,
    pub pattern: AnalysisResult,
    pub context: ContextFeatures,
}

#[derive(Debug, Clone, Default)]
pub struct EnsembleAnalyzer {
    lexicon: LexiconScorer,
    pattern: PatternAnalyzer,
    config: EnsembleConfig,
}

impl EnsembleAnalyzer {
    pub fn new(lexicon: LexiconScorer, pattern: PatternAnalyzer, config: EnsembleConfig) -> Self {
        Self {
            lexicon,
            pattern,
            config,
        }
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn analyze(&self, text: &str) -> EnsembleResult {
        let lexicon = self.lexicon.analyze(text);
        let pattern = self.pattern.analyze(text);

        if text.trim().is_empty() {
            return EnsembleResult {
                algorithm: Algorithm::Ensemble,
                sentiment: SentimentClass::Neutral,
                score: 0.0,
                confidence: 0,
                emoji: Algorithm::Ensemble.emoji(0.0),
                explanation: NO_TEXT.to_string(),
                weights: self.config.weights.base,
                metrics: Metrics {
                    subjectivity: Some(0.0),
                    ..Metrics::default()
                },
                lexicon,
                pattern,
                context: ContextFeatures::default(),
            };
        }

        let word_count = words(text).len();
        let traits = TextTraits {
            has_emoticons: pattern.patterns.as_ref().is_some_and(|p| p.has_emoticons()),
            has_exclamation: text.contains('!'),
            word_count,
        };
        let weights = self.config.weights.select(&traits);

        let inputs = ScoreInputs::new(
            lexicon.score,
            pattern.score,
            f64::from(lexicon.confidence),
            f64::from(pattern.confidence),
        );
        let raw = combined_score(&inputs, &weights);
        let score = round2(raw);
        let confidence = to_percent(combined_confidence(&inputs, word_count));
        let sentiment = SentimentClass::from_score(raw, self.config.thresholds.class);

        let context = ContextFeatures::extract(text, &self.lexicon, self.config.thresholds.progression);
        let explanation = self.explain(&lexicon, &pattern, &context);

        let subjectivity = (lexicon.metrics.subjectivity.unwrap_or(0.0)
            + pattern.metrics.complexity.unwrap_or(0.0))
            / 2.0;

        EnsembleResult {
            algorithm: Algorithm::Ensemble,
            sentiment,
            score,
            confidence,
            emoji: Algorithm::Ensemble.emoji(raw),
            explanation,
            weights,
            metrics: Metrics {
                polarity: score,
                intensity: score.abs(),
                subjectivity: Some(round2(subjectivity)),
                complexity: None,
            },
            lexicon,
            pattern,
            context,
        }
    }

    fn explain(
        &self,
        lexicon: &AnalysisResult,
        pattern: &AnalysisResult,
        context: &ContextFeatures,
    ) -> String {
        let mut out = String::from("Ensemble analysis combining lexicon and pattern signals.\n\n");
        out.push_str(&format!(
            "Lexicon analysis: {} ({})\n",
            lexicon.sentiment, lexicon.score
        ));
        out.push_str(&format!(
            "Pattern analysis: {} ({})\n\n",
            pattern.sentiment, pattern.score
        ));
        out.push_str("Ensemble result: the analyses were weighted by text characteristics. ");

        if (lexicon.score - pattern.score).abs() < self.config.thresholds.agreement {
            let mean = (f64::from(lexicon.confidence) + f64::from(pattern.confidence)) / 2.0;
            out.push_str(&format!(
                "Both methods agreed, increasing confidence to {}%.",
                mean.round()
            ));
        } else {
            out.push_str("Methods showed some disagreement, requiring careful weighted combination.");
        }

        out.push_str("\n\nContext insights: ");
        if !context.contextual_clues.is_empty() {
            out.push_str(&format!(
                "Detected {} context. ",
                context.contextual_clues.join(", ")
            ));
        }
        out.push_str(&format!(
            "Emotional progression appears to be {}.",
            context.emotional_progression.as_str()
        ));
        out
    }
}
