//! Result types shared by all analyzers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyze::patterns::PatternFeatureSet;
use crate::error::SentimentError;

/// Overall sentiment class derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentClass {
    Positive,
    Neutral,
    Negative,
}

impl SentimentClass {
    /// `score > threshold` → positive, `score < -threshold` → negative.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            SentimentClass::Positive
        } else if score < -threshold {
            SentimentClass::Negative
        } else {
            SentimentClass::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentClass::Positive => "positive",
            SentimentClass::Neutral => "neutral",
            SentimentClass::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity of a single lexicon hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn flipped(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// Which analyzer produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Lexicon,
    Pattern,
    Ensemble,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Lexicon, Algorithm::Pattern, Algorithm::Ensemble];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Lexicon => "lexicon",
            Algorithm::Pattern => "pattern",
            Algorithm::Ensemble => "ensemble",
        }
    }

    /// Human-readable name shown next to results.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Lexicon => "Basic Lexicon",
            Algorithm::Pattern => "Pattern Recognition",
            Algorithm::Ensemble => "Neural Network (Ensemble)",
        }
    }

    /// Display glyph for a score. Each analyzer has its own cut-offs.
    pub fn emoji(self, score: f64) -> &'static str {
        match self {
            Algorithm::Lexicon => match score {
                s if s > 0.6 => "😍",
                s if s > 0.1 => "😊",
                s if s < -0.6 => "😭",
                s if s < -0.1 => "😢",
                _ => "😐",
            },
            Algorithm::Pattern => match score {
                s if s > 0.5 => "🤩",
                s if s > 0.1 => "😊",
                s if s < -0.5 => "😡",
                s if s < -0.1 => "😔",
                _ => "😐",
            },
            Algorithm::Ensemble => match score {
                s if s > 0.6 => "🚀",
                s if s > 0.15 => "😊",
                s if s < -0.6 => "💥",
                s if s < -0.15 => "😔",
                _ => "🤖",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SentimentError;

    /// Accepts the analyzer name or its short id (`basic`, `advanced`, `neural`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicon" | "basic" => Ok(Algorithm::Lexicon),
            "pattern" | "advanced" => Ok(Algorithm::Pattern),
            "ensemble" | "neural" => Ok(Algorithm::Ensemble),
            _ => Err(SentimentError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A lexicon hit as it contributed to the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedWord {
    pub word: String,
    pub polarity: Polarity,
    /// Absolute contribution after modifiers and negation.
    pub intensity: f64,
    /// An intensifier or diminisher was applied.
    pub modified: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub polarity: f64,
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjectivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<f64>,
}

/// Output of the lexicon scorer and the pattern extractor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub algorithm: Algorithm,
    pub sentiment: SentimentClass,
    /// Polarity in [-1, 1], two decimals.
    pub score: f64,
    /// Integer percent in [0, 100].
    pub confidence: u8,
    pub emoji: &'static str,
    pub annotated_words: Vec<AnnotatedWord>,
    pub explanation: String,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternFeatureSet>,
}

pub(crate) const NO_TEXT: &str = "No text provided";

/// Round to two decimals, the precision results are reported with.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Clamp a raw percentage into an integer in [0, 100].
#[inline]
pub(crate) fn to_percent(confidence: f64) -> u8 {
    if confidence.is_finite() {
        confidence.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_thresholds_are_strict() {
        assert_eq!(SentimentClass::from_score(0.1, 0.1), SentimentClass::Neutral);
        assert_eq!(SentimentClass::from_score(0.11, 0.1), SentimentClass::Positive);
        assert_eq!(SentimentClass::from_score(-0.15, 0.15), SentimentClass::Neutral);
        assert_eq!(SentimentClass::from_score(-0.16, 0.15), SentimentClass::Negative);
    }

    #[test]
    fn algorithm_parses_names_and_ids() {
        assert_eq!("basic".parse::<Algorithm>().unwrap(), Algorithm::Lexicon);
        assert_eq!("Advanced".parse::<Algorithm>().unwrap(), Algorithm::Pattern);
        assert_eq!(" ensemble ".parse::<Algorithm>().unwrap(), Algorithm::Ensemble);
        assert!(matches!(
            "quantum".parse::<Algorithm>(),
            Err(SentimentError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn emoji_cutoffs_differ_per_algorithm() {
        assert_eq!(Algorithm::Lexicon.emoji(0.55), "😊");
        assert_eq!(Algorithm::Pattern.emoji(0.55), "🤩");
        assert_eq!(Algorithm::Ensemble.emoji(0.0), "🤖");
        assert_eq!(Algorithm::Ensemble.emoji(-0.7), "💥");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(to_percent(49.5), 50);
        assert_eq!(to_percent(140.0), 100);
        assert_eq!(to_percent(-3.0), 0);
        assert_eq!(to_percent(f64::NAN), 0);
    }

    #[test]
    fn serializes_lowercase_enums() {
        let v = serde_json::to_value(SentimentClass::Negative).unwrap();
        assert_eq!(v, serde_json::json!("negative"));
        let v = serde_json::to_value(Algorithm::Pattern).unwrap();
        assert_eq!(v, serde_json::json!("pattern"));
    }
}
