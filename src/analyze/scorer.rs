//! # Lexicon Scorer
//! Single left-to-right pass over tokens with a modifier register and a one-shot
//! negation flag.
//!
//! - negator: arms negation for the next emotional word
//! - intensifier/diminisher: multiplies the modifier, which applies to the very
//!   next token only
//! - emotional word: `value * modifier`, sign-flipped if negation is armed
//!
//! Any token that is not a modifier resets the modifier to 1, so "very the good"
//! scores exactly like "good".

use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::sentiment::{
    round2, to_percent, Algorithm, AnalysisResult, AnnotatedWord, Metrics, Polarity,
    SentimentClass, NO_TEXT,
};
use crate::text::{contrast_clause, tokenize};

/// Class cut-off for the standalone scorer.
pub const CLASS_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Arc<Lexicon>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::shared_default())
    }
}

/// Accumulators of one scan.
#[derive(Debug, Default)]
struct Scan {
    total: f64,
    hits: Vec<AnnotatedWord>,
}

impl LexiconScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return empty_result(Algorithm::Lexicon);
        }

        let clause = contrast_clause(text, self.lexicon.contrast_markers());
        let tokens = tokenize(clause);
        let scan = self.scan(&tokens);

        let count = scan.hits.len();
        let raw = if count > 0 {
            scan.total / count as f64
        } else {
            0.0
        };
        // classify on the unrounded value; rounding is for reporting only
        let clamped = raw.clamp(-1.0, 1.0);
        let score = round2(clamped);
        let confidence = confidence(count, tokens.len());
        let sentiment = SentimentClass::from_score(clamped, CLASS_THRESHOLD);

        AnalysisResult {
            algorithm: Algorithm::Lexicon,
            sentiment,
            score,
            confidence: to_percent(confidence),
            emoji: Algorithm::Lexicon.emoji(clamped),
            explanation: explain(sentiment, &scan.hits),
            metrics: Metrics {
                polarity: score,
                intensity: score.abs(),
                subjectivity: Some((count as f64 / 10.0).min(1.0)),
                complexity: None,
            },
            annotated_words: scan.hits,
            patterns: None,
        }
    }

    fn scan(&self, tokens: &[String]) -> Scan {
        let lex = &self.lexicon;
        let mut scan = Scan::default();
        let mut modifier = 1.0_f64;
        let mut negated = false;

        for token in tokens {
            if lex.is_negator(token) {
                negated = true;
            } else if let Some(factor) = lex.modifier(token) {
                modifier *= factor;
                continue;
            } else if let Some((polarity, value)) = lex.emotion(token) {
                let mut raw = value * modifier;
                let mut polarity = polarity;
                if negated {
                    raw = -raw;
                    polarity = polarity.flipped();
                    negated = false;
                }
                scan.total += raw;
                scan.hits.push(AnnotatedWord {
                    word: token.clone(),
                    polarity,
                    intensity: raw.abs(),
                    modified: modifier != 1.0,
                });
            }

            modifier = 1.0;
        }

        scan
    }
}

/// Ratio of emotional words plus a small count bonus, capped at 95.
fn confidence(emotional: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = emotional as f64 / total as f64;
    let base = (ratio * 100.0).min(90.0);
    let bonus = (emotional as f64 * 5.0).min(20.0);
    (base + bonus).min(95.0)
}

fn explain(sentiment: SentimentClass, hits: &[AnnotatedWord]) -> String {
    if hits.is_empty() {
        return "No emotional words detected. This text appears to be neutral or factual."
            .to_string();
    }

    let positive = hits
        .iter()
        .filter(|w| w.polarity == Polarity::Positive)
        .count();
    let negative = hits.len() - positive;

    let verdict = match sentiment {
        SentimentClass::Positive => {
            "Overall sentiment is positive because positive words outweigh negative ones."
        }
        SentimentClass::Negative => {
            "Overall sentiment is negative because negative words outweigh positive ones."
        }
        SentimentClass::Neutral => {
            "Sentiment is neutral with balanced or minimal emotional content."
        }
    };

    format!(
        "Found {} emotional word(s): {} positive and {} negative. {}",
        hits.len(),
        positive,
        negative,
        verdict
    )
}

/// Neutral result for empty or whitespace-only input.
pub(crate) fn empty_result(algorithm: Algorithm) -> AnalysisResult {
    let (subjectivity, complexity) = match algorithm {
        Algorithm::Pattern => (None, Some(0.0)),
        _ => (Some(0.0), None),
    };
    AnalysisResult {
        algorithm,
        sentiment: SentimentClass::Neutral,
        score: 0.0,
        confidence: 0,
        emoji: algorithm.emoji(0.0),
        annotated_words: Vec::new(),
        explanation: NO_TEXT.to_string(),
        metrics: Metrics {
            polarity: 0.0,
            intensity: 0.0,
            subjectivity,
            complexity,
        },
        patterns: None,
    }
}
