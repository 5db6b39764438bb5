//! Text-level context features for the ensemble: size, vocabulary richness,
//! discourse clues and how sentiment moves across sentences.

use std::collections::HashSet;

use serde::Serialize;

use crate::analyze::scorer::LexiconScorer;
use crate::text::{sentences, words};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Progression {
    Improving,
    Declining,
    #[default]
    Stable,
}

impl Progression {
    pub fn as_str(self) -> &'static str {
        match self {
            Progression::Improving => "improving",
            Progression::Declining => "declining",
            Progression::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub average_sentence_length: f64,
    pub complexity_score: f64,
    pub contextual_clues: Vec<String>,
    pub emotional_progression: Progression,
}

impl ContextFeatures {
    /// `progression_threshold` is the mean shift between the two halves of the
    /// text needed to call it improving or declining.
    pub fn extract(text: &str, scorer: &LexiconScorer, progression_threshold: f64) -> Self {
        let ws = words(text);
        let sents = sentences(text);

        let average_sentence_length = if sents.is_empty() {
            0.0
        } else {
            ws.len() as f64 / sents.len() as f64
        };

        Self {
            word_count: ws.len(),
            sentence_count: sents.len(),
            average_sentence_length,
            complexity_score: complexity(&ws),
            contextual_clues: clues(text, scorer),
            emotional_progression: progression(&sents, scorer, progression_threshold),
        }
    }
}

/// Average word length / 10 plus the unique-word ratio.
fn complexity(ws: &[&str]) -> f64 {
    if ws.is_empty() {
        return 0.0;
    }
    let n = ws.len() as f64;
    let avg_len = ws.iter().map(|w| w.len()).sum::<usize>() as f64 / n;
    let unique: HashSet<String> = ws.iter().map(|w| w.to_ascii_lowercase()).collect();
    avg_len / 10.0 + unique.len() as f64 / n
}

fn clues(text: &str, scorer: &LexiconScorer) -> Vec<String> {
    scorer
        .lexicon()
        .clues()
        .iter()
        .filter(|rule| rule.matches(text))
        .map(|rule| rule.tag.clone())
        .collect()
}

/// Score each sentence on its own and compare the first half against the second.
fn progression(sents: &[&str], scorer: &LexiconScorer, threshold: f64) -> Progression {
    if sents.len() < 2 {
        return Progression::Stable;
    }

    let scores: Vec<f64> = sents.iter().map(|s| scorer.analyze(s).score).collect();
    let (first, second) = scores.split_at(scores.len() / 2);
    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;

    let change = mean(second) - mean(first);
    if change > threshold {
        Progression::Improving
    } else if change < -threshold {
        Progression::Declining
    } else {
        Progression::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(text: &str) -> ContextFeatures {
        ContextFeatures::extract(text, &LexiconScorer::default(), 0.2)
    }

    #[test]
    fn counts_and_ratios() {
        let c = ctx("The cat sat. The cat ran.");
        assert_eq!(c.word_count, 6);
        assert_eq!(c.sentence_count, 2);
        assert!((c.average_sentence_length - 3.0).abs() < 1e-9);
        // avg len 3 → 0.3; unique {the, cat, sat, ran} = 4/6
        assert!((c.complexity_score - (0.3 + 4.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn clues_follow_configured_order() {
        let c = ctx("We will definitely win tomorrow, I think");
        assert_eq!(
            c.contextual_clues,
            vec!["future-oriented", "high-certainty", "social-context", "personal-context"]
        );
    }

    #[test]
    fn past_and_low_certainty_clues() {
        let c = ctx("maybe it was fine yesterday");
        assert_eq!(c.contextual_clues, vec!["past-oriented", "low-certainty"]);
    }

    #[test]
    fn clues_need_whole_words() {
        let c = ctx("Ourselves aside, the weary wanderer");
        assert!(c.contextual_clues.is_empty());
    }

    #[test]
    fn improving_and_declining() {
        let up = ctx("I hate this. It is terrible. Now it is good. I love it.");
        assert_eq!(up.emotional_progression, Progression::Improving);

        let down = ctx("I love it. It is good. Now it is terrible. I hate this.");
        assert_eq!(down.emotional_progression, Progression::Declining);
    }

    #[test]
    fn odd_sentence_count_floor_splits() {
        // [0.5] vs [0.5, -0.9] → -0.2 - 0.5 = -0.7
        let c = ctx("It is good. It is good. It is terrible.");
        assert_eq!(c.emotional_progression, Progression::Declining);
    }

    #[test]
    fn single_sentence_is_stable() {
        assert_eq!(ctx("I hate it but love it").emotional_progression, Progression::Stable);
        assert_eq!(ctx("").emotional_progression, Progression::Stable);
        assert_eq!(ctx("").average_sentence_length, 0.0);
    }
}
