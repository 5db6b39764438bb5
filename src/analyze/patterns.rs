//! Surface-pattern analyzer: punctuation, casing, repetition and emoticons.
//!
//! Always works on the original text, never on the contrast clause the lexicon
//! scorer narrows to. Feature counts are plain scans; the score is a fixed
//! linear blend clamped to [-1, 1].

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::analyze::scorer::empty_result;
use crate::lexicon::Lexicon;
use crate::sentiment::{round2, to_percent, Algorithm, AnalysisResult, Metrics, SentimentClass};
use crate::text::{sentences, words};

/// Class cut-off for the standalone pattern analyzer.
pub const CLASS_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternFeatureSet {
    pub exclamation_marks: usize,
    pub question_marks: usize,
    pub ellipsis: usize,
    pub all_caps_words: usize,
    pub capitalized_words: usize,
    pub repeated_punctuation: usize,
    pub repeated_letters: usize,
    pub repeated_words: usize,
    pub positive_emoticons: usize,
    pub negative_emoticons: usize,
    pub average_word_length: f64,
    pub sentence_count: usize,
    pub profanity: usize,
    pub intensive_adverbs: usize,
    pub comparatives: usize,
}

impl PatternFeatureSet {
    pub fn extract(text: &str, lexicon: &Lexicon) -> Self {
        let ws = words(text);
        let lower = text.to_lowercase();

        Self {
            exclamation_marks: text.matches('!').count(),
            question_marks: text.matches('?').count(),
            ellipsis: count_runs(text, |c| c == '.', 2),
            all_caps_words: ws
                .iter()
                .filter(|w| w.len() >= 2 && w.bytes().all(|b| b.is_ascii_uppercase()))
                .count(),
            capitalized_words: ws.iter().filter(|w| is_capitalized(w)).count(),
            repeated_punctuation: count_runs(text, |c| c == '!' || c == '?', 2),
            repeated_letters: count_repeated_units(text, 3),
            repeated_words: repeated_words(&ws),
            positive_emoticons: count_glyphs(text, lexicon.positive_emoticons()),
            negative_emoticons: count_glyphs(text, lexicon.negative_emoticons()),
            average_word_length: average_len(&ws),
            sentence_count: sentences(text).len(),
            profanity: count_present(&lower, lexicon.profanity()),
            intensive_adverbs: count_present(&lower, lexicon.intensive_adverbs()),
            comparatives: count_present(&lower, lexicon.comparatives()),
        }
    }

    pub fn has_emoticons(&self) -> bool {
        self.positive_emoticons + self.negative_emoticons > 0
    }

    /// Fixed linear blend of the indicators, clamped to [-1, 1].
    pub fn score(&self) -> f64 {
        let f = |n: usize| n as f64;
        let score = 0.15 * f(self.exclamation_marks) + 0.4 * f(self.positive_emoticons)
            + 0.2 * f(self.intensive_adverbs)
            - 0.4 * f(self.negative_emoticons)
            - 0.3 * f(self.profanity)
            - 0.1 * f(self.ellipsis)
            + 0.05 * f(self.question_marks)
            + 0.1 * f(self.all_caps_words)
            + 0.1 * f(self.repeated_punctuation)
            + 0.1 * f(self.repeated_letters);
        score.clamp(-1.0, 1.0)
    }

    /// Mean weighted count over the indicator categories present, plus a length
    /// bonus, capped at 85.
    pub fn confidence(&self, text_len: usize) -> f64 {
        let indicators = [
            (self.exclamation_marks, 1.0),
            (self.positive_emoticons, 2.0),
            (self.negative_emoticons, 2.0),
            (self.all_caps_words, 1.0),
            (self.repeated_punctuation, 1.0),
            (self.profanity, 2.0),
        ];

        let (sum, hits) = indicators
            .iter()
            .filter(|(n, _)| *n > 0)
            .fold((0.0, 0usize), |(sum, hits), (n, w)| {
                (sum + *n as f64 * w, hits + 1)
            });

        let base = if hits > 0 {
            sum / hits as f64 * 20.0
        } else {
            10.0
        };
        let length_bonus = (text_len as f64 / 100.0).min(1.0) * 20.0;
        (base + length_bonus).min(85.0)
    }

    pub fn complexity(&self) -> f64 {
        let factors = [
            self.question_marks as f64,
            self.ellipsis as f64,
            self.comparatives as f64,
            (self.average_word_length / 10.0).min(1.0),
        ];
        round2(factors.iter().sum::<f64>() / factors.len() as f64)
    }

    fn explain(&self, sentiment: SentimentClass) -> String {
        let mut found = Vec::new();
        if self.positive_emoticons > 0 {
            found.push(format!("{} positive emoticon(s)", self.positive_emoticons));
        }
        if self.negative_emoticons > 0 {
            found.push(format!("{} negative emoticon(s)", self.negative_emoticons));
        }
        if self.exclamation_marks > 0 {
            found.push(format!(
                "{} exclamation mark(s) indicating excitement",
                self.exclamation_marks
            ));
        }
        if self.all_caps_words > 0 {
            found.push(format!(
                "{} capitalized word(s) showing emphasis",
                self.all_caps_words
            ));
        }
        if self.repeated_punctuation > 0 {
            found.push("repeated punctuation showing strong emotion".to_string());
        }

        let mut out = String::from("Pattern analysis detected: ");
        if found.is_empty() {
            out.push_str("minimal emotional patterns. ");
        } else {
            out.push_str(&found.join(", "));
            out.push_str(". ");
        }
        out.push_str(match sentiment {
            SentimentClass::Positive => "The overall pattern suggests positive sentiment.",
            SentimentClass::Negative => "The overall pattern suggests negative sentiment.",
            SentimentClass::Neutral => "The patterns indicate neutral sentiment.",
        });
        out
    }
}

#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::shared_default())
    }
}

impl PatternAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        if text.trim().is_empty() {
            return empty_result(Algorithm::Pattern);
        }

        let features = PatternFeatureSet::extract(text, &self.lexicon);
        let raw = features.score();
        let score = round2(raw);
        let confidence = features.confidence(text.encode_utf16().count());
        let sentiment = SentimentClass::from_score(raw, CLASS_THRESHOLD);

        AnalysisResult {
            algorithm: Algorithm::Pattern,
            sentiment,
            score,
            confidence: to_percent(confidence),
            emoji: Algorithm::Pattern.emoji(raw),
            annotated_words: Vec::new(),
            explanation: features.explain(sentiment),
            metrics: Metrics {
                polarity: score,
                intensity: score.abs(),
                subjectivity: None,
                complexity: Some(features.complexity()),
            },
            patterns: Some(features),
        }
    }
}

/* ----------------------------
Counting helpers
---------------------------- */

/// Maximal runs of chars satisfying `pred` with length >= `min`.
fn count_runs(text: &str, pred: impl Fn(char) -> bool, min: usize) -> usize {
    let mut count = 0;
    let mut run = 0;
    for c in text.chars() {
        if pred(c) {
            run += 1;
        } else {
            if run >= min {
                count += 1;
            }
            run = 0;
        }
    }
    if run >= min {
        count += 1;
    }
    count
}

/// Runs of `min`+ identical consecutive UTF-16 units. Line terminators end a
/// run and never start one; a surrogate pair never repeats unit by unit.
fn count_repeated_units(text: &str, min: usize) -> usize {
    const LINE_BREAKS: [u16; 4] = [0x0A, 0x0D, 0x2028, 0x2029];
    let mut count = 0;
    let mut prev: Option<u16> = None;
    let mut run = 0;
    for u in text.encode_utf16() {
        if Some(u) == prev {
            run += 1;
            continue;
        }
        if run >= min {
            count += 1;
        }
        if LINE_BREAKS.contains(&u) {
            prev = None;
            run = 0;
        } else {
            prev = Some(u);
            run = 1;
        }
    }
    if run >= min {
        count += 1;
    }
    count
}

/// Uppercase letter directly followed by a lowercase one at a word start.
fn is_capitalized(word: &str) -> bool {
    let b = word.as_bytes();
    b.len() >= 2 && b[0].is_ascii_uppercase() && b[1].is_ascii_lowercase()
}

/// Distinct (case-insensitive) words that occur more than once.
fn repeated_words(ws: &[&str]) -> usize {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for w in ws {
        *seen.entry(w.to_ascii_lowercase()).or_insert(0) += 1;
    }
    seen.values().filter(|&&n| n > 1).count()
}

/// Non-overlapping occurrences of every glyph, summed.
fn count_glyphs(text: &str, glyphs: &[String]) -> usize {
    glyphs.iter().map(|g| text.matches(g.as_str()).count()).sum()
}

/// Number of list entries that appear anywhere in `lower`.
fn count_present(lower: &str, list: &[String]) -> usize {
    list.iter().filter(|w| lower.contains(w.as_str())).count()
}

fn average_len(ws: &[&str]) -> f64 {
    if ws.is_empty() {
        return 0.0;
    }
    ws.iter().map(|w| w.len()).sum::<usize>() as f64 / ws.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(text: &str) -> PatternFeatureSet {
        PatternFeatureSet::extract(text, &Lexicon::shared_default())
    }

    #[test]
    fn counts_expressive_patterns() {
        let f = features("WOW!!! This is sooo good :) :)");
        assert_eq!(f.exclamation_marks, 3);
        assert_eq!(f.repeated_punctuation, 1);
        assert_eq!(f.all_caps_words, 1);
        assert_eq!(f.capitalized_words, 1);
        // "!!!" and "ooo"
        assert_eq!(f.repeated_letters, 2);
        assert_eq!(f.positive_emoticons, 2);
        assert_eq!(f.negative_emoticons, 0);
        assert_eq!(f.sentence_count, 2);
    }

    #[test]
    fn counts_negative_patterns() {
        let f = features("This is damn awful... :( :(");
        assert_eq!(f.negative_emoticons, 2);
        assert_eq!(f.profanity, 1);
        assert_eq!(f.ellipsis, 1);
        assert!((f.score() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_words_are_distinct_and_case_insensitive() {
        let f = features("Go go GO, stop stop, wait");
        assert_eq!(f.repeated_words, 2);
    }

    #[test]
    fn emoji_glyphs_are_counted() {
        let f = features("Best day ever 🎉🎉 but then 😢");
        assert_eq!(f.positive_emoticons, 2);
        assert_eq!(f.negative_emoticons, 1);
        assert_eq!(f.comparatives, 1);
    }

    #[test]
    fn average_word_length_and_complexity() {
        let f = features("Is it more or less?");
        // words: Is it more or less → 14 / 5
        assert!((f.average_word_length - 2.8).abs() < 1e-9);
        assert_eq!(f.question_marks, 1);
        assert_eq!(f.comparatives, 2);
        // (1 + 0 + 2 + 0.28) / 4 = 0.82
        assert!((f.complexity() - 0.82).abs() < 1e-9);
    }

    #[test]
    fn confidence_without_indicators_uses_floor() {
        let f = features("Plain words");
        // base 10 + 11 chars → 2.2
        assert!((f.confidence(11) - 12.2).abs() < 1e-9);
    }

    #[test]
    fn repeated_runs_count_utf16_units() {
        // each emoji is a surrogate pair, so no unit repeats
        assert_eq!(features("😊😊😊").repeated_letters, 0);
        assert_eq!(features("aaa\r\r\r\n\n\nbbbb").repeated_letters, 2);
        assert_eq!(count_repeated_units("zzzzzz", 3), 1);
    }

    #[test]
    fn length_bonus_counts_utf16_units() {
        // 25 emoji outside every list: floor 10 + 50 units / 100 * 20
        let r = PatternAnalyzer::default().analyze(&"😐".repeat(25));
        assert_eq!(r.confidence, 20);
    }

    #[test]
    fn confidence_averages_present_indicators() {
        let f = features("Great :)!");
        // exclam 1 (x1), positive 1 (x2) → (1 + 2) / 2 * 20 = 30; 9 chars → 1.8
        assert!((f.confidence(9) - 31.8).abs() < 1e-9);
    }

    #[test]
    fn analyzer_scores_and_reports() {
        let r = PatternAnalyzer::default().analyze("WOW!!! This is sooo good :) :)");
        assert_eq!(r.sentiment, SentimentClass::Positive);
        assert!((r.score - 1.0).abs() < 1e-9);
        assert!(r.explanation.contains("2 positive emoticon(s)"));
        assert!(r.explanation.ends_with("The overall pattern suggests positive sentiment."));
        assert!(r.patterns.is_some());
        assert!(r.annotated_words.is_empty());
    }

    #[test]
    fn plain_text_is_neutral() {
        let r = PatternAnalyzer::default().analyze("The meeting is at 2 PM.");
        // "PM" counts as an all-caps word: 0.1 stays under the class cut-off
        assert_eq!(r.sentiment, SentimentClass::Neutral);
        assert!((r.score - 0.1).abs() < 1e-9);
        assert_eq!(
            r.explanation,
            "Pattern analysis detected: 1 capitalized word(s) showing emphasis. \
             The patterns indicate neutral sentiment."
        );
    }

    #[test]
    fn empty_input_short_circuits() {
        let r = PatternAnalyzer::default().analyze("  ");
        assert_eq!(r.sentiment, SentimentClass::Neutral);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.confidence, 0);
        assert_eq!(r.explanation, "No text provided");
    }
}
