//! Vocabulary resource: emotion lexicon, modifiers, negators, emoticons and the
//! keyword lists used by the pattern and context extractors.
//!
//! The default vocabulary ships as `data/lexicon.json` and is embedded at build
//! time. Alternates can be loaded from a file (`SENTIMENT_LEXICON_PATH`) or a
//! string. Once built, a `Lexicon` is never mutated and is shared via `Arc`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::error::SentimentError;
use crate::sentiment::Polarity;

pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";

static DEFAULT_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../data/lexicon.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid embedded lexicon"))
});

/* ----------------------------
Document schema (JSON)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
struct LexiconDoc {
    positive: HashMap<String, f64>,
    negative: HashMap<String, f64>,
    #[serde(default)]
    intensifiers: HashMap<String, f64>,
    #[serde(default)]
    diminishers: HashMap<String, f64>,
    #[serde(default)]
    negators: Vec<String>,
    #[serde(default)]
    positive_emoticons: Vec<String>,
    #[serde(default)]
    negative_emoticons: Vec<String>,
    #[serde(default)]
    profanity: Vec<String>,
    #[serde(default)]
    intensive_adverbs: Vec<String>,
    #[serde(default)]
    comparatives: Vec<String>,
    #[serde(default)]
    contrast_markers: Vec<String>,
    #[serde(default)]
    contextual_clues: Vec<ClueDoc>,
}

#[derive(Debug, Clone, Deserialize)]
struct ClueDoc {
    tag: String,
    keywords: Vec<String>,
}

/* ----------------------------
Compiled vocabulary
---------------------------- */

/// A discourse tag triggered by whole-word keyword presence.
#[derive(Debug)]
pub struct ClueRule {
    pub tag: String,
    re: Regex,
}

impl ClueRule {
    pub fn matches(&self, text: &str) -> bool {
        self.re.is_match(text)
    }
}

#[derive(Debug)]
pub struct Lexicon {
    positive: HashMap<String, f64>,
    negative: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    diminishers: HashMap<String, f64>,
    negators: HashSet<String>,
    positive_emoticons: Vec<String>,
    negative_emoticons: Vec<String>,
    profanity: Vec<String>,
    intensive_adverbs: Vec<String>,
    comparatives: Vec<String>,
    contrast_markers: Vec<String>,
    clues: Vec<ClueRule>,
}

impl Lexicon {
    /// Shared handle to the embedded default vocabulary.
    pub fn shared_default() -> Arc<Lexicon> {
        Arc::clone(&DEFAULT_LEXICON)
    }

    /// Vocabulary from `SENTIMENT_LEXICON_PATH` if set, else the embedded default.
    pub fn from_env() -> anyhow::Result<Arc<Lexicon>> {
        match std::env::var(ENV_LEXICON_PATH) {
            Ok(p) if !p.trim().is_empty() => {
                let path = PathBuf::from(p);
                let lex = Self::from_path(&path)?;
                info!(target: "sentiment", path = %path.display(), "loaded custom lexicon");
                Ok(Arc::new(lex))
            }
            _ => Ok(Self::shared_default()),
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read lexicon at {}: {}", path.display(), e)
        })?;
        Ok(Self::from_json_str(&content)?)
    }

    /// Parse and validate a vocabulary document.
    ///
    /// Keys are lower-cased. Positive intensities must lie in (0, 1], negative in
    /// [-1, 0); intensifiers must be > 1 and diminishers in (0, 1).
    pub fn from_json_str(raw: &str) -> Result<Self, SentimentError> {
        let doc: LexiconDoc = serde_json::from_str(raw)?;

        let positive = checked_table("positive", doc.positive, |v| v > 0.0 && v <= 1.0)?;
        let negative = checked_table("negative", doc.negative, |v| (-1.0..0.0).contains(&v))?;
        let intensifiers = checked_table("intensifiers", doc.intensifiers, |v| v > 1.0)?;
        let diminishers = checked_table("diminishers", doc.diminishers, |v| v > 0.0 && v < 1.0)?;

        let clues = doc
            .contextual_clues
            .into_iter()
            .map(|c| {
                if c.keywords.is_empty() {
                    return Err(SentimentError::Config(format!(
                        "contextual clue `{}` has no keywords",
                        c.tag
                    )));
                }
                let alternation = c
                    .keywords
                    .iter()
                    .map(|k| regex::escape(k.trim()))
                    .collect::<Vec<_>>()
                    .join("|");
                // ASCII word boundaries, like the tokenizer's notion of a word char
                let re = Regex::new(&format!(r"(?i)(?-u:\b)(?:{})(?-u:\b)", alternation))
                    .map_err(|e| {
                        SentimentError::Config(format!("contextual clue `{}`: {}", c.tag, e))
                    })?;
                Ok(ClueRule { tag: c.tag, re })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            positive,
            negative,
            intensifiers,
            diminishers,
            negators: lowered(doc.negators).into_iter().collect(),
            positive_emoticons: non_empty(doc.positive_emoticons),
            negative_emoticons: non_empty(doc.negative_emoticons),
            profanity: lowered(doc.profanity),
            intensive_adverbs: lowered(doc.intensive_adverbs),
            comparatives: lowered(doc.comparatives),
            contrast_markers: lowered(doc.contrast_markers),
            clues,
        })
    }

    /// Lexicon hit for a lower-case token. Positive entries win over negative ones.
    pub fn emotion(&self, token: &str) -> Option<(Polarity, f64)> {
        if let Some(&v) = self.positive.get(token) {
            return Some((Polarity::Positive, v));
        }
        self.negative
            .get(token)
            .map(|&v| (Polarity::Negative, v))
    }

    /// Multiplier for an intensifier or diminisher (intensifiers checked first).
    pub fn modifier(&self, token: &str) -> Option<f64> {
        self.intensifiers
            .get(token)
            .or_else(|| self.diminishers.get(token))
            .copied()
    }

    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    pub fn positive_emoticons(&self) -> &[String] {
        &self.positive_emoticons
    }

    pub fn negative_emoticons(&self) -> &[String] {
        &self.negative_emoticons
    }

    pub fn profanity(&self) -> &[String] {
        &self.profanity
    }

    pub fn intensive_adverbs(&self) -> &[String] {
        &self.intensive_adverbs
    }

    pub fn comparatives(&self) -> &[String] {
        &self.comparatives
    }

    pub fn contrast_markers(&self) -> &[String] {
        &self.contrast_markers
    }

    pub fn clues(&self) -> &[ClueRule] {
        &self.clues
    }
}

fn checked_table(
    name: &str,
    table: HashMap<String, f64>,
    valid: impl Fn(f64) -> bool,
) -> Result<HashMap<String, f64>, SentimentError> {
    table
        .into_iter()
        .map(|(k, v)| {
            if !v.is_finite() || !valid(v) {
                return Err(SentimentError::Config(format!(
                    "{} entry `{}` has out-of-range value {}",
                    name, k, v
                )));
            }
            Ok((k.trim().to_lowercase(), v))
        })
        .collect()
}

fn lowered(v: Vec<String>) -> Vec<String> {
    non_empty(v.into_iter().map(|s| s.to_lowercase()).collect())
}

fn non_empty(v: Vec<String>) -> Vec<String> {
    v.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_loads() {
        let lex = Lexicon::shared_default();
        assert_eq!(lex.emotion("perfect"), Some((Polarity::Positive, 1.0)));
        assert_eq!(lex.emotion("terrible"), Some((Polarity::Negative, -0.9)));
        assert_eq!(lex.emotion("table"), None);
        assert_eq!(lex.modifier("very"), Some(1.5));
        assert_eq!(lex.modifier("slightly"), Some(0.5));
        assert!(lex.is_negator("don't"));
        assert_eq!(lex.contrast_markers().len(), 5);
        assert_eq!(lex.clues().len(), 6);
    }

    #[test]
    fn clue_rules_match_whole_words_only() {
        let lex = Lexicon::shared_default();
        let future = lex
            .clues()
            .iter()
            .find(|c| c.tag == "future-oriented")
            .unwrap();
        assert!(future.matches("See you TOMORROW"));
        assert!(!future.matches("The willow tree"));
    }

    #[test]
    fn clue_boundaries_are_ascii() {
        let lex = Lexicon::shared_default();
        let social = lex
            .clues()
            .iter()
            .find(|c| c.tag == "social-context")
            .unwrap();
        // non-ASCII letters do not count as word chars
        assert!(social.matches("éweé"));
        assert!(!social.matches("Weary"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let raw = r#"{"positive": {"good": 1.5}, "negative": {}}"#;
        let err = Lexicon::from_json_str(raw).unwrap_err();
        assert!(matches!(err, SentimentError::Config(_)));

        let raw = r#"{"positive": {}, "negative": {}, "diminishers": {"bit": 1.2}}"#;
        assert!(Lexicon::from_json_str(raw).is_err());
    }

    #[test]
    fn minimal_document_defaults_optional_tables() {
        let raw = r#"{"positive": {"Sunny": 0.4}, "negative": {"gloomy": -0.4}}"#;
        let lex = Lexicon::from_json_str(raw).unwrap();
        assert_eq!(lex.emotion("sunny"), Some((Polarity::Positive, 0.4)));
        assert!(lex.modifier("very").is_none());
        assert!(lex.clues().is_empty());
    }
}
