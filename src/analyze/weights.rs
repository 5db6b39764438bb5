//! Adaptive ensemble weights.
//!
//! Plain text trusts the lexicon (0.7 / 0.3). Expressive text, meaning any listed
//! emoticon/emoji or an `!`, splits evenly (0.5 / 0.5), and short expressive text
//! leans on surface patterns (0.4 / 0.6).

use serde::{Deserialize, Serialize};

use crate::config::WeightsSection;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub lexicon: f64,
    pub pattern: f64,
}

impl Weights {
    pub const fn new(lexicon: f64, pattern: f64) -> Self {
        Self { lexicon, pattern }
    }

    /// Finite, non-negative and summing to at most 1, so `tanh` of the
    /// combination stays well inside (-1, 1) even after rounding.
    pub(crate) fn is_valid(&self) -> bool {
        self.lexicon.is_finite()
            && self.pattern.is_finite()
            && self.lexicon >= 0.0
            && self.pattern >= 0.0
            && self.lexicon + self.pattern <= 1.0 + 1e-9
    }

    /// Weighted linear combination of the two sub-scores (pre-activation).
    #[inline]
    pub fn combine(&self, lexicon_score: f64, pattern_score: f64) -> f64 {
        lexicon_score * self.lexicon + pattern_score * self.pattern
    }
}

/// Text traits the weighting depends on.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextTraits {
    pub has_emoticons: bool,
    pub has_exclamation: bool,
    pub word_count: usize,
}

impl WeightsSection {
    /// Pick the weight pair for a text.
    pub fn select(&self, traits: &TextTraits) -> Weights {
        let expressive = traits.has_emoticons || traits.has_exclamation;
        if !expressive {
            self.base
        } else if traits.word_count < self.short_text_words {
            self.short_expressive
        } else {
            self.expressive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_uses_base_weights() {
        let w = WeightsSection::default().select(&TextTraits {
            word_count: 3,
            ..Default::default()
        });
        assert_eq!(w, Weights::new(0.7, 0.3));
    }

    #[test]
    fn expressive_text_splits_evenly_unless_short() {
        let section = WeightsSection::default();
        let long = TextTraits {
            has_exclamation: true,
            word_count: 10,
            ..Default::default()
        };
        assert_eq!(section.select(&long), Weights::new(0.5, 0.5));

        let short = TextTraits {
            has_emoticons: true,
            word_count: 9,
            ..Default::default()
        };
        assert_eq!(section.select(&short), Weights::new(0.4, 0.6));
    }

    #[test]
    fn weights_must_not_exceed_unit_sum() {
        assert!(Weights::new(0.7, 0.3).is_valid());
        assert!(Weights::new(0.2, 0.2).is_valid());
        assert!(!Weights::new(0.6, 0.6).is_valid());
        assert!(!Weights::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn combine_is_linear() {
        let w = Weights::new(0.7, 0.3);
        assert!((w.combine(1.0, -1.0) - 0.4).abs() < 1e-12);
    }
}
