//! Ensemble arithmetic: saturating score fusion and agreement-calibrated
//! confidence.
//!
//! Score      = tanh(w_lexicon * lexicon + w_pattern * pattern)
//! Confidence = mean * (0.7 + 0.3 * agreement) + length bonus, capped at 95,
//! where agreement = 1 - |c_lexicon - c_pattern| / 100.

use super::Weights;

/// Sub-analyzer outputs fed into the ensemble.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreInputs {
    pub lexicon_score: f64,
    pub pattern_score: f64,
    /// Percent, [0, 100].
    pub lexicon_confidence: f64,
    /// Percent, [0, 100].
    pub pattern_confidence: f64,
}

impl ScoreInputs {
    /// Safe constructor with clamping.
    pub fn new(lexicon_score: f64, pattern_score: f64, lexicon_conf: f64, pattern_conf: f64) -> Self {
        Self {
            lexicon_score: lexicon_score.clamp(-1.0, 1.0),
            pattern_score: pattern_score.clamp(-1.0, 1.0),
            lexicon_confidence: lexicon_conf.clamp(0.0, 100.0),
            pattern_confidence: pattern_conf.clamp(0.0, 100.0),
        }
    }
}

/// Weighted sum squashed by `tanh`, so the result stays inside (-1, 1).
pub fn combined_score(inputs: &ScoreInputs, w: &Weights) -> f64 {
    w.combine(inputs.lexicon_score, inputs.pattern_score).tanh()
}

/// Confidence boosted by agreement between the two sub-confidences.
pub fn combined_confidence(inputs: &ScoreInputs, word_count: usize) -> f64 {
    let (lc, pc) = (inputs.lexicon_confidence, inputs.pattern_confidence);
    let agreement = 1.0 - (lc - pc).abs() / 100.0;
    let average = (lc + pc) / 2.0;
    let adjusted = average * (0.7 + 0.3 * agreement);
    let length_bonus = (word_count as f64 / 50.0).min(0.15);
    (adjusted + length_bonus * 100.0).min(95.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tanh_bounds_extreme_sums() {
        let inputs = ScoreInputs::new(1.0, 1.0, 95.0, 85.0);
        let s = combined_score(&inputs, &Weights::new(0.7, 0.3));
        assert!((s - 1.0f64.tanh()).abs() < 1e-12);
        assert!(s < 1.0);
    }

    #[test]
    fn full_agreement_keeps_average() {
        let inputs = ScoreInputs::new(0.0, 0.0, 40.0, 40.0);
        // no length bonus with zero words
        assert!((combined_confidence(&inputs, 0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn disagreement_discounts_confidence() {
        let inputs = ScoreInputs::new(0.0, 0.0, 80.0, 20.0);
        // avg 50, agreement 0.4 → 50 * 0.82 = 41, plus 5 words → 10
        assert!((combined_confidence(&inputs, 5) - 51.0).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_capped() {
        let inputs = ScoreInputs::new(0.0, 0.0, 100.0, 100.0);
        assert!((combined_confidence(&inputs, 500) - 95.0).abs() < 1e-9);
    }
}
