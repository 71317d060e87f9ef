//! Bag-of-words sentiment scoring.
//!
//! Every term present in the text moves the score by a fixed step, negative terms
//! down and positive terms up. Presence counts once per term. The sum is clamped to
//! [-1, 1]. No weighting, negation handling or context.

use crate::models::Sentiment;

/// Score change contributed by one matching term
pub const SENTIMENT_STEP: f64 = 0.2;

const NEGATIVE_TERMS: &[&str] = &[
    "worried",
    "concerned",
    "problem",
    "issue",
    "trouble",
    "difficult",
    "bad",
    "decrease",
    "loss",
];

const POSITIVE_TERMS: &[&str] = &[
    "opportunity",
    "increase",
    "growth",
    "improve",
    "good",
    "great",
    "excellent",
    "profit",
    "success",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let lower = text.to_lowercase();
        let mut score = 0.0;

        for term in NEGATIVE_TERMS {
            if lower.contains(term) {
                score -= SENTIMENT_STEP;
            }
        }
        for term in POSITIVE_TERMS {
            if lower.contains(term) {
                score += SENTIMENT_STEP;
            }
        }

        Sentiment::from_score(score)
    }
}
