//! Communication Analyzer - orchestrates intent extraction and sentiment scoring.

use serde::Serialize;
use tracing::debug;

use super::intent::IntentExtractor;
use super::sentiment::SentimentScorer;
use crate::models::{Communication, DetectedIntent, Sentiment};

/// Output of [`CommunicationAnalyzer::extract`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub intents: Vec<DetectedIntent>,
    pub sentiment: Sentiment,
}

/// Turns raw text into a [`Communication`]. Total over every input string.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommunicationAnalyzer {
    intent_extractor: IntentExtractor,
    sentiment_scorer: SentimentScorer,
}

impl CommunicationAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_extractor: IntentExtractor::new(),
            sentiment_scorer: SentimentScorer::new(),
        }
    }

    /// Detect intents and sentiment of `text`
    pub fn extract(&self, text: &str) -> Extraction {
        Extraction {
            intents: self.intent_extractor.extract(text),
            sentiment: self.sentiment_scorer.score(text),
        }
    }

    /// Analyze `text` into a brand-new communication with a fresh id and timestamp.
    pub fn analyze(&self, text: &str) -> Communication {
        let Extraction { intents, sentiment } = self.extract(text);
        let communication = Communication::new(text.to_string(), intents, sentiment);
        debug!(
            id = %communication.id,
            intents = communication.detected_intents.len(),
            sentiment = ?communication.sentiment.label(),
            "Communication analyzed"
        );
        communication
    }
}
