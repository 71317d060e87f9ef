//! # Analysis Module
//!
//! Fast, rule-based analysis of financial communications.
//! Runs locally and synchronously; the store calls it on every append.
//!
//! ## Components
//! - `intent`: keyword rule table producing typed intents
//! - `sentiment`: bag-of-words polarity score
//! - `insights`: aggregate insights from communications or from an external response
//! - `analyzer`: orchestrator producing a `Communication`

pub mod analyzer;
pub mod insights;
pub mod intent;
pub mod sentiment;

pub use analyzer::{CommunicationAnalyzer, Extraction};
pub use insights::InsightGenerator;
pub use intent::IntentExtractor;
pub use sentiment::SentimentScorer;
