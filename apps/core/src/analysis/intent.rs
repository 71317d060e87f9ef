//! Intent extraction using keyword rules.
//!
//! Each rule owns a set of phrases; a rule fires when the text contains any of them,
//! case-insensitively. Rules are independent and are evaluated in table order, so
//! the output order is deterministic. Pure Rust regex matching, no model required.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{DetectedIntent, IntentType};

/// Confidence of the entry emitted when no rule fires
pub const FALLBACK_CONFIDENCE: f32 = 0.35;

const FALLBACK_DETAILS: &str = "Low confidence detection of financial planning interest";

/// Rule definition for intent matching
struct IntentRule {
    intent_type: IntentType,
    phrases: &'static [&'static str],
    confidence: f32,
    details: &'static str,
}

/// Rule table. Order is significant: it is the order of the detected intents.
const RULES: &[IntentRule] = &[
    IntentRule {
        intent_type: IntentType::CashFlowConcern,
        phrases: &["cash flow", "cashflow", "liquidity"],
        confidence: 0.85,
        details: "Detected concern about business liquidity",
    },
    IntentRule {
        intent_type: IntentType::ExpenseReduction,
        phrases: &["cut costs", "reduce expenses", "spending less"],
        confidence: 0.92,
        details: "Interest in reducing business expenses",
    },
    IntentRule {
        intent_type: IntentType::RevenueGrowth,
        phrases: &["increase sales", "more revenue", "boost income"],
        confidence: 0.78,
        details: "Focus on growing business income",
    },
    IntentRule {
        intent_type: IntentType::BudgetPlanning,
        phrases: &["budget", "financial plan", "forecast"],
        confidence: 0.88,
        details: "Interest in budget planning or forecasting",
    },
];

/// One compiled matcher per rule, same order as `RULES`.
// NOTE: expect() is acceptable here: the patterns are escaped literals and cannot fail to compile.
static RULE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| {
            let alternatives: Vec<String> = rule.phrases.iter().map(|p| regex::escape(p)).collect();
            Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))
                .expect("Invalid regex: escaped intent phrases")
        })
        .collect()
});

/// Keyword rule based intent extractor
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentExtractor;

impl IntentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Detect every intent whose rule fires on `text`.
    ///
    /// Always returns at least one entry: when nothing fires, a single low-confidence
    /// `budget_planning` intent is returned.
    pub fn extract(&self, text: &str) -> Vec<DetectedIntent> {
        let mut intents: Vec<DetectedIntent> = RULES
            .iter()
            .zip(RULE_PATTERNS.iter())
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(rule, _)| DetectedIntent {
                intent_type: rule.intent_type,
                confidence: rule.confidence,
                details: Some(rule.details.to_string()),
            })
            .collect();

        if intents.is_empty() {
            intents.push(DetectedIntent {
                intent_type: IntentType::BudgetPlanning,
                confidence: FALLBACK_CONFIDENCE,
                details: Some(FALLBACK_DETAILS.to_string()),
            });
        }

        intents
    }
}
