//! Insight generation.
//!
//! Two sources feed the insight collection:
//! - local derivation: one aggregate insight per rule whose intent type appears in
//!   at least one communication, recomputed from scratch on every call
//! - external mapping: every alert and suggestion of an analysis response becomes
//!   one insight, plus explicit forecasts built from a single remote intent

use crate::models::{Communication, Insight, InsightCategory, IntentType, Priority};
use crate::payload::{AnalysisResponse, RemoteIntent};

/// Rule definition for aggregate insight derivation
struct InsightRule {
    intent_type: IntentType,
    title: &'static str,
    description: &'static str,
    category: InsightCategory,
    priority: Priority,
}

fn rules() -> [InsightRule; 2] {
    [
        InsightRule {
            intent_type: IntentType::CashFlowConcern,
            title: "Cash Flow Alert",
            description: "Based on recent communications, there appears to be a concern about cash flow. \
                          Consider reviewing accounts receivable and upcoming expenses.",
            category: InsightCategory::Alert,
            priority: Priority::High,
        },
        InsightRule {
            intent_type: IntentType::ExpenseReduction,
            title: "Expense Reduction Opportunity",
            description: "Communications indicate a desire to reduce expenses. \
                          Consider conducting a cost analysis to identify potential savings.",
            category: InsightCategory::Suggestion,
            priority: Priority::Medium,
        },
    ]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Derive the full insight set from `communications`.
    ///
    /// Not incremental: the result depends only on the input, and ids/timestamps are
    /// the only fields that differ between two calls on the same input.
    pub fn generate(&self, communications: &[Communication]) -> Vec<Insight> {
        rules()
            .into_iter()
            .filter_map(|rule| {
                let related: Vec<String> = communications
                    .iter()
                    .filter(|c| c.has_intent(rule.intent_type))
                    .map(|c| c.id.clone())
                    .collect();

                if related.is_empty() {
                    return None;
                }

                Some(Insight::new(
                    rule.title.to_string(),
                    rule.description.to_string(),
                    rule.category,
                    rule.priority,
                    related,
                ))
            })
            .collect()
    }

    /// Map the alerts and suggestions of an external response, alerts first.
    ///
    /// Severity and priority are copied verbatim.
    pub fn from_analysis(&self, response: &AnalysisResponse) -> Vec<Insight> {
        let intents = &response.financial_intents;

        let alerts = intents.alerts.iter().map(|alert| {
            Insight::new(
                alert.message.clone(),
                describe(&[("Impact", &alert.impact), ("Recommendation", &alert.recommendation)]),
                InsightCategory::Alert,
                Priority::from(alert.severity.as_str()),
                Vec::new(),
            )
        });

        let suggestions = intents.suggestions.iter().map(|suggestion| {
            Insight::new(
                suggestion.message.clone(),
                describe(&[
                    ("Benefit", &suggestion.benefit),
                    ("Implementation", &suggestion.implementation),
                ]),
                InsightCategory::Suggestion,
                Priority::from(suggestion.priority.as_str()),
                Vec::new(),
            )
        });

        alerts.chain(suggestions).collect()
    }

    /// Build one forecast from a remote intent and the response it came with.
    ///
    /// Priority is the intent's urgency level, unchecked.
    pub fn forecast(&self, intent: &RemoteIntent, result: &AnalysisResponse) -> Insight {
        let overall = format!("overall urgency {}", result.summary.overall_urgency);
        Insight::new(
            intent.description.clone(),
            describe(&[
                ("Impact", &intent.impact),
                ("Timeline", &intent.timeline),
                ("Outlook", &overall),
            ]),
            InsightCategory::Forecast,
            Priority::from(intent.urgency_level.as_str()),
            Vec::new(),
        )
    }
}

/// Joins the non-empty labelled parts as "Label: value." sentences.
fn describe(parts: &[(&str, &String)]) -> String {
    parts
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("{}: {}.", label, value.trim().trim_end_matches('.')))
        .collect::<Vec<_>>()
        .join(" ")
}
