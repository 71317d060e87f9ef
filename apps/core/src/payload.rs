//! Wire schema of the external analysis endpoint.
//!
//! The response is decoded into explicit types; a body missing `financial_intents`
//! or `summary` (or a required field inside them) fails to decode instead of leaking
//! untyped JSON into the store.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AnalysisRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub financial_intents: FinancialIntents,
    pub summary: AnalysisSummary,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialIntents {
    #[serde(default)]
    pub detected_intents: Vec<RemoteIntent>,
    #[serde(default)]
    pub expenditures: Vec<Expenditure>,
    #[serde(default)]
    pub revenue_actions: Vec<RevenueAction>,
    #[serde(default)]
    pub alerts: Vec<RemoteAlert>,
    #[serde(default)]
    pub suggestions: Vec<RemoteSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_details: Option<String>,
    #[serde(default)]
    pub financial_topics: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
}

/// A free-form intent as described by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteIntent {
    pub description: String,
    /// Usually "low", "medium" or "high"; passed through unchecked.
    pub urgency_level: String,
    #[serde(default)]
    pub urgency_score: f64,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expenditure {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub description: String,
}

/// Revenue actions arrive either as plain notes or as structured objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RevenueAction {
    Note(String),
    Detailed(RevenueActionDetail),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueActionDetail {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAlert {
    pub message: String,
    pub severity: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSuggestion {
    pub message: String,
    pub priority: String,
    #[serde(default)]
    pub benefit: String,
    #[serde(default)]
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_intents: usize,
    pub high_urgency_intents: usize,
    pub total_alerts: usize,
    pub total_suggestions: usize,
    pub overall_urgency: String,
}
