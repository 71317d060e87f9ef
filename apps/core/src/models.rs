use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::payload::AnalysisResponse;

/// Closed set of financial-concern categories a communication can be tagged with.
///
/// Declaration order is the order used by aggregate views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    CashFlowConcern,
    ExpenseReduction,
    InvestmentOpportunity,
    RevenueGrowth,
    BudgetPlanning,
    TaxConsideration,
    DebtManagement,
}

impl IntentType {
    pub const ALL: [IntentType; 7] = [
        IntentType::CashFlowConcern,
        IntentType::ExpenseReduction,
        IntentType::InvestmentOpportunity,
        IntentType::RevenueGrowth,
        IntentType::BudgetPlanning,
        IntentType::TaxConsideration,
        IntentType::DebtManagement,
    ];

    /// Returns the wire label of the intent type
    pub fn label(&self) -> &'static str {
        match self {
            IntentType::CashFlowConcern => "cash_flow_concern",
            IntentType::ExpenseReduction => "expense_reduction",
            IntentType::InvestmentOpportunity => "investment_opportunity",
            IntentType::RevenueGrowth => "revenue_growth",
            IntentType::BudgetPlanning => "budget_planning",
            IntentType::TaxConsideration => "tax_consideration",
            IntentType::DebtManagement => "debt_management",
        }
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One intent detected in a communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedIntent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Strictly below -0.2 is negative, strictly above 0.2 is positive.
    pub fn from_score(score: f64) -> Self {
        if score < -0.2 {
            SentimentLabel::Negative
        } else if score > 0.2 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Polarity of a communication. Only constructible through [`Sentiment::from_score`],
/// so the label always agrees with the score. Deserialization recomputes the label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SentimentRepr")]
pub struct Sentiment {
    score: f64,
    label: SentimentLabel,
}

impl Sentiment {
    /// Clamps `score` to [-1, 1] and derives the label from the clamped value.
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };
        Self {
            score,
            label: SentimentLabel::from_score(score),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }
}

#[derive(Deserialize)]
struct SentimentRepr {
    score: f64,
}

impl From<SentimentRepr> for Sentiment {
    fn from(repr: SentimentRepr) -> Self {
        Sentiment::from_score(repr.score)
    }
}

/// One unit of user-submitted financial text plus its derived intents and sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub id: String,
    /// Raw input, stored verbatim.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub detected_intents: Vec<DetectedIntent>,
    pub sentiment: Sentiment,
}

impl Communication {
    /// Creates a communication with a fresh id and the current time.
    pub fn new(text: String, detected_intents: Vec<DetectedIntent>, sentiment: Sentiment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            timestamp: Utc::now(),
            detected_intents,
            sentiment,
        }
    }

    /// Whether any detected intent is of the given type
    pub fn has_intent(&self, intent_type: IntentType) -> bool {
        self.detected_intents
            .iter()
            .any(|i| i.intent_type == intent_type)
    }

    /// The first detected intent, which drives the icon on the dashboard list.
    pub fn primary_intent(&self) -> Option<&DetectedIntent> {
        self.detected_intents.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Alert,
    Suggestion,
    Forecast,
}

/// Insight priority.
///
/// Locally derived insights only use `Low`/`Medium`/`High`. Insights mapped from an
/// external analysis response carry that response's value verbatim, which may fall
/// outside the closed set and ends up in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(raw),
        }
    }
}

impl From<&str> for Priority {
    fn from(raw: &str) -> Self {
        Priority::from(raw.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived, user-facing alert, suggestion or forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub priority: Priority,
    /// Ids of the communications that produced this insight. Empty for insights
    /// that come from an external analysis response.
    pub related_intent_ids: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Insight {
    /// Creates an insight with a fresh id and the current time.
    pub fn new(
        title: String,
        description: String,
        category: InsightCategory,
        priority: Priority,
        related_intent_ids: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            category,
            priority,
            related_intent_ids,
            timestamp: Utc::now(),
        }
    }
}

/// Read-only copy of the store contents handed to consumers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub communications: Vec<Communication>,
    pub insights: Vec<Insight>,
    /// Most recent external analysis response, if any.
    pub last_analysis: Option<AnalysisResponse>,
    pub loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_label_boundaries() {
        assert_eq!(SentimentLabel::from_score(-0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.2001), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.2001), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_sentiment_clamps() {
        let s = Sentiment::from_score(1.8);
        assert_eq!(s.score(), 1.0);
        assert_eq!(s.label(), SentimentLabel::Positive);

        let s = Sentiment::from_score(-3.0);
        assert_eq!(s.score(), -1.0);
        assert_eq!(s.label(), SentimentLabel::Negative);
    }

    #[test]
    fn test_sentiment_deserialize_recomputes_label() {
        let s: Sentiment = serde_json::from_str(r#"{"score": -0.6, "label": "positive"}"#).unwrap();
        assert_eq!(s.label(), SentimentLabel::Negative);
    }

    #[test]
    fn test_priority_round_trips_unknown_values() {
        let p: Priority = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(p, Priority::Other("critical".to_string()));
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"critical\"");

        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::High);
    }

    #[test]
    fn test_communication_serializes_camel_case() {
        let c = Communication::new(
            "cash flow".to_string(),
            vec![DetectedIntent {
                intent_type: IntentType::CashFlowConcern,
                confidence: 0.85,
                details: None,
            }],
            Sentiment::from_score(0.0),
        );
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["detectedIntents"][0]["type"], "cash_flow_concern");
        assert_eq!(json["sentiment"]["label"], "neutral");
        assert!(json["detectedIntents"][0].get("details").is_none());
    }

    #[test]
    fn test_intent_type_order_matches_declaration() {
        let mut shuffled = vec![
            IntentType::DebtManagement,
            IntentType::CashFlowConcern,
            IntentType::BudgetPlanning,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                IntentType::CashFlowConcern,
                IntentType::BudgetPlanning,
                IntentType::DebtManagement
            ]
        );
    }
}
