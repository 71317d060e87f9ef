//! Built-in demo dataset the dashboard starts with when `FINTENT_SEED_DATA` is set.

use chrono::{Duration, Utc};

use crate::actors::messages::StoreState;
use crate::models::{
    Communication, DetectedIntent, Insight, InsightCategory, IntentType, Priority, Sentiment,
};

fn intent(intent_type: IntentType, confidence: f32, details: &str) -> DetectedIntent {
    DetectedIntent {
        intent_type,
        confidence,
        details: Some(details.to_string()),
    }
}

fn communication(
    id: &str,
    text: &str,
    days_ago: i64,
    detected_intents: Vec<DetectedIntent>,
    score: f64,
) -> Communication {
    Communication {
        id: id.to_string(),
        text: text.to_string(),
        timestamp: Utc::now() - Duration::days(days_ago),
        detected_intents,
        sentiment: Sentiment::from_score(score),
    }
}

fn insight(
    id: &str,
    title: &str,
    description: &str,
    category: InsightCategory,
    priority: Priority,
    related: &str,
) -> Insight {
    Insight {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        priority,
        related_intent_ids: vec![related.to_string()],
        timestamp: Utc::now(),
    }
}

pub fn seed_communications() -> Vec<Communication> {
    vec![
        communication(
            "seed-intent-1",
            "I am concerned about our cash flow for the next quarter. We have several large \
             payments due but our receivables are delayed.",
            7,
            vec![
                intent(
                    IntentType::CashFlowConcern,
                    0.92,
                    "High confidence detection of cash flow concern",
                ),
                intent(
                    IntentType::BudgetPlanning,
                    0.65,
                    "Moderate confidence detection of budget planning need",
                ),
            ],
            -0.6,
        ),
        communication(
            "seed-intent-2",
            "We should look into reducing our operating expenses. I think there are several \
             areas where we can cut costs without affecting our core business.",
            3,
            vec![intent(
                IntentType::ExpenseReduction,
                0.89,
                "High confidence detection of expense reduction intent",
            )],
            0.3,
        ),
        communication(
            "seed-intent-3",
            "I think we should invest in new marketing channels to boost our sales. Our current \
             revenue growth is below our annual targets.",
            1,
            vec![
                intent(
                    IntentType::RevenueGrowth,
                    0.87,
                    "High confidence detection of revenue growth intent",
                ),
                intent(
                    IntentType::InvestmentOpportunity,
                    0.72,
                    "Moderate confidence detection of investment intent",
                ),
            ],
            0.1,
        ),
    ]
}

pub fn seed_insights() -> Vec<Insight> {
    vec![
        insight(
            "seed-insight-1",
            "Cash Flow Risk Alert",
            "Based on recent communications, there appears to be a significant concern about \
             cash flow for the upcoming quarter. Consider reviewing accounts receivable processes \
             and payment schedules to improve liquidity.",
            InsightCategory::Alert,
            Priority::High,
            "seed-intent-1",
        ),
        insight(
            "seed-insight-2",
            "Cost Reduction Opportunity",
            "Communications indicate interest in reducing operating expenses. Consider conducting \
             a cost analysis across departments to identify potential savings opportunities \
             without impacting core business functions.",
            InsightCategory::Suggestion,
            Priority::Medium,
            "seed-intent-2",
        ),
        insight(
            "seed-insight-3",
            "Revenue Growth Strategy Needed",
            "Current revenue growth is reported as below annual targets. Consider developing a \
             comprehensive marketing strategy to explore new channels and boost sales performance \
             in the next quarter.",
            InsightCategory::Forecast,
            Priority::Medium,
            "seed-intent-3",
        ),
    ]
}

/// Initial store contents: the demo communications and insights, no analysis.
pub fn seed_state() -> StoreState {
    StoreState {
        communications: seed_communications(),
        insights: seed_insights(),
        last_analysis: None,
    }
}
