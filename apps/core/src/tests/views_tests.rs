//! View Aggregate Tests

use crate::actors::store::{AnalysisSource, StoreHandle};
use crate::actors::traits::CommunicationStore;
use crate::models::{IntentType, InsightCategory, StoreSnapshot};
use crate::seed;
use crate::tests::store_tests::sample_response;
use crate::views::{CommunicationView, DashboardView, InsightsView, SentimentCounts};

fn seeded_snapshot() -> StoreSnapshot {
    let state = seed::seed_state();
    StoreSnapshot {
        communications: state.communications,
        insights: state.insights,
        last_analysis: state.last_analysis,
        loading: false,
    }
}

#[test]
fn test_dashboard_counts_every_detected_intent() {
    let view = DashboardView::from_snapshot(&seeded_snapshot());

    assert_eq!(view.intent_counts[&IntentType::CashFlowConcern], 1);
    assert_eq!(view.intent_counts[&IntentType::BudgetPlanning], 1);
    assert_eq!(view.intent_counts[&IntentType::ExpenseReduction], 1);
    assert_eq!(view.intent_counts[&IntentType::RevenueGrowth], 1);
    assert_eq!(view.intent_counts[&IntentType::InvestmentOpportunity], 1);
    assert_eq!(view.intent_counts[&IntentType::TaxConsideration], 0);
    assert_eq!(view.intent_counts[&IntentType::DebtManagement], 0);
    assert_eq!(view.intent_counts.values().sum::<usize>(), 5);
    assert_eq!(view.total_communications, 3);
}

#[test]
fn test_dashboard_sentiment_and_priority() {
    let view = DashboardView::from_snapshot(&seeded_snapshot());

    assert_eq!(
        view.sentiment_counts,
        SentimentCounts {
            positive: 1,
            neutral: 1,
            negative: 1,
        }
    );
    assert_eq!(view.total_insights, 3);
    assert_eq!(view.high_priority_count, 1);
    assert_eq!(view.high_priority_insights[0].id, "seed-insight-1");
}

#[tokio::test]
async fn test_dashboard_keeps_three_latest() {
    let store = StoreHandle::with_state(AnalysisSource::Local, seed::seed_state());
    let latest = store.append("Debt is growing".to_string()).await.unwrap();

    let view = DashboardView::from_snapshot(&store.snapshot().await.unwrap());

    let ids: Vec<&str> = view
        .recent_communications
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["seed-intent-2", "seed-intent-3", latest.id.as_str()]);
}

#[test]
fn test_insights_grouped_by_category() {
    let mut snapshot = seeded_snapshot();
    snapshot.last_analysis = Some(sample_response());

    let view = InsightsView::from_snapshot(&snapshot);

    assert_eq!(view.total, 3);
    assert_eq!(view.alerts.count, 1);
    assert_eq!(view.suggestions.count, 1);
    assert_eq!(view.forecasts.count, 1);
    assert_eq!(view.forecasts.insights[0].category, InsightCategory::Forecast);
    assert_eq!(
        view.analysis_summary.map(|s| s.overall_urgency),
        Some("high".to_string())
    );
}

#[test]
fn test_insights_view_without_analysis_omits_summary() {
    let view = InsightsView::from_snapshot(&seeded_snapshot());
    let json = serde_json::to_value(&view).unwrap();

    assert!(json.get("analysisSummary").is_none());
    assert_eq!(json["alerts"]["count"], 1);
}

#[test]
fn test_communication_view_reports_latest() {
    let view = CommunicationView::from_snapshot(&seeded_snapshot());

    assert!(!view.loading);
    assert_eq!(view.total_communications, 3);
    assert_eq!(view.latest.map(|c| c.id), Some("seed-intent-3".to_string()));
}
