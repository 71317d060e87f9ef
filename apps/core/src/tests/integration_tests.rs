//! Integration Tests
//!
//! End-to-end workflows: configuration, HTTP client and store wired together
//! against a mock analysis endpoint.

use crate::actors::store::{AnalysisSource, StoreHandle};
use crate::actors::traits::CommunicationStore;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{InsightCategory, IntentType, Priority};
use crate::remote::HttpAnalysisClient;
use crate::views::{DashboardView, InsightsView};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fixtures
// ============================================================================

fn analysis_body() -> serde_json::Value {
    json!({
        "financial_intents": {
            "detected_intents": [{
                "description": "Reduce software subscriptions",
                "urgency_level": "medium",
                "urgency_score": 0.55,
                "timeline": "this quarter",
                "impact": "Lower monthly spend"
            }],
            "expenditures": [{
                "type": "software",
                "amount": "$1,200",
                "timeline": "monthly",
                "description": "SaaS licences"
            }],
            "revenue_actions": [
                "Raise prices for new customers",
                {"type": "upsell", "target": "enterprise", "timeline": "Q4", "description": "Premium tier"}
            ],
            "alerts": [{
                "message": "Runway below six months",
                "severity": "critical",
                "impact": "Hiring freeze likely",
                "recommendation": "Cut discretionary spend"
            }],
            "suggestions": [{
                "message": "Consolidate vendors",
                "benefit": "Volume discounts",
                "implementation": "Review contracts in June",
                "priority": "high"
            }],
            "financial_topics": ["costs", "runway"],
            "action_items": ["Audit subscriptions"]
        },
        "summary": {
            "total_intents": 1,
            "high_urgency_intents": 0,
            "total_alerts": 1,
            "total_suggestions": 1,
            "overall_urgency": "medium"
        }
    })
}

/// Builds a remote store the way the binary does, pointed at `server`.
fn remote_store_for(server: &MockServer) -> StoreHandle {
    let url = format!("{}/analyze", server.uri());
    let config = temp_env::with_vars(
        [
            ("FINTENT_ANALYSIS_MODE", Some("remote")),
            ("FINTENT_ANALYSIS_URL", Some(url.as_str())),
            ("FINTENT_HTTP_TIMEOUT_SECS", Some("5")),
        ],
        AppConfig::from_env,
    )
    .expect("Failed to load config");

    let client = HttpAnalysisClient::from_config(&config).expect("Failed to build client");
    StoreHandle::new(AnalysisSource::Remote(Arc::new(client)))
}

// ============================================================================
// Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_remote_append_end_to_end() {
    // 1. Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&mock_server)
        .await;
    let store = remote_store_for(&mock_server);

    // 2. Act
    let communication = store
        .append("We need to cut costs on software".to_string())
        .await
        .unwrap();

    // 3. Assert
    assert!(communication.has_intent(IntentType::ExpenseReduction));
    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.communications.len(), 1);
    assert_eq!(snapshot.insights.len(), 2);
    assert_eq!(snapshot.insights[0].title, "Runway below six months");
    assert_eq!(snapshot.insights[0].priority, Priority::Other("critical".to_string()));
    assert_eq!(snapshot.insights[1].priority, Priority::High);

    let dashboard = DashboardView::from_snapshot(&snapshot);
    assert_eq!(dashboard.high_priority_count, 1);
    let insights = InsightsView::from_snapshot(&snapshot);
    assert_eq!(insights.analysis_summary.unwrap().overall_urgency, "medium");
}

#[tokio::test]
async fn test_forecast_from_last_analysis() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .mount(&mock_server)
        .await;
    let store = remote_store_for(&mock_server);

    store.append("budget for software".to_string()).await.unwrap();
    let analysis = store.snapshot().await.unwrap().last_analysis.unwrap();
    let intent = analysis.financial_intents.detected_intents[0].clone();
    let forecast = store.append_forecast(intent, analysis).await.unwrap();

    assert_eq!(forecast.category, InsightCategory::Forecast);
    assert_eq!(forecast.priority, Priority::Medium);
    assert_eq!(forecast.title, "Reduce software subscriptions");
    assert_eq!(store.snapshot().await.unwrap().insights.len(), 3);
}

#[tokio::test]
async fn test_remote_failures_leave_store_untouched() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": {} })))
        .mount(&mock_server)
        .await;
    let store = remote_store_for(&mock_server);

    store.append("cash flow".to_string()).await.unwrap();
    let before = store.snapshot().await.unwrap();

    let bad_status = store.append("liquidity".to_string()).await;
    let bad_body = store.append("liquidity".to_string()).await;

    assert!(matches!(bad_status, Err(AppError::RemoteStatus { status: 502, .. })));
    assert!(matches!(bad_body, Err(AppError::Decode(_))));
    let after = store.snapshot().await.unwrap();
    assert_eq!(after.communications, before.communications);
    assert_eq!(after.insights, before.insights);
    assert_eq!(after.last_analysis, before.last_analysis);
    assert!(!after.loading);
}
