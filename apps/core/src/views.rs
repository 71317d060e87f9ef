//! View aggregates computed from a store snapshot.
//!
//! These are plain read-side projections; they never touch the store.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{
    Communication, Insight, InsightCategory, IntentType, Priority, SentimentLabel, StoreSnapshot,
};
use crate::payload::AnalysisSummary;

const RECENT_COMMUNICATIONS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Every detected intent counted once, all seven types present.
    pub intent_counts: BTreeMap<IntentType, usize>,
    pub sentiment_counts: SentimentCounts,
    pub total_communications: usize,
    pub total_insights: usize,
    pub high_priority_count: usize,
    pub high_priority_insights: Vec<Insight>,
    /// Up to three latest communications, oldest first.
    pub recent_communications: Vec<Communication>,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        let mut intent_counts: BTreeMap<IntentType, usize> =
            IntentType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut sentiment_counts = SentimentCounts::default();

        for communication in &snapshot.communications {
            for intent in &communication.detected_intents {
                *intent_counts.entry(intent.intent_type).or_insert(0) += 1;
            }
            sentiment_counts.record(communication.sentiment.label());
        }

        let high_priority_insights: Vec<Insight> = snapshot
            .insights
            .iter()
            .filter(|i| i.priority == Priority::High)
            .cloned()
            .collect();

        let skip = snapshot
            .communications
            .len()
            .saturating_sub(RECENT_COMMUNICATIONS);

        Self {
            intent_counts,
            sentiment_counts,
            total_communications: snapshot.communications.len(),
            total_insights: snapshot.insights.len(),
            high_priority_count: high_priority_insights.len(),
            high_priority_insights,
            recent_communications: snapshot.communications[skip..].to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InsightGroup {
    pub count: usize,
    pub insights: Vec<Insight>,
}

impl InsightGroup {
    fn collect(insights: &[Insight], category: InsightCategory) -> Self {
        let insights: Vec<Insight> = insights
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect();
        Self {
            count: insights.len(),
            insights,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsView {
    pub total: usize,
    pub alerts: InsightGroup,
    pub suggestions: InsightGroup,
    pub forecasts: InsightGroup,
    /// Summary of the most recent external analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_summary: Option<AnalysisSummary>,
}

impl InsightsView {
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        Self {
            total: snapshot.insights.len(),
            alerts: InsightGroup::collect(&snapshot.insights, InsightCategory::Alert),
            suggestions: InsightGroup::collect(&snapshot.insights, InsightCategory::Suggestion),
            forecasts: InsightGroup::collect(&snapshot.insights, InsightCategory::Forecast),
            analysis_summary: snapshot.last_analysis.as_ref().map(|a| a.summary.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationView {
    pub loading: bool,
    pub total_communications: usize,
    pub latest: Option<Communication>,
}

impl CommunicationView {
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        Self {
            loading: snapshot.loading,
            total_communications: snapshot.communications.len(),
            latest: snapshot.communications.last().cloned(),
        }
    }
}
