use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Communication, Insight, StoreSnapshot};
use crate::payload::{AnalysisResponse, RemoteIntent};

/// Defines the public interface for an external analysis backend.
///
/// This trait abstracts the transport, allowing the HTTP endpoint to be swapped for
/// another backend (or a mock in tests).
#[async_trait]
pub trait AnalysisService: Send + Sync + 'static {
    /// Sends `text` for analysis and returns the decoded response.
    ///
    /// Transport failures, non-success statuses and malformed bodies are all errors.
    async fn analyze(&self, text: &str) -> Result<AnalysisResponse, AppError>;
}

/// Defines the public interface of the communication store.
///
/// The store is the single owner of the communication and insight collections.
/// Consumers read snapshots and call these operations; they never mutate the
/// collections directly. Callers are expected to issue one `append` at a time and
/// to gate new submissions while [`CommunicationStore::is_loading`] is true.
#[async_trait]
pub trait CommunicationStore: Send + Sync + 'static {
    /// Analyzes `text` and appends the resulting communication.
    ///
    /// On error both collections are left untouched.
    async fn append(&self, text: String) -> Result<Communication, AppError>;

    /// Appends one insight per alert and suggestion of `response`.
    /// Does not touch the communication collection.
    async fn append_analysis_result(&self, response: AnalysisResponse) -> Result<Vec<Insight>, AppError>;

    /// Appends a single forecast built from `intent` and the response it belongs to.
    async fn append_forecast(&self, intent: RemoteIntent, result: AnalysisResponse) -> Result<Insight, AppError>;

    /// Empties both collections together. Idempotent.
    async fn clear_all(&self) -> Result<(), AppError>;

    /// Replaces the insight collection with insights derived from the current
    /// communications. Externally appended insights are discarded.
    async fn refresh_insights(&self) -> Result<Vec<Insight>, AppError>;

    /// Returns a copy of the current contents.
    async fn snapshot(&self) -> Result<StoreSnapshot, AppError>;

    /// Whether an append is outstanding.
    fn is_loading(&self) -> bool;
}
