use tokio::sync::oneshot;

use crate::models::{Communication, Insight};
use crate::payload::AnalysisResponse;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Clone)]
pub enum ActorError {
    /// The store actor is no longer running.
    #[error("Store actor unavailable: {0}")]
    Closed(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

/// Contents owned by the store actor.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub communications: Vec<Communication>,
    pub insights: Vec<Insight>,
    pub last_analysis: Option<AnalysisResponse>,
}

/// Messages that can be sent to the store actor.
///
/// Every mutation is a single message, so a mutation is applied entirely or not at all.
#[derive(Debug)]
pub enum StoreMessage {
    /// Append an optional communication and any number of insights in one step.
    Commit {
        communication: Option<Communication>,
        insights: Vec<Insight>,
        /// Replaces the retained analysis response when present.
        analysis: Option<AnalysisResponse>,
        responder: oneshot::Sender<()>,
    },
    /// Rebuild the insight collection from the communications.
    RefreshInsights {
        responder: oneshot::Sender<Vec<Insight>>,
    },
    /// Empty both collections and the retained analysis response.
    ClearAll { responder: oneshot::Sender<()> },
    /// Request a copy of the contents.
    Snapshot {
        responder: oneshot::Sender<StoreState>,
    },
    /// A command to stop the actor.
    Shutdown,
}
