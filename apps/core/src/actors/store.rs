use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument};

use crate::actors::messages::{ActorError, StoreMessage, StoreState};
use crate::actors::traits::{AnalysisService, CommunicationStore};
use crate::analysis::{CommunicationAnalyzer, InsightGenerator};
use crate::error::AppError;
use crate::models::{Communication, Insight, StoreSnapshot};
use crate::payload::{AnalysisResponse, RemoteIntent};

// --- Constants ---
const STORE_CHANNEL_CAPACITY: usize = 32;
const STORE_REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Where appended text gets analyzed.
#[derive(Clone)]
pub enum AnalysisSource {
    /// Local keyword rules only.
    Local,
    /// The external analysis endpoint. Its alerts and suggestions are appended
    /// together with the communication.
    Remote(Arc<dyn AnalysisService>),
}

impl std::fmt::Debug for AnalysisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisSource::Local => f.write_str("Local"),
            AnalysisSource::Remote(_) => f.write_str("Remote"),
        }
    }
}

/// A handle to the store actor.
///
/// This struct provides a public, cloneable interface to the single store actor that
/// owns the communication and insight collections. Analysis (local or remote) runs on
/// the caller's task; only the finished result is sent to the actor, so snapshots stay
/// available while an append is waiting on the network.
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreMessage>,
    source: AnalysisSource,
    analyzer: CommunicationAnalyzer,
    generator: InsightGenerator,
    in_flight: Arc<AtomicUsize>,
}

impl StoreHandle {
    /// Creates an empty store and returns a handle to it.
    ///
    /// This will spawn the `StoreRunner` in a new Tokio task.
    pub fn new(source: AnalysisSource) -> Self {
        Self::with_state(source, StoreState::default())
    }

    /// Creates a store preloaded with `state` and returns a handle to it.
    ///
    /// # Arguments
    ///
    /// * `source` - Where appended text gets analyzed.
    /// * `state` - Initial contents, e.g. the demo dataset.
    pub fn with_state(source: AnalysisSource, state: StoreState) -> Self {
        let (sender, receiver) = mpsc::channel(STORE_CHANNEL_CAPACITY);
        let runner = StoreRunner::new(receiver, state);
        tokio::spawn(async move { runner.run().await });
        info!(?source, "Store handle created");
        Self {
            sender,
            source,
            analyzer: CommunicationAnalyzer::new(),
            generator: InsightGenerator::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Stops the actor. Later calls on any clone of this handle fail with `ActorError::Closed`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(StoreMessage::Shutdown)
            .await
            .map_err(|e| ActorError::Closed(e.to_string()))?;
        Ok(())
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> StoreMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::Closed(e.to_string()))?;
        let reply = timeout(STORE_REPLY_TIMEOUT, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(|e| ActorError::Internal(e.to_string()))?;
        Ok(reply)
    }

    async fn commit(
        &self,
        communication: Option<Communication>,
        insights: Vec<Insight>,
        analysis: Option<AnalysisResponse>,
    ) -> Result<(), AppError> {
        self.request(|responder| StoreMessage::Commit {
            communication,
            insights,
            analysis,
            responder,
        })
        .await
    }
}

/// Keeps the loading count raised for as long as it lives.
///
/// Dropping it on success, on error, or when the append future is cancelled
/// lowers the count again.
struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingGuard {
    fn engage(in_flight: &Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight: Arc::clone(in_flight),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommunicationStore for StoreHandle {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn append(&self, text: String) -> Result<Communication, AppError> {
        let _loading = LoadingGuard::engage(&self.in_flight);

        let (communication, insights, analysis) = match &self.source {
            AnalysisSource::Local => (self.analyzer.analyze(&text), Vec::new(), None),
            AnalysisSource::Remote(service) => {
                let response = service
                    .analyze(&text)
                    .await
                    .inspect_err(|e| error!("External analysis failed: {}", e))?;
                let insights = self.generator.from_analysis(&response);
                (self.analyzer.analyze(&text), insights, Some(response))
            }
        };

        self.commit(Some(communication.clone()), insights, analysis)
            .await
            .inspect_err(|e| error!("Failed to store communication: {}", e))?;

        info!(id = %communication.id, "Communication appended");
        Ok(communication)
    }

    #[instrument(skip(self, response))]
    async fn append_analysis_result(&self, response: AnalysisResponse) -> Result<Vec<Insight>, AppError> {
        let insights = self.generator.from_analysis(&response);
        self.commit(None, insights.clone(), Some(response))
            .await
            .inspect_err(|e| error!("Failed to store analysis insights: {}", e))?;
        info!(count = insights.len(), "Analysis insights appended");
        Ok(insights)
    }

    #[instrument(skip(self, intent, result))]
    async fn append_forecast(&self, intent: RemoteIntent, result: AnalysisResponse) -> Result<Insight, AppError> {
        let forecast = self.generator.forecast(&intent, &result);
        self.commit(None, vec![forecast.clone()], None)
            .await
            .inspect_err(|e| error!("Failed to store forecast: {}", e))?;
        Ok(forecast)
    }

    #[instrument(skip(self))]
    async fn clear_all(&self) -> Result<(), AppError> {
        self.request(|responder| StoreMessage::ClearAll { responder })
            .await
    }

    #[instrument(skip(self))]
    async fn refresh_insights(&self) -> Result<Vec<Insight>, AppError> {
        self.request(|responder| StoreMessage::RefreshInsights { responder })
            .await
    }

    async fn snapshot(&self) -> Result<StoreSnapshot, AppError> {
        let state = self
            .request(|responder| StoreMessage::Snapshot { responder })
            .await?;
        Ok(StoreSnapshot {
            communications: state.communications,
            insights: state.insights,
            last_analysis: state.last_analysis,
            loading: self.is_loading(),
        })
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

// --- Actor Runner (Internal Logic) ---
struct StoreRunner {
    receiver: mpsc::Receiver<StoreMessage>,
    state: StoreState,
    generator: InsightGenerator,
}

impl StoreRunner {
    fn new(receiver: mpsc::Receiver<StoreMessage>, state: StoreState) -> Self {
        Self {
            receiver,
            state,
            generator: InsightGenerator::new(),
        }
    }

    async fn run(mut self) {
        info!(
            communications = self.state.communications.len(),
            insights = self.state.insights.len(),
            "Store started"
        );
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        info!("Store stopped");
    }

    /// Applies one message. Returns `false` when the actor should stop.
    fn handle_message(&mut self, msg: StoreMessage) -> bool {
        match msg {
            StoreMessage::Commit {
                communication,
                insights,
                analysis,
                responder,
            } => {
                if let Some(communication) = communication {
                    self.state.communications.push(communication);
                }
                self.state.insights.extend(insights);
                if analysis.is_some() {
                    self.state.last_analysis = analysis;
                }
                let _ = responder.send(());
            }
            StoreMessage::RefreshInsights { responder } => {
                self.state.insights = self.generator.generate(&self.state.communications);
                info!(count = self.state.insights.len(), "Insights regenerated");
                let _ = responder.send(self.state.insights.clone());
            }
            StoreMessage::ClearAll { responder } => {
                self.state = StoreState::default();
                info!("Store cleared");
                let _ = responder.send(());
            }
            StoreMessage::Snapshot { responder } => {
                let _ = responder.send(self.state.clone());
            }
            StoreMessage::Shutdown => {
                info!("Store shutting down...");
                return false;
            }
        }
        true
    }
}
