//! Speech input.
//!
//! Two contracts sit at this seam, both implemented by an external speech service:
//! - [`SpeechRecognizer`]: continuous recognition. The recognizer pushes
//!   [`SpeechEvent`]s into a channel until the stop signal fires.
//! - [`FileTranscriber`]: one-shot transcription of an uploaded audio file with
//!   progress reporting.
//!
//! [`RecordingSession`] drives a recognizer and keeps the transcript;
//! [`transcribe_file`] wraps a transcriber with the upload checks.

use async_trait::async_trait;
use futures::stream::{self, Stream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::AppError;

const SPEECH_CHANNEL_CAPACITY: usize = 64;
const PROGRESS_CHANNEL_CAPACITY: usize = 16;

/// Highest progress value forwarded before the transcriber has actually succeeded.
const MAX_PENDING_PROGRESS: u8 = 99;
pub const PROGRESS_COMPLETE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Interim hypothesis. Never changes the transcript.
    Recognizing(String),
    /// Final text for one utterance.
    Recognized(String),
    /// The recognizer started (`true`) or stopped (`false`) processing audio.
    Processing(bool),
    /// Recognition ended early. `error` is set when it ended because of a failure.
    Canceled { error: Option<String> },
}

/// Continuous speech recognition.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Emits events into `events` until `stop` changes or recognition ends on its own.
    ///
    /// Implementations should return once the stop signal is observed; the session
    /// treats the event channel closing as the end of the stream.
    async fn recognize(
        &self,
        events: mpsc::Sender<SpeechEvent>,
        stop: watch::Receiver<bool>,
    ) -> Result<(), AppError>;
}

/// One-shot transcription of an audio file.
#[async_trait]
pub trait FileTranscriber: Send + Sync {
    /// Transcribes `audio`, reporting percentages (0-100) on `progress`.
    async fn transcribe(&self, audio: Vec<u8>, progress: mpsc::Sender<u8>)
        -> Result<String, AppError>;
}

/// Stops a recording session. Cloneable so a UI can hold it separately from the session.
#[derive(Clone)]
pub struct StopHandle {
    recording: Arc<AtomicBool>,
    signal: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Ends the recording. Returns `true` only for the call that actually flipped
    /// the recording flag; every later call is a no-op.
    pub fn stop(&self) -> bool {
        if self.recording.swap(false, Ordering::SeqCst) {
            let _ = self.signal.send(true);
            info!("Recording stopped");
            true
        } else {
            false
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }
}

/// A running recognition session.
pub struct RecordingSession {
    events: mpsc::Receiver<SpeechEvent>,
    stop: StopHandle,
    transcript: Option<String>,
    cancel_error: Option<String>,
    task: JoinHandle<Result<(), AppError>>,
}

impl RecordingSession {
    /// Spawns `recognizer` and starts recording.
    pub fn start(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        let (event_tx, events) = mpsc::channel(SPEECH_CHANNEL_CAPACITY);
        let (signal, stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move { recognizer.recognize(event_tx, stop_rx).await });
        info!("Recording started");
        Self {
            events,
            stop: StopHandle {
                recording: Arc::new(AtomicBool::new(true)),
                signal: Arc::new(signal),
            },
            transcript: None,
            cancel_error: None,
            task,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.stop.is_recording()
    }

    /// The latest final segment, if any has been recognized yet.
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Receives the next event and applies it to the session.
    ///
    /// Returns `None` once the recognizer has finished and every event was consumed.
    pub async fn next_event(&mut self) -> Option<SpeechEvent> {
        let event = match self.events.recv().await {
            Some(event) => event,
            None => {
                self.stop.stop();
                return None;
            }
        };

        match &event {
            SpeechEvent::Recognizing(_) => {}
            SpeechEvent::Recognized(text) => {
                self.transcript = Some(text.clone());
            }
            SpeechEvent::Processing(false) => {
                self.stop.stop();
            }
            SpeechEvent::Processing(true) => {}
            SpeechEvent::Canceled { error } => {
                if let Some(e) = error {
                    error!("Speech recognition canceled: {}", e);
                    self.cancel_error = Some(e.clone());
                }
                self.stop.stop();
            }
        }
        Some(event)
    }

    /// Turns the session into a stream of its events.
    pub fn into_stream(self) -> impl Stream<Item = SpeechEvent> {
        stream::unfold(self, |mut session| async move {
            let event = session.next_event().await?;
            Some((event, session))
        })
    }

    /// Waits for the recognizer to finish and returns the final transcript.
    ///
    /// Call [`StopHandle::stop`] first unless the recognizer ends on its own.
    pub async fn finish(mut self) -> Result<String, AppError> {
        while self.next_event().await.is_some() {}

        match self.task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Speech recognizer failed: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Speech recognizer task panicked: {}", e);
                return Err(AppError::Internal(e.to_string()));
            }
        }

        if let Some(e) = self.cancel_error {
            return Err(AppError::Speech(e));
        }
        Ok(self.transcript.unwrap_or_default())
    }
}

/// Transcribes an uploaded audio file.
///
/// Progress values are forwarded to `progress` capped at 99 while the transcriber
/// runs; 100 is sent once, and only when transcription succeeded.
pub async fn transcribe_file(
    transcriber: &dyn FileTranscriber,
    audio: Vec<u8>,
    progress: mpsc::Sender<u8>,
) -> Result<String, AppError> {
    if audio.is_empty() {
        return Err(AppError::Validation("Audio file is empty".to_string()));
    }

    let (inner_tx, mut inner_rx) = mpsc::channel::<u8>(PROGRESS_CHANNEL_CAPACITY);
    let forward = async {
        while let Some(value) = inner_rx.recv().await {
            let _ = progress.send(value.min(MAX_PENDING_PROGRESS)).await;
        }
    };

    let (result, ()) = tokio::join!(transcriber.transcribe(audio, inner_tx), forward);

    match result {
        Ok(text) => {
            let _ = progress.send(PROGRESS_COMPLETE).await;
            info!(chars = text.len(), "Audio file transcribed");
            Ok(text)
        }
        Err(e) => {
            error!("Audio transcription failed: {}", e);
            Err(match e {
                AppError::Speech(_) | AppError::Validation(_) => e,
                other => AppError::Speech(other.to_string()),
            })
        }
    }
}
