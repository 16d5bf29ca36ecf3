//! Voice capture processing as a cancellable task.
//!
//! After a recording stops, the transcription goes through a short
//! "processing" delay before it is interpreted. The delay runs as a spawned
//! task racing a [`CancellationToken`]: cancel it (the user navigated away,
//! hit Ctrl-C) and no reminder is produced. Creating the reminder is left to
//! the caller, which keeps the repository contract a plain synchronous
//! `create`.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::interpreter::interpret;
use crate::core::Clock;
use crate::domain::ReminderFormData;

/// A finished recording waiting to be processed
#[derive(Debug, Clone)]
pub struct VoiceCapture {
    /// Text produced by the (external) speech-to-text step
    pub transcription: String,

    /// Where the audio was stored, if anywhere
    pub audio_uri: Option<String>,
}

impl VoiceCapture {
    pub fn new(transcription: impl Into<String>) -> Self {
        Self {
            transcription: transcription.into(),
            audio_uri: None,
        }
    }

    pub fn with_audio_uri(mut self, audio_uri: impl Into<String>) -> Self {
        self.audio_uri = Some(audio_uri.into());
        self
    }
}

/// How processing ended
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Interpreted and ready to hand to the repository
    Ready(ReminderFormData),

    /// Cancelled before the delay elapsed
    Cancelled,
}

/// Wait out `delay`, then interpret the capture against the clock's current
/// time. Returns early with [`CaptureOutcome::Cancelled`] if `cancel` fires.
pub async fn process_transcription<Tz>(
    capture: VoiceCapture,
    clock: Arc<dyn Clock<Tz>>,
    delay: Duration,
    cancel: CancellationToken,
) -> CaptureOutcome
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            debug!("Voice processing cancelled");
            CaptureOutcome::Cancelled
        }
        _ = tokio::time::sleep(delay) => {
            let interpretation = interpret(&capture.transcription, &clock.now());
            debug!(
                title = %interpretation.title,
                category = %interpretation.category,
                priority = %interpretation.priority,
                "Voice capture interpreted"
            );

            let mut form = interpretation.into_form_data(capture.transcription);
            form.audio_uri = capture.audio_uri;
            CaptureOutcome::Ready(form)
        }
    }
}

/// Handle to a spawned processing task
pub struct VoiceProcessingTask {
    handle: JoinHandle<CaptureOutcome>,
    cancel: CancellationToken,
}

impl VoiceProcessingTask {
    /// Spawn processing on the current Tokio runtime
    pub fn spawn<Tz>(capture: VoiceCapture, clock: Arc<dyn Clock<Tz>>, delay: Duration) -> Self
    where
        Tz: TimeZone + Send + Sync + 'static,
        Tz::Offset: Send + Sync,
    {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(process_transcription(
            capture,
            clock,
            delay,
            cancel.clone(),
        ));
        Self { handle, cancel }
    }

    /// Token that cancels this task when triggered
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn join(self) -> Result<CaptureOutcome, JoinError> {
        self.handle.await
    }
}
