//! Voice memo command.
//!
//! `echoremind voice <transcription...>` runs the same flow as stopping a
//! recording in the app: a short processing delay (cancellable with Ctrl-C),
//! interpretation of the text, then a new reminder.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use super::{open_repository, summary_line};
use crate::config::ResolvedConfig;
use crate::core::clock::format_due_date;
use crate::core::Clock;
use crate::voice::interpreter::has_time_phrase;
use crate::voice::{CaptureOutcome, VoiceCapture, VoiceProcessingTask};

/// Execute the voice command
pub async fn execute(
    config: &ResolvedConfig,
    clock: Arc<dyn Clock>,
    transcription: String,
    audio_uri: Option<String>,
    delay_ms: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let delay = delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.voice_processing_delay);

    let mut capture = VoiceCapture::new(transcription.clone());
    if let Some(uri) = audio_uri {
        capture = capture.with_audio_uri(uri);
    }

    println!("🎙  Processing: \"{}\"", transcription);

    let task = VoiceProcessingTask::spawn(capture, clock.clone(), delay);
    let cancel = task.cancellation_token();
    let outcome = tokio::select! {
        result = task.join() => result.context("Voice processing task failed")?,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            CaptureOutcome::Cancelled
        }
    };

    let form = match outcome {
        CaptureOutcome::Ready(form) => form,
        CaptureOutcome::Cancelled => {
            println!("Cancelled, no reminder created");
            return Ok(());
        }
    };

    let now = clock.now();
    println!();
    println!("Interpretation:");
    println!("  Title:     {}", form.title);
    println!("  Category:  {}", form.category.label());
    println!("  Priority:  {}", form.priority.label());
    println!("  Due:       {}", format_due_date(form.due_date.as_ref(), &now));
    if form.due_date.is_none() && has_time_phrase(&transcription) {
        println!("  (time ignored: say \"today\", \"tomorrow\" or a weekday to schedule it)");
    }

    if dry_run {
        println!();
        println!("Dry run, nothing saved");
        return Ok(());
    }

    // Same submit check as the create form
    form.validate()
        .context("Couldn't derive a title from the transcription")?;

    let mut repo = open_repository(config, clock);
    let id = repo.create(form);
    info!(id = %id, "Voice reminder created");

    println!();
    if let Some(reminder) = repo.lookup_by_id(&id) {
        println!("✅ Created reminder");
        println!("{}", summary_line(reminder, &repo));
    }

    Ok(())
}
