//! Voice memo handling.
//!
//! Speech-to-text happens elsewhere; this module starts from the transcribed
//! text:
//!
//! 1. **Capture**: a cancellable processing task wrapping a finished recording
//! 2. **Interpreter**: keyword rules that turn the text into reminder fields
//!
//! ```text
//! recording → transcription → VoiceProcessingTask → interpret → ReminderFormData
//!                                    ↓ (cancel)
//!                                 nothing
//! ```

pub mod capture;
pub mod interpreter;

// Re-export key types
pub use capture::{process_transcription, CaptureOutcome, VoiceCapture, VoiceProcessingTask};
pub use interpreter::{interpret, VoiceInterpretation};
