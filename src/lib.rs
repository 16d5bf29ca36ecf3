//! echoremind - voice memo reminders
//!
//! The library behind the echoremind app: it turns transcribed voice memos
//! into structured reminders and keeps the reminder collection with its list
//! and agenda views.
//!
//! # Architecture
//!
//! - The interpreter is a pure function from text (and "now") to reminder
//!   fields; it never fails
//! - The repository owns the collection, persists it to a blob store after
//!   every change and computes views fresh on every read
//! - Time comes from an injected clock, so everything runs against a fixed
//!   instant in tests
//!
//! # Modules
//!
//! - `domain`: Data structures (Reminder, form data, category, priority)
//! - `core`: Clock, record factory, views and the repository
//! - `voice`: Transcription interpreter and cancellable capture task
//! - `storage`: Blob stores and the persisted layout
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Turn a transcription into a reminder
//! echoremind voice "Remind me to call John about the project tomorrow at 3 PM"
//!
//! # Browse
//! echoremind list --category work
//! echoremind agenda
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod voice;

// Re-export main types at crate root for convenience
pub use crate::core::{Clock, ManualClock, ReminderRepository, RepositoryOptions, SystemClock};
pub use crate::domain::{
    CategoryFilter, Reminder, ReminderCategory, ReminderFormData, ReminderPatch, ReminderPriority,
};
pub use crate::storage::{BlobStore, FileBlobStore, MemoryBlobStore, PersistedState};
pub use crate::voice::{interpret, VoiceInterpretation};
