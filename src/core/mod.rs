//! Core reminder logic.
//!
//! This module contains:
//! - Clock: time source and calendar helpers
//! - Factory: record construction and id generation
//! - Views: filtered and time-bucketed projections
//! - Repository: the owned, persisted reminder collection

pub mod clock;
pub mod factory;
pub mod repository;
pub mod seed;
pub mod views;

// Re-export commonly used types
pub use clock::{Clock, DueBucket, ManualClock, SystemClock};
pub use factory::{IdGenerator, SequentialIdGenerator, TimeOrderedIdGenerator};
pub use repository::{ReminderRepository, RepositoryOptions, DEFAULT_STORAGE_KEY};
