//! Domain types for echoremind.
//!
//! This module contains the core data structures:
//! - Reminder: the persisted task record
//! - ReminderFormData / ReminderPatch: create and update input
//! - Category, priority and their display tables

pub mod category;
pub mod priority;
pub mod reminder;

use thiserror::Error;

// Re-export commonly used types
pub use category::{CategoryFilter, ReminderCategory, Theme};
pub use priority::ReminderPriority;
pub use reminder::{Reminder, ReminderFormData, ReminderPatch};

/// Errors raised while building or parsing reminder input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
