//! Reminder records and the form data used to create or edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReminderCategory, ReminderError, ReminderPriority};

/// A user task with scheduling, category and priority metadata.
///
/// Records are never edited in place by callers: every mutation goes through
/// the repository, which swaps in a new value with a fresh `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Opaque identity, assigned at creation and never reassigned
    pub id: String,

    /// Display title
    pub title: String,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub category: ReminderCategory,

    /// Absolute point in time the reminder is due (absent = unscheduled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub priority: ReminderPriority,

    /// Reference to an externally stored audio asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_uri: Option<String>,

    /// Text derived from voice input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// The mutable fields of this record, as form data
    pub fn to_form_data(&self) -> ReminderFormData {
        ReminderFormData {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            due_date: self.due_date,
            priority: self.priority,
            audio_uri: self.audio_uri.clone(),
            transcription: self.transcription.clone(),
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio_uri.is_some()
    }
}

/// Input for creating a reminder. Not persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderFormData {
    pub title: String,
    pub description: Option<String>,
    pub category: ReminderCategory,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: ReminderPriority,
    pub audio_uri: Option<String>,
    pub transcription: Option<String>,
}

impl ReminderFormData {
    /// Form data with a title and default category/priority
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: ReminderCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: ReminderPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_audio_uri(mut self, audio_uri: impl Into<String>) -> Self {
        self.audio_uri = Some(audio_uri.into());
        self
    }

    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self
    }

    /// Submit-time check performed by front ends.
    ///
    /// The repository itself stores whatever it is given, so callers that
    /// want to reject blank titles must call this before `create`/`update`.
    pub fn validate(&self) -> Result<(), ReminderError> {
        if self.title.trim().is_empty() {
            return Err(ReminderError::EmptyTitle);
        }
        Ok(())
    }
}

/// Partial form data for an update.
///
/// `None` leaves a field untouched. For optional fields, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<ReminderCategory>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<ReminderPriority>,
    pub audio_uri: Option<Option<String>>,
    pub transcription: Option<Option<String>>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Same check as [`ReminderFormData::validate`], applied only when the
    /// patch touches the title
    pub fn validate(&self) -> Result<(), ReminderError> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(ReminderError::EmptyTitle),
            _ => Ok(()),
        }
    }
}

impl From<ReminderFormData> for ReminderPatch {
    /// A patch that overwrites every mutable field
    fn from(form: ReminderFormData) -> Self {
        Self {
            title: Some(form.title),
            description: Some(form.description),
            category: Some(form.category),
            due_date: Some(form.due_date),
            priority: Some(form.priority),
            audio_uri: Some(form.audio_uri),
            transcription: Some(form.transcription),
        }
    }
}
