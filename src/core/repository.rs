//! The reminder repository.
//!
//! Owns the reminder collection plus the transient list state (category
//! filter and search query). Every mutation writes the collection back to the
//! blob store; a failed write is logged and dropped, and the in-memory
//! collection stays authoritative for the session.
//!
//! Unknown ids passed to `update`, `toggle_complete` or `delete` are silently
//! ignored. No input validation happens here: front ends that want to reject
//! blank titles call [`ReminderFormData::validate`] before calling in.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{debug, warn};

use super::clock::Clock;
use super::factory::{self, IdGenerator};
use super::seed::seed_reminders;
use super::views;
use crate::domain::{CategoryFilter, Reminder, ReminderFormData, ReminderPatch};
use crate::storage::{BlobStore, PersistedState};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "reminders-storage";

/// How a repository binds to its store
#[derive(Debug, Clone)]
pub struct RepositoryOptions {
    /// Key of the blob holding the collection
    pub storage_key: String,

    /// Start from the built-in sample set when nothing is stored yet
    pub seed_when_empty: bool,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed_when_empty: true,
        }
    }
}

/// In-memory reminder collection backed by a blob store.
///
/// `Tz` is the zone the clock reports in; day boundaries for the today view
/// follow its rules.
pub struct ReminderRepository<Tz: TimeZone = Local> {
    reminders: Vec<Reminder>,
    category_filter: CategoryFilter,
    search_query: String,
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock<Tz>>,
    ids: Arc<dyn IdGenerator>,
    storage_key: String,
}

impl<Tz: TimeZone> ReminderRepository<Tz> {
    /// Hydrate from the store, falling back to the seed set (or nothing) when
    /// the store is empty or its content can't be read.
    pub fn open(
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock<Tz>>,
        ids: Arc<dyn IdGenerator>,
        options: RepositoryOptions,
    ) -> Self {
        let stored = match store.get(&options.storage_key) {
            Ok(Some(bytes)) => match PersistedState::decode(&bytes) {
                Ok(state) => Some(state.reminders),
                Err(e) => {
                    warn!(key = %options.storage_key, error = %e, "Discarding unreadable reminder data");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %options.storage_key, error = %e, "Failed to read reminder data");
                None
            }
        };

        let reminders = match stored {
            Some(reminders) => reminders,
            None if options.seed_when_empty => seed_reminders(clock.now().with_timezone(&Utc)),
            None => Vec::new(),
        };

        debug!(count = reminders.len(), key = %options.storage_key, "Reminder repository hydrated");

        Self {
            reminders,
            category_filter: CategoryFilter::All,
            search_query: String::new(),
            store,
            clock,
            ids,
            storage_key: options.storage_key,
        }
    }

    /// Add a new reminder at the front of the collection; returns its id
    pub fn create(&mut self, form: ReminderFormData) -> String {
        let reminder = factory::create_reminder(form, self.ids.next_id(), self.now_utc());
        let id = reminder.id.clone();

        debug!(id = %id, title = %reminder.title, "Creating reminder");
        self.reminders.insert(0, reminder);
        self.persist();

        id
    }

    /// Apply a patch to the reminder with `id`; unknown ids are ignored
    pub fn update(&mut self, id: &str, patch: ReminderPatch) {
        let now = self.now_utc();
        let Some(slot) = self.reminders.iter_mut().find(|r| r.id == id) else {
            debug!(id, "Update skipped, reminder not found");
            return;
        };

        *slot = factory::apply_patch(slot, patch, now);
        debug!(id, "Updated reminder");
        self.persist();
    }

    /// Flip completion on the reminder with `id`; unknown ids are ignored
    pub fn toggle_complete(&mut self, id: &str) {
        let now = self.now_utc();
        let Some(slot) = self.reminders.iter_mut().find(|r| r.id == id) else {
            debug!(id, "Toggle skipped, reminder not found");
            return;
        };

        *slot = factory::toggle_completion(slot, now);
        debug!(id, completed = slot.is_completed, "Toggled reminder");
        self.persist();
    }

    /// Permanently remove the reminder with `id`; unknown ids are ignored
    pub fn delete(&mut self, id: &str) {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);

        if self.reminders.len() == before {
            debug!(id, "Delete skipped, reminder not found");
            return;
        }

        debug!(id, "Deleted reminder");
        self.persist();
    }

    /// Remove every reminder
    pub fn clear(&mut self) {
        debug!(count = self.reminders.len(), "Clearing all reminders");
        self.reminders.clear();
        self.persist();
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// All reminders in insertion order (newest first)
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Reminders passing the current filter and query, in list order
    pub fn filtered_view(&self) -> Vec<&Reminder> {
        views::filtered(&self.reminders, self.category_filter, &self.search_query)
    }

    pub fn upcoming_view(&self) -> Vec<&Reminder> {
        views::upcoming(&self.reminders, &self.clock.now())
    }

    pub fn past_due_view(&self) -> Vec<&Reminder> {
        views::past_due(&self.reminders, &self.clock.now())
    }

    pub fn today_view(&self) -> Vec<&Reminder> {
        views::today(&self.reminders, &self.clock.now())
    }

    /// Message shown when the filtered list comes back empty
    pub fn empty_message(&self) -> &'static str {
        if !self.search_query.is_empty() {
            "No reminders match your search"
        } else if self.category_filter != CategoryFilter::All {
            "No reminders in this category"
        } else {
            "No reminders yet. Create one!"
        }
    }

    /// Current time according to the repository's clock
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now().with_timezone(&Utc)
    }

    // Best effort: failures are logged, never surfaced
    fn persist(&self) {
        let result = PersistedState::new(self.reminders.clone())
            .encode()
            .and_then(|bytes| self.store.set(&self.storage_key, &bytes));

        if let Err(e) = result {
            warn!(key = %self.storage_key, error = %e, "Failed to persist reminders");
        }
    }
}
