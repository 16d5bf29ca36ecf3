//! Command-line interface for echoremind.
//!
//! Each subcommand corresponds to one user action in the reminder app:
//! creating, editing, completing and deleting reminders, browsing the list
//! and the agenda, and turning a voice memo transcription into a reminder.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::ResolvedConfig;
use crate::core::clock::{classify, format_due_date, parse_due_date, relative_time};
use crate::core::{
    Clock, DueBucket, ReminderRepository, RepositoryOptions, SystemClock, TimeOrderedIdGenerator,
};
use crate::domain::{
    CategoryFilter, Reminder, ReminderCategory, ReminderFormData, ReminderPatch,
    ReminderPriority, Theme,
};
use crate::storage::FileBlobStore;

pub mod voice;

/// echoremind - voice memo reminders
#[derive(Parser, Debug)]
#[command(name = "echoremind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides the config file)
    #[arg(long, global = true, env = "ECHOREMIND_HOME")]
    pub home: Option<PathBuf>,

    /// Blob key the reminders are stored under
    #[arg(long, global = true, env = "ECHOREMIND_STORAGE_KEY")]
    pub storage_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a reminder
    Add {
        /// Reminder title
        title: String,

        /// Notes
        #[arg(short, long)]
        description: Option<String>,

        /// work, personal, health, shopping or other
        #[arg(short, long, default_value = "other")]
        category: ReminderCategory,

        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: ReminderPriority,

        /// Due date: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD"
        #[arg(long)]
        due: Option<String>,
    },

    /// Create a reminder from a voice memo transcription
    Voice {
        /// Transcribed text
        #[arg(required = true, num_args = 1..)]
        transcription: Vec<String>,

        /// Reference to the stored recording
        #[arg(long)]
        audio_uri: Option<String>,

        /// Override the processing delay (milliseconds)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Show the interpretation without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// List reminders
    List {
        /// Category to show ("all" or a category name)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Case-insensitive search over title and description
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show past-due, today and upcoming reminders
    Agenda,

    /// Show details of a reminder
    Show {
        /// Reminder ID
        id: String,

        /// Use the dark palette for category colors
        #[arg(long)]
        dark: bool,
    },

    /// Edit a reminder
    Edit {
        /// Reminder ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        #[arg(short, long)]
        category: Option<ReminderCategory>,

        #[arg(short, long)]
        priority: Option<ReminderPriority>,

        /// New due date (same formats as `add`)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Mark a reminder done (or not done again)
    Toggle {
        /// Reminder ID
        id: String,
    },

    /// Delete a reminder
    Delete {
        /// Reminder ID
        id: String,
    },

    /// Delete all reminders
    Clear {
        /// Required confirmation; this cannot be undone
        #[arg(long)]
        yes: bool,
    },

    /// Show resolved configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self, config: ResolvedConfig) -> Result<()> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        match self.command {
            Commands::Add {
                title,
                description,
                category,
                priority,
                due,
            } => {
                let mut repo = open_repository(&config, clock);
                add_reminder(&mut repo, title, description, category, priority, due)
            }
            Commands::Voice {
                transcription,
                audio_uri,
                delay_ms,
                dry_run,
            } => {
                let text = transcription.join(" ");
                voice::execute(&config, clock, text, audio_uri, delay_ms, dry_run).await
            }
            Commands::List { category, search } => {
                let mut repo = open_repository(&config, clock);
                list_reminders(&mut repo, category, search);
                Ok(())
            }
            Commands::Agenda => {
                let repo = open_repository(&config, clock);
                show_agenda(&repo);
                Ok(())
            }
            Commands::Show { id, dark } => {
                let repo = open_repository(&config, clock);
                let theme = if dark { Theme::Dark } else { Theme::Light };
                show_reminder(&repo, &id, theme)
            }
            Commands::Edit {
                id,
                title,
                description,
                clear_description,
                category,
                priority,
                due,
                clear_due,
            } => {
                let mut repo = open_repository(&config, clock);
                let due_date = match (due, clear_due) {
                    (_, true) => Some(None),
                    (Some(due), false) => Some(Some(parse_due_date(&due, &repo.now())?)),
                    (None, false) => None,
                };
                let description = if clear_description {
                    Some(None)
                } else {
                    description.map(Some)
                };
                let patch = ReminderPatch {
                    title,
                    description,
                    category,
                    due_date,
                    priority,
                    ..Default::default()
                };
                edit_reminder(&mut repo, &id, patch)
            }
            Commands::Toggle { id } => {
                let mut repo = open_repository(&config, clock);
                toggle_reminder(&mut repo, &id)
            }
            Commands::Delete { id } => {
                let mut repo = open_repository(&config, clock);
                delete_reminder(&mut repo, &id)
            }
            Commands::Clear { yes } => {
                if !yes {
                    bail!("Refusing to delete all reminders without --yes");
                }
                let mut repo = open_repository(&config, clock);
                let count = repo.len();
                repo.clear();
                println!("🗑  Deleted {} reminder(s)", count);
                Ok(())
            }
            Commands::Config => {
                show_config(&config);
                Ok(())
            }
        }
    }
}

/// Open the file-backed repository described by `config`
pub fn open_repository(config: &ResolvedConfig, clock: Arc<dyn Clock>) -> ReminderRepository {
    ReminderRepository::open(
        Arc::new(FileBlobStore::new(&config.home)),
        clock,
        Arc::new(TimeOrderedIdGenerator),
        RepositoryOptions {
            storage_key: config.storage_key.clone(),
            seed_when_empty: config.seed_when_empty,
        },
    )
}

fn add_reminder(
    repo: &mut ReminderRepository,
    title: String,
    description: Option<String>,
    category: ReminderCategory,
    priority: ReminderPriority,
    due: Option<String>,
) -> Result<()> {
    let mut form = ReminderFormData::new(title)
        .with_category(category)
        .with_priority(priority);
    form.description = description;
    if let Some(due) = due {
        form.due_date = Some(parse_due_date(&due, &repo.now())?);
    }
    form.validate()?;

    let id = repo.create(form);
    info!(id = %id, "Reminder created");

    if let Some(reminder) = repo.lookup_by_id(&id) {
        println!("✅ Created reminder");
        println!("{}", summary_line(reminder, repo));
    }
    Ok(())
}

fn list_reminders(repo: &mut ReminderRepository, category: CategoryFilter, search: String) {
    repo.set_category_filter(category);
    repo.set_search_query(search);

    let items = repo.filtered_view();
    if items.is_empty() {
        println!("{}", repo.empty_message());
        return;
    }

    println!();
    println!("Reminders ({} shown, {} total)", items.len(), repo.len());
    println!("══════════════════════════════════════════════════════════════");
    for reminder in items {
        println!("{}", summary_line(reminder, repo));
    }
    println!();
}

fn show_agenda(repo: &ReminderRepository) {
    let sections = [
        ("Past Due", repo.past_due_view()),
        ("Today", repo.today_view()),
        ("Upcoming", repo.upcoming_view()),
    ];

    if sections.iter().all(|(_, items)| items.is_empty()) {
        println!("No upcoming reminders. Enjoy your free time!");
        return;
    }

    for (heading, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", heading, items.len());
        println!("──────────────────────────────────────────────────────────────");
        for reminder in items {
            println!("{}", summary_line(reminder, repo));
        }
    }
    println!();
}

fn show_reminder(repo: &ReminderRepository, id: &str, theme: Theme) -> Result<()> {
    let reminder = find(repo, id)?;
    let now = repo.now();

    println!();
    println!("{}", reminder.title);
    println!("══════════════════════════════════════════════════════════════");
    println!("ID:          {}", reminder.id);
    println!(
        "Category:    {} ({})",
        reminder.category.label(),
        reminder.category.color(theme)
    );
    println!("Priority:    {}", reminder.priority.label());
    println!("Due:         {}", format_due_date(reminder.due_date.as_ref(), &now));
    let status = match (reminder.is_completed, reminder.due_date.as_ref()) {
        (true, _) => "Completed",
        (false, None) => "Open",
        (false, Some(due)) => match classify(due, &now) {
            DueBucket::PastDue => "Past due",
            DueBucket::Today => "Due today",
            DueBucket::Upcoming => "Upcoming",
        },
    };
    println!("Status:      {}", status);
    if let Some(description) = &reminder.description {
        println!("Description: {}", description);
    }
    if let Some(transcription) = &reminder.transcription {
        println!("Transcript:  \"{}\"", transcription);
    }
    if let Some(audio_uri) = &reminder.audio_uri {
        println!("Audio:       {}", audio_uri);
    }
    println!("Created:     {}", relative_time(&reminder.created_at, &now));
    println!("Updated:     {}", relative_time(&reminder.updated_at, &now));
    println!();

    Ok(())
}

fn edit_reminder(repo: &mut ReminderRepository, id: &str, patch: ReminderPatch) -> Result<()> {
    find(repo, id)?;
    if patch.is_empty() {
        bail!("Nothing to change");
    }
    patch.validate()?;

    repo.update(id, patch);
    info!(id, "Reminder updated");

    let reminder = find(repo, id)?;
    println!("✏️  Updated reminder");
    println!("{}", summary_line(reminder, repo));
    Ok(())
}

fn toggle_reminder(repo: &mut ReminderRepository, id: &str) -> Result<()> {
    find(repo, id)?;
    repo.toggle_complete(id);

    let reminder = find(repo, id)?;
    if reminder.is_completed {
        println!("✓ Completed: {}", reminder.title);
    } else {
        println!("↺ Reopened: {}", reminder.title);
    }
    Ok(())
}

fn delete_reminder(repo: &mut ReminderRepository, id: &str) -> Result<()> {
    let title = find(repo, id)?.title.clone();
    repo.delete(id);
    println!("🗑  Deleted: {}", title);
    Ok(())
}

fn show_config(config: &ResolvedConfig) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("  EchoRemind Configuration");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Storage:");
    println!("  Home:        {}", config.home.display());
    println!("  Key:         {}", config.storage_key);
    println!(
        "  Data file:   {}",
        FileBlobStore::new(&config.home)
            .path_for(&config.storage_key)
            .display()
    );
    println!("  Seed empty:  {}", config.seed_when_empty);
    println!();
    println!("Voice:");
    println!(
        "  Processing delay: {}ms",
        config.voice_processing_delay.as_millis()
    );
}

/// Existence check the repository leaves to its callers
fn find<'a>(repo: &'a ReminderRepository, id: &str) -> Result<&'a Reminder> {
    repo.lookup_by_id(id)
        .with_context(|| format!("Reminder not found: {}", id))
}

fn summary_line(reminder: &Reminder, repo: &ReminderRepository) -> String {
    let check = if reminder.is_completed { "[x]" } else { "[ ]" };
    let audio = if reminder.has_audio() { " 🎙" } else { "" };
    format!(
        "  {} {}{}  ({}, {})  {}  [{}]",
        check,
        reminder.title,
        audio,
        reminder.category.label(),
        reminder.priority.label(),
        format_due_date(reminder.due_date.as_ref(), &repo.now()),
        reminder.id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_flags_are_global() {
        let cli = Cli::try_parse_from([
            "echoremind",
            "agenda",
            "--home",
            "/tmp/reminders",
            "--storage-key",
            "work-list",
        ])
        .unwrap();

        assert_eq!(cli.home, Some(PathBuf::from("/tmp/reminders")));
        assert_eq!(cli.storage_key.as_deref(), Some("work-list"));
        assert!(matches!(cli.command, Commands::Agenda));
    }

    #[test]
    fn test_edit_rejects_conflicting_due_flags() {
        let result = Cli::try_parse_from(["echoremind", "edit", "r1", "--due", "2024-01-12", "--clear-due"]);
        assert!(result.is_err());
    }
}
