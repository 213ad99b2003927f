//! Command handlers for CLI subcommands.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rsvp_api::{ApiConfig, AppState};
use rsvp_models::{fixtures, Category, Event, EventForm, EventId, EventPatch, UserId};
use rsvp_persistence::FileStorage;
use rsvp_store::{EventFilter, EventStore};
use tracing::{debug, info};

use crate::cli::{CategoryFilter, Commands, OutputFormat};
use crate::error::{CliError, Result};

/// Execute a CLI command.
pub fn execute(command: Commands, data_dir: &Path, user: UserId) -> Result<()> {
    if let Commands::Serve { host, port } = command {
        return cmd_serve(host, port, user);
    }

    let session = Session::new(open_store(data_dir)?, user, Local::now().date_naive());

    let stdout = io::stdout();
    let stdin = io::stdin();
    session.run(command, &mut stdout.lock(), &mut stdin.lock())
}

/// Opens the event store kept under `data_dir`, seeding it on first use.
pub fn open_store(data_dir: &Path) -> Result<EventStore> {
    debug!(data_dir = %data_dir.display(), "Opening event store");
    let storage = Arc::new(FileStorage::new(data_dir));
    Ok(EventStore::load(storage, fixtures::seed_events())?)
}

fn cmd_serve(host: String, port: u16, user: UserId) -> Result<()> {
    let config = ApiConfig::new(host, port).with_user(user);
    println!("Serving mock events API on http://{}", config.bind_address());
    println!("Press Ctrl-C to stop.");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(rsvp_api::serve(AppState::new(config)))?;
    Ok(())
}

/// Field changes requested by `rsvp edit`.
#[derive(Debug, Clone, Default)]
pub struct EventEdits {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub category: Option<Category>,
}

impl EventEdits {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.location.is_none()
            && self.category.is_none()
    }
}

/// An open store plus who is acting and what day it is.
pub struct Session {
    store: EventStore,
    user: UserId,
    today: NaiveDate,
}

impl Session {
    pub fn new(store: EventStore, user: UserId, today: NaiveDate) -> Self {
        Self { store, user, today }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Runs a store command, printing to `out` and reading confirmations
    /// from `input`. `serve` is rejected; it goes through [`execute`].
    pub fn run(
        &self,
        command: Commands,
        out: &mut impl Write,
        input: &mut impl BufRead,
    ) -> Result<()> {
        match command {
            Commands::List {
                search,
                category,
                all,
                format,
            } => self.cmd_list(
                search.as_deref(),
                category.and_then(CategoryFilter::category),
                all,
                format,
                out,
            ),
            Commands::Show { id } => self.cmd_show(&EventId::from(id), out),
            Commands::Mine { format } => self.cmd_mine(format, out),
            Commands::Create {
                title,
                description,
                date,
                location,
                category,
            } => self.cmd_create(
                EventForm {
                    title,
                    description,
                    date,
                    location,
                    category,
                },
                out,
            ),
            Commands::Edit {
                id,
                title,
                description,
                date,
                location,
                category,
            } => self.cmd_edit(
                &EventId::from(id),
                EventEdits {
                    title,
                    description,
                    date,
                    location,
                    category,
                },
                out,
            ),
            Commands::Delete { id, yes } => self.cmd_delete(&EventId::from(id), yes, out, input),
            Commands::Rsvp { id } => self.cmd_rsvp(&EventId::from(id), out),
            Commands::Serve { .. } => Err(CliError::NotAStoreCommand("serve")),
        }
    }

    fn cmd_list(
        &self,
        search: Option<&str>,
        category: Option<Category>,
        all: bool,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> Result<()> {
        let mut filter = EventFilter::new();
        if let Some(term) = search {
            filter = filter.with_search(term);
        }
        if let Some(category) = category {
            filter = filter.with_category(category);
        }
        if !all {
            filter = filter.upcoming_from(self.today);
        }

        let events = self.store.filtered(&filter);

        if events.is_empty() && format != OutputFormat::Json {
            writeln!(out, "No events found.")?;
            if filter.search.is_some() || filter.category.is_some() {
                writeln!(out, "Try adjusting your search or filter criteria.")?;
            } else if !all {
                writeln!(out, "No upcoming events at the moment.")?;
            }
            return Ok(());
        }

        self.print_events(&events, format, out)
    }

    fn cmd_mine(&self, format: OutputFormat, out: &mut impl Write) -> Result<()> {
        let events = self.store.my_events(&self.user);

        if events.is_empty() && format != OutputFormat::Json {
            writeln!(out, "You haven't created any events yet.")?;
            writeln!(out, "Create one with `rsvp create`.")?;
            return Ok(());
        }

        self.print_events(&events, format, out)
    }

    fn print_events(
        &self,
        events: &[Event],
        format: OutputFormat,
        out: &mut impl Write,
    ) -> Result<()> {
        match format {
            OutputFormat::Table => {
                writeln!(
                    out,
                    "{:<40}  {:<10}  {:<10}  {:<30}  GOING",
                    "ID", "DATE", "CATEGORY", "TITLE"
                )?;
                writeln!(out, "{}", "-".repeat(104))?;
                for event in events {
                    let marker = if event.has_rsvp(&self.user) { " *" } else { "" };
                    writeln!(
                        out,
                        "{:<40}  {:<10}  {:<10}  {:<30}  {}{}",
                        event.id,
                        event.date,
                        event.category,
                        truncate(&event.title, 30),
                        event.rsvp_count,
                        marker
                    )?;
                }
                writeln!(out, "\n{} event(s)", events.len())?;
                if events.iter().any(|e| e.has_rsvp(&self.user)) {
                    writeln!(out, "* you are attending")?;
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(events)?;
                writeln!(out, "{}", json)?;
            }
            OutputFormat::Brief => {
                for event in events {
                    writeln!(out, "{}  {}  {}", event.id, event.date, event.title)?;
                }
            }
        }

        Ok(())
    }

    fn cmd_show(&self, id: &EventId, out: &mut impl Write) -> Result<()> {
        let Some(event) = self.store.get(id) else {
            writeln!(out, "Event not found")?;
            return Ok(());
        };

        let ended = if event.is_upcoming(self.today) {
            ""
        } else {
            "  (Event Ended)"
        };
        writeln!(out, "{}  [{}]{}", event.title, event.category, ended)?;
        writeln!(out, "  ID:         {}", event.id)?;
        writeln!(out, "  Date:       {}", long_date(event.date))?;
        writeln!(out, "  Location:   {}", event.location)?;
        writeln!(out, "  Attendees:  {} people attending", event.rsvp_count)?;
        if let Some(ref creator) = event.created_by {
            writeln!(out, "  Created by: {}", creator)?;
        }
        if event.has_rsvp(&self.user) {
            writeln!(out, "  You are attending this event.")?;
        }
        if !event.description.is_empty() {
            writeln!(out, "\n{}", event.description)?;
        }

        Ok(())
    }

    fn cmd_create(&self, form: EventForm, out: &mut impl Write) -> Result<()> {
        let draft = form.validate(self.today)?;
        let event = self.store.add(draft, self.user.clone())?;

        info!(event_id = %event.id, user = %self.user, "Created event");

        writeln!(out, "Created event '{}' ({})", event.title, event.id)?;
        writeln!(out, "  Date: {}", long_date(event.date))?;
        Ok(())
    }

    /// Looks up an event the acting user is allowed to change.
    fn owned_event(&self, id: &EventId) -> Result<Event> {
        let event = self
            .store
            .get(id)
            .ok_or_else(|| CliError::EventNotFound(id.to_string()))?;

        if !event.is_created_by(&self.user) {
            return Err(CliError::NotOwner(event.title));
        }
        Ok(event)
    }

    fn cmd_edit(&self, id: &EventId, edits: EventEdits, out: &mut impl Write) -> Result<()> {
        let event = self.owned_event(id)?;

        if edits.is_empty() {
            writeln!(out, "Nothing to change.")?;
            return Ok(());
        }

        // A date that isn't being changed may already be in the past
        let earliest = if edits.date.is_some() {
            self.today
        } else {
            self.today.min(event.date)
        };

        let form = EventForm {
            title: edits.title.unwrap_or_else(|| event.title.clone()),
            description: edits
                .description
                .unwrap_or_else(|| event.description.clone()),
            date: edits
                .date
                .unwrap_or_else(|| event.date.format("%Y-%m-%d").to_string()),
            location: edits.location.unwrap_or_else(|| event.location.clone()),
            category: edits.category.unwrap_or(event.category),
        };
        let patch = EventPatch::from(form.validate(earliest)?);

        let updated = self
            .store
            .update(id, &patch)?
            .ok_or_else(|| CliError::EventNotFound(id.to_string()))?;

        info!(event_id = %updated.id, "Edited event");

        writeln!(out, "Updated event '{}' ({})", updated.title, updated.id)?;
        Ok(())
    }

    fn cmd_delete(
        &self,
        id: &EventId,
        yes: bool,
        out: &mut impl Write,
        input: &mut impl BufRead,
    ) -> Result<()> {
        let event = self.owned_event(id)?;

        if !yes && !confirm(&format!("Delete '{}'?", event.title), out, input)? {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }

        let removed = self
            .store
            .delete(id)?
            .ok_or_else(|| CliError::EventNotFound(id.to_string()))?;

        info!(event_id = %removed.id, "Deleted event");

        writeln!(out, "Deleted event '{}' ({})", removed.title, removed.id)?;
        Ok(())
    }

    fn cmd_rsvp(&self, id: &EventId, out: &mut impl Write) -> Result<()> {
        let event = self
            .store
            .get(id)
            .ok_or_else(|| CliError::EventNotFound(id.to_string()))?;

        if !event.is_upcoming(self.today) {
            return Err(CliError::EventEnded(event.title));
        }

        let updated = self
            .store
            .toggle_rsvp(id, &self.user)?
            .ok_or_else(|| CliError::EventNotFound(id.to_string()))?;

        if updated.has_rsvp(&self.user) {
            writeln!(
                out,
                "You are attending '{}' ({} attending)",
                updated.title, updated.rsvp_count
            )?;
        } else {
            writeln!(
                out,
                "Cancelled your RSVP to '{}' ({} attending)",
                updated.title, updated.rsvp_count
            )?;
        }
        Ok(())
    }
}

/// Asks a yes/no question, defaulting to no.
fn confirm(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Formats a date the way the detail view shows it, e.g. "September 15, 2025".
fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Truncates a string to the given length, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
