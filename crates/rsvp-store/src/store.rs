//! EventStore - the in-memory event collection with persistence and pub/sub.
//!
//! Uses the same concurrency patterns throughout:
//! - `Arc<RwLock<T>>` for shared read-write access to the collection
//! - `mpsc` channels for change notifications (pub/sub pattern)

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use rsvp_models::{Event, EventDraft, EventId, EventPatch, UserId};
use rsvp_persistence::{read_json, write_json, PersistenceError, Storage};
use tracing::{debug, info, warn};

use crate::change::StoreChange;
use crate::error::{Result, StoreError};
use crate::filter::EventFilter;

/// Storage key holding the serialized event collection.
pub const STORAGE_KEY: &str = "events";

/// Where the collection came from when the store was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from storage.
    Persisted,
    /// Nothing was stored; seed data was used.
    Seeded,
    /// Stored data was malformed and replaced by seed data.
    Recovered,
}

/// Event collection with persistence and change notifications.
///
/// # Concurrency Patterns
///
/// - **`Arc<RwLock<Vec<Event>>>`**: many readers or one writer. A mutation
///   holds the write lock while it persists, so mutations never interleave
///   and storage always matches memory.
///
/// - **`Arc<RwLock<Vec<Sender>>>`**: subscriber list. New subscribers are
///   added occasionally, broadcast happens on every mutation.
///
/// # Ordering
///
/// Events keep insertion order. Mutations never reorder the collection.
pub struct EventStore {
    /// Backing key/value storage.
    storage: Arc<dyn Storage>,
    /// Events in insertion order.
    events: Arc<RwLock<Vec<Event>>>,
    /// List of subscriber channels.
    subscribers: Arc<RwLock<Vec<Sender<StoreChange>>>>,
    /// How the collection was obtained.
    load_source: LoadSource,
}

impl EventStore {
    /// Loads the store from `storage`, falling back to `seed`.
    ///
    /// If nothing is stored, or the stored value is malformed, the seed
    /// events are used and written back immediately. Duplicate IDs are
    /// dropped (first one wins) and attendance counts are raised to at least
    /// the number of RSVP'd users.
    ///
    /// # Errors
    ///
    /// Fails only if storage itself can't be read or written.
    pub fn load(storage: Arc<dyn Storage>, seed: Vec<Event>) -> Result<Self> {
        let (events, load_source) = match read_json::<Vec<Event>>(storage.as_ref(), STORAGE_KEY) {
            Ok(Some(events)) => (events, LoadSource::Persisted),
            Ok(None) => (seed, LoadSource::Seeded),
            Err(PersistenceError::Malformed { source, .. }) => {
                warn!(error = %source, "Stored events are malformed, falling back to seed data");
                (seed, LoadSource::Recovered)
            }
            Err(e) => return Err(e.into()),
        };

        let (events, repaired) = normalize(events);

        if load_source != LoadSource::Persisted || repaired {
            write_json(storage.as_ref(), STORAGE_KEY, &events)?;
        }

        info!(count = events.len(), source = ?load_source, "Loaded events");

        Ok(Self {
            storage,
            events: Arc::new(RwLock::new(events)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            load_source,
        })
    }

    /// Returns how the collection was obtained at load time.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Subscribes to change notifications.
    ///
    /// Returns a receiver that gets every change after it has been
    /// persisted. The receiver is disconnected when the store is dropped.
    pub fn subscribe(&self) -> Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }

        rx
    }

    /// Broadcasts a change to all subscribers.
    ///
    /// Removes any disconnected subscribers (closed receivers).
    fn broadcast(&self, change: StoreChange) {
        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(change.clone()).is_ok());
        }
    }

    /// Writes the whole collection to storage.
    fn persist(&self, events: &[Event]) -> Result<()> {
        write_json(self.storage.as_ref(), STORAGE_KEY, events)?;
        Ok(())
    }

    /// Applies `mutate` to a copy of the collection, persists the copy and
    /// only then makes it current.
    ///
    /// `mutate` returns None to signal a no-op, in which case nothing is
    /// written.
    fn commit<T>(&self, mutate: impl FnOnce(&mut Vec<Event>) -> Option<T>) -> Result<Option<T>> {
        let mut events = self
            .events
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        let mut next = events.clone();
        let Some(outcome) = mutate(&mut next) else {
            return Ok(None);
        };

        // Persist first so a failed write leaves memory untouched
        self.persist(&next)?;
        *events = next;

        Ok(Some(outcome))
    }

    /// Returns all events in insertion order.
    pub fn list(&self) -> Vec<Event> {
        match self.events.read() {
            Ok(events) => events.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Gets an event by ID. None means the event doesn't exist.
    pub fn get(&self, id: &EventId) -> Option<Event> {
        let events = self.events.read().ok()?;
        events.iter().find(|e| &e.id == id).cloned()
    }

    /// Returns the events created by `user`, in insertion order.
    pub fn my_events(&self, user: &UserId) -> Vec<Event> {
        self.filtered(&EventFilter::new().with_creator(user.clone()))
    }

    /// Returns events dated on or after `today`, soonest first.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<Event> {
        self.filtered(&EventFilter::new().upcoming_from(today))
    }

    /// Lists events matching `filter`.
    ///
    /// Results keep insertion order, unless the filter restricts to
    /// upcoming events, in which case they are sorted by date (stable, so
    /// same-day events keep insertion order).
    pub fn filtered(&self, filter: &EventFilter) -> Vec<Event> {
        let events = match self.events.read() {
            Ok(events) => events,
            Err(_) => return Vec::new(),
        };

        let mut result: Vec<Event> = events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        if filter.orders_by_date() {
            result.sort_by_key(|e| e.date);
        }

        result
    }

    /// Adds a new event created by `creator`.
    ///
    /// The event gets a fresh ID and no attendees. The draft is not
    /// validated here; callers validate the form first.
    pub fn add(&self, draft: EventDraft, creator: UserId) -> Result<Event> {
        let event = Event::new(draft, creator);

        self.commit(|events| {
            events.push(event.clone());
            Some(())
        })?;

        debug!(event_id = %event.id, title = %event.title, "Added event");
        self.broadcast(StoreChange::Added(event.clone()));
        Ok(event)
    }

    /// Merges `patch` into the event with the given ID.
    ///
    /// Returns the updated event, or None (and writes nothing) if there is
    /// no such event.
    pub fn update(&self, id: &EventId, patch: &EventPatch) -> Result<Option<Event>> {
        let updated = self.commit(|events| {
            let event = events.iter_mut().find(|e| &e.id == id)?;
            event.apply(patch);
            Some(event.clone())
        })?;

        if let Some(ref event) = updated {
            debug!(event_id = %event.id, "Updated event");
            self.broadcast(StoreChange::Updated(event.clone()));
        }
        Ok(updated)
    }

    /// Deletes the event with the given ID.
    ///
    /// Returns the removed event, or None if there is no such event.
    pub fn delete(&self, id: &EventId) -> Result<Option<Event>> {
        let removed = self.commit(|events| {
            let index = events.iter().position(|e| &e.id == id)?;
            Some(events.remove(index))
        })?;

        if let Some(ref event) = removed {
            debug!(event_id = %event.id, "Deleted event");
            self.broadcast(StoreChange::Deleted(event.clone()));
        }
        Ok(removed)
    }

    /// Flips `user`'s RSVP to the event with the given ID.
    ///
    /// Adds the user and increments the count, or removes the user and
    /// decrements it (never below zero). Applying it twice restores the
    /// event. Returns the updated event, or None if there is no such event.
    pub fn toggle_rsvp(&self, id: &EventId, user: &UserId) -> Result<Option<Event>> {
        let toggled = self.commit(|events| {
            let event = events.iter_mut().find(|e| &e.id == id)?;
            let attending = event.toggle_rsvp(user);
            Some((event.clone(), attending))
        })?;

        let Some((event, attending)) = toggled else {
            return Ok(None);
        };

        debug!(
            event_id = %event.id,
            user = %user,
            attending,
            rsvp_count = event.rsvp_count,
            "Toggled RSVP"
        );
        self.broadcast(StoreChange::RsvpToggled {
            event: event.clone(),
            user: user.clone(),
            attending,
        });
        Ok(Some(event))
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if there are no events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops events with duplicate IDs, carries `hasRSVP` flags of older entries
/// over to the current user and fixes counts below the RSVP set size.
///
/// Returns the cleaned events and whether anything changed.
fn normalize(events: Vec<Event>) -> (Vec<Event>, bool) {
    let mut seen = HashSet::new();
    let mut repaired = false;
    let mut result = Vec::with_capacity(events.len());
    let current = UserId::current();

    for mut event in events {
        if !seen.insert(event.id.clone()) {
            warn!(event_id = %event.id, "Dropping event with duplicate id");
            repaired = true;
            continue;
        }
        if event.adopt_stored_rsvp(&current) {
            debug!(event_id = %event.id, "Migrated stored RSVP flag");
            repaired = true;
        }
        if event.reconcile_count() {
            warn!(event_id = %event.id, "Raised attendance count to match RSVPs");
            repaired = true;
        }
        result.push(event);
    }

    (result, repaired)
}
