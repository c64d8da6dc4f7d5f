// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event persistence + fingerprint dedup (§4.12): "before persisting an
//! event, check for an existing row with the same fingerprint: if
//! present, short-circuit (return the existing row, no side effects)."

use std::collections::HashMap;

use orc_core::{Event, EventId};
use parking_lot::Mutex;

use crate::fingerprint::fingerprint;

/// Whether an ingested event was newly persisted or short-circuited by a
/// fingerprint match (§4.12).
pub enum Persisted {
    New(Event),
    Duplicate(Event),
}

impl Persisted {
    pub fn event(&self) -> &Event {
        match self {
            Persisted::New(event) | Persisted::Duplicate(event) => event,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Persisted::New(_))
    }
}

pub struct EventStore {
    events: Mutex<HashMap<EventId, Event>>,
    by_fingerprint: Mutex<HashMap<String, EventId>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Mutex::new(HashMap::new()), by_fingerprint: Mutex::new(HashMap::new()) }
    }

    /// Persist `event`, first stamping it with its fingerprint. If an
    /// event with the same fingerprint already exists, the existing row
    /// is returned unchanged and no side effects follow (§4.12).
    pub fn persist(&self, mut event: Event) -> Persisted {
        let fp = fingerprint(event.tenant_id, event.subject_id, event.event_type, &event.payload);

        let mut by_fingerprint = self.by_fingerprint.lock();
        if let Some(existing_id) = by_fingerprint.get(&fp) {
            let events = self.events.lock();
            // Populated by every prior `persist` call; a fingerprint index
            // entry always has a matching row.
            if let Some(existing) = events.get(existing_id) {
                return Persisted::Duplicate(existing.clone());
            }
        }

        event.fingerprint = Some(fp.clone());
        by_fingerprint.insert(fp, event.id);
        drop(by_fingerprint);

        self.events.lock().insert(event.id, event.clone());
        Persisted::New(event)
    }

    pub fn get(&self, id: EventId) -> Option<Event> {
        self.events.lock().get(&id).cloned()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "event_store_tests.rs"]
mod tests;
