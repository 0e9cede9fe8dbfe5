use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::event::{Event, EventDraft};
use crate::error::{CalendarError, Result};

/// The persistence collaborator. The calendar core never calls it; it only
/// works on the `Vec<Event>` snapshots returned by [`EventStore::list`].
pub trait EventStore {
    fn list(&self) -> Vec<Event>;
    fn create(&mut self, draft: EventDraft) -> Result<Event>;
    fn update(&mut self, id: &str, draft: EventDraft) -> Result<Event>;
    fn remove(&mut self, id: &str) -> Result<()>;
}

/// Events held in memory for the lifetime of the session, optionally seeded
/// from a TOML file. Nothing is ever written back.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    events: Vec<SeedEvent>,
}

#[derive(Debug, Deserialize)]
struct SeedEvent {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    draft: EventDraft,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `[[events]]` tables from `path`. Entries without an id, or with
    /// an id already taken, get a fresh one.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed: SeedFile = toml::from_str(&content).map_err(|source| CalendarError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut seen = HashSet::new();
        let mut events = Vec::with_capacity(seed.events.len());
        for entry in seed.events {
            let id = match entry.id {
                Some(id) if !id.is_empty() && !seen.contains(&id) => id,
                Some(id) => {
                    warn!("Duplicate or empty event id {:?} in seed file, assigning a new one", id);
                    new_id()
                }
                None => new_id(),
            };
            seen.insert(id.clone());
            events.push(Event::from_draft(id, entry.draft));
        }

        info!("Loaded {} events from {}", events.len(), path.display());
        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::EventNotFound { id: id.to_string() })
    }
}

impl EventStore for MemoryStore {
    fn list(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn create(&mut self, draft: EventDraft) -> Result<Event> {
        let event = Event::from_draft(new_id(), draft);
        debug!(id = %event.id, "Created event {:?}", event.title);
        self.events.push(event.clone());
        Ok(event)
    }

    fn update(&mut self, id: &str, draft: EventDraft) -> Result<Event> {
        let index = self.position(id)?;
        let event = Event::from_draft(id, draft);
        self.events[index] = event.clone();
        debug!(id, "Updated event {:?}", event.title);
        Ok(event)
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        let removed = self.events.remove(index);
        debug!(id, "Removed event {:?}", removed.title);
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.into(),
            date: "2025-05-13".into(),
            start_time: "10:00".into(),
            end_time: "11:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = MemoryStore::new();
        let a = store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list(), vec![a, b]);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut store = MemoryStore::new();
        let a = store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();

        let updated = store.update(&a.id, draft("renamed")).unwrap();
        assert_eq!(updated.id, a.id);
        let titles: Vec<String> = store.list().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["renamed".to_string(), b.title]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.update("missing", draft("a")),
            Err(CalendarError::EventNotFound { id }) if id == "missing"
        ));
        assert!(store.remove("missing").is_err());
    }

    #[test]
    fn remove_deletes_only_that_event() {
        let mut store = MemoryStore::new();
        let a = store.create(draft("a")).unwrap();
        let b = store.create(draft("b")).unwrap();
        store.remove(&a.id).unwrap();
        assert_eq!(store.list(), vec![b]);
    }

    #[test]
    fn loads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[events]]
id = "1"
title = "팀 회의"
date = "2025-07-01"
start_time = "10:00"
end_time = "11:00"
location = "회의실 A"
category = "Work"
notification_time = 10

[events.repeat]
type = "weekly"
interval = 1

[[events]]
id = "1"
title = "duplicate id"
date = "2025-07-02"
start_time = "12:00"
end_time = "13:00"

[[events]]
title = "no id"
date = "2025-07-03"
start_time = "09:00"
end_time = "09:30"
"#
        )
        .unwrap();

        let store = MemoryStore::load(file.path()).unwrap();
        let events = store.list();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].notification_time, 10);
        assert_eq!(events[0].repeat.kind, crate::calendar::RepeatType::Weekly);
        assert_ne!(events[1].id, "1");
        assert!(!events[2].id.is_empty());
    }

    #[test]
    fn malformed_seed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[events]]\ntitle = 3").unwrap();
        assert!(matches!(
            MemoryStore::load(file.path()),
            Err(CalendarError::Parse { .. })
        ));
    }
}
