use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Event {
    pub fn new(name: &str, time: Option<&str>) -> Self {
        Event {
            name: name.to_string(),
            time: time.map(str::to_string),
        }
    }
}

/// Mapping from date-key ("YYYY-MM-DD") to that day's events, in insertion
/// order. A key is present only while its list is non-empty; removing the last
/// event removes the key. Serializes as the bare JSON object
/// `{ "<date-key>": [ { "name": ..., "time": ... }, ... ] }`.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct EventStore {
    days: BTreeMap<String, Vec<Event>>,
}

impl Persistable for EventStore {
    fn filename() -> &'static str {
        "calendar_events.json"
    }
}

impl EventStore {
    pub fn get(&self, key: &str) -> &[Event] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, key: &str) -> bool {
        self.days.contains_key(key)
    }

    /// Appends an event to the given day, preserving insertion order.
    pub fn add(&mut self, key: &str, event: Event) {
        self.days.entry(key.to_string()).or_default().push(event);
    }

    /// Overwrites the event at `index` in the day's list. Returns false when
    /// the key or index does not exist.
    pub fn replace(&mut self, key: &str, index: usize, event: Event) -> bool {
        match self.days.get_mut(key).and_then(|evs| evs.get_mut(index)) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }

    /// Removes the event at `index` in the day's list, dropping the date-key
    /// entirely when the list becomes empty. Returns false when the key or
    /// index does not exist.
    pub fn remove(&mut self, key: &str, index: usize) -> bool {
        let Some(events) = self.days.get_mut(key) else {
            return false;
        };
        if index >= events.len() {
            return false;
        }
        events.remove(index);
        if events.is_empty() {
            self.days.remove(key);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in lexicographic key order, which for "YYYY-MM-DD" keys is
    /// chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Event])> {
        self.days.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
