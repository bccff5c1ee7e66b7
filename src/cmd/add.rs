use crate::calc::month_grid::date_key;
use crate::calc::time::parse_time;
use crate::data::{Event, EventStore, Persistable};
use anyhow::{bail, Result};
use chrono::NaiveDate;

pub fn run(date: &str, name: &str, time: Option<&str>) -> Result<()> {
    let mut store = EventStore::load();
    let key = add_event(&mut store, date, name, time)?;
    store.save()?;
    println!("Added event on {}", key);
    Ok(())
}

/// Validates the arguments and appends the event. Returns the date-key the
/// event was stored under.
pub(crate) fn add_event(
    store: &mut EventStore,
    date: &str,
    name: &str,
    time: Option<&str>,
) -> Result<String> {
    let parsed = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => bail!("Invalid date '{}' — use YYYY-MM-DD", date),
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Event name must not be empty");
    }
    if let Some(t) = time {
        if parse_time(t).is_none() {
            bail!("Invalid time '{}' — use H:MM AM|PM", t);
        }
    }
    let key = date_key(parsed);
    store.add(&key, Event::new(name, time));
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_event_appends_under_canonical_key() {
        let mut store = EventStore::default();
        let key = add_event(&mut store, "2024-03-05", "Standup", Some("9:00 AM")).unwrap();
        assert_eq!(key, "2024-03-05");
        assert_eq!(
            store.get("2024-03-05"),
            &[Event::new("Standup", Some("9:00 AM"))]
        );
    }

    #[test]
    fn test_add_event_without_time() {
        let mut store = EventStore::default();
        add_event(&mut store, "2024-03-05", "All day", None).unwrap();
        assert_eq!(store.get("2024-03-05")[0].time, None);
    }

    #[test]
    fn test_add_event_rejects_bad_date() {
        let mut store = EventStore::default();
        let err = add_event(&mut store, "03/05/2024", "X", None).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_event_rejects_bad_time() {
        let mut store = EventStore::default();
        let err = add_event(&mut store, "2024-03-05", "X", Some("25:99")).unwrap_err();
        assert!(err.to_string().contains("H:MM"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_event_rejects_blank_name() {
        let mut store = EventStore::default();
        assert!(add_event(&mut store, "2024-03-05", "   ", None).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_event_preserves_existing_day_order() {
        let mut store = EventStore::default();
        add_event(&mut store, "2024-03-05", "First", Some("2:00 PM")).unwrap();
        add_event(&mut store, "2024-03-05", "Second", Some("9:00 AM")).unwrap();
        let names: Vec<&str> = store
            .get("2024-03-05")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
