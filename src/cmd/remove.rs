use crate::calc::month_grid::date_key;
use crate::data::{EventStore, Persistable};
use anyhow::{bail, Result};
use chrono::NaiveDate;

pub fn run(date: &str, index: usize) -> Result<()> {
    let mut store = EventStore::load();
    let name = remove_event(&mut store, date, index)?;
    store.save()?;
    println!("Removed '{}' from {}", name, date);
    Ok(())
}

/// Removes the event at `index` (storage order) from the given day. Returns
/// the removed event's name.
pub(crate) fn remove_event(store: &mut EventStore, date: &str, index: usize) -> Result<String> {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        bail!("Invalid date '{}' — use YYYY-MM-DD", date);
    };
    // Look up by the canonical zero-padded key, same as `add_event` stores.
    let key = date_key(parsed);
    let events = store.get(&key);
    let Some(event) = events.get(index) else {
        bail!(
            "No event at index {} on {} ({} event(s))",
            index,
            key,
            events.len()
        );
    };
    let name = event.name.clone();
    store.remove(&key, index);
    Ok(name)
}
