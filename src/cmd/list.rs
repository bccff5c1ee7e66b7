use crate::calc::{display_label, sorted_for_display};
use crate::data::{EventStore, Persistable};
use anyhow::Result;

pub fn run(month: Option<&str>) -> Result<()> {
    let store = EventStore::load();
    write_events(&store, month, &mut std::io::stdout())
}

/// Prints each day and its events, days in chronological order, events in
/// time order. `month` filters to keys starting with "YYYY-MM".
pub(crate) fn write_events<W: std::io::Write>(
    store: &EventStore,
    month: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let mut printed_any = false;
    for (key, events) in store.iter() {
        if let Some(prefix) = month {
            if !key.starts_with(prefix) {
                continue;
            }
        }
        printed_any = true;
        writeln!(out, "{}", key)?;
        for event in sorted_for_display(events) {
            writeln!(out, "  {}", display_label(&event))?;
        }
    }
    if !printed_any {
        writeln!(out, "(no events)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Event;

    fn sample_store() -> EventStore {
        let mut store = EventStore::default();
        store.add("2024-03-01", Event::new("Dinner", Some("6:30 PM")));
        store.add("2024-03-01", Event::new("Lunch", Some("12:30 PM")));
        store.add("2024-04-10", Event::new("All day", None));
        store
    }

    fn render(store: &EventStore, month: Option<&str>) -> String {
        let mut buf = Vec::new();
        write_events(store, month, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_events_days_chronological_events_time_sorted() {
        let output = render(&sample_store(), None);
        assert_eq!(
            output,
            "2024-03-01\n  12:30 PM — Lunch\n  6:30 PM — Dinner\n2024-04-10\n  All day\n"
        );
    }

    #[test]
    fn test_write_events_month_filter() {
        let output = render(&sample_store(), Some("2024-03"));
        assert!(output.contains("2024-03-01"));
        assert!(!output.contains("2024-04-10"));
    }

    #[test]
    fn test_write_events_empty_store() {
        let output = render(&EventStore::default(), None);
        assert_eq!(output, "(no events)\n");
    }

    #[test]
    fn test_write_events_filter_with_no_matches() {
        let output = render(&sample_store(), Some("2030-01"));
        assert_eq!(output, "(no events)\n");
    }
}
