use crate::data::Event;

/// Sentinel for a missing or malformed time: one past the last minute of the
/// day, so untimed events always sort after timed ones.
pub const END_OF_DAY: u32 = 24 * 60;

/// Hour choices offered by the editor, in display order.
pub const HOURS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

/// Minute choices offered by the editor: five-minute steps, zero-padded.
pub const MINUTES: [&str; 12] = [
    "00", "05", "10", "15", "20", "25", "30", "35", "40", "45", "50", "55",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("AM") {
            Some(Meridiem::Am)
        } else if s.eq_ignore_ascii_case("PM") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

/// Composes the canonical "H:MM AM|PM" time text from editor selections.
pub fn compose_time(hour: u32, minute: &str, meridiem: Meridiem) -> String {
    format!("{}:{} {}", hour, minute, meridiem.label())
}

/// Splits "H:MM AM|PM" into its fields. Hour must be 1-12, minute two digits
/// below 60, meridiem AM or PM (case-insensitive). Anything else is None.
pub fn parse_time(time: &str) -> Option<(u32, u32, Meridiem)> {
    let (hm, ampm) = time.split_once(' ')?;
    let meridiem = Meridiem::parse(ampm)?;
    let (h, m) = hm.split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    if m.len() != 2 {
        return None;
    }
    let minute: u32 = m.parse().ok()?;
    if minute >= 60 {
        return None;
    }
    Some((hour, minute, meridiem))
}

/// Minutes since midnight for sorting: 12 AM is 0, 12 PM is 720, other PM
/// hours add 12. Missing or malformed time maps to END_OF_DAY so it sorts
/// after every valid time.
pub fn time_to_minutes(time: Option<&str>) -> u32 {
    let Some((hour, minute, meridiem)) = time.and_then(parse_time) else {
        return END_OF_DAY;
    };
    let h24 = match (meridiem, hour) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Am, h) => h,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, h) => h + 12,
    };
    h24 * 60 + minute
}

/// Indices of `events` in time-ascending display order. The sort is stable, so
/// same-minute (and untimed) events keep their storage order.
pub fn display_order(events: &[Event]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    order.sort_by_key(|&i| time_to_minutes(events[i].time.as_deref()));
    order
}

/// Time-sorted copy of a day's events for rendering. Never touches the
/// storage order.
pub fn sorted_for_display(events: &[Event]) -> Vec<Event> {
    display_order(events)
        .into_iter()
        .map(|i| events[i].clone())
        .collect()
}

/// Display label for one event: "<time> — <name>" when timed, else the name.
pub fn display_label(event: &Event) -> String {
    match &event.time {
        Some(time) => format!("{} — {}", time, event.name),
        None => event.name.clone(),
    }
}
