use crate::calc::month_grid::date_key;
use crate::calc::time::{compose_time, parse_time, HOURS, MINUTES};
use crate::calc::Meridiem;
use crate::data::{Event, EventStore};
use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    Name,
    Hour,
    Minute,
    Meridiem,
}

/// Modal add/edit dialog state. Either closed, or open on one date — creating
/// a new event when `editing_index` is None, editing the entry at that
/// storage-order index otherwise. The editor never holds its own copy of
/// store data beyond the form fields being typed into.
pub struct EventEditor {
    date: Option<NaiveDate>,
    editing_index: Option<usize>,
    pub name: String,
    pub hour_idx: usize,
    pub minute_idx: usize,
    pub meridiem: Meridiem,
    pub focus: EditorField,
}

impl Default for EventEditor {
    fn default() -> Self {
        EventEditor {
            date: None,
            editing_index: None,
            name: String::new(),
            hour_idx: HOURS.len() - 1, // 12
            minute_idx: 0,             // "00"
            meridiem: Meridiem::Am,
            focus: EditorField::Name,
        }
    }
}

impl EventEditor {
    pub fn is_open(&self) -> bool {
        self.date.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_index.is_some()
    }

    pub fn title(&self) -> String {
        match self.date {
            Some(date) if self.is_editing() => format!("Edit event for {}", date_key(date)),
            Some(date) => format!("Add event for {}", date_key(date)),
            None => String::new(),
        }
    }

    /// Opens for a new event on `date`: empty name, 12:00 AM, delete disabled.
    pub fn open_new(&mut self, date: NaiveDate) {
        *self = EventEditor::default();
        self.date = Some(date);
    }

    /// Opens pre-filled from an existing event. `index` is the event's
    /// position in storage order. A missing or malformed time falls back to
    /// the 12:00 AM defaults; a minute off the five-minute grid (possible in
    /// a hand-edited store file) snaps to the nearest selector entry.
    pub fn open_existing(&mut self, date: NaiveDate, event: &Event, index: usize) {
        self.open_new(date);
        self.editing_index = Some(index);
        self.name = event.name.clone();
        if let Some((hour, minute, meridiem)) = event.time.as_deref().and_then(parse_time) {
            self.hour_idx = (hour - 1) as usize;
            self.minute_idx = (((minute + 2) / 5) as usize).min(MINUTES.len() - 1);
            self.meridiem = meridiem;
        }
    }

    pub fn close(&mut self) {
        self.date = None;
        self.editing_index = None;
    }

    /// Commits the form into the store. Returns true when the store changed
    /// (caller persists and re-renders). A whitespace-only name is rejected
    /// and the editor stays open.
    pub fn save(&mut self, store: &mut EventStore) -> bool {
        let Some(date) = self.date else {
            return false;
        };
        let name = self.name.trim();
        if name.is_empty() {
            return false;
        }
        let time = compose_time(HOURS[self.hour_idx], MINUTES[self.minute_idx], self.meridiem);
        let event = Event::new(name, Some(&time));
        let key = date_key(date);
        match self.editing_index {
            Some(index) => {
                store.replace(&key, index, event);
            }
            None => store.add(&key, event),
        }
        self.close();
        true
    }

    /// Removes the entry being edited. No-op (returns false) unless the
    /// editor is open in editing mode.
    pub fn delete(&mut self, store: &mut EventStore) -> bool {
        let (Some(date), Some(index)) = (self.date, self.editing_index) else {
            return false;
        };
        let removed = store.remove(&date_key(date), index);
        self.close();
        removed
    }

    // ── Form-field manipulation (driven by the key handler) ──────────────────

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            EditorField::Name => EditorField::Hour,
            EditorField::Hour => EditorField::Minute,
            EditorField::Minute => EditorField::Meridiem,
            EditorField::Meridiem => EditorField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.focus = match self.focus {
            EditorField::Name => EditorField::Meridiem,
            EditorField::Hour => EditorField::Name,
            EditorField::Minute => EditorField::Hour,
            EditorField::Meridiem => EditorField::Minute,
        };
    }

    /// Steps the focused selector forward/backward, wrapping around. Does
    /// nothing when the name field is focused.
    pub fn cycle_focused(&mut self, step: i32) {
        match self.focus {
            EditorField::Name => {}
            EditorField::Hour => self.hour_idx = cycle(self.hour_idx, HOURS.len(), step),
            EditorField::Minute => self.minute_idx = cycle(self.minute_idx, MINUTES.len(), step),
            EditorField::Meridiem => self.meridiem = self.meridiem.toggled(),
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.focus == EditorField::Name {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == EditorField::Name {
            self.name.pop();
        }
    }

    /// Current time selection as display text, e.g. "12:00 AM".
    pub fn time_text(&self) -> String {
        compose_time(HOURS[self.hour_idx], MINUTES[self.minute_idx], self.meridiem)
    }
}

fn cycle(idx: usize, len: usize, step: i32) -> usize {
    (idx as i32 + step).rem_euclid(len as i32) as usize
}
