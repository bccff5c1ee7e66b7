use crate::calc::month_grid::{build_month_grid, date_key, MonthGrid, WEEKDAY_LABELS};
use crate::calc::time::{display_order, HOURS, MINUTES};
use crate::calc::{add_months, display_label, sorted_for_display};
use crate::data::{EventStore, Persistable};
use crate::ui::editor::{EditorField, EventEditor};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

#[derive(PartialEq)]
enum Mode {
    Normal,
    /// Choosing which of the selected day's events to edit. The cursor walks
    /// the display (time-sorted) order.
    PickEvent,
}

pub struct App<'a> {
    store: &'a mut EventStore,
    /// Selected day; its month is the viewed month.
    selected_date: NaiveDate,
    today: NaiveDate,
    mode: Mode,
    pick_cursor: usize,
    editor: EventEditor,
    /// Where mutations are persisted after every save/delete.
    data_dir: PathBuf,
    /// Result of the last persist attempt, shown until the next keypress.
    status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(store: &'a mut EventStore, today: NaiveDate, data_dir: PathBuf) -> Self {
        App {
            store,
            selected_date: today,
            today,
            mode: Mode::Normal,
            pick_cursor: 0,
            editor: EventEditor::default(),
            data_dir,
            status: None,
        }
    }

    fn selected_key(&self) -> String {
        date_key(self.selected_date)
    }

    fn change_month(&mut self, delta: i32) {
        self.selected_date = add_months(self.selected_date, delta);
    }

    /// Writes the whole store out after a mutation. Failures become a status
    /// line rather than terminating the session.
    fn persist(&mut self) {
        if let Err(e) = self.store.save_to(&self.data_dir) {
            self.status = Some(format!("save failed: {e}"));
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.status = None;

        if self.editor.is_open() {
            self.handle_editor_key(code);
            return false;
        }
        if self.mode == Mode::PickEvent {
            self.handle_pick_key(code);
            return false;
        }

        match code {
            KeyCode::Left => self.change_month(-1),
            KeyCode::Right => self.change_month(1),
            KeyCode::Home | KeyCode::Char('t') => self.selected_date = self.today,
            KeyCode::Up => {
                if let Some(d) = self.selected_date.checked_sub_signed(Duration::days(7)) {
                    self.selected_date = d;
                }
            }
            KeyCode::Down => {
                if let Some(d) = self.selected_date.checked_add_signed(Duration::days(7)) {
                    self.selected_date = d;
                }
            }
            KeyCode::Char('h') => {
                if let Some(d) = self.selected_date.checked_sub_signed(Duration::days(1)) {
                    self.selected_date = d;
                }
            }
            KeyCode::Char('l') => {
                if let Some(d) = self.selected_date.checked_add_signed(Duration::days(1)) {
                    self.selected_date = d;
                }
            }
            KeyCode::Enter | KeyCode::Char('a') => {
                self.editor.open_new(self.selected_date);
            }
            KeyCode::Char('e') => {
                let events = self.store.get(&self.selected_key());
                match events.len() {
                    0 => {}
                    1 => {
                        let event = events[0].clone();
                        self.editor.open_existing(self.selected_date, &event, 0);
                    }
                    _ => {
                        self.mode = Mode::PickEvent;
                        self.pick_cursor = 0;
                    }
                }
            }
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            _ => {}
        }
        false
    }

    fn handle_pick_key(&mut self, code: KeyCode) {
        let events = self.store.get(&self.selected_key());
        match code {
            KeyCode::Up => {
                if self.pick_cursor > 0 {
                    self.pick_cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.pick_cursor + 1 < events.len() {
                    self.pick_cursor += 1;
                }
            }
            KeyCode::Enter => {
                // The cursor walked display order; the editor needs the
                // storage-order index.
                let order = display_order(events);
                if let Some(&index) = order.get(self.pick_cursor) {
                    let event = events[index].clone();
                    self.editor.open_existing(self.selected_date, &event, index);
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.editor.close(),
            KeyCode::Enter => {
                if self.editor.save(self.store) {
                    self.persist();
                }
            }
            KeyCode::Delete => {
                if self.editor.delete(self.store) {
                    self.persist();
                }
            }
            KeyCode::Tab => self.editor.next_field(),
            KeyCode::BackTab => self.editor.prev_field(),
            KeyCode::Up => self.editor.cycle_focused(-1),
            KeyCode::Down => self.editor.cycle_focused(1),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Char(c) => self.editor.type_char(c),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&self, f: &mut Frame) {
        let grid = build_month_grid(self.selected_date, self.today, self.store);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((grid.weeks() + 4) as u16), // grid + header + borders
                Constraint::Min(6),                            // events for selected day
                Constraint::Length(6),                         // status + help
            ])
            .split(f.area());

        self.render_grid(f, chunks[0], &grid);
        self.render_day_events(f, chunks[1]);
        self.render_help(f, chunks[2]);

        if self.editor.is_open() {
            self.render_editor(f);
        }
    }

    fn render_grid(&self, f: &mut Frame, area: Rect, grid: &MonthGrid) {
        let header = Row::new(
            WEEKDAY_LABELS
                .iter()
                .map(|d| Cell::from(format!("{:^5}", d)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = grid
            .cells
            .chunks(7)
            .map(|week| {
                Row::new(
                    week.iter()
                        .map(|cell| {
                            let marker = if cell.events.is_empty() { ' ' } else { '•' };
                            let text = format!(" {:>2}{} ", cell.day, marker);
                            let style = day_cell_style(
                                cell.date == self.selected_date,
                                cell.today,
                                cell.outside,
                                !cell.events.is_empty(),
                            );
                            Cell::from(text).style(style)
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(5); 7])
            .header(header)
            .column_spacing(1)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", grid.title()))
                    .title_style(Style::default().add_modifier(Modifier::BOLD)),
            );

        f.render_widget(table, area);
    }

    fn render_day_events(&self, f: &mut Frame, area: Rect) {
        let events = sorted_for_display(self.store.get(&self.selected_key()));

        let mut lines: Vec<Line> = Vec::new();
        if self.mode == Mode::PickEvent {
            lines.push(Line::from("  Select event to edit:"));
            for (i, e) in events.iter().enumerate() {
                let prefix = if i == self.pick_cursor { "  > " } else { "    " };
                lines.push(Line::from(format!("{}{}", prefix, display_label(e))));
            }
            lines.push(Line::from(Span::styled(
                "  Enter=edit  Esc=cancel  ↑↓=move",
                Style::default().fg(Color::DarkGray),
            )));
        } else if events.is_empty() {
            lines.push(Line::from("  (no events)"));
        } else {
            for e in &events {
                lines.push(Line::from(format!("  • {}", display_label(e))));
            }
        }

        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Events for {} ", self.selected_key())),
        );
        f.render_widget(p, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(4)])
            .split(area);

        if let Some(msg) = &self.status {
            let status = Paragraph::new(Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            f.render_widget(status, chunks[0]);
        }

        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← →", "Prev/next month", "Home/t", "Jump to today"]),
            Row::new(vec!["↑ ↓", "Move a week", "h / l", "Move a day"]),
            Row::new(vec!["Enter/a", "Add event", "e", "Edit event"]),
            Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(10),
                Constraint::Length(20),
                Constraint::Length(10),
                Constraint::Length(20),
            ],
        )
        .block(Block::default().borders(Borders::NONE))
        .column_spacing(1);
        f.render_widget(help_table, chunks[1]);
    }

    fn render_editor(&self, f: &mut Frame) {
        let area = centered_rect(44, 9, f.area());
        f.render_widget(Clear, area);

        let focused = |field: EditorField| {
            if self.editor.focus == field {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            }
        };

        let name_line = Line::from(vec![
            Span::raw("Name: "),
            Span::styled(format!("{}_", self.editor.name), focused(EditorField::Name)),
        ]);
        let time_line = Line::from(vec![
            Span::raw("Time: "),
            Span::styled(
                format!("[{:>2}]", HOURS[self.editor.hour_idx]),
                focused(EditorField::Hour),
            ),
            Span::raw(":"),
            Span::styled(
                format!("[{}]", MINUTES[self.editor.minute_idx]),
                focused(EditorField::Minute),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", self.editor.meridiem.label()),
                focused(EditorField::Meridiem),
            ),
        ]);

        let hint = if self.editor.is_editing() {
            "Tab=field  ↑↓=change  Enter=save  Del=delete  Esc=cancel"
        } else {
            "Tab=field  ↑↓=change  Enter=save  Esc=cancel"
        };

        let lines = vec![
            name_line,
            Line::from(""),
            time_line,
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];

        let modal = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.editor.title())),
        );
        f.render_widget(modal, area);
    }
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Determines the style for a calendar day cell based on its state.
fn day_cell_style(is_selected: bool, is_today: bool, outside: bool, has_events: bool) -> Style {
    if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if outside {
        Style::default().add_modifier(Modifier::DIM)
    } else if has_events {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
