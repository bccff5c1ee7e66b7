use crate::data::{persistence::get_data_dir, EventStore, Persistable};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;

pub fn run() -> Result<()> {
    let mut store = EventStore::load();

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let data_dir = get_data_dir()?;
    let mut app = App::new(&mut store, today, data_dir);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    drop(app);

    // Mutations were persisted as they happened; write once more so an I/O
    // failure mid-session still gets a final chance on the way out.
    store.save()?;

    result
}
