mod calc;
mod cmd;
mod data;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calmon", about = "month calendar with events")]
struct Cli {
    /// Path to the data directory holding the event store (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stored events, day by day
    List {
        /// Restrict output to one month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Add an event without opening the calendar
    Add {
        /// Event date (YYYY-MM-DD)
        date: String,
        /// Event name
        name: String,
        /// Event time, e.g. "9:30 AM" (omit for an untimed event)
        #[arg(long)]
        time: Option<String>,
    },
    /// Remove the event at a given position within a day
    Remove {
        /// Event date (YYYY-MM-DD)
        date: String,
        /// Zero-based position of the event within the day
        index: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir);

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::List { month }) => cmd::list::run(month.as_deref()),
        Some(Commands::Add { date, name, time }) => {
            cmd::add::run(&date, &name, time.as_deref())
        }
        Some(Commands::Remove { date, index }) => cmd::remove::run(&date, index),
    }
}
