pub mod month_grid;
pub mod time;

pub use month_grid::add_months;
pub use time::{display_label, sorted_for_display, Meridiem};
