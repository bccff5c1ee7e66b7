pub mod event;
pub mod persistence;

pub use event::{Event, EventStore};
pub use persistence::Persistable;
