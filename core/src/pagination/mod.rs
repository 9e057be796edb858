mod events;
mod objects;

pub use events::fetch_events;
pub use objects::list_objects;
