mod events;

pub use events::{Event, EventData, EventType};
