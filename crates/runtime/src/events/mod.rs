//! Topic-based republishing of engine events.

pub mod bus;

pub use bus::{Event, EventBus, Topic};
