//! Minimal behavior tree used to script turn-based opponents.
//!
//! Every tick finishes immediately: there is no running state and no delta
//! time. A node either succeeds or fails against the context it is given.
//!
//! - [`Behavior`]: trait implemented by every node
//! - [`Status`]: `Success` or `Failure`
//! - [`Selector`] and [`Sequence`]: ordered composites
//! - [`Condition`]: leaf built from a predicate over the context

pub mod behavior;
pub mod composite;
pub mod status;

pub use behavior::{Behavior, Condition};
pub use composite::{Selector, Sequence};
pub use status::Status;
