//! Match orchestration for the skirmish rules engine.
//!
//! The runtime owns a [`MatchSession`], routes commands through
//! [`game_core::GameEngine`], lets scripted opponents play their turns, and
//! republishes every resulting [`game_core::GameEvent`] on a topic bus.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the match owner and its turn loop
//! - [`api`] exposes errors and the provider seam downstream clients use
//! - [`events`] provides the topic-based event bus
//! - [`providers`] implements the scripted opponent
//! - [`config`] reads runtime settings from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod providers;
pub mod session;

pub use api::{Result, RuntimeError, TurnProvider};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, Topic};
pub use providers::ai::{AiContext, ScriptedOpponent};
pub use session::{MatchSession, Standing};
