//! Unified error type surfaced by the runtime API.
use thiserror::Error;

use game_core::{ExecuteError, Side};
use game_core::state::StateError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to set up the match")]
    Setup(#[source] StateError),

    #[error("{side} cannot play while {active} holds the turn")]
    OutOfTurn { side: Side, active: Side },

    #[error("{side} has no turn provider")]
    ProviderNotSet { side: Side },

    #[error("match ended after round {round}")]
    MatchOver { round: u32 },
}
