//! Seam for anything that plays a whole turn on behalf of a side.

use game_core::{ExecutionOutcome, GameConfig, MatchState, Side};

use crate::api::Result;

/// Plays one turn for `side` without ending it.
///
/// Implementations must route every command through
/// [`game_core::GameEngine`] and return the outcomes in execution order.
pub trait TurnProvider: Send + Sync {
    fn play_turn(
        &self,
        side: Side,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<Vec<ExecutionOutcome>>;
}
