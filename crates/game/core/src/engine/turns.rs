use crate::state::Side;

use super::GameEngine;

/// Turn bookkeeping helpers for GameEngine.
impl<'a> GameEngine<'a> {
    /// Returns the side currently allowed to issue commands.
    pub fn active_side(&self) -> Side {
        self.state.active_side
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }
}
