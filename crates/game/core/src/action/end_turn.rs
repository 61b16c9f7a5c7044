use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::economy::{Settlement, settle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::MatchState;
use crate::turn::{TurnAdvance, advance_turn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndTurnError {
    #[error("round counter exhausted at {round}")]
    RoundOverflow { round: u32 },
}

impl GameError for EndTurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RoundOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoundOverflow { .. } => "END_TURN_ROUND_OVERFLOW",
        }
    }
}

/// Ends the active side's turn: settle its gold, then hand over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnOutcome {
    /// Settlement of the side whose turn ended.
    pub settlement: Settlement,
    pub turn: TurnAdvance,
}

impl ActionTransition for EndTurnAction {
    type Error = EndTurnError;
    type Result = EndTurnOutcome;

    fn pre_validate(&self, state: &MatchState, config: &GameConfig) -> Result<(), Self::Error> {
        let advances = state.active_side.opponent() == config.setup.round_advancing_side;
        if advances && state.round == u32::MAX {
            return Err(EndTurnError::RoundOverflow { round: state.round });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<EndTurnOutcome, EndTurnError> {
        let ending = state.active_side;
        let settlement = settle(state, ending, config);
        let turn = advance_turn(state, &config.setup);
        Ok(EndTurnOutcome { settlement, turn })
    }
}
