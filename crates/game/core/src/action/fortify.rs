use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{FortifyBuff, MatchState, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FortifyError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error("guardian {0} cannot act")]
    GuardianCannotAct(UnitId),

    #[error("unit {0} has already acted this turn")]
    Exhausted(UnitId),

    #[error("unit {0} has no movement left")]
    NoMovementLeft(UnitId),

    #[error("unit {0} is already fortified")]
    AlreadyFortified(UnitId),
}

impl GameError for FortifyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_) | Self::UnitDead(_) | Self::GuardianCannotAct(_) => {
                ErrorSeverity::Validation
            }
            Self::Exhausted(_) | Self::NoMovementLeft(_) | Self::AlreadyFortified(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "FORTIFY_UNIT_NOT_FOUND",
            Self::UnitDead(_) => "FORTIFY_UNIT_DEAD",
            Self::GuardianCannotAct(_) => "FORTIFY_GUARDIAN",
            Self::Exhausted(_) => "FORTIFY_EXHAUSTED",
            Self::NoMovementLeft(_) => "FORTIFY_NO_MOVEMENT",
            Self::AlreadyFortified(_) => "FORTIFY_ALREADY_FORTIFIED",
        }
    }
}

/// Digs in: temporary defense bonus, consumes the unit's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FortifyAction {
    pub unit: UnitId,
}

impl FortifyAction {
    pub fn new(unit: UnitId) -> Self {
        Self { unit }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FortifyOutcome {
    pub unit: UnitId,
    pub bonus: i32,
    pub turns: u32,
    /// Defense including the bonus.
    pub defense: i32,
}

impl ActionTransition for FortifyAction {
    type Error = FortifyError;
    type Result = FortifyOutcome;

    fn pre_validate(&self, state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        let unit = state
            .unit(self.unit)
            .ok_or(FortifyError::UnitNotFound(self.unit))?;
        if !unit.is_alive() {
            return Err(FortifyError::UnitDead(self.unit));
        }
        if unit.is_guard() {
            return Err(FortifyError::GuardianCannotAct(self.unit));
        }
        if unit.exhausted {
            return Err(FortifyError::Exhausted(self.unit));
        }
        if unit.movement.is_empty() {
            return Err(FortifyError::NoMovementLeft(self.unit));
        }
        if unit.fortify.is_some() {
            return Err(FortifyError::AlreadyFortified(self.unit));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<FortifyOutcome, FortifyError> {
        let unit = state
            .unit_mut(self.unit)
            .ok_or(FortifyError::UnitNotFound(self.unit))?;
        let buff = FortifyBuff {
            bonus: config.abilities.fortify_bonus,
            turns_left: config.abilities.fortify_turns,
        };
        unit.defense += buff.bonus;
        unit.fortify = Some(buff);
        unit.exhaust();

        Ok(FortifyOutcome {
            unit: self.unit,
            bonus: buff.bonus,
            turns: buff.turns_left,
            defense: unit.defense,
        })
    }
}
