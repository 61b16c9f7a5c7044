use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{MatchState, UnitFlags, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeError {
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

    #[error("unit {0} is already upgraded")]
    AlreadyUpgraded(UnitId),
}

impl GameError for UpgradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitNotFound(_)
            | Self::UnitDead(_)
            | Self::GuardianCannotAct(_)
            | Self::AlreadyUpgraded(_) => ErrorSeverity::Validation,
            Self::Exhausted(_) | Self::NoMovementLeft(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => "UPGRADE_UNIT_NOT_FOUND",
            Self::UnitDead(_) => "UPGRADE_UNIT_DEAD",
            Self::GuardianCannotAct(_) => "UPGRADE_GUARDIAN",
            Self::Exhausted(_) => "UPGRADE_EXHAUSTED",
            Self::NoMovementLeft(_) => "UPGRADE_NO_MOVEMENT",
            Self::AlreadyUpgraded(_) => "UPGRADE_ALREADY_UPGRADED",
        }
    }
}

/// One-time stat upgrade; consumes the unit's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeAction {
    pub unit: UnitId,
}

impl UpgradeAction {
    pub fn new(unit: UnitId) -> Self {
        Self { unit }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOutcome {
    pub unit: UnitId,
    pub attack: i32,
    pub max_health: u32,
    pub health: u32,
}

impl ActionTransition for UpgradeAction {
    type Error = UpgradeError;
    type Result = UpgradeOutcome;

    fn pre_validate(&self, state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        let unit = state
            .unit(self.unit)
            .ok_or(UpgradeError::UnitNotFound(self.unit))?;
        if !unit.is_alive() {
            return Err(UpgradeError::UnitDead(self.unit));
        }
        if unit.is_guard() {
            return Err(UpgradeError::GuardianCannotAct(self.unit));
        }
        if unit.is_upgraded() {
            return Err(UpgradeError::AlreadyUpgraded(self.unit));
        }
        if unit.exhausted {
            return Err(UpgradeError::Exhausted(self.unit));
        }
        if unit.movement.is_empty() {
            return Err(UpgradeError::NoMovementLeft(self.unit));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<UpgradeOutcome, UpgradeError> {
        let params = &config.abilities;
        let unit = state
            .unit_mut(self.unit)
            .ok_or(UpgradeError::UnitNotFound(self.unit))?;

        unit.attack += params.upgrade_attack;
        // the cap never lowers a maximum that already exceeds it
        let maximum = unit
            .health
            .maximum
            .saturating_add(params.upgrade_health)
            .min(params.upgrade_health_cap)
            .max(unit.health.maximum);
        unit.health.maximum = maximum;
        unit.health.current = unit
            .health
            .current
            .saturating_add(params.upgrade_health)
            .min(maximum);
        unit.flags |= UnitFlags::UPGRADED;
        unit.exhaust();

        Ok(UpgradeOutcome {
            unit: self.unit,
            attack: unit.attack,
            max_health: unit.health.maximum,
            health: unit.health.current,
        })
    }
}
