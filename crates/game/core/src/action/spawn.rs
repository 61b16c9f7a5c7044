use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{MatchState, Position, Side, StateError, UnitClass, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnError {
    #[error("{0:?} units cannot be purchased")]
    NotPurchasable(UnitClass),

    #[error("{side} has {available} gold but the unit costs {cost}")]
    InsufficientGold {
        side: Side,
        cost: u32,
        available: i64,
    },

    #[error("{position} lies outside {side}'s spawn row {row}")]
    OutsideSpawnZone {
        side: Side,
        position: Position,
        row: i32,
    },

    #[error(transparent)]
    Placement(#[from] StateError),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotPurchasable(_) | Self::OutsideSpawnZone { .. } => ErrorSeverity::Validation,
            Self::InsufficientGold { .. } => ErrorSeverity::Recoverable,
            Self::Placement(StateError::PositionOccupied { .. }) => ErrorSeverity::Recoverable,
            Self::Placement(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPurchasable(_) => "SPAWN_NOT_PURCHASABLE",
            Self::InsufficientGold { .. } => "SPAWN_INSUFFICIENT_GOLD",
            Self::OutsideSpawnZone { .. } => "SPAWN_OUTSIDE_ZONE",
            Self::Placement(error) => error.error_code(),
        }
    }
}

/// Buys a unit of `class` for `side` and places it at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnAction {
    pub side: Side,
    pub class: UnitClass,
    pub position: Position,
}

impl SpawnAction {
    pub fn new(side: Side, class: UnitClass, position: Position) -> Self {
        Self {
            side,
            class,
            position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnOutcome {
    pub unit: UnitId,
    pub side: Side,
    pub class: UnitClass,
    pub position: Position,
    pub cost: u32,
    /// Gold left after the purchase.
    pub balance: i64,
}

impl ActionTransition for SpawnAction {
    type Error = SpawnError;
    type Result = SpawnOutcome;

    fn pre_validate(&self, state: &MatchState, config: &GameConfig) -> Result<(), Self::Error> {
        let cost = config
            .template(self.class)
            .cost
            .ok_or(SpawnError::NotPurchasable(self.class))?;

        let available = state.gold(self.side);
        if available < i64::from(cost) {
            return Err(SpawnError::InsufficientGold {
                side: self.side,
                cost,
                available,
            });
        }

        state.check_placement(self.position)?;

        let setup = &config.setup;
        if setup.home_row_spawns {
            let row = setup.home_row(self.side, state.grid.dimensions().height);
            if self.position.y != row {
                return Err(SpawnError::OutsideSpawnZone {
                    side: self.side,
                    position: self.position,
                    row,
                });
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<SpawnOutcome, SpawnError> {
        let template = config.template(self.class);
        let cost = template.cost.ok_or(SpawnError::NotPurchasable(self.class))?;

        let unit = state.add_unit(self.side.into(), self.class, self.position, template)?;
        let gold = state.gold.get_mut(self.side);
        *gold -= i64::from(cost);

        Ok(SpawnOutcome {
            unit,
            side: self.side,
            class: self.class,
            position: self.position,
            cost,
            balance: *gold,
        })
    }
}
