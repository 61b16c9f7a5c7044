use crate::action::{ActionTransition, SiteCapture, try_capture};
use crate::config::GameConfig;
use crate::env::MovementCosts;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{MatchState, Position, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {0} is dead")]
    UnitDead(UnitId),

    #[error("unit {0} has already acted this turn")]
    Exhausted(UnitId),

    #[error("destination {to} is not one orthogonal step from {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is impassable")]
    Impassable { destination: Position },

    #[error("destination {destination} is occupied by unit {occupant}")]
    Occupied {
        destination: Position,
        occupant: UnitId,
    },

    #[error("step costs {required} movement but only {remaining} remains")]
    InsufficientMovement { required: u32, remaining: u32 },

    #[error("unit {unit} is not at {expected} after moving")]
    PositionDesync { unit: UnitId, expected: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            UnitNotFound(_) | UnitDead(_) | NotAdjacent { .. } | OutOfBounds { .. } => {
                ErrorSeverity::Validation
            }
            Impassable { .. } => ErrorSeverity::Validation,
            Exhausted(_) | Occupied { .. } | InsufficientMovement { .. } => {
                ErrorSeverity::Recoverable
            }
            PositionDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            UnitNotFound(_) => "MOVE_UNIT_NOT_FOUND",
            UnitDead(_) => "MOVE_UNIT_DEAD",
            Exhausted(_) => "MOVE_EXHAUSTED",
            NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
            OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Impassable { .. } => "MOVE_IMPASSABLE",
            Occupied { .. } => "MOVE_OCCUPIED",
            InsufficientMovement { .. } => "MOVE_INSUFFICIENT_MOVEMENT",
            PositionDesync { .. } => "MOVE_POSITION_DESYNC",
        }
    }
}

/// Single orthogonal step toward an explicit destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub unit: UnitId,
    pub destination: Position,
}

impl MoveAction {
    pub fn new(unit: UnitId, destination: Position) -> Self {
        Self { unit, destination }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub unit: UnitId,
    pub from: Position,
    pub to: Position,
    /// Movement points paid for the step.
    pub cost: u32,
    pub movement_left: u32,
    /// True when the step used up the unit's movement.
    pub exhausted: bool,
    pub capture: Option<SiteCapture>,
}

/// Checks every movement rule and returns the step cost.
pub fn check_move(
    state: &MatchState,
    unit: UnitId,
    destination: Position,
    costs: &MovementCosts,
) -> Result<u32, MoveError> {
    let mover = state.unit(unit).ok_or(MoveError::UnitNotFound(unit))?;
    if !mover.is_alive() {
        return Err(MoveError::UnitDead(unit));
    }
    if mover.exhausted {
        return Err(MoveError::Exhausted(unit));
    }
    if !mover.position.is_orthogonally_adjacent(destination) {
        return Err(MoveError::NotAdjacent {
            from: mover.position,
            to: destination,
        });
    }

    let tile = state
        .tile_at(destination)
        .ok_or(MoveError::OutOfBounds { destination })?;
    let required = costs
        .step_cost(tile.terrain, mover.ignores_terrain())
        .ok_or(MoveError::Impassable { destination })?;

    if let Some(occupant) = state.living_unit_at(destination) {
        return Err(MoveError::Occupied {
            destination,
            occupant: occupant.id,
        });
    }

    let remaining = mover.movement.current;
    if remaining < required {
        return Err(MoveError::InsufficientMovement {
            required,
            remaining,
        });
    }
    Ok(required)
}

/// Moves a unit one step, with no capture side effect.
///
/// Fails without touching the state when any rule of [`check_move`] is
/// violated. On success the unit pays the step cost and is exhausted once
/// its movement reaches zero.
pub fn move_unit(
    state: &mut MatchState,
    unit: UnitId,
    destination: Position,
    costs: &MovementCosts,
) -> Result<MoveOutcome, MoveError> {
    let cost = check_move(state, unit, destination, costs)?;
    let mover = state.unit_mut(unit).ok_or(MoveError::UnitNotFound(unit))?;

    let from = mover.position;
    mover.position = destination;
    mover.movement.drain(cost);
    if mover.movement.is_empty() {
        mover.exhausted = true;
    }

    Ok(MoveOutcome {
        unit,
        from,
        to: destination,
        cost,
        movement_left: mover.movement.current,
        exhausted: mover.exhausted,
        capture: None,
    })
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &MatchState, config: &GameConfig) -> Result<(), Self::Error> {
        check_move(state, self.unit, self.destination, &config.movement).map(|_| ())
    }

    fn apply(&self, state: &mut MatchState, config: &GameConfig) -> Result<MoveOutcome, MoveError> {
        let mut outcome = move_unit(state, self.unit, self.destination, &config.movement)?;
        outcome.capture = try_capture(state, self.destination);
        Ok(outcome)
    }

    fn post_validate(&self, state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        let mover = state
            .unit(self.unit)
            .ok_or(MoveError::UnitNotFound(self.unit))?;
        if mover.position == self.destination {
            Ok(())
        } else {
            Err(MoveError::PositionDesync {
                unit: self.unit,
                expected: self.destination,
            })
        }
    }
}
