//! State management errors.
//!
//! Errors raised while placing units into a [`MatchState`](super::MatchState).

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, UnitId};

/// Errors that occur during direct state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Unit ID allocation overflow (all IDs exhausted).
    #[error("unit id overflow (current: {current})")]
    UnitIdOverflow { current: u32 },

    /// Position is already held by a living unit.
    #[error("position {position} is already occupied by unit {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: UnitId,
    },

    /// Position is outside the map bounds.
    #[error("position {position} is out of bounds (map size: {width}x{height})")]
    PositionOutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    /// Terrain at the position cannot be entered.
    #[error("position {position} is impassable")]
    PositionImpassable { position: Position },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitIdOverflow { .. } => ErrorSeverity::Fatal,
            Self::PositionOccupied { .. }
            | Self::PositionOutOfBounds { .. }
            | Self::PositionImpassable { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitIdOverflow { .. } => "STATE_UNIT_ID_OVERFLOW",
            Self::PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            Self::PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
            Self::PositionImpassable { .. } => "STATE_POSITION_IMPASSABLE",
        }
    }
}
