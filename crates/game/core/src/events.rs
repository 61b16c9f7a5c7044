//! Notifications emitted by successful commands.
//!
//! Each successful [`GameEngine::execute`](crate::engine::GameEngine::execute)
//! returns the events it produced, in the order they happened. Presentation
//! layers redraw from these instead of polling the whole state.

use crate::combat::Exchange;
use crate::economy::Settlement;
use crate::state::{Position, Side, UnitClass, UnitId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
        cost: u32,
        movement_left: u32,
    },
    CombatResolved {
        attacker: UnitId,
        defender: UnitId,
        exchange: Exchange,
        attacker_health: u32,
        defender_health: u32,
    },
    UnitDefeated {
        unit: UnitId,
        position: Position,
    },
    SiteCaptured {
        position: Position,
        side: Side,
        previous: Option<Side>,
    },
    UnitFortified {
        unit: UnitId,
        bonus: i32,
        turns: u32,
    },
    FortifyExpired {
        unit: UnitId,
        defense: i32,
    },
    UnitUpgraded {
        unit: UnitId,
        attack: i32,
        max_health: u32,
    },
    UnitSpawned {
        unit: UnitId,
        side: Side,
        class: UnitClass,
        position: Position,
        cost: u32,
    },
    GoldSettled(Settlement),
    TurnEnded {
        ended: Side,
        active: Side,
        round: u32,
    },
}

impl GameEvent {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Self::UnitMoved { .. } => "unit_moved",
            Self::CombatResolved { .. } => "combat_resolved",
            Self::UnitDefeated { .. } => "unit_defeated",
            Self::SiteCaptured { .. } => "site_captured",
            Self::UnitFortified { .. } => "unit_fortified",
            Self::FortifyExpired { .. } => "fortify_expired",
            Self::UnitUpgraded { .. } => "unit_upgraded",
            Self::UnitSpawned { .. } => "unit_spawned",
            Self::GoldSettled(_) => "gold_settled",
            Self::TurnEnded { .. } => "turn_ended",
        }
    }
}
