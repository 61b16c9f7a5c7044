use bitflags::bitflags;

use crate::config::UnitTemplate;

use super::{Faction, Position, ResourceMeter, Side, UnitId};

/// Unit class. Determines base stats, purchase cost and upkeep through the
/// unit template table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnitClass {
    Melee,
    Scout,
    Cavalry,
    Infantry,
    AntiCavalry,
}

bitflags! {
    /// Persistent per-unit markers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        /// Pays a flat step cost of 1 on any passable terrain (scouts).
        const IGNORES_TERRAIN = 1 << 0;
        /// Immobile neutral guardian; never acts and never changes side.
        const GUARD = 1 << 1;
        /// The one-time upgrade has been applied.
        const UPGRADED = 1 << 2;
    }
}

/// Temporary defense buff with a countdown in owner turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FortifyBuff {
    /// Defense that was added and must be removed on expiry.
    pub bonus: i32,
    pub turns_left: u32,
}

/// A unit on the board.
///
/// A unit with zero hit points is dead: it stays in storage but is excluded
/// from every spatial and interaction query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub faction: Faction,
    pub class: UnitClass,
    pub position: Position,
    pub health: ResourceMeter,
    pub attack: i32,
    pub defense: i32,
    pub movement: ResourceMeter,
    /// Set once the unit has used its action (or its movement) this turn.
    pub exhausted: bool,
    pub flags: UnitFlags,
    pub fortify: Option<FortifyBuff>,
    pub name: Option<String>,
}

impl Unit {
    /// Builds a fresh unit at full health and movement.
    pub fn from_template(
        id: UnitId,
        faction: Faction,
        class: UnitClass,
        position: Position,
        template: &UnitTemplate,
    ) -> Self {
        let mut flags = UnitFlags::empty();
        if template.ignores_terrain {
            flags |= UnitFlags::IGNORES_TERRAIN;
        }
        Self {
            id,
            faction,
            class,
            position,
            health: ResourceMeter::full(template.max_health),
            attack: template.attack,
            defense: template.defense,
            movement: ResourceMeter::full(template.movement),
            exhausted: false,
            flags,
            fortify: None,
            name: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn is_guard(&self) -> bool {
        self.flags.contains(UnitFlags::GUARD)
    }

    pub fn ignores_terrain(&self) -> bool {
        self.flags.contains(UnitFlags::IGNORES_TERRAIN)
    }

    pub fn is_upgraded(&self) -> bool {
        self.flags.contains(UnitFlags::UPGRADED)
    }

    pub fn side(&self) -> Option<Side> {
        self.faction.side()
    }

    /// True for living units of a different faction.
    pub fn is_enemy_of(&self, other: &Unit) -> bool {
        other.is_alive() && other.faction != self.faction
    }

    /// Marks the unit as having spent its action for the turn.
    pub fn exhaust(&mut self) {
        self.exhausted = true;
        self.movement.current = 0;
    }

    /// Restores the per-turn action budget.
    pub fn refresh(&mut self) {
        self.exhausted = false;
        self.movement.refill();
    }
}
