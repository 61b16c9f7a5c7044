//! Tunable rule parameters.
//!
//! [`GameConfig`] bundles every number the rules engine consults. The default
//! values reproduce the stock ruleset; `game-content` can overlay a partial
//! TOML file on top of them when the `serde` feature is enabled.

use crate::combat::CombatParams;
use crate::economy::EconomyParams;
use crate::env::{MapGenParams, MovementCosts};
use crate::state::{Side, UnitClass};

/// Game configuration: all tunables in one place.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub map: MapGenParams,
    pub movement: MovementCosts,
    pub combat: CombatParams,
    pub economy: EconomyParams,
    pub abilities: AbilityParams,
    pub units: UnitTemplates,
    pub setup: SetupParams,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(&self, class: UnitClass) -> &UnitTemplate {
        self.units.get(class)
    }
}

/// Fortify and upgrade tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityParams {
    pub fortify_bonus: i32,
    /// Owner turns the fortify buff survives.
    pub fortify_turns: u32,
    pub upgrade_attack: i32,
    pub upgrade_health: u32,
    /// Upper bound for both current and maximum hit points after an upgrade.
    pub upgrade_health_cap: u32,
}

impl Default for AbilityParams {
    fn default() -> Self {
        Self {
            fortify_bonus: 5,
            fortify_turns: 1,
            upgrade_attack: 10,
            upgrade_health: 20,
            upgrade_health_cap: 100,
        }
    }
}

/// Base statistics and price of one unit class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub attack: i32,
    pub defense: i32,
    pub max_health: u32,
    pub movement: u32,
    /// Purchase price; `None` when the class cannot be bought.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<u32>,
    pub upkeep: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignores_terrain: bool,
}

impl UnitTemplate {
    const fn fielded(attack: i32, defense: i32, movement: u32) -> Self {
        Self {
            attack,
            defense,
            max_health: 100,
            movement,
            cost: None,
            upkeep: 1,
            ignores_terrain: false,
        }
    }

    pub fn is_purchasable(&self) -> bool {
        self.cost.is_some()
    }
}

/// Template table indexed by [`UnitClass`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitTemplates {
    pub melee: UnitTemplate,
    pub scout: UnitTemplate,
    pub cavalry: UnitTemplate,
    pub infantry: UnitTemplate,
    pub anti_cavalry: UnitTemplate,
}

impl UnitTemplates {
    pub fn get(&self, class: UnitClass) -> &UnitTemplate {
        match class {
            UnitClass::Melee => &self.melee,
            UnitClass::Scout => &self.scout,
            UnitClass::Cavalry => &self.cavalry,
            UnitClass::Infantry => &self.infantry,
            UnitClass::AntiCavalry => &self.anti_cavalry,
        }
    }
}

impl Default for UnitTemplates {
    fn default() -> Self {
        Self {
            melee: UnitTemplate {
                cost: Some(10),
                ..UnitTemplate::fielded(35, 35, 3)
            },
            scout: UnitTemplate {
                cost: Some(5),
                upkeep: 0,
                ignores_terrain: true,
                ..UnitTemplate::fielded(15, 20, 5)
            },
            cavalry: UnitTemplate::fielded(40, 25, 4),
            infantry: UnitTemplate::fielded(30, 40, 3),
            anti_cavalry: UnitTemplate::fielded(30, 35, 3),
        }
    }
}

/// Initial match layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SetupParams {
    pub starting_gold: i64,
    pub first_side: Side,
    /// The round counter advances whenever this side becomes active.
    pub round_advancing_side: Side,
    /// Restrict spawning to the side's home row.
    pub home_row_spawns: bool,
    pub place_guardians: bool,
    pub guardian_health: u32,
    pub corner_guardian_defense: i32,
    pub centre_guardian_defense: i32,
}

impl SetupParams {
    /// Row on which `side` may spawn units.
    pub fn home_row(&self, side: Side, height: u32) -> i32 {
        match side {
            Side::A => height as i32 - 1,
            Side::B => 0,
        }
    }
}

impl Default for SetupParams {
    fn default() -> Self {
        Self {
            starting_gold: 50,
            first_side: Side::A,
            round_advancing_side: Side::A,
            home_row_spawns: true,
            place_guardians: true,
            guardian_health: 100,
            corner_guardian_defense: 40,
            centre_guardian_defense: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_melee_and_scout_are_purchasable_by_default() {
        let config = GameConfig::default();
        let purchasable: Vec<_> = UnitClass::iter()
            .filter(|class| config.template(*class).is_purchasable())
            .collect();
        assert_eq!(purchasable, vec![UnitClass::Melee, UnitClass::Scout]);
    }

    #[test]
    fn scouts_are_free_to_keep_and_ignore_terrain() {
        let scout = GameConfig::default().units.scout;
        assert_eq!(scout.upkeep, 0);
        assert!(scout.ignores_terrain);
        assert_eq!((scout.attack, scout.defense, scout.movement), (15, 20, 5));
        assert_eq!(scout.cost, Some(5));
    }

    #[test]
    fn home_rows_face_each_other() {
        let setup = SetupParams::default();
        assert_eq!(setup.home_row(Side::A, 8), 7);
        assert_eq!(setup.home_row(Side::B, 8), 0);
    }
}
