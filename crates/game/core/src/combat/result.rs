//! Exchange result type and resolution.

use crate::env::TerrainKind;
use crate::state::{MatchState, Unit};

use super::damage::exchange_damage;
use super::strength::{count_flankers, count_supporters, effective_attack, effective_defense};
use super::CombatParams;

/// Result of a combat exchange. Both damages are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exchange {
    pub damage_to_defender: u32,
    pub damage_to_attacker: u32,
}

/// Resolve a complete exchange between two units on the board.
///
/// # Arguments
///
/// * `attacker_terrain` / `defender_terrain` - terrain of each combatant's tile
/// * `state` - read for flank and support counts only
///
/// The caller applies the damage and any follow-up (death, exhaustion,
/// capture).
pub fn resolve_exchange(
    attacker: &Unit,
    defender: &Unit,
    attacker_terrain: TerrainKind,
    defender_terrain: TerrainKind,
    state: &MatchState,
    params: &CombatParams,
) -> Exchange {
    let flankers = count_flankers(state, attacker, defender);
    let supporters = count_supporters(state, defender);

    let attack = effective_attack(attacker, flankers, attacker_terrain, defender_terrain, params);
    let defense = effective_defense(defender, supporters, defender_terrain, params);
    let (damage_to_defender, damage_to_attacker) = exchange_damage(attack, defense, params);

    Exchange {
        damage_to_defender,
        damage_to_attacker,
    }
}
