//! Effective strength of the two combatants.

use crate::env::TerrainKind;
use crate::state::{MatchState, Unit};

use super::CombatParams;

/// Health-based scaling applied to both attack and defense.
///
/// # Formula
///
/// ```text
/// factor = min + (1 - min) × hp / max_hp
/// ```
///
/// With the default minimum of 0.5 this runs from 0.5 at zero health to 1.0
/// at full health. A unit with no maximum health counts as fully injured.
pub fn injury_factor(unit: &Unit, params: &CombatParams) -> f64 {
    let min = params.min_injury_factor;
    min + (1.0 - min) * unit.health.ratio()
}

/// Living allies of the attacker, other than the attacker, adjacent to the defender.
pub fn count_flankers(state: &MatchState, attacker: &Unit, defender: &Unit) -> u32 {
    state
        .living_units()
        .filter(|unit| unit.id != attacker.id && unit.faction == attacker.faction)
        .filter(|unit| unit.position.is_orthogonally_adjacent(defender.position))
        .count() as u32
}

/// Living allies of the defender, other than the defender, adjacent to the defender.
pub fn count_supporters(state: &MatchState, defender: &Unit) -> u32 {
    state
        .living_units()
        .filter(|unit| unit.id != defender.id && unit.faction == defender.faction)
        .filter(|unit| unit.position.is_orthogonally_adjacent(defender.position))
        .count() as u32
}

/// Attack strength after injury, flanking and the river penalty.
///
/// The river penalty applies once when either combatant stands in a river.
pub fn effective_attack(
    attacker: &Unit,
    flankers: u32,
    attacker_terrain: TerrainKind,
    defender_terrain: TerrainKind,
    params: &CombatParams,
) -> f64 {
    let mut strength = f64::from(attacker.attack) * injury_factor(attacker, params);
    strength += params.flank_bonus * f64::from(flankers);
    if attacker_terrain == TerrainKind::River || defender_terrain == TerrainKind::River {
        strength -= params.river_penalty;
    }
    strength
}

/// Defense strength after injury, support and the defender's terrain.
pub fn effective_defense(
    defender: &Unit,
    supporters: u32,
    defender_terrain: TerrainKind,
    params: &CombatParams,
) -> f64 {
    let mut strength = f64::from(defender.defense) * injury_factor(defender, params);
    strength += params.support_bonus * f64::from(supporters);
    strength + params.terrain_defense(defender_terrain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Grid, MapDimensions};
    use crate::state::{GoldLedger, Position, Side, UnitClass, UnitId};

    fn board() -> (MatchState, GameConfig) {
        let config = GameConfig::default();
        let state = MatchState::new(
            Grid::filled(MapDimensions::new(5, 5), TerrainKind::Open),
            Vec::new(),
            GoldLedger::default(),
            Side::A,
        );
        (state, config)
    }

    fn place(state: &mut MatchState, config: &GameConfig, side: Side, x: i32, y: i32) -> UnitId {
        state
            .add_unit(
                side.into(),
                UnitClass::Melee,
                Position::new(x, y),
                &config.units.melee,
            )
            .unwrap()
    }

    #[test]
    fn injury_scales_from_half_to_full() {
        let (mut state, config) = board();
        let id = place(&mut state, &config, Side::A, 0, 0);
        let params = CombatParams::default();

        let unit = state.unit_mut(id).unwrap();
        assert_eq!(injury_factor(unit, &params), 1.0);
        unit.health.current = 50;
        assert_eq!(injury_factor(unit, &params), 0.75);
        unit.health.current = 0;
        assert_eq!(injury_factor(unit, &params), 0.5);
        unit.health.maximum = 0;
        assert_eq!(injury_factor(unit, &params), 0.5);
    }

    #[test]
    fn flankers_and_supporters_surround_the_defender() {
        let (mut state, config) = board();
        let attacker = place(&mut state, &config, Side::A, 1, 2);
        let defender = place(&mut state, &config, Side::B, 2, 2);
        place(&mut state, &config, Side::A, 2, 3); // flanker
        place(&mut state, &config, Side::A, 0, 0); // too far
        let supporter = place(&mut state, &config, Side::B, 3, 2);
        place(&mut state, &config, Side::B, 2, 1); // second supporter

        let a = state.unit(attacker).unwrap().clone();
        let d = state.unit(defender).unwrap().clone();
        assert_eq!(count_flankers(&state, &a, &d), 1);
        assert_eq!(count_supporters(&state, &d), 2);

        state.unit_mut(supporter).unwrap().health.current = 0;
        assert_eq!(count_supporters(&state, &d), 1);
    }

    #[test]
    fn river_penalty_applies_once() {
        let (mut state, config) = board();
        let id = place(&mut state, &config, Side::A, 0, 0);
        let unit = state.unit(id).unwrap();
        let params = CombatParams::default();

        let dry = effective_attack(unit, 0, TerrainKind::Open, TerrainKind::Open, &params);
        let one = effective_attack(unit, 0, TerrainKind::River, TerrainKind::Open, &params);
        let both = effective_attack(unit, 0, TerrainKind::River, TerrainKind::River, &params);
        assert_eq!(dry - one, 5.0);
        assert_eq!(one, both);
    }

    #[test]
    fn terrain_shapes_defense() {
        let (mut state, config) = board();
        let id = place(&mut state, &config, Side::B, 0, 0);
        let unit = state.unit(id).unwrap();
        let params = CombatParams::default();

        let open = effective_defense(unit, 0, TerrainKind::Open, &params);
        assert_eq!(open, 35.0);
        assert_eq!(effective_defense(unit, 0, TerrainKind::Forest, &params), 40.0);
        assert_eq!(effective_defense(unit, 0, TerrainKind::Hill, &params), 43.0);
        assert_eq!(effective_defense(unit, 0, TerrainKind::Marsh, &params), 30.0);
        assert_eq!(effective_defense(unit, 0, TerrainKind::River, &params), 35.0);
        assert_eq!(effective_defense(unit, 2, TerrainKind::Open, &params), 45.0);
    }
}
