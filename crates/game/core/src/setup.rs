//! Match initialization.
//!
//! Builds the opening position: a generated map, unowned resource sites each
//! held by a neutral guardian, starting gold for both sides, round 1.

use crate::config::GameConfig;
use crate::env::{MapGenerator, RngOracle};
use crate::state::{
    Faction, GoldLedger, MatchState, Position, ResourceMeter, ResourceSite, StateError,
    UnitClass, UnitFlags, UnitId,
};

const CORNER_GUARDIAN: &str = "Barbarian";
const CENTRE_GUARDIAN: &str = "Spearman";

/// Creates a new match from `config`, drawing the map from `rng`.
pub fn new_match(config: &GameConfig, rng: &mut dyn RngOracle) -> Result<MatchState, StateError> {
    let map = MapGenerator::new(config.map).generate(rng);
    let dimensions = map.grid.dimensions();
    let sites = map.sites.iter().copied().map(ResourceSite::unowned).collect();

    let mut state = MatchState::new(
        map.grid,
        sites,
        GoldLedger::uniform(config.setup.starting_gold),
        config.setup.first_side,
    );

    if config.setup.place_guardians {
        let centre = Position::new(dimensions.width as i32 / 2, dimensions.height as i32 / 2);
        for site in map.sites {
            let (defense, name) = if site == centre {
                (config.setup.centre_guardian_defense, CENTRE_GUARDIAN)
            } else {
                (config.setup.corner_guardian_defense, CORNER_GUARDIAN)
            };
            place_guardian(&mut state, config, site, defense, name)?;
        }
    }

    Ok(state)
}

/// Places an immobile neutral guardian that never acts.
pub fn place_guardian(
    state: &mut MatchState,
    config: &GameConfig,
    position: Position,
    defense: i32,
    name: &str,
) -> Result<UnitId, StateError> {
    let id = state.add_unit(
        Faction::Neutral,
        UnitClass::Infantry,
        position,
        config.template(UnitClass::Infantry),
    )?;
    if let Some(guard) = state.unit_mut(id) {
        guard.health = ResourceMeter::full(config.setup.guardian_health);
        guard.attack = 0;
        guard.defense = defense;
        guard.movement = ResourceMeter::full(0);
        guard.exhausted = true;
        guard.flags = UnitFlags::GUARD;
        guard.name = Some(name.to_owned());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, TerrainKind};
    use crate::state::Side;

    #[test]
    fn opening_position() {
        let config = GameConfig::default();
        let mut rng = PcgRng::seeded(2024);
        let state = new_match(&config, &mut rng).unwrap();

        assert_eq!(state.round, 1);
        assert_eq!(state.active_side, Side::A);
        assert_eq!(state.gold(Side::A), 50);
        assert_eq!(state.gold(Side::B), 50);
        assert_eq!(state.sites().len(), 5);
        assert!(state.sites().iter().all(|site| site.owner.is_none()));
        assert!(!state.side_has_living_units(Side::A));
        assert!(!state.side_has_living_units(Side::B));

        for site in state.sites() {
            assert_eq!(state.grid.terrain_at(site.position), Some(TerrainKind::Open));
            let guard = state.living_unit_at(site.position).unwrap();
            assert!(guard.is_guard());
            assert_eq!(guard.faction, Faction::Neutral);
            assert_eq!(guard.attack, 0);
            assert!(guard.exhausted);
            assert_eq!(guard.movement.maximum, 0);
        }

        let centre = state.living_unit_at(Position::new(4, 4)).unwrap();
        assert_eq!(centre.defense, 50);
        assert_eq!(centre.name.as_deref(), Some("Spearman"));
        let corner = state.living_unit_at(Position::new(0, 0)).unwrap();
        assert_eq!(corner.defense, 40);
    }

    #[test]
    fn guardians_are_optional() {
        let mut config = GameConfig::default();
        config.setup.place_guardians = false;
        let mut rng = PcgRng::seeded(1);
        let state = new_match(&config, &mut rng).unwrap();
        assert!(state.units.is_empty());
    }
}
