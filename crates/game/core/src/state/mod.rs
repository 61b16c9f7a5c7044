//! Authoritative match state representation.
//!
//! [`MatchState`] is the single source of truth for a match. It is owned by
//! the orchestrating caller; every rule in this crate borrows it and mutates
//! it in place, and nothing keeps a private copy of units or tiles.
pub mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    CardinalDirection, Faction, FortifyBuff, GoldLedger, Position, ResourceMeter, ResourceSite,
    Side, Unit, UnitClass, UnitFlags, UnitId,
};

use crate::config::{SetupParams, UnitTemplate};
use crate::env::{Grid, Tile};

/// Canonical snapshot of a running match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub active_side: Side,
    /// Starts at 1 and advances when the round-advancing side becomes active.
    pub round: u32,
    pub grid: Grid,
    pub sites: Vec<ResourceSite>,
    /// All units ever placed, in placement order. Dead units stay here.
    pub units: Vec<Unit>,
    pub gold: GoldLedger,

    /// Sequential unit ID allocator (monotonically increasing, never reused).
    next_unit_id: u32,
}

impl MatchState {
    /// Creates a fresh state at round 1 with no units.
    pub fn new(grid: Grid, sites: Vec<ResourceSite>, gold: GoldLedger, first_side: Side) -> Self {
        Self {
            active_side: first_side,
            round: 1,
            grid,
            sites,
            units: Vec::new(),
            gold,
            next_unit_id: 1,
        }
    }

    // ===== queries =====

    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.grid.tile_at(position)
    }

    /// Looks up a unit by id, dead or alive.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// Living units in storage order.
    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    /// Living units fielded by `side`, guardians excluded.
    pub fn living_units_of(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.living_units()
            .filter(move |unit| unit.faction.is_side(side))
    }

    /// The living unit standing on `position`, if any.
    pub fn living_unit_at(&self, position: Position) -> Option<&Unit> {
        self.living_units().find(|unit| unit.position == position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.living_unit_at(position).is_some()
    }

    pub fn gold(&self, side: Side) -> i64 {
        self.gold.get(side)
    }

    pub fn sites(&self) -> &[ResourceSite] {
        &self.sites
    }

    pub fn site_at(&self, position: Position) -> Option<&ResourceSite> {
        self.sites.iter().find(|site| site.position == position)
    }

    pub(crate) fn site_at_mut(&mut self, position: Position) -> Option<&mut ResourceSite> {
        self.sites.iter_mut().find(|site| site.position == position)
    }

    pub fn owned_site_count(&self, side: Side) -> u32 {
        self.sites.iter().filter(|site| site.is_owned_by(side)).count() as u32
    }

    /// Sites with a living unit of `side` standing on them.
    pub fn garrisoned_site_count(&self, side: Side) -> u32 {
        self.sites
            .iter()
            .filter(|site| {
                self.living_unit_at(site.position)
                    .is_some_and(|unit| unit.faction.is_side(side))
            })
            .count() as u32
    }

    pub fn side_has_living_units(&self, side: Side) -> bool {
        self.living_units_of(side).next().is_some()
    }

    /// Free, passable cells on which `side` may place a new unit.
    pub fn spawn_cells(&self, side: Side, setup: &SetupParams) -> Vec<Position> {
        let home_row = setup.home_row(side, self.grid.dimensions().height);
        self.grid
            .tiles()
            .filter(|tile| !setup.home_row_spawns || tile.position.y == home_row)
            .filter(|tile| tile.is_passable() && !self.is_occupied(tile.position))
            .map(|tile| tile.position)
            .collect()
    }

    /// Checks that a new unit could stand on `position`.
    pub fn check_placement(&self, position: Position) -> Result<(), StateError> {
        let tile = self.tile_at(position).ok_or_else(|| {
            let dimensions = self.grid.dimensions();
            StateError::PositionOutOfBounds {
                position,
                width: dimensions.width,
                height: dimensions.height,
            }
        })?;
        if !tile.is_passable() {
            return Err(StateError::PositionImpassable { position });
        }
        if let Some(occupant) = self.living_unit_at(position) {
            return Err(StateError::PositionOccupied {
                position,
                occupant: occupant.id,
            });
        }
        Ok(())
    }

    // ===== mutation helpers =====

    /// Allocates a new unique UnitId.
    pub fn allocate_unit_id(&mut self) -> Result<UnitId, StateError> {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id = self
            .next_unit_id
            .checked_add(1)
            .ok_or(StateError::UnitIdOverflow {
                current: self.next_unit_id,
            })?;
        Ok(id)
    }

    /// Places a fresh unit built from `template`.
    ///
    /// The unit starts at full health and movement and is not exhausted.
    pub fn add_unit(
        &mut self,
        faction: Faction,
        class: UnitClass,
        position: Position,
        template: &UnitTemplate,
    ) -> Result<UnitId, StateError> {
        self.check_placement(position)?;
        let id = self.allocate_unit_id()?;
        self.units
            .push(Unit::from_template(id, faction, class, position, template));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{MapDimensions, TerrainKind};

    fn open_state() -> MatchState {
        MatchState::new(
            Grid::filled(MapDimensions::new(4, 4), TerrainKind::Open),
            vec![ResourceSite::unowned(Position::new(0, 0))],
            GoldLedger::uniform(50),
            Side::A,
        )
    }

    #[test]
    fn dead_units_vanish_from_spatial_queries() {
        let config = GameConfig::default();
        let mut state = open_state();
        let id = state
            .add_unit(
                Side::A.into(),
                UnitClass::Melee,
                Position::new(1, 1),
                &config.units.melee,
            )
            .unwrap();
        assert!(state.is_occupied(Position::new(1, 1)));

        state.unit_mut(id).unwrap().health.current = 0;
        assert!(state.unit(id).is_some());
        assert!(state.living_unit_at(Position::new(1, 1)).is_none());
        assert!(!state.side_has_living_units(Side::A));

        // the tile is free again
        state
            .add_unit(
                Side::B.into(),
                UnitClass::Scout,
                Position::new(1, 1),
                &config.units.scout,
            )
            .unwrap();
    }

    #[test]
    fn placement_rejects_occupied_and_blocked_cells() {
        let config = GameConfig::default();
        let mut state = open_state();
        state.grid.set_terrain(Position::new(2, 2), TerrainKind::Mountain);
        let first = state
            .add_unit(
                Side::A.into(),
                UnitClass::Melee,
                Position::new(0, 1),
                &config.units.melee,
            )
            .unwrap();

        assert_eq!(
            state.check_placement(Position::new(0, 1)),
            Err(StateError::PositionOccupied {
                position: Position::new(0, 1),
                occupant: first,
            })
        );
        assert_eq!(
            state.check_placement(Position::new(2, 2)),
            Err(StateError::PositionImpassable {
                position: Position::new(2, 2)
            })
        );
        assert!(matches!(
            state.check_placement(Position::new(9, 0)),
            Err(StateError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn unit_ids_are_sequential() {
        let mut state = open_state();
        assert_eq!(state.allocate_unit_id(), Ok(UnitId(1)));
        assert_eq!(state.allocate_unit_id(), Ok(UnitId(2)));
    }

    #[test]
    fn garrison_counts_only_living_side_units_on_sites() {
        let config = GameConfig::default();
        let mut state = open_state();
        assert_eq!(state.garrisoned_site_count(Side::A), 0);
        let id = state
            .add_unit(
                Side::A.into(),
                UnitClass::Scout,
                Position::new(0, 0),
                &config.units.scout,
            )
            .unwrap();
        assert_eq!(state.garrisoned_site_count(Side::A), 1);
        assert_eq!(state.garrisoned_site_count(Side::B), 0);
        assert_eq!(state.owned_site_count(Side::A), 0);

        state.unit_mut(id).unwrap().health.current = 0;
        assert_eq!(state.garrisoned_site_count(Side::A), 0);
    }

    #[test]
    fn spawn_cells_follow_home_row() {
        let config = GameConfig::default();
        let mut state = open_state();
        state.grid.set_terrain(Position::new(1, 3), TerrainKind::Mountain);
        state
            .add_unit(
                Side::A.into(),
                UnitClass::Melee,
                Position::new(2, 3),
                &config.units.melee,
            )
            .unwrap();

        let cells = state.spawn_cells(Side::A, &config.setup);
        assert_eq!(cells, vec![Position::new(0, 3), Position::new(3, 3)]);

        let open = SetupParams {
            home_row_spawns: false,
            ..config.setup
        };
        assert_eq!(state.spawn_cells(Side::B, &open).len(), 14);
    }
}
