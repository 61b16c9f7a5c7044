use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of an in-bounds position.
    fn index_of(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

impl Default for MapDimensions {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Canonical terrain classes. Mountains are the only impassable kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    Open,
    Forest,
    Hill,
    River,
    Marsh,
    Mountain,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TerrainKind::Mountain)
    }
}

/// Immutable descriptor for a single lattice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub terrain: TerrainKind,
}

impl Tile {
    pub const fn new(position: Position, terrain: TerrainKind) -> Self {
        Self { position, terrain }
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Fixed-size tile lattice keyed by coordinate.
///
/// Every in-bounds coordinate holds exactly one tile. Terrain is fixed after
/// generation; the only rewrite is the generator's own normalisation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid with every cell set to `terrain`.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Self {
        let tiles = (0..dimensions.height as i32)
            .flat_map(|y| {
                (0..dimensions.width as i32).map(move |x| Tile::new(Position::new(x, y), terrain))
            })
            .collect();
        Self { dimensions, tiles }
    }

    /// Returns the grid with one cell rewritten. Out-of-bounds positions are ignored.
    pub fn with_terrain(mut self, position: Position, terrain: TerrainKind) -> Self {
        self.set_terrain(position, terrain);
        self
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Looks up a tile; `None` for out-of-bounds coordinates.
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.dimensions
            .index_of(position)
            .and_then(|index| self.tiles.get(index).copied())
    }

    pub fn terrain_at(&self, position: Position) -> Option<TerrainKind> {
        self.tile_at(position).map(|tile| tile.terrain)
    }

    /// Iterates all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Overwrites the terrain at `position`. Returns false when out of bounds.
    pub(crate) fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> bool {
        match self
            .dimensions
            .index_of(position)
            .and_then(|index| self.tiles.get_mut(index))
        {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }
}

/// Per-terrain movement cost table. `None` marks impassable terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementCosts {
    pub open: u32,
    pub forest: u32,
    pub hill: u32,
    pub river: u32,
    pub marsh: u32,
}

impl MovementCosts {
    /// Cost of entering `terrain`, or `None` when it cannot be entered.
    pub fn cost(&self, terrain: TerrainKind) -> Option<u32> {
        match terrain {
            TerrainKind::Open => Some(self.open),
            TerrainKind::Forest => Some(self.forest),
            TerrainKind::Hill => Some(self.hill),
            TerrainKind::River => Some(self.river),
            TerrainKind::Marsh => Some(self.marsh),
            TerrainKind::Mountain => None,
        }
    }

    /// Cost actually paid by a unit for one step onto `terrain`.
    ///
    /// Terrain-ignoring units pay 1 on any passable terrain.
    pub fn step_cost(&self, terrain: TerrainKind, ignores_terrain: bool) -> Option<u32> {
        let cost = self.cost(terrain)?;
        Some(if ignores_terrain { 1 } else { cost })
    }
}

impl Default for MovementCosts {
    fn default() -> Self {
        Self {
            open: 1,
            forest: 2,
            hill: 2,
            river: 2,
            marsh: 3,
        }
    }
}
