//! Static world data and the randomness it is generated from.
//!
//! The grid is produced once per match by [`MapGenerator`] and stays fixed
//! afterwards; everything else in the match reads it through these types.
mod map;
mod mapgen;
mod rng;

pub use map::{Grid, MapDimensions, MovementCosts, TerrainKind, Tile};
pub use mapgen::{GeneratedMap, MapGenParams, MapGenerator, TerrainWeights, resource_site_positions};
pub use rng::{PcgRng, RngOracle};
