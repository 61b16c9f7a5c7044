use crate::env::TerrainKind;

/// Balance parameters for the damage exchange.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    /// Damage dealt when both strengths are equal.
    pub base_damage: f64,
    /// Multiplicative damage swing per point of strength advantage.
    pub damage_growth: f64,
    /// Injury factor at zero health; scales linearly to 1.0 at full health.
    pub min_injury_factor: f64,
    /// Attack bonus per attacker ally adjacent to the defender.
    pub flank_bonus: f64,
    /// Defense bonus per defender ally adjacent to the defender.
    pub support_bonus: f64,
    /// Attack penalty when either combatant stands in a river.
    pub river_penalty: f64,
    pub forest_defense: f64,
    pub hill_defense: f64,
    pub marsh_defense: f64,
}

impl CombatParams {
    /// Defense modifier granted by the defender's tile.
    pub fn terrain_defense(&self, terrain: TerrainKind) -> f64 {
        match terrain {
            TerrainKind::Forest => self.forest_defense,
            TerrainKind::Hill => self.hill_defense,
            TerrainKind::Marsh => self.marsh_defense,
            TerrainKind::Open | TerrainKind::River | TerrainKind::Mountain => 0.0,
        }
    }
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            base_damage: 30.0,
            damage_growth: 1.04,
            min_injury_factor: 0.5,
            flank_bonus: 5.0,
            support_bonus: 5.0,
            river_penalty: 5.0,
            forest_defense: 5.0,
            hill_defense: 8.0,
            marsh_defense: -5.0,
        }
    }
}
