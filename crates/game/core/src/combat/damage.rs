//! Damage calculation and application.

use crate::state::Unit;

use super::CombatParams;

/// Damage produced by a strength gap of `diff`.
///
/// # Formula
///
/// ```text
/// damage = round(max(1, base × growth^diff))
/// ```
///
/// Every point of advantage swings damage by a fixed percentage. The result
/// is never below 1; overflowing values saturate at `u32::MAX`.
pub fn scaled_damage(diff: f64, params: &CombatParams) -> u32 {
    let raw = params.base_damage * params.damage_growth.powf(diff);
    raw.max(1.0).round() as u32
}

/// Damage to the defender and to the attacker for a given pair of strengths.
///
/// The response is symmetric: the attacker takes what the defender would
/// deal with the gap reversed.
pub fn exchange_damage(attack: f64, defense: f64, params: &CombatParams) -> (u32, u32) {
    let diff = attack - defense;
    (scaled_damage(diff, params), scaled_damage(-diff, params))
}

/// Subtracts damage from a unit's hit points, saturating at zero.
///
/// Returns true when the unit died from this hit.
pub fn apply_damage(unit: &mut Unit, damage: u32) -> bool {
    let was_alive = unit.is_alive();
    unit.health.drain(damage);
    was_alive && !unit.is_alive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_fight_deals_base_damage() {
        let params = CombatParams::default();
        assert_eq!(exchange_damage(35.0, 35.0, &params), (30, 30));
    }

    #[test]
    fn growth_swings_damage_per_point() {
        let params = CombatParams::default();
        // 30 × 1.04^10 ≈ 44.4, 30 × 1.04^-10 ≈ 20.3
        assert_eq!(exchange_damage(45.0, 35.0, &params), (44, 20));
    }

    #[test]
    fn extreme_gaps_clamp_to_one() {
        let params = CombatParams::default();
        let (to_defender, to_attacker) = exchange_damage(0.0, 10_000.0, &params);
        assert_eq!(to_defender, 1);
        assert_eq!(to_attacker, u32::MAX);
    }
}
