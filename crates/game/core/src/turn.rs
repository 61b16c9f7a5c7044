//! Two-state turn machine: side A active ⇄ side B active.
//!
//! No state is terminal. The machine cycles until the caller detects a
//! victory condition.

use crate::config::SetupParams;
use crate::state::{MatchState, Side, UnitId};

/// A fortify buff that ran out and was removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FortifyExpiry {
    pub unit: UnitId,
    /// Defense after the bonus was removed.
    pub defense: i32,
}

/// Summary of one side flip.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnAdvance {
    pub ended: Side,
    pub active: Side,
    pub round: u32,
    pub round_advanced: bool,
    /// Living units of the new side whose budgets were restored.
    pub refreshed: u32,
    pub expired: Vec<FortifyExpiry>,
}

/// Flips the active side and prepares the new side's units.
///
/// Living units of the newly active side get full movement and lose their
/// exhaustion. Their fortify countdowns tick down; a countdown reaching zero
/// removes exactly the bonus it added. The round counter advances when the
/// round-advancing side becomes active.
pub fn advance_turn(state: &mut MatchState, setup: &SetupParams) -> TurnAdvance {
    let ended = state.active_side;
    let active = ended.opponent();
    state.active_side = active;

    let mut refreshed = 0;
    let mut expired = Vec::new();
    for unit in state
        .units
        .iter_mut()
        .filter(|unit| unit.is_alive() && unit.faction.is_side(active))
    {
        unit.refresh();
        refreshed += 1;

        if let Some(buff) = unit.fortify.as_mut() {
            buff.turns_left = buff.turns_left.saturating_sub(1);
            if buff.turns_left == 0 {
                unit.defense -= buff.bonus;
                unit.fortify = None;
                expired.push(FortifyExpiry {
                    unit: unit.id,
                    defense: unit.defense,
                });
            }
        }
    }

    let round_advanced = active == setup.round_advancing_side;
    if round_advanced {
        state.round = state.round.saturating_add(1);
    }

    TurnAdvance {
        ended,
        active,
        round: state.round,
        round_advanced,
        refreshed,
        expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Grid, MapDimensions, TerrainKind};
    use crate::state::{FortifyBuff, GoldLedger, Position, UnitClass};

    fn state() -> (MatchState, GameConfig) {
        let config = GameConfig::default();
        let state = MatchState::new(
            Grid::filled(MapDimensions::new(4, 4), TerrainKind::Open),
            Vec::new(),
            GoldLedger::default(),
            Side::A,
        );
        (state, config)
    }

    #[test]
    fn round_advances_when_side_a_returns() {
        let (mut state, config) = state();
        let first = advance_turn(&mut state, &config.setup);
        assert_eq!((first.ended, first.active, first.round), (Side::A, Side::B, 1));
        assert!(!first.round_advanced);

        let second = advance_turn(&mut state, &config.setup);
        assert_eq!((second.active, second.round), (Side::A, 2));
        assert!(second.round_advanced);
    }

    #[test]
    fn only_new_side_is_refreshed() {
        let (mut state, config) = state();
        let a = state
            .add_unit(Side::A.into(), UnitClass::Melee, Position::new(0, 0), &config.units.melee)
            .unwrap();
        let b = state
            .add_unit(Side::B.into(), UnitClass::Melee, Position::new(1, 0), &config.units.melee)
            .unwrap();
        let dead = state
            .add_unit(Side::B.into(), UnitClass::Melee, Position::new(2, 0), &config.units.melee)
            .unwrap();
        for id in [a, b, dead] {
            state.unit_mut(id).unwrap().exhaust();
        }
        state.unit_mut(dead).unwrap().health.current = 0;

        let advance = advance_turn(&mut state, &config.setup);
        assert_eq!(advance.refreshed, 1);
        assert!(!state.unit(b).unwrap().exhausted);
        assert_eq!(state.unit(b).unwrap().movement.current, 3);
        assert!(state.unit(a).unwrap().exhausted);
        assert!(state.unit(dead).unwrap().exhausted);
    }

    #[test]
    fn fortify_expires_on_owners_next_turn() {
        let (mut state, config) = state();
        let a = state
            .add_unit(Side::A.into(), UnitClass::Melee, Position::new(0, 0), &config.units.melee)
            .unwrap();
        let unit = state.unit_mut(a).unwrap();
        unit.defense += 5;
        unit.fortify = Some(FortifyBuff {
            bonus: 5,
            turns_left: 1,
        });

        // opponent's turn: buff still up
        let to_b = advance_turn(&mut state, &config.setup);
        assert!(to_b.expired.is_empty());
        assert_eq!(state.unit(a).unwrap().defense, 40);

        let to_a = advance_turn(&mut state, &config.setup);
        assert_eq!(to_a.expired, vec![FortifyExpiry { unit: a, defense: 35 }]);
        assert_eq!(state.unit(a).unwrap().fortify, None);
    }
}
