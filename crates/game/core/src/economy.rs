//! Gold income and upkeep.
//!
//! Income follows a diminishing schedule over controlled sites; upkeep is
//! charged per fielded unit. Settlement adds `income - upkeep` to the side's
//! balance, which is allowed to go negative.

use crate::config::{GameConfig, UnitTemplates};
use crate::state::{MatchState, Side};

/// Marginal income of the first, second, ... controlled site.
pub const DEFAULT_INCOME_SCHEDULE: [u32; 5] = [5, 4, 3, 2, 1];

/// Income of every site past the end of a schedule.
pub const TAIL_SITE_INCOME: u32 = 1;

/// Which sites count toward a side's income.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncomeBasis {
    /// Sites the side has captured.
    #[default]
    Owned,
    /// Sites a living unit of the side currently stands on.
    Garrisoned,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyParams {
    pub income_basis: IncomeBasis,
    /// Sites past the end of the schedule each yield [`TAIL_SITE_INCOME`],
    /// whatever the schedule's last entry is.
    pub income_schedule: Vec<u32>,
}

impl EconomyParams {
    pub fn income_for(&self, sites: u32) -> u32 {
        income_from_schedule(&self.income_schedule, sites)
    }

    /// Number of sites that count toward `side`'s income.
    pub fn counted_sites(&self, state: &MatchState, side: Side) -> u32 {
        match self.income_basis {
            IncomeBasis::Owned => state.owned_site_count(side),
            IncomeBasis::Garrisoned => state.garrisoned_site_count(side),
        }
    }
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            income_basis: IncomeBasis::Owned,
            income_schedule: DEFAULT_INCOME_SCHEDULE.to_vec(),
        }
    }
}

/// Income for `sites` controlled sites under the default schedule.
///
/// 0, 1, 2, 3, 4, 5 sites yield 0, 5, 9, 12, 14, 15.
pub fn income_for(sites: u32) -> u32 {
    income_from_schedule(&DEFAULT_INCOME_SCHEDULE, sites)
}

fn income_from_schedule(schedule: &[u32], sites: u32) -> u32 {
    (0..sites as usize)
        .map(|index| schedule.get(index).copied().unwrap_or(TAIL_SITE_INCOME))
        .fold(0u32, u32::saturating_add)
}

/// Upkeep owed by `side`: template upkeep over its living, non-guardian units.
pub fn upkeep_for(state: &MatchState, side: Side, templates: &UnitTemplates) -> u32 {
    state
        .living_units_of(side)
        .filter(|unit| !unit.is_guard())
        .map(|unit| templates.get(unit.class).upkeep)
        .sum()
}

/// Outcome of one settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    pub side: Side,
    pub income: u32,
    pub upkeep: u32,
    /// Balance after settlement.
    pub balance: i64,
}

/// Applies `gold[side] += income - upkeep`. No lower bound.
pub fn settle(state: &mut MatchState, side: Side, config: &GameConfig) -> Settlement {
    let income = config
        .economy
        .income_for(config.economy.counted_sites(state, side));
    let upkeep = upkeep_for(state, side, &config.units);

    let gold = state.gold.get_mut(side);
    *gold += i64::from(income) - i64::from(upkeep);

    Settlement {
        side,
        income,
        upkeep,
        balance: *gold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Grid, MapDimensions, TerrainKind};
    use crate::state::{GoldLedger, Position, ResourceSite, UnitClass};

    #[test]
    fn income_diminishes_per_site() {
        let incomes: Vec<u32> = (0..=7).map(income_for).collect();
        assert_eq!(incomes, vec![0, 5, 9, 12, 14, 15, 16, 17]);
    }

    #[test]
    fn sites_past_a_custom_schedule_yield_one() {
        let params = EconomyParams {
            income_schedule: vec![10, 6],
            ..EconomyParams::default()
        };
        assert_eq!(params.income_for(2), 16);
        assert_eq!(params.income_for(4), 18);

        let empty = EconomyParams {
            income_schedule: Vec::new(),
            ..EconomyParams::default()
        };
        assert_eq!(empty.income_for(3), 3);
    }

    fn state_with_sites() -> MatchState {
        let sites = vec![
            ResourceSite {
                position: Position::new(0, 0),
                owner: Some(Side::A),
            },
            ResourceSite {
                position: Position::new(3, 0),
                owner: Some(Side::A),
            },
            ResourceSite::unowned(Position::new(3, 3)),
        ];
        MatchState::new(
            Grid::filled(MapDimensions::new(4, 4), TerrainKind::Open),
            sites,
            GoldLedger::uniform(10),
            Side::A,
        )
    }

    #[test]
    fn settlement_may_go_negative() {
        let config = GameConfig::default();
        let mut state = state_with_sites();
        state.gold = GoldLedger::new(0, 0);
        for x in 0..3 {
            state
                .add_unit(
                    Side::B.into(),
                    UnitClass::Melee,
                    Position::new(x, 2),
                    &config.units.melee,
                )
                .unwrap();
        }

        let settlement = settle(&mut state, Side::B, &config);
        assert_eq!(settlement.income, 0);
        assert_eq!(settlement.upkeep, 3);
        assert_eq!(settlement.balance, -3);
        assert_eq!(state.gold(Side::B), -3);
        assert_eq!(state.gold(Side::A), 0);
    }

    #[test]
    fn income_basis_selects_counted_sites() {
        let mut config = GameConfig::default();
        let mut state = state_with_sites();
        state
            .add_unit(
                Side::A.into(),
                UnitClass::Scout,
                Position::new(3, 3),
                &config.units.scout,
            )
            .unwrap();

        let owned = settle(&mut state, Side::A, &config);
        assert_eq!((owned.income, owned.upkeep, owned.balance), (9, 0, 19));

        config.economy.income_basis = IncomeBasis::Garrisoned;
        let garrisoned = settle(&mut state, Side::A, &config);
        assert_eq!((garrisoned.income, garrisoned.balance), (5, 24));
    }
}
