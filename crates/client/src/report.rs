//! JSON summary of a finished match.

use serde::Serialize;

use game_core::Side;
use runtime::{MatchSession, Standing, Topic};

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub round: u32,
    pub standing: Standing,
    pub sides: [SideReport; 2],
    pub events: EventCounts,
}

#[derive(Debug, Serialize)]
pub struct SideReport {
    pub side: Side,
    pub gold: i64,
    pub sites: usize,
    pub units: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct EventCounts {
    pub units: u64,
    pub economy: u64,
    pub turn: u64,
}

impl EventCounts {
    pub fn record(&mut self, topic: Topic, seen: u64) {
        match topic {
            Topic::Units => self.units += seen,
            Topic::Economy => self.economy += seen,
            Topic::Turn => self.turn += seen,
        }
    }
}

impl MatchReport {
    pub fn new(seed: u64, session: &MatchSession) -> Self {
        let state = session.state();
        let side_report = |side: Side| SideReport {
            side,
            gold: state.gold(side),
            sites: state
                .sites()
                .iter()
                .filter(|site| site.owner == Some(side))
                .count(),
            units: state.living_units_of(side).count(),
        };

        Self {
            seed,
            round: state.round,
            standing: session.standing(),
            sides: [side_report(Side::A), side_report(Side::B)],
            events: EventCounts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        GameConfig, GoldLedger, Grid, MapDimensions, MatchState, Position, TerrainKind, UnitClass,
    };
    use serde_json::json;

    #[test]
    fn standing_reads_as_result_and_winner() {
        let victory = serde_json::to_value(Standing::Victory(Side::B)).unwrap();
        assert_eq!(victory, json!({ "result": "victory", "winner": "B" }));

        let limit = serde_json::to_value(Standing::RoundLimit).unwrap();
        assert_eq!(limit, json!({ "result": "round_limit" }));
    }

    #[test]
    fn report_summarizes_both_sides() {
        let config = GameConfig::default();
        let mut state = MatchState::new(
            Grid::filled(MapDimensions::new(4, 4), TerrainKind::Open),
            Vec::new(),
            GoldLedger::new(0, 7),
            Side::A,
        );
        state
            .add_unit(Side::A.into(), UnitClass::Melee, Position::new(0, 3), &config.units.melee)
            .unwrap();
        let session = MatchSession::new(state, config);

        let report = serde_json::to_value(MatchReport::new(9, &session)).unwrap();
        assert_eq!(report["seed"], 9);
        assert_eq!(report["standing"], json!({ "result": "in_progress" }));
        assert_eq!(report["sides"][0]["side"], "A");
        assert_eq!(report["sides"][0]["units"], 1);
        assert_eq!(report["sides"][1]["gold"], 7);
        assert_eq!(report["sides"][1]["sites"], 0);
    }
}
