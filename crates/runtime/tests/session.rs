//! Session-level turn hand-over and self-play.

use game_core::{
    Action, ActionResult, GameConfig, GoldLedger, Grid, MapDimensions, MatchState, MoveAction,
    Position, Side, TerrainKind, UnitClass,
};
use runtime::{MatchSession, RuntimeConfig, ScriptedOpponent, Standing, Topic};

#[test]
fn ending_a_turn_lets_the_opponent_play() {
    let config = GameConfig::default();
    let mut state = MatchState::new(
        Grid::filled(MapDimensions::new(8, 8), TerrainKind::Open),
        Vec::new(),
        GoldLedger::uniform(50),
        Side::A,
    );
    let human = state
        .add_unit(Side::A.into(), UnitClass::Melee, Position::new(1, 6), &config.units.melee)
        .unwrap();
    let ai = state
        .add_unit(Side::B.into(), UnitClass::Melee, Position::new(1, 1), &config.units.melee)
        .unwrap();

    let mut session = MatchSession::new(state, config).with_provider(Side::B, ScriptedOpponent::new());
    let mut turns = session.subscribe(Topic::Turn);

    let step: Action = MoveAction::new(human, Position::new(1, 5)).into();
    session.execute(&step).unwrap();
    let outcomes = session.end_turn().unwrap();

    let kinds: Vec<_> = outcomes
        .iter()
        .map(|outcome| match outcome.action_result {
            ActionResult::EndTurn(_) => "end_turn",
            ActionResult::Move(_) => "move",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["end_turn", "move", "end_turn"]);

    assert_eq!(session.state().unit(ai).unwrap().position, Position::new(1, 2));
    assert_eq!(session.state().active_side, Side::A);
    assert_eq!(session.state().round, 2);
    assert_eq!(turns.try_recv().unwrap().side, Side::A);
    assert_eq!(turns.try_recv().unwrap().side, Side::B);
}

#[test]
fn self_play_always_terminates() {
    let runtime = RuntimeConfig {
        seed: Some(42),
        opponent: Some(Side::B),
        max_rounds: 12,
        ..RuntimeConfig::default()
    };
    let mut session = MatchSession::from_runtime_config(GameConfig::default(), &runtime)
        .unwrap()
        .with_provider(Side::A, ScriptedOpponent::new().with_recruiting(true));
    assert!(session.is_scripted(Side::A));
    assert!(session.is_scripted(Side::B));

    session.advance().unwrap();

    let standing = session.standing();
    assert!(standing.is_over());
    assert!(session.state().round <= 13);
    if standing == Standing::RoundLimit {
        assert_eq!(session.state().round, 13);
    }
}
