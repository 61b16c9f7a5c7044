//! Scripted opponent turn provider.

use behavior_tree::Behavior;
use game_core::{
    ExecutionOutcome, GameConfig, GameEngine, GameError, MatchState, Position, Side, SpawnAction,
    UnitClass,
};
use strum::IntoEnumIterator;

use super::context::AiContext;
use super::nodes::opponent_tree;
use crate::api::{Result, RuntimeError, TurnProvider};

/// Plays a side with the attack-else-advance policy.
///
/// With recruiting enabled the opponent first buys at most one unit per
/// turn: the most expensive class it can afford, placed on the free spawn
/// cell closest to the centre column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedOpponent {
    recruit: bool,
}

impl ScriptedOpponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recruiting(mut self, recruit: bool) -> Self {
        self.recruit = recruit;
        self
    }

    fn recruit(
        &self,
        side: Side,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Option<ExecutionOutcome> {
        let gold = state.gold(side);
        let class = UnitClass::iter()
            .filter_map(|class| config.template(class).cost.map(|cost| (class, cost)))
            .filter(|(_, cost)| i64::from(*cost) <= gold)
            .max_by_key(|(_, cost)| *cost)
            .map(|(class, _)| class)?;

        let centre = state.grid.dimensions().width as i32 / 2;
        let position = state
            .spawn_cells(side, &config.setup)
            .into_iter()
            .min_by_key(|cell: &Position| ((cell.x - centre).abs(), cell.x))?;

        let action = SpawnAction::new(side, class, position).into();
        match GameEngine::new(state, config).execute(&action) {
            Ok(outcome) => {
                tracing::debug!("AI {} recruited {:?} at {}", side, class, position);
                Some(outcome)
            }
            Err(error) => {
                tracing::debug!("AI {} could not recruit: {}", side, error.error_code());
                None
            }
        }
    }
}

impl TurnProvider for ScriptedOpponent {
    fn play_turn(
        &self,
        side: Side,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<Vec<ExecutionOutcome>> {
        if state.active_side != side {
            return Err(RuntimeError::OutOfTurn {
                side,
                active: state.active_side,
            });
        }

        let mut outcomes = Vec::new();
        if self.recruit {
            outcomes.extend(self.recruit(side, state, config));
        }

        let eligible: Vec<_> = state
            .living_units_of(side)
            .filter(|unit| !unit.is_guard() && !unit.exhausted)
            .map(|unit| unit.id)
            .collect();
        let Some(&first) = eligible.first() else {
            tracing::debug!("AI {} has no unit able to act", side);
            return Ok(outcomes);
        };

        let tree = opponent_tree();
        let mut ctx = AiContext::new(first, state, config);
        for unit in eligible {
            ctx.focus(unit);
            // earlier exchanges this turn may have killed or exhausted it
            if !ctx.actor().is_some_and(|actor| !actor.exhausted) {
                continue;
            }
            let status = tree.tick(&mut ctx);
            tracing::debug!("AI unit {} finished with {:?}", unit, status);
        }

        outcomes.extend(ctx.into_outcomes());
        Ok(outcomes)
    }
}
