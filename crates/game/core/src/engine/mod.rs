//! Command execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`MatchState`]. It
//! checks that the issuing side holds the turn, drives the transition phases,
//! and turns each successful result into [`GameEvent`]s for the runtime.

mod errors;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionActor, ActionResult};
use crate::config::GameConfig;
use crate::error::ErrorContext;
use crate::events::GameEvent;
use crate::state::{Faction, MatchState};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Command-specific result (exchange, settlement, ...).
    pub action_result: ActionResult,

    /// Notifications in the order they happened.
    pub events: Vec<GameEvent>,
}

/// Game engine that validates and applies commands against a match.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// A command either commits fully or leaves the state exactly as it was.
pub struct GameEngine<'a> {
    state: &'a mut MatchState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut MatchState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &MatchState {
        &*self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// Enforces the active-side check before anything else. Should `apply` or
    /// `post_validate` fail, the pre-command state is restored.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(action)?;

        let before = self.state.clone();
        match transition::execute_transition(action, self.state, self.config) {
            Ok(action_result) => {
                let events = action_result.events();
                Ok(ExecutionOutcome {
                    action_result,
                    events,
                })
            }
            Err(error) => {
                if error.phase() != Some(TransitionPhase::PreValidate) {
                    *self.state = before;
                }
                Err(error)
            }
        }
    }

    /// Validates that the issuer of `action` holds the turn.
    ///
    /// Unknown units pass here and are reported by their transition.
    fn validate_actor(&self, action: &Action) -> Result<(), ExecuteError> {
        let active = self.state.active_side;
        let actor = match action.actor() {
            ActionActor::Active => return Ok(()),
            ActionActor::Side(side) => (Faction::Side(side), None),
            ActionActor::Unit(id) => match self.state.unit(id) {
                Some(unit) => (unit.faction, Some((id, unit.position))),
                None => return Ok(()),
            },
        };

        match actor {
            (faction, _) if faction.is_side(active) => Ok(()),
            (faction, unit) => {
                let mut context = ErrorContext::new(self.state.round)
                    .with_message("command issued out of turn");
                if let Some((id, position)) = unit {
                    context = context.with_unit(id).with_position(position);
                }
                Err(ExecuteError::not_active_side(faction, active, context))
            }
        }
    }
}
