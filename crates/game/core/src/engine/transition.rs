//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::config::GameConfig;
use crate::state::MatchState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the match state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut MatchState,
    config: &GameConfig,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in ActionResult.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut MatchState,
    config: &GameConfig,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Move(transition) => drive_transition(transition, state, config)
            .map(ActionResult::Move)
            .map_err(ExecuteError::Move),
        Action::Attack(transition) => drive_transition(transition, state, config)
            .map(ActionResult::Attack)
            .map_err(ExecuteError::Attack),
        Action::Fortify(transition) => drive_transition(transition, state, config)
            .map(ActionResult::Fortify)
            .map_err(ExecuteError::Fortify),
        Action::Upgrade(transition) => drive_transition(transition, state, config)
            .map(ActionResult::Upgrade)
            .map_err(ExecuteError::Upgrade),
        Action::Spawn(transition) => drive_transition(transition, state, config)
            .map(ActionResult::Spawn)
            .map_err(ExecuteError::Spawn),
        Action::EndTurn(transition) => drive_transition(transition, state, config)
            .map(ActionResult::EndTurn)
            .map_err(ExecuteError::EndTurn),
    }
}
