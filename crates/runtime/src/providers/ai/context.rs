//! Blackboard shared by the opponent's behavior nodes.

use game_core::{
    Action, ExecuteError, ExecutionOutcome, GameConfig, GameEngine, MatchState, Unit, UnitId,
};

/// Per-turn AI context.
///
/// Holds the match for the duration of the opponent's turn. Nodes read the
/// board through it and submit commands with [`AiContext::execute`], which
/// records every successful outcome for the caller.
pub struct AiContext<'a> {
    unit: UnitId,
    state: &'a mut MatchState,
    config: &'a GameConfig,
    outcomes: Vec<ExecutionOutcome>,
}

impl<'a> AiContext<'a> {
    pub fn new(unit: UnitId, state: &'a mut MatchState, config: &'a GameConfig) -> Self {
        Self {
            unit,
            state,
            config,
            outcomes: Vec::new(),
        }
    }

    /// Switches the unit the next tick acts for.
    pub fn focus(&mut self, unit: UnitId) {
        self.unit = unit;
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit
    }

    pub fn state(&self) -> &MatchState {
        &*self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// The focused unit, if it is still alive.
    pub fn actor(&self) -> Option<&Unit> {
        self.state.unit(self.unit).filter(|unit| unit.is_alive())
    }

    /// Living units of any other faction, neutral guardians included.
    pub fn enemies(&self) -> impl Iterator<Item = &Unit> {
        let faction = self.actor().map(|actor| actor.faction);
        self.state
            .living_units()
            .filter(move |unit| Some(unit.faction) != faction)
    }

    /// First enemy in storage order standing next to the focused unit.
    pub fn adjacent_enemy(&self) -> Option<UnitId> {
        let actor = self.actor()?;
        self.enemies()
            .find(|enemy| enemy.position.is_orthogonally_adjacent(actor.position))
            .map(|enemy| enemy.id)
    }

    /// Nearest enemy by Manhattan distance; ties go to the earliest in storage.
    pub fn nearest_enemy(&self) -> Option<&Unit> {
        let actor = self.actor()?;
        self.enemies()
            .enumerate()
            .min_by_key(|(index, enemy)| (enemy.position.manhattan(actor.position), *index))
            .map(|(_, enemy)| enemy)
    }

    /// Runs a command through the engine and records its outcome.
    pub fn execute(&mut self, action: Action) -> Result<&ExecutionOutcome, ExecuteError> {
        let outcome = GameEngine::new(&mut *self.state, self.config).execute(&action)?;
        self.outcomes.push(outcome);
        Ok(&self.outcomes[self.outcomes.len() - 1])
    }

    pub fn into_outcomes(self) -> Vec<ExecutionOutcome> {
        self.outcomes
    }
}
