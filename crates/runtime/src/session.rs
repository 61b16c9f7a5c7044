//! Match session: the single owner of a running match.
//!
//! A [`MatchSession`] holds the [`MatchState`] and its rules, executes
//! commands for whichever side holds the turn, republishes the resulting
//! events on its [`EventBus`], and hands the turn to registered
//! [`TurnProvider`]s until a side without one is to move.

use std::collections::HashMap;

use game_core::{
    Action, EndTurnAction, ExecutionOutcome, GameConfig, GameEngine, GameError, MatchState,
    PcgRng, Side, UnitClass, new_match,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::api::{Result, RuntimeError, TurnProvider};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::providers::ai::ScriptedOpponent;

/// Where the match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "winner", rename_all = "snake_case")]
pub enum Standing {
    InProgress,
    /// The other side has no units left and cannot afford a new one.
    Victory(Side),
    /// Both sides were eliminated at once.
    Stalemate,
    /// The configured round limit was passed.
    RoundLimit,
}

impl Standing {
    pub fn is_over(self) -> bool {
        !matches!(self, Standing::InProgress)
    }
}

pub struct MatchSession {
    state: MatchState,
    config: GameConfig,
    bus: EventBus,
    providers: HashMap<Side, Box<dyn TurnProvider>>,
    max_rounds: u32,
}

impl MatchSession {
    /// Wraps an existing match. No side is scripted.
    pub fn new(state: MatchState, config: GameConfig) -> Self {
        Self {
            state,
            config,
            bus: EventBus::new(),
            providers: HashMap::new(),
            max_rounds: RuntimeConfig::default().max_rounds,
        }
    }

    /// Generates a fresh match from `config` with the given map seed.
    pub fn start(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = PcgRng::seeded(seed);
        let state = new_match(&config, &mut rng).map_err(RuntimeError::Setup)?;
        let dimensions = state.grid.dimensions();
        tracing::info!(
            "Match started: seed={} map={}x{} sites={}",
            seed,
            dimensions.width,
            dimensions.height,
            state.sites().len()
        );
        Ok(Self::new(state, config))
    }

    /// Starts a match and registers the scripted opponent `runtime` asks for.
    pub fn from_runtime_config(config: GameConfig, runtime: &RuntimeConfig) -> Result<Self> {
        let mut session = Self::start(config, runtime.resolve_seed())?;
        session.max_rounds = runtime.max_rounds;
        if let Some(side) = runtime.opponent {
            tracing::info!("Scripted opponent plays {}", side);
            session = session.with_provider(
                side,
                ScriptedOpponent::new().with_recruiting(runtime.opponent_recruits),
            );
        }
        Ok(session)
    }

    pub fn with_provider(mut self, side: Side, provider: impl TurnProvider + 'static) -> Self {
        self.providers.insert(side, Box::new(provider));
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn is_scripted(&self, side: Side) -> bool {
        self.providers.contains_key(&side)
    }

    /// A side is eliminated once it has no units and cannot buy one.
    pub fn is_eliminated(&self, side: Side) -> bool {
        let cheapest = UnitClass::iter()
            .filter_map(|class| self.config.template(class).cost)
            .min();
        let can_recruit = cheapest.is_some_and(|cost| self.state.gold(side) >= i64::from(cost));
        !self.state.side_has_living_units(side) && !can_recruit
    }

    pub fn standing(&self) -> Standing {
        match (self.is_eliminated(Side::A), self.is_eliminated(Side::B)) {
            (true, true) => Standing::Stalemate,
            (true, false) => Standing::Victory(Side::B),
            (false, true) => Standing::Victory(Side::A),
            (false, false) if self.state.round > self.max_rounds => Standing::RoundLimit,
            (false, false) => Standing::InProgress,
        }
    }

    /// Executes a command for the side holding the turn.
    ///
    /// An `EndTurn` also lets any scripted sides play before returning; their
    /// outcomes reach subscribers through the bus. Use [`Self::end_turn`] to
    /// receive them directly.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome> {
        self.ensure_running()?;
        let outcome = self.run(action)?;
        if matches!(action, Action::EndTurn(_)) {
            self.drive_providers(&mut Vec::new())?;
        }
        Ok(outcome)
    }

    /// Ends the current turn, then plays every scripted turn that follows.
    pub fn end_turn(&mut self) -> Result<Vec<ExecutionOutcome>> {
        self.ensure_running()?;
        let mut outcomes = vec![self.run(&Action::EndTurn(EndTurnAction))?];
        self.drive_providers(&mut outcomes)?;
        Ok(outcomes)
    }

    /// Plays scripted turns until a side without a provider is to move or
    /// the match ends. Does nothing when the active side is not scripted.
    pub fn advance(&mut self) -> Result<Vec<ExecutionOutcome>> {
        let mut outcomes = Vec::new();
        self.drive_providers(&mut outcomes)?;
        Ok(outcomes)
    }

    fn ensure_running(&self) -> Result<()> {
        if self.standing().is_over() {
            return Err(RuntimeError::MatchOver {
                round: self.state.round,
            });
        }
        Ok(())
    }

    fn drive_providers(&mut self, outcomes: &mut Vec<ExecutionOutcome>) -> Result<()> {
        while !self.standing().is_over() {
            let side = self.state.active_side;
            let round = self.state.round;
            let Some(provider) = self.providers.get(&side) else {
                break;
            };

            let played = provider.play_turn(side, &mut self.state, &self.config)?;
            tracing::debug!("{} issued {} commands in round {}", side, played.len(), round);
            for outcome in &played {
                self.publish(side, round, outcome);
            }
            outcomes.extend(played);

            if self.standing().is_over() {
                break;
            }
            outcomes.push(self.run(&Action::EndTurn(EndTurnAction))?);
        }

        let standing = self.standing();
        if standing.is_over() {
            tracing::info!("Match over in round {}: {:?}", self.state.round, standing);
        }
        Ok(())
    }

    /// Runs one command through the engine and publishes its events.
    fn run(&mut self, action: &Action) -> Result<ExecutionOutcome> {
        let side = self.state.active_side;
        let round = self.state.round;

        let result = GameEngine::new(&mut self.state, &self.config).execute(action);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(error) => {
                if error.severity().is_internal() {
                    tracing::error!(
                        "{} by {} broke an engine invariant: {} ({})",
                        action.as_snake_case(),
                        side,
                        error,
                        error.error_code()
                    );
                } else {
                    tracing::debug!(
                        "{} rejected for {}: {} ({})",
                        action.as_snake_case(),
                        side,
                        error,
                        error.error_code()
                    );
                }
                return Err(error.into());
            }
        };

        tracing::debug!(
            "{} by {} produced {} events",
            action.as_snake_case(),
            side,
            outcome.events.len()
        );
        self.publish(side, round, &outcome);

        if matches!(action, Action::EndTurn(_)) {
            tracing::info!(
                "Round {}: {} to move, gold A={} B={}",
                self.state.round,
                self.state.active_side,
                self.state.gold(Side::A),
                self.state.gold(Side::B)
            );
        }
        Ok(outcome)
    }

    fn publish(&self, side: Side, round: u32, outcome: &ExecutionOutcome) {
        for event in &outcome.events {
            self.bus.publish(Event {
                round,
                side,
                event: event.clone(),
            });
        }
    }
}
