//! Rules engine for a two-sided, turn-based tactics skirmish.
//!
//! `game-core` defines the canonical rules (map, units, combat, economy, turn
//! order) and exposes pure APIs that the runtime and any presentation layer
//! reuse. All state mutation flows through [`engine::GameEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod setup;
pub mod state;
pub mod turn;

pub use action::{
    Action, ActionResult, ActionTransition, AttackAction, AttackError, EndTurnAction,
    FortifyAction, FortifyError, MoveAction, MoveError, SpawnAction, SpawnError, UpgradeAction,
    UpgradeError, move_unit,
};
pub use combat::{CombatParams, Exchange, resolve_exchange};
pub use config::{AbilityParams, GameConfig, SetupParams, UnitTemplate, UnitTemplates};
pub use economy::{EconomyParams, IncomeBasis, Settlement, income_for, settle, upkeep_for};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    Grid, MapDimensions, MapGenParams, MapGenerator, MovementCosts, PcgRng, RngOracle,
    TerrainKind, Tile,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use events::GameEvent;
pub use setup::new_match;
pub use state::{
    CardinalDirection, Faction, GoldLedger, MatchState, Position, ResourceSite, Side, Unit,
    UnitClass, UnitFlags, UnitId,
};
pub use turn::{TurnAdvance, advance_turn};
