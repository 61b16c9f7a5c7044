//! Action domain: the commands a side can issue.
//!
//! Every command is a small value type implementing [`ActionTransition`].
//! The engine drives each one through `pre_validate` → `apply` →
//! `post_validate`; all rule checks live in `pre_validate`, so a rejected
//! command never touches the state.
//!
//! # Module Structure
//!
//! - `movement`: single-step movement (`MoveAction`, `move_unit`)
//! - `combat`: melee exchange between adjacent units (`AttackAction`)
//! - `fortify` / `upgrade`: self-buffs that consume the unit's action
//! - `spawn`: purchase of a new unit (`SpawnAction`)
//! - `end_turn`: settlement plus side flip (`EndTurnAction`)
//! - `capture`: resource-site capture shared by movement and combat

pub mod capture;
pub mod combat;
pub mod end_turn;
pub mod fortify;
pub mod movement;
pub mod spawn;
pub mod upgrade;

pub use capture::{SiteCapture, try_capture};
pub use combat::{AttackAction, AttackError, AttackOutcome};
pub use end_turn::{EndTurnAction, EndTurnError, EndTurnOutcome};
pub use fortify::{FortifyAction, FortifyError, FortifyOutcome};
pub use movement::{MoveAction, MoveError, MoveOutcome, check_move, move_unit};
pub use spawn::{SpawnAction, SpawnError, SpawnOutcome};
pub use upgrade::{UpgradeAction, UpgradeError, UpgradeOutcome};

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::state::{MatchState, Side, UnitId};

/// Defines how a concrete command mutates the match state.
///
/// Implementors surface their rule checks in `pre_validate`, which sees the
/// state **before** mutation, and may check postconditions in
/// `post_validate`. All hooks read tunables from [`GameConfig`].
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the command by mutating the state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Who issues an action, for the active-side check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionActor {
    /// A unit-level command; the unit must belong to the active side.
    Unit(UnitId),
    /// A side-level command; the side must be active.
    Side(Side),
    /// Always issued by whichever side is active.
    Active,
}

/// Top-level command enum.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
    Fortify(FortifyAction),
    Upgrade(UpgradeAction),
    Spawn(SpawnAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn actor(&self) -> ActionActor {
        match self {
            Action::Move(action) => ActionActor::Unit(action.unit),
            Action::Attack(action) => ActionActor::Unit(action.attacker),
            Action::Fortify(action) => ActionActor::Unit(action.unit),
            Action::Upgrade(action) => ActionActor::Unit(action.unit),
            Action::Spawn(action) => ActionActor::Side(action.side),
            Action::EndTurn(_) => ActionActor::Active,
        }
    }

    /// Returns the snake_case name of the command, used in logs.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::Attack(_) => "attack",
            Action::Fortify(_) => "fortify",
            Action::Upgrade(_) => "upgrade",
            Action::Spawn(_) => "spawn",
            Action::EndTurn(_) => "end_turn",
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<AttackAction> for Action {
    fn from(action: AttackAction) -> Self {
        Self::Attack(action)
    }
}

impl From<FortifyAction> for Action {
    fn from(action: FortifyAction) -> Self {
        Self::Fortify(action)
    }
}

impl From<UpgradeAction> for Action {
    fn from(action: UpgradeAction) -> Self {
        Self::Upgrade(action)
    }
}

impl From<SpawnAction> for Action {
    fn from(action: SpawnAction) -> Self {
        Self::Spawn(action)
    }
}

impl From<EndTurnAction> for Action {
    fn from(action: EndTurnAction) -> Self {
        Self::EndTurn(action)
    }
}

/// Command-specific result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveOutcome),
    Attack(AttackOutcome),
    Fortify(FortifyOutcome),
    Upgrade(UpgradeOutcome),
    Spawn(SpawnOutcome),
    EndTurn(EndTurnOutcome),
}

impl ActionResult {
    /// Events describing this result, in the order they happened.
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self {
            ActionResult::Move(outcome) => {
                events.push(GameEvent::UnitMoved {
                    unit: outcome.unit,
                    from: outcome.from,
                    to: outcome.to,
                    cost: outcome.cost,
                    movement_left: outcome.movement_left,
                });
                events.extend(outcome.capture.map(SiteCapture::event));
            }
            ActionResult::Attack(outcome) => {
                events.push(GameEvent::CombatResolved {
                    attacker: outcome.attacker,
                    defender: outcome.defender,
                    exchange: outcome.exchange,
                    attacker_health: outcome.attacker_health,
                    defender_health: outcome.defender_health,
                });
                if outcome.defender_defeated {
                    events.push(GameEvent::UnitDefeated {
                        unit: outcome.defender,
                        position: outcome.defender_position,
                    });
                }
                if outcome.attacker_defeated {
                    events.push(GameEvent::UnitDefeated {
                        unit: outcome.attacker,
                        position: outcome.attacker_position,
                    });
                }
                events.extend(outcome.capture.map(SiteCapture::event));
            }
            ActionResult::Fortify(outcome) => events.push(GameEvent::UnitFortified {
                unit: outcome.unit,
                bonus: outcome.bonus,
                turns: outcome.turns,
            }),
            ActionResult::Upgrade(outcome) => events.push(GameEvent::UnitUpgraded {
                unit: outcome.unit,
                attack: outcome.attack,
                max_health: outcome.max_health,
            }),
            ActionResult::Spawn(outcome) => events.push(GameEvent::UnitSpawned {
                unit: outcome.unit,
                side: outcome.side,
                class: outcome.class,
                position: outcome.position,
                cost: outcome.cost,
            }),
            ActionResult::EndTurn(outcome) => {
                events.push(GameEvent::GoldSettled(outcome.settlement));
                events.extend(outcome.turn.expired.iter().map(|expiry| {
                    GameEvent::FortifyExpired {
                        unit: expiry.unit,
                        defense: expiry.defense,
                    }
                }));
                events.push(GameEvent::TurnEnded {
                    ended: outcome.turn.ended,
                    active: outcome.turn.active,
                    round: outcome.turn.round,
                });
            }
        }
        events
    }
}
