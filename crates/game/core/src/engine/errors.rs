//! Error types for action execution pipeline.

use crate::action::{
    ActionTransition, AttackAction, EndTurnAction, FortifyAction, MoveAction, SpawnAction,
    UpgradeAction,
};
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{Faction, Side};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("attack action failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("fortify action failed: {0}")]
    Fortify(PhaseError<FortifyAction>),

    #[error("upgrade action failed: {0}")]
    Upgrade(PhaseError<UpgradeAction>),

    #[error("spawn action failed: {0}")]
    Spawn(PhaseError<SpawnAction>),

    #[error("end turn action failed: {0}")]
    EndTurn(PhaseError<EndTurnAction>),

    #[error("invalid actor: {actor} cannot act while {active} is active")]
    NotActiveSide {
        actor: Faction,
        active: Side,
        context: ErrorContext,
    },
}

impl ExecuteError {
    pub fn not_active_side(actor: Faction, active: Side, context: ErrorContext) -> Self {
        Self::NotActiveSide {
            actor,
            active,
            context,
        }
    }

    /// Pipeline phase that failed; `None` for the active-side check.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(error) => Some(error.phase),
            Self::Attack(error) => Some(error.phase),
            Self::Fortify(error) => Some(error.phase),
            Self::Upgrade(error) => Some(error.phase),
            Self::Spawn(error) => Some(error.phase),
            Self::EndTurn(error) => Some(error.phase),
            Self::NotActiveSide { .. } => None,
        }
    }

    fn inner(&self) -> Option<&dyn GameError> {
        match self {
            Self::Move(error) => Some(&error.error),
            Self::Attack(error) => Some(&error.error),
            Self::Fortify(error) => Some(&error.error),
            Self::Upgrade(error) => Some(&error.error),
            Self::Spawn(error) => Some(&error.error),
            Self::EndTurn(error) => Some(&error.error),
            Self::NotActiveSide { .. } => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.inner() {
            // a check that passed validation but failed later is a bug
            Some(_) if self.phase() != Some(TransitionPhase::PreValidate) => {
                ErrorSeverity::Internal
            }
            Some(inner) => inner.severity(),
            None => ErrorSeverity::Recoverable,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotActiveSide { context, .. } => Some(context),
            _ => self.inner().and_then(|inner| inner.context()),
        }
    }

    fn error_code(&self) -> &'static str {
        match self.inner() {
            Some(inner) => inner.error_code(),
            None => "EXECUTE_NOT_ACTIVE_SIDE",
        }
    }
}
