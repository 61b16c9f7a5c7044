//! Common error infrastructure for game-core.
//!
//! Command-specific errors (`MoveError`, `AttackError`, ...) live next to the
//! actions they validate. They all implement [`GameError`] so callers can
//! classify a rejection without matching on every variant.
//!
//! Rejections are ordinary outcomes in this engine: an occupied tile or an
//! empty purse is reported, the state is left untouched, and the caller
//! decides whether to re-prompt or ignore it.

use crate::state::{Position, UnitId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same command may succeed later (next turn, after a move)
/// - **Validation**: the command is malformed for the current board and should not be retried as-is
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the match cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: unit already exhausted, not enough gold.
    Recoverable,

    /// Examples: unit not found, destination not adjacent.
    Validation,

    /// Examples: unit vanished between validation and mutation.
    Internal,

    /// Examples: unit id space exhausted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub unit: Option<UnitId>,
    pub position: Option<Position>,
    /// Round counter at the time of the error.
    pub round: u32,
    #[cfg_attr(feature = "serde", serde(skip_deserializing))]
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(round: u32) -> Self {
        Self {
            unit: None,
            position: None,
            round,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_unit(mut self, unit: UnitId) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable, upper snake case, prefixed by the command
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
