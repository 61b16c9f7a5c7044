//! Behavior nodes for the scripted opponent.
//!
//! Nodes act for the unit the [`AiContext`] is focused on and submit their
//! commands through it. A node succeeds only when the engine accepted a
//! command.

use behavior_tree::{Behavior, Selector, Status};
use game_core::{AttackAction, GameError, MoveAction};

use crate::providers::ai::AiContext;

/// Attacks the first adjacent enemy in storage order.
///
/// Fails when no enemy is adjacent or the engine rejects the attack.
pub struct AttackAdjacentEnemy;

impl Behavior<AiContext<'_>> for AttackAdjacentEnemy {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(target) = ctx.adjacent_enemy() else {
            return Status::Failure;
        };
        let attacker = ctx.unit_id();

        match ctx.execute(AttackAction::new(attacker, target).into()) {
            Ok(_) => {
                tracing::debug!("AI unit {} attacked unit {}", attacker, target);
                Status::Success
            }
            Err(error) => {
                tracing::warn!(
                    "AI unit {} could not attack unit {}: {} ({})",
                    attacker,
                    target,
                    error,
                    error.error_code()
                );
                Status::Failure
            }
        }
    }
}

/// Takes one step toward the nearest enemy.
///
/// The four neighbouring cells are ranked by their distance to the target,
/// ties keeping East, West, North, South order, and tried in turn until the
/// engine accepts one. Fails when the unit cannot move, no enemy exists, the
/// enemy is already adjacent, or every step is rejected.
pub struct AdvanceTowardNearestEnemy;

impl Behavior<AiContext<'_>> for AdvanceTowardNearestEnemy {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(actor) = ctx.actor() else {
            return Status::Failure;
        };
        if actor.exhausted || actor.movement.is_empty() {
            return Status::Failure;
        }
        let (unit, from) = (actor.id, actor.position);

        let Some(target) = ctx.nearest_enemy().map(|enemy| enemy.position) else {
            return Status::Failure;
        };
        if from.manhattan(target) <= 1 {
            return Status::Failure;
        }

        let mut candidates = from.neighbors();
        candidates.sort_by_key(|candidate| candidate.manhattan(target));

        for destination in candidates {
            match ctx.execute(MoveAction::new(unit, destination).into()) {
                Ok(_) => {
                    tracing::debug!(
                        "AI unit {} stepped {} -> {} toward {}",
                        unit,
                        from,
                        destination,
                        target
                    );
                    return Status::Success;
                }
                Err(error) => {
                    tracing::trace!(
                        "AI unit {} step to {} rejected: {}",
                        unit,
                        destination,
                        error.error_code()
                    );
                }
            }
        }

        tracing::debug!("AI unit {} found no open step toward {}", unit, target);
        Status::Failure
    }
}

/// `Selector[AttackAdjacentEnemy, AdvanceTowardNearestEnemy]`
pub fn opponent_tree<'a>() -> Selector<AiContext<'a>> {
    Selector::new(vec![
        Box::new(AttackAdjacentEnemy),
        Box::new(AdvanceTowardNearestEnemy),
    ])
}
