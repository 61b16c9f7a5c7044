//! Rule-following scripted opponent.
//!
//! Each eligible unit ticks a two-branch behavior tree:
//!
//! 1. **Attack**: strike the first adjacent enemy in storage order
//! 2. **Advance**: otherwise take one step toward the nearest enemy
//!
//! The policy is greedy and single-ply. It never weighs damage trade-offs
//! and never paths around obstacles. Every command goes through the engine,
//! so the opponent is held to the same rules as a human player.

pub mod context;
pub mod nodes;
pub mod provider;

pub use context::AiContext;
pub use nodes::{AdvanceTowardNearestEnemy, AttackAdjacentEnemy, opponent_tree};
pub use provider::ScriptedOpponent;
