//! Combat resolution system.
//!
//! This module provides pure functions for resolving a melee exchange. Both
//! sides of an exchange take damage, computed from the gap between the
//! attacker's effective attack and the defender's effective defense.
//!
//! # Architecture
//!
//! - **Pure Functions**: nothing here mutates the match state
//! - **Used by Actions**: `AttackAction` and the scripted opponent call
//!   [`resolve_exchange`] and apply the returned damage themselves
//!
//! # Core Functions
//!
//! - `effective_attack` / `effective_defense`: base stat after injury
//!   scaling, adjacency bonuses and terrain modifiers
//! - `exchange_damage`: exponential response to the strength gap
//! - `resolve_exchange`: the complete exchange for two units on the board

pub mod damage;
pub mod params;
pub mod result;
pub mod strength;

pub use damage::{apply_damage, exchange_damage, scaled_damage};
pub use params::CombatParams;
pub use result::{Exchange, resolve_exchange};
pub use strength::{
    count_flankers, count_supporters, effective_attack, effective_defense, injury_factor,
};
