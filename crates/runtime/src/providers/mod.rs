//! Turn providers that play a side without human input.

pub mod ai;
