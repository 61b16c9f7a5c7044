use super::{Position, Side};

/// A resource site ("mine"). Ownership changes only through capture and never
/// reverts on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceSite {
    pub position: Position,
    pub owner: Option<Side>,
}

impl ResourceSite {
    pub const fn unowned(position: Position) -> Self {
        Self {
            position,
            owner: None,
        }
    }

    pub fn is_owned_by(&self, side: Side) -> bool {
        self.owner == Some(side)
    }
}
