use std::fmt;

/// One of the two competing sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::A => "side-a",
            Side::B => "side-b",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allegiance of a unit: one of the sides, or the neutral guardians that never
/// act and never change ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Side(Side),
    Neutral,
}

impl Faction {
    /// Returns the side for side-aligned factions.
    pub const fn side(self) -> Option<Side> {
        match self {
            Faction::Side(side) => Some(side),
            Faction::Neutral => None,
        }
    }

    pub fn is_side(self, side: Side) -> bool {
        self == Faction::Side(side)
    }
}

impl From<Side> for Faction {
    fn from(side: Side) -> Self {
        Faction::Side(side)
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Side(side) => side.fmt(f),
            Faction::Neutral => f.write_str("neutral"),
        }
    }
}

/// Per-side gold balances. Balances may go negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldLedger {
    pub a: i64,
    pub b: i64,
}

impl GoldLedger {
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    pub const fn uniform(amount: i64) -> Self {
        Self::new(amount, amount)
    }

    pub fn get(&self, side: Side) -> i64 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut i64 {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}
