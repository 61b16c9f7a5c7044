use std::fmt;

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

/// Unique identifier for a unit tracked in the match.
///
/// Identifiers are allocated sequentially and never reused, so a dead unit
/// that stays in storage keeps its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal (Manhattan) distance between two positions.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_orthogonally_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// Returns the neighbouring position in the given direction.
    pub fn step(self, direction: CardinalDirection) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in [`CardinalDirection`] order.
    ///
    /// Neighbours may lie outside the map; callers filter by bounds.
    pub fn neighbors(self) -> ArrayVec<Position, 4> {
        CardinalDirection::iter().map(|direction| self.step(direction)).collect()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four orthogonal step directions.
///
/// Declaration order is the candidate order used when enumerating neighbours:
/// east, west, north, south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    East,
    West,
    North,
    South,
}

impl CardinalDirection {
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
        }
    }
}

/// Integer resource meter (hit points, movement points) tracked per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    /// Creates a meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Current value as a fraction of the maximum; 0.0 when the maximum is 0.
    pub fn ratio(&self) -> f64 {
        if self.maximum == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.maximum)
        }
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Subtracts `amount`, saturating at zero.
    pub fn drain(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_counts_both_axes() {
        let a = Position::new(1, 1);
        assert_eq!(a.manhattan(Position::new(4, 1)), 3);
        assert_eq!(a.manhattan(Position::new(0, 3)), 3);
        assert!(a.is_orthogonally_adjacent(Position::new(1, 2)));
        assert!(!a.is_orthogonally_adjacent(Position::new(2, 2)));
        assert!(!a.is_orthogonally_adjacent(a));
    }

    #[test]
    fn directions_iterate_east_west_north_south() {
        let origin = Position::new(3, 3);
        let steps: Vec<_> = CardinalDirection::iter().map(|d| origin.step(d)).collect();
        assert_eq!(steps.as_slice(), origin.neighbors().as_slice());
        assert_eq!(
            steps,
            vec![
                Position::new(4, 3),
                Position::new(2, 3),
                Position::new(3, 4),
                Position::new(3, 2),
            ]
        );
    }

    #[test]
    fn meter_drain_saturates() {
        let mut hp = ResourceMeter::full(10);
        hp.drain(25);
        assert_eq!(hp.current, 0);
        assert!(hp.is_empty());
        hp.refill();
        assert_eq!(hp.current, 10);
    }
}
