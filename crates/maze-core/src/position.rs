use serde::{Deserialize, Serialize};

/// Cardinal direction, indexed in the fixed order used by every traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    /// All directions in exploration order: Top, Right, Bottom, Left.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Index into a cell's wall array
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back, i.e. `(d + 2) mod 4`
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Column/row offset of one step in this direction
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Top => write!(f, "Top"),
            Direction::Right => write!(f, "Right"),
            Direction::Bottom => write!(f, "Bottom"),
            Direction::Left => write!(f, "Left"),
        }
    }
}

/// A cell position on the grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Top-left corner, where generation always starts
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step one cell in `dir`. Returns `None` when the step would leave the
    /// non-negative quadrant; the upper bound is the grid's business.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.offset();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Whether `other` shares an edge with this position
    pub fn is_adjacent(self, other: Position) -> bool {
        matches!(
            (self.x.abs_diff(other.x), self.y.abs_diff(other.y)),
            (1, 0) | (0, 1)
        )
    }

    /// Manhattan distance, a lower bound for any path length
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Bottom.opposite(), Direction::Top);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_step_stops_at_zero() {
        assert_eq!(Position::ORIGIN.step(Direction::Top), None);
        assert_eq!(Position::ORIGIN.step(Direction::Left), None);
        assert_eq!(Position::ORIGIN.step(Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(Position::ORIGIN.step(Direction::Bottom), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_adjacency() {
        let p = Position::new(2, 2);
        assert!(p.is_adjacent(Position::new(2, 1)));
        assert!(p.is_adjacent(Position::new(3, 2)));
        assert!(!p.is_adjacent(Position::new(3, 3)));
        assert!(!p.is_adjacent(p));
        assert_eq!(p.manhattan(Position::ORIGIN), 4);
    }
}
