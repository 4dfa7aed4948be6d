use crate::{Direction, Position};
use serde::{Deserialize, Serialize};

/// A single maze cell
///
/// Coordinates are fixed at construction. Wall and flag mutation is
/// crate-private so that walls only ever change in pairs through
/// [`crate::walls::remove_wall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    x: usize,
    y: usize,
    /// Walls indexed by [`Direction::index`]; `true` = present
    walls: [bool; 4],
    /// Set during generation
    visited: bool,
    /// Set by the solver on the cells of the last found path
    on_path: bool,
}

impl Cell {
    /// A fresh cell with all four walls up
    pub fn new(pos: Position) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            walls: [true; 4],
            visited: false,
            on_path: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    /// Number of absent wall flags. On a valid grid boundary flags are
    /// always set, so this equals the number of open passages.
    pub fn openings(&self) -> usize {
        self.walls.iter().filter(|w| !**w).count()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    pub(crate) fn set_wall(&mut self, dir: Direction, present: bool) {
        self.walls[dir.index()] = present;
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub(crate) fn set_on_path(&mut self, on_path: bool) {
        self.on_path = on_path;
    }

    /// Back to the creation state at `pos`
    pub(crate) fn reset_at(&mut self, pos: Position) {
        *self = Self::new(pos);
    }
}
