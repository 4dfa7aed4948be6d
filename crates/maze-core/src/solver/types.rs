use crate::{walls, Direction, Position};
use serde::{Deserialize, Serialize};

/// A shortest path, ordered from start to end.
///
/// Never empty, and every step moves to an adjacent cell. Deserialization
/// enforces both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PathCells")]
pub struct Path {
    cells: Vec<Position>,
}

#[derive(Deserialize)]
struct PathCells {
    cells: Vec<Position>,
}

impl TryFrom<PathCells> for Path {
    type Error = String;

    fn try_from(raw: PathCells) -> Result<Self, Self::Error> {
        if raw.cells.is_empty() {
            return Err("path must contain at least one cell".to_string());
        }
        if let Some(pair) = raw.cells.windows(2).find(|p| !p[0].is_adjacent(p[1])) {
            return Err(format!("path step {} -> {} is not between adjacent cells", pair[0], pair[1]));
        }
        Ok(Self { cells: raw.cells })
    }
}

impl Path {
    pub(crate) fn new(cells: Vec<Position>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves. Zero when start and end coincide.
    pub fn length(&self) -> usize {
        self.cells.len() - 1
    }

    /// Number of cells visited, endpoints included
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn positions(&self) -> &[Position] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// The move taken at each step
    pub fn directions(&self) -> Vec<Direction> {
        self.cells
            .windows(2)
            .map(|pair| walls::direction(pair[0], pair[1]))
            .collect()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, pos) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}
