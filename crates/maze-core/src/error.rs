//! Error types for maze-core.

use crate::{Direction, Position};
use thiserror::Error;

/// Every recoverable failure of grid lookup, carving, generation and solving.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Coordinates outside `[0, width) x [0, height)`.
    #[error("position ({x},{y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Width or height was zero or negative.
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// No open passage sequence connects the two endpoints.
    #[error("no path from {start} to {end}")]
    Unreachable {
        /// Search origin.
        start: Position,
        /// Search target.
        end: Position,
    },

    /// Cell storage disagrees with the declared dimensions.
    #[error("grid storage holds {actual} cells but dimensions require {expected}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Cells actually stored.
        actual: usize,
    },

    /// A cell's stored coordinates do not match its slot in the grid.
    #[error("cell stored at {expected} claims to be at {found}")]
    CellMismatch {
        /// Slot the cell occupies.
        expected: Position,
        /// Coordinates recorded in the cell.
        found: Position,
    },

    /// The two sides of a shared wall disagree.
    #[error("wall {direction} of cell {at} disagrees with its neighbor")]
    WallMismatch {
        /// Cell whose wall was inspected.
        at: Position,
        /// Direction of the inconsistent wall.
        direction: Direction,
    },

    /// Carving was requested between cells that do not share an edge.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent {
        /// First cell.
        from: Position,
        /// Second cell.
        to: Position,
    },
}

impl MazeError {
    pub(crate) fn out_of_bounds(pos: Position, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            x: i64::try_from(pos.x).unwrap_or(i64::MAX),
            y: i64::try_from(pos.y).unwrap_or(i64::MAX),
            width,
            height,
        }
    }
}
