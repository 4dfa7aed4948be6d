use crate::{walls, Cell, Direction, MazeError, Position, Solver};
use serde::{Deserialize, Serialize};

/// Rectangular cell storage, row-major.
///
/// A grid built from non-positive dimensions is empty (0x0) rather than
/// invalid memory; every query on it answers `None`/`false` and every
/// mutation reports [`MazeError::InvalidDimensions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// Create a grid with all walls present. Non-positive dimensions
    /// degrade to an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("{e}; using an empty grid");
                Self::empty()
            }
        }
    }

    /// Create a grid, rejecting non-positive dimensions
    pub fn try_new(width: i32, height: i32) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        let (width, height) = (width as usize, height as usize);
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// The 0x0 grid
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells the dimensions call for, saturating at `usize::MAX`
    /// for declared dimensions no storage could hold
    pub fn len(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        pos.y.checked_mul(self.width)?.checked_add(pos.x)
    }

    /// Look up a cell by signed coordinates. Negative or too-large
    /// coordinates yield `None`.
    pub fn cell_at(&self, x: isize, y: isize) -> Option<&Cell> {
        let pos = Position::new(usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.cell(pos)
    }

    /// Like [`Grid::cell_at`] but reports the failure
    pub fn try_cell_at(&self, x: isize, y: isize) -> Result<&Cell, MazeError> {
        self.cell_at(x, y).ok_or(MazeError::OutOfBounds {
            x: x as i64,
            y: y as i64,
            width: self.width,
            height: self.height,
        })
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        self.cells.get_mut(i)
    }

    /// Position check that produces the error callers propagate
    pub fn ensure_contains(&self, pos: Position) -> Result<(), MazeError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(MazeError::out_of_bounds(pos, self.width, self.height))
        }
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        let height = if width == 0 { 0 } else { self.height };
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Reinitialize every cell to all walls present, unvisited and off-path.
    ///
    /// Coordinates are rewritten from each cell's slot. Dimensions are kept.
    pub fn reset(&mut self) -> Result<(), MazeError> {
        if self.is_empty() {
            return Err(MazeError::InvalidDimensions {
                width: i64::try_from(self.width).unwrap_or(i64::MAX),
                height: i64::try_from(self.height).unwrap_or(i64::MAX),
            });
        }
        self.check_size()?;
        let width = self.width;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            cell.reset_at(Position::new(i % width, i / width));
        }
        Ok(())
    }

    /// Clear every `on_path` flag
    pub fn clear_path(&mut self) {
        for cell in &mut self.cells {
            cell.set_on_path(false);
        }
    }

    /// Positions currently flagged as on the solution path, row-major
    pub fn path_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| c.is_on_path())
            .map(Cell::position)
            .collect()
    }

    /// Storage length matches `width * height`, and a zero side only comes
    /// with the empty grid
    pub fn check_size(&self) -> Result<(), MazeError> {
        if (self.width == 0) != (self.height == 0) {
            return Err(MazeError::InvalidDimensions {
                width: i64::try_from(self.width).unwrap_or(i64::MAX),
                height: i64::try_from(self.height).unwrap_or(i64::MAX),
            });
        }
        match self.width.checked_mul(self.height) {
            Some(expected) if expected == self.cells.len() => Ok(()),
            expected => Err(MazeError::SizeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: self.cells.len(),
            }),
        }
    }

    /// Full consistency check for grids that did not come from this crate's
    /// own constructors: storage size, cell coordinates, wall pairing.
    pub fn validate(&self) -> Result<(), MazeError> {
        self.check_size()?;
        for (cell, expected) in self.cells.iter().zip(self.positions()) {
            if cell.position() != expected {
                return Err(MazeError::CellMismatch {
                    expected,
                    found: cell.position(),
                });
            }
        }
        for pos in self.positions() {
            for dir in [Direction::Right, Direction::Bottom] {
                if !walls::is_paired(self, pos, dir) {
                    return Err(MazeError::WallMismatch { at: pos, direction: dir });
                }
            }
        }
        Ok(())
    }

    /// Whether every cell is reachable from (0,0) through open passages
    pub fn is_connected(&self) -> bool {
        Solver::new().is_connected(self)
    }

    /// Carve a passage between two adjacent cells
    pub fn carve(&mut self, from: Position, to: Position) -> Result<(), MazeError> {
        walls::remove_wall(self, from, to)
    }

    /// Number of open internal partitions. A perfect maze has `len() - 1`.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(|&dir| walls::is_open(self, pos, dir))
                    .count()
            })
            .sum()
    }

    pub(crate) fn mark_visited(&mut self, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_visited(true);
        }
    }

    pub(crate) fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().count(), 12);
        for (cell, pos) in grid.cells().zip(grid.positions()) {
            assert_eq!(cell.position(), pos);
            assert_eq!(cell.walls(), [true; 4]);
            assert!(!cell.is_visited());
            assert!(!cell.is_on_path());
        }
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_invalid_dimensions_degrade_to_empty() {
        for (w, h) in [(0, 5), (5, 0), (-3, 4), (-1, -1)] {
            let grid = Grid::new(w, h);
            assert!(grid.is_empty());
            assert_eq!(grid.cell_at(0, 0), None);
            assert!(!grid.is_connected());
            assert!(matches!(
                Grid::try_new(w, h),
                Err(MazeError::InvalidDimensions { .. })
            ));
        }

        let mut grid = Grid::new(0, 0);
        assert!(matches!(grid.reset(), Err(MazeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.cell_at(2, 1).map(Cell::position), Some(Position::new(2, 1)));
        assert!(grid.cell_at(-1, 0).is_none());
        assert!(grid.cell_at(0, -1).is_none());
        assert!(grid.cell_at(3, 0).is_none());
        assert!(grid.cell_at(0, 2).is_none());
        assert!(grid.cell_at(isize::MAX, isize::MAX).is_none());
        assert!(grid.cell_at(isize::MIN, 0).is_none());

        assert_eq!(
            grid.try_cell_at(-2, 7),
            Err(MazeError::OutOfBounds {
                x: -2,
                y: 7,
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut grid = Grid::new(3, 3);
        grid.carve(Position::new(0, 0), Position::new(1, 0)).unwrap();
        grid.mark_visited(Position::new(1, 0));
        grid.cell_mut(Position::new(2, 2)).unwrap().set_on_path(true);

        grid.reset().unwrap();
        assert_eq!(grid, Grid::new(3, 3));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut grid = Grid::new(4, 4);
        grid.carve(Position::new(1, 1), Position::new(1, 2)).unwrap();

        grid.reset().unwrap();
        let once = grid.clone();
        grid.reset().unwrap();
        assert_eq!(grid, once);
    }

    #[test]
    fn test_passage_count() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.passage_count(), 0);
        grid.carve(Position::new(0, 0), Position::new(1, 0)).unwrap();
        grid.carve(Position::new(0, 1), Position::new(0, 0)).unwrap();
        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn test_validate_rejects_truncated_storage() {
        let json = serde_json::to_string(&Grid::new(3, 3)).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["cells"].as_array_mut().unwrap().pop();
        let grid: Grid = serde_json::from_value(value).unwrap();

        assert_eq!(
            grid.validate(),
            Err(MazeError::SizeMismatch {
                expected: 9,
                actual: 8
            })
        );
        let mut grid = grid;
        assert!(matches!(grid.reset(), Err(MazeError::SizeMismatch { .. })));
    }

    #[test]
    fn test_validate_rejects_overflowing_dimensions() {
        let grid: Grid =
            serde_json::from_str(r#"{"width":18446744073709551615,"height":2,"cells":[]}"#).unwrap();
        assert_eq!(grid.len(), usize::MAX);
        assert_eq!(
            grid.validate(),
            Err(MazeError::SizeMismatch {
                expected: usize::MAX,
                actual: 0
            })
        );
        assert!(!grid.is_connected());
        assert!(!walls::all_paired(&grid));
        assert_eq!(grid.cell(Position::new(5, 1)), None);

        let mut grid = grid;
        assert!(matches!(
            Solver::new().solve(&mut grid, Position::ORIGIN, Position::new(1, 1)),
            Err(MazeError::SizeMismatch { .. })
        ));
        assert!(crate::Maze::from_grid(grid).is_err());

        let grid: Grid =
            serde_json::from_str(r#"{"width":9223372036854775808,"height":2,"cells":[]}"#).unwrap();
        assert!(matches!(grid.validate(), Err(MazeError::SizeMismatch { .. })));
    }

    #[test]
    fn test_validate_rejects_one_zero_side() {
        let grid: Grid =
            serde_json::from_str(r#"{"width":0,"height":18446744073709551615,"cells":[]}"#).unwrap();
        assert!(matches!(
            grid.validate(),
            Err(MazeError::InvalidDimensions { width: 0, .. })
        ));
        assert_eq!(grid.positions().count(), 0);
        assert!(!grid.is_connected());
    }

    #[test]
    fn test_validate_rejects_swapped_cells() {
        let json = serde_json::to_string(&Grid::new(2, 1)).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["cells"].as_array_mut().unwrap().swap(0, 1);
        let grid: Grid = serde_json::from_value(value).unwrap();

        assert_eq!(
            grid.validate(),
            Err(MazeError::CellMismatch {
                expected: Position::new(0, 0),
                found: Position::new(1, 0),
            })
        );
    }

    #[test]
    fn test_validate_rejects_half_open_wall() {
        let mut grid = Grid::new(2, 2);
        grid.cell_mut(Position::new(0, 1))
            .unwrap()
            .set_wall(Direction::Right, false);

        assert_eq!(
            grid.validate(),
            Err(MazeError::WallMismatch {
                at: Position::new(0, 1),
                direction: Direction::Right,
            })
        );
    }
}
