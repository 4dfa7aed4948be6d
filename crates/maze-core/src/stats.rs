use crate::{walls, Direction, Grid, Position, Solver};
use serde::{Deserialize, Serialize};

/// Structural summary of a grid.
///
/// Every wall segment is counted exactly once: an internal partition belongs
/// to the cell on its left/top side, a boundary segment to the only cell that
/// touches it. `unique_walls` is therefore `internal_walls + boundary_walls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeStats {
    pub width: usize,
    pub height: usize,
    pub cells: usize,
    /// Open internal partitions
    pub passages: usize,
    /// Closed internal partitions
    pub internal_walls: usize,
    /// Boundary segments whose flag is set
    pub boundary_walls: usize,
    pub unique_walls: usize,
    /// Cells with exactly one opening
    pub dead_ends: usize,
    /// Cells with three or more openings
    pub junctions: usize,
    /// Cell farthest from (0,0) and its distance, if the grid is non-empty
    pub farthest_from_origin: Option<(Position, usize)>,
}

impl MazeStats {
    pub fn collect(grid: &Grid) -> Self {
        let mut stats = Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.len(),
            passages: 0,
            internal_walls: 0,
            boundary_walls: 0,
            unique_walls: 0,
            dead_ends: 0,
            junctions: 0,
            farthest_from_origin: None,
        };

        for cell in grid.cells() {
            let pos = cell.position();
            for dir in Direction::ALL {
                if walls::is_boundary(grid, cell, dir) {
                    if cell.has_wall(dir) {
                        stats.boundary_walls += 1;
                    }
                } else if matches!(dir, Direction::Right | Direction::Bottom) {
                    if walls::is_open(grid, pos, dir) {
                        stats.passages += 1;
                    } else {
                        stats.internal_walls += 1;
                    }
                }
            }

            match walls::degree(grid, pos) {
                1 => stats.dead_ends += 1,
                d if d >= 3 => stats.junctions += 1,
                _ => {}
            }
        }
        stats.unique_walls = stats.internal_walls + stats.boundary_walls;
        stats.farthest_from_origin = Solver::new().farthest_from(grid, Position::ORIGIN).ok();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_grid_counts() {
        let stats = MazeStats::collect(&Grid::new(2, 2));
        assert_eq!(stats.cells, 4);
        assert_eq!(stats.internal_walls, 4);
        assert_eq!(stats.boundary_walls, 8);
        assert_eq!(stats.unique_walls, 12);
        assert_eq!(stats.passages, 0);
        assert_eq!(stats.dead_ends, 0);
        assert_eq!(stats.farthest_from_origin, Some((Position::ORIGIN, 0)));
    }

    #[test]
    fn test_generated_counts() {
        let mut grid = Grid::new(8, 5);
        generator::carve_iterative(&mut grid, &mut StdRng::seed_from_u64(21)).unwrap();
        let stats = MazeStats::collect(&grid);

        assert_eq!(stats.passages, 39);
        // 8x5 has 7*5 + 8*4 = 67 internal partitions
        assert_eq!(stats.internal_walls + stats.passages, 67);
        assert_eq!(stats.boundary_walls, 2 * (8 + 5));
        assert!(stats.dead_ends >= 2);
        assert!(stats.farthest_from_origin.is_some());
    }

    #[test]
    fn test_empty_grid() {
        let stats = MazeStats::collect(&Grid::new(0, 0));
        assert_eq!(stats.cells, 0);
        assert_eq!(stats.unique_walls, 0);
        assert_eq!(stats.farthest_from_origin, None);
    }
}
