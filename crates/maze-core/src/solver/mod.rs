//! Breadth-first shortest-path search over open passages.
//!
//! Search state (visited marks, parent pointers) is local to each call and
//! never touches the generator's `visited` flags. The only thing written back
//! to the grid is the `on_path` flag of each cell on a found path.

mod types;

use crate::{walls, Grid, MazeError, Position};
use std::collections::VecDeque;

pub use types::Path;

/// Breadth-first solver. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

/// Result of one BFS sweep, indexed like the grid's cell storage
struct Search {
    parent: Vec<Option<Position>>,
    distance: Vec<Option<usize>>,
    reached: usize,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Find a shortest path from `start` to `end` and mark it on the grid.
    ///
    /// Previous `on_path` marks are cleared first, and stay clear on failure.
    pub fn solve(&self, grid: &mut Grid, start: Position, end: Position) -> Result<Path, MazeError> {
        grid.check_size()?;
        grid.ensure_contains(start)?;
        grid.ensure_contains(end)?;
        grid.clear_path();

        let search = self.search(grid, start, Some(end));
        let end_idx = grid
            .index(end)
            .ok_or(MazeError::out_of_bounds(end, grid.width(), grid.height()))?;
        if search.distance[end_idx].is_none() {
            log::debug!("no path {start} -> {end} after reaching {} cells", search.reached);
            return Err(MazeError::Unreachable { start, end });
        }

        let mut cells = vec![end];
        let mut current = end;
        while current != start {
            current = grid
                .index(current)
                .and_then(|i| search.parent[i])
                .ok_or(MazeError::Unreachable { start, end })?;
            cells.push(current);
        }
        cells.reverse();

        for &pos in &cells {
            if let Some(cell) = grid.cell_mut(pos) {
                cell.set_on_path(true);
            }
        }

        let path = Path::new(cells);
        log::debug!(
            "solved {start} -> {end}: {} steps, {} cells explored",
            path.length(),
            search.reached
        );
        Ok(path)
    }

    /// Whether every cell is reachable from (0,0). Empty or inconsistent
    /// grids are never connected.
    pub fn is_connected(&self, grid: &Grid) -> bool {
        if grid.is_empty() || grid.check_size().is_err() {
            return false;
        }
        self.search(grid, Position::ORIGIN, None).reached == grid.len()
    }

    /// BFS distance from `start` to every cell, row-major; `None` where
    /// unreachable.
    pub fn distances(&self, grid: &Grid, start: Position) -> Result<Vec<Option<usize>>, MazeError> {
        grid.check_size()?;
        grid.ensure_contains(start)?;
        Ok(self.search(grid, start, None).distance)
    }

    /// The reachable cell farthest from `start`, ties going to the first in
    /// row-major order.
    pub fn farthest_from(&self, grid: &Grid, start: Position) -> Result<(Position, usize), MazeError> {
        let distances = self.distances(grid, start)?;
        let mut best = (start, 0);
        for (pos, dist) in grid.positions().zip(distances) {
            if let Some(d) = dist {
                if d > best.1 {
                    best = (pos, d);
                }
            }
        }
        Ok(best)
    }

    /// Breadth-first sweep in Top, Right, Bottom, Left order, stopping once
    /// `target` is dequeued. Callers have checked size and `start`.
    fn search(&self, grid: &Grid, start: Position, target: Option<Position>) -> Search {
        let mut parent = vec![None; grid.len()];
        let mut distance = vec![None; grid.len()];
        let mut reached = 0;
        let mut queue = VecDeque::new();

        if let Some(i) = grid.index(start) {
            distance[i] = Some(0);
            queue.push_back(start);
        }

        while let Some(current) = queue.pop_front() {
            reached += 1;
            if Some(current) == target {
                break;
            }
            let Some(d) = grid.index(current).and_then(|i| distance[i]) else {
                continue;
            };

            for next in walls::open_neighbors(grid, current) {
                let Some(j) = grid.index(next) else { continue };
                if distance[j].is_none() {
                    distance[j] = Some(d + 1);
                    parent[j] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        Search {
            parent,
            distance,
            reached,
        }
    }
}
