use crate::{walls, Grid, MazeError, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Grids larger than this never recurse on the call stack. The recursive
/// strategy switches to an explicit-frame emulation that carves the same maze.
///
/// Depth can reach the cell count, so the limit keeps a worst-case descent
/// inside a 2 MiB thread stack in unoptimized builds.
pub const RECURSION_CELL_LIMIT: usize = 1_024;

/// Depth-first carving strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Explicit backtracking stack, one random pick per step
    #[default]
    Iterative,
    /// Call-stack recursion over a shuffled neighbor list
    Recursive,
}

impl Strategy {
    pub fn all() -> &'static [Strategy] {
        &[Strategy::Iterative, Strategy::Recursive]
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Iterative => write!(f, "iterative"),
            Strategy::Recursive => write!(f, "recursive"),
        }
    }
}

/// What a single generation pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub strategy: Strategy,
    pub cells_visited: usize,
    pub passages_carved: usize,
    /// Deepest backtracking stack (or recursion depth) reached
    pub max_stack_depth: usize,
}

impl GenerationReport {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            cells_visited: 0,
            passages_carved: 0,
            max_stack_depth: 0,
        }
    }

    fn enter(&mut self, depth: usize) {
        self.cells_visited += 1;
        self.max_stack_depth = self.max_stack_depth.max(depth);
    }
}

/// Carve a perfect maze with an explicit stack.
///
/// Resets the grid first. Starting at (0,0), the top of the stack picks one
/// unvisited neighbor uniformly at random, carves into it and pushes it; with
/// no unvisited neighbors left it is popped.
pub fn carve_iterative<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
) -> Result<GenerationReport, MazeError> {
    carve_iterative_observed(grid, rng, &mut |_: &Grid| {})
}

/// [`carve_iterative`] calling `observe` after every carved passage
pub(crate) fn carve_iterative_observed<R, F>(
    grid: &mut Grid,
    rng: &mut R,
    observe: &mut F,
) -> Result<GenerationReport, MazeError>
where
    R: Rng + ?Sized,
    F: FnMut(&Grid),
{
    grid.reset()?;
    let mut report = GenerationReport::new(Strategy::Iterative);

    grid.mark_visited(Position::ORIGIN);
    let mut stack = vec![Position::ORIGIN];
    report.enter(stack.len());

    while let Some(&current) = stack.last() {
        let neighbors = walls::unvisited_neighbors(grid, current);
        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let next = neighbors[rng.gen_range(0..neighbors.len())];
        walls::remove_wall(grid, current, next)?;
        report.passages_carved += 1;
        observe(grid);
        grid.mark_visited(next);
        stack.push(next);
        report.enter(stack.len());
    }

    log::debug!(
        "iterative carve of {}x{}: {} cells, {} passages, max depth {}",
        grid.width(),
        grid.height(),
        report.cells_visited,
        report.passages_carved,
        report.max_stack_depth
    );
    Ok(report)
}

/// Carve a perfect maze by recursive descent from (0,0).
///
/// Resets the grid once, then recurses. Grids over
/// [`RECURSION_CELL_LIMIT`] cells use [`carve_frames`], which produces the
/// same maze for the same RNG state without growing the call stack.
pub fn carve_recursive<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
) -> Result<GenerationReport, MazeError> {
    carve_recursive_with_limit(grid, rng, RECURSION_CELL_LIMIT, &mut |_: &Grid| {})
}

pub(crate) fn carve_recursive_with_limit<R, F>(
    grid: &mut Grid,
    rng: &mut R,
    limit: usize,
    observe: &mut F,
) -> Result<GenerationReport, MazeError>
where
    R: Rng + ?Sized,
    F: FnMut(&Grid),
{
    grid.reset()?;
    let mut report = GenerationReport::new(Strategy::Recursive);

    if grid.len() > limit {
        log::warn!(
            "{}x{} grid exceeds {} cells; recursive carve runs on an explicit frame stack",
            grid.width(),
            grid.height(),
            limit
        );
        carve_frames(grid, rng, &mut report, observe)?;
    } else {
        carve_from(grid, rng, Position::ORIGIN, 1, &mut report, observe)?;
    }

    log::debug!(
        "recursive carve of {}x{}: {} cells, {} passages, max depth {}",
        grid.width(),
        grid.height(),
        report.cells_visited,
        report.passages_carved,
        report.max_stack_depth
    );
    Ok(report)
}

fn carve_from<R, F>(
    grid: &mut Grid,
    rng: &mut R,
    current: Position,
    depth: usize,
    report: &mut GenerationReport,
    observe: &mut F,
) -> Result<(), MazeError>
where
    R: Rng + ?Sized,
    F: FnMut(&Grid),
{
    grid.mark_visited(current);
    report.enter(depth);

    let mut neighbors = walls::unvisited_neighbors(grid, current);
    neighbors.shuffle(rng);

    for next in neighbors {
        // An earlier sibling's descent may have reached it already
        if grid.is_visited(next) {
            continue;
        }
        walls::remove_wall(grid, current, next)?;
        report.passages_carved += 1;
        observe(grid);
        carve_from(grid, rng, next, depth + 1, report, observe)?;
    }
    Ok(())
}

/// One suspended call of the recursive carve
struct Frame {
    pos: Position,
    pending: std::vec::IntoIter<Position>,
}

impl Frame {
    /// Same work [`carve_from`] does on entry, in the same RNG order
    fn enter<R: Rng + ?Sized>(
        grid: &mut Grid,
        rng: &mut R,
        pos: Position,
        depth: usize,
        report: &mut GenerationReport,
    ) -> Self {
        grid.mark_visited(pos);
        report.enter(depth);
        let mut neighbors = walls::unvisited_neighbors(grid, pos);
        neighbors.shuffle(rng);
        Self {
            pos,
            pending: neighbors.into_iter(),
        }
    }
}

/// Explicit-stack emulation of [`carve_from`]
fn carve_frames<R, F>(
    grid: &mut Grid,
    rng: &mut R,
    report: &mut GenerationReport,
    observe: &mut F,
) -> Result<(), MazeError>
where
    R: Rng + ?Sized,
    F: FnMut(&Grid),
{
    let mut stack = vec![Frame::enter(grid, rng, Position::ORIGIN, 1, report)];

    while let Some(frame) = stack.last_mut() {
        let current = frame.pos;
        match frame.pending.next() {
            Some(next) if grid.is_visited(next) => {}
            Some(next) => {
                walls::remove_wall(grid, current, next)?;
                report.passages_carved += 1;
                observe(grid);
                let depth = stack.len() + 1;
                let child = Frame::enter(grid, rng, next, depth, report);
                stack.push(child);
            }
            None => {
                stack.pop();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_perfect(grid: &Grid) {
        assert!(grid.cells().all(|c| c.is_visited()), "unvisited cell left");
        assert_eq!(grid.passage_count(), grid.len() - 1);
        assert!(walls::all_paired(grid));
        assert!(grid.is_connected());
    }

    #[test]
    fn test_iterative_is_perfect() {
        for (w, h) in [(1, 1), (1, 7), (7, 1), (3, 3), (10, 10), (17, 9)] {
            let mut grid = Grid::new(w, h);
            let report = carve_iterative(&mut grid, &mut StdRng::seed_from_u64(7)).unwrap();
            assert_perfect(&grid);
            assert_eq!(report.cells_visited, grid.len());
            assert_eq!(report.passages_carved, grid.len() - 1);
        }
    }

    #[test]
    fn test_recursive_is_perfect() {
        for (w, h) in [(1, 1), (2, 5), (6, 6), (20, 13)] {
            let mut grid = Grid::new(w, h);
            let report = carve_recursive(&mut grid, &mut StdRng::seed_from_u64(99)).unwrap();
            assert_perfect(&grid);
            assert_eq!(report.strategy, Strategy::Recursive);
            assert_eq!(report.cells_visited, grid.len());
        }
    }

    #[test]
    fn test_single_cell() {
        let mut grid = Grid::new(1, 1);
        let report = carve_iterative(&mut grid, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(report.passages_carved, 0);
        assert_eq!(report.max_stack_depth, 1);
        let cell = grid.cell(Position::ORIGIN).unwrap();
        assert!(cell.is_visited());
        assert_eq!(cell.walls(), [true; 4]);
        assert!(grid.is_connected());
    }

    #[test]
    fn test_iterative_same_seed_same_maze() {
        let mut a = Grid::new(12, 8);
        let mut b = Grid::new(12, 8);
        carve_iterative(&mut a, &mut StdRng::seed_from_u64(42)).unwrap();
        carve_iterative(&mut b, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        let mut c = Grid::new(12, 8);
        carve_iterative(&mut c, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_frame_emulation_matches_recursion() {
        let mut recursed = Grid::new(9, 7);
        let mut framed = Grid::new(9, 7);
        let a = carve_recursive_with_limit(
            &mut recursed,
            &mut StdRng::seed_from_u64(5),
            usize::MAX,
            &mut |_: &Grid| {},
        )
        .unwrap();
        let b = carve_recursive_with_limit(
            &mut framed,
            &mut StdRng::seed_from_u64(5),
            0,
            &mut |_: &Grid| {},
        )
        .unwrap();
        assert_eq!(recursed, framed);
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_recursive_grid_does_not_overflow() {
        let mut grid = Grid::new(150, 150);
        assert!(grid.len() > RECURSION_CELL_LIMIT);
        carve_recursive(&mut grid, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_perfect(&grid);
    }

    #[test]
    fn test_recursion_at_cell_limit_fits_thread_stack() {
        // 32x32 is exactly the limit, so this takes the call-stack path
        let mut grid = Grid::new(32, 32);
        assert_eq!(grid.len(), RECURSION_CELL_LIMIT);
        let report = carve_recursive(&mut grid, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_perfect(&grid);
        assert!(report.max_stack_depth <= RECURSION_CELL_LIMIT);

        let mut grid = Grid::new(100, 100);
        carve_recursive(&mut grid, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_perfect(&grid);
    }

    /// Checks pairing after every carve and that each carve opens exactly
    /// one new passage.
    fn assert_paired_each_step(grid: &Grid, steps: &mut usize) {
        *steps += 1;
        assert!(walls::all_paired(grid), "pairing broken at carve {steps}");
        assert_eq!(grid.passage_count(), *steps);
    }

    #[test]
    fn test_iterative_keeps_walls_paired_every_step() {
        let mut grid = Grid::new(9, 6);
        let mut steps = 0;
        carve_iterative_observed(&mut grid, &mut StdRng::seed_from_u64(11), &mut |g: &Grid| {
            assert_paired_each_step(g, &mut steps)
        })
        .unwrap();
        assert_eq!(steps, grid.len() - 1);
    }

    #[test]
    fn test_recursive_keeps_walls_paired_every_step() {
        for limit in [usize::MAX, 0] {
            let mut grid = Grid::new(7, 8);
            let mut steps = 0;
            carve_recursive_with_limit(
                &mut grid,
                &mut StdRng::seed_from_u64(12),
                limit,
                &mut |g: &Grid| assert_paired_each_step(g, &mut steps),
            )
            .unwrap();
            assert_eq!(steps, grid.len() - 1);
        }
    }

    #[test]
    fn test_generation_starts_from_clean_grid() {
        let mut grid = Grid::new(4, 4);
        let mut rng = StdRng::seed_from_u64(3);
        carve_iterative(&mut grid, &mut rng).unwrap();
        carve_recursive(&mut grid, &mut rng).unwrap();
        assert_perfect(&grid);

        // Outer boundary stays closed
        for pos in grid.positions() {
            let cell = grid.cell(pos).unwrap();
            for dir in Direction::ALL {
                if walls::neighbor(&grid, pos, dir).is_none() {
                    assert!(cell.has_wall(dir));
                }
            }
        }
    }

    #[test]
    fn test_empty_grid_is_rejected() {
        let mut grid = Grid::new(0, 3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            carve_iterative(&mut grid, &mut rng),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            carve_recursive(&mut grid, &mut rng),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }
}
