//! Neighbor lookup and paired-wall mutation.
//!
//! Two adjacent cells each carry a flag for the wall they share. Everything
//! here reads or writes those flags as a pair so that `A.walls[d]` and
//! `B.walls[d.opposite()]` never disagree.

use crate::{Cell, Direction, Grid, MazeError, Position};

/// The in-bounds neighbor of `pos` in `dir`, if any
pub fn neighbor(grid: &Grid, pos: Position, dir: Direction) -> Option<Position> {
    pos.step(dir).filter(|p| grid.contains(*p))
}

/// Neighbors not yet visited by the generator, in Top, Right, Bottom, Left
/// order. The fixed order keeps generation reproducible for a seed.
pub fn unvisited_neighbors(grid: &Grid, pos: Position) -> Vec<Position> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| neighbor(grid, pos, dir))
        .filter(|&p| !grid.is_visited(p))
        .collect()
}

/// Which side of `from` the cell `to` lies on, by coordinate comparison.
///
/// Only meaningful for adjacent cells; anything else is a caller bug.
pub fn direction(from: Position, to: Position) -> Direction {
    debug_assert!(from.is_adjacent(to), "{from} and {to} are not adjacent");
    if to.y < from.y {
        Direction::Top
    } else if to.x > from.x {
        Direction::Right
    } else if to.y > from.y {
        Direction::Bottom
    } else {
        Direction::Left
    }
}

/// Open the wall between two adjacent cells on both sides.
///
/// Both positions and their adjacency are checked before either flag is
/// touched, so an error leaves the grid unchanged.
pub fn remove_wall(grid: &mut Grid, current: Position, next: Position) -> Result<(), MazeError> {
    grid.ensure_contains(current)?;
    grid.ensure_contains(next)?;
    grid.check_size()?;
    if !current.is_adjacent(next) {
        return Err(MazeError::NotAdjacent {
            from: current,
            to: next,
        });
    }

    let dir = direction(current, next);
    if let Some(cell) = grid.cell_mut(current) {
        cell.set_wall(dir, false);
    }
    if let Some(cell) = grid.cell_mut(next) {
        cell.set_wall(dir.opposite(), false);
    }
    log::trace!("carved {current} -> {next} ({dir})");
    Ok(())
}

/// Whether `pos` and its neighbor in `dir` form an open passage: the
/// neighbor exists and both sides of the shared wall are down.
pub fn is_open(grid: &Grid, pos: Position, dir: Direction) -> bool {
    let Some(next) = neighbor(grid, pos, dir) else {
        return false;
    };
    match (grid.cell(pos), grid.cell(next)) {
        (Some(a), Some(b)) => !a.has_wall(dir) && !b.has_wall(dir.opposite()),
        _ => false,
    }
}

/// Neighbors reachable through open passages, in Top, Right, Bottom, Left order
pub fn open_neighbors(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL
        .into_iter()
        .filter(move |&dir| is_open(grid, pos, dir))
        .filter_map(move |dir| neighbor(grid, pos, dir))
}

/// Whether the wall in `dir` agrees with its neighbor's opposite wall.
/// Boundary walls have no partner and always agree.
pub fn is_paired(grid: &Grid, pos: Position, dir: Direction) -> bool {
    let Some(next) = neighbor(grid, pos, dir) else {
        return true;
    };
    match (grid.cell(pos), grid.cell(next)) {
        (Some(a), Some(b)) => a.has_wall(dir) == b.has_wall(dir.opposite()),
        _ => true,
    }
}

/// Number of open passages leaving `pos`
pub fn degree(grid: &Grid, pos: Position) -> usize {
    open_neighbors(grid, pos).count()
}

/// Whether every adjacent pair in the grid satisfies the pairing rule.
/// Grids whose storage disagrees with their dimensions never do.
pub fn all_paired(grid: &Grid) -> bool {
    grid.check_size().is_ok()
        && grid.positions().all(|pos| {
            [Direction::Right, Direction::Bottom]
                .into_iter()
                .all(|dir| is_paired(grid, pos, dir))
        })
}

/// Whether a cell sits on the outer edge in `dir`
pub fn is_boundary(grid: &Grid, cell: &Cell, dir: Direction) -> bool {
    neighbor(grid, cell.position(), dir).is_none()
}
