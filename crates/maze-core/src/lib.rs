//! Perfect maze engine.
//!
//! Carves spanning-tree mazes over a rectangular grid with randomized
//! depth-first search (explicit-stack or recursive) and finds shortest paths
//! through them with breadth-first search.
//!
//! ```
//! use maze_core::{Maze, Position};
//!
//! let mut maze = Maze::with_seed(8, 6, 42);
//! maze.generate_iterative().unwrap();
//! assert!(maze.is_connected());
//!
//! let path = maze.solve(Position::new(0, 0), Position::new(7, 5)).unwrap();
//! assert!(path.length() >= 12);
//! ```

mod cell;
mod error;
pub mod generator;
mod grid;
mod maze;
mod position;
mod solver;
mod stats;
pub mod walls;

pub use cell::Cell;
pub use error::MazeError;
pub use generator::{GenerationReport, Strategy, RECURSION_CELL_LIMIT};
pub use grid::Grid;
pub use maze::{Maze, MazeConfig};
pub use position::{Direction, Position};
pub use solver::{Path, Solver};
pub use stats::MazeStats;
