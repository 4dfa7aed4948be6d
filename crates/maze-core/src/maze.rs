use crate::generator::{self, GenerationReport, Strategy};
use crate::{Grid, MazeError, MazeStats, Path, Position, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for building a maze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    /// Fixed seed for reproducible output; `None` draws from the OS
    pub seed: Option<u64>,
    pub strategy: Strategy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: None,
            strategy: Strategy::Iterative,
        }
    }
}

impl MazeConfig {
    pub fn small() -> Self {
        Self {
            width: 5,
            height: 5,
            ..Self::default()
        }
    }

    pub fn medium() -> Self {
        Self {
            width: 15,
            height: 15,
            ..Self::default()
        }
    }

    pub fn large() -> Self {
        Self {
            width: 30,
            height: 30,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Build an ungenerated maze from this configuration
    pub fn build(&self) -> Result<Maze, MazeError> {
        let grid = Grid::try_new(self.width, self.height)?;
        Ok(match self.seed {
            Some(seed) => Maze::from_parts(grid, StdRng::seed_from_u64(seed), Some(seed)),
            None => Maze::from_parts(grid, StdRng::from_entropy(), None),
        })
    }
}

/// A grid plus the random source that carves it.
///
/// The maze is the single owner of its grid; renderers borrow it through
/// [`Maze::grid`].
pub struct Maze {
    grid: Grid,
    rng: StdRng,
    seed: Option<u64>,
    solver: Solver,
}

impl Default for Maze {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl Maze {
    /// Maze seeded from OS entropy. Non-positive dimensions give an empty
    /// grid on which generation reports `InvalidDimensions`.
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_parts(Grid::new(width, height), StdRng::from_entropy(), None)
    }

    /// Maze whose iterative generation is reproducible from `seed`
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::from_parts(Grid::new(width, height), StdRng::seed_from_u64(seed), Some(seed))
    }

    /// Adopt a grid built elsewhere after checking its consistency
    pub fn from_grid(grid: Grid) -> Result<Self, MazeError> {
        grid.validate()?;
        Ok(Self::from_parts(grid, StdRng::from_entropy(), None))
    }

    fn from_parts(grid: Grid, rng: StdRng, seed: Option<u64>) -> Self {
        Self {
            grid,
            rng,
            seed,
            solver: Solver::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Seed the RNG was last started from, if it was given explicitly
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Restart the random sequence; the next iterative generation repeats
    /// the first one made after seeding with the same value.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = Some(seed);
    }

    /// All walls up, nothing visited, no path
    pub fn reset(&mut self) -> Result<(), MazeError> {
        self.grid.reset()
    }

    pub fn generate(&mut self, strategy: Strategy) -> Result<GenerationReport, MazeError> {
        match strategy {
            Strategy::Iterative => self.generate_iterative(),
            Strategy::Recursive => self.generate_recursive(),
        }
    }

    pub fn generate_iterative(&mut self) -> Result<GenerationReport, MazeError> {
        generator::carve_iterative(&mut self.grid, &mut self.rng)
    }

    pub fn generate_recursive(&mut self) -> Result<GenerationReport, MazeError> {
        generator::carve_recursive(&mut self.grid, &mut self.rng)
    }

    /// Shortest path between two explicit endpoints, marked on the grid
    pub fn solve(&mut self, start: Position, end: Position) -> Result<Path, MazeError> {
        self.solver.solve(&mut self.grid, start, end)
    }

    /// Corner to corner: (0,0) to (width-1, height-1)
    pub fn solve_corners(&mut self) -> Result<Path, MazeError> {
        let end = Position::new(
            self.width().saturating_sub(1),
            self.height().saturating_sub(1),
        );
        self.solve(Position::ORIGIN, end)
    }

    pub fn is_connected(&self) -> bool {
        self.solver.is_connected(&self.grid)
    }

    pub fn clear_path(&mut self) {
        self.grid.clear_path();
    }

    pub fn stats(&self) -> MazeStats {
        MazeStats::collect(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walls;

    #[test]
    fn test_seed_42_three_by_three() {
        let mut maze = Maze::with_seed(3, 3, 42);
        maze.generate_iterative().unwrap();
        assert!(maze.is_connected());

        let path = maze
            .solve(Position::new(0, 0), Position::new(2, 2))
            .unwrap();
        assert!(path.length() >= 4 && path.length() <= 8);
    }

    #[test]
    fn test_iterative_determinism() {
        let mut a = Maze::with_seed(20, 14, 1234);
        let mut b = Maze::with_seed(20, 14, 1234);
        a.generate_iterative().unwrap();
        b.generate_iterative().unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_repeat_generation_advances_rng() {
        let mut maze = Maze::with_seed(12, 12, 9);
        maze.generate_iterative().unwrap();
        let first = maze.grid().clone();

        maze.generate_iterative().unwrap();
        assert_ne!(maze.grid(), &first);
        assert!(maze.is_connected());

        maze.reseed(9);
        maze.generate_iterative().unwrap();
        assert_eq!(maze.grid(), &first);
    }

    #[test]
    fn test_both_strategies_are_perfect() {
        for &strategy in Strategy::all() {
            let mut maze = Maze::with_seed(11, 7, 77);
            let report = maze.generate(strategy).unwrap();
            assert_eq!(report.strategy, strategy);
            assert_eq!(maze.grid().passage_count(), 76);
            assert!(maze.is_connected());
            assert!(walls::all_paired(maze.grid()));
        }
    }

    #[test]
    fn test_solve_corners() {
        let mut maze = Maze::with_seed(6, 4, 3);
        maze.generate(Strategy::Recursive).unwrap();
        let path = maze.solve_corners().unwrap();
        assert_eq!(path.start(), Position::ORIGIN);
        assert_eq!(path.end(), Position::new(5, 3));
        assert_eq!(maze.grid().path_cells().len(), path.cell_count());

        maze.clear_path();
        assert!(maze.grid().path_cells().is_empty());
    }

    #[test]
    fn test_reset_returns_to_walls() {
        let mut maze = Maze::with_seed(4, 4, 2);
        maze.generate_iterative().unwrap();
        maze.solve_corners().unwrap();
        maze.reset().unwrap();
        assert_eq!(maze.grid(), &Grid::new(4, 4));
        assert!(!maze.is_connected());
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut maze = Maze::new(-2, 5);
        assert_eq!(maze.width(), 0);
        assert!(matches!(
            maze.generate_iterative(),
            Err(MazeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            maze.solve_corners(),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert!(!maze.is_connected());

        let config = MazeConfig {
            width: 0,
            ..MazeConfig::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_config_presets() {
        let maze = MazeConfig::medium().with_seed(5).build().unwrap();
        assert_eq!((maze.width(), maze.height()), (15, 15));
        assert_eq!(maze.seed(), Some(5));
        assert_eq!(MazeConfig::small().width, 5);
        assert_eq!(MazeConfig::large().height, 30);
        assert_eq!(
            MazeConfig::default().with_strategy(Strategy::Recursive).strategy,
            Strategy::Recursive
        );
    }

    #[test]
    fn test_from_grid_validates() {
        let mut source = Maze::with_seed(5, 5, 10);
        source.generate_iterative().unwrap();
        let json = serde_json::to_string(source.grid()).unwrap();

        let grid: Grid = serde_json::from_str(&json).unwrap();
        let mut loaded = Maze::from_grid(grid).unwrap();
        assert!(loaded.is_connected());
        assert!(loaded.solve_corners().is_ok());

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["height"] = serde_json::json!(6);
        let grid: Grid = serde_json::from_value(value).unwrap();
        assert!(matches!(
            Maze::from_grid(grid),
            Err(MazeError::SizeMismatch {
                expected: 30,
                actual: 25
            })
        ));
    }

    #[test]
    fn test_loaded_grid_with_closed_region_is_unreachable() {
        let mut source = Maze::with_seed(3, 3, 4);
        source.generate_iterative().unwrap();
        let mut value = serde_json::to_value(source.grid()).unwrap();
        // Close every wall of the last cell on both sides
        for cell in value["cells"].as_array_mut().unwrap() {
            let (x, y) = (cell["x"].as_u64().unwrap(), cell["y"].as_u64().unwrap());
            if (x, y) == (2, 2) {
                cell["walls"] = serde_json::json!([true, true, true, true]);
            }
            if (x, y) == (1, 2) {
                cell["walls"][1] = serde_json::json!(true);
            }
            if (x, y) == (2, 1) {
                cell["walls"][2] = serde_json::json!(true);
            }
        }
        let grid: Grid = serde_json::from_value(value).unwrap();
        let mut maze = Maze::from_grid(grid).unwrap();

        assert!(!maze.is_connected());
        assert_eq!(
            maze.solve_corners(),
            Err(MazeError::Unreachable {
                start: Position::ORIGIN,
                end: Position::new(2, 2)
            })
        );
    }
}
