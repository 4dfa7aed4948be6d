//! Basic example of using the maze engine

use maze_core::{Maze, MazeConfig, Position, Strategy};

fn main() {
    // Generate a maze
    println!("Generating a medium maze with seed 42...\n");
    let mut maze = match MazeConfig::medium().with_seed(42).build() {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("could not build maze: {e}");
            return;
        }
    };
    let report = match maze.generate(Strategy::Iterative) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("generation failed: {e}");
            return;
        }
    };

    println!("Visited {} cells", report.cells_visited);
    println!("Carved {} passages", report.passages_carved);
    println!("Deepest stack: {}", report.max_stack_depth);
    println!("Connected: {}\n", maze.is_connected());

    // Some stats
    let stats = maze.stats();
    println!("Dead ends: {}", stats.dead_ends);
    println!("Junctions: {}", stats.junctions);
    println!("Unique walls: {}\n", stats.unique_walls);

    // Solve it
    println!("Solving corner to corner...");
    match maze.solve_corners() {
        Ok(path) => {
            println!("{} steps", path.length());
            println!("{path}");
        }
        Err(e) => println!("No path: {e}"),
    }

    // Errors are values
    println!("\n--- Solving outside the grid ---\n");
    if let Err(e) = maze.solve(Position::ORIGIN, Position::new(99, 0)) {
        println!("{e}");
    }

    // Recursive carving of the same size
    println!("\n--- Recursive strategy ---\n");
    let mut recursive = Maze::with_seed(15, 15, 42);
    if let Ok(report) = recursive.generate_recursive() {
        println!("Deepest recursion: {}", report.max_stack_depth);
    }
}
