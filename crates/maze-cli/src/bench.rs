//! Timing harnesses: strategy comparison and the solving demonstration.

use maze_core::{Maze, MazeError, Position, Strategy};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Averages for one (size, strategy) combination
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub width: usize,
    pub height: usize,
    pub strategy: Strategy,
    pub runs: usize,
    pub avg_generate_us: u128,
    pub avg_solve_us: u128,
    /// Corner-to-corner path length of the last run
    pub path_length: usize,
    pub max_stack_depth: usize,
    /// Every run produced a connected maze
    pub all_connected: bool,
}

/// Generate and solve square mazes of each side in `sizes`, `runs` times per
/// strategy. Run `i` of every combination uses `seed + i`, so both strategies
/// see the same seeds.
pub fn compare_strategies(sizes: &[usize], runs: usize, seed: u64) -> Result<Vec<BenchRow>, MazeError> {
    let runs = runs.max(1);
    let mut rows = Vec::new();

    for &side in sizes {
        let side_i32 = i32::try_from(side).unwrap_or(i32::MAX);
        for &strategy in Strategy::all() {
            let mut generate_total = Duration::ZERO;
            let mut solve_total = Duration::ZERO;
            let mut path_length = 0;
            let mut max_stack_depth = 0;
            let mut all_connected = true;

            for run in 0..runs {
                let mut maze = Maze::with_seed(side_i32, side_i32, seed.wrapping_add(run as u64));

                let started = Instant::now();
                let report = maze.generate(strategy)?;
                generate_total += started.elapsed();

                let started = Instant::now();
                let path = maze.solve_corners()?;
                solve_total += started.elapsed();

                path_length = path.length();
                max_stack_depth = max_stack_depth.max(report.max_stack_depth);
                all_connected &= maze.is_connected();
            }

            log::info!("benched {side}x{side} {strategy} over {runs} runs");
            rows.push(BenchRow {
                width: side,
                height: side,
                strategy,
                runs,
                avg_generate_us: generate_total.as_micros() / runs as u128,
                avg_solve_us: solve_total.as_micros() / runs as u128,
                path_length,
                max_stack_depth,
                all_connected,
            });
        }
    }
    Ok(rows)
}

pub fn format_table(rows: &[BenchRow]) -> String {
    let mut out = format!(
        "{:>9}  {:<10} {:>5} {:>12} {:>10} {:>6} {:>7} {:>9}\n",
        "size", "strategy", "runs", "generate µs", "solve µs", "path", "depth", "connected"
    );
    out.push_str(&"-".repeat(out.chars().count() - 1));
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:>9}  {:<10} {:>5} {:>12} {:>10} {:>6} {:>7} {:>9}\n",
            format!("{}x{}", row.width, row.height),
            row.strategy.to_string(),
            row.runs,
            row.avg_generate_us,
            row.avg_solve_us,
            row.path_length,
            row.max_stack_depth,
            if row.all_connected { "yes" } else { "NO" }
        ));
    }
    out
}

/// One solving scenario of the demonstration
#[derive(Debug, Clone, Serialize)]
pub struct DemoCase {
    pub name: &'static str,
    pub start: Position,
    pub end: Position,
    /// Path length on success, error text otherwise
    pub outcome: Result<usize, String>,
    pub micros: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub connected: bool,
    pub connect_us: u128,
    pub cases: Vec<DemoCase>,
}

impl DemoReport {
    pub fn solved(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_ok()).count()
    }

    pub fn fastest_us(&self) -> Option<u128> {
        self.cases.iter().map(|c| c.micros).min()
    }

    pub fn slowest_us(&self) -> Option<u128> {
        self.cases.iter().map(|c| c.micros).max()
    }

    pub fn average_us(&self) -> Option<u128> {
        if self.cases.is_empty() {
            return None;
        }
        Some(self.cases.iter().map(|c| c.micros).sum::<u128>() / self.cases.len() as u128)
    }
}

/// The scenarios the demonstration runs on a `width` x `height` maze
pub fn demo_cases(width: usize, height: usize) -> Vec<(&'static str, Position, Position)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut cases = vec![
        (
            "Corner to corner",
            Position::ORIGIN,
            Position::new(width - 1, height - 1),
        ),
        (
            "Reverse diagonal",
            Position::new(0, height - 1),
            Position::new(width - 1, 0),
        ),
    ];
    if width > 2 && height > 2 {
        cases.push(("Center to origin", Position::new(width / 2, height / 2), Position::ORIGIN));
    }
    cases
}

/// Check connectivity, then time each scenario.
pub fn solve_demo(maze: &mut Maze) -> DemoReport {
    let started = Instant::now();
    let connected = maze.is_connected();
    let connect_us = started.elapsed().as_micros();

    let mut cases = Vec::new();
    for (name, start, end) in demo_cases(maze.width(), maze.height()) {
        let started = Instant::now();
        let result = maze.solve(start, end);
        let micros = started.elapsed().as_micros();
        let outcome = result.map(|path| path.length()).map_err(|e| e.to_string());
        cases.push(DemoCase {
            name,
            start,
            end,
            outcome,
            micros,
        });
    }

    // Leave the first solved scenario marked for rendering
    if let Some(first) = cases.iter().find(|c| c.outcome.is_ok()) {
        if let Err(e) = maze.solve(first.start, first.end) {
            log::warn!("re-solving {} failed: {e}", first.name);
        }
    }

    DemoReport {
        connected,
        connect_us,
        cases,
    }
}
