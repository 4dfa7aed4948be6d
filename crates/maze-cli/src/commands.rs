//! One-shot subcommands: generate, solve, bench and demo.

use crate::bench::{self, DemoReport};
use crate::prefs::{Preferences, MAX_SIDE, MIN_SIDE};
use crate::text::{self, RenderOptions, Style};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use maze_core::{GenerationReport, Maze, MazeStats, Position, Strategy};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Command-line spelling of a generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Iterative,
    Recursive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Iterative => Strategy::Iterative,
            StrategyArg::Recursive => Strategy::Recursive,
        }
    }
}

/// Flags shared by every command that builds a maze
#[derive(Debug, Clone, Default, Args)]
pub struct MazeArgs {
    /// Number of columns
    #[arg(short = 'W', long, value_parser = clap::value_parser!(i32).range(MIN_SIDE as i64..=MAX_SIDE as i64))]
    pub width: Option<i32>,
    /// Number of rows
    #[arg(short = 'H', long, value_parser = clap::value_parser!(i32).range(MIN_SIDE as i64..=MAX_SIDE as i64))]
    pub height: Option<i32>,
    /// Seed for reproducible mazes; drawn at random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    #[arg(long, value_enum)]
    pub style: Option<Style>,
}

/// Flags merged over saved preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    pub strategy: Strategy,
    pub style: Style,
}

impl MazeArgs {
    pub fn resolve(&self, prefs: &Preferences) -> Resolved {
        Resolved {
            width: self.width.unwrap_or(prefs.width),
            height: self.height.unwrap_or(prefs.height),
            seed: self.seed.unwrap_or_else(rand::random),
            strategy: self.strategy.map_or(prefs.strategy, Strategy::from),
            style: self.style.unwrap_or(prefs.style),
        }
    }
}

/// Parse a cell given as `X,Y`
pub fn parse_point(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got `{s}`"))?;
    let x = x
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad column `{}`: {e}", x.trim()))?;
    let y = y
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad row `{}`: {e}", y.trim()))?;
    Ok(Position::new(x, y))
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub maze: MazeArgs,
    /// Print wall and passage statistics
    #[arg(long)]
    pub stats: bool,
    /// Print a JSON report instead of the drawing
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SolveArgs {
    #[command(flatten)]
    pub maze: MazeArgs,
    /// Start cell as X,Y (default 0,0)
    #[arg(long, value_parser = parse_point)]
    pub from: Option<Position>,
    /// End cell as X,Y (default bottom-right corner)
    #[arg(long, value_parser = parse_point)]
    pub to: Option<Position>,
    #[arg(long)]
    pub stats: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BenchArgs {
    /// Square sides to time
    #[arg(long, value_delimiter = ',', default_values_t = [10, 25, 50, 100])]
    pub sizes: Vec<usize>,
    /// Runs per size and strategy
    #[arg(long, default_value_t = 5)]
    pub runs: usize,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub maze: MazeArgs,
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    width: usize,
    height: usize,
    seed: u64,
    report: &'a GenerationReport,
    generate_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<MazeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Position>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solve_us: Option<u128>,
    connected: bool,
    text: String,
}

/// Build and carve a maze per the resolved flags
fn build(resolved: &Resolved) -> Result<(Maze, GenerationReport, Duration)> {
    let mut maze = Maze::with_seed(resolved.width, resolved.height, resolved.seed);
    let started = Instant::now();
    let report = maze
        .generate(resolved.strategy)
        .with_context(|| format!("generating {}x{} maze", resolved.width, resolved.height))?;
    let elapsed = started.elapsed();
    log::debug!(
        "{}x{} {} maze with seed {} in {:?}",
        resolved.width,
        resolved.height,
        resolved.strategy,
        resolved.seed,
        elapsed
    );
    Ok((maze, report, elapsed))
}

fn print_stats(stats: &MazeStats) {
    println!("Passages:       {}", stats.passages);
    println!("Internal walls: {}", stats.internal_walls);
    println!("Boundary walls: {}", stats.boundary_walls);
    println!("Unique walls:   {}", stats.unique_walls);
    println!("Dead ends:      {}", stats.dead_ends);
    println!("Junctions:      {}", stats.junctions);
    if let Some((pos, distance)) = stats.farthest_from_origin {
        println!("Farthest cell:  {pos} ({distance} steps from origin)");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing report")?;
    println!("{json}");
    Ok(())
}

pub fn generate(args: &GenerateArgs, prefs: &Preferences) -> Result<()> {
    let resolved = args.maze.resolve(prefs);
    let (maze, report, elapsed) = build(&resolved)?;
    let drawing = text::render(maze.grid(), resolved.style, &RenderOptions::default());
    let stats = args.stats.then(|| maze.stats());

    if args.json {
        return print_json(&GenerateOutput {
            width: maze.width(),
            height: maze.height(),
            seed: resolved.seed,
            report: &report,
            generate_us: elapsed.as_micros(),
            stats,
            path: None,
            path_length: None,
            solve_us: None,
            connected: maze.is_connected(),
            text: drawing,
        });
    }

    print!("{drawing}");
    println!(
        "{}x{} {} maze, seed {}, generated in {} µs",
        maze.width(),
        maze.height(),
        resolved.strategy,
        resolved.seed,
        elapsed.as_micros()
    );
    if let Some(stats) = &stats {
        print_stats(stats);
    }
    Ok(())
}

pub fn solve(args: &SolveArgs, prefs: &Preferences) -> Result<()> {
    let resolved = args.maze.resolve(prefs);
    let (mut maze, report, elapsed) = build(&resolved)?;

    let start = args.from.unwrap_or(Position::ORIGIN);
    let end = args
        .to
        .unwrap_or(Position::new(maze.width() - 1, maze.height() - 1));

    let started = Instant::now();
    let path = maze
        .solve(start, end)
        .with_context(|| format!("solving from {start} to {end}"))?;
    let solve_elapsed = started.elapsed();

    let connected = maze.is_connected();
    let options = RenderOptions::with_path().endpoints(start, end);
    let drawing = text::render(maze.grid(), resolved.style, &options);
    let stats = args.stats.then(|| maze.stats());

    if args.json {
        return print_json(&GenerateOutput {
            width: maze.width(),
            height: maze.height(),
            seed: resolved.seed,
            report: &report,
            generate_us: elapsed.as_micros(),
            stats,
            path: Some(path.positions().to_vec()),
            path_length: Some(path.length()),
            solve_us: Some(solve_elapsed.as_micros()),
            connected,
            text: drawing,
        });
    }

    print!("{drawing}");
    println!(
        "{}x{} {} maze, seed {}, generated in {} µs",
        maze.width(),
        maze.height(),
        resolved.strategy,
        resolved.seed,
        elapsed.as_micros()
    );
    println!(
        "Path {start} -> {end}: {} steps ({} cells), solved in {} µs",
        path.length(),
        path.cell_count(),
        solve_elapsed.as_micros()
    );
    println!("Connected: {}", if connected { "yes" } else { "NO" });
    if let Some(stats) = &stats {
        print_stats(stats);
    }
    Ok(())
}

pub fn bench(args: &BenchArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let sizes: Vec<usize> = args
        .sizes
        .iter()
        .copied()
        .filter(|&side| (MIN_SIDE as usize..=MAX_SIDE as usize).contains(&side))
        .collect();
    if sizes.len() < args.sizes.len() {
        log::warn!("skipping sizes outside {MIN_SIDE}..={MAX_SIDE}");
    }

    let rows = bench::compare_strategies(&sizes, args.runs, seed).context("running benchmark")?;

    if args.json {
        return print_json(&rows);
    }
    println!("seed {seed}");
    print!("{}", bench::format_table(&rows));
    Ok(())
}

fn print_demo(report: &DemoReport) {
    println!(
        "Connectivity: {} ({} µs)",
        if report.connected { "all cells reachable" } else { "NOT connected" },
        report.connect_us
    );
    for case in &report.cases {
        match &case.outcome {
            Ok(length) => println!(
                "{:<18} {} -> {}: {length} steps in {} µs",
                case.name, case.start, case.end, case.micros
            ),
            Err(e) => println!("{:<18} {} -> {}: {e}", case.name, case.start, case.end),
        }
    }
    println!("Solved {}/{}", report.solved(), report.cases.len());
    if let (Some(fastest), Some(slowest), Some(average)) =
        (report.fastest_us(), report.slowest_us(), report.average_us())
    {
        println!("Fastest {fastest} µs, slowest {slowest} µs, average {average} µs");
    }
}

pub fn demo(args: &DemoArgs, prefs: &Preferences) -> Result<()> {
    let resolved = args.maze.resolve(prefs);
    let (mut maze, _, elapsed) = build(&resolved)?;
    let report = bench::solve_demo(&mut maze);

    if args.json {
        return print_json(&report);
    }

    print!(
        "{}",
        text::render(maze.grid(), resolved.style, &RenderOptions::with_path())
    );
    println!(
        "{}x{} maze, seed {}, generated in {} µs",
        maze.width(),
        maze.height(),
        resolved.seed,
        elapsed.as_micros()
    );
    print_demo(&report);
    Ok(())
}
