#![allow(clippy::too_many_arguments)]
#![allow(clippy::format_in_format_args)]

mod app;
mod bench;
mod commands;
mod prefs;
mod render;
mod text;
mod theme;

use anyhow::{Context, Result};
use app::App;
use clap::{Args, Parser, Subcommand};
use commands::{BenchArgs, DemoArgs, GenerateArgs, SolveArgs, StrategyArg};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use maze_core::Maze;
use prefs::{Preferences, MIN_SIDE};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use text::Style;

#[derive(Parser)]
#[command(name = "maze", version, about = "Generate, draw and solve perfect mazes")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Carve a maze and print it
    Generate(GenerateArgs),
    /// Carve a maze and draw the shortest path between two cells
    Solve(SolveArgs),
    /// Time both strategies across several sizes
    Bench(BenchArgs),
    /// Run the solving demonstration on one maze
    Demo(DemoArgs),
    /// Explore mazes interactively (default)
    Play(PlayArgs),
}

#[derive(Debug, Clone, Default, Args)]
struct PlayArgs {
    #[arg(short = 'W', long, value_parser = clap::value_parser!(i32).range(MIN_SIDE as i64..=app::MAX_INTERACTIVE_SIDE as i64))]
    width: Option<i32>,
    #[arg(short = 'H', long, value_parser = clap::value_parser!(i32).range(MIN_SIDE as i64..=app::MAX_INTERACTIVE_SIDE as i64))]
    height: Option<i32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    #[arg(long, value_enum)]
    style: Option<Style>,
}

fn init_logging(verbose: u8, interactive: bool) {
    let default = match (interactive, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(
        Env::new()
            .filter_or("MAZE_LOG", default)
            .write_style("MAZE_LOG_STYLE"),
    )
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play(PlayArgs::default()));
    init_logging(cli.verbose, matches!(command, Command::Play(_)));

    let prefs = Preferences::load();
    match command {
        Command::Generate(args) => commands::generate(&args, &prefs),
        Command::Solve(args) => commands::solve(&args, &prefs),
        Command::Bench(args) => commands::bench(&args),
        Command::Demo(args) => commands::demo(&args, &prefs),
        Command::Play(args) => play(&args, prefs),
    }
}

fn play(args: &PlayArgs, mut prefs: Preferences) -> Result<()> {
    if let Some(width) = args.width {
        prefs.width = width;
    }
    if let Some(height) = args.height {
        prefs.height = height;
    }
    if let Some(strategy) = args.strategy {
        prefs.strategy = strategy.into();
    }
    if let Some(style) = args.style {
        prefs.style = style;
    }
    let mut app = match args.seed {
        Some(seed) => {
            let width = prefs.width.clamp(MIN_SIDE, app::MAX_INTERACTIVE_SIDE);
            let height = prefs.height.clamp(MIN_SIDE, app::MAX_INTERACTIVE_SIDE);
            App::with_maze(Maze::with_seed(width, height, seed), &prefs)
        }
        None => App::new(&prefs),
    };

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode().context("disabling raw mode")?;
    execute!(stdout, LeaveAlternateScreen).context("leaving alternate screen")?;

    if let Err(e) = app.preferences().save() {
        log::warn!("could not save preferences: {e}");
    }

    result.context("interactive session failed")
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::parse_from([
            "maze", "-vv", "generate", "-W", "30", "-H", "12", "--seed", "42", "--strategy", "recursive",
            "--style", "ascii", "--stats",
        ]);
        assert_eq!(cli.verbose, 2);
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.maze.width, Some(30));
        assert_eq!(args.maze.height, Some(12));
        assert_eq!(args.maze.seed, Some(42));
        assert_eq!(args.maze.strategy, Some(StrategyArg::Recursive));
        assert_eq!(args.maze.style, Some(Style::Ascii));
        assert!(args.stats);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_rejects_out_of_range_sides() {
        assert!(Cli::try_parse_from(["maze", "generate", "-W", "0"]).is_err());
        assert!(Cli::try_parse_from(["maze", "generate", "-H", "201"]).is_err());
        assert!(Cli::try_parse_from(["maze", "play", "-W", "61"]).is_err());
        assert!(Cli::try_parse_from(["maze", "generate", "-W", "200"]).is_ok());
    }

    #[test]
    fn test_parse_solve_points_and_bench_sizes() {
        let cli = Cli::parse_from(["maze", "solve", "--from", "1,2", "--to", "3,4"]);
        let Some(Command::Solve(args)) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.from, Some(maze_core::Position::new(1, 2)));
        assert_eq!(args.to, Some(maze_core::Position::new(3, 4)));
        assert!(Cli::try_parse_from(["maze", "solve", "--from", "x"]).is_err());

        let cli = Cli::parse_from(["maze", "bench", "--sizes", "5,15", "--runs", "2"]);
        let Some(Command::Bench(args)) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.sizes, vec![5, 15]);
        assert_eq!(args.runs, 2);

        let cli = Cli::parse_from(["maze", "bench"]);
        let Some(Command::Bench(args)) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.sizes, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::parse_from(["maze"]);
        assert!(cli.command.is_none());
    }
}
