use crate::prefs::Preferences;
use crate::text::{RenderOptions, Style};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use maze_core::{GenerationReport, Maze, MazeError, Path, Position, Strategy};
use std::time::{Duration, Instant};

/// Largest side the interactive view lets you grow to
pub const MAX_INTERACTIVE_SIDE: i32 = 60;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Tone of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// The interactive application state
pub struct App {
    pub maze: Maze,
    /// Currently selected cell position
    pub cursor: Position,
    pub start: Option<Position>,
    pub end: Option<Position>,
    /// Last successful solve
    pub path: Option<Path>,
    pub style: Style,
    pub strategy: Strategy,
    pub theme: Theme,
    pub show_endpoints: bool,
    /// Message to display
    pub message: Option<(String, MessageKind)>,
    /// Message timer
    message_timer: u32,
    /// Last generation and how long it took
    pub last_generation: Option<(GenerationReport, Duration)>,
    pub last_solve: Option<Duration>,
}

impl App {
    /// Start from saved preferences with a freshly generated maze
    pub fn new(prefs: &Preferences) -> Self {
        let width = prefs.width.clamp(1, MAX_INTERACTIVE_SIDE);
        let height = prefs.height.clamp(1, MAX_INTERACTIVE_SIDE);
        Self::with_maze(Maze::new(width, height), prefs)
    }

    pub fn with_maze(maze: Maze, prefs: &Preferences) -> Self {
        let mut app = Self {
            maze,
            cursor: Position::ORIGIN,
            start: None,
            end: None,
            path: None,
            style: prefs.style,
            strategy: prefs.strategy,
            theme: Theme::from_name(prefs.theme),
            show_endpoints: prefs.show_endpoints,
            message: None,
            message_timer: 0,
            last_generation: None,
            last_solve: None,
        };
        app.regenerate(app.strategy);
        app
    }

    /// Preferences reflecting the current session
    pub fn preferences(&self) -> Preferences {
        Preferences {
            width: self.maze.width() as i32,
            height: self.maze.height() as i32,
            strategy: self.strategy,
            style: self.style,
            theme: self.theme.name,
            show_endpoints: self.show_endpoints,
        }
    }

    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str, kind: MessageKind) {
        self.message = Some((msg.to_string(), kind));
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    fn show_error(&mut self, err: &MazeError) {
        self.show_message(&err.to_string(), MessageKind::Error);
    }

    /// Render options for the current marks
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::with_path();
        if self.show_endpoints && self.path.is_some() {
            options.start = self.path.as_ref().map(Path::start);
            options.end = self.path.as_ref().map(Path::end);
        }
        options
    }

    /// Start and end the next solve will use
    pub fn endpoints(&self) -> (Position, Position) {
        let corner = Position::new(
            self.maze.width().saturating_sub(1),
            self.maze.height().saturating_sub(1),
        );
        (self.start.unwrap_or(Position::ORIGIN), self.end.unwrap_or(corner))
    }

    pub fn regenerate(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        self.path = None;
        let started = Instant::now();
        match self.maze.generate(strategy) {
            Ok(report) => {
                let elapsed = started.elapsed();
                self.last_generation = Some((report, elapsed));
                self.show_message(
                    &format!("Generated ({strategy}) in {} µs", elapsed.as_micros()),
                    MessageKind::Info,
                );
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub fn solve(&mut self) {
        let (start, end) = self.endpoints();
        let started = Instant::now();
        let result = self.maze.solve(start, end);
        self.last_solve = Some(started.elapsed());
        match result {
            Ok(path) => {
                let msg = format!("Path {start} -> {end}: {} steps", path.length());
                self.path = Some(path);
                self.show_message(&msg, MessageKind::Success);
            }
            Err(e) => {
                self.path = None;
                self.show_error(&e);
            }
        }
    }

    pub fn clear_path(&mut self) {
        self.maze.clear_path();
        self.path = None;
    }

    /// Grow or shrink the maze and carve a new one
    pub fn resize(&mut self, dw: i32, dh: i32) {
        let width = (self.maze.width() as i32 + dw).clamp(1, MAX_INTERACTIVE_SIDE);
        let height = (self.maze.height() as i32 + dh).clamp(1, MAX_INTERACTIVE_SIDE);
        if width == self.maze.width() as i32 && height == self.maze.height() as i32 {
            return;
        }
        self.maze = match self.maze.seed() {
            Some(seed) => Maze::with_seed(width, height, seed),
            None => Maze::new(width, height),
        };
        self.start = self.start.filter(|p| self.maze.grid().contains(*p));
        self.end = self.end.filter(|p| self.maze.grid().contains(*p));
        self.cursor = Position::new(
            self.cursor.x.min(width as usize - 1),
            self.cursor.y.min(height as usize - 1),
        );
        self.regenerate(self.strategy);
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let max_x = self.maze.width().saturating_sub(1);
        let max_y = self.maze.height().saturating_sub(1);
        self.cursor = Position::new(
            self.cursor.x.saturating_add_signed(dx).min(max_x),
            self.cursor.y.saturating_add_signed(dy).min(max_y),
        );
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Char('g') => self.regenerate(Strategy::Iterative),
            KeyCode::Char('r') => self.regenerate(Strategy::Recursive),
            KeyCode::Char('a') => {
                self.start = Some(self.cursor);
                self.show_message(&format!("Start set to {}", self.cursor), MessageKind::Info);
            }
            KeyCode::Char('b') => {
                self.end = Some(self.cursor);
                self.show_message(&format!("End set to {}", self.cursor), MessageKind::Info);
            }
            KeyCode::Char('s') | KeyCode::Enter => self.solve(),
            KeyCode::Char('c') => self.clear_path(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.resize(1, 0),
            KeyCode::Char('-') => self.resize(-1, 0),
            KeyCode::Char(']') => self.resize(0, 1),
            KeyCode::Char('[') => self.resize(0, -1),
            KeyCode::Char('t') => self.style = self.style.toggled(),
            KeyCode::Char('T') => self.theme = Theme::from_name(self.theme.name.next()),
            KeyCode::Char('i') => {
                let msg = if self.maze.is_connected() {
                    ("All cells connected", MessageKind::Success)
                } else {
                    ("Maze is NOT connected", MessageKind::Error)
                };
                self.show_message(msg.0, msg.1);
            }
            _ => {}
        }
        AppAction::Continue
    }
}
