//! Plain-text maze renderers.
//!
//! Both renderers read only dimensions, wall flags and `on_path` flags, so
//! they work on any grid, generated or not.

use clap::ValueEnum;
use maze_core::{Direction, Grid, Position};
use serde::{Deserialize, Serialize};

/// Output style for the maze drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum Style {
    /// Box-drawing characters
    #[default]
    Unicode,
    /// `#` walls on a (2w+1)x(2h+1) lattice
    Ascii,
}

impl Style {
    pub fn toggled(self) -> Self {
        match self {
            Style::Unicode => Style::Ascii,
            Style::Ascii => Style::Unicode,
        }
    }

    /// Terminal column/row of the middle of cell `pos` in the rendered text
    pub fn cell_origin(self, pos: Position) -> (usize, usize) {
        match self {
            Style::Unicode => (4 * pos.x + 2, 2 * pos.y + 1),
            Style::Ascii => (2 * pos.x + 1, 2 * pos.y + 1),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Unicode => write!(f, "unicode"),
            Style::Ascii => write!(f, "ascii"),
        }
    }
}

pub const PATH_GLYPH: char = '•';
pub const ASCII_PATH_GLYPH: char = '.';

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Draw path markers on cells flagged `on_path`
    pub show_path: bool,
    pub start: Option<Position>,
    pub end: Option<Position>,
}

impl RenderOptions {
    pub fn with_path() -> Self {
        Self {
            show_path: true,
            ..Self::default()
        }
    }

    pub fn endpoints(mut self, start: Position, end: Position) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    fn marker(&self, grid: &Grid, pos: Position, path_glyph: char) -> Option<char> {
        if self.start == Some(pos) {
            Some('S')
        } else if self.end == Some(pos) {
            Some('E')
        } else if self.show_path && grid.cell(pos).is_some_and(|c| c.is_on_path()) {
            Some(path_glyph)
        } else {
            None
        }
    }
}

pub fn render(grid: &Grid, style: Style, options: &RenderOptions) -> String {
    match style {
        Style::Unicode => render_unicode(grid, options),
        Style::Ascii => render_ascii(grid, options),
    }
}

/// Wall segment on top of cell (x, y); `y == height` is the bottom edge.
fn horizontal_wall(grid: &Grid, x: usize, y: usize) -> bool {
    let below = y < grid.height()
        && grid
            .cell(Position::new(x, y))
            .is_some_and(|c| c.has_wall(Direction::Top));
    let above = y > 0
        && grid
            .cell(Position::new(x, y - 1))
            .is_some_and(|c| c.has_wall(Direction::Bottom));
    below || above
}

/// Wall segment left of cell (x, y); `x == width` is the right edge.
fn vertical_wall(grid: &Grid, x: usize, y: usize) -> bool {
    let right = x < grid.width()
        && grid
            .cell(Position::new(x, y))
            .is_some_and(|c| c.has_wall(Direction::Left));
    let left = x > 0
        && grid
            .cell(Position::new(x - 1, y))
            .is_some_and(|c| c.has_wall(Direction::Right));
    right || left
}

/// Box-drawing glyph where up to four wall segments meet
fn junction(up: bool, right: bool, down: bool, left: bool) -> char {
    match (up, right, down, left) {
        (false, false, false, false) => ' ',
        (true, false, true, false) | (true, false, false, false) | (false, false, true, false) => '│',
        (false, true, false, true) | (false, true, false, false) | (false, false, false, true) => '─',
        (false, true, true, false) => '┌',
        (false, false, true, true) => '┐',
        (true, true, false, false) => '└',
        (true, false, false, true) => '┘',
        (true, true, true, false) => '├',
        (true, false, true, true) => '┤',
        (false, true, true, true) => '┬',
        (true, true, false, true) => '┴',
        (true, true, true, true) => '┼',
    }
}

pub fn render_unicode(grid: &Grid, options: &RenderOptions) -> String {
    let (w, h) = (grid.width(), grid.height());
    if w == 0 || h == 0 {
        return String::new();
    }

    let mut out = String::new();
    for j in 0..=h {
        for i in 0..=w {
            let up = j > 0 && vertical_wall(grid, i, j - 1);
            let down = j < h && vertical_wall(grid, i, j);
            let left = i > 0 && horizontal_wall(grid, i - 1, j);
            let right = i < w && horizontal_wall(grid, i, j);
            out.push(junction(up, right, down, left));
            if i < w {
                out.push_str(if right { "───" } else { "   " });
            }
        }
        out.push('\n');

        if j < h {
            for i in 0..=w {
                out.push(if vertical_wall(grid, i, j) { '│' } else { ' ' });
                if i < w {
                    match options.marker(grid, Position::new(i, j), PATH_GLYPH) {
                        Some(m) => {
                            out.push(' ');
                            out.push(m);
                            out.push(' ');
                        }
                        None => out.push_str("   "),
                    }
                }
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_ascii(grid: &Grid, options: &RenderOptions) -> String {
    let (w, h) = (grid.width(), grid.height());
    if w == 0 || h == 0 {
        return String::new();
    }

    let on_path = |pos: Position| {
        options.show_path && grid.cell(pos).is_some_and(|c| c.is_on_path())
    };

    let mut out = String::with_capacity((2 * w + 2) * (2 * h + 1));
    for gy in 0..=2 * h {
        for gx in 0..=2 * w {
            let ch = match (gx % 2, gy % 2) {
                (0, 0) => '#',
                (1, 1) => {
                    let pos = Position::new(gx / 2, gy / 2);
                    options.marker(grid, pos, ASCII_PATH_GLYPH).unwrap_or(' ')
                }
                (1, 0) => {
                    let (x, y) = (gx / 2, gy / 2);
                    if horizontal_wall(grid, x, y) {
                        '#'
                    } else if y > 0 && on_path(Position::new(x, y - 1)) && on_path(Position::new(x, y)) {
                        ASCII_PATH_GLYPH
                    } else {
                        ' '
                    }
                }
                _ => {
                    let (x, y) = (gx / 2, gy / 2);
                    if vertical_wall(grid, x, y) {
                        '#'
                    } else if x > 0 && on_path(Position::new(x - 1, y)) && on_path(Position::new(x, y)) {
                        ASCII_PATH_GLYPH
                    } else {
                        ' '
                    }
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
