use crate::app::{App, MessageKind};
use crate::text::{self, Style, ASCII_PATH_GLYPH, PATH_GLYPH};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;

const INFO_PANEL_WIDTH: u16 = 26;
const CONTROLS_HEIGHT: u16 = 5;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let drawing = text::render(app.maze.grid(), app.style, &app.render_options());
    let lines: Vec<Vec<char>> = drawing.lines().map(|l| l.chars().collect()).collect();
    let maze_width = lines.first().map_or(0, |l| l.len()) as u16;
    let maze_height = lines.len() as u16;

    // Leave the top row for messages
    let start_x = 1;
    let start_y = 2;
    let max_cols = term_width.saturating_sub(start_x + INFO_PANEL_WIDTH + 2);
    let max_rows = term_height.saturating_sub(start_y + CONTROLS_HEIGHT + 1);

    render_maze(stdout, app, &lines, start_x, start_y, max_cols, max_rows)?;

    let info_x = start_x + maze_width.min(max_cols) + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + maze_height.min(max_rows).max(20) + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some((ref msg, kind)) = app.message {
        render_message(stdout, app, msg, kind, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn glyph_color(app: &App, ch: char) -> Color {
    let theme = &app.theme;
    match ch {
        'S' | 'E' => theme.marker,
        c if c == PATH_GLYPH || (c == ASCII_PATH_GLYPH && app.style == Style::Ascii) => theme.path,
        ' ' => theme.fg,
        _ => theme.wall,
    }
}

fn render_maze(
    stdout: &mut io::Stdout,
    app: &App,
    lines: &[Vec<char>],
    x: u16,
    y: u16,
    max_cols: u16,
    max_rows: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    for (row, line) in lines.iter().take(max_rows as usize).enumerate() {
        execute!(stdout, MoveTo(x, y + row as u16))?;
        let mut current = None;
        for &ch in line.iter().take(max_cols as usize) {
            let color = glyph_color(app, ch);
            if current != Some(color) {
                execute!(stdout, SetForegroundColor(color))?;
                current = Some(color);
            }
            execute!(stdout, Print(ch))?;
        }
    }

    // Cursor highlight over the middle of the selected cell
    let (col, row) = app.style.cell_origin(app.cursor);
    if col < max_cols as usize && row < max_rows as usize {
        let ch = lines.get(row).and_then(|l| l.get(col)).copied().unwrap_or(' ');
        execute!(
            stdout,
            MoveTo(x + col as u16, y + row as u16),
            SetBackgroundColor(theme.cursor_bg),
            SetForegroundColor(glyph_color(app, ch)),
            Print(ch),
            SetBackgroundColor(theme.bg)
        )?;
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.maze.grid();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ MAZE ═══")
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Size: {:>12}", format!("{}x{}", grid.width(), grid.height())))
    )?;

    let seed = app
        .maze
        .seed()
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Seed: {:>12}", seed))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Strategy: {:>8}", app.strategy.to_string()))
    )?;

    execute!(
        stdout,
        MoveTo(x, y + 5),
        SetForegroundColor(theme.info),
        Print(format!("Style: {:>11}", app.style.to_string()))
    )?;

    if let Some((report, elapsed)) = &app.last_generation {
        execute!(
            stdout,
            MoveTo(x, y + 7),
            SetForegroundColor(theme.info),
            Print(format!("Carved: {:>10}", report.passages_carved)),
            MoveTo(x, y + 8),
            Print(format!("Stack depth: {:>5}", report.max_stack_depth)),
            MoveTo(x, y + 9),
            Print(format!("Generate: {:>5} µs", elapsed.as_micros()))
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 11),
        SetForegroundColor(theme.wall),
        Print("────────────────")
    )?;

    let (start, end) = app.endpoints();
    execute!(
        stdout,
        MoveTo(x, y + 13),
        SetForegroundColor(theme.info),
        Print(format!("Cursor: {:>10}", app.cursor.to_string())),
        MoveTo(x, y + 14),
        Print(format!("Start: {:>11}", start.to_string())),
        MoveTo(x, y + 15),
        Print(format!("End: {:>13}", end.to_string()))
    )?;

    match &app.path {
        Some(path) => execute!(
            stdout,
            MoveTo(x, y + 17),
            SetForegroundColor(theme.success),
            Print(format!("Path: {:>6} steps", path.length()))
        )?,
        None => execute!(
            stdout,
            MoveTo(x, y + 17),
            SetForegroundColor(theme.info),
            Print("Path:   (s=solve)")
        )?,
    }

    if let (Some(elapsed), Some(_)) = (app.last_solve, &app.path) {
        execute!(
            stdout,
            MoveTo(x, y + 18),
            SetForegroundColor(theme.info),
            Print(format!("Solve: {:>8} µs", elapsed.as_micros()))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("g", "Generate"),
        ("r", "Recursive"),
        ("s/Enter", "Solve"),
        ("a", "Set start"),
        ("b", "Set end"),
        ("c", "Clear path"),
        ("i", "Check"),
        ("+/-", "Width"),
        ("]/[", "Height"),
        ("t", "Style"),
        ("T", "Theme"),
        ("q", "Quit"),
    ];

    // Four rows per column
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 24;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    kind: MessageKind,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;
    let color = match kind {
        MessageKind::Info => theme.fg,
        MessageKind::Success => theme.success,
        MessageKind::Error => theme.error,
    };

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(color),
        SetBackgroundColor(theme.cursor_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}
