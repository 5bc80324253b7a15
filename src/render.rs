use std::fmt;

use crossterm::style::{Color, StyledContent, Stylize};
use mazestep::{CellState, Coord, Direction, Grid};

/// The width of each cell when rendered, in character widths.
pub const CELL_WIDTH: usize = 2;

/// Plain two-column symbol for a cell state.
pub const fn glyph(state: CellState) -> &'static str {
    match state {
        CellState::Unvisited => "  ",
        CellState::Visited => " .",
        CellState::Frontier => " +",
        CellState::Path => " *",
        CellState::Current => " @",
    }
}

fn styled(state: CellState) -> StyledContent<&'static str> {
    let styled_symbol = match state {
        CellState::Unvisited => glyph(state).with(Color::Reset),
        CellState::Visited => glyph(state).with(Color::Blue),
        CellState::Frontier => glyph(state).with(Color::Magenta),
        CellState::Path => glyph(state).with(Color::Yellow),
        CellState::Current => glyph(state).with(Color::Green),
    };

    #[cfg(debug_assertions)]
    {
        use unicode_width::UnicodeWidthStr;
        debug_assert_eq!(
            styled_symbol.content().width(),
            CELL_WIDTH,
            "Each cell must occupy exactly two character widths."
        );
    }

    styled_symbol
}

/// Terminal size needed for `grid` drawn as box art, in (columns, rows).
pub fn footprint(grid: &Grid) -> (usize, usize) {
    let width = grid.cols() as usize * (CELL_WIDTH + 1) + 1;
    let height = grid.rows() as usize * 2 + 1;
    (width, height)
}

fn write_with<F>(grid: &Grid, f: &mut fmt::Formatter<'_>, mut paint: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, CellState) -> fmt::Result,
{
    for row in 0..grid.rows() {
        f.write_str("+")?;
        for col in 0..grid.cols() {
            let cell = &grid[Coord::new(row, col)];
            f.write_str(if cell.has_wall(Direction::Up) { "--+" } else { "  +" })?;
        }
        f.write_str("\n")?;
        for col in 0..grid.cols() {
            let cell = &grid[Coord::new(row, col)];
            if col == 0 {
                f.write_str(if cell.has_wall(Direction::Left) { "|" } else { " " })?;
            }
            paint(f, cell.state())?;
            f.write_str(if cell.has_wall(Direction::Right) { "|" } else { " " })?;
        }
        f.write_str("\n")?;
    }
    f.write_str("+")?;
    for col in 0..grid.cols() {
        let cell = &grid[Coord::new(grid.rows() - 1, col)];
        f.write_str(if cell.has_wall(Direction::Down) { "--+" } else { "  +" })?;
    }
    f.write_str("\n")
}

/// Box art with plain glyphs, for logs and non-terminal output.
pub struct Plain<'a>(pub &'a Grid);

impl fmt::Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with(self.0, f, |f, state| f.write_str(glyph(state)))
    }
}

/// Box art that colors each cell by its state.
pub struct Styled<'a>(pub &'a Grid);

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with(self.0, f, |f, state| write!(f, "{}", styled(state)))
    }
}
