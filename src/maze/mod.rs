pub mod cell;
mod grid;

use std::fmt;

pub use cell::{Cell, CellState, Walls};
pub use grid::Grid;

/// Position of a cell as (row, col), origin at the top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    pub const fn new(row: u16, col: u16) -> Self {
        Coord { row, col }
    }

    /// The coordinate one step away in `direction`, if it does not underflow or overflow.
    /// Bounds against a particular grid are checked by the grid.
    pub fn step(self, direction: Direction) -> Option<Coord> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        Some(Coord { row, col })
    }

    /// Direction from `self` to `other` when the two are grid-neighbors.
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.step(direction) == Some(other))
    }

    /// Manhattan distance, the number of unit moves between the two cells on an open grid.
    pub fn manhattan(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl From<(u16, u16)> for Coord {
    fn from((row, col): (u16, u16)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Orientation of a wall line laid across a chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Runs left to right, separating a row from the row below it.
    Horizontal,
    /// Runs top to bottom, separating a column from the column right of it.
    Vertical,
}
