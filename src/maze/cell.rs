use crate::maze::{Coord, Direction};

/// Wall flags of one cell, one bit per cardinal direction. A set bit means the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls(u8);

impl Walls {
    pub const ALL: Walls = Walls(0b1111);
    pub const NONE: Walls = Walls(0);

    const fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    pub const fn has(self, direction: Direction) -> bool {
        self.0 & Walls::bit(direction) != 0
    }

    pub(crate) fn set(&mut self, direction: Direction, present: bool) {
        if present {
            self.0 |= Walls::bit(direction);
        } else {
            self.0 &= !Walls::bit(direction);
        }
    }

    /// Number of walls still standing around the cell.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// Traversal tag an algorithm leaves on a cell while it runs.
/// Reset to `Unvisited` before every run.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Unvisited,
    /// Part of the carved tree (generation) or already expanded (solving).
    Visited,
    /// Waiting in the algorithm's frontier.
    Frontier,
    /// On the reconstructed start-to-goal path.
    Path,
    /// The cell the algorithm is processing right now.
    Current,
}

/// A single grid cell: where it is, which walls surround it, and its traversal tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: Coord,
    pub(crate) walls: Walls,
    pub(crate) state: CellState,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Self {
        Cell {
            coord,
            walls: Walls::ALL,
            state: CellState::Unvisited,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.has(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_set_and_clear() {
        let mut walls = Walls::ALL;
        assert_eq!(walls.count(), 4);
        walls.set(Direction::Left, false);
        assert!(!walls.has(Direction::Left));
        assert!(walls.has(Direction::Right));
        assert_eq!(walls.count(), 3);
        walls.set(Direction::Left, true);
        assert_eq!(walls, Walls::ALL);
    }

    #[test]
    fn test_new_cell_is_closed_and_unvisited() {
        let cell = Cell::new(Coord::new(1, 2));
        assert_eq!(cell.coord(), Coord::new(1, 2));
        assert_eq!(cell.walls(), Walls::ALL);
        assert_eq!(cell.state(), CellState::Unvisited);
    }
}
