use std::collections::VecDeque;

use crate::{
    error::{MazeError, Result},
    maze::{
        Coord, Direction,
        cell::{Cell, CellState, Walls},
    },
};

/// Rectangular grid of cells, stored row-major.
///
/// Walls are kept on both sides of every shared edge, and every mutation goes
/// through [`Grid::set_wall`]-style helpers that update the pair together, so
/// the two flags never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: u16,
    cols: u16,
}

impl Grid {
    /// Creates a grid with every wall present and every cell unvisited.
    pub fn new(rows: u16, cols: u16) -> Result<Self> {
        if rows < 1 || cols < 1 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(Coord { row, col })))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Ok(Grid { cells, rows, cols })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least one cell. Present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub(crate) fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since rows and cols are u16 (assuming usize is at least 32 bits)
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    pub(crate) fn coord_of(&self, index: usize) -> Coord {
        Coord {
            row: (index / self.cols as usize) as u16,
            col: (index % self.cols as usize) as u16,
        }
    }

    #[cfg(test)]
    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let index = self.ravel_index(coord);
        &mut self.cells[index]
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.is_in_bounds(coord).then(|| &self.cells[self.ravel_index(coord)])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord { row, col }))
    }

    /// Every pair of adjacent cells exactly once, as (cell, cell to its right or below).
    pub fn interior_edges(&self) -> impl Iterator<Item = (Coord, Coord)> + use<> {
        let (rows, cols) = (self.rows, self.cols);
        self.coords().flat_map(move |c| {
            [
                (c.col + 1 < cols).then(|| (c, Coord::new(c.row, c.col + 1))),
                (c.row + 1 < rows).then(|| (c, Coord::new(c.row + 1, c.col))),
            ]
            .into_iter()
            .flatten()
        })
    }

    /// Up to four in-bounds neighbors of `coord`, in up, down, left, right order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let in_bounds = self.is_in_bounds(coord);
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| in_bounds.then(|| coord.step(direction)).flatten())
            .filter(move |&c| self.is_in_bounds(c))
    }

    /// Neighbors reachable from `coord` without crossing a wall.
    pub fn passages(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors(coord).filter(move |&c| self.is_open(coord, c))
    }

    /// Whether `a` and `b` are adjacent with no wall between them.
    pub fn is_open(&self, a: Coord, b: Coord) -> bool {
        match (self.cell(a), a.direction_to(b)) {
            (Some(cell), Some(direction)) if self.is_in_bounds(b) => !cell.has_wall(direction),
            _ => false,
        }
    }

    fn direction_between(&self, a: Coord, b: Coord) -> Result<Direction> {
        match a.direction_to(b) {
            Some(direction) if self.is_in_bounds(a) && self.is_in_bounds(b) => Ok(direction),
            _ => Err(MazeError::NotAdjacent { a, b }),
        }
    }

    /// Sets or clears the wall between two adjacent cells on both sides at once.
    /// Returns whether anything changed. Non-adjacent pairs are left alone and report `false`.
    pub(crate) fn set_wall(&mut self, a: Coord, b: Coord, present: bool) -> bool {
        let Ok(direction) = self.direction_between(a, b) else {
            return false;
        };
        let (ia, ib) = (self.ravel_index(a), self.ravel_index(b));
        if self.cells[ia].walls.has(direction) == present {
            return false;
        }
        self.cells[ia].walls.set(direction, present);
        self.cells[ib].walls.set(direction.opposite(), present);
        true
    }

    /// Removes the wall between `a` and `b`.
    ///
    /// Returns `true` if a wall was removed, `false` if the passage was already open.
    /// Fails with [`MazeError::NotAdjacent`] when the two cells do not share a wall.
    pub fn remove_wall(&mut self, a: Coord, b: Coord) -> Result<bool> {
        self.direction_between(a, b)?;
        Ok(self.set_wall(a, b, false))
    }

    /// Puts back the wall between `a` and `b`. Same contract as [`Grid::remove_wall`].
    pub fn add_wall(&mut self, a: Coord, b: Coord) -> Result<bool> {
        self.direction_between(a, b)?;
        Ok(self.set_wall(a, b, true))
    }

    /// Restores every wall. Cell states are left untouched.
    pub fn fill_walls(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.walls = Walls::ALL);
    }

    /// Removes every internal wall. Boundary walls are preserved.
    pub fn clear_walls(&mut self) {
        for (a, b) in self.interior_edges() {
            self.set_wall(a, b, false);
        }
    }

    /// Tags one cell. Algorithms only pass coordinates of the grid they were built for.
    pub(crate) fn set_state(&mut self, coord: Coord, state: CellState) {
        let idx = self.ravel_index(coord);
        self.cells[idx].state = state;
    }

    /// Sets every cell's state back to `Unvisited`.
    pub fn reset_states(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.state = CellState::Unvisited);
    }

    /// Number of open internal edges.
    pub fn passage_count(&self) -> usize {
        self.interior_edges()
            .filter(|&(a, b)| self.is_open(a, b))
            .count()
    }

    /// Checks that every shared wall agrees on both sides and the outer boundary is closed.
    pub fn is_wall_symmetric(&self) -> bool {
        self.cells.iter().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                match cell
                    .coord()
                    .step(direction)
                    .filter(|&c| self.is_in_bounds(c))
                {
                    Some(other) => {
                        cell.has_wall(direction) == self[other].has_wall(direction.opposite())
                    }
                    None => cell.has_wall(direction),
                }
            })
        })
    }

    /// Whether every cell can be reached from every other one through open passages.
    pub fn is_connected(&self) -> bool {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([Coord::new(0, 0)]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(coord) = queue.pop_front() {
            for next in self.passages(coord) {
                let idx = self.ravel_index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.len()
    }

    pub(crate) fn check_endpoint(&self, coord: Coord) -> Result<()> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::InvalidEndpoint {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}
