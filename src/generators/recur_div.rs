use rand::{Rng, rngs::StdRng};

use crate::{
    maze::{CellState, Coord, Grid, Orientation},
    sequencer::{Algorithm, EventKind, EventSink, Progress},
};

/// Rectangular region of the grid still to be divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chamber {
    top_left: Coord,
    rows: u16,
    cols: u16,
}

enum Phase {
    /// Opening the interior one cell at a time, from `next` in row-major order.
    Clearing { next: usize },
    /// Splitting chambers popped off the stack.
    Dividing,
}

/// Recursive division, the one generator that adds walls.
///
/// Starts by opening every interior wall, then repeatedly splits a chamber with a wall
/// line that has a single gap. The recursion is kept on an explicit stack, and one
/// step clears one cell or splits one chamber.
pub struct RecursiveDivision {
    rng: StdRng,
    phase: Phase,
    chambers: Vec<Chamber>,
    started: bool,
}

impl RecursiveDivision {
    pub fn new(_grid: &Grid, rng: StdRng) -> Self {
        RecursiveDivision {
            rng,
            phase: Phase::Clearing { next: 0 },
            chambers: Vec::new(),
            started: false,
        }
    }

    fn clear_cell(grid: &mut Grid, sink: &mut EventSink, cell: Coord) {
        let right = Coord::new(cell.row, cell.col + 1);
        let below = Coord::new(cell.row + 1, cell.col);
        for other in [right, below] {
            if grid.is_in_bounds(other) && grid.set_wall(cell, other, false) {
                sink.emit(EventKind::WallRemoved(cell, other));
            }
        }
    }

    fn divide(&mut self, grid: &mut Grid, sink: &mut EventSink, chamber: Chamber) {
        let Chamber {
            top_left: Coord { row, col },
            rows,
            cols,
        } = chamber;

        let orientation = match cols.cmp(&rows) {
            std::cmp::Ordering::Less => Orientation::Horizontal,
            std::cmp::Ordering::Greater => Orientation::Vertical,
            std::cmp::Ordering::Equal => {
                if self.rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                }
            }
        };

        match orientation {
            Orientation::Horizontal => {
                // The wall runs below row `row + diff`
                let diff = self.rng.random_range(0..rows - 1);
                let wall_row = row + diff;
                let gap_col = col + self.rng.random_range(0..cols);

                for c in (col..col + cols).filter(|&c| c != gap_col) {
                    let (above, below) = (Coord::new(wall_row, c), Coord::new(wall_row + 1, c));
                    if grid.set_wall(above, below, true) {
                        sink.emit(EventKind::WallAdded(above, below));
                    }
                }
                grid.set_state(Coord::new(wall_row, gap_col), CellState::Visited);

                let upper_rows = diff + 1;
                // Pushed in reverse so the upper chamber is divided first
                self.chambers.push(Chamber {
                    top_left: Coord::new(wall_row + 1, col),
                    rows: rows - upper_rows,
                    cols,
                });
                self.chambers.push(Chamber {
                    top_left: Coord::new(row, col),
                    rows: upper_rows,
                    cols,
                });
            }
            Orientation::Vertical => {
                // The wall runs right of column `col + diff`
                let diff = self.rng.random_range(0..cols - 1);
                let wall_col = col + diff;
                let gap_row = row + self.rng.random_range(0..rows);

                for r in (row..row + rows).filter(|&r| r != gap_row) {
                    let (left, right) = (Coord::new(r, wall_col), Coord::new(r, wall_col + 1));
                    if grid.set_wall(left, right, true) {
                        sink.emit(EventKind::WallAdded(left, right));
                    }
                }
                grid.set_state(Coord::new(gap_row, wall_col), CellState::Visited);

                let left_cols = diff + 1;
                self.chambers.push(Chamber {
                    top_left: Coord::new(row, wall_col + 1),
                    rows,
                    cols: cols - left_cols,
                });
                self.chambers.push(Chamber {
                    top_left: Coord::new(row, col),
                    rows,
                    cols: left_cols,
                });
            }
        }
    }
}

pub(super) fn build(grid: &Grid, rng: StdRng) -> Box<dyn Algorithm> {
    Box::new(RecursiveDivision::new(grid, rng))
}

impl Algorithm for RecursiveDivision {
    fn name(&self) -> &'static str {
        "recursive-division"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if !self.started {
            self.started = true;
            if grid.len() < 2 {
                return Progress::Done;
            }
        }

        match self.phase {
            Phase::Clearing { next } => {
                let cell = grid.coord_of(next);
                Self::clear_cell(grid, sink, cell);
                if next + 1 < grid.len() {
                    self.phase = Phase::Clearing { next: next + 1 };
                } else {
                    self.phase = Phase::Dividing;
                    self.chambers.push(Chamber {
                        top_left: Coord::new(0, 0),
                        rows: grid.rows(),
                        cols: grid.cols(),
                    });
                }
                Progress::Continue
            }
            Phase::Dividing => {
                let Some(chamber) = self.chambers.pop() else {
                    return Progress::Done;
                };
                // Chambers one cell thin are corridors and stay open
                if chamber.rows >= 2 && chamber.cols >= 2 {
                    self.divide(grid, sink, chamber);
                }
                match self.chambers.is_empty() {
                    true => Progress::Done,
                    false => Progress::Continue,
                }
            }
        }
    }
}
