use rand::{Rng, rngs::StdRng};

use crate::{
    maze::{CellState, Coord, Grid},
    sequencer::{Algorithm, EventKind, EventSink, Progress},
};

/// Randomized depth-first carving with an explicit stack.
///
/// Each step either carves from the cell on top of the stack into a random unvisited
/// neighbor, or backtracks by popping a cell with no unvisited neighbors left.
pub struct RecursiveBacktracker {
    rng: StdRng,
    visited: Vec<bool>,
    // Keeps only carved cells
    stack: Vec<Coord>,
    started: bool,
}

impl RecursiveBacktracker {
    pub fn new(grid: &Grid, rng: StdRng) -> Self {
        RecursiveBacktracker {
            rng,
            visited: vec![false; grid.len()],
            stack: Vec::new(),
            started: false,
        }
    }

    fn visit(&mut self, grid: &mut Grid, sink: &mut EventSink, cell: Coord) {
        self.visited[grid.ravel_index(cell)] = true;
        grid.set_state(cell, CellState::Current);
        sink.emit(EventKind::CellVisited(cell));
        self.stack.push(cell);
    }
}

pub(super) fn build(grid: &Grid, rng: StdRng) -> Box<dyn Algorithm> {
    Box::new(RecursiveBacktracker::new(grid, rng))
}

impl Algorithm for RecursiveBacktracker {
    fn name(&self) -> &'static str {
        "recursive-backtracker"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if !self.started {
            self.started = true;
            if grid.len() < 2 {
                return Progress::Done;
            }
            // Initialize the starting point
            let start = Coord::new(
                self.rng.random_range(0..grid.rows()),
                self.rng.random_range(0..grid.cols()),
            );
            self.visit(grid, sink, start);
            return Progress::Continue;
        }

        let Some(&cell) = self.stack.last() else {
            return Progress::Done;
        };
        let neighbors = grid
            .neighbors(cell)
            .filter(|&c| !self.visited[grid.ravel_index(c)])
            .collect::<Vec<_>>();

        if neighbors.is_empty() {
            // Dead end: step back to the previous cell
            self.stack.pop();
            grid.set_state(cell, CellState::Visited);
            return match self.stack.last() {
                Some(&previous) => {
                    grid.set_state(previous, CellState::Current);
                    Progress::Continue
                }
                None => Progress::Done,
            };
        }

        let neighbor = neighbors[self.rng.random_range(0..neighbors.len())];
        if grid.set_wall(cell, neighbor, false) {
            sink.emit(EventKind::WallRemoved(cell, neighbor));
        }
        grid.set_state(cell, CellState::Visited);
        self.visit(grid, sink, neighbor);
        Progress::Continue
    }
}
