use rand::{Rng, rngs::StdRng};

use crate::{
    maze::{CellState, Coord, Grid},
    sequencer::{Algorithm, EventKind, EventSink, Progress},
};

/// Randomized Prim's algorithm.
///
/// Grows a single tree from a random start cell. Every step takes a uniformly random
/// frontier cell, joins it to a random neighbor already in the tree, and adds its
/// outside neighbors to the frontier.
pub struct Prim {
    rng: StdRng,
    in_tree: Vec<bool>,
    in_frontier: Vec<bool>,
    frontier: Vec<Coord>,
    started: bool,
}

impl Prim {
    pub fn new(grid: &Grid, rng: StdRng) -> Self {
        Prim {
            rng,
            in_tree: vec![false; grid.len()],
            in_frontier: vec![false; grid.len()],
            frontier: Vec::new(),
            started: false,
        }
    }

    fn join(&mut self, grid: &mut Grid, sink: &mut EventSink, cell: Coord) {
        self.in_tree[grid.ravel_index(cell)] = true;
        grid.set_state(cell, CellState::Visited);
        sink.emit(EventKind::CellVisited(cell));

        let outside = grid
            .neighbors(cell)
            .filter(|&c| {
                let idx = grid.ravel_index(c);
                !self.in_tree[idx] && !self.in_frontier[idx]
            })
            .collect::<Vec<_>>();
        for coord in outside {
            self.in_frontier[grid.ravel_index(coord)] = true;
            grid.set_state(coord, CellState::Frontier);
            self.frontier.push(coord);
        }
    }
}

pub(super) fn build(grid: &Grid, rng: StdRng) -> Box<dyn Algorithm> {
    Box::new(Prim::new(grid, rng))
}

impl Algorithm for Prim {
    fn name(&self) -> &'static str {
        "prim"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if !self.started {
            self.started = true;
            if grid.len() < 2 {
                return Progress::Done;
            }
            let start = Coord::new(
                self.rng.random_range(0..grid.rows()),
                self.rng.random_range(0..grid.cols()),
            );
            self.join(grid, sink, start);
            return Progress::Continue;
        }

        if self.frontier.is_empty() {
            return Progress::Done;
        }
        // Pick a random frontier cell; order within the frontier does not matter
        let index = self.rng.random_range(0..self.frontier.len());
        let cell = self.frontier.swap_remove(index);

        let tree_neighbors = grid
            .neighbors(cell)
            .filter(|&c| self.in_tree[grid.ravel_index(c)])
            .collect::<Vec<_>>();
        // A frontier cell always borders the tree
        if !tree_neighbors.is_empty() {
            let neighbor = tree_neighbors[self.rng.random_range(0..tree_neighbors.len())];
            if grid.set_wall(neighbor, cell, false) {
                sink.emit(EventKind::WallRemoved(neighbor, cell));
            }
            self.join(grid, sink, cell);
        }

        match self.frontier.is_empty() {
            true => Progress::Done,
            false => Progress::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Generator, test_utils::generate};
    use crate::{
        maze::{CellState, Grid},
        sequencer::EventKind,
    };

    #[test]
    fn test_carves_only_out_of_the_tree() {
        let mut grid = Grid::new(7, 5).unwrap();
        let events = generate(&mut grid, Generator::Prim, 21);
        let mut in_tree = std::collections::HashSet::new();
        let EventKind::CellVisited(start) = events[0] else {
            panic!("first event must visit the start cell");
        };
        in_tree.insert(start);
        for pair in events[1..].chunks(2) {
            let [EventKind::WallRemoved(from, to), EventKind::CellVisited(joined)] = pair else {
                panic!("unexpected events {pair:?}");
            };
            assert!(in_tree.contains(from));
            assert_eq!(to, joined);
            assert!(in_tree.insert(*joined), "{joined} joined twice");
        }
        assert_eq!(in_tree.len(), grid.len());
    }

    #[test]
    fn test_frontier_is_drained() {
        let mut grid = Grid::new(8, 8).unwrap();
        generate(&mut grid, Generator::Prim, 8);
        assert!(grid.cells().all(|c| c.state() == CellState::Visited));
    }
}
