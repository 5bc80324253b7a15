use std::collections::HashSet;

use super::{PathResult, SearchTrace};
use crate::{
    maze::{Coord, Grid},
    sequencer::{Algorithm, EventSink, Progress},
};

/// Depth-first search. Finds a path, not necessarily the shortest one.
pub struct Dfs {
    trace: SearchTrace,
    stack: Vec<Coord>,
    /// Cells that have ever been pushed; each cell is pushed and expanded at most once.
    seen: HashSet<Coord>,
}

impl Dfs {
    pub fn new(_grid: &Grid, start: Coord, goal: Coord) -> Self {
        Dfs {
            trace: SearchTrace::new(start, goal),
            stack: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

pub(super) fn build(grid: &Grid, start: Coord, goal: Coord) -> Box<dyn Algorithm> {
    Box::new(Dfs::new(grid, start, goal))
}

impl Algorithm for Dfs {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if self.trace.begin(grid, sink) {
            self.seen.insert(self.trace.start);
            self.stack.push(self.trace.start);
            return Progress::Continue;
        }

        let Some(current) = self.stack.pop() else {
            return self.trace.finish_unreachable(grid);
        };
        if current == self.trace.goal {
            return self.trace.finish_found(grid, sink);
        }
        self.trace.expand(grid, sink, current);

        let unseen = grid
            .passages(current)
            .filter(|c| !self.seen.contains(c))
            .collect::<Vec<_>>();
        for next in unseen {
            self.seen.insert(next);
            self.stack.push(next);
            self.trace.enqueue(grid, sink, next, current);
        }
        Progress::Continue
    }

    fn outcome(&self) -> Option<&PathResult> {
        self.trace.outcome.as_ref()
    }
}
