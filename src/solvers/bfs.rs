use std::collections::{HashSet, VecDeque};

use super::{PathResult, SearchTrace};
use crate::{
    maze::{Coord, Grid},
    sequencer::{Algorithm, EventSink, Progress},
};

/// Breadth-first search. Explores in insertion order, so the first time the goal
/// comes off the queue the path to it has the fewest possible moves.
pub struct Bfs {
    trace: SearchTrace,
    queue: VecDeque<Coord>,
    /// Cells that have ever been enqueued; each cell enters the queue at most once.
    seen: HashSet<Coord>,
}

impl Bfs {
    pub fn new(_grid: &Grid, start: Coord, goal: Coord) -> Self {
        Bfs {
            trace: SearchTrace::new(start, goal),
            queue: VecDeque::new(),
            seen: HashSet::new(),
        }
    }
}

pub(super) fn build(grid: &Grid, start: Coord, goal: Coord) -> Box<dyn Algorithm> {
    Box::new(Bfs::new(grid, start, goal))
}

impl Algorithm for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if self.trace.begin(grid, sink) {
            self.seen.insert(self.trace.start);
            self.queue.push_back(self.trace.start);
            return Progress::Continue;
        }

        let Some(current) = self.queue.pop_front() else {
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
            self.queue.push_back(next);
            self.trace.enqueue(grid, sink, next, current);
        }
        Progress::Continue
    }

    fn outcome(&self) -> Option<&PathResult> {
        self.trace.outcome.as_ref()
    }
}
