use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

use super::{PathResult, SearchTrace, step_cost};
use crate::{
    maze::{Coord, Grid},
    sequencer::{Algorithm, EventSink, Progress},
};

/// Uniform-cost search.
///
/// Entries are ordered by (accumulated cost, insertion order). Stale entries left
/// behind when a cheaper route is found are skipped when they surface.
pub struct Dijkstra {
    trace: SearchTrace,
    // Using Reverse to turn the max-heap into a min-heap
    pq: BinaryHeap<Reverse<(u32, u64, Coord)>>,
    costs: HashMap<Coord, u32>,
    closed: HashSet<Coord>,
    inserted: u64,
}

impl Dijkstra {
    pub fn new(_grid: &Grid, start: Coord, goal: Coord) -> Self {
        Dijkstra {
            trace: SearchTrace::new(start, goal),
            pq: BinaryHeap::new(),
            costs: HashMap::new(),
            closed: HashSet::new(),
            inserted: 0,
        }
    }

    fn push(&mut self, cost: u32, cell: Coord) {
        self.pq.push(Reverse((cost, self.inserted, cell)));
        self.inserted += 1;
    }
}

pub(super) fn build(grid: &Grid, start: Coord, goal: Coord) -> Box<dyn Algorithm> {
    Box::new(Dijkstra::new(grid, start, goal))
}

impl Algorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if self.trace.begin(grid, sink) {
            self.costs.insert(self.trace.start, 0);
            self.push(0, self.trace.start);
            return Progress::Continue;
        }

        let Some(Reverse((cost, _, current))) = self.pq.pop() else {
            return self.trace.finish_unreachable(grid);
        };
        if !self.closed.insert(current) {
            // Stale entry for a cell already settled at a lower cost
            return Progress::Continue;
        }
        if current == self.trace.goal {
            return self.trace.finish_found(grid, sink);
        }
        self.trace.expand(grid, sink, current);

        let candidates = grid
            .passages(current)
            .filter(|c| !self.closed.contains(c))
            .collect::<Vec<_>>();
        for next in candidates {
            let new_cost = cost + step_cost(current, next);
            // Only consider neighbors that we can reach with a lower cost
            let is_cheaper = self.costs.get(&next).is_none_or(|&known| new_cost < known);
            if is_cheaper {
                self.costs.insert(next, new_cost);
                self.push(new_cost, next);
                self.trace.enqueue(grid, sink, next, current);
            }
        }
        Progress::Continue
    }

    fn outcome(&self) -> Option<&PathResult> {
        self.trace.outcome.as_ref()
    }
}
