use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

use super::{PathResult, SearchTrace, step_cost};
use crate::{
    maze::{Coord, Grid},
    sequencer::{Algorithm, EventSink, Progress},
};

/// Priority of a frontier entry: estimated total cost, then the heuristic alone,
/// then insertion order. Compared lexicographically, smallest first.
type Priority = (u32, u32, u64);

/// A* search with the Manhattan distance to the goal as heuristic.
///
/// With 4-directional unit-cost moves the Manhattan distance never overestimates and
/// is consistent, so the first time the goal is popped its path is a shortest one.
pub struct AStar {
    trace: SearchTrace,
    // Using Reverse to turn the max-heap into a min-heap
    pq: BinaryHeap<Reverse<(Priority, Coord)>>,
    costs: HashMap<Coord, u32>,
    closed: HashSet<Coord>,
    inserted: u64,
}

impl AStar {
    pub fn new(_grid: &Grid, start: Coord, goal: Coord) -> Self {
        AStar {
            trace: SearchTrace::new(start, goal),
            pq: BinaryHeap::new(),
            costs: HashMap::new(),
            closed: HashSet::new(),
            inserted: 0,
        }
    }

    fn heuristic(&self, cell: Coord) -> u32 {
        cell.manhattan(self.trace.goal)
    }

    fn push(&mut self, traveling_cost: u32, cell: Coord) {
        let heuristic_cost = self.heuristic(cell);
        let priority = (traveling_cost + heuristic_cost, heuristic_cost, self.inserted);
        self.pq.push(Reverse((priority, cell)));
        self.inserted += 1;
    }
}

pub(super) fn build(grid: &Grid, start: Coord, goal: Coord) -> Box<dyn Algorithm> {
    Box::new(AStar::new(grid, start, goal))
}

impl Algorithm for AStar {
    fn name(&self) -> &'static str {
        "a-star"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if self.trace.begin(grid, sink) {
            self.costs.insert(self.trace.start, 0);
            self.push(0, self.trace.start);
            return Progress::Continue;
        }

        let Some(Reverse((_, current))) = self.pq.pop() else {
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

        let traveling_cost = self.costs.get(&current).copied().unwrap_or_default();
        let candidates = grid
            .passages(current)
            .filter(|c| !self.closed.contains(c))
            .collect::<Vec<_>>();
        for next in candidates {
            let new_cost = traveling_cost + step_cost(current, next);
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

#[cfg(test)]
mod tests {
    use super::super::{Solver, test_utils::*};
    use crate::maze::Coord;

    #[test]
    fn test_heads_straight_for_goal_on_open_grid() {
        let mut grid = open_grid(8, 8);
        let (result, _) = solve(&mut grid, Solver::AStar, Coord::new(0, 0), Coord::new(7, 0));
        assert_eq!(result.edge_count(), 7);
        // Every cell straight down the first column has f = 7 and a smaller h than
        // anything off the column, so nothing else is expanded.
        assert_eq!(result.expanded, 7);
    }

    #[test]
    fn test_expands_fewer_cells_than_dijkstra() {
        let (start, goal) = (Coord::new(0, 0), Coord::new(9, 9));
        let mut grid = open_grid(10, 10);
        let (astar, _) = solve(&mut grid, Solver::AStar, start, goal);
        let mut grid = open_grid(10, 10);
        let (dijkstra, _) = solve(&mut grid, Solver::Dijkstra, start, goal);
        assert_eq!(astar.edge_count(), dijkstra.edge_count());
        assert!(astar.expanded < dijkstra.expanded);
    }

    #[test]
    fn test_optimal_around_detour() {
        let mut grid = detour_grid();
        let (result, _) = solve(&mut grid, Solver::AStar, Coord::new(0, 0), Coord::new(0, 4));
        assert_eq!(result.edge_count(), 8);
        assert!(is_walkable(&grid, &result.path));
    }
}
