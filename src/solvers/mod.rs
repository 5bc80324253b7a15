mod astar;
mod bfs;
mod dfs;
mod dijkstra;

use std::collections::HashMap;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;

use crate::{
    maze::{CellState, Coord, Grid},
    registry::SolverFactory,
    sequencer::{EventKind, EventSink, Progress},
};

/// Outcome of a solving run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Cells from start to goal inclusive. Empty when the goal is unreachable.
    pub path: Vec<Coord>,
    /// Number of cells taken off the frontier and expanded. The goal itself is not counted.
    pub expanded: usize,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path.
    pub fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Built-in solving algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    Dijkstra,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 4] = [Solver::Dfs, Solver::Bfs, Solver::Dijkstra, Solver::AStar];

    /// Registry name.
    pub const fn name(self) -> &'static str {
        match self {
            Solver::Dfs => "dfs",
            Solver::Bfs => "bfs",
            Solver::Dijkstra => "dijkstra",
            Solver::AStar => "a-star",
        }
    }

    pub fn factory(self) -> SolverFactory {
        match self {
            Solver::Dfs => dfs::build,
            Solver::Bfs => bfs::build,
            Solver::Dijkstra => dijkstra::build,
            Solver::AStar => astar::build,
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

/// Bookkeeping every search shares: parent pointers, the expansion counter,
/// the cell currently highlighted, and the final result.
struct SearchTrace {
    start: Coord,
    goal: Coord,
    started: bool,
    parents: HashMap<Coord, Coord>,
    expanded: usize,
    current: Option<Coord>,
    outcome: Option<PathResult>,
}

impl SearchTrace {
    fn new(start: Coord, goal: Coord) -> Self {
        SearchTrace {
            start,
            goal,
            started: false,
            parents: HashMap::new(),
            expanded: 0,
            current: None,
            outcome: None,
        }
    }

    /// Returns true exactly once, on the first step, after announcing the start cell.
    fn begin(&mut self, grid: &mut Grid, sink: &mut EventSink) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        grid.set_state(self.start, CellState::Frontier);
        sink.emit(EventKind::CellEnqueued(self.start));
        true
    }

    fn enqueue(&mut self, grid: &mut Grid, sink: &mut EventSink, cell: Coord, parent: Coord) {
        self.parents.insert(cell, parent);
        grid.set_state(cell, CellState::Frontier);
        sink.emit(EventKind::CellEnqueued(cell));
    }

    fn expand(&mut self, grid: &mut Grid, sink: &mut EventSink, cell: Coord) {
        self.expanded += 1;
        if let Some(previous) = self.current.replace(cell) {
            grid.set_state(previous, CellState::Visited);
        }
        grid.set_state(cell, CellState::Current);
        sink.emit(EventKind::CellExpanded(cell));
    }

    /// Follows parent pointers back from `cell` to the start.
    fn reconstruct(&self, cell: Coord) -> Vec<Coord> {
        let mut path = vec![cell];
        let mut child = cell;
        while let Some(&parent) = self.parents.get(&child) {
            path.push(parent);
            child = parent;
        }
        path.reverse();
        path
    }

    fn finish_found(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if let Some(previous) = self.current.take() {
            grid.set_state(previous, CellState::Visited);
        }
        let path = self.reconstruct(self.goal);
        path.iter()
            .for_each(|&cell| grid.set_state(cell, CellState::Path));
        sink.emit(EventKind::PathFound(path.clone()));
        self.outcome = Some(PathResult {
            path,
            expanded: self.expanded,
        });
        Progress::Done
    }

    fn finish_unreachable(&mut self, grid: &mut Grid) -> Progress {
        if let Some(previous) = self.current.take() {
            grid.set_state(previous, CellState::Visited);
        }
        self.outcome = Some(PathResult {
            path: Vec::new(),
            expanded: self.expanded,
        });
        Progress::Done
    }
}

/// Cost of moving between two adjacent open cells. Uniform for every edge of the grid.
fn step_cost(_from: Coord, _to: Coord) -> u32 {
    1
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::sequencer::StepSequencer;

    /// Runs `solver` to completion and returns its result along with every event kind emitted.
    pub fn solve(
        grid: &mut Grid,
        solver: Solver,
        start: Coord,
        goal: Coord,
    ) -> (PathResult, Vec<EventKind>) {
        let algorithm = (solver.factory())(grid, start, goal);
        let mut sequencer = StepSequencer::new(grid, algorithm);
        let kinds = sequencer.by_ref().map(|e| e.kind).collect::<Vec<_>>();
        let result = sequencer.outcome().cloned().unwrap_or_default();
        (result, kinds)
    }

    /// Checks that consecutive cells of `path` are joined by open passages.
    pub fn is_walkable(grid: &Grid, path: &[Coord]) -> bool {
        path.windows(2).all(|pair| grid.is_open(pair[0], pair[1]))
    }

    /// A grid with no internal walls.
    pub fn open_grid(rows: u16, cols: u16) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        grid.clear_walls();
        grid
    }

    /// A 3x5 grid with a vertical wall down column 2 except at the bottom row:
    ///
    /// ```text
    /// . . | . .
    /// . . | . .
    /// . . . . .
    /// ```
    pub fn detour_grid() -> Grid {
        let mut grid = open_grid(3, 5);
        grid.add_wall(Coord::new(0, 2), Coord::new(0, 3)).unwrap();
        grid.add_wall(Coord::new(1, 2), Coord::new(1, 3)).unwrap();
        grid
    }
}
