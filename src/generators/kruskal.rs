use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    maze::{CellState, Coord, Grid},
    sequencer::{Algorithm, EventKind, EventSink, Progress},
};

/// Union-find over cell indices with union by rank and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
            components: size,
        }
    }

    /// Representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the sets of `x` and `y`. Returns false, changing nothing, if already joined.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        self.components -= 1;
        true
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets left.
    pub fn components(&self) -> usize {
        self.components
    }
}

/// Randomized Kruskal's algorithm.
///
/// Walks every interior wall once, in shuffled order, and opens it only when the two
/// cells belong to different components. One candidate wall per step.
pub struct Kruskal {
    edges: Vec<(Coord, Coord)>,
    next_edge: usize,
    sets: DisjointSet,
    touched: Vec<bool>,
}

impl Kruskal {
    pub fn new(grid: &Grid, mut rng: StdRng) -> Self {
        let mut edges = grid.interior_edges().collect::<Vec<_>>();
        edges.shuffle(&mut rng);
        Kruskal {
            edges,
            next_edge: 0,
            sets: DisjointSet::new(grid.len()),
            touched: vec![false; grid.len()],
        }
    }

    /// The component structure built so far.
    pub fn sets(&self) -> &DisjointSet {
        &self.sets
    }
}

pub(super) fn build(grid: &Grid, rng: StdRng) -> Box<dyn Algorithm> {
    Box::new(Kruskal::new(grid, rng))
}

impl Algorithm for Kruskal {
    fn name(&self) -> &'static str {
        "kruskal"
    }

    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress {
        if self.sets.components() <= 1 {
            return Progress::Done;
        }
        let Some(&(a, b)) = self.edges.get(self.next_edge) else {
            return Progress::Done;
        };
        self.next_edge += 1;

        // Opening a wall inside one component would close a cycle
        if self.sets.union(grid.ravel_index(a), grid.ravel_index(b)) {
            if grid.set_wall(a, b, false) {
                sink.emit(EventKind::WallRemoved(a, b));
            }
            for cell in [a, b] {
                let idx = grid.ravel_index(cell);
                if !self.touched[idx] {
                    self.touched[idx] = true;
                    grid.set_state(cell, CellState::Visited);
                    sink.emit(EventKind::CellVisited(cell));
                }
            }
        }

        match self.sets.components() {
            1 => Progress::Done,
            _ => Progress::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Generator, get_rng, test_utils::generate};
    use super::*;

    #[test]
    fn test_disjoint_set_union() {
        let mut sets = DisjointSet::new(5);
        assert_eq!(sets.components(), 5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(sets.same_set(1, 0));
        assert!(!sets.same_set(1, 3));
        assert_eq!(sets.components(), 3);

        assert!(sets.union(1, 4));
        assert!(sets.same_set(0, 3));
        // Same-set pairs are never merged again
        assert!(!sets.union(0, 4));
        assert!(!sets.union(2, 2));
        assert_eq!(sets.components(), 2);
    }

    #[test]
    fn test_every_removed_wall_joins_two_components() {
        let mut grid = Grid::new(6, 9).unwrap();
        let events = generate(&mut grid, Generator::Kruskal, 17);

        // Replay the removals against a fresh union-find: none may close a cycle
        let mut sets = DisjointSet::new(grid.len());
        let mut removed = 0;
        for kind in &events {
            if let EventKind::WallRemoved(a, b) = kind {
                assert!(sets.union(grid.ravel_index(*a), grid.ravel_index(*b)));
                removed += 1;
            }
        }
        assert_eq!(removed, grid.len() - 1);
        assert_eq!(sets.components(), 1);
    }

    #[test]
    fn test_each_cell_visited_once() {
        let mut grid = Grid::new(5, 5).unwrap();
        let events = generate(&mut grid, Generator::Kruskal, 2);
        let mut visited = events
            .iter()
            .filter_map(|k| match k {
                EventKind::CellVisited(c) => Some(*c),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(visited.len(), grid.len());
        visited.sort();
        visited.dedup();
        assert_eq!(visited.len(), grid.len());
    }

    #[test]
    fn test_stops_once_connected() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut kruskal = Kruskal::new(&grid, get_rng(Some(9)));
        let mut sink = EventSink::default();
        let mut steps = 0;
        while kruskal.step(&mut grid, &mut sink) == Progress::Continue {
            steps += 1;
            assert!(kruskal.sets().components() > 1);
        }
        assert_eq!(kruskal.sets().components(), 1);
        // Never more candidates than interior walls
        assert!(steps < grid.interior_edges().count());
    }
}
