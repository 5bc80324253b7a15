mod kruskal;
mod prim;
mod recur_backtrack;
mod recur_div;

use rand::{SeedableRng, rngs::StdRng};

pub use kruskal::{DisjointSet, Kruskal};
pub use prim::Prim;
pub use recur_backtrack::RecursiveBacktracker;
pub use recur_div::RecursiveDivision;

use crate::registry::GeneratorFactory;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Built-in generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    RecurBacktrack,
    Prim,
    Kruskal,
    RecurDiv,
}

impl Generator {
    pub const ALL: [Generator; 4] = [
        Generator::RecurBacktrack,
        Generator::Prim,
        Generator::Kruskal,
        Generator::RecurDiv,
    ];

    /// Registry name.
    pub const fn name(self) -> &'static str {
        match self {
            Generator::RecurBacktrack => "recursive-backtracker",
            Generator::Prim => "prim",
            Generator::Kruskal => "kruskal",
            Generator::RecurDiv => "recursive-division",
        }
    }

    /// Whether the finished maze is always a spanning tree of the grid.
    pub const fn is_perfect(self) -> bool {
        match self {
            Generator::RecurBacktrack | Generator::Prim | Generator::Kruskal => true,
            Generator::RecurDiv => false,
        }
    }

    pub fn factory(self) -> GeneratorFactory {
        match self {
            Generator::RecurBacktrack => recur_backtrack::build,
            Generator::Prim => prim::build,
            Generator::Kruskal => kruskal::build,
            Generator::RecurDiv => recur_div::build,
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracker"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::{
        maze::Grid,
        sequencer::{EventKind, StepSequencer},
    };

    /// Runs `generator` to completion on `grid` with a fixed seed and returns every event kind.
    pub fn generate(grid: &mut Grid, generator: Generator, seed: u64) -> Vec<EventKind> {
        let algorithm = (generator.factory())(grid, get_rng(Some(seed)));
        StepSequencer::new(grid, algorithm)
            .map(|e| e.kind)
            .collect()
    }
}
