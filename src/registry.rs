use std::{collections::BTreeMap, fmt};

use rand::rngs::StdRng;

use crate::{
    error::{MazeError, Result},
    generators::Generator,
    maze::{Coord, Grid},
    sequencer::Algorithm,
    solvers::Solver,
};

/// The two families of algorithms the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Generation,
    Solving,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Generation => write!(f, "generation"),
            AlgorithmKind::Solving => write!(f, "solving"),
        }
    }
}

/// Builds a generation run for a grid, drawing randomness from the given RNG.
pub type GeneratorFactory = fn(&Grid, StdRng) -> Box<dyn Algorithm>;

/// Builds a solving run from `start` to `goal`.
pub type SolverFactory = fn(&Grid, Coord, Coord) -> Box<dyn Algorithm>;

#[derive(Debug, Clone, Copy)]
pub enum AlgorithmFactory {
    Generation(GeneratorFactory),
    Solving(SolverFactory),
}

impl AlgorithmFactory {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmFactory::Generation(_) => AlgorithmKind::Generation,
            AlgorithmFactory::Solving(_) => AlgorithmKind::Solving,
        }
    }
}

/// Name to factory lookup, one namespace per [`AlgorithmKind`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    generators: BTreeMap<String, GeneratorFactory>,
    solvers: BTreeMap<String, SolverFactory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the eight built-in algorithms.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        for generator in Generator::ALL {
            registry.generators.insert(generator.name().to_owned(), generator.factory());
        }
        for solver in Solver::ALL {
            registry.solvers.insert(solver.name().to_owned(), solver.factory());
        }
        tracing::debug!(
            generators = registry.generators.len(),
            solvers = registry.solvers.len(),
            "registered built-in algorithms"
        );
        registry
    }

    /// Adds `factory` under `name`. The kind is taken from the factory.
    pub fn register(&mut self, name: impl Into<String>, factory: AlgorithmFactory) -> Result<()> {
        let name = name.into();
        let kind = factory.kind();
        if self.contains(&name, kind) {
            return Err(MazeError::DuplicateName { name, kind });
        }
        tracing::debug!(%name, %kind, "registered algorithm");
        match factory {
            AlgorithmFactory::Generation(f) => {
                self.generators.insert(name, f);
            }
            AlgorithmFactory::Solving(f) => {
                self.solvers.insert(name, f);
            }
        }
        Ok(())
    }

    pub fn contains(&self, name: &str, kind: AlgorithmKind) -> bool {
        match kind {
            AlgorithmKind::Generation => self.generators.contains_key(name),
            AlgorithmKind::Solving => self.solvers.contains_key(name),
        }
    }

    pub fn lookup(&self, name: &str, kind: AlgorithmKind) -> Result<AlgorithmFactory> {
        let found = match kind {
            AlgorithmKind::Generation => self
                .generators
                .get(name)
                .map(|&f| AlgorithmFactory::Generation(f)),
            AlgorithmKind::Solving => self
                .solvers
                .get(name)
                .map(|&f| AlgorithmFactory::Solving(f)),
        };
        found.ok_or_else(|| MazeError::NotFound {
            name: name.to_owned(),
            kind,
        })
    }

    pub fn generator(&self, name: &str) -> Result<GeneratorFactory> {
        self.generators
            .get(name)
            .copied()
            .ok_or_else(|| MazeError::NotFound {
                name: name.to_owned(),
                kind: AlgorithmKind::Generation,
            })
    }

    pub fn solver(&self, name: &str) -> Result<SolverFactory> {
        self.solvers
            .get(name)
            .copied()
            .ok_or_else(|| MazeError::NotFound {
                name: name.to_owned(),
                kind: AlgorithmKind::Solving,
            })
    }

    /// Registered names of one kind, sorted.
    pub fn names(&self, kind: AlgorithmKind) -> Vec<String> {
        match kind {
            AlgorithmKind::Generation => self.generators.keys().cloned().collect(),
            AlgorithmKind::Solving => self.solvers.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_sorted_by_name() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.names(AlgorithmKind::Generation),
            ["kruskal", "prim", "recursive-backtracker", "recursive-division"]
        );
        assert_eq!(
            registry.names(AlgorithmKind::Solving),
            ["a-star", "bfs", "dfs", "dijkstra"]
        );
    }

    #[test]
    fn test_lookup_missing_name() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.lookup("wilson", AlgorithmKind::Generation).unwrap_err(),
            MazeError::NotFound {
                name: "wilson".into(),
                kind: AlgorithmKind::Generation
            }
        );
        // Names are per kind
        assert!(registry.lookup("bfs", AlgorithmKind::Generation).is_err());
        assert!(registry.solver("prim").is_err());
        assert!(registry.generator("prim").is_ok());
    }

    #[test]
    fn test_register_rejects_duplicates_per_kind() {
        let mut registry = Registry::with_builtins();
        let err = registry
            .register("prim", AlgorithmFactory::Generation(Generator::Kruskal.factory()))
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::DuplicateName {
                name: "prim".into(),
                kind: AlgorithmKind::Generation
            }
        );
        // The same name is free in the other namespace
        registry
            .register("prim", AlgorithmFactory::Solving(Solver::Bfs.factory()))
            .unwrap();
        assert_eq!(
            registry.lookup("prim", AlgorithmKind::Solving).unwrap().kind(),
            AlgorithmKind::Solving
        );
    }

    #[test]
    fn test_empty_registry() {
        let mut registry = Registry::new();
        assert!(registry.names(AlgorithmKind::Solving).is_empty());
        registry
            .register("breadth", AlgorithmFactory::Solving(Solver::Bfs.factory()))
            .unwrap();
        assert_eq!(registry.names(AlgorithmKind::Solving), ["breadth"]);
        assert!(registry.contains("breadth", AlgorithmKind::Solving));
    }

    #[test]
    fn test_error_messages() {
        let err = Registry::new().solver("bfs").unwrap_err();
        assert_eq!(err.to_string(), "no solving algorithm named \"bfs\"");
    }
}
