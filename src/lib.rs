//! Step-wise maze generation and solving.
//!
//! A [`Grid`] is carved by one of the generation algorithms and then searched by one of the
//! solving algorithms. Both run as [`StepSequencer`]s: lazy streams of [`Event`]s the caller
//! pulls at its own pace, pausing or cancelling between any two pulls.
//!
//! ```
//! use mazestep::{AlgorithmKind, Coord, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::seeded(7));
//! let mut grid = engine.create_grid(5, 5)?;
//! engine.start_generation("kruskal", &mut grid)?.run_to_end();
//!
//! let result = engine
//!     .start_solving("bfs", &mut grid, Coord::new(0, 0), Coord::new(4, 4))?
//!     .run_to_end()
//!     .unwrap_or_default();
//! assert!(result.is_found());
//! assert!(engine.list_algorithms(AlgorithmKind::Generation).contains(&"prim".to_owned()));
//! # Ok::<(), mazestep::MazeError>(())
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod registry;
pub mod sequencer;
pub mod solvers;

pub use config::{EngineConfig, RunConfig};
pub use error::{MazeError, Result};
pub use maze::{Cell, CellState, Coord, Direction, Grid, Walls};
pub use registry::{AlgorithmFactory, AlgorithmKind, Registry};
pub use sequencer::{Event, EventKind, Status, StepSequencer, Throttle};
pub use solvers::PathResult;

/// Entry point for callers: owns the algorithm registry and starts runs against grids.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}

impl Engine {
    /// An engine with the built-in algorithms registered.
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            registry: Registry::with_builtins(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// For registering extra algorithms at startup.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn create_grid(&self, rows: u16, cols: u16) -> Result<Grid> {
        Grid::new(rows, cols)
    }

    /// Registered names of one kind, sorted.
    pub fn list_algorithms(&self, kind: AlgorithmKind) -> Vec<String> {
        self.registry.names(kind)
    }

    /// Starts carving `grid` with the named generator.
    ///
    /// Every wall is put back and every state reset first, so a grid can be regenerated
    /// any number of times.
    pub fn start_generation<'g>(
        &self,
        name: &str,
        grid: &'g mut Grid,
    ) -> Result<StepSequencer<'g>> {
        let factory = self.registry.generator(name)?;
        grid.fill_walls();
        grid.reset_states();
        tracing::info!(
            algorithm = name,
            rows = grid.rows(),
            cols = grid.cols(),
            seed = ?self.config.seed,
            "starting generation"
        );
        let algorithm = factory(grid, generators::get_rng(self.config.seed));
        Ok(StepSequencer::new(grid, algorithm))
    }

    /// Starts searching `grid` from `start` to `goal` with the named solver.
    ///
    /// Walls are left as they are; only the state tags are reset.
    pub fn start_solving<'g>(
        &self,
        name: &str,
        grid: &'g mut Grid,
        start: Coord,
        goal: Coord,
    ) -> Result<StepSequencer<'g>> {
        let factory = self.registry.solver(name)?;
        grid.check_endpoint(start)?;
        grid.check_endpoint(goal)?;
        grid.reset_states();
        tracing::info!(
            algorithm = name,
            rows = grid.rows(),
            cols = grid.cols(),
            %start,
            %goal,
            "starting solving"
        );
        let algorithm = factory(grid, start, goal);
        Ok(StepSequencer::new(grid, algorithm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grid_rejects_zero() {
        let engine = Engine::default();
        assert_eq!(
            engine.create_grid(0, 4).unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, cols: 4 }
        );
        assert!(engine.create_grid(3, 0).is_err());
        assert_eq!(engine.create_grid(3, 4).unwrap().len(), 12);
    }

    #[test]
    fn test_start_generation_unknown_name() {
        let engine = Engine::default();
        let mut grid = engine.create_grid(3, 3).unwrap();
        let err = engine.start_generation("bfs", &mut grid).err();
        assert_eq!(
            err,
            Some(MazeError::NotFound {
                name: "bfs".into(),
                kind: AlgorithmKind::Generation
            })
        );
    }

    #[test]
    fn test_start_solving_checks_endpoints() {
        let engine = Engine::new(EngineConfig::seeded(1));
        let mut grid = engine.create_grid(3, 3).unwrap();
        let outside = Coord::new(3, 0);
        let err = engine
            .start_solving("bfs", &mut grid, Coord::new(0, 0), outside)
            .err();
        assert_eq!(
            err,
            Some(MazeError::InvalidEndpoint {
                coord: outside,
                rows: 3,
                cols: 3
            })
        );
        assert!(
            engine
                .start_solving("bfs", &mut grid, Coord::new(0, 9), Coord::new(0, 0))
                .is_err()
        );
    }

    #[test]
    fn test_regenerating_starts_from_closed_walls() {
        let engine = Engine::new(EngineConfig::seeded(5));
        let mut grid = engine.create_grid(6, 6).unwrap();
        engine.start_generation("recursive-division", &mut grid).unwrap().run_to_end();
        let first = grid.clone();
        engine.start_generation("recursive-division", &mut grid).unwrap().run_to_end();
        // Same seed and a full reset give the same maze again
        assert_eq!(grid, first);
        assert_eq!(grid.passage_count(), grid.len() - 1);
    }

    #[test]
    fn test_solving_resets_previous_tags() {
        let engine = Engine::new(EngineConfig::seeded(3));
        let mut grid = engine.create_grid(5, 5).unwrap();
        engine.start_generation("prim", &mut grid).unwrap().run_to_end();
        let mut sequencer = engine
            .start_solving("dfs", &mut grid, Coord::new(0, 0), Coord::new(4, 4))
            .unwrap();
        sequencer.next();
        sequencer.cancel();
        sequencer.for_each(drop);

        let sequencer = engine
            .start_solving("bfs", &mut grid, Coord::new(4, 4), Coord::new(4, 4))
            .unwrap();
        let result = sequencer.run_to_end().unwrap();
        assert_eq!(result.path, vec![Coord::new(4, 4)]);
        assert_eq!(
            grid.cells()
                .filter(|c| c.state() != CellState::Unvisited)
                .count(),
            1
        );
    }
}
