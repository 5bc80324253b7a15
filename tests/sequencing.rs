use mazestep::{
    AlgorithmKind, CellState, Coord, Engine, EngineConfig, Grid, Status, Throttle,
};
use proptest::prelude::*;

const STATES: [CellState; 5] = [
    CellState::Unvisited,
    CellState::Visited,
    CellState::Frontier,
    CellState::Path,
    CellState::Current,
];

fn states_are_valid(grid: &Grid) -> bool {
    grid.cells().all(|c| STATES.contains(&c.state()))
}

#[test]
fn ordinals_count_up_from_zero() {
    let engine = Engine::new(EngineConfig::seeded(4));
    let mut grid = engine.create_grid(6, 6).unwrap();
    for name in engine.list_algorithms(AlgorithmKind::Generation) {
        let ordinals = engine
            .start_generation(&name, &mut grid)
            .unwrap()
            .map(|e| e.ordinal)
            .collect::<Vec<_>>();
        assert!(!ordinals.is_empty());
        assert!(ordinals.iter().copied().eq(0..ordinals.len() as u64), "{name}");
    }
}

#[test]
fn cancelled_solver_has_no_outcome() {
    let engine = Engine::new(EngineConfig::seeded(12));
    let mut grid = engine.create_grid(10, 10).unwrap();
    engine.start_generation("prim", &mut grid).unwrap().run_to_end();

    let mut sequencer = engine
        .start_solving("dijkstra", &mut grid, Coord::new(0, 0), Coord::new(9, 9))
        .unwrap();
    sequencer.by_ref().take(5).for_each(drop);
    sequencer.cancel();
    assert_eq!(sequencer.status(), Status::Cancelled);
    let leftover = sequencer.by_ref().count();
    assert!(sequencer.is_done());
    assert_eq!(sequencer.events_emitted(), 5 + leftover as u64);
    assert_eq!(sequencer.run_to_end(), None);
}

#[test]
fn finished_solver_reports_outcome() {
    let engine = Engine::new(EngineConfig::seeded(12));
    let mut grid = engine.create_grid(7, 9).unwrap();
    engine.start_generation("kruskal", &mut grid).unwrap().run_to_end();

    let mut sequencer = engine
        .start_solving("bfs", &mut grid, Coord::new(0, 0), Coord::new(6, 8))
        .unwrap();
    assert!(sequencer.outcome().is_none());
    sequencer.by_ref().for_each(drop);
    assert_eq!(sequencer.status(), Status::Finished);
    let result = sequencer.outcome().cloned().unwrap();
    assert!(result.is_found());
    let path_cells = sequencer
        .grid()
        .cells()
        .filter(|c| c.state() == CellState::Path)
        .count();
    assert_eq!(path_cells, result.path.len());
}

#[test]
fn throttled_pulls_are_spaced() {
    let engine = Engine::new(EngineConfig::seeded(1));
    let mut grid = engine.create_grid(1, 6).unwrap();
    let mut throttle = Throttle::new(200);
    let start = std::time::Instant::now();
    let mut pulled = 0;
    for _event in engine.start_generation("kruskal", &mut grid).unwrap() {
        throttle.wait();
        pulled += 1;
    }
    // 5 walls removed and 6 cells visited, the first pull is free
    assert_eq!(pulled, 11);
    assert!(start.elapsed() >= std::time::Duration::from_millis(45));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn cancelling_anywhere_leaves_a_valid_grid(
        rows in 1u16..9,
        cols in 1u16..9,
        seed in any::<u64>(),
        stop_after in 0usize..80,
    ) {
        let engine = Engine::new(EngineConfig::seeded(seed));
        for name in engine.list_algorithms(AlgorithmKind::Generation) {
            let mut grid = engine.create_grid(rows, cols).unwrap();
            let mut sequencer = engine.start_generation(&name, &mut grid).unwrap();
            sequencer.by_ref().take(stop_after).for_each(drop);
            sequencer.cancel();
            sequencer.for_each(drop);
            prop_assert!(grid.is_wall_symmetric(), "{}", name);
            prop_assert!(states_are_valid(&grid));

            for solver in engine.list_algorithms(AlgorithmKind::Solving) {
                let mut solved = grid.clone();
                let goal = Coord::new(rows - 1, cols - 1);
                let mut sequencer = engine
                    .start_solving(&solver, &mut solved, Coord::new(0, 0), goal)
                    .unwrap();
                sequencer.by_ref().take(stop_after).for_each(drop);
                sequencer.cancel();
                prop_assert!(
                    sequencer.outcome().is_none() || sequencer.status() == Status::Finished
                );
                sequencer.for_each(drop);
                prop_assert!(solved.is_wall_symmetric());
                prop_assert!(states_are_valid(&solved));
                // Solving never touches walls
                prop_assert_eq!(solved.passage_count(), grid.passage_count());
            }
        }
    }
}
