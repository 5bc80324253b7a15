//! Headless timing of every generator and solver pair on a large grid.
//!
//! `profile [iterations]`, default 1. Seeded from `MAZESTEP_SEED`, or 0.

use std::time::{Duration, Instant};

use mazestep::{AlgorithmKind, Coord, Engine, EngineConfig, MazeError};

const SIZE: u16 = u8::MAX as u16;

fn main() -> Result<(), MazeError> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    let config = EngineConfig {
        seed: EngineConfig::from_env().seed.or(Some(0)),
    };
    let engine = Engine::new(config);
    let (start, goal) = (Coord::new(0, 0), Coord::new(SIZE - 1, SIZE - 1));
    let mut grid = engine.create_grid(SIZE, SIZE)?;

    for generator in engine.list_algorithms(AlgorithmKind::Generation) {
        for solver in engine.list_algorithms(AlgorithmKind::Solving) {
            let (mut generating, mut solving) = (Duration::ZERO, Duration::ZERO);
            let (mut events, mut expanded) = (0, 0);
            for _ in 0..iterations {
                let now = Instant::now();
                events += engine.start_generation(&generator, &mut grid)?.count();
                generating += now.elapsed();

                let now = Instant::now();
                let result = engine
                    .start_solving(&solver, &mut grid, start, goal)?
                    .run_to_end()
                    .unwrap_or_default();
                solving += now.elapsed();
                expanded += result.expanded;
            }
            println!(
                "{generator:>20} + {solver:<10} gen {:>10.2?} ({events} events)  solve {:>10.2?} ({expanded} expanded)",
                generating / iterations.max(1) as u32,
                solving / iterations.max(1) as u32,
            );
        }
    }
    Ok(())
}
