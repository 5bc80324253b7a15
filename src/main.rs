mod render;

use std::{
    io::{self, IsTerminal, Stdout, Write},
    process::ExitCode,
};

use crossterm::{
    cursor, execute, queue,
    style::{self, Stylize},
    terminal::{self, ClearType},
};
use mazestep::{
    Engine, EngineConfig, Event, EventKind, Grid, MazeError, PathResult, RunConfig, StepSequencer,
    Throttle,
};
use tracing_subscriber::EnvFilter;
use unicode_truncate::UnicodeTruncateStr;

use crate::render::{Plain, Styled};

const USAGE: &str = "usage: mazestep [rows cols [generator] [solver]]
environment: MAZESTEP_SEED, MAZESTEP_STEPS_PER_SEC, MAZESTEP_ANIMATE, RUST_LOG";

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Logs go to a file so they never interleave with the maze on the terminal.
/// The returned guard flushes the writer when dropped.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "mazestep.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    guard
}

fn main() -> ExitCode {
    let _guard = init_logging();

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {msg}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    let engine = Engine::new(EngineConfig::from_env());
    tracing::info!(?config, seed = ?engine.config().seed, "mazestep starting");

    let mut stdout = io::stdout();
    match run(&engine, &config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "run failed");
            eprintln!("error: {err}");
            if let RunError::Maze(MazeError::NotFound { kind, .. }) = &err {
                eprintln!("available: {}", engine.list_algorithms(*kind).join(", "));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(engine: &Engine, config: &RunConfig, stdout: &mut Stdout) -> Result<(), RunError> {
    let mut grid = engine.create_grid(config.rows, config.cols)?;
    let mut throttle = Throttle::new(config.steps_per_second);
    // Not a terminal, or too small for the maze
    let animate = config.animate && fits_terminal(&grid).unwrap_or(false);
    if config.animate && !animate {
        tracing::warn!("terminal too small for the maze, animation disabled");
    }

    if animate {
        execute!(stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
    }
    let result = generate_and_solve(engine, config, &mut grid, &mut throttle, animate, stdout);
    if animate {
        execute!(stdout, cursor::Show)?;
    }
    let result = result?.unwrap_or_default();

    if !animate {
        match stdout.is_terminal() {
            true => write!(stdout, "{}", Styled(&grid))?,
            false => write!(stdout, "{}", Plain(&grid))?,
        }
    }
    let summary = match result.is_found() {
        true => format!(
            "{} solved {}x{} maze from {}: path of {} moves, {} cells expanded",
            config.solver,
            config.rows,
            config.cols,
            config.generator,
            result.edge_count(),
            result.expanded
        ),
        false => format!(
            "{}: goal {} unreachable after {} cells expanded",
            config.solver, config.goal, result.expanded
        ),
    };
    tracing::info!(
        path_len = result.path.len(),
        expanded = result.expanded,
        "run finished"
    );
    execute!(
        stdout,
        style::PrintStyledContent(summary.bold()),
        style::Print("\n")
    )?;
    Ok(())
}

fn generate_and_solve(
    engine: &Engine,
    config: &RunConfig,
    grid: &mut Grid,
    throttle: &mut Throttle,
    animate: bool,
    stdout: &mut Stdout,
) -> Result<Option<PathResult>, RunError> {
    let generation = engine.start_generation(&config.generator, grid)?;
    drive(generation, throttle, animate, &config.generator, stdout)?;

    let solving = engine.start_solving(&config.solver, grid, config.start, config.goal)?;
    Ok(drive(solving, throttle, animate, &config.solver, stdout)?)
}

/// Pulls every event out of `sequencer`, pacing with `throttle` and redrawing when animating.
fn drive(
    mut sequencer: StepSequencer<'_>,
    throttle: &mut Throttle,
    animate: bool,
    label: &str,
    stdout: &mut Stdout,
) -> io::Result<Option<PathResult>> {
    while let Some(event) = sequencer.next() {
        throttle.wait();
        if animate {
            draw(stdout, sequencer.grid(), &status_line(label, &event, throttle))?;
        }
    }
    tracing::debug!(
        algorithm = label,
        events = sequencer.events_emitted(),
        "drained sequencer"
    );
    Ok(sequencer.outcome().cloned())
}

fn draw(stdout: &mut Stdout, grid: &Grid, status: &str) -> io::Result<()> {
    let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    let (status, _) = status.unicode_truncate(width);
    queue!(
        stdout,
        cursor::MoveTo(0, 0),
        style::Print(Styled(grid)),
        terminal::Clear(ClearType::CurrentLine),
        style::Print(status),
        style::Print("\n"),
    )?;
    stdout.flush()
}

fn status_line(label: &str, event: &Event, throttle: &Throttle) -> String {
    let what = match &event.kind {
        EventKind::WallRemoved(a, b) => format!("opened {a}-{b}"),
        EventKind::WallAdded(a, b) => format!("walled {a}-{b}"),
        EventKind::CellVisited(c) => format!("visited {c}"),
        EventKind::CellEnqueued(c) => format!("enqueued {c}"),
        EventKind::CellExpanded(c) => format!("expanded {c}"),
        EventKind::PathFound(path) => format!("path found, {} cells", path.len()),
    };
    let pace = match throttle.rate() {
        0 => "unthrottled".to_owned(),
        rate => format!("{rate} steps/s"),
    };
    format!("{label} #{}: {what} ({pace})", event.ordinal)
}

/// Whether the rendered grid plus a status line fits the terminal.
fn fits_terminal(grid: &Grid) -> io::Result<bool> {
    let (term_width, term_height) = terminal::size()?;
    let (width, height) = render::footprint(grid);
    // One more row for the status line
    Ok(width <= term_width as usize && height + 1 <= term_height as usize)
}
