//! Pull-based stepping of maze algorithms.
//!
//! Every algorithm is an explicit state machine implementing [`Algorithm`]. One call to
//! [`Algorithm::step`] processes exactly one cell (or one candidate edge, or one chamber) and
//! leaves the grid structurally valid, so the points between steps are the only places a run
//! can be observed, paused or cancelled. [`StepSequencer`] drives those steps lazily and hands
//! out the emitted [`Event`]s one at a time.

mod throttle;

use std::collections::VecDeque;

pub use throttle::Throttle;

use crate::{
    maze::{Coord, Grid},
    solvers::PathResult,
};

/// What changed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The wall between the two cells was opened.
    WallRemoved(Coord, Coord),
    /// The wall between the two cells was put back. Only recursive division adds walls.
    WallAdded(Coord, Coord),
    /// A cell joined the carved maze.
    CellVisited(Coord),
    /// A cell was pushed onto a solver's frontier.
    CellEnqueued(Coord),
    /// A solver took a cell off its frontier and looked at its neighbors.
    CellExpanded(Coord),
    /// The solver reached the goal; the cells from start to goal.
    PathFound(Vec<Coord>),
}

/// One observable change, numbered in emission order starting at 0 for each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub ordinal: u64,
    pub kind: EventKind,
}

/// Collects the events an algorithm emits during a step and numbers them.
#[derive(Debug, Default)]
pub struct EventSink {
    pending: VecDeque<Event>,
    next_ordinal: u64,
}

impl EventSink {
    pub fn emit(&mut self, kind: EventKind) {
        self.pending.push_back(Event {
            ordinal: self.next_ordinal,
            kind,
        });
        self.next_ordinal += 1;
    }

    fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    /// Events emitted but not yet handed out.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Done,
}

/// A generation or solving algorithm advanced one checkpoint at a time.
pub trait Algorithm {
    /// Short registry name of the algorithm, for logs.
    fn name(&self) -> &'static str;

    /// Performs one unit of work against `grid`, pushing any events it causes into `sink`.
    ///
    /// Must leave `grid` wall-symmetric when it returns. Once it has returned
    /// [`Progress::Done`] it is not called again.
    fn step(&mut self, grid: &mut Grid, sink: &mut EventSink) -> Progress;

    /// The path result of a finished solving run. Generators have none.
    fn outcome(&self) -> Option<&PathResult> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Finished,
    Cancelled,
}

/// Lazy, ordered, single-use sequence of the events of one algorithm run.
///
/// The sequencer borrows the grid mutably for as long as it lives, so nothing else can touch
/// the grid mid-run; [`StepSequencer::grid`] gives read access between pulls.
pub struct StepSequencer<'g> {
    grid: &'g mut Grid,
    algorithm: Box<dyn Algorithm>,
    sink: EventSink,
    status: Status,
    steps: u64,
    delivered: u64,
}

impl<'g> StepSequencer<'g> {
    pub fn new(grid: &'g mut Grid, algorithm: Box<dyn Algorithm>) -> Self {
        tracing::debug!(
            algorithm = algorithm.name(),
            rows = grid.rows(),
            cols = grid.cols(),
            "sequencer started"
        );
        StepSequencer {
            grid,
            algorithm,
            sink: EventSink::default(),
            status: Status::Running,
            steps: 0,
            delivered: 0,
        }
    }

    /// Stops the run at the current checkpoint.
    ///
    /// The last completed step stays applied to the grid, and the events it already emitted are
    /// still delivered by `next` before the sequence ends. Cancelling a finished run does nothing.
    pub fn cancel(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Cancelled;
            tracing::debug!(
                algorithm = self.algorithm.name(),
                steps = self.steps,
                delivered = self.delivered,
                "sequencer cancelled"
            );
        }
    }

    /// True once the run has stopped and every event has been handed out.
    pub fn is_done(&self) -> bool {
        self.status != Status::Running && self.sink.is_empty()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Read access to the grid between pulls.
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// The path result of a solving run that ran to completion.
    pub fn outcome(&self) -> Option<&PathResult> {
        match self.status {
            Status::Finished => self.algorithm.outcome(),
            _ => None,
        }
    }

    /// Number of events handed out so far.
    pub fn events_emitted(&self) -> u64 {
        self.delivered
    }

    /// Drains the remaining events and returns the outcome, if any.
    pub fn run_to_end(mut self) -> Option<PathResult> {
        self.by_ref().for_each(drop);
        self.outcome().cloned()
    }

    /// Steps the algorithm until it has produced an event or stopped.
    fn advance(&mut self) {
        while self.sink.is_empty() && self.status == Status::Running {
            self.steps += 1;
            let progress = self.algorithm.step(self.grid, &mut self.sink);
            debug_assert!(
                self.grid.is_wall_symmetric(),
                "{} left asymmetric walls after step {}",
                self.algorithm.name(),
                self.steps
            );
            tracing::trace!(
                algorithm = self.algorithm.name(),
                step = self.steps,
                emitted = self.sink.len(),
                "step"
            );
            if progress == Progress::Done {
                self.status = Status::Finished;
                tracing::debug!(
                    algorithm = self.algorithm.name(),
                    steps = self.steps,
                    events = self.delivered + self.sink.len() as u64,
                    "sequencer finished"
                );
            }
        }
    }
}

impl Iterator for StepSequencer<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.advance();
        let event = self.sink.pop()?;
        self.delivered += 1;
        Some(event)
    }
}
