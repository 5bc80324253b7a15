use thiserror::Error;

use crate::{maze::Coord, registry::AlgorithmKind};

/// Contract violations reported by the engine.
///
/// None of these are transient: they point at a caller passing bad input, so
/// there is nothing to retry. An unreachable goal or a cancelled run is not an
/// error and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions {rows}x{cols}: rows and columns must be at least 1")]
    InvalidDimensions { rows: u16, cols: u16 },
    /// A wall operation was asked for two cells that do not share a wall.
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: Coord, b: Coord },
    /// No algorithm of that kind is registered under the name.
    #[error("no {kind} algorithm named {name:?}")]
    NotFound { name: String, kind: AlgorithmKind },
    /// The name is already taken for that kind.
    #[error("a {kind} algorithm named {name:?} is already registered")]
    DuplicateName { name: String, kind: AlgorithmKind },
    /// A start or goal cell outside the grid.
    #[error("endpoint {coord} lies outside the {rows}x{cols} grid")]
    InvalidEndpoint { coord: Coord, rows: u16, cols: u16 },
}

pub type Result<T> = std::result::Result<T, MazeError>;
