use crate::boundary::EdgeId;
use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during loop assembly, boundary matching and placement
#[derive(Error, Debug)]
pub enum Error {
    #[error("a loop needs at least 3 segments, got {0}")]
    TooFewSegments(usize),

    #[error("segment {index} does not connect to its successor")]
    Disconnected { index: usize },

    #[error("no unused segment connects to the free end ({placed} placed, {remaining} remaining)")]
    NoConnectingSegment { placed: usize, remaining: usize },

    #[error("sorted segments do not close back to the start of the first segment")]
    NotClosed,

    #[error("degenerate loop: {0}")]
    DegenerateLoop(String),

    #[error("loop search exceeded {0} states without finding a closed ordering")]
    SearchBudgetExhausted(usize),

    #[error("no boundary segment references edge {0:?}")]
    EdgeNotFound(EdgeId),

    #[error("direction has no usable horizontal projection")]
    DegenerateDirection,
}
