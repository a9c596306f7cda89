use std::fmt;

/// Errors surfaced by the planning engine.
///
/// Everything here is deterministic and in-memory: an operation either
/// succeeds or signals a construction-time or programming error. A search
/// that proves a puzzle unsolvable is a regular `None` result, not an error.
#[derive(Debug)]
pub enum PlannerError {
    /// The puzzle file failed validation: inconsistent row widths, a missing
    /// agent, a goal without a matching movable, or dimensions at or above
    /// the packing limit.
    InvalidPuzzle { reason: String },
    /// A puzzle or manifest file could not be read or written.
    Io { path: String, error: String },
    /// A caller-supplied argument is unusable, e.g. an empty heuristic list
    /// or an unknown planner mode.
    InvalidArgument { reason: String },
    /// An internal invariant was violated; never expected.
    Internal { reason: String },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidPuzzle { reason } => write!(f, "invalid puzzle: {reason}"),
            PlannerError::Io { path, error } => write!(f, "io error for {path}: {error}"),
            PlannerError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            PlannerError::Internal { reason } => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for PlannerError {}
