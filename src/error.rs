//! Typed search failures.
//!
//! Every failure is terminal for the search invocation that produced it.
//! States, actions and costs are rendered to strings so the error types stay
//! independent of the problem's generic parameters.

use derive_more::Display;
use thiserror::Error;

/// Why a search stopped before exhausting its frontier.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum AbortReason {
    #[display("expansion limit reached")]
    ExpansionLimit,
    #[display("deadline passed")]
    Deadline,
}

/// An action sequence that can't be executed from the start state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidPathError {
    #[error("Action {action} at step {step} is not applicable in state {state}")]
    IllegalAction {
        step: usize,
        action: String,
        state: String,
    },
    #[error("Path ends in {state}, which is not a goal")]
    NotAGoal { state: String },
    #[error("Path claims to cost {claimed}, but its actions cost {actual}")]
    CostMismatch { claimed: String, actual: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier ran out without reaching a goal.
    #[error("No path found after expanding {expanded} states")]
    NoPathFound { expanded: usize },
    /// The search budget ran out. Distinct from [`SearchError::NoPathFound`]
    /// as a path may still exist.
    #[error("Search aborted ({reason}) after expanding {expanded} states")]
    Aborted { reason: AbortReason, expanded: usize },
    #[error("Malformed successor {state} via {action}: negative step cost {cost}")]
    MalformedSuccessor {
        state: String,
        action: String,
        cost: String,
    },
    #[error("Heuristic estimated {estimate} for {state}, estimates must be non-negative")]
    InvalidHeuristic { state: String, estimate: String },
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] InvalidPathError),
}

impl SearchError {
    /// Whether the search finished without finding a path, as opposed to
    /// being cut short or hitting a contract violation.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SearchError::NoPathFound { .. })
    }
}
