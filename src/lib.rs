//! Generic state-space search.
//!
//! Domains implement [`SearchProblem`], and the algorithms in [`algorithms`]
//! find action sequences that take its start state to a goal state.

use shadow_rs::shadow;

shadow!(build);

// Search space and problems
// -------------------------
pub mod cost;
pub mod float_cost;
pub mod problem;
pub mod space;

// Internals
// ---------
pub mod data_structures;
pub mod error;
pub mod search;

// Algorithms
// ----------
pub mod algorithms;
pub mod local;

// Problems
// --------
pub mod problems;

pub use algorithms::Algorithm;
pub use algorithms::a_star_search;
pub use algorithms::a_star_search_with_heuristic;
pub use algorithms::breadth_first_search;
pub use algorithms::depth_first_search;
pub use algorithms::uniform_cost_search;
pub use error::InvalidPathError;
pub use error::SearchError;
pub use problem::Heuristic;
pub use problem::NullHeuristic;
pub use problem::SearchProblem;
pub use search::Budget;
