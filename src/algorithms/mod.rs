//! Implementation of search algorithms.
//!
//! These algorithms can do path-finding on generic search problems. Each one
//! has a struct that can be driven step by step, and a plain function that
//! runs it to the first goal:
//!
//! ```
//! use search::algorithms::bfs;
//! use search::problems::graph::GraphProblem;
//!
//! let p = GraphProblem::try_from("start a\ngoal c\nedge a b x 1\nedge b c y 1\n").unwrap();
//! assert_eq!(bfs(&p).unwrap(), vec!["x", "y"]);
//! ```

use std::str::FromStr;

use derive_more::Display;
use thiserror::Error;

use crate::error::SearchError;
use crate::problem::Heuristic;
use crate::problem::NullHeuristic;
use crate::problem::ProblemPath;
use crate::problem::SearchProblem;
use crate::search::Budget;
use crate::search::SearchStats;
use crate::space::Path;

pub mod astar;
pub mod best_first;
pub mod uniform_cost;
pub mod uninformed;

use astar::AStarSearch;
use uniform_cost::UniformCostSearch;
use uninformed::BreadthFirstSearch;
use uninformed::DepthFirstSearch;

/// Actions reaching the first goal found by depth-first search.
pub fn depth_first_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>, SearchError> {
    DepthFirstSearch::new(problem)
        .find_next_goal()
        .map(Path::into_actions)
}

/// Actions reaching the goal closest to the start in number of actions.
pub fn breadth_first_search<P: SearchProblem>(
    problem: &P,
) -> Result<Vec<P::Action>, SearchError> {
    BreadthFirstSearch::new(problem)
        .find_next_goal()
        .map(Path::into_actions)
}

/// Actions reaching the cheapest goal.
pub fn uniform_cost_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>, SearchError> {
    UniformCostSearch::new(problem, NullHeuristic)
        .find_next_goal()
        .map(Path::into_actions)
}

/// A* without a heuristic, which expands like [`uniform_cost_search`].
pub fn a_star_search<P: SearchProblem>(problem: &P) -> Result<Vec<P::Action>, SearchError> {
    a_star_search_with_heuristic(problem, NullHeuristic)
}

/// Actions reaching a goal, guided by `heuristic`.
///
/// The result is the cheapest as long as `heuristic` is admissible.
pub fn a_star_search_with_heuristic<P, H>(
    problem: &P,
    heuristic: H,
) -> Result<Vec<P::Action>, SearchError>
where
    P: SearchProblem,
    H: Heuristic<P>,
{
    AStarSearch::new(problem, heuristic)
        .find_next_goal()
        .map(Path::into_actions)
}

pub use self::a_star_search as astar;
pub use self::breadth_first_search as bfs;
pub use self::depth_first_search as dfs;
pub use self::uniform_cost_search as ucs;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unknown algorithm {0:?}, expected one of dfs, bfs, ucs or astar")]
pub struct UnknownAlgorithm(pub String);

/// The algorithms, selectable by name.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    #[display("dfs")]
    #[value(name = "dfs", alias = "depthFirstSearch", alias = "depth-first")]
    DepthFirst,
    #[display("bfs")]
    #[value(name = "bfs", alias = "breadthFirstSearch", alias = "breadth-first")]
    BreadthFirst,
    #[display("ucs")]
    #[value(name = "ucs", alias = "uniformCostSearch", alias = "uniform-cost")]
    UniformCost,
    #[display("astar")]
    #[value(name = "astar", alias = "aStarSearch", alias = "a-star")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
        Algorithm::UniformCost,
        Algorithm::AStar,
    ];

    /// Whether the first path found is always the cheapest.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Algorithm::UniformCost | Algorithm::AStar)
    }

    /// Runs the algorithm to the first goal.
    ///
    /// Only A* looks at `heuristic`.
    pub fn search<P, H>(&self, problem: &P, heuristic: H, budget: Budget) -> SearchOutcome<P>
    where
        P: SearchProblem,
        H: Heuristic<P>,
    {
        log::debug!("Running {self} within {budget:?}");
        match self {
            Algorithm::DepthFirst => {
                let mut search = DepthFirstSearch::new(problem).with_budget(budget);
                let result = search.find_next_goal();
                SearchOutcome::new(result, search.stats())
            }
            Algorithm::BreadthFirst => {
                let mut search = BreadthFirstSearch::new(problem).with_budget(budget);
                let result = search.find_next_goal();
                SearchOutcome::new(result, search.stats())
            }
            Algorithm::UniformCost => {
                let mut search = UniformCostSearch::new(problem, NullHeuristic).with_budget(budget);
                let result = search.find_next_goal();
                SearchOutcome::new(result, search.stats())
            }
            Algorithm::AStar => {
                let mut search = AStarSearch::new(problem, heuristic).with_budget(budget);
                let result = search.find_next_goal();
                SearchOutcome::new(result, search.stats())
            }
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfs" | "depthFirstSearch" | "depth-first" | "depth_first_search" => {
                Ok(Algorithm::DepthFirst)
            }
            "bfs" | "breadthFirstSearch" | "breadth-first" | "breadth_first_search" => {
                Ok(Algorithm::BreadthFirst)
            }
            "ucs" | "uniformCostSearch" | "uniform-cost" | "uniform_cost_search" => {
                Ok(Algorithm::UniformCost)
            }
            "astar" | "aStarSearch" | "a-star" | "a_star_search" => Ok(Algorithm::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// What an [`Algorithm::search`] run produced.
#[derive(Debug)]
pub struct SearchOutcome<P: SearchProblem> {
    pub result: Result<ProblemPath<P>, SearchError>,
    pub stats: SearchStats,
}

impl<P: SearchProblem> SearchOutcome<P> {
    fn new(result: Result<ProblemPath<P>, SearchError>, stats: SearchStats) -> Self {
        Self { result, stats }
    }
}
