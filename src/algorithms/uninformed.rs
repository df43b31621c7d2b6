//! Depth-first and breadth-first graph search.
//!
//! Both share one driver and differ only in the frontier's order.

use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::data_structures::Frontier;
use crate::data_structures::Queue;
use crate::data_structures::Stack;
use crate::error::SearchError;
use crate::problem::ProblemPath;
use crate::problem::SearchProblem;
use crate::search::Budget;
use crate::search::SearchStats;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;

/// Expands the most recently discovered state first.
///
/// Successors are pushed in the order the problem lists them, so the last one
/// listed is expanded first.
pub type DepthFirstSearch<'p, P> =
    GraphSearch<'p, P, Stack<<P as SearchProblem>::State, SearchTreeIndex>>;

/// Expands states in the order they were discovered.
///
/// The first goal found is reached with the fewest possible actions.
pub type BreadthFirstSearch<'p, P> =
    GraphSearch<'p, P, Queue<<P as SearchProblem>::State, SearchTreeIndex>>;

/// Graph search over an unranked frontier.
///
/// States are expanded at most once, and a successor is only added to the
/// frontier when its state is neither explored nor already waiting there.
#[derive(Debug)]
pub struct GraphSearch<'p, P, F>
where
    P: SearchProblem,
    F: Frontier<P::State, SearchTreeIndex>,
{
    problem: &'p P,
    budget: Budget,

    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: F,
    /// States already expanded.
    explored: FxHashSet<P::State>,
    /// A goal returned by the last call, expanded when the search resumes.
    pending: Option<SearchTreeIndex>,
    /// The error that ended the search. Later calls only repeat it.
    failed: Option<SearchError>,

    stats: SearchStats,
}

impl<'p, P, F> GraphSearch<'p, P, F>
where
    P: SearchProblem,
    F: Frontier<P::State, SearchTreeIndex> + Default,
{
    #[must_use]
    pub fn new(problem: &'p P) -> Self {
        let mut search = Self {
            problem,
            budget: Budget::unlimited(),
            search_tree: SearchTree::new(),
            open: F::default(),
            explored: FxHashSet::default(),
            pending: None,
            failed: None,
            stats: SearchStats::default(),
        };

        let start = problem.start_state();
        log::debug!("Starting graph search from {start:?}");
        let root = search.search_tree.push_root(start.clone());
        search.open.push(start, root);

        search
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Runs the search until the next goal state is popped.
    ///
    /// Calling it again resumes the search past the goal it returned, so
    /// repeated calls enumerate reachable goals. Errors are final: once a
    /// call fails, every later call returns the same error.
    pub fn find_next_goal(&mut self) -> Result<ProblemPath<P>, SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FindNextGoal");

        if let Some(e) = &self.failed {
            return Err(e.clone());
        }
        let result = self.search();
        if let Err(e) = &result {
            self.failed = Some(e.clone());
        }
        result
    }

    fn search(&mut self) -> Result<ProblemPath<P>, SearchError> {
        if let Some(goal) = self.pending.take() {
            self.expand(goal)?;
        }

        while let Some((state, node_index)) = self.open.pop() {
            if self.explored.contains(&state) {
                continue;
            }

            if self.problem.is_goal_state(&state) {
                self.pending = Some(node_index);
                let path = self.search_tree.path(node_index);
                log::debug!("Found {path} ({})", self.stats());

                #[cfg(feature = "verify")]
                crate::problem::validate_path(self.problem, &path)?;

                return Ok(path);
            }

            self.expand(node_index)?;
        }

        log::debug!("Frontier exhausted ({})", self.stats());
        Err(SearchError::NoPathFound {
            expanded: self.stats.expanded,
        })
    }

    fn expand(&mut self, node_index: SearchTreeIndex) -> Result<(), SearchError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("NodeExpansion");

        if let Err(reason) = self.budget.check(self.stats.expanded) {
            log::warn!("Search aborted: {reason} ({})", self.stats());
            return Err(SearchError::Aborted {
                reason,
                expanded: self.stats.expanded,
            });
        }

        let state = self.search_tree[node_index].state().clone();
        log::trace!("Expanding {state:?}");
        let newly_explored = self.explored.insert(state.clone());
        debug_assert!(newly_explored, "States are expanded at most once");
        self.stats.expanded += 1;

        for successor in self.problem.successors(&state) {
            self.stats.generated += 1;
            if successor.cost.is_negative() {
                return Err(SearchError::MalformedSuccessor {
                    state: format!("{:?}", successor.state),
                    action: format!("{:?}", successor.action),
                    cost: successor.cost.to_string(),
                });
            }

            if self.explored.contains(&successor.state) || self.open.contains(&successor.state) {
                continue;
            }

            let child = self.search_tree.push_child(
                node_index,
                successor.action,
                successor.state.clone(),
                successor.cost,
            );
            self.open.push(successor.state, child);
        }

        Ok(())
    }

    /// The error that ended the search, if it has ended.
    pub fn failure(&self) -> Option<&SearchError> {
        self.failed.as_ref()
    }

    /// States expanded so far.
    pub fn explored(&self) -> &FxHashSet<P::State> {
        &self.explored
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            max_frontier: self.open.max_len(),
            nodes: self.search_tree.len(),
            tree_bytes: self.search_tree.size_in_bytes(),
            ..self.stats
        }
    }
}

impl<P, F> Iterator for GraphSearch<'_, P, F>
where
    P: SearchProblem,
    F: Frontier<P::State, SearchTreeIndex> + Default,
{
    type Item = ProblemPath<P>;

    /// Yields goals until the search fails or runs out. Use
    /// [`GraphSearch::failure`] to tell the two apart.
    fn next(&mut self) -> Option<Self::Item> {
        self.find_next_goal().ok()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problems::graph::GraphProblem;

    fn diamond() -> GraphProblem {
        // s -> a -> g and s -> b -> g, with a longer detour through b.
        GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s a left 1
            edge s b right 1
            edge a g down 1
            edge b c down 1
            edge c g down 1
        "})
        .unwrap()
    }

    #[test]
    fn dfs_follows_the_last_listed_successor() {
        let p = diamond();
        let mut search = DepthFirstSearch::new(&p);
        let path = search.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["right", "down", "down"]);
        assert_eq!(path.cost, 3);
    }

    #[test]
    fn bfs_finds_fewest_actions() {
        let p = diamond();
        let mut search = BreadthFirstSearch::new(&p);
        let path = search.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["left", "down"]);
        assert_eq!(path.cost, 2);
    }

    #[test]
    fn explored_states_are_unique_and_expanded_once() {
        let p = diamond();
        let mut search = BreadthFirstSearch::new(&p);
        search.find_next_goal().unwrap();
        let stats = search.stats();
        assert_eq!(stats.expanded, search.explored().len());
        // The goal is popped but not expanded.
        assert!(!search.explored().contains("g"));
    }

    #[test]
    fn resuming_enumerates_goals() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g1
            goal g2
            edge s g1 a 1
            edge g1 g2 b 1
        "})
        .unwrap();
        let goals: Vec<_> = BreadthFirstSearch::new(&p).map(|path| path.end).collect();
        assert_eq!(goals, vec!["g1".to_string(), "g2".to_string()]);
    }

    #[test]
    fn budget_aborts() {
        let p = diamond();
        let mut search =
            BreadthFirstSearch::new(&p).with_budget(Budget::unlimited().with_max_expansions(1));
        assert_eq!(
            search.find_next_goal(),
            Err(SearchError::Aborted {
                reason: crate::error::AbortReason::ExpansionLimit,
                expanded: 1,
            })
        );
    }

    #[test]
    fn errors_are_final() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s g fine 5
            edge s a bad -1
        "})
        .unwrap();

        let mut search = BreadthFirstSearch::new(&p);
        let first = search.find_next_goal();
        assert!(matches!(first, Err(SearchError::MalformedSuccessor { .. })));
        assert_eq!(search.find_next_goal(), first);
        assert_eq!(search.failure(), first.as_ref().err());
        assert_eq!(search.count(), 0);
    }

    #[test]
    fn aborted_searches_stay_aborted() {
        let p = diamond();
        let mut search =
            DepthFirstSearch::new(&p).with_budget(Budget::unlimited().with_max_expansions(1));
        let aborted = Err(SearchError::Aborted {
            reason: crate::error::AbortReason::ExpansionLimit,
            expanded: 1,
        });
        assert_eq!(search.find_next_goal(), aborted);
        assert_eq!(search.find_next_goal(), aborted);
        assert_eq!(search.stats().expanded, 1);
    }
}
