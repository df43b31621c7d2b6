//! Cost-ranked graph search.
//!
//! Uniform-cost search and A* only differ in how they rank nodes, so they
//! share this driver and plug in a [`Rank`].

use std::fmt::Debug;

use num_traits::SaturatingAdd;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::data_structures::PriorityQueue;
use crate::error::SearchError;
use crate::problem::Heuristic;
use crate::problem::ProblemPath;
use crate::problem::SearchProblem;
use crate::search::Budget;
use crate::search::SearchStats;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;

/// How a best-first search orders its frontier. Lower ranks pop first.
///
/// For a fixed `h`, a lower `g` must never produce a worse rank, so improving
/// the path to a queued state always improves its entry.
pub trait Rank<C: Cost>: Copy + Ord + Debug {
    fn new(g: C, h: C) -> Self;
}

/// Best-first graph search with reopening.
///
/// Keeps the cheapest known cost of every generated state and only queues a
/// successor when it improves on it. A popped state is finalized with its
/// cost, and finalized again (reopened) only if a strictly cheaper path to it
/// surfaces later, which inconsistent heuristics can cause.
#[derive(Debug)]
pub struct BestFirstSearch<'p, P, H, R>
where
    P: SearchProblem,
    H: Heuristic<P>,
    R: Rank<P::Cost>,
{
    problem: &'p P,
    heuristic: H,
    budget: Budget,

    search_tree: SearchTree<P::State, P::Action, P::Cost>,
    open: PriorityQueue<P::State, SearchTreeIndex, R>,
    /// Cheapest cost each generated state has been reached with.
    ///
    /// ```pseudocode
    /// for (s, c) in self.closed:
    ///   assert(self.best_g[s] <= c)
    /// ```
    best_g: FxHashMap<P::State, P::Cost>,
    /// Expanded states and the cost they were expanded with.
    closed: FxHashMap<P::State, P::Cost>,

    started: bool,
    /// A goal returned by the last call, expanded when the search resumes.
    pending: Option<SearchTreeIndex>,
    /// The error that ended the search. Later calls only repeat it.
    failed: Option<SearchError>,

    stats: SearchStats,
}

impl<'p, P, H, R> BestFirstSearch<'p, P, H, R>
where
    P: SearchProblem,
    H: Heuristic<P>,
    R: Rank<P::Cost>,
{
    #[must_use]
    pub fn new(problem: &'p P, heuristic: H) -> Self {
        Self {
            problem,
            heuristic,
            budget: Budget::unlimited(),
            search_tree: SearchTree::new(),
            open: PriorityQueue::new(),
            best_g: FxHashMap::default(),
            closed: FxHashMap::default(),
            started: false,
            pending: None,
            failed: None,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Runs the search until the next goal state is popped.
    ///
    /// Goals are returned cheapest first. Calling it again resumes the search
    /// past the goal it returned. Errors are final: once a call fails, every
    /// later call returns the same error.
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
        if !self.started {
            self.started = true;
            self.push_root()?;
        }
        if let Some(goal) = self.pending.take() {
            self.expand(goal)?;
        }

        while let Some((state, node_index, rank)) = self.open.pop() {
            let g = self.search_tree[node_index].g();
            match self.closed.get(&state) {
                Some(&closed_g) if closed_g <= g => continue,
                Some(&closed_g) => {
                    self.stats.reopened += 1;
                    log::warn!(
                        "Reopening {state:?} (g: {closed_g} -> {g}), the heuristic is inconsistent"
                    );
                }
                None => {}
            }
            log::trace!("Popped {state:?} with {rank:?}");
            self.closed.insert(state.clone(), g);

            if self.problem.is_goal_state(&state) {
                #[cfg(feature = "coz_profile")]
                coz::progress!("GoalFound");

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

    fn push_root(&mut self) -> Result<(), SearchError> {
        let start = self.problem.start_state();
        log::debug!("Starting best-first search from {start:?}");

        let h = self.h(&start)?;
        let root = self.search_tree.push_root(start.clone());
        let g = P::Cost::zero();
        self.best_g.insert(start.clone(), g);
        self.open.push(start, root, R::new(g, h));
        Ok(())
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
        self.stats.expanded += 1;

        let node = &self.search_tree[node_index];
        let g = node.g();
        let successors = self.problem.successors(node.state());
        for successor in successors {
            #[cfg(feature = "coz_profile")]
            coz::scope!("ReachNode");

            self.stats.generated += 1;
            if successor.cost.is_negative() {
                return Err(SearchError::MalformedSuccessor {
                    state: format!("{:?}", successor.state),
                    action: format!("{:?}", successor.action),
                    cost: successor.cost.to_string(),
                });
            }

            let new_g = g.saturating_add(&successor.cost);
            if let Some(&best) = self.best_g.get(&successor.state) {
                if best <= new_g {
                    continue;
                }
            }

            let h = self.h(&successor.state)?;
            self.best_g.insert(successor.state.clone(), new_g);
            let child = self.search_tree.push_child(
                node_index,
                successor.action,
                successor.state.clone(),
                successor.cost,
            );
            debug_assert_eq!(self.search_tree[child].g(), new_g);
            self.open.push(successor.state, child, R::new(new_g, h));
        }

        Ok(())
    }

    fn h(&self, s: &P::State) -> Result<P::Cost, SearchError> {
        let h = self.heuristic.h(s, self.problem);
        if h.is_negative() {
            return Err(SearchError::InvalidHeuristic {
                state: format!("{s:?}"),
                estimate: h.to_string(),
            });
        }
        Ok(h)
    }

    /// The error that ended the search, if it has ended.
    pub fn failure(&self) -> Option<&SearchError> {
        self.failed.as_ref()
    }

    /// Expanded states and the cost of the path they were last expanded with.
    pub fn closed(&self) -> &FxHashMap<P::State, P::Cost> {
        &self.closed
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

impl<P, H, R> Iterator for BestFirstSearch<'_, P, H, R>
where
    P: SearchProblem,
    H: Heuristic<P>,
    R: Rank<P::Cost>,
{
    type Item = ProblemPath<P>;

    /// Yields goals until the search fails or runs out. Use
    /// [`BestFirstSearch::failure`] to tell the two apart.
    fn next(&mut self) -> Option<Self::Item> {
        self.find_next_goal().ok()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::algorithms::astar::AStarSearch;
    use crate::algorithms::uniform_cost::UniformCostSearch;
    use crate::problem::NullHeuristic;
    use crate::problems::graph::GraphProblem;
    use crate::problems::graph::TableHeuristic;

    #[test]
    fn inconsistent_heuristic_reopens_and_stays_optimal() {
        // h(b) is admissible but overestimates the step from b to a.
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s a long 4
            edge s b short 1
            edge b a hop 1
            edge a g finish 5
            h b 6
        "})
        .unwrap();

        let mut search = AStarSearch::new(&p, TableHeuristic);
        let path = search.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["short", "hop", "finish"]);
        assert_eq!(path.cost, 7);

        let stats = search.stats();
        assert_eq!(stats.reopened, 1);
        assert_eq!(stats.expanded, 4);
        assert_eq!(search.closed().get("a"), Some(&2));
    }

    #[test]
    fn goals_come_cheapest_first() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal near
            goal far
            edge s far a 9
            edge s mid b 1
            edge mid near c 1
        "})
        .unwrap();

        let costs: Vec<_> = UniformCostSearch::new(&p, NullHeuristic)
            .map(|path| (path.end, path.cost))
            .collect();
        assert_eq!(costs, vec![("near".to_string(), 2), ("far".to_string(), 9)]);
    }

    #[test]
    fn negative_root_estimate_is_reported() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s g go 1
            h s -1
        "})
        .unwrap();

        let mut search = AStarSearch::new(&p, TableHeuristic);
        assert_eq!(
            search.find_next_goal(),
            Err(SearchError::InvalidHeuristic {
                state: "\"s\"".to_string(),
                estimate: "-1".to_string(),
            })
        );
    }

    #[test]
    fn errors_are_final() {
        // The malformed edge is generated after the goal is already queued.
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s g fine 5
            edge s a bad -1
        "})
        .unwrap();

        let malformed = SearchError::MalformedSuccessor {
            state: "\"a\"".to_string(),
            action: "\"bad\"".to_string(),
            cost: "-1".to_string(),
        };
        let mut search = UniformCostSearch::new(&p, NullHeuristic);
        assert_eq!(search.find_next_goal(), Err(malformed.clone()));
        assert_eq!(search.find_next_goal(), Err(malformed.clone()));
        assert_eq!(search.failure(), Some(&malformed));

        let mut search = UniformCostSearch::new(&p, NullHeuristic);
        assert_eq!(search.next(), None);
        assert_eq!(search.next(), None);
        assert_eq!(search.failure(), Some(&malformed));
    }
}
