use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::Rank;
use crate::cost::Cost;
use crate::problem::NullHeuristic;
use crate::problem::SearchProblem;

/// Ranks nodes by the cost of the path reaching them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DijkstraRank<C: Cost> {
    g: C,
}

impl<C> Rank<C> for DijkstraRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn new(g: C, _h: C) -> Self {
        Self { g }
    }
}

/// Dijkstra's algorithm: expands the cheapest path first.
pub type UniformCostSearch<'p, P> =
    BestFirstSearch<'p, P, NullHeuristic, DijkstraRank<<P as SearchProblem>::Cost>>;

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::error::SearchError;
    use crate::problems::graph::GraphProblem;

    #[test]
    fn ranking_ignores_h() {
        assert!(DijkstraRank::new(1u32, 100) < DijkstraRank::new(2u32, 0));
        assert_eq!(DijkstraRank::new(3u32, 1), DijkstraRank::new(3u32, 2));
    }

    #[test]
    fn prefers_cheap_detours() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s g direct 10
            edge s a via 1
            edge a b via 1
            edge b g via 1
        "})
        .unwrap();

        let mut search = UniformCostSearch::new(&p, NullHeuristic);
        let path = search.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["via", "via", "via"]);
        assert_eq!(path.cost, 3);
    }

    #[test]
    fn negative_steps_fail_fast() {
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s a up 1
            edge a g down -3
        "})
        .unwrap();

        let mut search = UniformCostSearch::new(&p, NullHeuristic);
        assert_eq!(
            search.find_next_goal(),
            Err(SearchError::MalformedSuccessor {
                state: "\"g\"".to_string(),
                action: "\"down\"".to_string(),
                cost: "-3".to_string(),
            })
        );
    }
}
