use crate::algorithms::best_first::BestFirstSearch;
use crate::algorithms::best_first::Rank;
use crate::cost::Cost;
use crate::problem::SearchProblem;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower h.
///
/// Since `f = g + h`, equal f-values favour the larger cumulative cost g:
/// the node that has made more progress goes first. Equal ranks pop in
/// insertion order.
///
/// ```
/// use search::algorithms::astar::AStarRank;
/// use search::algorithms::best_first::Rank;
///
/// assert!(AStarRank::new(2u32, 0) < AStarRank::new(2u32, 1));
/// assert!(AStarRank::new(2u32, 0) < AStarRank::new(0u32, 2));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    h: C,
}

impl<C> AStarRank<C>
where
    C: Cost,
{
    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }

    #[inline(always)]
    pub fn h(&self) -> C {
        self.h
    }
}

impl<C> Rank<C> for AStarRank<C>
where
    C: Cost,
{
    #[inline(always)]
    fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }
}

/// A* search guided by the heuristic `H`.
pub type AStarSearch<'p, P, H> =
    BestFirstSearch<'p, P, H, AStarRank<<P as SearchProblem>::Cost>>;

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::problems::graph::GraphProblem;
    use crate::problems::graph::TableHeuristic;

    #[test]
    fn ranking() {
        let c0 = 0u32;
        let c1 = 1u32;
        let c2 = 2u32;

        let g = c2;
        let h_low = c0;
        let h_high = c1;
        assert!(AStarRank::new(g, h_low) < AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) == AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) > AStarRank::new(g, h_low));

        // Same f-value, needs tie-breaking on h
        let low = AStarRank::new(c2, c0);
        let high = AStarRank::new(c0, c2);
        assert!(low < high);
        assert!(low.f() == high.f());
        assert!(low.h() < high.h());
    }

    #[test]
    fn saturates_unreachable_estimates() {
        let r = AStarRank::new(5u32, u32::MAX);
        assert_eq!(r.f(), u32::MAX);
    }

    #[test]
    fn heuristic_prunes_expansions() {
        // Without guidance the cheap dead-end fan is expanded first.
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s x1 trap 1
            edge x1 x2 trap 1
            edge x2 x3 trap 1
            edge s m go 2
            edge m g go 2
            h x1 9
            h x2 9
            h x3 9
            h m 2
        "})
        .unwrap();

        let mut informed = AStarSearch::new(&p, TableHeuristic);
        let path = informed.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["go", "go"]);
        assert_eq!(path.cost, 4);
        // s and m only.
        assert_eq!(informed.stats().expanded, 2);

        let mut blind = crate::algorithms::uniform_cost::UniformCostSearch::new(
            &p,
            crate::problem::NullHeuristic,
        );
        assert_eq!(blind.find_next_goal().unwrap().cost, 4);
        assert!(blind.stats().expanded > 2);
    }

    #[test]
    fn equal_f_favours_larger_g() {
        // Both routes cost 3. `right` reaches b with the larger g, so b pops
        // before a and the goal is found without ever expanding a.
        let p = GraphProblem::try_from(indoc! {"
            start s
            goal g
            edge s a left 1
            edge s b right 2
            edge a g down 2
            edge b g down 1
            h a 2
            h b 1
        "})
        .unwrap();

        let mut search = AStarSearch::new(&p, TableHeuristic);
        let path = search.find_next_goal().unwrap();
        assert_eq!(path.actions, vec!["right", "down"]);
        assert_eq!(path.cost, 3);
        assert_eq!(search.stats().expanded, 2);
        assert!(!search.closed().contains_key("a"));
    }
}
