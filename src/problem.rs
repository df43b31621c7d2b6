use num_traits::SaturatingAdd;
use num_traits::Zero;

use crate::cost::Cost;
use crate::error::InvalidPathError;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;
use crate::space::Successor;

/// A search problem.
///
/// This is the only view algorithms get of a domain. All four operations are
/// required: there are no partial defaults a domain could forget to override.
/// Domains that don't keep a cheaper way of pricing action sequences can
/// implement [`SearchProblem::cost_of_actions`] with
/// [`replay_cost_of_actions`].
pub trait SearchProblem: std::fmt::Debug {
    type State: State;
    type Action: Action;
    type Cost: Cost;

    fn start_state(&self) -> Self::State;

    fn is_goal_state(&self, s: &Self::State) -> bool;

    /// Expands a State.
    ///
    /// Step costs must be non-negative.
    fn successors(&self, s: &Self::State) -> Vec<Successor<Self::State, Self::Action, Self::Cost>>;

    /// Total cost of executing `actions` from the start state.
    fn cost_of_actions(&self, actions: &[Self::Action]) -> Result<Self::Cost, InvalidPathError>;
}

/// Shorthand for the [`Path`] type a problem's solutions have.
pub type ProblemPath<P> =
    Path<<P as SearchProblem>::State, <P as SearchProblem>::Action, <P as SearchProblem>::Cost>;

/// Prices `actions` by replaying them through [`SearchProblem::successors`].
///
/// Each action takes the first listed successor labelled with it.
pub fn replay_cost_of_actions<P: SearchProblem>(
    problem: &P,
    actions: &[P::Action],
) -> Result<P::Cost, InvalidPathError> {
    let mut state = problem.start_state();
    let mut cost = P::Cost::zero();

    for (step, action) in actions.iter().enumerate() {
        let successor = problem
            .successors(&state)
            .into_iter()
            .find(|s| s.action == *action)
            .ok_or_else(|| InvalidPathError::IllegalAction {
                step,
                action: format!("{action:?}"),
                state: format!("{state:?}"),
            })?;
        cost = cost.saturating_add(&successor.cost);
        state = successor.state;
    }

    Ok(cost)
}

/// Checks that `path` reaches a goal and that the problem agrees on its cost.
pub fn validate_path<P: SearchProblem>(
    problem: &P,
    path: &ProblemPath<P>,
) -> Result<(), InvalidPathError> {
    if !problem.is_goal_state(&path.end) {
        return Err(InvalidPathError::NotAGoal {
            state: format!("{:?}", path.end),
        });
    }
    let actual = problem.cost_of_actions(&path.actions)?;
    if actual != path.cost {
        return Err(InvalidPathError::CostMismatch {
            claimed: path.cost.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// An estimate of the cost left to reach a goal.
///
/// Estimates must be non-negative. Admissible heuristics (never
/// overestimating) keep A* optimal, and consistent ones also let it expand
/// every state once.
pub trait Heuristic<P: SearchProblem> {
    fn h(&self, s: &P::State, p: &P) -> P::Cost;
}

/// The zero heuristic. Turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullHeuristic;

impl<P: SearchProblem> Heuristic<P> for NullHeuristic {
    #[inline(always)]
    fn h(&self, _s: &P::State, _p: &P) -> P::Cost {
        P::Cost::zero()
    }
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem,
    F: Fn(&P::State, &P) -> P::Cost,
{
    #[inline(always)]
    fn h(&self, s: &P::State, p: &P) -> P::Cost {
        self(s, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts up from 0 by 1 or 2, stopping at `goal`.
    #[derive(Debug)]
    struct Counter {
        goal: u32,
    }

    impl SearchProblem for Counter {
        type State = u32;
        type Action = u32;
        type Cost = u32;

        fn start_state(&self) -> u32 {
            0
        }
        fn is_goal_state(&self, s: &u32) -> bool {
            *s == self.goal
        }
        fn successors(&self, s: &u32) -> Vec<Successor<u32, u32, u32>> {
            [1, 2]
                .into_iter()
                .filter(|step| s + step <= self.goal)
                .map(|step| Successor::new(s + step, step, step * 10))
                .collect()
        }
        fn cost_of_actions(&self, actions: &[u32]) -> Result<u32, InvalidPathError> {
            replay_cost_of_actions(self, actions)
        }
    }

    #[test]
    fn replay_prices_legal_sequences() {
        let p = Counter { goal: 4 };
        assert_eq!(p.cost_of_actions(&[]), Ok(0));
        assert_eq!(p.cost_of_actions(&[1, 2, 1]), Ok(40));
    }

    #[test]
    fn replay_rejects_illegal_sequences() {
        let p = Counter { goal: 4 };
        assert_eq!(
            p.cost_of_actions(&[2, 2, 1]),
            Err(InvalidPathError::IllegalAction {
                step: 2,
                action: "1".to_string(),
                state: "4".to_string(),
            })
        );
    }

    #[test]
    fn validate() {
        let p = Counter { goal: 3 };
        let mut path = Path::new_from_start(0);
        path.append(Successor::new(2, 2, 20));
        assert_eq!(
            validate_path(&p, &path),
            Err(InvalidPathError::NotAGoal {
                state: "2".to_string()
            })
        );

        path.append(Successor::new(3, 1, 11));
        assert_eq!(
            validate_path(&p, &path),
            Err(InvalidPathError::CostMismatch {
                claimed: "31".to_string(),
                actual: "30".to_string(),
            })
        );

        path.cost = 30;
        assert_eq!(validate_path(&p, &path), Ok(()));
    }

    #[test]
    fn heuristics() {
        let p = Counter { goal: 9 };
        assert_eq!(Heuristic::<Counter>::h(&NullHeuristic, &3, &p), 0);

        let remaining = |s: &u32, p: &Counter| (p.goal - s) * 5;
        assert_eq!(Heuristic::<Counter>::h(&remaining, &3, &p), 30);
    }
}
