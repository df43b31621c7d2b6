//! Local search.
//!
//! Unlike the path-finding algorithms these only care about the state they
//! end up in, not how they got there.

use std::fmt::Debug;

pub mod hill_climbing;

pub use hill_climbing::HillClimbing;
pub use hill_climbing::LocalSearchOutcome;

/// An optimisation problem: find a state with the highest value.
pub trait LocalSearchProblem {
    type State: Clone + Debug;
    type Value: Copy + Debug + Ord;

    /// Draws a state to start climbing from.
    fn random_state<R: rand::Rng>(&self, rng: &mut R) -> Self::State;

    fn neighbours(&self, s: &Self::State) -> Vec<Self::State>;

    fn value(&self, s: &Self::State) -> Self::Value;

    /// Whether `s` is known to be a global optimum, which ends the search.
    fn is_optimal(&self, _s: &Self::State) -> bool {
        false
    }
}
