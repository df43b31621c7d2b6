use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::local::LocalSearchProblem;

/// Steepest-ascent hill climbing with random restarts.
///
/// Each climb starts from a random state and keeps moving to its best
/// neighbour while that strictly improves the value. The best state over all
/// climbs wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HillClimbing {
    /// Climbs after the first one.
    pub restarts: usize,
    /// Moves allowed per climb.
    pub max_steps: usize,
    pub seed: u64,
}

impl Default for HillClimbing {
    fn default() -> Self {
        Self {
            restarts: 10,
            max_steps: 10_000,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalSearchOutcome<St, V> {
    pub state: St,
    pub value: V,
    /// Restarts done before finishing, at most `HillClimbing::restarts`.
    pub restarts_used: usize,
    /// Moves made over all climbs.
    pub steps: usize,
}

impl HillClimbing {
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run<P: LocalSearchProblem>(&self, problem: &P) -> LocalSearchOutcome<P::State, P::Value> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let start = problem.random_state(&mut rng);
        let (state, value, mut steps) = self.climb(problem, start);
        let mut best = LocalSearchOutcome {
            state,
            value,
            restarts_used: 0,
            steps: 0,
        };
        log::debug!("Climb 0 reached {:?} ({:?})", best.state, best.value);

        for restart in 1..=self.restarts {
            if problem.is_optimal(&best.state) {
                break;
            }
            best.restarts_used = restart;

            let start = problem.random_state(&mut rng);
            let (state, value, climb_steps) = self.climb(problem, start);
            steps += climb_steps;
            log::debug!("Climb {restart} reached {state:?} ({value:?})");
            if value > best.value {
                best.state = state;
                best.value = value;
            }
        }

        best.steps = steps;
        best
    }

    /// Climbs from `s` to a local maximum, or until running out of steps.
    fn climb<P: LocalSearchProblem>(
        &self,
        problem: &P,
        s: P::State,
    ) -> (P::State, P::Value, usize) {
        let mut current = s;
        let mut value = problem.value(&current);

        for step in 0..self.max_steps {
            let mut best: Option<(P::State, P::Value)> = None;
            for n in problem.neighbours(&current) {
                let v = problem.value(&n);
                // Ties keep the first neighbour listed.
                if best.as_ref().is_none_or(|(_, best_v)| v > *best_v) {
                    best = Some((n, v));
                }
            }

            match best {
                Some((n, v)) if v > value => {
                    log::trace!("Climbing to {n:?} ({v:?})");
                    current = n;
                    value = v;
                }
                _ => return (current, value, step),
            }
        }

        (current, value, self.max_steps)
    }
}
