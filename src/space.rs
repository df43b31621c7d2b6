use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;

/// A point in a search space.
///
/// States are opaque to the algorithms, which only compare and hash them.
pub trait State: Clone + Debug + PartialEq + Eq + Hash {}
impl<T> State for T where T: Clone + Debug + PartialEq + Eq + Hash {}

/// A labelled transition between two states.
pub trait Action: Clone + Debug + PartialEq + Eq {}
impl<T> Action for T where T: Clone + Debug + PartialEq + Eq {}

/// One way out of a state: taking `action` reaches `state` for `cost`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Successor<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub state: St,
    pub action: A,
    pub cost: C,
}

impl<St, A, C> Successor<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new(state: St, action: A, cost: C) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

impl<St, A, C> From<(St, A, C)> for Successor<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn from((state, action, cost): (St, A, C)) -> Self {
        Self::new(state, action, cost)
    }
}

/// A solution: the actions leading from `start` to `end`, and what they cost.
///
/// `actions` is empty exactly when `start` is already a goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub start: St,
    pub end: St,
    pub cost: C,
    pub actions: Vec<A>,
}

impl<St, A, C> Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            end: start.clone(),
            start,
            cost: C::zero(),
            actions: vec![],
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        self.cost.valid() && (!self.is_empty() || self.start == self.end)
    }

    /// Extends the path by one step.
    #[inline(always)]
    pub fn append(&mut self, step: Successor<St, A, C>) {
        self.actions.push(step.action);
        self.end = step.state;
        self.cost = self.cost.saturating_add(&step.cost);
    }

    pub fn into_actions(self) -> Vec<A> {
        self.actions
    }
}

impl<St, A, C> std::fmt::Display for Path<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Path({}, {:?}:{:?}:{:?})",
            self.cost,
            self.start,
            self.actions.iter().take(20).collect::<Vec<_>>(),
            self.end
        )
    }
}
