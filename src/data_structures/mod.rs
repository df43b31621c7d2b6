//! Frontier containers.
//!
//! Frontiers hold `(key, value)` pairs where the key is the state a node
//! stands for and the value is whatever the algorithm needs to get back to
//! the node. Containers track which keys they hold so algorithms can skip
//! states that are already waiting for expansion.

use std::hash::Hash;

use rustc_hash::FxHashMap;

mod priority_queue;
mod queue;
mod stack;

pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use stack::Stack;

/// An ordered collection of nodes awaiting expansion.
pub trait Frontier<K, V> {
    fn push(&mut self, key: K, value: V);
    fn pop(&mut self) -> Option<(K, V)>;
    /// Whether some entry for `key` is waiting in the frontier.
    fn contains(&self, key: &K) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// The largest `len()` seen so far.
    fn max_len(&self) -> usize;
}

/// Multiset of the keys held by a container.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub(crate) struct Membership<K>
where
    K: Clone + Eq + Hash,
{
    counts: FxHashMap<K, usize>,
}

impl<K> Membership<K>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    #[inline(always)]
    pub(crate) fn insert(&mut self, k: &K) {
        *self.counts.entry(k.clone()).or_default() += 1;
    }

    #[inline(always)]
    pub(crate) fn remove(&mut self, k: &K) {
        match self.counts.get_mut(k) {
            Some(1) => {
                self.counts.remove(k);
            }
            Some(c) => *c -= 1,
            None => debug_assert!(false, "Removed a key that was never inserted"),
        }
    }

    #[inline(always)]
    pub(crate) fn contains(&self, k: &K) -> bool {
        self.counts.contains_key(k)
    }
}
