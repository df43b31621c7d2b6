use std::collections::VecDeque;
use std::hash::Hash;

use crate::data_structures::Frontier;
use crate::data_structures::Membership;

/// A FIFO frontier. Pushes at the tail and pops from the head.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct Queue<K, V>
where
    K: Clone + Eq + Hash,
{
    items: VecDeque<(K, V)>,
    members: Membership<K>,
    max_len: usize,
}

impl<K, V> Queue<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            members: Membership::new(),
            max_len: 0,
        }
    }

    /// The entry `pop()` would return.
    pub fn peek(&self) -> Option<&(K, V)> {
        self.items.front()
    }
}

impl<K, V> Default for Queue<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Frontier<K, V> for Queue<K, V>
where
    K: Clone + Eq + Hash,
{
    fn push(&mut self, key: K, value: V) {
        self.members.insert(&key);
        self.items.push_back((key, value));
        self.max_len = self.max_len.max(self.items.len());
    }

    fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.items.pop_front()?;
        self.members.remove(&key);
        Some((key, value))
    }

    fn contains(&self, key: &K) -> bool {
        self.members.contains(key)
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn max_len(&self) -> usize {
        self.max_len
    }
}
