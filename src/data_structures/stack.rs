use std::hash::Hash;

use crate::data_structures::Frontier;
use crate::data_structures::Membership;

/// A LIFO frontier. Pops the most recently pushed entry.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct Stack<K, V>
where
    K: Clone + Eq + Hash,
{
    items: Vec<(K, V)>,
    members: Membership<K>,
    max_len: usize,
}

impl<K, V> Stack<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            items: vec![],
            members: Membership::new(),
            max_len: 0,
        }
    }

    /// The entry `pop()` would return.
    pub fn peek(&self) -> Option<&(K, V)> {
        self.items.last()
    }
}

impl<K, V> Default for Stack<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Frontier<K, V> for Stack<K, V>
where
    K: Clone + Eq + Hash,
{
    fn push(&mut self, key: K, value: V) {
        self.members.insert(&key);
        self.items.push((key, value));
        self.max_len = self.max_len.max(self.items.len());
    }

    fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.items.pop()?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo() {
        let mut s = Stack::new();
        assert!(s.is_empty());
        s.push('a', 1);
        s.push('b', 2);
        s.push('c', 3);
        assert_eq!(s.peek(), Some(&('c', 3)));
        assert_eq!(s.pop(), Some(('c', 3)));
        assert_eq!(s.pop(), Some(('b', 2)));
        s.push('d', 4);
        assert_eq!(s.pop(), Some(('d', 4)));
        assert_eq!(s.pop(), Some(('a', 1)));
        assert_eq!(s.pop(), None);
        assert_eq!(s.max_len(), 3);
    }

    #[test]
    fn contains_follows_pops() {
        let mut s = Stack::new();
        s.push("x", ());
        s.push("y", ());
        s.push("x", ());
        assert!(s.contains(&"x"));
        assert!(s.contains(&"y"));
        assert!(!s.contains(&"z"));

        s.pop();
        assert!(s.contains(&"x"), "An older 'x' is still stacked");
        s.pop();
        assert!(!s.contains(&"y"));
        s.pop();
        assert!(!s.contains(&"x"));
        assert!(s.is_empty());
    }
}
