use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Insertion counter used to break ties between equal priorities.
type Sequence = u64;

#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
struct HeapEntry<K, V, R> {
    rank: R,
    seq: Sequence,
    key: K,
    value: V,
}

// Entries are ordered by `(rank, seq)` only.
impl<K, V, R: Ord> PartialEq for HeapEntry<K, V, R> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<K, V, R: Ord> Eq for HeapEntry<K, V, R> {}
impl<K, V, R: Ord> PartialOrd for HeapEntry<K, V, R> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<K, V, R: Ord> Ord for HeapEntry<K, V, R> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority frontier with decrease-key.
///
/// Pops the entry with the lowest rank, and the oldest one among equal ranks.
///
/// Each key has at most one live entry. Pushing a key that's already queued
/// replaces its entry only when the new rank is strictly lower; the old heap
/// entry is left behind and skipped when it surfaces (lazy deletion). `live`
/// is the authoritative record of which heap entry is current:
///
/// ```pseudocode
/// for (key, (rank, seq)) in self.live:
///   assert(self.heap contains an entry (rank, seq, key, _))
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct PriorityQueue<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Ord + Copy,
{
    heap: BinaryHeap<Reverse<HeapEntry<K, V, R>>>,
    live: FxHashMap<K, (R, Sequence)>,
    next_seq: Sequence,
    max_len: usize,
}

impl<K, V, R> PriorityQueue<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Ord + Copy,
{
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: FxHashMap::default(),
            next_seq: 0,
            max_len: 0,
        }
    }

    /// Queues `key` with `rank`, or improves its rank if already queued.
    ///
    /// Returns whether the entry was added or improved. A push that doesn't
    /// improve on the queued rank is dropped.
    pub fn push(&mut self, key: K, value: V, rank: R) -> bool {
        if let Some((queued_rank, _)) = self.live.get(&key) {
            if *queued_rank <= rank {
                return false;
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(key.clone(), (rank, seq));
        self.heap.push(Reverse(HeapEntry {
            rank,
            seq,
            key,
            value,
        }));
        self.max_len = self.max_len.max(self.live.len());

        self.verify();
        true
    }

    /// Removes the best live entry.
    pub fn pop(&mut self) -> Option<(K, V, R)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            match self.live.get(&entry.key) {
                Some(&(rank, seq)) if rank == entry.rank && seq == entry.seq => {
                    self.live.remove(&entry.key);
                    self.verify();
                    return Some((entry.key, entry.value, entry.rank));
                }
                // Superseded by a better push.
                _ => continue,
            }
        }
        debug_assert!(self.live.is_empty());
        None
    }

    #[inline(always)]
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// The rank `key` is currently queued with.
    pub fn priority_of(&self, key: &K) -> Option<R> {
        self.live.get(key).map(|&(rank, _)| rank)
    }

    /// Number of live entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// The largest `len()` seen so far.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of superseded entries still sitting in the heap.
    pub fn stale_len(&self) -> usize {
        self.heap.len() - self.live.len()
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify(&self) {
        // All good... (hopefully)
    }
    #[cfg(feature = "verify")]
    fn verify(&self) {
        assert!(self.heap.len() >= self.live.len());
        for (key, &(rank, seq)) in &self.live {
            assert!(
                self.heap
                    .iter()
                    .any(|Reverse(e)| e.key == *key && e.rank == rank && e.seq == seq),
                "Live entry missing from the heap"
            );
        }
    }
}

impl<K, V, R> Default for PriorityQueue<K, V, R>
where
    K: Clone + Eq + Hash,
    R: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
