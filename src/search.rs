use std::time::Duration;
use std::time::Instant;

use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::error::AbortReason;
use crate::space::Action;
use crate::space::Path;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, A, C>` within its `SearchTree`.
///
/// `NonMaxUsize` keeps `Option<(SearchTreeIndex, A)>` parents as small as a
/// bare index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            index: NonMaxUsize::new(index).expect("Search trees can't hold usize::MAX nodes"),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

/// Search bookkeeping for one reached state.
#[derive(Debug)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    pub(crate) g: C,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn new(s: St, parent: Option<(SearchTreeIndex, A)>, g: C) -> Self {
        Self {
            parent,
            state: s,
            g,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }

    /// Cumulative cost of the path through the parent chain.
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
}

/// All the nodes generated by one search. Naturally forms a Search Forest as
/// each node may have a parent Node.
///
/// Nodes are never removed, so indices stay valid for the whole search.
/// Improving a path to a state creates a new node rather than rewriting the
/// old one, as nodes below it may still point at it.
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    /// Adds the root of a search.
    pub fn push_root(&mut self, s: St) -> SearchTreeIndex {
        self.push(SearchTreeNode::new(s, None, C::zero()))
    }

    /// Adds a node reached from `parent` through `a` with a step of cost `c`.
    pub fn push_child(&mut self, parent: SearchTreeIndex, a: A, s: St, c: C) -> SearchTreeIndex {
        let g = self[parent].g.saturating_add(&c);
        self.push(SearchTreeNode::new(s, Some((parent, a)), g))
    }

    #[inline(always)]
    fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<SearchTreeNode<St, A, C>>()
    }

    /// Rebuilds the path from the root to `node_index` following parents.
    #[must_use]
    pub fn path(&self, node_index: SearchTreeIndex) -> Path<St, A, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let end = &self[node_index];
        let mut actions = vec![];
        let mut i = node_index;
        while let Some((parent_index, a)) = &self[i].parent {
            debug_assert!(*parent_index != i);
            actions.push(a.clone());
            i = *parent_index;
        }
        actions.reverse();

        Path {
            start: self[i].state.clone(),
            end: end.state.clone(),
            cost: end.g,
            actions,
        }
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, A, C> std::fmt::Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

/// Limits on how long a search may run.
///
/// Checked once per expansion. Running out ends the search with
/// [`crate::error::SearchError::Aborted`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
}

impl Budget {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Whether another expansion is allowed after `expanded` of them.
    pub fn check(&self, expanded: usize) -> Result<(), AbortReason> {
        if let Some(max) = self.max_expansions {
            if expanded >= max {
                return Err(AbortReason::ExpansionLimit);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(AbortReason::Deadline);
            }
        }
        Ok(())
    }
}

/// Counters describing the work a search did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped and expanded.
    pub expanded: usize,
    /// Successors generated, including duplicates.
    pub generated: usize,
    /// Expansions of states that had been expanded before.
    pub reopened: usize,
    /// Frontier high-water mark.
    pub max_frontier: usize,
    /// Nodes in the search tree.
    pub nodes: usize,
    /// Bytes held by the search tree's nodes.
    pub tree_bytes: usize,
}

impl SearchStats {
    pub fn write_report<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use thousands::Separable;

        writeln!(out, "Search Stats:")?;
        writeln!(out, "  - Expanded:  {}", self.expanded.separate_with_commas())?;
        writeln!(out, "  - Generated: {}", self.generated.separate_with_commas())?;
        writeln!(out, "  - Reopened:  {}", self.reopened.separate_with_commas())?;
        writeln!(
            out,
            "  - |Open|*:   {}",
            self.max_frontier.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            self.nodes.separate_with_commas(),
            Size::from_bytes(self.tree_bytes)
        )?;
        Ok(())
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "expanded={} generated={} reopened={} max_frontier={} nodes={}",
            self.expanded, self.generated, self.reopened, self.max_frontier, self.nodes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_follows_parent_chain() {
        let mut tree = SearchTree::<&str, char, u32>::new();
        let a = tree.push_root("a");
        let b = tree.push_child(a, 'x', "b", 2);
        let _dead_end = tree.push_child(a, 'y', "z", 1);
        let c = tree.push_child(b, 'w', "c", 5);

        assert_eq!(tree.len(), 4);
        assert_eq!(tree[c].g(), 7);

        let p = tree.path(c);
        assert_eq!(p.start, "a");
        assert_eq!(p.end, "c");
        assert_eq!(p.cost, 7);
        assert_eq!(p.actions, vec!['x', 'w']);
    }

    #[test]
    fn path_to_root_is_empty() {
        let mut tree = SearchTree::<u8, u8, u8>::new();
        let root = tree.push_root(9);
        let p = tree.path(root);
        assert!(p.is_empty());
        assert_eq!(p.start, 9);
        assert_eq!(p.end, 9);
        assert_eq!(p.cost, 0);
    }

    #[test]
    fn budget_limits_expansions() {
        let b = Budget::unlimited();
        assert_eq!(b.check(usize::MAX - 1), Ok(()));

        let b = Budget::unlimited().with_max_expansions(3);
        assert_eq!(b.check(2), Ok(()));
        assert_eq!(b.check(3), Err(AbortReason::ExpansionLimit));
    }

    #[test]
    fn budget_deadline() {
        let b = Budget::unlimited().with_deadline(Instant::now());
        assert_eq!(b.check(0), Err(AbortReason::Deadline));

        let b = Budget::unlimited().with_timeout(Duration::from_secs(3600));
        assert_eq!(b.check(0), Ok(()));
    }

    #[test]
    fn stats_report() {
        let stats = SearchStats {
            expanded: 1234,
            generated: 5678,
            ..Default::default()
        };
        let mut out = vec![];
        stats.write_report(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Expanded:  1,234"));
        assert!(out.contains("Generated: 5,678"));
    }
}
