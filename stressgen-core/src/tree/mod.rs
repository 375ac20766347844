//! Parent-pointer trees built from a family of shape strategies.
//!
//! Node ids are zero-based and node 0 is always the root. Trees are created
//! through [`TreeBuilder`]; once built they are immutable and can be emitted
//! or converted into a [`crate::Graph`].

mod builder;
mod prufer;
mod shape;

pub use builder::TreeBuilder;
pub use shape::{DEFAULT_CHAIN_SHARE, DEFAULT_FLOWER_SHARE, TreeShape};

/// Parent-pointer tree over nodes `0..len`.
///
/// # Examples
/// ```
/// use stressgen_core::TreeBuilder;
///
/// let tree = TreeBuilder::init(4)?.flower();
/// assert_eq!(tree.root(), 0);
/// assert_eq!(tree.leaves(), vec![1, 2, 3]);
/// assert_eq!(tree.edges().count(), 3);
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    parent: Vec<Option<usize>>,
}

impl Tree {
    pub(crate) fn from_parents(parent: Vec<Option<usize>>) -> Self {
        debug_assert!(!parent.is_empty());
        debug_assert_eq!(parent.first(), Some(&None));
        Self { parent }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Trees always contain at least the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> usize {
        0
    }

    /// Parent of `node`, or `None` for the root and out-of-range ids.
    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent.get(node).copied().flatten()
    }

    /// Borrow the parent pointers.
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parent
    }

    /// `(parent, child)` pairs for every non-root node, in child order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(child, up)| up.map(|parent| (parent, child)))
    }

    /// Number of children per node.
    #[must_use]
    pub fn children_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.len()];
        for (parent, _) in self.edges() {
            counts[parent] += 1;
        }
        counts
    }

    /// Sorted nodes without children.
    #[must_use]
    pub fn leaves(&self) -> Vec<usize> {
        self.children_counts()
            .iter()
            .enumerate()
            .filter_map(|(node, count)| (*count == 0).then_some(node))
            .collect()
    }

    /// Distance from each node to the root, in edges.
    ///
    /// Parent pointers may point at higher ids, so depths are resolved by
    /// walking up to the nearest node whose depth is already known.
    #[must_use]
    pub fn depths(&self) -> Vec<usize> {
        let mut depth: Vec<Option<usize>> = vec![None; self.len()];
        depth[self.root()] = Some(0);
        let mut pending = Vec::new();
        for start in 0..self.len() {
            let mut node = start;
            while depth[node].is_none() {
                pending.push(node);
                match self.parent[node] {
                    Some(up) => node = up,
                    None => {
                        depth[node] = Some(0);
                    }
                }
            }
            let mut known = depth[node].unwrap_or(0);
            while let Some(visited) = pending.pop() {
                if depth[visited].is_none() {
                    known += 1;
                    depth[visited] = Some(known);
                } else {
                    known = depth[visited].unwrap_or(known);
                }
            }
        }
        depth.into_iter().map(|value| value.unwrap_or(0)).collect()
    }

    /// Largest depth of any node.
    #[must_use]
    pub fn height(&self) -> usize {
        self.depths().into_iter().max().unwrap_or(0)
    }
}
