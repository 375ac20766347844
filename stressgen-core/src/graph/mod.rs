//! Simple graphs: random edge sets, DAGs, forests and lattice-shaped
//! adversarial inputs.
//!
//! A [`Graph`] never holds a self-loop or a duplicate edge. Undirected edges
//! are deduplicated as unordered pairs while the edge list keeps the
//! orientation and order in which edges were inserted.

mod builder;
mod sampling;
mod union_find;

use std::collections::HashSet;

use crate::{
    error::{ConfigurationError, Result},
    tree::Tree,
};

pub use builder::{Dag, GraphBuilder};

use union_find::DisjointSet;

/// How tree edges are oriented by [`Graph::from_tree`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EdgeOrientation {
    /// Undirected `parent - child` edges.
    #[default]
    Undirected,
    /// Directed edges pointing away from the root.
    ParentToChild,
    /// Directed edges pointing towards the root.
    ChildToParent,
}

/// Graph over nodes `0..node_count` without self-loops or duplicate edges.
///
/// # Examples
/// ```
/// use stressgen_core::Graph;
///
/// let left = Graph::init(3, false)?;
/// let right = Graph::init(2, false)?;
/// let joined = left.disjoint_union(right)?;
/// assert_eq!(joined.node_count(), 5);
/// assert_eq!(joined.component_count(), 5);
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    nodes: usize,
    directed: bool,
    edges: Vec<(usize, usize)>,
    index: HashSet<(usize, usize)>,
}

impl Graph {
    /// Edgeless graph on `nodes` nodes.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSize`] when `nodes` is zero.
    pub fn init(nodes: usize, directed: bool) -> Result<Self> {
        if nodes == 0 {
            return Err(ConfigurationError::InvalidSize { got: nodes });
        }
        Ok(Self::empty(nodes, directed))
    }

    pub(crate) fn empty(nodes: usize, directed: bool) -> Self {
        Self {
            nodes,
            directed,
            edges: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Converts `tree` into a graph holding its `n - 1` edges.
    #[must_use]
    pub fn from_tree(tree: Tree, orientation: EdgeOrientation) -> Self {
        let directed = orientation != EdgeOrientation::Undirected;
        let mut graph = Self::empty(tree.len(), directed);
        for (parent, child) in tree.edges() {
            let (source, target) = match orientation {
                EdgeOrientation::Undirected | EdgeOrientation::ParentToChild => (parent, child),
                EdgeOrientation::ChildToParent => (child, parent),
            };
            graph.insert(source, target);
        }
        graph
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether edges are ordered pairs.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Whether the edge `u -> v` (or `u - v` when undirected) is present.
    #[must_use]
    pub fn exists(&self, u: usize, v: usize) -> bool {
        self.index.contains(&self.key(u, v))
    }

    /// Inserts `u -> v` unless it is a self-loop or already present.
    /// Returns whether the edge was added.
    pub(crate) fn insert(&mut self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.nodes && v < self.nodes);
        let key = self.key(u, v);
        if u == v || !self.index.insert(key) {
            return false;
        }
        self.edges.push((u, v));
        true
    }

    /// Places `rhs` beside `self`, shifting its ids by `self.node_count()`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::MixedDirectedness`] when exactly one
    /// operand is directed.
    pub fn disjoint_union(mut self, rhs: Self) -> Result<Self> {
        if self.directed != rhs.directed {
            return Err(ConfigurationError::MixedDirectedness);
        }
        self.absorb(rhs);
        Ok(self)
    }

    pub(crate) fn absorb(&mut self, rhs: Self) {
        let offset = self.nodes;
        self.nodes += rhs.nodes;
        self.edges.reserve(rhs.edges.len());
        for (u, v) in rhs.edges {
            self.insert(u + offset, v + offset);
        }
    }

    /// Number of weakly connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut sets = DisjointSet::new(self.nodes);
        for &(u, v) in &self.edges {
            sets.union(u, v);
        }
        sets.component_count()
    }

    fn key(&self, u: usize, v: usize) -> (usize, usize) {
        if self.directed { (u, v) } else { (u.min(v), u.max(v)) }
    }
}

/// Largest edge count of a simple graph on `nodes` nodes.
pub(crate) fn max_edges(nodes: usize, directed: bool) -> usize {
    let ordered = nodes.saturating_mul(nodes.saturating_sub(1));
    if directed { ordered } else { ordered / 2 }
}
