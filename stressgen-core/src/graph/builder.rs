//! Graph generators.

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    error::{ConfigurationError, Result},
    random::RandomSource,
    sequence::{SequenceBuilder, to_i64},
    tree::TreeBuilder,
};

use super::{
    EdgeOrientation, Graph, max_edges,
    sampling::{PairSpace, fill_random_edges},
};

/// Forests drawn by [`GraphBuilder::random_forest`] have at most this many
/// components unless `n / 1000` is larger.
const MIN_FOREST_COMPONENT_CAP: usize = 10;

/// A validated request for a graph on `len` nodes.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use stressgen_core::GraphBuilder;
///
/// let mut rng = SmallRng::seed_from_u64(5);
/// let graph = GraphBuilder::init(10)?.randomly_gen(&mut rng, 20, false)?;
/// assert_eq!(graph.edge_count(), 20);
/// assert!(graph.edges().iter().all(|(u, v)| u != v));
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphBuilder {
    len: NonZeroUsize,
}

/// A directed acyclic graph together with the topological order its edges
/// respect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dag {
    graph: Graph,
    order: Vec<usize>,
}

impl Dag {
    /// The generated graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Nodes in topological order: every edge `u -> v` has `u` before `v`.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Position of every node within [`Dag::order`].
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        let mut position = vec![0; self.order.len()];
        for (idx, &node) in self.order.iter().enumerate() {
            position[node] = idx;
        }
        position
    }

    /// Drops the order and keeps the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl GraphBuilder {
    /// Validates `len` and prepares a graph request.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSize`] when `len` is zero.
    pub fn init(len: usize) -> Result<Self> {
        let len = NonZeroUsize::new(len).ok_or(ConfigurationError::InvalidSize { got: len })?;
        Ok(Self { len })
    }

    /// Number of nodes the graph will hold.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// `edges` distinct random edges without self-loops.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::TooManyEdges`] when `edges` exceeds
    /// `n(n-1)/2` (undirected) or `n(n-1)` (directed).
    #[instrument(name = "graph.random", err, skip(self, rng), fields(len = self.len()))]
    pub fn randomly_gen<R: RandomSource>(
        self,
        rng: &mut R,
        edges: usize,
        directed: bool,
    ) -> Result<Graph> {
        ensure_capacity(self.len(), edges, directed)?;
        let mut graph = Graph::empty(self.len(), directed);
        fill_random_edges(&mut graph, rng, PairSpace::Any, edges);
        debug!(edges = graph.edge_count(), "random graph generated");
        Ok(graph)
    }

    /// Random DAG with `edges` edges oriented along a random topological
    /// order.
    ///
    /// With `ensure_connected` a random-shaped spanning tree is laid over
    /// the order first, so the underlying undirected graph is connected.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::TooManyEdges`] when `edges` exceeds
    /// `n(n-1)/2`, and [`ConfigurationError::InsufficientEdgeBudget`] when
    /// `ensure_connected` is set and `edges < n - 1`.
    #[instrument(name = "graph.dag", err, skip(self, rng), fields(len = self.len()))]
    pub fn dag<R: RandomSource>(
        self,
        rng: &mut R,
        edges: usize,
        ensure_connected: bool,
    ) -> Result<Dag> {
        let len = self.len();
        let maximum = max_edges(len, false);
        if edges > maximum {
            return Err(ConfigurationError::TooManyEdges {
                requested: edges,
                maximum,
                directed: true,
            });
        }
        if ensure_connected && edges < len - 1 {
            return Err(ConfigurationError::InsufficientEdgeBudget {
                requested: edges,
                required: len - 1,
            });
        }

        let order = rng.random_permutation(len);
        let mut graph = Graph::empty(len, true);
        if ensure_connected {
            // Tree labels are read as positions in `order`.
            let spanning = TreeBuilder::init(len)?.random_shaped_tree(rng);
            for (parent, child) in spanning.edges() {
                graph.insert(order[parent.min(child)], order[parent.max(child)]);
            }
        }
        fill_random_edges(&mut graph, rng, PairSpace::Forward { order: &order }, edges);
        debug!(edges = graph.edge_count(), "dag generated");
        Ok(Dag { graph, order })
    }

    /// Undirected forest with exactly `components` trees.
    ///
    /// Node counts per tree come from a positive fixed-sum split of `n`; each
    /// block holds an independent random-shaped tree, so the forest has
    /// `n - components` edges.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidComponentCount`] unless
    /// `1 <= components <= n`.
    #[instrument(name = "graph.forest", err, skip(self, rng), fields(len = self.len()))]
    pub fn forest<R: RandomSource>(self, rng: &mut R, components: usize) -> Result<Graph> {
        let len = self.len();
        let invalid = ConfigurationError::InvalidComponentCount {
            components,
            nodes: len,
        };
        if components == 0 || components > len {
            return Err(invalid);
        }

        let blocks = SequenceBuilder::init(components)?.constant_sum(
            rng,
            to_i64(len),
            false,
            false,
        )?;
        let mut forest = Graph::empty(0, false);
        for &block in blocks.as_slice() {
            let size = usize::try_from(block).map_err(|_| invalid.clone())?;
            let tree = TreeBuilder::init(size)?.random_shaped_tree(rng);
            forest.absorb(Graph::from_tree(tree, EdgeOrientation::Undirected));
        }
        debug!(
            components,
            edges = forest.edge_count(),
            "forest generated"
        );
        Ok(forest)
    }

    /// Forest whose component count is drawn uniformly from
    /// `1..=min(max(n / 1000, 10), n)`.
    pub fn random_forest<R: RandomSource>(self, rng: &mut R) -> Result<Graph> {
        let len = self.len();
        let cap = (len / 1000).max(MIN_FOREST_COMPONENT_CAP).min(len);
        let components = rng.next_index(cap) + 1;
        self.forest(rng, components)
    }

    /// Undirected lattice that defeats queue-based shortest-path
    /// heuristics, padded with random edges.
    ///
    /// Nodes are laid row-major on a grid `ceil(sqrt n)` columns wide. Each
    /// node links to the node below and to its right-hand neighbour while
    /// budget remains; any leftover budget becomes random edges.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::TooManyEdges`] when `edges` exceeds
    /// `n(n-1)/2`.
    #[instrument(name = "graph.spfa", err, skip(self, rng), fields(len = self.len()))]
    pub fn hack_spfa<R: RandomSource>(self, rng: &mut R, edges: usize) -> Result<Graph> {
        let len = self.len();
        ensure_capacity(len, edges, false)?;
        let cols = ceil_sqrt(len);
        let mut graph = Graph::empty(len, false);
        'grid: for node in 0..len {
            let below = node + cols;
            let right = node + 1;
            let neighbours = [
                (below < len).then_some(below),
                (right % cols != 0 && right < len).then_some(right),
            ];
            for next in neighbours.into_iter().flatten() {
                if graph.edge_count() == edges {
                    break 'grid;
                }
                graph.insert(node, next);
            }
        }
        let lattice = graph.edge_count();
        fill_random_edges(&mut graph, rng, PairSpace::Any, edges);
        debug!(cols, lattice, edges = graph.edge_count(), "lattice graph generated");
        Ok(graph)
    }
}

fn ensure_capacity(nodes: usize, edges: usize, directed: bool) -> Result<()> {
    let maximum = max_edges(nodes, directed);
    if edges > maximum {
        return Err(ConfigurationError::TooManyEdges {
            requested: edges,
            maximum,
            directed,
        });
    }
    Ok(())
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.saturating_mul(root) < n {
        root += 1;
    }
    while root > 1 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root.max(1)
}
