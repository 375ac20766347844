//! Duplicate-free random edge insertion.
//!
//! Sparse requests rejection-sample candidate pairs; each draw succeeds with
//! probability at least one half, so the loop finishes after an expected
//! `2 * needed` draws. Dense requests enumerate every free pair and keep a
//! uniform subset instead.

use tracing::warn;

use crate::random::RandomSource;

use super::{Graph, max_edges};

/// Pairs eligible for insertion.
#[derive(Clone, Copy, Debug)]
pub(super) enum PairSpace<'a> {
    /// Any ordered (directed) or unordered (undirected) pair of distinct nodes.
    Any,
    /// Pairs `order[i] -> order[j]` with `i < j`.
    Forward { order: &'a [usize] },
}

impl PairSpace<'_> {
    fn capacity(&self, graph: &Graph) -> usize {
        match self {
            Self::Any => max_edges(graph.node_count(), graph.is_directed()),
            Self::Forward { order } => max_edges(order.len(), false),
        }
    }

    fn draw<R: RandomSource>(&self, rng: &mut R, nodes: usize) -> (usize, usize) {
        match self {
            Self::Any => (rng.next_index(nodes), rng.next_index(nodes)),
            Self::Forward { order } => {
                let (a, b) = (rng.next_index(nodes), rng.next_index(nodes));
                (order[a.min(b)], order[a.max(b)])
            }
        }
    }

    fn free_pairs(&self, graph: &Graph) -> Vec<(usize, usize)> {
        let nodes = graph.node_count();
        let mut free = Vec::new();
        for first in 0..nodes {
            let second_from = if graph.is_directed() && matches!(self, Self::Any) {
                0
            } else {
                first + 1
            };
            for second in second_from..nodes {
                let (u, v) = match self {
                    Self::Any => (first, second),
                    Self::Forward { order } => (order[first], order[second]),
                };
                if u != v && !graph.exists(u, v) {
                    free.push((u, v));
                }
            }
        }
        free
    }
}

/// Adds random edges from `space` until `graph` holds `target` edges.
///
/// The caller guarantees `target` does not exceed the capacity of `space`.
pub(super) fn fill_random_edges<R: RandomSource>(
    graph: &mut Graph,
    rng: &mut R,
    space: PairSpace<'_>,
    target: usize,
) {
    let present = graph.edge_count();
    if target <= present {
        return;
    }
    let needed = target - present;
    let free = space.capacity(graph).saturating_sub(present);
    debug_assert!(needed <= free);

    if needed > free / 2 {
        warn!(
            needed,
            free, "dense edge request, sampling from enumerated free pairs"
        );
        let mut candidates = space.free_pairs(graph);
        let take = needed.min(candidates.len());
        for slot in 0..take {
            let pick = slot + rng.next_index(candidates.len() - slot);
            candidates.swap(slot, pick);
        }
        for &(u, v) in &candidates[..take] {
            graph.insert(u, v);
        }
        return;
    }

    let nodes = graph.node_count();
    while graph.edge_count() < target {
        let (u, v) = space.draw(rng, nodes);
        graph.insert(u, v);
    }
}
