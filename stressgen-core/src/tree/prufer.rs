//! Linear-time decoding of a parent code into a uniformly random labelled
//! tree.
//!
//! The decoder walks a pointer over candidate leaves in increasing order.
//! Each step attaches the smallest unused degree-zero node to the next code
//! entry; when that entry's remaining degree drops to zero and it sits below
//! the pointer, it is attached immediately to the following entry instead of
//! waiting for the pointer to come back. The node `size - 1` is the implicit
//! final parent and ends up as the root.

use crate::random::RandomSource;

/// Draws a random parent code of length `size - 2` over `[0, size)`.
pub(super) fn random_code<R: RandomSource>(rng: &mut R, size: usize) -> Vec<usize> {
    (0..size.saturating_sub(2))
        .map(|_| rng.next_index(size))
        .collect()
}

/// Decodes `code` into parent pointers rooted at `size - 1`.
///
/// `code` must hold `size - 2` entries in `[0, size)` and `size` must be at
/// least 2.
pub(super) fn decode(code: &[usize], size: usize) -> Vec<Option<usize>> {
    debug_assert!(size >= 2);
    debug_assert_eq!(code.len(), size - 2);

    let root = size - 1;
    let code_at = |idx: usize| code.get(idx).copied().unwrap_or(root);

    let mut degree = vec![0_usize; size];
    for &entry in code {
        degree[entry] += 1;
    }

    let mut parent = vec![None; size];
    let mut leaf = 0;
    let mut idx = 0;
    while idx < size - 1 {
        while degree[leaf] > 0 {
            leaf += 1;
        }
        parent[leaf] = Some(code_at(idx));

        while idx < code.len() {
            let released = code[idx];
            degree[released] -= 1;
            if degree[released] != 0 || released >= leaf {
                break;
            }
            parent[released] = Some(code_at(idx + 1));
            idx += 1;
        }

        idx += 1;
        leaf += 1;
    }
    parent
}

/// Swaps the labels `0` and `size - 1` so the decoded root becomes node 0.
pub(super) fn reroot_at_zero(parent: &[Option<usize>]) -> Vec<Option<usize>> {
    let last = parent.len() - 1;
    let swap = |node: usize| match node {
        0 => last,
        n if n == last => 0,
        n => n,
    };

    let mut relabelled = vec![None; parent.len()];
    for (node, up) in parent.iter().enumerate() {
        relabelled[swap(node)] = up.map(swap);
    }
    relabelled
}
