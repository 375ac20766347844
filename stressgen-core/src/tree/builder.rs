//! Shape strategies for [`Tree`] construction.

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    error::{ConfigurationError, Result},
    random::RandomSource,
};

use super::{
    Tree, prufer,
    shape::{TreeShape, shares_are_valid},
};

/// Largest number of hubs drawn by [`TreeBuilder::n_deg_tree`].
const MAX_HUBS: usize = 10;

/// A validated request for a tree on `len` nodes.
///
/// Each strategy consumes the builder, so a tree is generated exactly once
/// per `init`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use stressgen_core::TreeBuilder;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let tree = TreeBuilder::init(100)?.sqrt_height_tree(&mut rng);
/// assert_eq!(tree.len(), 100);
/// assert_eq!(tree.edges().count(), 99);
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeBuilder {
    len: NonZeroUsize,
}

impl TreeBuilder {
    /// Validates `len` and prepares a tree request.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSize`] when `len` is zero.
    pub fn init(len: usize) -> Result<Self> {
        let len = NonZeroUsize::new(len).ok_or(ConfigurationError::InvalidSize { got: len })?;
        Ok(Self { len })
    }

    /// Number of nodes the tree will hold.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Builds the tree described by `shape`.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidPercentages`] for a
    /// [`TreeShape::ChainAndFlower`] whose shares are out of range.
    #[instrument(
        name = "tree.build",
        err,
        skip(self, rng),
        fields(len = self.len(), shape = shape.name()),
    )]
    pub fn build<R: RandomSource>(self, rng: &mut R, shape: TreeShape) -> Result<Tree> {
        if let TreeShape::ChainAndFlower { chain, flower } = shape {
            validate_shares(chain, flower)?;
        }
        let tree = self.generate(rng, shape);
        debug!(leaves = tree.leaves().len(), "tree generated");
        Ok(tree)
    }

    fn generate<R: RandomSource>(self, rng: &mut R, shape: TreeShape) -> Tree {
        match shape {
            TreeShape::SqrtHeight => self.sqrt_height_tree(rng),
            TreeShape::LogHeight => self.log_height_tree(rng),
            TreeShape::Chain => self.chain(),
            TreeShape::Flower => self.flower(),
            TreeShape::NDeg => self.n_deg_tree(rng),
            TreeShape::ChainAndFlower { chain, flower } => self.layered(rng, chain, flower),
        }
    }

    /// Uniformly random labelled tree decoded from a random parent code.
    ///
    /// Expected height is `Θ(√n)`.
    #[must_use]
    pub fn sqrt_height_tree<R: RandomSource>(self, rng: &mut R) -> Tree {
        let len = self.len();
        if len == 1 {
            return Tree::from_parents(vec![None]);
        }
        let code = prufer::random_code(rng, len);
        let decoded = prufer::decode(&code, len);
        Tree::from_parents(prufer::reroot_at_zero(&decoded))
    }

    /// Random recursive tree: each node picks a uniformly random earlier
    /// node as parent. Expected height is `O(log n)`.
    #[must_use]
    pub fn log_height_tree<R: RandomSource>(self, rng: &mut R) -> Tree {
        let mut parent = vec![None; self.len()];
        attach_to_random_predecessor(rng, &mut parent, 1);
        Tree::from_parents(parent)
    }

    /// Path `0 - 1 - ... - (n-1)` rooted at 0.
    #[must_use]
    pub fn chain(self) -> Tree {
        let parent = (0..self.len()).map(|node| node.checked_sub(1)).collect();
        Tree::from_parents(parent)
    }

    /// Star with every node attached to the root.
    #[must_use]
    pub fn flower(self) -> Tree {
        let parent = (0..self.len())
            .map(|node| (node > 0).then_some(0))
            .collect();
        Tree::from_parents(parent)
    }

    /// Shallow tree with a few high-degree hubs.
    ///
    /// Between one and ten distinct hubs are chosen among all nodes; hubs
    /// hang off the root and every other node hangs off a random hub.
    #[must_use]
    pub fn n_deg_tree<R: RandomSource>(self, rng: &mut R) -> Tree {
        let len = self.len();
        let hub_count = rng.next_index(MAX_HUBS.min(len)) + 1;
        let hubs: Vec<usize> = rng
            .random_permutation(len)
            .into_iter()
            .take(hub_count)
            .collect();

        let mut is_hub = vec![false; len];
        for &hub in &hubs {
            is_hub[hub] = true;
        }

        let mut parent = vec![None; len];
        for node in 1..len {
            parent[node] = if is_hub[node] {
                Some(0)
            } else {
                rng.choice(&hubs).copied()
            };
        }
        Tree::from_parents(parent)
    }

    /// Chain prefix of about `chain * n` nodes, a flower of about
    /// `flower * n` nodes attached to the chain's last node, and random
    /// recursive attachment for the rest.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidPercentages`] when either share
    /// is negative or not finite, or their sum exceeds one.
    pub fn chain_and_flower<R: RandomSource>(
        self,
        rng: &mut R,
        chain: f64,
        flower: f64,
    ) -> Result<Tree> {
        validate_shares(chain, flower)?;
        Ok(self.layered(rng, chain, flower))
    }

    fn layered<R: RandomSource>(self, rng: &mut R, chain: f64, flower: f64) -> Tree {
        let len = self.len();
        let chain_end = share_of(len, chain).clamp(1, len);
        let flower_end = share_of(len, chain + flower).clamp(chain_end, len);
        let tail = chain_end - 1;

        let mut parent = vec![None; len];
        for node in 1..chain_end {
            parent[node] = Some(node - 1);
        }
        for slot in &mut parent[chain_end..flower_end] {
            *slot = Some(tail);
        }
        attach_to_random_predecessor(rng, &mut parent, flower_end);
        Tree::from_parents(parent)
    }

    /// Tree with a uniformly chosen shape strategy.
    #[must_use]
    pub fn random_shaped_tree<R: RandomSource>(self, rng: &mut R) -> Tree {
        let shape = TreeShape::random(rng);
        debug!(len = self.len(), shape = shape.name(), "random tree shape selected");
        self.generate(rng, shape)
    }
}

fn attach_to_random_predecessor<R: RandomSource>(
    rng: &mut R,
    parent: &mut [Option<usize>],
    from: usize,
) {
    for node in from..parent.len() {
        parent[node] = Some(rng.next_index(node));
    }
}

fn validate_shares(chain: f64, flower: f64) -> Result<()> {
    if shares_are_valid(chain, flower) {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidPercentages { chain, flower })
    }
}

fn share_of(len: usize, share: f64) -> usize {
    (len as f64 * share) as usize
}
