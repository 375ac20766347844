//! Tree shape strategies and the table-driven random selector.

use crate::random::RandomSource;

/// Tolerance applied when checking that chain and flower shares sum to at
/// most one.
pub(crate) const SHARE_TOLERANCE: f64 = 1e-12;

/// Default chain share used by [`TreeShape::chain_and_flower_default`].
pub const DEFAULT_CHAIN_SHARE: f64 = 0.3;

/// Default flower share used by [`TreeShape::chain_and_flower_default`].
pub const DEFAULT_FLOWER_SHARE: f64 = 0.3;

/// Shape strategy used to build a tree.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use stressgen_core::{TreeBuilder, TreeShape};
///
/// let mut rng = SmallRng::seed_from_u64(9);
/// let tree = TreeBuilder::init(6)?.build(&mut rng, TreeShape::Chain)?;
/// assert_eq!(tree.height(), 5);
/// # Ok::<(), stressgen_core::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TreeShape {
    /// Uniformly random labelled tree, expected height `Θ(√n)`.
    SqrtHeight,
    /// Random recursive tree, expected height `O(log n)`.
    LogHeight,
    /// Path rooted at one end.
    Chain,
    /// Star around the root.
    Flower,
    /// Up to ten hubs under the root holding every other node.
    NDeg,
    /// A chain prefix, a flower hanging off its tail, and a random remainder.
    ChainAndFlower {
        /// Share of nodes on the chain.
        chain: f64,
        /// Share of nodes attached to the chain's last node.
        flower: f64,
    },
}

/// Shape kinds sampled by [`TreeShape::random`], one entry per strategy.
const SHAPE_TABLE: [ShapeKind; 6] = [
    ShapeKind::SqrtHeight,
    ShapeKind::LogHeight,
    ShapeKind::Chain,
    ShapeKind::Flower,
    ShapeKind::NDeg,
    ShapeKind::ChainAndFlower,
];

#[derive(Clone, Copy, Debug)]
enum ShapeKind {
    SqrtHeight,
    LogHeight,
    Chain,
    Flower,
    NDeg,
    ChainAndFlower,
}

impl TreeShape {
    /// Chain-and-flower with the default 30%/30% split.
    #[must_use]
    pub const fn chain_and_flower_default() -> Self {
        Self::ChainAndFlower {
            chain: DEFAULT_CHAIN_SHARE,
            flower: DEFAULT_FLOWER_SHARE,
        }
    }

    /// Picks one of the six strategies uniformly.
    ///
    /// The composite strategy draws its chain share skewed towards one
    /// (maximum of three uniform draws) and its flower share uniformly from
    /// what remains.
    pub fn random<R: RandomSource>(rng: &mut R) -> Self {
        let kind = SHAPE_TABLE[rng.next_index(SHAPE_TABLE.len())];
        match kind {
            ShapeKind::SqrtHeight => Self::SqrtHeight,
            ShapeKind::LogHeight => Self::LogHeight,
            ShapeKind::Chain => Self::Chain,
            ShapeKind::Flower => Self::Flower,
            ShapeKind::NDeg => Self::NDeg,
            ShapeKind::ChainAndFlower => {
                let chain = rng.weighted_next(0.0, 1.0, 2);
                let flower = rng.next_real(0.0, 1.0 - chain).min(1.0 - chain);
                Self::ChainAndFlower { chain, flower }
            }
        }
    }

    /// Short stable name used in logs and on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SqrtHeight => "sqrt-height",
            Self::LogHeight => "log-height",
            Self::Chain => "chain",
            Self::Flower => "flower",
            Self::NDeg => "n-deg",
            Self::ChainAndFlower { .. } => "chain-and-flower",
        }
    }
}

pub(crate) fn shares_are_valid(chain: f64, flower: f64) -> bool {
    chain.is_finite()
        && flower.is_finite()
        && chain >= 0.0
        && flower >= 0.0
        && chain + flower <= 1.0 + SHARE_TOLERANCE
}
