//! Randomized structured-input generators for stress-testing algorithms.
//!
//! Three builders share one injected [`RandomSource`]:
//!
//! - [`SequenceBuilder`] produces integer sequences under range, order,
//!   fixed-sum and permutation constraints.
//! - [`TreeBuilder`] produces rooted trees from six shape strategies,
//!   including a linear-time uniform random tree decoder.
//! - [`GraphBuilder`] produces simple random graphs, DAGs, forests and
//!   lattice-shaped adversarial graphs, reusing the other two builders for
//!   spanning trees and component sizes.
//!
//! Generated values are written as plain text through [`emit`].
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod emit;
mod error;
mod graph;
pub mod primes;
mod random;
mod sequence;
#[cfg(test)]
mod test_utils;
mod tree;

pub use crate::{
    emit::{EmitOptions, NODE_ID_OFFSET},
    error::{ConfigurationError, ConfigurationErrorCode, OutputError, OutputErrorCode, Result},
    graph::{Dag, EdgeOrientation, Graph, GraphBuilder},
    random::RandomSource,
    sequence::{Sequence, SequenceBuilder},
    tree::{DEFAULT_CHAIN_SHARE, DEFAULT_FLOWER_SHARE, Tree, TreeBuilder, TreeShape},
};
