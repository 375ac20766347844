//! Error types for the stressgen core library.
//!
//! Generation requests that can never succeed surface as
//! [`ConfigurationError`]; failures while writing generated structures surface
//! as [`OutputError`]. Both carry stable machine-readable codes so the hosting
//! harness can report them without matching on display strings.

use std::{fmt, io};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A generation request that is structurally impossible to satisfy.
///
/// Every bounded rejection loop in the crate checks its feasibility
/// precondition first and reports a violation through this type instead of
/// retrying forever.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// Structures must contain at least one element.
    #[error("size must be at least 1 (got {got})")]
    InvalidSize {
        /// The rejected size.
        got: usize,
    },
    /// Chain and flower shares must be finite, non-negative and sum to at most 1.
    #[error("chain share {chain} and flower share {flower} must be non-negative and sum to at most 1")]
    InvalidPercentages {
        /// Requested share of chain nodes.
        chain: f64,
        /// Requested share of flower nodes.
        flower: f64,
    },
    /// More edges were requested than a simple graph on the nodes can hold.
    #[error("requested {requested} edges but the simple graph allows at most {maximum} (directed={directed})")]
    TooManyEdges {
        /// Requested edge count.
        requested: usize,
        /// Largest feasible edge count.
        maximum: usize,
        /// Whether the graph is directed.
        directed: bool,
    },
    /// Fewer edges were requested than the spanning structure consumes.
    #[error("requested {requested} edges but at least {required} are needed to connect the graph")]
    InsufficientEdgeBudget {
        /// Requested edge count.
        requested: usize,
        /// Minimum edge count needed.
        required: usize,
    },
    /// A forest needs between one and `nodes` components.
    #[error("cannot split {nodes} nodes into {components} components")]
    InvalidComponentCount {
        /// Requested component count.
        components: usize,
        /// Available node count.
        nodes: usize,
    },
    /// A closed value range was empty.
    #[error("value range [{lo}, {hi}] is empty")]
    InvalidRange {
        /// Lower bound.
        lo: i64,
        /// Upper bound.
        hi: i64,
    },
    /// No sequence of `size` values in the requested domain sums to `sum`.
    #[error(
        "no {size} values sum to {sum} (accept_zero={accept_zero}, accept_negative={accept_negative})"
    )]
    InfeasibleSum {
        /// Target sum.
        sum: i64,
        /// Sequence length.
        size: usize,
        /// Whether zero entries were allowed.
        accept_zero: bool,
        /// Whether negative entries were allowed.
        accept_negative: bool,
    },
    /// The bounded prime search gave up.
    #[error("no prime found in [{lo}, {hi}] after {attempts} attempts")]
    PrimeNotFound {
        /// Lower bound of the search range.
        lo: i64,
        /// Upper bound of the search range.
        hi: i64,
        /// Number of attempts made.
        attempts: usize,
    },
    /// Directed and undirected graphs cannot be joined.
    #[error("cannot join a directed graph with an undirected graph")]
    MixedDirectedness,
}

define_error_codes! {
    /// Stable codes describing [`ConfigurationError`] variants.
    enum ConfigurationErrorCode for ConfigurationError {
        /// Structures must contain at least one element.
        InvalidSize => InvalidSize { .. } => "STRESSGEN_INVALID_SIZE",
        /// Chain and flower shares were out of range.
        InvalidPercentages => InvalidPercentages { .. } => "STRESSGEN_INVALID_PERCENTAGES",
        /// More edges were requested than a simple graph allows.
        TooManyEdges => TooManyEdges { .. } => "STRESSGEN_TOO_MANY_EDGES",
        /// Fewer edges were requested than the spanning structure consumes.
        InsufficientEdgeBudget => InsufficientEdgeBudget { .. } => "STRESSGEN_INSUFFICIENT_EDGE_BUDGET",
        /// A forest component count was out of range.
        InvalidComponentCount => InvalidComponentCount { .. } => "STRESSGEN_INVALID_COMPONENT_COUNT",
        /// A closed value range was empty.
        InvalidRange => InvalidRange { .. } => "STRESSGEN_INVALID_RANGE",
        /// A fixed-sum request was infeasible.
        InfeasibleSum => InfeasibleSum { .. } => "STRESSGEN_INFEASIBLE_SUM",
        /// The bounded prime search gave up.
        PrimeNotFound => PrimeNotFound { .. } => "STRESSGEN_PRIME_NOT_FOUND",
        /// Directed and undirected graphs cannot be joined.
        MixedDirectedness => MixedDirectedness => "STRESSGEN_MIXED_DIRECTEDNESS",
    }
}

/// Failure raised while emitting a generated structure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OutputError {
    /// An auxiliary weight array did not match the structure it annotates.
    #[error("weights has length {got} but {expected} entries were expected")]
    WeightLengthMismatch {
        /// Expected number of weights.
        expected: usize,
        /// Supplied number of weights.
        got: usize,
    },
    /// The underlying writer failed.
    #[error("failed to write generated output: {source}")]
    Io {
        /// Error reported by the writer.
        #[from]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`OutputError`] variants.
    enum OutputErrorCode for OutputError {
        /// An auxiliary weight array did not match the structure it annotates.
        WeightLengthMismatch => WeightLengthMismatch { .. } => "STRESSGEN_WEIGHT_LENGTH_MISMATCH",
        /// The underlying writer failed.
        Io => Io { .. } => "STRESSGEN_OUTPUT_IO",
    }
}

/// Convenient alias for results returned by the generators.
pub type Result<T> = core::result::Result<T, ConfigurationError>;
