//! Command definitions and execution for the stressgen CLI.

use std::io::Write;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use stressgen_core::{
    ConfigurationError, DEFAULT_CHAIN_SHARE, DEFAULT_FLOWER_SHARE, EmitOptions, GraphBuilder,
    OutputError, SequenceBuilder, TreeBuilder, TreeShape,
    emit::{emit_graph, emit_line, emit_sequence, emit_tree},
    primes::random_prime,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "stressgen", about = "Generate randomized stress-test inputs.")]
pub struct Cli {
    /// Seed for the random source; drawn from system entropy when omitted.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Generator to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported generators.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Emit a rooted tree as `child parent` lines.
    Tree(TreeArgs),
    /// Emit a graph as `u v` lines.
    Graph(GraphArgs),
    /// Emit an integer sequence on one line.
    Array(ArrayArgs),
    /// Emit a random prime from a closed range.
    Prime(PrimeArgs),
}

/// Options accepted by the `tree` command.
#[derive(Debug, Args, Clone)]
pub struct TreeArgs {
    /// Number of nodes.
    pub nodes: usize,

    /// Shape strategy.
    #[arg(long, value_enum, default_value_t = ShapeArg::Random)]
    pub shape: ShapeArg,

    /// Share of nodes on the chain for `--shape chain-and-flower`.
    #[arg(long, default_value_t = DEFAULT_CHAIN_SHARE)]
    pub chain: f64,

    /// Share of nodes on the flower for `--shape chain-and-flower`.
    #[arg(long, default_value_t = DEFAULT_FLOWER_SHARE)]
    pub flower: f64,

    /// Output formatting.
    #[command(flatten)]
    pub output: EdgeOutput,
}

/// Tree shapes selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// Pick a shape at random.
    Random,
    /// Uniform random labelled tree.
    SqrtHeight,
    /// Random recursive tree.
    LogHeight,
    /// Path.
    Chain,
    /// Star.
    Flower,
    /// A few hubs under the root.
    NDeg,
    /// Chain prefix, flower, random remainder.
    ChainAndFlower,
}

impl ShapeArg {
    fn resolve(self, chain: f64, flower: f64) -> Option<TreeShape> {
        match self {
            Self::Random => None,
            Self::SqrtHeight => Some(TreeShape::SqrtHeight),
            Self::LogHeight => Some(TreeShape::LogHeight),
            Self::Chain => Some(TreeShape::Chain),
            Self::Flower => Some(TreeShape::Flower),
            Self::NDeg => Some(TreeShape::NDeg),
            Self::ChainAndFlower => Some(TreeShape::ChainAndFlower { chain, flower }),
        }
    }
}

/// Output options shared by the tree and graph commands.
#[derive(Debug, Args, Clone, Default)]
pub struct EdgeOutput {
    /// Relabel nodes and emit lines in random order.
    #[arg(long)]
    pub shuffle: bool,

    /// Smallest edge weight; weights are emitted when both bounds are set.
    #[arg(long, requires = "max_weight", allow_negative_numbers = true)]
    pub min_weight: Option<i64>,

    /// Largest edge weight.
    #[arg(long, requires = "min_weight", allow_negative_numbers = true)]
    pub max_weight: Option<i64>,

    /// Omit the size header line.
    #[arg(long)]
    pub no_header: bool,
}

impl EdgeOutput {
    fn draw_weights(
        &self,
        rng: &mut SmallRng,
        count: usize,
    ) -> Result<Option<Vec<i64>>, CliError> {
        let (Some(lo), Some(hi)) = (self.min_weight, self.max_weight) else {
            return Ok(None);
        };
        if lo > hi {
            return Err(ConfigurationError::InvalidRange { lo, hi }.into());
        }
        if count == 0 {
            return Ok(Some(Vec::new()));
        }
        let weights = SequenceBuilder::init(count)?.basic_gen(rng, lo, hi)?;
        Ok(Some(weights.into_vec()))
    }

    fn options<'a>(&self, weights: Option<&'a [i64]>) -> EmitOptions<'a> {
        EmitOptions {
            shuffled: self.shuffle,
            weights,
        }
    }
}

/// Options accepted by the `graph` command.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Graph generator.
    #[command(subcommand)]
    pub kind: GraphKind,
}

/// Graph generators.
#[derive(Debug, Subcommand, Clone)]
pub enum GraphKind {
    /// Uniformly random simple graph.
    Random {
        /// Number of nodes.
        nodes: usize,
        /// Number of edges.
        edges: usize,
        /// Emit ordered pairs.
        #[arg(long)]
        directed: bool,
        /// Output formatting.
        #[command(flatten)]
        output: EdgeOutput,
    },
    /// Random directed acyclic graph.
    Dag {
        /// Number of nodes.
        nodes: usize,
        /// Number of edges.
        edges: usize,
        /// Lay a spanning tree first so the graph is weakly connected.
        #[arg(long)]
        connected: bool,
        /// Output formatting.
        #[command(flatten)]
        output: EdgeOutput,
    },
    /// Forest of random-shaped trees.
    Forest {
        /// Number of nodes.
        nodes: usize,
        /// Number of trees; drawn at random when omitted.
        #[arg(long)]
        components: Option<usize>,
        /// Output formatting.
        #[command(flatten)]
        output: EdgeOutput,
    },
    /// Grid lattice padded with random edges.
    Spfa {
        /// Number of nodes.
        nodes: usize,
        /// Number of edges.
        edges: usize,
        /// Output formatting.
        #[command(flatten)]
        output: EdgeOutput,
    },
}

/// Options accepted by the `array` command.
#[derive(Debug, Args, Clone)]
pub struct ArrayArgs {
    /// Sequence generator.
    #[command(subcommand)]
    pub kind: ArrayKind,
}

/// Sequence generators.
#[derive(Debug, Subcommand, Clone)]
pub enum ArrayKind {
    /// Independent uniform values in `[lo, hi]`.
    Basic {
        /// Number of values.
        len: usize,
        /// Smallest value.
        #[arg(allow_negative_numbers = true)]
        lo: i64,
        /// Largest value.
        #[arg(allow_negative_numbers = true)]
        hi: i64,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
    /// Uniform zeros and ones.
    Binary {
        /// Number of values.
        len: usize,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
    /// Non-decreasing values in `[lo, hi]`.
    Ascending {
        /// Number of values.
        len: usize,
        /// Smallest value.
        #[arg(allow_negative_numbers = true)]
        lo: i64,
        /// Largest value.
        #[arg(allow_negative_numbers = true)]
        hi: i64,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
    /// Non-increasing values in `[lo, hi]`.
    Descending {
        /// Number of values.
        len: usize,
        /// Smallest value.
        #[arg(allow_negative_numbers = true)]
        lo: i64,
        /// Largest value.
        #[arg(allow_negative_numbers = true)]
        hi: i64,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
    /// Values summing exactly to `sum`.
    ConstantSum {
        /// Number of values.
        len: usize,
        /// Required total.
        #[arg(allow_negative_numbers = true)]
        sum: i64,
        /// Permit zero entries.
        #[arg(long)]
        allow_zero: bool,
        /// Permit negative entries.
        #[arg(long)]
        allow_negative: bool,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
    /// Permutation of `1..=len`.
    Permutation {
        /// Number of values.
        len: usize,
        /// Output formatting.
        #[command(flatten)]
        output: SequenceOutput,
    },
}

/// Output options for the `array` command.
#[derive(Debug, Args, Clone)]
pub struct SequenceOutput {
    /// Separator placed between values.
    #[arg(long, default_value = " ")]
    pub separator: String,

    /// Add zero-sum noise with the given amplitude; the total is unchanged.
    #[arg(long, value_name = "AMPLITUDE")]
    pub perturb: Option<u32>,

    /// Shuffle the values before emitting them.
    #[arg(long)]
    pub shuffle: bool,

    /// Omit the length header line.
    #[arg(long)]
    pub no_header: bool,
}

/// Options accepted by the `prime` command.
#[derive(Debug, Args, Clone)]
pub struct PrimeArgs {
    /// Lower bound of the search range.
    #[arg(allow_negative_numbers = true)]
    pub lo: i64,
    /// Upper bound of the search range.
    #[arg(allow_negative_numbers = true)]
    pub hi: i64,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The generation request can never be satisfied.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Writing the generated structure failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl CliError {
    /// Stable machine-readable code of the underlying error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(error) => error.code().as_str(),
            Self::Output(error) => error.code().as_str(),
        }
    }
}

/// Outcome of a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed the random source was initialised with.
    pub seed: u64,
    /// Name of the command that ran.
    pub command: &'static str,
}

/// Executes `cli`, writing the generated structure to `writer`.
///
/// # Errors
/// Returns [`CliError`] when the request is infeasible or writing fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use stressgen_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["stressgen", "--seed", "7", "tree", "4", "--shape", "chain"]);
/// let mut out: Vec<u8> = Vec::new();
/// let summary = run_cli(cli, &mut out)?;
/// assert_eq!(summary.seed, 7);
/// assert_eq!(String::from_utf8(out)?, "4\n2 1\n3 2\n4 3\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, writer),
    fields(seed = field::Empty, command = field::Empty),
)]
pub fn run_cli<W>(cli: Cli, writer: &mut W) -> Result<RunSummary, CliError>
where
    W: Write + ?Sized,
{
    let seed = cli.seed.unwrap_or_else(rand::random);
    let span = Span::current();
    span.record("seed", seed);
    info!(seed, "random source seeded");
    let mut rng = SmallRng::seed_from_u64(seed);

    let command = match cli.command {
        Command::Tree(args) => {
            run_tree(args, &mut rng, writer)?;
            "tree"
        }
        Command::Graph(args) => {
            run_graph(args, &mut rng, writer)?;
            "graph"
        }
        Command::Array(args) => {
            run_array(args, &mut rng, writer)?;
            "array"
        }
        Command::Prime(args) => {
            run_prime(&args, &mut rng, writer)?;
            "prime"
        }
    };
    span.record("command", command);
    Ok(RunSummary { seed, command })
}

#[instrument(name = "cli.tree", err, skip_all, fields(nodes = args.nodes))]
pub(super) fn run_tree<W>(
    args: TreeArgs,
    rng: &mut SmallRng,
    writer: &mut W,
) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    let builder = TreeBuilder::init(args.nodes)?;
    let tree = match args.shape.resolve(args.chain, args.flower) {
        Some(shape) => builder.build(rng, shape)?,
        None => builder.random_shaped_tree(rng),
    };
    info!(
        nodes = tree.len(),
        height = tree.height(),
        leaves = tree.leaves().len(),
        "tree generated"
    );

    if !args.output.no_header {
        emit_line(writer, [tree.len()])?;
    }
    let weights = args.output.draw_weights(rng, tree.len())?;
    emit_tree(writer, &tree, args.output.options(weights.as_deref()), rng)?;
    Ok(())
}

#[instrument(name = "cli.graph", err, skip_all)]
pub(super) fn run_graph<W>(
    args: GraphArgs,
    rng: &mut SmallRng,
    writer: &mut W,
) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    let (graph, output) = match args.kind {
        GraphKind::Random {
            nodes,
            edges,
            directed,
            output,
        } => (
            GraphBuilder::init(nodes)?.randomly_gen(rng, edges, directed)?,
            output,
        ),
        GraphKind::Dag {
            nodes,
            edges,
            connected,
            output,
        } => (
            GraphBuilder::init(nodes)?
                .dag(rng, edges, connected)?
                .into_graph(),
            output,
        ),
        GraphKind::Forest {
            nodes,
            components,
            output,
        } => {
            let builder = GraphBuilder::init(nodes)?;
            let forest = match components {
                Some(components) => builder.forest(rng, components)?,
                None => builder.random_forest(rng)?,
            };
            (forest, output)
        }
        GraphKind::Spfa {
            nodes,
            edges,
            output,
        } => (GraphBuilder::init(nodes)?.hack_spfa(rng, edges)?, output),
    };
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        components = graph.component_count(),
        "graph generated"
    );

    if !output.no_header {
        emit_line(writer, [graph.node_count(), graph.edge_count()])?;
    }
    let weights = output.draw_weights(rng, graph.edge_count())?;
    emit_graph(writer, &graph, output.options(weights.as_deref()), rng)?;
    Ok(())
}

#[instrument(name = "cli.array", err, skip_all)]
pub(super) fn run_array<W>(
    args: ArrayArgs,
    rng: &mut SmallRng,
    writer: &mut W,
) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    let (mut sequence, output) = match args.kind {
        ArrayKind::Basic {
            len,
            lo,
            hi,
            output,
        } => (SequenceBuilder::init(len)?.basic_gen(rng, lo, hi)?, output),
        ArrayKind::Binary { len, output } => (SequenceBuilder::init(len)?.binary_gen(rng), output),
        ArrayKind::Ascending {
            len,
            lo,
            hi,
            output,
        } => (
            SequenceBuilder::init(len)?.ascending_array(rng, lo, hi)?,
            output,
        ),
        ArrayKind::Descending {
            len,
            lo,
            hi,
            output,
        } => (
            SequenceBuilder::init(len)?.descending_array(rng, lo, hi)?,
            output,
        ),
        ArrayKind::ConstantSum {
            len,
            sum,
            allow_zero,
            allow_negative,
            output,
        } => (
            SequenceBuilder::init(len)?.constant_sum(rng, sum, allow_zero, allow_negative)?,
            output,
        ),
        ArrayKind::Permutation { len, output } => {
            (SequenceBuilder::init(len)?.permutation(rng), output)
        }
    };
    if let Some(amplitude) = output.perturb {
        sequence.perturbe(rng, amplitude);
    }
    if output.shuffle {
        sequence.shuffle(rng);
    }
    info!(len = sequence.len(), sum = %sequence.sum(), "sequence generated");

    if !output.no_header {
        emit_line(writer, [sequence.len()])?;
    }
    emit_sequence(writer, &sequence, &output.separator)?;
    Ok(())
}

#[instrument(name = "cli.prime", err, skip(rng, writer))]
pub(super) fn run_prime<W>(
    args: &PrimeArgs,
    rng: &mut SmallRng,
    writer: &mut W,
) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    let prime = random_prime(rng, args.lo, args.hi)?;
    emit_line(writer, [prime])?;
    Ok(())
}
