//! Plain-text emission of generated structures.
//!
//! Algorithms use zero-based node ids; output is one-based. The shift is
//! applied here and nowhere else.

use std::{fmt::Display, io::Write};

use tracing::debug;

use crate::{
    error::OutputError, graph::Graph, random::RandomSource, sequence::Sequence, tree::Tree,
};

/// Added to every node id on output.
pub const NODE_ID_OFFSET: usize = 1;

/// Options shared by [`emit_tree`] and [`emit_graph`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EmitOptions<'a> {
    /// Relabel nodes through a random permutation and emit lines in random
    /// order.
    pub shuffled: bool,
    /// Optional weight appended to each edge line.
    pub weights: Option<&'a [i64]>,
}

impl<'a> EmitOptions<'a> {
    /// Shuffled output without weights.
    #[must_use]
    pub fn shuffled() -> Self {
        Self {
            shuffled: true,
            weights: None,
        }
    }

    /// Appends `weights` to the edge lines.
    #[must_use]
    pub fn with_weights(mut self, weights: &'a [i64]) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Writes `tokens` separated by single spaces, followed by a newline.
///
/// # Errors
/// Returns [`OutputError::Io`] when the writer fails.
///
/// # Examples
/// ```
/// use stressgen_core::emit::emit_line;
///
/// let mut out: Vec<u8> = Vec::new();
/// emit_line(&mut out, [3, 1, 4])?;
/// assert_eq!(out, b"3 1 4\n");
/// # Ok::<(), stressgen_core::OutputError>(())
/// ```
pub fn emit_line<W, I>(writer: &mut W, tokens: I) -> Result<(), OutputError>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Display,
{
    write_joined(writer, tokens, " ")
}

/// Writes one `child parent [weight]` line per non-root node.
///
/// `weights`, when given, holds one entry per node: `weights[v]` belongs to
/// the edge between `v` and its parent and the root's entry is ignored.
///
/// # Errors
/// Returns [`OutputError::WeightLengthMismatch`] when `weights` does not
/// hold exactly `tree.len()` entries, and [`OutputError::Io`] when the
/// writer fails.
pub fn emit_tree<W, R>(
    writer: &mut W,
    tree: &Tree,
    options: EmitOptions<'_>,
    rng: &mut R,
) -> Result<(), OutputError>
where
    W: Write + ?Sized,
    R: RandomSource,
{
    check_weights(options.weights, tree.len())?;
    let label = labels(tree.len(), options.shuffled, rng);
    let mut children: Vec<usize> = (0..tree.len())
        .filter(|&node| node != tree.root())
        .collect();
    if options.shuffled {
        rng.shuffle(&mut children);
    }

    for &child in &children {
        let Some(parent) = tree.parent(child) else {
            continue;
        };
        let weight = options.weights.map(|weights| weights[child]);
        write_edge(writer, [label[child], label[parent]], weight)?;
    }
    debug!(lines = children.len(), "tree emitted");
    Ok(())
}

/// Writes one `u v [weight]` line per edge.
///
/// `weights`, when given, holds one entry per edge in [`Graph::edges`]
/// order.
///
/// # Errors
/// Returns [`OutputError::WeightLengthMismatch`] when `weights` does not
/// hold exactly `graph.edge_count()` entries, and [`OutputError::Io`] when
/// the writer fails.
pub fn emit_graph<W, R>(
    writer: &mut W,
    graph: &Graph,
    options: EmitOptions<'_>,
    rng: &mut R,
) -> Result<(), OutputError>
where
    W: Write + ?Sized,
    R: RandomSource,
{
    check_weights(options.weights, graph.edge_count())?;
    let label = labels(graph.node_count(), options.shuffled, rng);
    let mut lines: Vec<usize> = (0..graph.edge_count()).collect();
    if options.shuffled {
        rng.shuffle(&mut lines);
    }

    let edges = graph.edges();
    for &idx in &lines {
        let (u, v) = edges[idx];
        let weight = options.weights.map(|weights| weights[idx]);
        write_edge(writer, [label[u], label[v]], weight)?;
    }
    debug!(lines = lines.len(), "graph emitted");
    Ok(())
}

/// Writes the values of `sequence` on one line joined by `separator`.
///
/// # Errors
/// Returns [`OutputError::Io`] when the writer fails.
pub fn emit_sequence<W>(
    writer: &mut W,
    sequence: &Sequence,
    separator: &str,
) -> Result<(), OutputError>
where
    W: Write + ?Sized,
{
    write_joined(writer, sequence.as_slice(), separator)
}

fn write_joined<W, I>(writer: &mut W, tokens: I, separator: &str) -> Result<(), OutputError>
where
    W: Write + ?Sized,
    I: IntoIterator,
    I::Item: Display,
{
    for (idx, token) in tokens.into_iter().enumerate() {
        if idx > 0 {
            writer.write_all(separator.as_bytes())?;
        }
        write!(writer, "{token}")?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

fn write_edge<W>(
    writer: &mut W,
    endpoints: [usize; 2],
    weight: Option<i64>,
) -> Result<(), OutputError>
where
    W: Write + ?Sized,
{
    let [u, v] = endpoints.map(|node| node + NODE_ID_OFFSET);
    match weight {
        Some(weight) => writeln!(writer, "{u} {v} {weight}")?,
        None => writeln!(writer, "{u} {v}")?,
    }
    Ok(())
}

fn check_weights(weights: Option<&[i64]>, expected: usize) -> Result<(), OutputError> {
    match weights {
        Some(weights) if weights.len() != expected => Err(OutputError::WeightLengthMismatch {
            expected,
            got: weights.len(),
        }),
        _ => Ok(()),
    }
}

fn labels<R: RandomSource>(nodes: usize, shuffled: bool, rng: &mut R) -> Vec<usize> {
    if shuffled {
        rng.random_permutation(nodes)
    } else {
        (0..nodes).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::{EdgeOrientation, SequenceBuilder, TreeBuilder};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(41)
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("emission is ASCII")
    }

    #[test]
    fn tree_lines_are_one_based_child_parent_pairs() {
        let tree = TreeBuilder::init(3).expect("length is valid").chain();
        let mut out = Vec::new();
        emit_tree(&mut out, &tree, EmitOptions::default(), &mut rng()).expect("write succeeds");
        assert_eq!(text(out), "2 1\n3 2\n");
    }

    #[test]
    fn tree_weights_follow_the_child() {
        let tree = TreeBuilder::init(3).expect("length is valid").flower();
        let weights = [0, 7, 9];
        let mut out = Vec::new();
        emit_tree(
            &mut out,
            &tree,
            EmitOptions::default().with_weights(&weights),
            &mut rng(),
        )
        .expect("write succeeds");
        assert_eq!(text(out), "2 1 7\n3 1 9\n");
    }

    #[rstest]
    #[case(2)]
    #[case(4)]
    fn tree_weight_length_must_match_node_count(#[case] got: usize) {
        let tree = TreeBuilder::init(3).expect("length is valid").chain();
        let weights = vec![1_i64; got];
        let err = emit_tree(
            &mut Vec::<u8>::new(),
            &tree,
            EmitOptions::default().with_weights(&weights),
            &mut rng(),
        )
        .expect_err("length mismatch");
        assert!(matches!(
            err,
            OutputError::WeightLengthMismatch { expected: 3, got: g } if g == got
        ));
    }

    #[test]
    fn shuffled_tree_keeps_edge_structure() {
        let tree = TreeBuilder::init(50).expect("length is valid").flower();
        let mut out = Vec::new();
        emit_tree(&mut out, &tree, EmitOptions::shuffled(), &mut rng()).expect("write succeeds");
        let output = text(out);
        let lines: Vec<(usize, usize)> = output
            .lines()
            .map(|line| {
                let mut ids = line.split(' ').map(|id| id.parse::<usize>().expect("numeric id"));
                (ids.next().expect("child"), ids.next().expect("parent"))
            })
            .collect();
        assert_eq!(lines.len(), 49);
        let centre = lines[0].1;
        assert!(lines.iter().all(|&(_, parent)| parent == centre));
        let mut children: Vec<usize> = lines.iter().map(|&(child, _)| child).collect();
        children.push(centre);
        children.sort_unstable();
        assert_eq!(children, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn graph_lines_follow_edge_order_with_weights() {
        let tree = TreeBuilder::init(3).expect("length is valid").chain();
        let graph = Graph::from_tree(tree, EdgeOrientation::ChildToParent);
        let weights = [5, -1];
        let mut out = Vec::new();
        emit_graph(
            &mut out,
            &graph,
            EmitOptions::default().with_weights(&weights),
            &mut rng(),
        )
        .expect("write succeeds");
        assert_eq!(text(out), "2 1 5\n3 2 -1\n");
    }

    #[test]
    fn graph_weight_length_must_match_edge_count() {
        let graph = Graph::init(4, false).expect("size is valid");
        let err = emit_graph(
            &mut Vec::<u8>::new(),
            &graph,
            EmitOptions::default().with_weights(&[1_i64]),
            &mut rng(),
        )
        .expect_err("length mismatch");
        assert!(matches!(
            err,
            OutputError::WeightLengthMismatch {
                expected: 0,
                got: 1
            }
        ));
    }

    #[test]
    fn sequence_uses_separator() {
        let sequence = SequenceBuilder::init(4)
            .expect("length is valid")
            .generate_function(|x| x, 1);
        let mut out = Vec::new();
        emit_sequence(&mut out, &sequence, ",").expect("write succeeds");
        assert_eq!(text(out), "1,2,3,4\n");
    }

    #[test]
    fn single_node_tree_emits_nothing() {
        let tree = TreeBuilder::init(1).expect("length is valid").chain();
        let mut out: Vec<u8> = Vec::new();
        emit_tree(&mut out, &tree, EmitOptions::shuffled(), &mut rng()).expect("write succeeds");
        assert!(out.is_empty());
    }
}
