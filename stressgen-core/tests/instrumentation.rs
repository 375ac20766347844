use rand::{SeedableRng, rngs::SmallRng};
use stressgen_core::{GraphBuilder, SequenceBuilder, TreeBuilder, TreeShape};
use stressgen_test_support::tracing::capture;
use tracing::Level;

#[test]
fn tree_build_records_span_fields() {
    let mut rng = SmallRng::seed_from_u64(1);
    let (tree, layer) = capture(|| {
        TreeBuilder::init(12).and_then(|builder| builder.build(&mut rng, TreeShape::Flower))
    });
    assert_eq!(tree.expect("shape is valid").len(), 12);

    let span = layer.span_named("tree.build").expect("span recorded");
    assert_eq!(span.fields.get("len").map(String::as_str), Some("12"));
    assert_eq!(span.fields.get("shape").map(String::as_str), Some("flower"));
}

#[test]
fn rejected_requests_record_an_error_event() {
    let mut rng = SmallRng::seed_from_u64(2);
    let (result, layer) = capture(|| {
        SequenceBuilder::init(4).and_then(|builder| builder.constant_sum(&mut rng, 1, false, false))
    });
    assert!(result.is_err());
    assert!(!layer.events_at(Level::ERROR).is_empty());
}

#[test]
fn dense_graph_requests_warn_about_enumeration() {
    let mut rng = SmallRng::seed_from_u64(3);
    let (graph, layer) = capture(|| {
        GraphBuilder::init(10).and_then(|builder| builder.randomly_gen(&mut rng, 45, false))
    });
    assert_eq!(graph.expect("request is feasible").edge_count(), 45);
    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields.get("needed").map(String::as_str), Some("45"));
}
