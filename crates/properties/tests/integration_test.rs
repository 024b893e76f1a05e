//! Integration tests for the properties crate.
//!
//! These build small matrices through the public `interactions` API and
//! check the metrics against hand-computed values.

use interactions::{ImpressionGraph, InteractionMatrix, MatrixConfig, TemporalLog};
use properties::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const EPS: f64 = 1e-12;

fn build(config: MatrixConfig, edges: &[(u32, u32, f64)]) -> InteractionMatrix {
    let mut matrix = InteractionMatrix::new(config);
    for &(user, item, _) in edges {
        matrix.add_user(user);
        matrix.add_item(item);
    }
    for &(user, item, weight) in edges {
        matrix.add_edge(user, item, weight);
    }
    matrix
}

#[test]
fn test_example_scenario() {
    let matrix = build(
        MatrixConfig::new(0.0).with_binarize(true),
        &[(1, 10, 1.0), (1, 20, 1.0), (2, 10, 1.0)],
    );

    assert_eq!(matrix.num_edges(), 3);
    assert_eq!(Density::new(&matrix).density(), 0.75);

    let popularity = PopularityDistribution::new(&matrix);
    assert_eq!(popularity.users().as_slice(), &[2, 1]);
    assert_eq!(popularity.items().as_slice(), &[2, 1]);
}

#[test]
fn test_density_bounds() {
    let edges: Vec<(u32, u32, f64)> = (0..20).map(|i| (i % 4, i % 7, (i % 5) as f64)).collect();
    let matrix = build(MatrixConfig::new(2.0), &edges);
    let density = Density::new(&matrix);

    assert!((0.0..=1.0).contains(&density.density()));
    assert!(density.relevant_density() <= density.density());
}

#[test]
fn test_gini_invariant_under_edge_order() {
    let edges: Vec<(u32, u32, f64)> = (0..60)
        .map(|i| (i % 9, (i * i) % 13, ((i % 5) + 1) as f64))
        .collect();
    let config = MatrixConfig::new(3.0).with_accumulate_on_repeat(true);

    let reference = build(config, &edges);
    let expected_items = PopularityDistribution::new(&reference).items();
    let expected_gini = GiniIndex::new(&reference).items().unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut shuffled = edges.clone();
        shuffled.shuffle(&mut rng);

        // keys are registered in a different order too, which may reorder
        // ties but never the sorted counts themselves
        let matrix = build(config, &shuffled);
        assert_eq!(PopularityDistribution::new(&matrix).items(), expected_items);
        let value = GiniIndex::new(&matrix).items().unwrap();
        assert!((value - expected_gini).abs() < EPS);
    }
}

#[test]
fn test_impression_metrics() {
    let mut graph: ImpressionGraph = ImpressionGraph::new();
    for user in 0..3 {
        graph.add_user(user);
    }
    for item in 0..2 {
        graph.add_item(item);
    }
    graph.add_impression(0, 0);
    graph.add_impression(0, 1);
    graph.add_impression(1, 0);
    // duplicate, no structural change
    graph.add_impression(1, 0);

    let distribution = ImpressionDistribution::new(&graph);
    assert_eq!(distribution.users().as_slice(), &[2, 1, 0]);
    assert_eq!(distribution.items().total(), graph.num_impressions());

    let counts = ImpressionCount::new(&graph).users();
    assert_eq!(counts.average, 1.0);
    assert_eq!(counts.min, 0);
    assert_eq!(counts.max, 2);
}

#[test]
fn test_report_from_metrics() {
    let matrix = build(
        MatrixConfig::implicit_feedback(),
        &[(1, 10, 1.0), (2, 10, 1.0)],
    );
    let gini = GiniIndex::new(&matrix);

    let report = StatisticsReport::builder()
        .count("# users", matrix.num_users())
        .real("Density", Density::new(&matrix).density())
        .real("Item Gini", gini.items().unwrap_or(f64::NAN))
        .build();

    assert_eq!(report.integer("# users"), Some(2));
    assert_eq!(report.real("Density"), Some(1.0));
    // one item only
    assert!(report.real("Item Gini").unwrap().is_nan());
}

#[test]
fn test_relabeled_timelines() {
    let mut log: TemporalLog = TemporalLog::new();
    log.append(100, 1, 30);
    log.append(200, 2, 10);
    log.append(100, 2, 20);

    let first = user_timeline(&mut log, Direction::FirstOccurrence);
    assert_eq!(first, vec![(0, 10), (1, 20), (1, 30)]);

    let last = user_timeline(&mut log, Direction::LastOccurrence);
    assert_eq!(last, vec![(0, 30), (0, 20), (1, 10)]);
}
