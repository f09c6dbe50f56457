mod common;

use common::*;
use keyword_layout::{
    Simulation,
    config::{LayoutConfig, LegendPolicy},
    graph::{edges_from_adjacency, prepare},
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn nodes_stay_on_the_canvas((words, edges) in arb_graph(12), steps in 1usize..60) {
        let mut sim = Simulation::from_inputs(&words, &edges, LayoutConfig::default()).unwrap();
        for _ in 0..steps {
            let frame = sim.step();
            for p in &frame.nodes {
                let r = sim.node(&p.word).unwrap().radius();
                let ((xl, xh), (yl, yh)) = sim.config().bounds(r);
                prop_assert!(p.x >= xl && p.x <= xh);
                prop_assert!(p.y >= yl && p.y <= yh);
                prop_assert!(p.x.is_finite() && p.y.is_finite());
            }
        }
    }

    #[test]
    fn surviving_edges_reference_nodes((words, edges) in arb_graph(12)) {
        let graph = prepare(&words, &edges, &LayoutConfig::default().sizing);
        for e in &graph.edges {
            prop_assert!(graph.nodes.contains_key(&e.source));
            prop_assert!(graph.nodes.contains_key(&e.target));
            prop_assert!(e.weight >= graph.threshold);
            prop_assert!((0.0..=1.0).contains(&e.shade));
        }
    }

    #[test]
    fn radii_stay_in_range((words, _) in arb_graph(12)) {
        let graph = prepare(&words, &[], &LayoutConfig::default().sizing);
        for n in graph.nodes.values() {
            prop_assert!(n.radius >= 20.0 - 1e-9 && n.radius <= 70.0 + 1e-9);
        }
    }
}

#[test]
fn reflect_policy_keeps_nodes_below_the_legend() {
    let payload = sentiment_payload();
    let mut cfg = LayoutConfig::default();
    cfg.legend.policy = LegendPolicy::Reflect;
    let edges = edges_from_adjacency(&payload.adj_matrix);
    let mut sim = Simulation::from_inputs(&payload.keywords(), &edges, cfg).unwrap();
    for _ in 0..150 {
        let frame = sim.step();
        for p in &frame.nodes {
            assert!(!sim.config().legend.contains(1200.0, p.x, p.y), "{} in legend", p.word);
        }
    }
}

#[test]
fn reject_policy_pulls_off_canvas_seeds_back_in() {
    let mut cfg = LayoutConfig::default();
    cfg.legend.policy = LegendPolicy::Reject;
    // The fourth of four nodes is seeded at 3π/2, above the canvas and
    // straight over the legend.
    let words = [
        keyword("w0", 10.0, 0.1),
        keyword("w1", 40.0, 0.2),
        keyword("w2", 70.0, -0.1),
        keyword("w3", 100.0, -0.2),
    ];
    let mut sim = Simulation::from_inputs(&words, &[], cfg).unwrap();
    assert!(sim.node("w3").unwrap().position().1 < 0.0);

    for step in 0..150 {
        let frame = sim.step();
        for p in &frame.nodes {
            let r = sim.node(&p.word).unwrap().radius();
            let ((xl, xh), (yl, yh)) = sim.config().bounds(r);
            assert!(p.x >= xl && p.x <= xh, "step {step}: {} x={}", p.word, p.x);
            assert!(p.y >= yl && p.y <= yh, "step {step}: {} y={}", p.word, p.y);
            assert!(
                !sim.config().legend.contains(1200.0, p.x, p.y),
                "step {step}: {} in legend",
                p.word
            );
        }
    }
}

#[test]
fn payload_builds_the_expected_graph() {
    let payload = sentiment_payload();
    let edges = edges_from_adjacency(&payload.adj_matrix);
    // Seven distinct non-zero pairs.
    assert_eq!(edges.len(), 7);
    let graph = prepare(&payload.keywords(), &edges, &LayoutConfig::default().sizing);
    assert_eq!(graph.threshold, 0.0);
    assert_eq!(graph.edges.len(), 7);
    assert_eq!(graph.nodes["buy"].radius, 70.0);
    assert_eq!(graph.nodes["calls"].radius, 20.0);
    assert_eq!(graph.nodes["crash"].color_value, -0.52);

    let pairs = adjacency(&[("a", "b", 2.0), ("b", "c", 0.0)]);
    assert_eq!(edges_from_adjacency(&pairs).len(), 1);
}
