#![allow(dead_code)]

use keyword_layout::model::{AdjacencyMatrix, EdgeInput, KeywordInput, SentimentWords};
use proptest::prelude::*;

pub fn keyword(word: &str, counts: f64, average_score: f64) -> KeywordInput {
    KeywordInput {
        word: word.to_string(),
        counts,
        average_score,
    }
}

/// A small payload in the shape the sentiment service returns.
pub fn sentiment_payload() -> SentimentWords {
    let json = r#"{
        "top_words": [
            {"word": "moon", "counts": 120, "average_score": 0.61},
            {"word": "buy", "counts": 300, "average_score": 0.42},
            {"word": "calls", "counts": 45, "average_score": 0.35}
        ],
        "bottom_words": [
            {"word": "crash", "counts": 80, "average_score": -0.52},
            {"word": "puts", "counts": 60, "average_score": -0.33}
        ],
        "adj_matrix": {
            "moon":  {"buy": 40, "calls": 12, "crash": 0, "puts": 1},
            "buy":   {"moon": 40, "calls": 25, "crash": 9, "puts": 0},
            "calls": {"moon": 12, "buy": 25, "puts": 7},
            "crash": {"buy": 9, "puts": 30},
            "puts":  {"moon": 1, "calls": 7, "crash": 30}
        }
    }"#;
    serde_json::from_str(json).expect("fixture parses")
}

/// Random graphs: up to `max_nodes` words with random counts and random
/// edges between them, some pointing at words that do not exist.
pub fn arb_graph(max_nodes: usize) -> impl Strategy<Value = (Vec<KeywordInput>, Vec<EdgeInput>)> {
    (1..=max_nodes)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((1.0f64..500.0, -1.0f64..1.0), n),
                prop::collection::vec((0..n + 2, 0..n + 2, 1.0f64..200.0), 0..n * 2),
            )
        })
        .prop_map(|(nodes, edges)| {
            let words: Vec<KeywordInput> = nodes
                .into_iter()
                .enumerate()
                .map(|(i, (c, s))| keyword(&format!("w{i}"), c, s))
                .collect();
            let edges = edges
                .into_iter()
                .map(|(s, t, weight)| EdgeInput {
                    source: format!("w{s}"),
                    target: format!("w{t}"),
                    weight,
                })
                .collect();
            (words, edges)
        })
}

pub fn adjacency(pairs: &[(&str, &str, f64)]) -> AdjacencyMatrix {
    let mut m = AdjacencyMatrix::new();
    for &(a, b, w) in pairs {
        m.entry(a.to_string()).or_default().insert(b.to_string(), w);
        m.entry(b.to_string()).or_default().insert(a.to_string(), w);
    }
    m
}
