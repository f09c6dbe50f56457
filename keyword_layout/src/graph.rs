//! Turns raw keyword and co-occurrence records into the sized, filtered
//! graph the simulation runs on.

use std::collections::HashSet;

use indexmap::{IndexMap, map::Entry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::SizingConfig,
    model::{AdjacencyMatrix, EdgeInput, KeywordInput},
    scale::{Scale, extent},
};

/// A keyword with its derived visual attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedNode {
    /// The keyword.
    pub word: String,
    /// Frequency the radius was derived from.
    pub counts: f64,
    /// Mean sentiment score.
    pub average_score: f64,
    /// Circle radius.
    pub radius: f64,
    /// `min(radius ^ exponent, cap)`; the simulation bounds it again.
    pub charge: f64,
    /// Value the renderer colours the node by.
    pub color_value: f64,
}

/// An edge that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedEdge {
    /// First keyword.
    pub source: String,
    /// Second keyword.
    pub target: String,
    /// Co-occurrence count.
    pub weight: f64,
    /// Stroke width.
    pub thickness: f64,
    /// Position on the renderer's colour ramp, in `[0, 1]`.
    pub shade: f64,
}

/// Nodes in input order plus the edges that reference them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedGraph {
    /// Nodes keyed by word, in first-seen order.
    pub nodes: IndexMap<String, PreparedNode>,
    /// Edges whose endpoints both exist and whose weight clears the
    /// threshold.
    pub edges: Vec<PreparedEdge>,
    /// Minimum weight an edge needed to survive.
    pub threshold: f64,
}

/// Sizes the nodes and filters and styles the edges.
///
/// A word listed twice keeps its first record. Edges are dropped when they
/// loop on one word, name a word that is not in `keywords`, or weigh less
/// than `round(max_weight * edge_threshold_ratio)`.
pub fn prepare(keywords: &[KeywordInput], edges: &[EdgeInput], sizing: &SizingConfig) -> PreparedGraph {
    let radius_scale = extent(keywords.iter().map(|k| k.counts))
        .map(|domain| {
            Scale::sqrt(domain, (sizing.min_radius, sizing.max_radius))
                .with_fallback(sizing.fallback_radius())
        });

    let mut nodes = IndexMap::with_capacity(keywords.len());
    for k in keywords {
        match nodes.entry(k.word.clone()) {
            Entry::Occupied(_) => warn!(word = %k.word, "Duplicate keyword ignored"),
            Entry::Vacant(slot) => {
                let radius = radius_scale
                    .map_or(sizing.fallback_radius(), |scale| scale.apply(k.counts));
                slot.insert(PreparedNode {
                    word: k.word.clone(),
                    counts: k.counts,
                    average_score: k.average_score,
                    radius,
                    charge: radius.powf(sizing.charge_exponent).min(sizing.charge_cap),
                    color_value: k.average_score,
                });
            }
        }
    }

    let Some((min_weight, max_weight)) = extent(edges.iter().map(|e| e.weight)) else {
        return PreparedGraph {
            nodes,
            edges: Vec::new(),
            threshold: 0.0,
        };
    };
    let threshold = (max_weight * sizing.edge_threshold_ratio).round();
    let thickness = Scale::sqrt((min_weight, max_weight), sizing.thickness_range);
    let shade = Scale::linear((threshold, max_weight), (0.0, 1.0)).with_fallback(1.0);

    let kept: Vec<PreparedEdge> = edges
        .iter()
        .filter(|e| {
            e.source != e.target
                && e.weight >= threshold
                && nodes.contains_key(&e.source)
                && nodes.contains_key(&e.target)
        })
        .map(|e| PreparedEdge {
            source: e.source.clone(),
            target: e.target.clone(),
            weight: e.weight,
            thickness: thickness.apply(e.weight),
            shade: shade.apply(e.weight),
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        edges_in = edges.len(),
        edges_kept = kept.len(),
        threshold,
        "Prepared keyword graph"
    );
    PreparedGraph {
        nodes,
        edges: kept,
        threshold,
    }
}

/// Flattens a symmetric co-occurrence matrix into an edge list.
///
/// Each unordered pair is emitted once, in the order it is first met; zero
/// counts and a word's count with itself are skipped.
pub fn edges_from_adjacency(matrix: &AdjacencyMatrix) -> Vec<EdgeInput> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut edges = Vec::new();
    for (source, row) in matrix {
        for (target, &weight) in row {
            if weight <= 0.0 || source == target {
                continue;
            }
            let key = if source <= target {
                (source.as_str(), target.as_str())
            } else {
                (target.as_str(), source.as_str())
            };
            if seen.insert(key) {
                edges.push(EdgeInput {
                    source: source.clone(),
                    target: target.clone(),
                    weight,
                });
            }
        }
    }
    edges
}
