use anyhow::Result;
use keyword_layout::{
    Frame, Simulation,
    config::LayoutConfig,
    errors::LayoutError,
    graph::{PreparedEdge, PreparedNode, edges_from_adjacency},
    model::SentimentWords,
    simulation::RunSummary,
    sink::FrameSink,
};
use serde::{Deserialize, Serialize};

/// Static part of the bubble chart: sized nodes and styled edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleGraph {
    pub nodes: Vec<PreparedNode>,
    pub edges: Vec<PreparedEdge>,
    pub threshold: f64,
}

/// The bubble chart after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleView {
    pub graph: BubbleGraph,
    pub frame: Frame,
    pub summary: RunSummary,
}

/// Builds the simulation for a sentiment payload: top words then bottom
/// words, edges from the co-occurrence matrix.
pub fn build_simulation(words: &SentimentWords, layout: &LayoutConfig) -> Result<Simulation, LayoutError> {
    let edges = edges_from_adjacency(&words.adj_matrix);
    Simulation::from_inputs(&words.keywords(), &edges, layout.clone())
}

pub fn bubble_graph(sim: &Simulation) -> BubbleGraph {
    let graph = sim.graph();
    BubbleGraph {
        nodes: graph.nodes.values().cloned().collect(),
        edges: graph.edges.clone(),
        threshold: graph.threshold,
    }
}

/// Runs the layout for at most `max_steps`, streaming frames to `sink`.
pub async fn bubble_view<S: FrameSink>(
    words: &SentimentWords,
    layout: &LayoutConfig,
    max_steps: usize,
    sink: &mut S,
) -> Result<BubbleView> {
    let mut sim = build_simulation(words, layout)?;
    let summary = sim.run(max_steps, sink).await?;
    Ok(BubbleView {
        graph: bubble_graph(&sim),
        frame: sim.frame(),
        summary,
    })
}
