//! The layout simulation context.
//!
//! A [`Simulation`] owns every node's position and velocity. One call to
//! [`Simulation::step`] applies, in order: many-body repulsion, link springs,
//! recentering plus the axis pulls, collision, velocity integration, the
//! canvas clamp and the legend policy, and finally cools `alpha` towards its
//! target. Drag events are applied between steps through `&mut self`, so a
//! step never observes a half-applied interaction.

use std::f64::consts::TAU;

use indexmap::IndexMap;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::{
    config::{LayoutConfig, LegendPolicy},
    drag::{DragPhase, Emphasis},
    errors::LayoutError,
    forces::{self, Body, Link},
    graph::{PreparedEdge, PreparedGraph, prepare},
    model::{EdgeInput, KeywordInput},
    sink::FrameSink,
};

/// Mutable state of one keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub(crate) body: Body,
    /// Interaction phase.
    pub phase: DragPhase,
    /// How the renderer should draw the node.
    pub emphasis: Emphasis,
    pub(crate) pinned_before_drag: bool,
}

impl NodeState {
    /// Current centre.
    pub fn position(&self) -> (f64, f64) {
        (self.body.x, self.body.y)
    }

    /// Current velocity.
    pub fn velocity(&self) -> (f64, f64) {
        (self.body.vx, self.body.vy)
    }

    /// Circle radius.
    pub fn radius(&self) -> f64 {
        self.body.radius
    }

    /// Where the node is held, while it is dragged or pinned.
    pub fn fixed(&self) -> Option<(f64, f64)> {
        self.body.fixed
    }
}

/// Position of one node in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    /// The keyword.
    pub word: String,
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Interaction phase.
    pub phase: DragPhase,
    /// Draw style.
    pub emphasis: Emphasis,
}

/// Snapshot emitted after every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Steps taken so far.
    pub step: u64,
    /// Energy after the step.
    pub alpha: f64,
    /// Whether the layout has cooled below the stopping threshold.
    pub converged: bool,
    /// Every node, in input order.
    pub nodes: Vec<NodePosition>,
}

/// Outcome of [`Simulation::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps taken by this run.
    pub steps: usize,
    /// Whether the run stopped because the layout converged.
    pub converged: bool,
    /// Energy at the end of the run.
    pub alpha: f64,
}

/// Keeps a circle of `radius` centred at `desired` on the canvas and, per the
/// legend policy, out of the legend. `previous` is where the node was before.
///
/// `reject` falls back to the clamped previous position, or mirrors out of
/// the legend when that is inside it too, so the result is always on the
/// canvas.
pub(crate) fn constrain(
    config: &LayoutConfig,
    radius: f64,
    desired: (f64, f64),
    previous: (f64, f64),
) -> (f64, f64) {
    let ((x_lo, x_hi), (y_lo, y_hi)) = config.bounds(radius);
    let clamp = |(x, y): (f64, f64)| (x_lo.max(x_hi.min(x)), y_lo.max(y_hi.min(y)));

    let (x, y) = clamp(desired);
    let reflected = || clamp((x, 2.0 * config.legend.height - y));
    if !config.legend.contains(config.width, x, y) {
        return (x, y);
    }
    match config.legend.policy {
        LegendPolicy::Ignore => (x, y),
        LegendPolicy::Reject => {
            let held = clamp(previous);
            if config.legend.contains(config.width, held.0, held.1) {
                reflected()
            } else {
                held
            }
        }
        LegendPolicy::Reflect => reflected(),
    }
}

/// Force-directed layout of one keyword graph.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) config: LayoutConfig,
    graph: PreparedGraph,
    nodes: IndexMap<String, NodeState>,
    links: Vec<Link>,
    alpha: f64,
    pub(crate) alpha_target: f64,
    pub(crate) active_drags: usize,
    steps: u64,
    rng: StdRng,
}

impl Simulation {
    /// Sizes and filters the raw records, then builds the simulation.
    pub fn from_inputs(
        keywords: &[KeywordInput],
        edges: &[EdgeInput],
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let graph = prepare(keywords, edges, &config.sizing);
        Self::new(graph, config)
    }

    /// Places the nodes evenly on a wide circle above the centre, at rest.
    pub fn new(graph: PreparedGraph, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        let n = graph.nodes.len();
        let params = &config.forces;
        let spread = config.width * params.initial_spread;
        let (cx, cy) = (config.width / 2.0, config.height * params.initial_center_y);

        let nodes: IndexMap<String, NodeState> = graph
            .nodes
            .values()
            .enumerate()
            .map(|(i, node)| {
                let angle = i as f64 / n as f64 * TAU;
                let repulsion = node
                    .charge
                    .max(params.repulsion_floor)
                    .min(params.max_repulsion);
                let body = Body {
                    x: cx + spread * angle.cos(),
                    y: cy + spread * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    radius: node.radius,
                    strength: -repulsion,
                    fixed: None,
                };
                let state = NodeState {
                    body,
                    phase: DragPhase::Free,
                    emphasis: Emphasis::Outline,
                    pinned_before_drag: false,
                };
                (node.word.clone(), state)
            })
            .collect();

        let pairs: Vec<(usize, usize)> = graph
            .edges
            .iter()
            .filter_map(|e| Some((nodes.get_index_of(&e.source)?, nodes.get_index_of(&e.target)?)))
            .collect();
        let radii: Vec<f64> = nodes.values().map(|s| s.body.radius).collect();
        let links = Link::build(&pairs, &radii, params.link_distance, params.link_radius_cap);

        debug!(nodes = n, links = links.len(), "Simulation initialised");
        Ok(Self {
            alpha: config.alpha.initial,
            alpha_target: config.alpha.target,
            rng: StdRng::seed_from_u64(u64::from(config.seed)),
            config,
            graph,
            nodes,
            links,
            active_drags: 0,
            steps: 0,
        })
    }

    /// Current energy.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Energy the simulation is cooling (or warming) towards.
    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    /// Steps taken since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether the layout has cooled below the stopping threshold. An empty
    /// layout is converged from the start.
    pub fn is_converged(&self) -> bool {
        self.nodes.is_empty() || self.alpha < self.config.alpha.min
    }

    /// The configuration the simulation runs with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Sized nodes and surviving edges.
    pub fn graph(&self) -> &PreparedGraph {
        &self.graph
    }

    /// Surviving edges, for the renderer.
    pub fn edges(&self) -> &[PreparedEdge] {
        &self.graph.edges
    }

    /// State of the node for `word`.
    pub fn node(&self, word: &str) -> Option<&NodeState> {
        self.nodes.get(word)
    }

    /// Every node state, in input order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeState)> {
        self.nodes.iter().map(|(w, s)| (w.as_str(), s))
    }

    pub(crate) fn node_mut(&mut self, word: &str) -> Result<&mut NodeState, LayoutError> {
        self.nodes
            .get_mut(word)
            .ok_or_else(|| LayoutError::UnknownWord(word.to_string()))
    }

    pub(crate) fn constrain(
        &self,
        radius: f64,
        desired: (f64, f64),
        previous: (f64, f64),
    ) -> (f64, f64) {
        constrain(&self.config, radius, desired, previous)
    }

    /// Points the cooling schedule at `target`.
    pub(crate) fn reheat(&mut self, target: f64) {
        debug!(from = self.alpha_target, to = target, alpha = self.alpha, "Retargeting alpha");
        self.alpha_target = target;
    }

    /// Advances the layout by one step and returns the resulting frame.
    pub fn step(&mut self) -> Frame {
        if self.nodes.is_empty() {
            return self.frame();
        }

        let alpha = self.alpha;
        let params = &self.config.forces;
        let center = self.config.center();
        let mut bodies: Vec<Body> = self.nodes.values().map(|s| s.body).collect();

        forces::many_body(&mut bodies, alpha, &mut self.rng);
        forces::links(&mut bodies, &self.links, alpha, &mut self.rng);
        forces::recenter(&mut bodies, center);
        forces::anchor_pull(
            &mut bodies,
            center,
            (params.x_strength, params.y_strength),
            alpha,
        );
        forces::collide(&mut bodies, params.collide_padding, &mut self.rng);
        forces::integrate(&mut bodies, params.velocity_decay);

        for (state, mut body) in self.nodes.values_mut().zip(bodies) {
            let previous = (state.body.x, state.body.y);
            (body.x, body.y) = constrain(&self.config, body.radius, (body.x, body.y), previous);
            state.body = body;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha.decay;
        self.steps += 1;
        trace!(step = self.steps, alpha = self.alpha, "Step");
        self.frame()
    }

    /// Current positions, without stepping.
    pub fn frame(&self) -> Frame {
        Frame {
            step: self.steps,
            alpha: self.alpha,
            converged: self.is_converged(),
            nodes: self
                .nodes
                .iter()
                .map(|(word, s)| NodePosition {
                    word: word.clone(),
                    x: s.body.x,
                    y: s.body.y,
                    phase: s.phase,
                    emphasis: s.emphasis,
                })
                .collect(),
        }
    }

    /// Steps until converged or `max_steps` were taken; returns the number
    /// of steps.
    pub fn settle(&mut self, max_steps: usize) -> usize {
        let mut taken = 0;
        while taken < max_steps {
            taken += 1;
            if self.step().converged {
                break;
            }
        }
        taken
    }

    /// Steps until converged or `max_steps` were taken, writing every frame
    /// to `sink` and yielding to the runtime between steps.
    pub async fn run<S: FrameSink>(
        &mut self,
        max_steps: usize,
        sink: &mut S,
    ) -> Result<RunSummary, LayoutError> {
        let mut steps = 0;
        let mut converged = false;
        while steps < max_steps {
            let frame = self.step();
            sink.write(&frame).await?;
            steps += 1;
            if frame.converged {
                converged = true;
                break;
            }
            tokio::task::yield_now().await;
        }
        info!(steps, converged, alpha = self.alpha, "Layout run finished");
        Ok(RunSummary {
            steps,
            converged,
            alpha: self.alpha,
        })
    }
}
