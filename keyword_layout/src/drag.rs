//! Pointer interaction: dragging a bubble and pinning it where it is
//! dropped.
//!
//! Each node moves through three phases:
//!
//! ```text
//!            start              end (was free)
//!   Free ----------> Dragging ---------------> Pinned
//!    ^                 ^  |                      |
//!    |  end (was       |  +-- move (follows      |
//!    |  pinned)        |      the pointer)       |
//!    +-----------------+-------------------------+
//!                           start
//! ```
//!
//! Dropping a free node pins it; dropping a pinned node releases it. While
//! any node is being dragged the simulation is kept warm so the rest of the
//! graph can follow.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{errors::LayoutError, simulation::Simulation};

/// Interaction phase of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    /// Moved by the forces.
    #[default]
    Free,
    /// Held at the pointer.
    Dragging,
    /// Held where it was dropped.
    Pinned,
}

/// How the renderer should draw the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Coloured ring on the background fill.
    #[default]
    Outline,
    /// Solid fill; marks a pinned node.
    Filled,
}

/// A pointer event addressed to one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragEvent {
    /// The pointer grabbed the node.
    Start {
        /// Node being grabbed.
        word: String,
    },
    /// The pointer moved while holding the node.
    Move {
        /// Node being dragged.
        word: String,
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// The pointer let go.
    End {
        /// Node being dropped.
        word: String,
    },
}

impl DragEvent {
    /// The node the event is addressed to.
    pub fn word(&self) -> &str {
        match self {
            DragEvent::Start { word } | DragEvent::Move { word, .. } | DragEvent::End { word } => {
                word
            }
        }
    }
}

impl Simulation {
    /// Applies one pointer event and returns the node's new phase.
    ///
    /// Events must arrive between steps. A rejected event leaves the
    /// simulation untouched.
    pub fn drag(&mut self, event: &DragEvent) -> Result<DragPhase, LayoutError> {
        let word = event.word();
        let phase = self
            .node(word)
            .map(|n| n.phase)
            .ok_or_else(|| LayoutError::UnknownWord(word.to_string()))?;

        match (event, phase) {
            (DragEvent::Start { .. }, DragPhase::Dragging) => {
                Err(LayoutError::AlreadyDragging(word.to_string()))
            }
            (DragEvent::Move { .. } | DragEvent::End { .. }, DragPhase::Free | DragPhase::Pinned) => {
                Err(LayoutError::NotDragging(word.to_string()))
            }
            (DragEvent::Start { .. }, _) => {
                if self.active_drags == 0 {
                    self.reheat(self.config.alpha.drag_target);
                }
                self.active_drags += 1;
                let (at, radius) = self.node_mut(word).map(|n| ((n.body.x, n.body.y), n.body.radius))?;
                let held = self.constrain(radius, at, at);
                let node = self.node_mut(word)?;
                node.pinned_before_drag = phase == DragPhase::Pinned;
                node.body.fixed = Some(held);
                node.phase = DragPhase::Dragging;
                debug!(word, "Drag started");
                Ok(DragPhase::Dragging)
            }
            (DragEvent::Move { x, y, .. }, DragPhase::Dragging) => {
                let (x, y) = (*x, *y);
                let current = self.node(word).and_then(|n| n.body.fixed);
                let radius = self.node(word).map_or(0.0, |n| n.body.radius);
                let held = self.constrain(radius, (x, y), current.unwrap_or((x, y)));
                self.node_mut(word)?.body.fixed = Some(held);
                Ok(DragPhase::Dragging)
            }
            (DragEvent::End { .. }, DragPhase::Dragging) => {
                self.active_drags = self.active_drags.saturating_sub(1);
                if self.active_drags == 0 {
                    self.alpha_target = self.config.alpha.release_target;
                }
                let node = self.node_mut(word)?;
                let next = if node.pinned_before_drag {
                    node.body.fixed = None;
                    node.emphasis = Emphasis::Outline;
                    DragPhase::Free
                } else {
                    node.emphasis = Emphasis::Filled;
                    DragPhase::Pinned
                };
                node.phase = next;
                debug!(word, phase = ?next, "Drag ended");
                Ok(next)
            }
        }
    }
}
