//! Force-directed layout for the keyword co-occurrence bubbles.
//!
//! Keywords become circles sized by how often they occur; co-occurrence
//! counts become edges that pull related words together. A [`Simulation`]
//! advances the layout one step at a time, keeps every circle inside the
//! canvas (and optionally out of the legend strip) and lets a caller pin
//! words in place through [`DragEvent`]s between steps.
//!
//! ```no_run
//! # use keyword_layout::{config::LayoutConfig, model::{EdgeInput, KeywordInput}, Simulation};
//! # fn demo(words: Vec<KeywordInput>, edges: Vec<EdgeInput>) -> Result<(), keyword_layout::errors::LayoutError> {
//! let mut sim = Simulation::from_inputs(&words, &edges, LayoutConfig::default())?;
//! sim.settle(500);
//! for node in sim.frame().nodes {
//!     println!("{} at ({:.1}, {:.1})", node.word, node.x, node.y);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod drag;
pub mod errors;
mod forces;
pub mod graph;
pub mod model;
pub mod scale;
pub mod simulation;
pub mod sink;

pub use drag::{DragEvent, DragPhase, Emphasis};
pub use simulation::{Frame, Simulation};
