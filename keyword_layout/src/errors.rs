use thiserror::Error;

use crate::sink::SinkError;

/// Errors raised by the layout engine.
///
/// Degenerate input (no nodes, no edges, equal counts) is never an error;
/// only bad configuration, misaddressed drag events and sink failures are.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A configuration value makes the layout meaningless.
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    /// A drag event named a word that is not in the layout.
    #[error("Unknown word: {0}")]
    UnknownWord(String),

    /// A drag move or end arrived for a node that is not being dragged.
    #[error("Node {0} is not being dragged")]
    NotDragging(String),

    /// A drag start arrived for a node that is already being dragged.
    #[error("Node {0} is already being dragged")]
    AlreadyDragging(String),

    /// A frame could not be delivered to its sink.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
