//! Destinations for the frames a running simulation emits.

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::simulation::Frame;

/// Errors raised while delivering frames.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The frame could not be serialized.
    #[snafu(display("Failed to encode frame {step}: {source}"))]
    Encode {
        /// Step number of the frame.
        step: u64,
        /// Underlying serializer error.
        source: serde_json::Error,
        /// Where the failure happened.
        backtrace: Backtrace,
    },

    /// The destination refused the bytes.
    #[snafu(display("I/O error: {source}"))]
    Io {
        /// Underlying I/O error.
        source: std::io::Error,
        /// Where the failure happened.
        backtrace: Backtrace,
    },
}

/// Destination for the frames a running simulation emits.
#[async_trait]
pub trait FrameSink: Send {
    /// What a successful write reports back.
    ///
    /// - [`VecSink`] returns the number of frames it now holds.
    /// - [`JsonLinesSink`] returns the number of bytes written for the frame.
    type Output: Send;

    /// Delivers one frame.
    async fn write(&mut self, frame: &Frame) -> Result<Self::Output, SinkError>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Frames in emission order.
    pub frames: Vec<Frame>,
}

#[async_trait]
impl FrameSink for VecSink {
    type Output = usize;

    async fn write(&mut self, frame: &Frame) -> Result<usize, SinkError> {
        self.frames.push(frame.clone());
        Ok(self.frames.len())
    }
}

/// Writes each frame as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    bytes: usize,
}

impl<W> JsonLinesSink<W> {
    /// Wraps `writer`; nothing is written until the first frame.
    pub fn new(writer: W) -> Self {
        Self { writer, bytes: 0 }
    }

    /// Total bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> FrameSink for JsonLinesSink<W> {
    type Output = usize;

    async fn write(&mut self, frame: &Frame) -> Result<usize, SinkError> {
        let mut line = serde_json::to_vec(frame).context(EncodeSnafu { step: frame.step })?;
        line.push(b'\n');
        self.writer.write_all(&line).await.context(IoSnafu)?;
        self.writer.flush().await.context(IoSnafu)?;
        self.bytes += line.len();
        Ok(line.len())
    }
}
