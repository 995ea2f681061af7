//! Frame Acquisition Boundary
//!
//! Provides the decoded RGB frame type consumed by every analyzer and the
//! trait that camera backends (V4L2, recorded sequences, synthetic test
//! feeds) implement. Capture hardware itself lives behind [`FrameSource`];
//! the analysis pipeline never talks to a device directly.

pub mod frame;
mod synthetic;

pub use frame::VideoFrame;
pub use synthetic::SyntheticSource;

use thiserror::Error;

/// Frame acquisition error types
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to open capture device: {0}")]
    Open(String),

    #[error("Frame read failed: {0}")]
    Read(String),

    #[error("End of stream")]
    EndOfStream,

    #[error("Frame decode failed: {0}")]
    Decode(String),
}

/// A lazy, non-restartable sequence of color frames.
///
/// Any error returned from [`FrameSource::next_frame`] is terminal for the
/// monitoring loop; there is no retry protocol at this boundary.
pub trait FrameSource {
    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<VideoFrame, FrameError>;

    /// Capture width in pixels.
    fn width(&self) -> u32;

    /// Capture height in pixels.
    fn height(&self) -> u32;
}
