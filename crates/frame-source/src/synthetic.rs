//! Synthetic frame source for tests and headless demos

use tracing::debug;

use crate::frame::VideoFrame;
use crate::{FrameError, FrameSource};

/// Produces a fixed number of flat gray frames at a fixed resolution.
///
/// Stands in for a camera when driving the pipeline from tests or when no
/// capture backend is wired up. Exhausting the frame budget reports
/// [`FrameError::EndOfStream`], which the loop treats as fatal, same as a
/// real capture failure.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    remaining: u32,
    sequence: u32,
}

impl SyntheticSource {
    /// Create a source yielding `count` frames of `width` x `height`.
    pub fn new(width: u32, height: u32, count: u32) -> Self {
        Self {
            width,
            height,
            remaining: count,
            sequence: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<VideoFrame, FrameError> {
        if self.remaining == 0 {
            debug!(frames = self.sequence, "synthetic source exhausted");
            return Err(FrameError::EndOfStream);
        }
        self.remaining -= 1;

        let mut frame = VideoFrame::filled(self.width, self.height, [96, 96, 96]);
        frame.sequence = self.sequence;
        self.sequence += 1;
        Ok(frame)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
