//! Frame loop

use std::time::Instant;

use frame_source::{FrameError, FrameSource};
use tokio::sync::watch;
use tracing::{error, info};

use crate::overlay::OverlaySink;
use crate::pipeline::Monitor;

/// Instantaneous frames-per-second over consecutive `tick` calls.
pub struct FpsCounter {
    last: Option<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record a frame; returns 1/dt against the previous frame, 0.0 for
    /// the first.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let fps = match self.last {
            Some(prev) => {
                let dt = now.duration_since(prev).as_secs_f32();
                if dt > 0.0 {
                    1.0 / dt
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.last = Some(now);
        fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive the monitor until the frame source fails or shutdown is signaled.
///
/// One iteration per frame: acquire, analyze (see
/// [`Monitor::process_frame`]), hand off to the overlay, check the
/// cancellation flag. Acquisition failure is the only fatal error; it
/// terminates the loop with no retry.
pub async fn run(
    monitor: &mut Monitor,
    source: &mut dyn FrameSource,
    overlay: &mut dyn OverlaySink,
    shutdown: watch::Receiver<bool>,
) -> Result<(), FrameError> {
    info!(
        width = source.width(),
        height = source.height(),
        interval = monitor.config().detection.interval_frames,
        "monitoring started"
    );

    let mut fps = FpsCounter::new();
    loop {
        let frame = match source.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                error!(error = %e, "frame acquisition failed, stopping");
                return Err(e);
            }
        };

        let report = monitor.process_frame(&frame);
        overlay.render(&frame, &report, fps.tick());

        if *shutdown.borrow() {
            info!(frames = report.frame_index + 1, "shutdown requested");
            return Ok(());
        }

        // Let the runtime service spawned playback tasks between frames
        tokio::task::yield_now().await;
    }
}
