//! Behavior Monitor Pipeline
//!
//! Ties the analyzers together into a frame-synchronous monitoring loop:
//! cheap facial geometry analysis every frame, expensive object detection
//! on a decimated schedule, fused into debounced behavioral alerts with
//! rate-limited audio notifications.
//!
//! Camera capture, the landmark model, the object detector, rendering, and
//! audio playback all plug in through traits; the pipeline itself never
//! touches hardware.

pub mod config;
pub mod overlay;
pub mod pipeline;
pub mod runner;

pub use config::MonitorConfig;
pub use overlay::{LogOverlay, NullOverlay, OverlaySink};
pub use pipeline::{FrameReport, Monitor};
pub use runner::{run, FpsCounter};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging for the binary
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
