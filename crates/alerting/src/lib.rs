//! Alerting
//!
//! Fuses the per-frame analyzer states into a set of behavioral alerts,
//! maps each alert to a severity channel, and dispatches rate-limited
//! notifications. Playback runs on detached background tasks so blocking
//! audio I/O never stalls the frame loop.

mod fusion;
mod manager;
mod sink;

pub use fusion::{evaluate, AlertKind, Severity};
pub use manager::{AlertConfig, AlertDispatcher};
pub use sink::{AudioSink, NotificationSink, TerminalBell};
