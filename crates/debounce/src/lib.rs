//! Temporal Debounce Primitives
//!
//! Per-frame measurements are noisy; both analyzers require a condition to
//! hold for N consecutive frames before raising an alarm, and hold the
//! alarm until the condition clears. This crate provides that latch as an
//! explicit state machine, plus the bounded FIFO window used for signal
//! smoothing.

mod latch;
mod window;

pub use latch::{Latch, LatchState};
pub use window::SlidingWindow;
