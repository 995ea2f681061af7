//! Latching alarm state machine

use serde::{Deserialize, Serialize};

/// Debounced alarm latch.
///
/// Transition table, for a latch with limit `N`:
///
/// | State            | breached = true              | breached = false |
/// |------------------|------------------------------|------------------|
/// | `Inactive`       | `Accumulating(1)`, or `Alarmed` if N <= 1 | `Inactive` |
/// | `Accumulating(n)`| `Accumulating(n+1)`, or `Alarmed` once n+1 >= N | `Inactive` |
/// | `Alarmed`        | `Alarmed`                    | `Inactive`       |
///
/// `reset()` forces `Inactive` from any state and is the transition used
/// for neutral (no-signal) frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LatchState {
    /// Condition not currently held
    #[default]
    Inactive,
    /// Condition held for this many consecutive frames, below the limit
    Accumulating(u32),
    /// Condition held long enough; sticks until the condition clears
    Alarmed,
}

/// A debounce latch with a fixed consecutive-frame limit.
#[derive(Debug, Clone)]
pub struct Latch {
    state: LatchState,
    limit: u32,
}

impl Latch {
    /// Create a latch that alarms after `limit` consecutive breached frames.
    pub fn new(limit: u32) -> Self {
        Self {
            state: LatchState::Inactive,
            limit,
        }
    }

    /// Feed one frame's observation. Returns whether the latch is alarmed
    /// after the transition.
    pub fn observe(&mut self, breached: bool) -> bool {
        self.state = match (self.state, breached) {
            (_, false) => LatchState::Inactive,
            (LatchState::Alarmed, true) => LatchState::Alarmed,
            (LatchState::Inactive, true) => {
                if self.limit <= 1 {
                    LatchState::Alarmed
                } else {
                    LatchState::Accumulating(1)
                }
            }
            (LatchState::Accumulating(n), true) => {
                if n + 1 >= self.limit {
                    LatchState::Alarmed
                } else {
                    LatchState::Accumulating(n + 1)
                }
            }
        };
        self.is_alarmed()
    }

    /// Neutral-frame transition: no reading this frame, drop back to
    /// `Inactive` regardless of prior state.
    pub fn reset(&mut self) {
        self.state = LatchState::Inactive;
    }

    /// Whether the latch is currently alarmed
    pub fn is_alarmed(&self) -> bool {
        self.state == LatchState::Alarmed
    }

    /// Consecutive breached frames counted so far (limit once alarmed)
    pub fn count(&self) -> u32 {
        match self.state {
            LatchState::Inactive => 0,
            LatchState::Accumulating(n) => n,
            LatchState::Alarmed => self.limit,
        }
    }

    /// Current state, for reporting
    pub fn state(&self) -> LatchState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alarms_exactly_at_limit() {
        let mut latch = Latch::new(3);
        assert!(!latch.observe(true));
        assert!(!latch.observe(true));
        assert!(latch.observe(true));
        assert_eq!(latch.state(), LatchState::Alarmed);
    }

    #[test]
    fn test_one_frame_short_never_alarms() {
        let mut latch = Latch::new(5);
        for _ in 0..4 {
            assert!(!latch.observe(true));
        }
        assert!(!latch.observe(false));
        assert_eq!(latch.state(), LatchState::Inactive);
    }

    #[test]
    fn test_alarm_sticks_while_breached() {
        let mut latch = Latch::new(2);
        latch.observe(true);
        latch.observe(true);
        for _ in 0..10 {
            assert!(latch.observe(true));
        }
        assert!(!latch.observe(false));
    }

    #[test]
    fn test_reset_clears_any_state() {
        let mut latch = Latch::new(2);
        latch.observe(true);
        latch.observe(true);
        assert!(latch.is_alarmed());
        latch.reset();
        assert_eq!(latch.state(), LatchState::Inactive);
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_limit_of_one_alarms_immediately() {
        let mut latch = Latch::new(1);
        assert!(latch.observe(true));
    }

    proptest! {
        /// No sequence shorter than the limit can alarm.
        #[test]
        fn never_alarms_before_limit(limit in 2u32..50, frames in 1u32..49) {
            prop_assume!(frames < limit);
            let mut latch = Latch::new(limit);
            for _ in 0..frames {
                prop_assert!(!latch.observe(true));
            }
        }

        /// A single clear frame always returns the latch to Inactive.
        #[test]
        fn clear_frame_resets(limit in 1u32..50, frames in 0u32..100) {
            let mut latch = Latch::new(limit);
            for _ in 0..frames {
                latch.observe(true);
            }
            latch.observe(false);
            prop_assert_eq!(latch.state(), LatchState::Inactive);
        }
    }
}
