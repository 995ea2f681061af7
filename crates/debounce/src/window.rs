//! Bounded FIFO sliding window

use std::collections::VecDeque;

/// Fixed-capacity sliding window; pushing beyond capacity evicts the oldest
/// sample.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    data: VecDeque<f32>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create a window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest if full.
    pub fn push(&mut self, sample: f32) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(sample);
    }

    /// Arithmetic mean of the window, or 0.0 when empty.
    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
