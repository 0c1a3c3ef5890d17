//! Bounded velocity history and release velocity smoothing.

use std::collections::VecDeque;

/// A FIFO of the most recent raw velocity samples.
///
/// Once `capacity` samples are held, pushing a new one evicts the oldest.
/// At release, [`release_velocity`](Self::release_velocity) averages only the
/// newest samples, which irons out jitter in the last one or two pointer
/// events while still following a genuine flick.
///
/// # Example
///
/// ```rust
/// use glide::VelocityHistory;
///
/// let mut history = VelocityHistory::new(3);
/// for v in [1.0, 2.0, 3.0, 4.0] {
///     history.push(v);
/// }
///
/// // 1.0 was evicted
/// assert_eq!(history.len(), 3);
/// assert_eq!(history.release_velocity(2), 3.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl VelocityHistory {
    /// Creates an empty history holding at most `capacity` samples.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest when full.
    pub fn push(&mut self, velocity: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(velocity);
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Mean of the newest `min(smoothing_count, len)` samples.
    ///
    /// Returns exactly `0.0` for an empty history.
    pub fn release_velocity(&self, smoothing_count: usize) -> f64 {
        let count = smoothing_count.max(1).min(self.samples.len());
        if count == 0 {
            return 0.0;
        }

        let sum: f64 = self.samples.iter().rev().take(count).sum();
        sum / count as f64
    }
}
