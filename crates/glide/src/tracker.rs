//! Pointer input tracking.
//!
//! The tracker remembers where a drag started (pointer and scroll offset) and
//! where the previous pointer sample was, turning a stream of `(x, t)` pairs
//! into candidate scroll offsets and raw velocity samples.

/// Drag anchor and last-sample bookkeeping for a single pointer.
///
/// Timestamps are milliseconds on any monotonic clock; only differences
/// matter. Positions are in the scroll container's coordinate space.
///
/// # Example
///
/// ```rust
/// use glide::PointerTracker;
///
/// let mut tracker = PointerTracker::default();
/// tracker.begin(300.0, 0.0, 0.0);
///
/// // Dragging left scrolls right
/// assert_eq!(tracker.candidate_offset(250.0), 50.0);
/// assert_eq!(tracker.sample(250.0, 16.0, 12.0), Some(-37.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    anchor_x: f64,
    anchor_scroll: f64,
    last_x: f64,
    last_time_ms: f64,
}

impl PointerTracker {
    /// Anchors a new drag at pointer `x`, time `t_ms` and the container's
    /// current `scroll_offset`.
    pub fn begin(&mut self, x: f64, t_ms: f64, scroll_offset: f64) {
        self.anchor_x = x;
        self.anchor_scroll = scroll_offset;
        self.last_x = x;
        self.last_time_ms = t_ms;
    }

    /// Offset the content would have if it followed the pointer exactly.
    #[inline]
    pub fn candidate_offset(&self, x: f64) -> f64 {
        let walk = x - self.anchor_x;
        self.anchor_scroll - walk
    }

    /// Records a pointer sample and returns its raw velocity.
    ///
    /// The velocity is `(x - last_x) / dt * multiplier`. When `dt` is zero,
    /// negative or not finite no sample is produced, which keeps coincident
    /// timestamps from yielding an infinite velocity. The last position and
    /// time always advance.
    pub fn sample(&mut self, x: f64, t_ms: f64, multiplier: f64) -> Option<f64> {
        let dt = t_ms - self.last_time_ms;
        let dx = x - self.last_x;

        self.last_x = x;
        self.last_time_ms = t_ms;

        (dt > 0.0 && dt.is_finite()).then(|| dx / dt * multiplier)
    }

    /// Pointer position at drag start.
    pub fn anchor_x(&self) -> f64 {
        self.anchor_x
    }

    /// Scroll offset at drag start.
    pub fn anchor_scroll(&self) -> f64 {
        self.anchor_scroll
    }

    /// Most recent pointer position.
    pub fn last_x(&self) -> f64 {
        self.last_x
    }

    /// Most recent sample time.
    pub fn last_time_ms(&self) -> f64 {
        self.last_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_records_anchor() {
        let mut tracker = PointerTracker::default();
        tracker.begin(120.0, 5.0, 800.0);

        assert_eq!(tracker.anchor_x(), 120.0);
        assert_eq!(tracker.anchor_scroll(), 800.0);
        assert_eq!(tracker.last_x(), 120.0);
        assert_eq!(tracker.last_time_ms(), 5.0);
    }

    #[test]
    fn candidate_follows_pointer_inverted() {
        let mut tracker = PointerTracker::default();
        tracker.begin(100.0, 0.0, 500.0);

        assert_eq!(tracker.candidate_offset(160.0), 440.0);
        assert_eq!(tracker.candidate_offset(40.0), 560.0);
    }

    #[test]
    fn coincident_timestamps_produce_no_sample() {
        let mut tracker = PointerTracker::default();
        tracker.begin(100.0, 10.0, 0.0);

        assert_eq!(tracker.sample(90.0, 10.0, 12.0), None);
        assert_eq!(tracker.last_x(), 90.0);
    }

    #[test]
    fn backwards_time_produces_no_sample() {
        let mut tracker = PointerTracker::default();
        tracker.begin(100.0, 10.0, 0.0);

        assert_eq!(tracker.sample(90.0, 4.0, 12.0), None);
        assert_eq!(tracker.last_time_ms(), 4.0);
    }

    #[test]
    fn velocity_is_relative_to_previous_sample() {
        let mut tracker = PointerTracker::default();
        tracker.begin(100.0, 0.0, 0.0);

        assert_eq!(tracker.sample(110.0, 10.0, 1.0), Some(1.0));
        assert_eq!(tracker.sample(130.0, 20.0, 1.0), Some(2.0));
    }
}
