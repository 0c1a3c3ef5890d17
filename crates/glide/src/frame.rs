//! Frame scheduling.
//!
//! The engine never runs its own loop. Whenever motion needs another step it
//! asks a [`FrameScheduler`] for a frame and later receives that frame's
//! [`FrameHandle`] back from the host. Hosts wire this to their refresh-synced
//! primitive (a vsync callback, an animation tick command, ...).
//!
//! [`ManualFrameClock`] is a deterministic scheduler for headless hosts and
//! tests: frames fire only when the host asks for them.

use std::collections::VecDeque;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wraps a raw frame id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw frame id.
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A source of display-synchronized frame callbacks.
pub trait FrameScheduler {
    /// Requests a frame callback and returns its handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a previously requested frame.
    ///
    /// Must be idempotent: cancelling a frame that already fired or was
    /// already cancelled is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }
}

/// Deterministic, host-driven frame scheduler.
///
/// # Example
///
/// ```rust
/// use glide::{FrameScheduler, ManualFrameClock};
///
/// let mut clock = ManualFrameClock::new();
/// let first = clock.request_frame();
/// let second = clock.request_frame();
/// clock.cancel_frame(first);
/// clock.cancel_frame(first); // no-op
///
/// assert_eq!(clock.pending_count(), 1);
/// assert_eq!(clock.next_due(), Some(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameClock {
    /// Creates a clock with no pending frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames requested and not yet fired or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether any frame is waiting to fire.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes and returns the oldest pending frame.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Removes and returns every pending frame, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }

    /// Total frames ever requested.
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Total frames cancelled while still pending.
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_and_increasing() {
        let mut clock = ManualFrameClock::new();
        let a = clock.request_frame();
        let b = clock.request_frame();

        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(clock.requested_count(), 2);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut clock = ManualFrameClock::new();
        let handle = clock.request_frame();

        clock.cancel_frame(handle);
        clock.cancel_frame(handle);

        assert_eq!(clock.pending_count(), 0);
        assert_eq!(clock.cancelled_count(), 1);
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut clock = ManualFrameClock::new();
        let handle = clock.request_frame();
        assert_eq!(clock.next_due(), Some(handle));

        clock.cancel_frame(handle);

        assert_eq!(clock.cancelled_count(), 0);
    }

    #[test]
    fn take_due_drains_in_order() {
        let mut clock = ManualFrameClock::new();
        let a = clock.request_frame();
        let b = clock.request_frame();

        assert_eq!(clock.take_due(), vec![a, b]);
        assert!(!clock.has_pending());
    }

    #[test]
    fn mutable_reference_is_a_scheduler() {
        fn request<S: FrameScheduler>(mut scheduler: S) -> FrameHandle {
            scheduler.request_frame()
        }

        let mut clock = ManualFrameClock::new();
        let handle = request(&mut clock);

        assert_eq!(clock.next_due(), Some(handle));
    }
}
