//! The scroll engine: pointer handlers, release logic and frame dispatch.
//!
//! # Control flow
//!
//! ```text
//! pointer down ──► Dragging ──► pointer up ──┬─► Momentum ─┐
//!      ▲               │                     ├─► Elastic ◄─┤ (out of range)
//!      │               └──► pointer leave ───┤      │      │
//!      │                                     └─► Idle ◄────┴── settled
//!      └──────────── cancels any pending frame ─────────────
//! ```
//!
//! All mutation happens either inside a pointer handler or inside
//! [`ScrollEngine::on_frame`]. At most one frame is pending at any time, and
//! every pointer-down cancels it before touching the state, so the two
//! contexts never interleave.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::boundary::{boundary_feedback, resist};
use crate::config::ScrollConfig;
use crate::error::Result;
use crate::frame::{FrameHandle, FrameScheduler, ManualFrameClock};
use crate::motion::{Mode, SimulationState, Step, advance};
use crate::surface::ScrollSurface;

/// A pointer event delivered by the host.
///
/// `x` is in the scroll container's coordinate space, `t` is a monotonic
/// timestamp in milliseconds. Serialized with a `type` tag:
///
/// ```rust
/// use glide::PointerEvent;
///
/// let event: PointerEvent = serde_json::from_str(r#"{"type":"move","x":120,"t":16}"#).unwrap();
/// assert_eq!(event, PointerEvent::Move { x: 120.0, t: 16.0 });
///
/// // Release events do not need coordinates
/// let event: PointerEvent = serde_json::from_str(r#"{"type":"up"}"#).unwrap();
/// assert_eq!(event, PointerEvent::Up { x: 0.0, t: 0.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed.
    Down {
        /// Pointer position.
        #[serde(default)]
        x: f64,
        /// Timestamp in milliseconds.
        #[serde(default)]
        t: f64,
    },
    /// Pointer moved.
    Move {
        /// Pointer position.
        #[serde(default)]
        x: f64,
        /// Timestamp in milliseconds.
        #[serde(default)]
        t: f64,
    },
    /// Pointer released over the container.
    Up {
        /// Pointer position.
        #[serde(default)]
        x: f64,
        /// Timestamp in milliseconds.
        #[serde(default)]
        t: f64,
    },
    /// Pointer left the container.
    Leave {
        /// Pointer position.
        #[serde(default)]
        x: f64,
        /// Timestamp in milliseconds.
        #[serde(default)]
        t: f64,
    },
}

impl PointerEvent {
    /// Timestamp of the event in milliseconds.
    pub const fn timestamp(&self) -> f64 {
        match *self {
            Self::Down { t, .. }
            | Self::Move { t, .. }
            | Self::Up { t, .. }
            | Self::Leave { t, .. } => t,
        }
    }
}

/// Cursor shape hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    /// Content can be grabbed.
    #[default]
    Grab,
    /// Content is being dragged.
    Grabbing,
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grab => write!(f, "grab"),
            Self::Grabbing => write!(f, "grabbing"),
        }
    }
}

/// Everything the host needs to present the current state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Presentation {
    /// Current mode.
    pub mode: Mode,
    /// Translation to apply to the content wrapper.
    pub boundary_offset: f64,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Cursor shape.
    pub cursor: Cursor,
    /// Transition for the boundary translation; `None` while dragging.
    pub transition: Option<Duration>,
}

/// Pointer-driven horizontal scroll engine.
///
/// One engine drives one scroll container. It owns its [`SimulationState`],
/// its [`FrameScheduler`] and at most one pending [`FrameHandle`]; dropping
/// the engine cancels that frame.
///
/// # Example
///
/// ```rust
/// use glide::{ManualFrameClock, Mode, ScrollConfig, ScrollEngine, ScrollRegion};
///
/// let mut region = ScrollRegion::new(2000.0, 500.0);
/// let mut engine = ScrollEngine::new(ScrollConfig::default(), ManualFrameClock::new());
///
/// // Drag right from the start edge: resisted overscroll
/// engine.pointer_down(100.0, 0.0, &region);
/// engine.pointer_move(140.0, 16.0, &mut region);
/// assert_eq!(region.scroll_offset(), -20.0);
///
/// // Leaving the container suppresses momentum but still springs back
/// engine.pointer_leave(&region);
/// assert_eq!(engine.mode(), Mode::Elastic);
/// engine.run_until_idle(&mut region, 1_000);
/// assert_eq!(region.scroll_offset(), 0.0);
/// ```
#[derive(Debug)]
pub struct ScrollEngine<F: FrameScheduler = ManualFrameClock> {
    config: ScrollConfig,
    state: SimulationState,
    scheduler: F,
    pending: Option<FrameHandle>,
}

impl<F: FrameScheduler> ScrollEngine<F> {
    /// Creates an idle engine.
    ///
    /// The configuration is not rejected when out of range; a warning is
    /// logged instead. Use [`try_new`](Self::try_new) to refuse it.
    pub fn new(config: ScrollConfig, scheduler: F) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "scroll config out of range; motion may never settle");
        }
        Self::build(config, scheduler)
    }

    /// Creates an idle engine, rejecting out-of-range configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`](crate::ConfigError::InvalidValue)
    /// reported by [`ScrollConfig::validate`].
    pub fn try_new(config: ScrollConfig, scheduler: F) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, scheduler))
    }

    fn build(config: ScrollConfig, scheduler: F) -> Self {
        Self {
            state: SimulationState::new(&config),
            config,
            scheduler,
            pending: None,
        }
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// The simulation state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current mode.
    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Current velocity in offset units per frame.
    pub const fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Current boundary feedback translation.
    pub const fn boundary_offset(&self) -> f64 {
        self.state.boundary_offset
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.mode() == Mode::Dragging
    }

    /// The frame currently waiting to fire, if any.
    pub const fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// The frame scheduler.
    pub const fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Mutable access to the frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Presentation outputs for the host.
    pub fn presentation(&self) -> Presentation {
        let dragging = self.is_dragging();
        Presentation {
            mode: self.mode(),
            boundary_offset: self.state.boundary_offset,
            dragging,
            cursor: if dragging { Cursor::Grabbing } else { Cursor::Grab },
            transition: (!dragging).then(|| self.config.boundary_transition()),
        }
    }

    /// Dispatches a pointer event to the matching handler.
    pub fn handle<S: ScrollSurface + ?Sized>(&mut self, event: PointerEvent, surface: &mut S) {
        match event {
            PointerEvent::Down { x, t } => self.pointer_down(x, t, &*surface),
            PointerEvent::Move { x, t } => self.pointer_move(x, t, surface),
            PointerEvent::Up { .. } => self.pointer_up(&*surface),
            PointerEvent::Leave { .. } => self.pointer_leave(&*surface),
        }
    }

    /// Starts a drag at pointer `x`, time `t_ms`.
    ///
    /// Cancels any running motion, clears the velocity history and anchors
    /// the drag at the container's current offset. Ignored when the
    /// container is missing.
    pub fn pointer_down<S: ScrollSurface + ?Sized>(&mut self, x: f64, t_ms: f64, surface: &S) {
        let Some(extent) = surface.extent() else {
            return;
        };

        self.cancel_pending();
        self.state.tracker.begin(x, t_ms, extent.scroll_offset);
        self.state.velocity = 0.0;
        self.state.history.clear();
        self.state.set_mode(Mode::Dragging);
    }

    /// Follows the pointer while dragging.
    ///
    /// Writes the resisted offset straight to the container and records a
    /// velocity sample when time advanced since the previous event. A no-op
    /// outside [`Mode::Dragging`].
    pub fn pointer_move<S: ScrollSurface + ?Sized>(&mut self, x: f64, t_ms: f64, surface: &mut S) {
        if self.state.mode() != Mode::Dragging {
            return;
        }
        let Some(extent) = surface.extent() else {
            return;
        };

        let max_scroll = extent.max_scroll();
        let offset = resist(self.state.tracker.candidate_offset(x), max_scroll, &self.config);
        surface.set_scroll_offset(offset);
        self.state.boundary_offset = boundary_feedback(offset, max_scroll, &self.config);

        if let Some(velocity) = self
            .state
            .tracker
            .sample(x, t_ms, self.config.velocity_multiplier)
        {
            self.state.history.push(velocity);
        }
    }

    /// Ends a drag over the container.
    ///
    /// Seeds momentum from the smoothed release velocity. Motion starts when
    /// that velocity exceeds `min_velocity` or the offset is out of range
    /// (starting in [`Mode::Elastic`] in the latter case); otherwise the
    /// engine settles immediately. A no-op outside [`Mode::Dragging`].
    pub fn pointer_up<S: ScrollSurface + ?Sized>(&mut self, surface: &S) {
        if self.state.mode() != Mode::Dragging {
            return;
        }

        let velocity = self
            .state
            .history
            .release_velocity(self.config.velocity_smoothing_count);
        self.state.velocity = velocity;

        let out_of_bounds = is_out_of_bounds(surface);
        debug!(velocity, out_of_bounds, "pointer released");

        if out_of_bounds {
            self.start_motion(Mode::Elastic);
        } else if velocity.abs() > self.config.min_velocity {
            self.start_motion(Mode::Momentum);
        } else {
            self.state.settle();
        }
    }

    /// Ends a drag because the pointer left the container.
    ///
    /// Unlike [`pointer_up`](Self::pointer_up) no momentum is carried: the
    /// velocity is dropped and the engine only springs back when the offset
    /// is out of range. A no-op outside [`Mode::Dragging`].
    pub fn pointer_leave<S: ScrollSurface + ?Sized>(&mut self, surface: &S) {
        if self.state.mode() != Mode::Dragging {
            return;
        }

        self.state.velocity = 0.0;
        let out_of_bounds = is_out_of_bounds(surface);
        debug!(out_of_bounds, "pointer left while dragging");

        if out_of_bounds {
            self.start_motion(Mode::Elastic);
        } else {
            self.state.settle();
        }
    }

    /// Runs one motion step for a delivered frame.
    ///
    /// Returns the step taken, or `None` when nothing was stepped: either
    /// `handle` is not the pending frame (stale or cancelled delivery), or
    /// the container is missing, in which case the engine settles.
    pub fn on_frame<S: ScrollSurface + ?Sized>(
        &mut self,
        handle: FrameHandle,
        surface: &mut S,
    ) -> Option<Step> {
        if self.pending != Some(handle) {
            trace!(frame = handle.id(), "ignoring stale frame");
            return None;
        }
        self.pending = None;

        let Some(extent) = surface.extent() else {
            debug!("scroll surface missing; stopping motion");
            self.state.velocity = 0.0;
            self.state.settle();
            return None;
        };

        let step = advance(&mut self.state, &extent, &self.config);
        surface.set_scroll_offset(step.offset());
        if !step.is_settled() {
            self.schedule();
        }
        Some(step)
    }

    /// Stops all motion and drops any pending frame.
    ///
    /// Call when the container goes away. Idempotent; also run on drop.
    pub fn unmount(&mut self) {
        self.cancel_pending();
        self.state.velocity = 0.0;
        self.state.settle();
    }

    fn start_motion(&mut self, mode: Mode) {
        self.state.set_mode(mode);
        self.schedule();
    }

    fn schedule(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            debug!(frame = handle.id(), "cancelling pending frame");
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl ScrollEngine<ManualFrameClock> {
    /// Fires the next due frame of the manual clock.
    ///
    /// Returns `None` when no frame was due or the frame did not step.
    pub fn run_frame<S: ScrollSurface + ?Sized>(&mut self, surface: &mut S) -> Option<Step> {
        let handle = self.scheduler.next_due()?;
        self.on_frame(handle, surface)
    }

    /// Fires frames until none are pending or `max_frames` have run.
    ///
    /// Returns the number of frames fired.
    pub fn run_until_idle<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        max_frames: usize,
    ) -> usize {
        let mut frames = 0;
        while frames < max_frames {
            let Some(handle) = self.scheduler.next_due() else {
                break;
            };
            frames += 1;
            self.on_frame(handle, surface);
        }
        frames
    }
}

impl<F: FrameScheduler> Drop for ScrollEngine<F> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn is_out_of_bounds<S: ScrollSurface + ?Sized>(surface: &S) -> bool {
    surface
        .extent()
        .is_some_and(|extent| extent.is_out_of_bounds(extent.scroll_offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ScrollRegion;

    fn engine() -> ScrollEngine {
        ScrollEngine::new(ScrollConfig::default(), ManualFrameClock::new())
    }

    #[test]
    fn pointer_down_enters_dragging() {
        let region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(300.0);
        let mut engine = engine();

        engine.pointer_down(50.0, 0.0, &region);

        assert_eq!(engine.mode(), Mode::Dragging);
        assert!(engine.is_dragging());
        assert_eq!(engine.state().tracker.anchor_scroll(), 300.0);
        assert_eq!(engine.presentation().cursor, Cursor::Grabbing);
        assert_eq!(engine.presentation().transition, None);
    }

    #[test]
    fn pointer_down_without_surface_is_ignored() {
        let mut engine = engine();
        engine.pointer_down(50.0, 0.0, &None::<ScrollRegion>);
        assert_eq!(engine.mode(), Mode::Idle);
    }

    #[test]
    fn move_outside_drag_is_ignored() {
        let mut region = ScrollRegion::new(2000.0, 500.0);
        let mut engine = engine();

        engine.pointer_move(10.0, 16.0, &mut region);

        assert_eq!(region.scroll_offset(), 0.0);
        assert!(engine.state().history.is_empty());
    }

    #[test]
    fn drag_writes_offset_directly() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(150.0, 10.0, &mut region);
        assert_eq!(region.scroll_offset(), 450.0);

        engine.pointer_move(260.0, 20.0, &mut region);
        assert_eq!(region.scroll_offset(), 340.0);
        assert_eq!(engine.state().history.len(), 2);
        assert_eq!(engine.boundary_offset(), 0.0);
    }

    #[test]
    fn drag_past_end_is_resisted_and_signalled() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(1500.0);
        let mut engine = engine();

        engine.pointer_down(300.0, 0.0, &region);
        engine.pointer_move(200.0, 16.0, &mut region);

        assert_eq!(region.scroll_offset(), 1550.0);
        assert_eq!(engine.boundary_offset(), -50.0);
    }

    #[test]
    fn slow_release_settles_without_frames() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(200.0, 500.0, &mut region);
        engine.pointer_up(&region);

        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.pending_frame(), None);
        assert_eq!(engine.scheduler().pending_count(), 0);
    }

    #[test]
    fn pointer_down_cancels_running_motion() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(100.0, 16.0, &mut region);
        engine.pointer_up(&region);
        assert_eq!(engine.mode(), Mode::Momentum);
        let stale = engine.pending_frame().unwrap();

        engine.pointer_down(100.0, 100.0, &region);

        assert_eq!(engine.mode(), Mode::Dragging);
        assert_eq!(engine.pending_frame(), None);
        assert_eq!(engine.scheduler().pending_count(), 0);
        assert_eq!(engine.on_frame(stale, &mut region), None);
        assert_eq!(engine.mode(), Mode::Dragging);
    }

    #[test]
    fn only_one_frame_pending_during_motion() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(100.0, 16.0, &mut region);
        engine.pointer_up(&region);

        for _ in 0..20 {
            assert!(engine.scheduler().pending_count() <= 1);
            engine.run_frame(&mut region);
        }
    }

    #[test]
    fn missing_surface_at_frame_settles() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(100.0, 16.0, &mut region);
        engine.pointer_up(&region);

        let mut missing: Option<ScrollRegion> = None;
        assert_eq!(engine.run_frame(&mut missing), None);
        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn up_and_leave_outside_drag_are_noops() {
        let region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(-40.0);
        let mut engine = engine();

        engine.pointer_up(&region);
        engine.pointer_leave(&region);

        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn unmount_cancels_and_is_idempotent() {
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(400.0);
        let mut engine = engine();

        engine.pointer_down(200.0, 0.0, &region);
        engine.pointer_move(100.0, 16.0, &mut region);
        engine.pointer_up(&region);

        engine.unmount();
        engine.unmount();

        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.scheduler().pending_count(), 0);
        assert_eq!(engine.scheduler().cancelled_count(), 1);
    }

    #[test]
    fn drop_cancels_pending_frame() {
        let mut clock = ManualFrameClock::new();
        let mut region = ScrollRegion::new(2000.0, 500.0).with_scroll_offset(-40.0);
        {
            let mut engine = ScrollEngine::new(ScrollConfig::default(), &mut clock);
            engine.pointer_down(0.0, 0.0, &region);
            engine.pointer_move(0.0, 1.0, &mut region);
            engine.pointer_up(&region);
            assert_eq!(engine.mode(), Mode::Elastic);
        }
        assert_eq!(clock.pending_count(), 0);
        assert_eq!(clock.cancelled_count(), 1);
    }

    #[test]
    fn try_new_rejects_runaway_config() {
        let config = ScrollConfig::default().with_deceleration(1.2);
        let err = ScrollEngine::try_new(config, ManualFrameClock::new()).unwrap_err();
        assert_eq!(err.field(), Some("deceleration"));
    }

    #[test]
    fn presentation_when_idle() {
        let engine = engine();
        let presentation = engine.presentation();

        assert_eq!(presentation.mode, Mode::Idle);
        assert!(!presentation.dragging);
        assert_eq!(presentation.cursor, Cursor::Grab);
        assert_eq!(presentation.transition, Some(Duration::from_millis(400)));
        assert_eq!(presentation.boundary_offset, 0.0);
    }

    #[test]
    fn handle_dispatches_events() {
        let mut region = ScrollRegion::new(2000.0, 500.0);
        let mut engine = engine();

        engine.handle(PointerEvent::Down { x: 300.0, t: 0.0 }, &mut region);
        engine.handle(PointerEvent::Move { x: 250.0, t: 16.0 }, &mut region);
        engine.handle(PointerEvent::Up { x: 250.0, t: 20.0 }, &mut region);

        assert_eq!(region.scroll_offset(), 50.0);
        assert_eq!(engine.mode(), Mode::Momentum);
        assert_eq!(engine.velocity(), -37.5);
    }

    #[test]
    fn cursor_display() {
        assert_eq!(Cursor::Grab.to_string(), "grab");
        assert_eq!(Cursor::Grabbing.to_string(), "grabbing");
    }
}
