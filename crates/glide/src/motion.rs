//! Simulation state and the per-frame motion step.
//!
//! After release the engine runs [`advance`] once per display frame until it
//! reports [`Step::Settle`]. Each call picks one of two behaviours:
//!
//! - **Momentum**: `offset -= velocity`, then `velocity *= deceleration`.
//!   Stops once `|velocity| < min_velocity`.
//! - **Elastic**: `offset += (target - offset) * spring_force` toward the
//!   nearest valid edge, then `velocity *= elastic_damping`. Snaps to the
//!   edge once the remaining distance drops below [`SNAP_DISTANCE`].
//!
//! An offset outside the valid range always forces elastic mode, so momentum
//! that carries the content past an edge turns into a spring-back on the
//! following frame.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::boundary::{ScrollExtent, boundary_feedback};
use crate::config::ScrollConfig;
use crate::tracker::PointerTracker;
use crate::velocity::VelocityHistory;

/// Remaining spring-back distance (in offset units) below which the offset
/// snaps onto its target.
pub const SNAP_DISTANCE: f64 = 0.5;

/// What the engine is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// At rest. No frame work is scheduled.
    #[default]
    Idle,
    /// A pointer is down and writes the offset directly.
    Dragging,
    /// Free deceleration after release.
    Momentum,
    /// Spring correction toward the nearest valid edge.
    Elastic,
}

impl Mode {
    /// Whether this mode needs per-frame stepping.
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Momentum | Self::Elastic)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Momentum => "momentum",
            Self::Elastic => "elastic",
        };
        write!(f, "{name}")
    }
}

/// Result of a single [`advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Motion continues; write `offset` and schedule another frame.
    Continue {
        /// New scroll offset.
        offset: f64,
    },
    /// Motion is over; write `offset`. The state is back to [`Mode::Idle`].
    Settle {
        /// Final scroll offset.
        offset: f64,
    },
}

impl Step {
    /// The offset to write to the container.
    pub const fn offset(&self) -> f64 {
        match *self {
            Self::Continue { offset } | Self::Settle { offset } => offset,
        }
    }

    /// Whether the motion loop stops here.
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settle { .. })
    }
}

/// Mutable simulation state owned by one engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    mode: Mode,
    /// Current velocity in offset units per frame.
    pub velocity: f64,
    /// Presentational translation signalling overscroll.
    pub boundary_offset: f64,
    /// Raw velocity samples of the current drag.
    pub history: VelocityHistory,
    /// Pointer anchor and last sample of the current drag.
    pub tracker: PointerTracker,
}

impl SimulationState {
    /// Creates an idle state sized for `config`.
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            mode: Mode::Idle,
            velocity: 0.0,
            boundary_offset: 0.0,
            history: VelocityHistory::new(config.velocity_history_size),
            tracker: PointerTracker::default(),
        }
    }

    /// Creates a state already moving in `mode` with `velocity`.
    pub fn in_motion(config: &ScrollConfig, mode: Mode, velocity: f64) -> Self {
        let mut state = Self::new(config);
        state.mode = mode;
        state.velocity = velocity;
        state
    }

    /// Current mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches mode, logging the transition.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "scroll mode transition");
            self.mode = mode;
        }
    }

    /// Returns to [`Mode::Idle`] and clears the boundary feedback.
    pub fn settle(&mut self) {
        self.boundary_offset = 0.0;
        self.set_mode(Mode::Idle);
    }
}

/// Advances the motion simulation by one frame.
///
/// `extent` is re-read from the container every frame so content resizes are
/// picked up. Only [`Mode::Momentum`] and [`Mode::Elastic`] do any work; in
/// any other mode the current offset is returned as settled and the state is
/// left untouched.
///
/// # Example
///
/// ```rust
/// use glide::{advance, Mode, ScrollConfig, ScrollExtent, SimulationState, Step};
///
/// let config = ScrollConfig::default();
/// let mut state = SimulationState::in_motion(&config, Mode::Momentum, -37.5);
///
/// let step = advance(&mut state, &ScrollExtent::new(2000.0, 500.0, 0.0), &config);
/// assert_eq!(step, Step::Continue { offset: 37.5 });
/// assert!((state.velocity - -34.5).abs() < 1e-12);
/// ```
pub fn advance(state: &mut SimulationState, extent: &ScrollExtent, config: &ScrollConfig) -> Step {
    let offset = extent.scroll_offset;
    if !state.mode.is_animating() {
        return Step::Settle { offset };
    }

    let max_scroll = extent.max_scroll();
    if extent.is_out_of_bounds(offset) {
        state.set_mode(Mode::Elastic);
    }

    let step = match state.mode {
        Mode::Elastic => elastic_step(state, extent, config),
        _ => momentum_step(state, offset, max_scroll, config),
    };

    trace!(
        mode = %state.mode,
        offset = step.offset(),
        velocity = state.velocity,
        boundary_offset = state.boundary_offset,
        "motion step"
    );
    step
}

fn elastic_step(state: &mut SimulationState, extent: &ScrollExtent, config: &ScrollConfig) -> Step {
    let offset = extent.scroll_offset;
    let target = extent.nearest_in_bounds(offset);
    let distance = target - offset;

    if distance.abs() < SNAP_DISTANCE {
        state.velocity = 0.0;
        state.settle();
        return Step::Settle { offset: target };
    }

    let next = offset + distance * config.spring_force;
    state.boundary_offset = boundary_feedback(next, extent.max_scroll(), config);
    state.velocity *= config.elastic_damping;
    Step::Continue { offset: next }
}

fn momentum_step(
    state: &mut SimulationState,
    offset: f64,
    max_scroll: f64,
    config: &ScrollConfig,
) -> Step {
    if state.velocity.abs() < config.min_velocity {
        state.settle();
        return Step::Settle { offset };
    }

    let next = offset - state.velocity;
    state.boundary_offset = boundary_feedback(next, max_scroll, config);
    state.velocity *= config.deceleration;
    Step::Continue { offset: next }
}
