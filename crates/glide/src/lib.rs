#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]

//! # Glide
//!
//! Pointer-driven horizontal scroll physics.
//!
//! Glide turns raw pointer samples into a scroll offset, keeps the content
//! moving after release and pulls it back elastically when it ends up past
//! either edge of the scrollable range.
//!
//! Glide provides:
//! - **Input tracking**: drag anchoring and raw velocity sampling
//! - **Velocity estimation**: a bounded sample history averaged at release
//! - **Boundary model**: rubber-band resistance and boundary feedback offsets
//! - **Motion simulation**: per-frame momentum decay and spring-back
//!
//! The host owns rendering. It forwards pointer events, exposes its scroll
//! container through [`ScrollSurface`] and delivers frames requested through
//! a [`FrameScheduler`].
//!
//! ## Example
//!
//! ```rust
//! use glide::{ManualFrameClock, Mode, ScrollConfig, ScrollEngine, ScrollRegion};
//!
//! let mut region = ScrollRegion::new(2000.0, 500.0);
//! let mut engine = ScrollEngine::new(ScrollConfig::default(), ManualFrameClock::new());
//!
//! // Flick left by 50px in a single 16ms move
//! engine.pointer_down(300.0, 0.0, &region);
//! engine.pointer_move(250.0, 16.0, &mut region);
//! engine.pointer_up(&region);
//! assert_eq!(engine.mode(), Mode::Momentum);
//!
//! // Drive frames until the content comes to rest
//! let frames = engine.run_until_idle(&mut region, 10_000);
//! assert!(frames > 0);
//! assert_eq!(engine.mode(), Mode::Idle);
//! assert!(region.scroll_offset() > 50.0);
//! ```
//!
//! ## Modes
//!
//! - **Idle**: resting, no per-frame work
//! - **Dragging**: the pointer writes the offset directly
//! - **Momentum**: velocity decays geometrically each frame
//! - **Elastic**: a spring pulls the offset back to the nearest boundary

mod boundary;
mod config;
mod engine;
mod error;
mod frame;
mod motion;
mod surface;
mod tracker;
mod velocity;

pub use boundary::{ScrollExtent, boundary_feedback, resist};
pub use config::ScrollConfig;
pub use engine::{Cursor, PointerEvent, Presentation, ScrollEngine};
pub use error::{ConfigError, Result};
pub use frame::{FrameHandle, FrameScheduler, ManualFrameClock};
pub use motion::{Mode, SNAP_DISTANCE, SimulationState, Step, advance};
pub use surface::{ScrollRegion, ScrollSurface};
pub use tracker::PointerTracker;
pub use velocity::VelocityHistory;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ScrollConfig;
    pub use crate::engine::{Cursor, PointerEvent, Presentation, ScrollEngine};
    pub use crate::frame::{FrameHandle, FrameScheduler, ManualFrameClock};
    pub use crate::motion::Mode;
    pub use crate::surface::{ScrollRegion, ScrollSurface};
}
