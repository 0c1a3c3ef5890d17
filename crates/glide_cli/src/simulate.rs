//! Runs a gesture through the engine on a simulated frame clock.
//!
//! Frames fire every `frame_interval_ms` once motion starts. Frames due
//! before a pointer event fire first, so a second drag can interrupt a
//! running fling the way it would in a live container.

use glide::{ManualFrameClock, PointerEvent, ScrollConfig, ScrollEngine, ScrollRegion};
use tracing::{debug, info};

use crate::gesture::Gesture;
use crate::report::{FrameRecord, Report, Summary};

/// Simulation parameters that are not part of the engine config.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub frame_interval_ms: f64,
    pub max_frames: usize,
}

struct Simulation {
    engine: ScrollEngine,
    region: ScrollRegion,
    options: Options,
    next_frame_at: Option<f64>,
    frames: Vec<FrameRecord>,
}

impl Simulation {
    fn new(config: ScrollConfig, region: ScrollRegion, options: Options) -> Self {
        Self {
            engine: ScrollEngine::new(config, ManualFrameClock::new()),
            region,
            options,
            next_frame_at: None,
            frames: Vec::new(),
        }
    }

    fn budget_left(&self) -> bool {
        self.frames.len() < self.options.max_frames
    }

    /// Fires every frame due at or before `until`.
    fn fire_until(&mut self, until: f64) {
        while let Some(at) = self.next_frame_at.filter(|&at| at <= until) {
            if !self.budget_left() {
                return;
            }
            self.fire(at);
        }
    }

    fn fire(&mut self, at: f64) {
        if let Some(step) = self.engine.run_frame(&mut self.region) {
            self.frames.push(FrameRecord {
                frame: self.frames.len() + 1,
                t_ms: at,
                mode: self.engine.mode(),
                offset: step.offset(),
                velocity: self.engine.velocity(),
                boundary_offset: self.engine.boundary_offset(),
            });
        }
        self.next_frame_at = self
            .engine
            .pending_frame()
            .map(|_| at + self.options.frame_interval_ms);
    }

    /// Delivers one pointer event, returning the release velocity when it
    /// ended a drag.
    fn deliver(&mut self, event: PointerEvent) -> Option<f64> {
        let t = event.timestamp();
        self.fire_until(t);

        let was_dragging = self.engine.is_dragging();
        self.engine.handle(event, &mut self.region);
        debug!(?event, mode = %self.engine.mode(), offset = self.region.scroll_offset(), "delivered");

        let interval = self.options.frame_interval_ms;
        self.next_frame_at = self
            .engine
            .pending_frame()
            .map(|_| self.next_frame_at.unwrap_or(t + interval));

        (was_dragging && !self.engine.is_dragging()).then(|| self.engine.velocity())
    }

    fn drain(&mut self) {
        while let Some(at) = self.next_frame_at {
            if !self.budget_left() {
                return;
            }
            self.fire(at);
        }
    }

    fn finish(self, release_velocity: Option<f64>) -> Report {
        let settled = self.engine.pending_frame().is_none() && !self.engine.mode().is_animating();
        let summary = Summary {
            frames: self.frames.len(),
            release_velocity,
            final_offset: self.region.scroll_offset(),
            final_mode: self.engine.mode(),
            max_scroll: self.region.max_scroll(),
            settled,
        };
        info!(
            frames = summary.frames,
            offset = summary.final_offset,
            settled,
            "simulation finished"
        );
        Report {
            frames: self.frames,
            summary,
        }
    }
}

/// Runs `gesture` against `region` and records every frame.
pub fn run(config: ScrollConfig, region: ScrollRegion, gesture: &Gesture, options: Options) -> Report {
    let mut sim = Simulation::new(config, region, options);

    let mut release_velocity = None;
    for &event in &gesture.events {
        if let Some(v) = sim.deliver(event) {
            release_velocity = Some(v);
        }
    }
    sim.drain();
    sim.finish(release_velocity)
}
