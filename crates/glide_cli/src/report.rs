//! Simulation reports.

use std::io::{self, Write};

use glide::Mode;
use serde::Serialize;

/// State of the engine after one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    /// 1-based frame index.
    pub frame: usize,
    /// Simulated time the frame fired at.
    pub t_ms: f64,
    /// Mode after the step.
    pub mode: Mode,
    /// Scroll offset written by the step.
    pub offset: f64,
    /// Velocity after the step.
    pub velocity: f64,
    /// Boundary feedback translation after the step.
    pub boundary_offset: f64,
}

/// Outcome of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub frames: usize,
    /// Velocity the last drag was released with, if any drag ended.
    pub release_velocity: Option<f64>,
    pub final_offset: f64,
    pub final_mode: Mode,
    pub max_scroll: f64,
    /// No frame pending and the engine is idle.
    pub settled: bool,
}

/// Frames plus summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub frames: Vec<FrameRecord>,
    pub summary: Summary,
}

impl Report {
    /// Writes the report as a frame table followed by a summary block.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:>5}  {:>9}  {:<9}  {:>11}  {:>10}  {:>9}",
            "frame", "t(ms)", "mode", "offset", "velocity", "boundary"
        )?;
        for record in &self.frames {
            writeln!(
                out,
                "{:>5}  {:>9.1}  {:<9}  {:>11.3}  {:>10.3}  {:>9.3}",
                record.frame,
                record.t_ms,
                record.mode.to_string(),
                record.offset,
                record.velocity,
                record.boundary_offset,
            )?;
        }

        let summary = &self.summary;
        writeln!(out)?;
        writeln!(out, "Frames: {}", summary.frames)?;
        match summary.release_velocity {
            Some(v) => writeln!(out, "Release velocity: {v:.3}")?,
            None => writeln!(out, "Release velocity: -")?,
        }
        writeln!(out, "Final offset: {:.3}", summary.final_offset)?;
        writeln!(out, "Max scroll: {:.3}", summary.max_scroll)?;
        writeln!(out, "Final mode: {}", summary.final_mode)?;
        writeln!(out, "Settled: {}", if summary.settled { "yes" } else { "no" })
    }

    /// Writes the report as one pretty-printed JSON document.
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}
