//! Scroll physics configuration.
//!
//! [`ScrollConfig`] is immutable once handed to an engine. Every field has a
//! documented default, and partial documents merge over those defaults field
//! by field:
//!
//! ```rust
//! use glide::ScrollConfig;
//!
//! let config = ScrollConfig::from_json_str(r#"{ "deceleration": 0.95 }"#).unwrap();
//! assert_eq!(config.deceleration, 0.95);
//! assert_eq!(config.velocity_multiplier, 12.0);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tuning knobs for momentum, elastic boundaries and boundary feedback.
///
/// Field names are snake_case; the camelCase spellings (`velocityMultiplier`,
/// `springForce`, ...) are accepted as aliases when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    // ========================================================================
    // Momentum
    // ========================================================================
    /// Scale applied to raw pointer velocity (px/ms) when sampling.
    ///
    /// Lower = slower momentum, higher = faster momentum.
    #[serde(alias = "velocityMultiplier")]
    pub velocity_multiplier: f64,

    /// Per-frame velocity retention during momentum, in `(0, 1)`.
    ///
    /// Lower = quicker stops, higher = longer coasting.
    pub deceleration: f64,

    /// Speed below which momentum stops, `> 0`.
    #[serde(alias = "minVelocity")]
    pub min_velocity: f64,

    // ========================================================================
    // Elastic boundaries
    // ========================================================================
    /// Fraction of pointer travel applied past an edge while dragging, in `(0, 1]`.
    #[serde(alias = "elasticResistance")]
    pub elastic_resistance: f64,

    /// Fraction of the remaining distance covered per spring-back frame, in `(0, 1]`.
    #[serde(alias = "springForce")]
    pub spring_force: f64,

    /// Per-frame velocity retention during spring-back, in `(0, 1]`.
    #[serde(alias = "elasticDamping")]
    pub elastic_damping: f64,

    // ========================================================================
    // Boundary feedback
    // ========================================================================
    /// Overscroll distance before boundary feedback kicks in, `>= 0`.
    #[serde(alias = "boundaryThreshold")]
    pub boundary_threshold: f64,

    /// Largest boundary feedback translation, `>= 0`.
    #[serde(alias = "maxBoundaryOffset")]
    pub max_boundary_offset: f64,

    /// Scale from overscroll distance to feedback translation, `>= 0`.
    #[serde(alias = "boundaryMultiplier")]
    pub boundary_multiplier: f64,

    /// Duration of the eased feedback transition while not dragging.
    #[serde(alias = "boundaryTransitionMs")]
    pub boundary_transition_ms: u64,

    // ========================================================================
    // Smoothing
    // ========================================================================
    /// Capacity of the raw velocity history, `>= 1`.
    #[serde(alias = "velocityHistorySize")]
    pub velocity_history_size: usize,

    /// Number of most recent samples averaged at release, `>= 1`.
    #[serde(alias = "velocitySmoothingCount")]
    pub velocity_smoothing_count: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            velocity_multiplier: 12.0,
            deceleration: 0.92,
            min_velocity: 0.1,
            elastic_resistance: 0.5,
            spring_force: 0.15,
            elastic_damping: 0.8,
            boundary_threshold: 10.0,
            max_boundary_offset: 410.0,
            boundary_multiplier: 1.0,
            boundary_transition_ms: 400,
            velocity_history_size: 10,
            velocity_smoothing_count: 5,
        }
    }
}

impl ScrollConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a (possibly partial) TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown fields.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::UnsupportedFormat`] for extensions other than
    /// `json`/`toml`, and [`ConfigError::Parse`] for invalid content.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Set the velocity multiplier.
    #[must_use]
    pub fn with_velocity_multiplier(mut self, multiplier: f64) -> Self {
        self.velocity_multiplier = multiplier;
        self
    }

    /// Set the momentum deceleration.
    #[must_use]
    pub fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Set the minimum momentum velocity.
    #[must_use]
    pub fn with_min_velocity(mut self, min_velocity: f64) -> Self {
        self.min_velocity = min_velocity;
        self
    }

    /// Set the drag resistance past an edge.
    #[must_use]
    pub fn with_elastic_resistance(mut self, resistance: f64) -> Self {
        self.elastic_resistance = resistance;
        self
    }

    /// Set the spring-back force and damping.
    #[must_use]
    pub fn with_spring(mut self, force: f64, damping: f64) -> Self {
        self.spring_force = force;
        self.elastic_damping = damping;
        self
    }

    /// Set the boundary feedback threshold, cap and multiplier.
    #[must_use]
    pub fn with_boundary_feedback(mut self, threshold: f64, max_offset: f64, multiplier: f64) -> Self {
        self.boundary_threshold = threshold;
        self.max_boundary_offset = max_offset;
        self.boundary_multiplier = multiplier;
        self
    }

    /// Set the velocity history capacity and smoothing window.
    #[must_use]
    pub fn with_velocity_smoothing(mut self, history_size: usize, smoothing_count: usize) -> Self {
        self.velocity_history_size = history_size;
        self.velocity_smoothing_count = smoothing_count;
        self
    }

    /// Transition applied to the boundary feedback while not dragging.
    #[must_use]
    pub const fn boundary_transition(&self) -> Duration {
        Duration::from_millis(self.boundary_transition_ms)
    }

    /// Validate every field against its documented range.
    ///
    /// Engines built with [`ScrollEngine::new`](crate::ScrollEngine::new) run
    /// with whatever they are given; an out-of-range `deceleration` or
    /// `min_velocity` means momentum never settles.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found, in field order.
    pub fn validate(&self) -> Result<()> {
        check(
            "velocity_multiplier",
            self.velocity_multiplier,
            self.velocity_multiplier.is_finite(),
            "a finite number",
        )?;
        check(
            "deceleration",
            self.deceleration,
            self.deceleration > 0.0 && self.deceleration < 1.0,
            "0 < deceleration < 1",
        )?;
        check(
            "min_velocity",
            self.min_velocity,
            self.min_velocity > 0.0 && self.min_velocity.is_finite(),
            "a finite value > 0",
        )?;
        check(
            "elastic_resistance",
            self.elastic_resistance,
            self.elastic_resistance > 0.0 && self.elastic_resistance <= 1.0,
            "0 < elastic_resistance <= 1",
        )?;
        check(
            "spring_force",
            self.spring_force,
            self.spring_force > 0.0 && self.spring_force <= 1.0,
            "0 < spring_force <= 1",
        )?;
        check(
            "elastic_damping",
            self.elastic_damping,
            self.elastic_damping > 0.0 && self.elastic_damping <= 1.0,
            "0 < elastic_damping <= 1",
        )?;
        for (field, value) in [
            ("boundary_threshold", self.boundary_threshold),
            ("max_boundary_offset", self.max_boundary_offset),
            ("boundary_multiplier", self.boundary_multiplier),
        ] {
            check(field, value, value >= 0.0 && value.is_finite(), "a finite value >= 0")?;
        }
        check(
            "velocity_history_size",
            self.velocity_history_size as f64,
            self.velocity_history_size >= 1,
            "at least 1",
        )?;
        check(
            "velocity_smoothing_count",
            self.velocity_smoothing_count as f64,
            self.velocity_smoothing_count >= 1,
            "at least 1",
        )?;
        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        [
            format!("Velocity multiplier: {}", self.velocity_multiplier),
            format!("Deceleration: {}", self.deceleration),
            format!("Min velocity: {}", self.min_velocity),
            format!("Elastic resistance: {}", self.elastic_resistance),
            format!("Spring force: {}", self.spring_force),
            format!("Elastic damping: {}", self.elastic_damping),
            format!("Boundary threshold: {}", self.boundary_threshold),
            format!("Max boundary offset: {}", self.max_boundary_offset),
            format!("Boundary multiplier: {}", self.boundary_multiplier),
            format!("Boundary transition: {}ms", self.boundary_transition_ms),
            format!("Velocity history size: {}", self.velocity_history_size),
            format!("Velocity smoothing count: {}", self.velocity_smoothing_count),
        ]
        .join("\n")
    }
}

fn check(field: &'static str, value: f64, ok: bool, expected: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            expected,
        })
    }
}
