//! Scroll extent and the boundary model.
//!
//! Both computations here are pure functions of an offset, the scrollable
//! extent and the configuration:
//!
//! - [`resist`] shapes a candidate drag offset once it crosses an edge so the
//!   content moves at a fraction of the pointer speed (rubber band).
//! - [`boundary_feedback`] derives the presentational translation that nudges
//!   the content while it sits past an edge.

use serde::{Deserialize, Serialize};

use crate::config::ScrollConfig;

/// Dimensions and position of a horizontal scroll container.
///
/// The valid scroll range is `[0, content_width - viewport_width]`, clamped
/// to `[0, 0]` when the content is narrower than the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollExtent {
    /// Total width of the scrollable content.
    pub content_width: f64,
    /// Visible width of the container.
    pub viewport_width: f64,
    /// Current scroll offset. May lie outside the valid range.
    pub scroll_offset: f64,
}

impl ScrollExtent {
    /// Creates a new extent.
    #[inline]
    pub const fn new(content_width: f64, viewport_width: f64, scroll_offset: f64) -> Self {
        Self {
            content_width,
            viewport_width,
            scroll_offset,
        }
    }

    /// Largest valid scroll offset.
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Whether `offset` lies outside `[0, max_scroll]`.
    #[inline]
    pub fn is_out_of_bounds(&self, offset: f64) -> bool {
        offset < 0.0 || offset > self.max_scroll()
    }

    /// The valid offset closest to `offset`.
    #[inline]
    pub fn nearest_in_bounds(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }
}

/// Applies elastic resistance to a candidate drag offset.
///
/// Inside `[0, max_scroll]` the candidate is returned unchanged. Past either
/// edge, only `elastic_resistance` of the overshoot survives.
///
/// # Example
///
/// ```rust
/// use glide::{resist, ScrollConfig};
///
/// let config = ScrollConfig::default(); // elastic_resistance = 0.5
/// assert_eq!(resist(-40.0, 1500.0, &config), -20.0);
/// assert_eq!(resist(1540.0, 1500.0, &config), 1520.0);
/// assert_eq!(resist(700.0, 1500.0, &config), 700.0);
/// ```
#[inline]
pub fn resist(candidate: f64, max_scroll: f64, config: &ScrollConfig) -> f64 {
    if candidate < 0.0 {
        candidate * config.elastic_resistance
    } else if candidate > max_scroll {
        max_scroll + (candidate - max_scroll) * config.elastic_resistance
    } else {
        candidate
    }
}

/// Computes the boundary feedback translation for `offset`.
///
/// Positive values push the content right (start edge), negative values
/// push it left (end edge). Overscroll within `boundary_threshold` produces
/// no feedback and the magnitude never exceeds `max_boundary_offset`.
///
/// # Example
///
/// ```rust
/// use glide::{boundary_feedback, ScrollConfig};
///
/// let config = ScrollConfig::default(); // threshold 10, cap 410, multiplier 1
/// assert_eq!(boundary_feedback(-25.0, 1500.0, &config), 25.0);
/// assert_eq!(boundary_feedback(1530.0, 1500.0, &config), -30.0);
/// assert_eq!(boundary_feedback(-5.0, 1500.0, &config), 0.0);
/// ```
#[inline]
pub fn boundary_feedback(offset: f64, max_scroll: f64, config: &ScrollConfig) -> f64 {
    if offset < -config.boundary_threshold {
        config
            .max_boundary_offset
            .min(offset.abs() * config.boundary_multiplier)
    } else if offset > max_scroll + config.boundary_threshold {
        -config
            .max_boundary_offset
            .min((offset - max_scroll) * config.boundary_multiplier)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_scroll_is_content_minus_viewport() {
        let extent = ScrollExtent::new(2000.0, 500.0, 0.0);
        assert_eq!(extent.max_scroll(), 1500.0);
    }

    #[test]
    fn max_scroll_clamps_narrow_content() {
        let extent = ScrollExtent::new(300.0, 500.0, 0.0);
        assert_eq!(extent.max_scroll(), 0.0);
        assert!(extent.is_out_of_bounds(1.0));
        assert!(!extent.is_out_of_bounds(0.0));
    }

    #[test]
    fn out_of_bounds_edges_are_inclusive() {
        let extent = ScrollExtent::new(2000.0, 500.0, 0.0);
        assert!(!extent.is_out_of_bounds(0.0));
        assert!(!extent.is_out_of_bounds(1500.0));
        assert!(extent.is_out_of_bounds(-0.01));
        assert!(extent.is_out_of_bounds(1500.01));
    }

    #[test]
    fn nearest_in_bounds_picks_edge() {
        let extent = ScrollExtent::new(2000.0, 500.0, 0.0);
        assert_eq!(extent.nearest_in_bounds(-30.0), 0.0);
        assert_eq!(extent.nearest_in_bounds(1600.0), 1500.0);
        assert_eq!(extent.nearest_in_bounds(42.0), 42.0);
    }

    #[test]
    fn resist_with_full_resistance_is_identity() {
        let config = ScrollConfig::default().with_elastic_resistance(1.0);
        assert_eq!(resist(-40.0, 100.0, &config), -40.0);
        assert_eq!(resist(140.0, 100.0, &config), 140.0);
    }

    #[test]
    fn feedback_is_capped() {
        let config = ScrollConfig::default().with_boundary_feedback(10.0, 50.0, 2.0);
        assert_eq!(boundary_feedback(-100.0, 1500.0, &config), 50.0);
        assert_eq!(boundary_feedback(1700.0, 1500.0, &config), -50.0);
    }

    #[test]
    fn feedback_respects_threshold_exactly() {
        let config = ScrollConfig::default();
        assert_eq!(boundary_feedback(-10.0, 1500.0, &config), 0.0);
        assert_eq!(boundary_feedback(1510.0, 1500.0, &config), 0.0);
        assert!(boundary_feedback(-10.5, 1500.0, &config) > 0.0);
        assert!(boundary_feedback(1510.5, 1500.0, &config) < 0.0);
    }
}
