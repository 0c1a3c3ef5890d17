//! The scroll container seam.

use crate::boundary::ScrollExtent;

/// A horizontally scrollable container the engine reads and writes.
///
/// While the engine is active it is the only writer of the scroll offset.
/// Returning `None` from [`extent`](Self::extent) means the container is gone
/// (unmounted, detached); pointer input is then ignored and running motion
/// settles.
pub trait ScrollSurface {
    /// Current content width, viewport width and scroll offset.
    fn extent(&self) -> Option<ScrollExtent>;

    /// Writes a new scroll offset. Values outside the valid range must be
    /// stored as-is so elastic overscroll stays visible.
    fn set_scroll_offset(&mut self, offset: f64);
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for &mut S {
    fn extent(&self) -> Option<ScrollExtent> {
        (**self).extent()
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }
}

impl<S: ScrollSurface> ScrollSurface for Option<S> {
    fn extent(&self) -> Option<ScrollExtent> {
        self.as_ref().and_then(ScrollSurface::extent)
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        if let Some(surface) = self {
            surface.set_scroll_offset(offset);
        }
    }
}

/// In-memory scroll container with an unclamped offset.
///
/// # Example
///
/// ```rust
/// use glide::{ScrollRegion, ScrollSurface};
///
/// let mut region = ScrollRegion::new(2000.0, 500.0);
/// region.set_scroll_offset(-12.0);
///
/// assert_eq!(region.scroll_offset(), -12.0);
/// assert_eq!(region.max_scroll(), 1500.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollRegion {
    content_width: f64,
    viewport_width: f64,
    scroll_offset: f64,
}

impl ScrollRegion {
    /// Creates a region scrolled to the start.
    pub const fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            content_width,
            viewport_width,
            scroll_offset: 0.0,
        }
    }

    /// Sets the initial scroll offset.
    pub const fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Changes the content width, leaving the offset where it is.
    pub fn resize_content(&mut self, content_width: f64) {
        self.content_width = content_width;
    }

    /// Changes the viewport width, leaving the offset where it is.
    pub fn resize_viewport(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width;
    }

    /// Current scroll offset.
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Total content width.
    pub const fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Visible width.
    pub const fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f64 {
        self.snapshot().max_scroll()
    }

    /// Whether the offset currently lies outside the valid range.
    pub fn is_overscrolled(&self) -> bool {
        self.snapshot().is_out_of_bounds(self.scroll_offset)
    }

    const fn snapshot(&self) -> ScrollExtent {
        ScrollExtent::new(self.content_width, self.viewport_width, self.scroll_offset)
    }
}

impl ScrollSurface for ScrollRegion {
    fn extent(&self) -> Option<ScrollExtent> {
        Some(self.snapshot())
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }
}
