//! Render state tracking for the panel.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Whole panel | First frame / layout change | Full clear, redraw all |
//! | Face | Redraw requested (tick, zone change, remote refresh) | Clear face area, repaint |
//! | Labels | Text or color change | Clear label area, redraw |
//!
//! Labels change at most once a minute, so most frames only repaint the face.

/// Tracks when the panel needs a full clear.
pub struct RenderState {
    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Label visibility or font changed since the last frame.
    layout_dirty: bool,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            layout_dirty: false,
        }
    }

    /// Check if this is the first frame.
    #[cfg(test)]
    #[inline]
    pub const fn is_first_frame(&self) -> bool { self.first_frame }

    /// Record that the layout must be recomputed.
    #[inline]
    pub const fn mark_layout_dirty(&mut self) { self.layout_dirty = true; }

    /// Check if the whole panel must be cleared and redrawn this frame.
    #[inline]
    pub const fn needs_full_clear(&self) -> bool { self.first_frame || self.layout_dirty }

    /// Call at end of frame to reset per-frame state.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.layout_dirty = false;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
