//! Host label widget.
//!
//! A [`PanelLabel`] only stores what to draw. The panel decides when to draw
//! it, based on two flags:
//!
//! | Flag | Set by | Effect |
//! |------|--------|--------|
//! | `dirty` | text or color change | redraw this label's area |
//! | `layout_changed` | visibility or font change | recompute layout, full clear |

use core::fmt::Write;

use clock_common::{FontDesc, Label};
use embedded_graphics::mono_font::MonoFont;
use heapless::String;

use crate::styles::{DEFAULT_LABEL_FONT, font_for_size};

/// Maximum label text length in bytes. Longer titles are cut.
pub const LABEL_CAPACITY: usize = 48;

pub struct PanelLabel {
    text: String<LABEL_CAPACITY>,
    visible: bool,
    font: &'static MonoFont<'static>,
    highlight: bool,
    dirty: bool,
    layout_changed: bool,
}

impl PanelLabel {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            visible: true,
            font: DEFAULT_LABEL_FONT,
            highlight: false,
            dirty: true,
            layout_changed: true,
        }
    }

    pub fn text(&self) -> &str { &self.text }

    pub fn is_visible(&self) -> bool { self.visible }

    pub fn font(&self) -> &'static MonoFont<'static> { self.font }

    /// Draw in the warning color.
    pub fn set_highlight(&mut self, highlight: bool) {
        if self.highlight != highlight {
            self.highlight = highlight;
            self.dirty = true;
        }
    }

    pub fn is_highlighted(&self) -> bool { self.highlight }

    /// Height the label takes in the panel; zero when hidden.
    pub fn height(&self) -> u32 { if self.visible { self.line_height() } else { 0 } }

    /// Height of one text line in the current font.
    pub fn line_height(&self) -> u32 { self.font.character_size.height }

    pub fn is_dirty(&self) -> bool { self.dirty }

    pub fn layout_changed(&self) -> bool { self.layout_changed }

    /// Clear both flags after the panel has drawn the label.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
        self.layout_changed = false;
    }
}

impl Default for PanelLabel {
    fn default() -> Self { Self::new() }
}

impl Label for PanelLabel {
    fn set_text(&mut self, text: &str) {
        if self.text.as_str() == text {
            return;
        }
        self.text.clear();
        // Cut at the last char boundary that fits
        for c in text.chars() {
            if self.text.write_char(c).is_err() {
                log::debug!("label text cut to {LABEL_CAPACITY} bytes: {text:?}");
                break;
            }
        }
        self.dirty = true;
    }

    fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.layout_changed = true;
        }
    }

    fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.layout_changed = true;
        }
    }

    fn set_font(&mut self, font: &FontDesc) {
        let selected = font_for_size(font.pixel_size());
        if self.font.character_size != selected.character_size {
            self.font = selected;
            self.layout_changed = true;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
