//! Panel layout and drawing.
//!
//! The panel is a vertical box, top to bottom:
//!
//! ```text
//! ┌──────────────┐
//! │    Title     │
//! │     Thu      │
//! │    15/06     │
//! │   ┌──────┐   │
//! │   │ face │   │  size - BORDER square
//! │   └──────┘   │
//! │    03:30     │
//! └──────────────┘
//! ```
//!
//! Children are separated by [`BORDER`] pixels. Hidden labels collapse and the
//! children below move up.

use clock_common::colors::{BACKGROUND, FACE};
use clock_common::{ClockLabels, ClockWidget, RasterCanvas, Scheduler, TimeSource};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use super::label::PanelLabel;
use crate::config::BORDER;
use crate::render::RenderState;
use crate::styles::{CENTERED_TOP, label_style};

/// Where each child of the panel goes. `None` for hidden labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLayout {
    pub title: Option<Rectangle>,
    pub day: Option<Rectangle>,
    pub date: Option<Rectangle>,
    pub face: Rectangle,
    pub time: Option<Rectangle>,
}

impl PanelLayout {
    /// Stack the visible children of a panel `size` pixels wide.
    pub fn compute(size: u32, labels: &ClockLabels<PanelLabel>) -> Self {
        let mut y = BORDER as i32;
        let title = place(&mut y, size, &labels.title);
        let day = place(&mut y, size, &labels.day);
        let date = place(&mut y, size, &labels.date);

        let face_size = size.saturating_sub(BORDER);
        let face = Rectangle::new(Point::new((BORDER / 2) as i32, y), Size::new(face_size, face_size));
        y += (face_size + BORDER) as i32;

        let time = place(&mut y, size, &labels.time);

        Self {
            title,
            day,
            date,
            face,
            time,
        }
    }

    /// Label rectangles in title, day, date, time order.
    fn label_slots(&self) -> [Option<Rectangle>; 4] { [self.title, self.day, self.date, self.time] }

    /// Bottom edge of the lowest child plus the trailing border.
    #[cfg(test)]
    pub fn height(&self) -> u32 {
        let bottom = self
            .label_slots()
            .iter()
            .flatten()
            .chain(core::iter::once(&self.face))
            .map(|r| r.top_left.y + r.size.height as i32)
            .max()
            .unwrap_or(0);
        bottom as u32 + BORDER
    }
}

/// Next row of the box at `*y`, advancing it. Hidden labels take no row.
fn place(y: &mut i32, width: u32, label: &PanelLabel) -> Option<Rectangle> {
    if !label.is_visible() {
        return None;
    }
    let rect = Rectangle::new(Point::new(0, *y), Size::new(width, label.height()));
    *y += (label.height() + BORDER) as i32;
    Some(rect)
}

/// Display height for a panel with every label shown.
pub fn full_panel_height(size: u32, labels: &ClockLabels<PanelLabel>) -> u32 {
    let text: u32 = [&labels.title, &labels.day, &labels.date, &labels.time]
        .iter()
        .map(|l| l.line_height() + BORDER)
        .sum();
    BORDER + text + size.saturating_sub(BORDER) + BORDER
}

/// Draws a clock widget onto a display.
pub struct Panel {
    size: u32,
    layout: PanelLayout,
    render: RenderState,
}

impl Panel {
    pub fn new(size: u32, labels: &ClockLabels<PanelLabel>) -> Self {
        Self {
            size,
            layout: PanelLayout::compute(size, labels),
            render: RenderState::new(),
        }
    }

    #[cfg(test)]
    pub fn layout(&self) -> &PanelLayout { &self.layout }

    /// Draw whatever changed since the last frame. Returns true if anything
    /// was drawn.
    pub fn draw<D, S, T>(&mut self, display: &mut D, widget: &mut ClockWidget<S, PanelLabel, T>) -> bool
    where
        D: DrawTarget<Color = Rgb565>,
        S: Scheduler,
        T: TimeSource,
    {
        let labels = widget.labels();
        if [&labels.title, &labels.day, &labels.date, &labels.time].iter().any(|l| l.layout_changed()) {
            self.layout = PanelLayout::compute(self.size, labels);
            self.render.mark_layout_dirty();
        }

        let full = self.render.needs_full_clear();
        if full {
            display.clear(BACKGROUND).ok();
        }

        let mut drawn = full;
        // Painting may rewrite labels, so the face goes first
        if widget.take_redraw_request() || full {
            draw_face(display, self.layout.face, widget);
            drawn = true;
        }

        let slots = self.layout.label_slots();
        let labels = widget.labels_mut();
        let targets = [&mut labels.title, &mut labels.day, &mut labels.date, &mut labels.time];
        for (slot, label) in slots.into_iter().zip(targets) {
            if let Some(area) = slot
                && (full || label.is_dirty())
            {
                draw_label(display, area, label);
                drawn = true;
            }
            label.mark_clean();
        }

        self.render.end_frame();
        drawn
    }
}

/// Clear the face area and let the widget paint into it.
fn draw_face<D, S, T>(display: &mut D, area: Rectangle, widget: &mut ClockWidget<S, PanelLabel, T>)
where
    D: DrawTarget<Color = Rgb565>,
    S: Scheduler,
    T: TimeSource,
{
    display.fill_solid(&area, BACKGROUND).ok();
    let mut cropped = display.cropped(&area);
    let mut target = cropped.clipped(&Rectangle::new(Point::zero(), area.size));
    let mut canvas = RasterCanvas::new(&mut target, FACE);
    widget.paint(&mut canvas);
}

/// Clear a label area and draw its text centered.
fn draw_label<D>(display: &mut D, area: Rectangle, label: &PanelLabel)
where
    D: DrawTarget<Color = Rgb565>,
{
    display.fill_solid(&area, BACKGROUND).ok();
    let anchor = Point::new(area.top_left.x + (area.size.width / 2) as i32, area.top_left.y);
    Text::with_text_style(label.text(), anchor, label_style(label.font(), label.is_highlighted()), CENTERED_TOP)
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
