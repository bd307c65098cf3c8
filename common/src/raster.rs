//! [`Canvas`] implementation on top of an `embedded-graphics` draw target.
//!
//! embedded-graphics has no path API, only primitives. This adapter keeps the
//! current path as a list of flattened subpaths (polygons) and paints them
//! with primitives when the path is filled or stroked:
//!
//! - **Fill**: every subpath becomes a triangle fan anchored at its first vertex.
//!   Correct for shapes that are star-shaped from that vertex, which covers
//!   everything the face draws (tick discs start at their center, hand
//!   teardrops are convex).
//! - **Stroke**: every edge becomes a 1px [`Line`].
//!
//! Arcs are split into chords roughly 2px long, so tiny discs stay cheap and
//! large faces stay round.
//!
//! # Coordinates
//!
//! Canvas coordinates are relative to the draw target's origin and its size is
//! the target's bounding box. To draw a face into a sub-rectangle of the
//! display, crop the display to it and clip the crop to its own size
//! (`display.cropped(&area).clipped(..)`) so overshooting pixels are dropped.

use core::f64::consts::TAU;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Triangle};

use crate::canvas::{Canvas, arc_sweep};

/// Approximate chord length used when flattening arcs, in pixels.
const ARC_CHORD_PX: f64 = 2.0;

/// Bounds on the number of chords per arc.
const ARC_MIN_SEGMENTS: usize = 4;
const ARC_MAX_SEGMENTS: usize = 96;

/// Subpaths smaller than this (in both axes) are skipped when painting.
const MIN_EXTENT_PX: f64 = 0.5;

#[derive(Debug, Default)]
struct Subpath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

impl Subpath {
    fn starting_at(x: f64, y: f64) -> Self {
        Self {
            points: vec![(x, y)],
            closed: false,
        }
    }

    /// Largest side of the bounding box.
    fn extent(&self) -> f64 {
        let (mut min_x, mut min_y) = (f64::MAX, f64::MAX);
        let (mut max_x, mut max_y) = (f64::MIN, f64::MIN);
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (max_x - min_x).max(max_y - min_y)
    }
}

/// Path-drawing adapter over an `embedded-graphics` draw target.
pub struct RasterCanvas<'a, D>
where
    D: DrawTarget,
{
    target: &'a mut D,
    color: D::Color,
    subpaths: Vec<Subpath>,
    /// Start of the last closed subpath; the next segment continues from here.
    reopen_at: Option<(f64, f64)>,
}

impl<'a, D> RasterCanvas<'a, D>
where
    D: DrawTarget,
{
    /// Create a canvas painting in `color`.
    pub fn new(target: &'a mut D, color: D::Color) -> Self {
        Self {
            target,
            color,
            subpaths: Vec::new(),
            reopen_at: None,
        }
    }

    /// Change the paint color for subsequent fill/stroke calls.
    pub fn set_color(&mut self, color: D::Color) { self.color = color; }

    /// Open subpath that new segments extend, creating one if needed.
    fn open_subpath(&mut self, x: f64, y: f64) -> &mut Subpath {
        let needs_new = self.subpaths.last().is_none_or(|s| s.closed);
        if needs_new {
            let (sx, sy) = self.reopen_at.take().unwrap_or((x, y));
            self.subpaths.push(Subpath::starting_at(sx, sy));
        }
        // A subpath was pushed above if none was open
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn paint_fill(&mut self) {
        let style = PrimitiveStyle::with_fill(self.color);
        for subpath in &self.subpaths {
            if subpath.points.len() < 3 || subpath.extent() < MIN_EXTENT_PX {
                continue;
            }
            let anchor = to_point(subpath.points[0]);
            for pair in subpath.points[1..].windows(2) {
                Triangle::new(anchor, to_point(pair[0]), to_point(pair[1]))
                    .into_styled(style)
                    .draw(self.target)
                    .ok();
            }
        }
    }

    fn paint_stroke(&mut self) {
        let style = PrimitiveStyle::with_stroke(self.color, 1);
        for subpath in &self.subpaths {
            if subpath.points.len() < 2 || subpath.extent() < MIN_EXTENT_PX {
                continue;
            }
            for pair in subpath.points.windows(2) {
                Line::new(to_point(pair[0]), to_point(pair[1]))
                    .into_styled(style)
                    .draw(self.target)
                    .ok();
            }
            if subpath.closed
                && let (Some(&first), Some(&last)) = (subpath.points.first(), subpath.points.last())
            {
                Line::new(to_point(last), to_point(first))
                    .into_styled(style)
                    .draw(self.target)
                    .ok();
            }
        }
    }

    fn clear_path(&mut self) {
        self.subpaths.clear();
        self.reopen_at = None;
    }
}

impl<D> Canvas for RasterCanvas<'_, D>
where
    D: DrawTarget,
{
    fn width(&self) -> i32 { self.target.bounding_box().size.width as i32 }

    fn height(&self) -> i32 { self.target.bounding_box().size.height as i32 }

    fn move_to(&mut self, x: f64, y: f64) {
        self.reopen_at = None;
        self.subpaths.push(Subpath::starting_at(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) { self.open_subpath(x, y).points.push((x, y)); }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let sweep = arc_sweep(angle1, angle2);
        let segments = arc_segments(radius, sweep);
        let start = (xc + radius * angle1.cos(), yc + radius * angle1.sin());

        let subpath = self.open_subpath(start.0, start.1);
        if subpath.points.last() != Some(&start) {
            subpath.points.push(start);
        }
        for i in 1..=segments {
            let a = angle1 + sweep * i as f64 / segments as f64;
            subpath.points.push((xc + radius * a.cos(), yc + radius * a.sin()));
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut()
            && !subpath.closed
        {
            subpath.closed = true;
            self.reopen_at = subpath.points.first().copied();
        }
    }

    fn fill(&mut self) {
        self.paint_fill();
        self.clear_path();
    }

    fn stroke(&mut self) {
        self.paint_stroke();
        self.clear_path();
    }
}

/// Number of chords used to flatten an arc.
fn arc_segments(radius: f64, sweep: f64) -> usize {
    let length = radius.abs() * sweep;
    let wanted = (length / ARC_CHORD_PX).ceil() as usize;
    // Full circles get at least a few more chords than short arcs
    let floor = if sweep >= TAU - 1e-9 { ARC_MIN_SEGMENTS * 2 } else { ARC_MIN_SEGMENTS };
    wanted.clamp(floor, ARC_MAX_SEGMENTS)
}

fn to_point((x, y): (f64, f64)) -> Point { Point::new(x.round() as i32, y.round() as i32) }

// =============================================================================
// Unit Tests
// =============================================================================
