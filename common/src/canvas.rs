//! Immediate-mode path drawing surface.
//!
//! The face renderer never talks to pixels directly. It issues path commands
//! against a [`Canvas`], the same small vocabulary a cairo context offers:
//!
//! | Call | Effect |
//! |------|--------|
//! | `move_to` | Start a new subpath at a point |
//! | `line_to` | Straight segment from the current point |
//! | `arc` | Circular arc, joined to the current point by a segment |
//! | `close_path` | Close the current subpath |
//! | `fill` / `stroke` | Paint the path, then clear it |
//!
//! Two implementations exist:
//! - [`RecordingCanvas`] keeps the command list. Tests assert on it.
//! - [`RasterCanvas`](crate::raster::RasterCanvas) rasterizes onto any
//!   `embedded-graphics` draw target.
//!
//! # Arc Convention
//!
//! The point at angle `a` is `(xc + r·cos a, yc + r·sin a)`. The sweep always
//! runs towards increasing angles; when `angle2 < angle1`, `angle2` is advanced
//! by 2π until it is not smaller. In screen coordinates (y down) that is a
//! clockwise sweep.

use core::f64::consts::TAU;

/// 2D drawing surface with an allocated size in pixels.
pub trait Canvas {
    /// Allocated width in pixels. May be zero or negative for degenerate layouts.
    fn width(&self) -> i32;

    /// Allocated height in pixels.
    fn height(&self) -> i32;

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Circular arc around `(xc, yc)` from `angle1` to `angle2` (radians).
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);

    fn close_path(&mut self);

    /// Fill all subpaths of the current path, then clear it.
    fn fill(&mut self);

    /// Stroke all subpaths of the current path, then clear it.
    fn stroke(&mut self);
}

/// Normalize an arc's end angle so the sweep runs forward from `angle1`.
///
/// Returns the sweep length in radians (always `>= 0`).
pub fn arc_sweep(angle1: f64, angle2: f64) -> f64 {
    let mut end = angle2;
    while end < angle1 {
        end += TAU;
    }
    end - angle1
}

// =============================================================================
// Recording Canvas
// =============================================================================

/// A single recorded drawing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64 },
    ClosePath,
    Fill,
    Stroke,
}

/// Canvas that records commands instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    width: i32,
    height: i32,
    ops: Vec<PathOp>,
}

impl RecordingCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All commands issued so far, in order.
    pub fn ops(&self) -> &[PathOp] { &self.ops }

    /// Number of `fill` commands issued.
    pub fn fill_count(&self) -> usize { self.ops.iter().filter(|op| matches!(op, PathOp::Fill)).count() }

    /// Drop the recorded commands, keeping the size.
    pub fn clear(&mut self) { self.ops.clear(); }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> i32 { self.width }

    fn height(&self) -> i32 { self.height }

    fn move_to(&mut self, x: f64, y: f64) { self.ops.push(PathOp::MoveTo { x, y }); }

    fn line_to(&mut self, x: f64, y: f64) { self.ops.push(PathOp::LineTo { x, y }); }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.ops.push(PathOp::Arc {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
    }

    fn close_path(&mut self) { self.ops.push(PathOp::ClosePath); }

    fn fill(&mut self) { self.ops.push(PathOp::Fill); }

    fn stroke(&mut self) { self.ops.push(PathOp::Stroke); }
}

// =============================================================================
// Unit Tests
// =============================================================================
