//! Analog clock face geometry and drawing.
//!
//! Pure functions of the canvas size and the current hour/minute. Nothing is
//! cached between frames; every call recomputes the full geometry.
//!
//! # Angle Convention
//!
//! Angles are measured so that a point at angle `a` and distance `d` from the
//! face center sits at `(cx + sin(a)·d, cy + cos(a)·d)` in screen coordinates
//! (y grows downwards). Under that mapping:
//!
//! - `a = π` points straight up (12 o'clock)
//! - decreasing `a` sweeps clockwise
//!
//! so the hands use `π - fraction_of_turn · 2π`:
//!
//! ```text
//! minute_angle(m)    = π - (π/30)·m
//! hour_angle(h, m)   = π - (π/6)·((h mod 12) + m/60)
//! ```
//!
//! The hour hand includes the minute fraction, so it creeps through the hour
//! instead of jumping on the hour boundary.
//!
//! # Layout
//!
//! | Element | Distance from center | Size |
//! |---------|---------------------|------|
//! | Tick discs (12) | `radius · 0.9` | radius `radius · 0.1` |
//! | Minute hand tip | `radius · 0.8` | base radius `radius · 0.1` |
//! | Hour hand tip | `radius · 0.5` | base radius `radius · 0.1` |

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::canvas::Canvas;

// =============================================================================
// Geometry Constants
// =============================================================================

/// Tick disc radius and hand base radius, as a fraction of the face radius.
pub const CLOCK_SCALE: f64 = 0.1;

/// Number of hour tick marks.
pub const TICK_COUNT: usize = 12;

/// Minute hand length as a fraction of the face radius.
pub const MINUTE_HAND_SCALE: f64 = 0.8;

/// Hour hand length as a fraction of the face radius.
pub const HOUR_HAND_SCALE: f64 = 0.5;

// =============================================================================
// Angles
// =============================================================================

/// Hour hand angle for `hour` in [0, 23] and `minute` in [0, 59].
#[inline]
pub fn hour_angle(hour: u8, minute: u8) -> f64 {
    PI - (PI / 6.0) * (f64::from(hour % 12) + f64::from(minute) / 60.0)
}

/// Minute hand angle for `minute` in [0, 59].
#[inline]
pub fn minute_angle(minute: u8) -> f64 { PI - (PI / 30.0) * f64::from(minute) }

// =============================================================================
// Face Geometry
// =============================================================================

/// Center and radius of a face fitted into a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Teardrop hand outline: a half disc around the center joined to a tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hand {
    pub angle: f64,
    /// Point on the base circle a quarter turn clockwise of the hand direction.
    pub base_start: (f64, f64),
    pub base_radius: f64,
    pub tip: (f64, f64),
}

impl FaceGeometry {
    /// Fit a face into a `width` × `height` canvas.
    ///
    /// The center uses integer halves of the allocated size. Zero or negative
    /// sizes give a zero radius: the face collapses to a point.
    pub fn new(width: i32, height: i32) -> Self {
        let cx = f64::from(width.max(0) / 2);
        let cy = f64::from(height.max(0) / 2);
        Self {
            cx,
            cy,
            radius: cx.min(cy),
        }
    }

    /// Point at `angle`, `distance` away from the center.
    #[inline]
    pub fn point_at(&self, angle: f64, distance: f64) -> (f64, f64) {
        (self.cx + angle.sin() * distance, self.cy + angle.cos() * distance)
    }

    /// Radius of each tick disc.
    #[inline]
    pub fn tick_radius(&self) -> f64 { self.radius * CLOCK_SCALE }

    /// Centers of the twelve tick discs, independent of the time shown.
    pub fn tick_centers(&self) -> [(f64, f64); TICK_COUNT] {
        let distance = self.radius * (1.0 - CLOCK_SCALE);
        core::array::from_fn(|i| self.point_at(hour_angle(i as u8, 0), distance))
    }

    /// Outline of a hand pointing at `angle` reaching `scale · radius`.
    pub fn hand(&self, angle: f64, scale: f64) -> Hand {
        let base_radius = self.radius * CLOCK_SCALE;
        Hand {
            angle,
            base_start: self.point_at(angle - FRAC_PI_2, base_radius),
            base_radius,
            tip: self.point_at(angle, self.radius * scale),
        }
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw the whole face (ticks, minute hand, hour hand) for the given time.
pub fn render_face<C: Canvas + ?Sized>(canvas: &mut C, hour: u8, minute: u8) -> FaceGeometry {
    let face = FaceGeometry::new(canvas.width(), canvas.height());

    draw_ticks(canvas, &face);
    draw_hand(canvas, &face, &face.hand(minute_angle(minute), MINUTE_HAND_SCALE));
    draw_hand(canvas, &face, &face.hand(hour_angle(hour, minute), HOUR_HAND_SCALE));

    face
}

/// All twelve tick discs as one path, filled once.
pub fn draw_ticks<C: Canvas + ?Sized>(canvas: &mut C, face: &FaceGeometry) {
    let tick_radius = face.tick_radius();
    for (x, y) in face.tick_centers() {
        canvas.move_to(x, y);
        canvas.arc(x, y, tick_radius, 0.0, TAU);
        canvas.close_path();
    }
    canvas.fill();
}

/// Filled teardrop hand.
///
/// Starts on the base circle a quarter turn off the hand direction, sweeps half a turn
/// around the back of the center to the mirrored point, then runs straight to
/// the tip.
pub fn draw_hand<C: Canvas + ?Sized>(canvas: &mut C, face: &FaceGeometry, hand: &Hand) {
    let (xs, ys) = hand.base_start;
    canvas.move_to(xs, ys);
    canvas.arc(face.cx, face.cy, hand.base_radius, PI - hand.angle, -hand.angle);
    canvas.line_to(hand.tip.0, hand.tip.1);
    canvas.close_path();
    canvas.fill();
}

// =============================================================================
// Unit Tests
// =============================================================================
