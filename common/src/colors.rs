//! Color constants for the clock panel.
//!
//! Standard colors come from the `RgbColor` trait constants; the rest are
//! hand-picked Rgb565 values (5 bits red, 6 bits green, 5 bits blue).

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Panel Colors
// =============================================================================

/// Panel background behind labels and face.
pub const BACKGROUND: Rgb565 = BLACK;

/// Tick discs and both hands.
pub const FACE: Rgb565 = WHITE;

/// Title, weekday, date and time labels.
pub const LABEL_TEXT: Rgb565 = WHITE;

/// Title label when the configured zone could not be resolved.
/// RGB565: (31, 32, 0), an orange warning tint.
pub const FALLBACK_TEXT: Rgb565 = Rgb565::new(31, 32, 0);
