//! Text styles and font selection for the panel labels.
//!
//! Labels use `ProFont` bitmap fonts. A configured font descriptor such as
//! `Sans Bold 9.8` is mapped to the `ProFont` size closest to its pixel size;
//! family, weight and slant have no bitmap counterpart and are ignored.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

use clock_common::colors::{FALLBACK_TEXT, LABEL_TEXT};

/// Centered horizontally, positioned by the top edge.
pub const CENTERED_TOP: TextStyle =
    TextStyleBuilder::new().alignment(Alignment::Center).baseline(Baseline::Top).build();

/// Font used when a descriptor carries no size.
pub const DEFAULT_LABEL_FONT: &MonoFont = &PROFONT_9_POINT;

/// Available label fonts with their nominal sizes.
const FONTS: [(u32, &MonoFont); 7] = [
    (7, &PROFONT_7_POINT),
    (9, &PROFONT_9_POINT),
    (10, &PROFONT_10_POINT),
    (12, &PROFONT_12_POINT),
    (14, &PROFONT_14_POINT),
    (18, &PROFONT_18_POINT),
    (24, &PROFONT_24_POINT),
];

/// `ProFont` closest to `size` pixels. Ties go to the smaller font.
pub fn font_for_size(size: Option<u32>) -> &'static MonoFont<'static> {
    let Some(size) = size else {
        return DEFAULT_LABEL_FONT;
    };
    FONTS
        .iter()
        .min_by_key(|(nominal, _)| nominal.abs_diff(size))
        .map_or(DEFAULT_LABEL_FONT, |(_, font)| *font)
}

/// Label text style for `font`.
pub fn label_style(font: &'static MonoFont<'static>, fallback: bool) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(font, if fallback { FALLBACK_TEXT } else { LABEL_TEXT })
}

// =============================================================================
// Unit Tests
// =============================================================================
