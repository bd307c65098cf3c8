//! Text labels around the face and their change detection.
//!
//! The face is repainted every tick, but the labels only change once a minute
//! (time) or once a day (weekday and date). [`LabelTracker`] remembers what
//! was last written so unchanged labels are left alone.

use crate::sampler::{DisplaySample, format_date, format_time, weekday_label};
use crate::settings::FontDesc;

/// A host text widget.
pub trait Label {
    fn set_text(&mut self, text: &str);

    fn show(&mut self);

    fn hide(&mut self);

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Apply a font. Hosts without font selection can ignore it.
    fn set_font(&mut self, _font: &FontDesc) {}
}

/// The four label handles of one clock.
#[derive(Debug, Default)]
pub struct ClockLabels<L> {
    pub title: L,
    /// Weekday name.
    pub day: L,
    pub date: L,
    pub time: L,
}

/// Which labels a paint cycle rewrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelUpdate {
    /// Digital time label.
    pub time: bool,
    /// Weekday and date labels (always rewritten together).
    pub date: bool,
}

impl LabelUpdate {
    pub fn any(self) -> bool { self.time || self.date }
}

/// Last values written to the time and date labels.
///
/// Starts zeroed, so the first real sample always rewrites the labels (no
/// calendar day is 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelTracker {
    last_hour: u8,
    last_minute: u8,
    last_day: u8,
    last_month: u8,
}

impl LabelTracker {
    pub fn new() -> Self { Self::default() }

    /// Rewrite the labels whose displayed value differs from `sample`.
    ///
    /// Only the day of month gates the weekday and date labels; the month is
    /// recorded but not compared.
    pub fn apply<L: Label>(&mut self, sample: &DisplaySample, labels: &mut ClockLabels<L>) -> LabelUpdate {
        let mut update = LabelUpdate::default();

        if (sample.hour, sample.minute) != (self.last_hour, self.last_minute) {
            let text = format_time(sample.hour, sample.minute);
            labels.time.set_text(&text);
            self.last_hour = sample.hour;
            self.last_minute = sample.minute;
            update.time = true;
            log::debug!("time label -> {text}");
        }

        if sample.day_of_month != self.last_day {
            let weekday = weekday_label(sample.day_of_week);
            let date = format_date(sample.day_of_month, sample.month);
            labels.day.set_text(weekday);
            labels.date.set_text(&date);
            self.last_day = sample.day_of_month;
            self.last_month = sample.month;
            update.date = true;
            log::debug!("date labels -> {weekday} {date}");
        }

        update
    }

    /// Last displayed `(hour, minute)`.
    pub fn last_time(&self) -> (u8, u8) { (self.last_hour, self.last_minute) }

    /// Last displayed `(day, month)`.
    pub fn last_date(&self) -> (u8, u8) { (self.last_day, self.last_month) }
}

// =============================================================================
// Test Double
// =============================================================================

/// In-memory label recording every write.
#[cfg(any(test, feature = "test-util"))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryLabel {
    pub text: String,
    pub visible: bool,
    pub font: Option<FontDesc>,
    /// Number of `set_text` calls.
    pub writes: usize,
}

#[cfg(any(test, feature = "test-util"))]
impl Label for MemoryLabel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.writes += 1;
    }

    fn show(&mut self) { self.visible = true; }

    fn hide(&mut self) { self.visible = false; }

    fn set_font(&mut self, font: &FontDesc) { self.font = Some(font.clone()); }
}

// =============================================================================
// Unit Tests
// =============================================================================
