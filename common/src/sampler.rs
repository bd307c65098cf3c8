//! Time sampling and label text formatting.
//!
//! A [`DisplaySample`] is the snapshot one redraw cycle works from. It is
//! taken fresh on every paint and never stored; change detection keeps its own
//! copy of the fields it cares about (see [`LabelTracker`](crate::labels::LabelTracker)).

use core::cell::Cell;
use core::fmt::Write;

use heapless::String;
use jiff::{SignedDuration, Timestamp, Zoned};

use crate::zone::ZoneHandle;

/// Weekday labels, indexed by ISO day of week (Monday = 1).
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Label for a day of week outside 1..=7.
pub const UNKNOWN_WEEKDAY: &str = "---";

/// Source of the current instant.
pub trait TimeSource {
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Timestamp { (**self).now() }
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp { Timestamp::now() }
}

/// Frozen instant that can be moved by hand.
#[derive(Clone, Debug)]
pub struct FixedTimeSource {
    instant: Cell<Timestamp>,
}

impl FixedTimeSource {
    pub fn new(instant: Timestamp) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Jump to `instant`.
    pub fn set(&self, instant: Timestamp) { self.instant.set(instant); }

    /// Move forward (or backward, for negative durations). Saturates at the
    /// ends of the supported range.
    pub fn advance(&self, by: SignedDuration) {
        let current = self.instant.get();
        let next = current.checked_add(by).unwrap_or(current);
        self.instant.set(next);
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp { self.instant.get() }
}

/// Time fields driving one redraw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplaySample {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 1..=31
    pub day_of_month: u8,
    /// 1..=12
    pub month: u8,
    /// 1..=7, Monday = 1
    pub day_of_week: u8,
}

impl DisplaySample {
    /// Extract the display fields from a zoned datetime.
    pub fn from_zoned(zoned: &Zoned) -> Self {
        // All jiff civil fields used here are small and non-negative
        Self {
            hour: zoned.hour() as u8,
            minute: zoned.minute() as u8,
            day_of_month: zoned.day() as u8,
            month: zoned.month() as u8,
            day_of_week: zoned.weekday().to_monday_one_offset() as u8,
        }
    }
}

/// Read `source` and convert it into `zone`.
pub fn sample<T: TimeSource + ?Sized>(source: &T, zone: &ZoneHandle) -> DisplaySample {
    let zoned = source.now().to_zoned(zone.tz().clone());
    DisplaySample::from_zoned(&zoned)
}

/// Short weekday name for an ISO day of week.
pub fn weekday_label(day_of_week: u8) -> &'static str {
    match day_of_week {
        1..=7 => WEEKDAY_LABELS[usize::from(day_of_week - 1)],
        _ => UNKNOWN_WEEKDAY,
    }
}

/// Zero-padded `HH:MM`.
pub fn format_time(hour: u8, minute: u8) -> String<5> {
    let mut s = String::new();
    // Two u8 fields padded to two digits fit in 5 bytes unless a field is >= 100
    if write!(s, "{hour:02}:{minute:02}").is_err() {
        s.clear();
    }
    s
}

/// Zero-padded `DD/MM`.
pub fn format_date(day: u8, month: u8) -> String<5> {
    let mut s = String::new();
    if write!(s, "{day:02}/{month:02}").is_err() {
        s.clear();
    }
    s
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;

    use super::*;

    /// Thursday 2023-06-15 03:30 UTC.
    fn thursday() -> Timestamp { "2023-06-15T03:30:00Z".parse().unwrap() }

    #[test]
    fn test_weekday_table() {
        let expected = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(weekday_label(i as u8 + 1), *name, "Weekday {} mismatch", i + 1);
        }
    }

    #[test]
    fn test_weekday_out_of_range_is_dashes() {
        for day in [0, 8, 42, 255] {
            assert_eq!(weekday_label(day), "---", "Day {day} should map to the fallback");
        }
    }

    #[test]
    fn test_format_time_zero_pads() {
        assert_eq!(format_time(0, 0).as_str(), "00:00");
        assert_eq!(format_time(3, 30).as_str(), "03:30");
        assert_eq!(format_time(23, 59).as_str(), "23:59");
    }

    #[test]
    fn test_format_date_zero_pads() {
        assert_eq!(format_date(15, 6).as_str(), "15/06");
        assert_eq!(format_date(1, 12).as_str(), "01/12");
    }

    #[test]
    fn test_format_overflow_is_empty() {
        assert!(format_time(100, 0).is_empty(), "Three-digit field does not fit the label buffer");
    }

    #[test]
    fn test_sample_utc() {
        let source = FixedTimeSource::new(thursday());
        let s = sample(&source, &ZoneHandle::utc());
        assert_eq!(
            s,
            DisplaySample {
                hour: 3,
                minute: 30,
                day_of_month: 15,
                month: 6,
                day_of_week: 4,
            }
        );
    }

    #[test]
    fn test_sample_fixed_offset_crosses_midnight() {
        let source = FixedTimeSource::new(thursday());
        let s = sample(&source, &ZoneHandle::resolve("-05:00"));
        assert_eq!((s.hour, s.minute), (22, 30), "03:30Z is 22:30 at -05:00");
        assert_eq!((s.day_of_month, s.month, s.day_of_week), (14, 6, 3), "Previous day, a Wednesday");
    }

    #[test]
    fn test_sample_iana_zone() {
        let source = FixedTimeSource::new(thursday());
        let s = sample(&source, &ZoneHandle::resolve("Asia/Tokyo"));
        assert_eq!((s.hour, s.minute), (12, 30), "Tokyo is UTC+9 with no DST");
    }

    #[test]
    fn test_sample_invalid_zone_uses_utc() {
        let source = FixedTimeSource::new(thursday());
        let s = sample(&source, &ZoneHandle::resolve("Not/AZone"));
        assert_eq!((s.hour, s.minute), (3, 30), "Invalid zone should sample as UTC");
    }

    #[test]
    fn test_from_zoned_sunday_is_seven() {
        let zoned = "2023-06-18T10:00:00Z".parse::<Timestamp>().unwrap().to_zoned(TimeZone::UTC);
        assert_eq!(DisplaySample::from_zoned(&zoned).day_of_week, 7, "Sunday is the last ISO day");
    }

    #[test]
    fn test_fixed_source_set_and_advance() {
        let source = FixedTimeSource::new(thursday());
        source.advance(SignedDuration::from_mins(31));
        let tz = ZoneHandle::utc();
        assert_eq!(sample(&source, &tz).hour, 4, "Advancing 31 minutes crosses the hour");

        source.set(thursday());
        assert_eq!(source.now(), thursday(), "Set should jump back to the given instant");
    }
}
