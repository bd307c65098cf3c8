//! Time zone handle resolution.
//!
//! A [`ZoneHandle`] is what the widget keeps between configuration changes:
//! the identifier the user typed plus the resolved `jiff` time zone. Resolution
//! never fails: unknown identifiers fall back to UTC and the handle remembers
//! that it did.
//!
//! # Accepted Identifiers
//!
//! | Input | Resolves to |
//! |-------|-------------|
//! | `Europe/Warsaw`, `America/New_York`, ... | IANA zone from the tz database |
//! | `UTC`, `Z` | UTC |
//! | `+05`, `-0330`, `+05:30` | Fixed offset |
//! | `""`, `local` | System zone |
//! | anything else | UTC (fallback) |

use jiff::tz::{Offset, TimeZone};

/// Identifier used when nothing else is configured.
pub const DEFAULT_ZONE: &str = "UTC";

/// Largest accepted fixed offset, in hours.
const MAX_OFFSET_HOURS: i32 = 24;

/// Resolved time zone owned by a clock.
#[derive(Clone, Debug)]
pub struct ZoneHandle {
    id: String,
    tz: TimeZone,
    fallback: bool,
}

impl ZoneHandle {
    /// Resolve `id`, falling back to UTC when it is not recognised.
    pub fn resolve(id: &str) -> Self {
        let trimmed = id.trim();
        match lookup(trimmed) {
            Some(tz) => Self {
                id: trimmed.to_string(),
                tz,
                fallback: false,
            },
            None => {
                log::warn!("unknown time zone {trimmed:?}, falling back to {DEFAULT_ZONE}");
                Self {
                    id: trimmed.to_string(),
                    tz: TimeZone::UTC,
                    fallback: true,
                }
            }
        }
    }

    /// The UTC handle.
    pub fn utc() -> Self {
        Self {
            id: DEFAULT_ZONE.to_string(),
            tz: TimeZone::UTC,
            fallback: false,
        }
    }

    /// Identifier as configured (trimmed).
    pub fn id(&self) -> &str { &self.id }

    /// Resolved time zone.
    pub fn tz(&self) -> &TimeZone { &self.tz }

    /// True if the identifier was not recognised and UTC is used instead.
    pub fn is_fallback(&self) -> bool { self.fallback }
}

impl Default for ZoneHandle {
    fn default() -> Self { Self::utc() }
}

fn lookup(id: &str) -> Option<TimeZone> {
    if id.is_empty() || id.eq_ignore_ascii_case("local") {
        return Some(TimeZone::system());
    }
    if id.eq_ignore_ascii_case("utc") || id == "Z" {
        return Some(TimeZone::UTC);
    }
    if id.starts_with(['+', '-']) {
        return parse_fixed_offset(id).map(TimeZone::fixed);
    }
    TimeZone::get(id).ok()
}

/// Parse `+HH`, `+HHMM` or `+HH:MM` (or with `-`).
fn parse_fixed_offset(id: &str) -> Option<Offset> {
    let (sign, rest) = match id.as_bytes().first()? {
        b'+' => (1, &id[1..]),
        b'-' => (-1, &id[1..]),
        _ => return None,
    };

    if !rest.is_ascii() {
        return None;
    }
    let (hh, mm) = match rest.len() {
        2 => (rest, "00"),
        4 => rest.split_at(2),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if hours > MAX_OFFSET_HOURS || minutes >= 60 {
        return None;
    }

    Offset::from_seconds(sign * (hours * 3600 + minutes * 60)).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
