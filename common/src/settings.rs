//! Persisted clock configuration.
//!
//! Settings live in an INI-style rc file, one `Key=Value` per line:
//!
//! ```text
//! TitleFont=Sans Bold 9.8
//! DateFont=Sans Bold 9.8
//! TimeFont=Sans Bold 9.8
//! Title=Title
//! Timezone=UTC
//! ShowTitle=1
//! ShowDate=1
//! ShowTime=1
//! ```
//!
//! Blank lines, `#`/`;` comments and `[Group]` headers are accepted on read;
//! keys are looked up in every group. Unknown keys are ignored and missing
//! keys keep their defaults, so a missing or partial file always yields a
//! usable configuration.
//!
//! Values are escaped on write (`\n`, `\\`, control characters), and a
//! value with surrounding whitespace or a leading quote is written quoted,
//! so any title survives a save and reload unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use thiserror::Error;

use crate::zone::DEFAULT_ZONE;

/// Font used for every label unless configured otherwise.
pub const DEFAULT_FONT: &str = "Sans Bold 9.8";

/// Title shown above the face by default.
pub const DEFAULT_TITLE: &str = "Title";

/// Errors from reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },
}

// =============================================================================
// Font Descriptors
// =============================================================================

/// Parsed font descriptor such as `Sans Bold 9.8`.
///
/// Format: family words, then optional style words, then an optional size in
/// points (or pixels with a `px` suffix).
#[derive(Clone, Debug, PartialEq)]
pub struct FontDesc {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    /// Size in points; `None` when the descriptor has no size.
    pub size: Option<f32>,
}

impl FontDesc {
    pub fn parse(desc: &str) -> Self {
        let mut words: Vec<&str> = desc.split_whitespace().collect();
        let mut font = Self {
            family: String::new(),
            bold: false,
            italic: false,
            size: None,
        };

        if let Some(last) = words.last()
            && let Some(size) = parse_size(last)
        {
            font.size = Some(size);
            words.pop();
        }

        while let Some(last) = words.last() {
            match style_word(last) {
                Some(Style::Weight(bold)) => font.bold |= bold,
                Some(Style::Slant(italic)) => font.italic |= italic,
                None => break,
            }
            words.pop();
        }

        font.family = words.join(" ").trim_end_matches(',').to_string();
        font
    }

    /// Pixel size for bitmap font selection (truncated like a CSS `px` size).
    pub fn pixel_size(&self) -> Option<u32> {
        self.size.filter(|s| *s >= 1.0).map(|s| s as u32)
    }
}

enum Style {
    /// True when the weight is bold or heavier.
    Weight(bool),
    /// True for italic/oblique.
    Slant(bool),
}

fn style_word(word: &str) -> Option<Style> {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "bold" | "ultra-bold" | "extra-bold" | "heavy" | "ultra-heavy" | "black" => Some(Style::Weight(true)),
        "thin" | "ultra-light" | "extra-light" | "light" | "semi-light" | "book" | "medium" | "semi-bold"
        | "demi-bold" | "normal" | "regular" => Some(Style::Weight(false)),
        "italic" | "oblique" => Some(Style::Slant(true)),
        "roman" => Some(Style::Slant(false)),
        _ => None,
    }
}

fn parse_size(word: &str) -> Option<f32> {
    let number = word.strip_suffix("px").unwrap_or(word);
    number.parse::<f32>().ok().filter(|s| s.is_finite() && *s > 0.0)
}

// =============================================================================
// Clock Settings
// =============================================================================

/// Persisted configuration of one clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockSettings {
    pub title_font: String,
    pub date_font: String,
    pub time_font: String,
    pub title: String,
    pub timezone: String,
    pub show_title: bool,
    pub show_date: bool,
    pub show_time: bool,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            title_font: DEFAULT_FONT.to_string(),
            date_font: DEFAULT_FONT.to_string(),
            time_font: DEFAULT_FONT.to_string(),
            title: DEFAULT_TITLE.to_string(),
            timezone: DEFAULT_ZONE.to_string(),
            show_title: true,
            show_date: true,
            show_time: true,
        }
    }
}

impl ClockSettings {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_rc_str(&text).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                log::info!("loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write to `path`, creating its parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        self.to_ini().write_to_file_opt(path, write_option()).map_err(io_err)?;
        log::info!("saved settings to {}", path.display());
        Ok(())
    }

    /// Parse rc text on top of the defaults.
    pub fn from_rc_str(text: &str) -> Result<Self, ini::ParseError> {
        let ini = Ini::load_from_str_opt(text, parse_option())?;
        let mut settings = Self::default();
        for (_, properties) in ini.iter() {
            for (key, value) in properties.iter() {
                settings.set_entry(key, value);
            }
        }
        Ok(settings)
    }

    fn set_entry(&mut self, key: &str, value: &str) {
        match key {
            "TitleFont" => self.title_font = value.to_string(),
            "DateFont" => self.date_font = value.to_string(),
            "TimeFont" => self.time_font = value.to_string(),
            "Title" => self.title = value.to_string(),
            "Timezone" => self.timezone = value.to_string(),
            "ShowTitle" => self.show_title = read_flag(key, value, self.show_title),
            "ShowDate" => self.show_date = read_flag(key, value, self.show_date),
            "ShowTime" => self.show_time = read_flag(key, value, self.show_time),
            _ => log::debug!("ignoring unknown settings key {key:?}"),
        }
    }

    /// Serialize as rc text.
    pub fn to_rc_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        self.to_ini().write_to_opt(&mut buf, write_option()).ok();
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(None::<String>)
            .set("TitleFont", quoted(&self.title_font))
            .set("DateFont", quoted(&self.date_font))
            .set("TimeFont", quoted(&self.time_font))
            .set("Title", quoted(&self.title))
            .set("Timezone", quoted(&self.timezone))
            .set("ShowTitle", u8::from(self.show_title).to_string())
            .set("ShowDate", u8::from(self.show_date).to_string())
            .set("ShowTime", u8::from(self.show_time).to_string());
        ini
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: true,
        enabled_escape: true,
        ..ParseOption::default()
    }
}

fn write_option() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Basics,
        ..WriteOption::default()
    }
}

/// Wrap `value` in quotes when the reader would otherwise trim it or take a
/// leading quote as a delimiter.
fn quoted(value: &str) -> String {
    let needs_quotes = value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.starts_with(['"', '\'']);
    if !needs_quotes {
        return value.to_string();
    }
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        log::warn!("settings value {value:?} contains both quote styles and may not reload unchanged");
        value.to_string()
    }
}

/// Integer flag; non-zero is true. Malformed values keep `default`.
fn read_flag(key: &str, value: &str, default: bool) -> bool {
    match value.parse::<i64>() {
        Ok(n) => n != 0,
        Err(_) => {
            log::warn!("settings key {key}: {value:?} is not an integer, keeping {}", u8::from(default));
            default
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clock-common-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let s = ClockSettings::default();
        assert_eq!(s.title, "Title");
        assert_eq!(s.timezone, "UTC");
        assert_eq!(s.title_font, "Sans Bold 9.8");
        assert!(s.show_title && s.show_date && s.show_time, "All labels visible by default");
    }

    #[test]
    fn test_parse_full_file() {
        let text = "[clock]\n# comment\n\nTitle=Warsaw\nTimezone=Europe/Warsaw\nTimeFont=Mono 14\nShowTitle=0\nShowDate=1\nShowTime=0\n";
        let s = ClockSettings::from_rc_str(text).unwrap();
        assert_eq!(s.title, "Warsaw");
        assert_eq!(s.timezone, "Europe/Warsaw");
        assert_eq!(s.time_font, "Mono 14");
        assert_eq!(s.date_font, DEFAULT_FONT, "Missing key keeps its default");
        assert!(!s.show_title);
        assert!(s.show_date);
        assert!(!s.show_time);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let s = ClockSettings::from_rc_str("Title=a=b\n").unwrap();
        assert_eq!(s.title, "a=b", "Only the first '=' separates key and value");
    }

    #[test]
    fn test_malformed_flag_keeps_default() {
        let s = ClockSettings::from_rc_str("ShowDate=yes\nShowTime=2\n").unwrap();
        assert!(s.show_date, "Non-integer flag should keep the default");
        assert!(s.show_time, "Any non-zero integer is true");
    }

    #[test]
    fn test_rc_string_round_trip() {
        let s = ClockSettings {
            title: "Tokyo".into(),
            timezone: "Asia/Tokyo".into(),
            show_date: false,
            ..ClockSettings::default()
        };
        let text = s.to_rc_string();
        assert!(text.lines().any(|l| l == "ShowDate=0"), "Booleans are written as integers");
        assert!(text.lines().any(|l| l == "Title=Tokyo"), "Plain values are written bare");
        assert_eq!(ClockSettings::from_rc_str(&text).unwrap(), s);
    }

    #[test]
    fn test_title_with_newlines_cannot_inject_keys() {
        for title in ["Home\nTimezone=Mars/Base\nShowTime=0", "Home\nTitleFont=Mono 24", "a\\nb", "C:\\clock\\"] {
            let s = ClockSettings {
                title: title.into(),
                ..ClockSettings::default()
            };
            let text = s.to_rc_string();
            assert_eq!(text.lines().count(), 8, "Every value stays on its own line for {title:?}");
            assert_eq!(ClockSettings::from_rc_str(&text).unwrap(), s, "Title {title:?} should reload unchanged");
        }
    }

    #[test]
    fn test_title_whitespace_and_quotes_are_kept() {
        for title in ["  padded  ", "trailing\n", "\ttabbed", "\"quoted\" title", "'single' title", ""] {
            let s = ClockSettings {
                title: title.into(),
                ..ClockSettings::default()
            };
            let back = ClockSettings::from_rc_str(&s.to_rc_string()).unwrap();
            assert_eq!(back.title, title, "Title {title:?} should reload unchanged");
        }
    }

    #[test]
    fn test_unterminated_group_is_parse_error() {
        assert!(ClockSettings::from_rc_str("[clock\nTitle=x\n").is_err(), "Unclosed group header should fail");
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = temp_path("malformed");
        let path = dir.join("clock.rc");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "[clock\nTitle=x\n").unwrap();
        let result = ClockSettings::load(&path);
        fs::remove_dir_all(&dir).ok();
        assert!(matches!(result, Err(SettingsError::Parse { .. })), "Malformed file should be reported");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = temp_path("missing/clock.rc");
        let s = ClockSettings::load(&path).unwrap();
        assert_eq!(s, ClockSettings::default());
    }

    #[test]
    fn test_save_creates_parent_and_loads_back() {
        let dir = temp_path("save");
        let path = dir.join("nested").join("clock.rc");
        let s = ClockSettings {
            title: " Saved\nsettings ".into(),
            show_title: false,
            ..ClockSettings::default()
        };
        s.save(&path).unwrap();
        let loaded = ClockSettings::load(&path).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = temp_path("is-a-dir");
        fs::create_dir_all(&dir).unwrap();
        let result = ClockSettings::load(&dir);
        fs::remove_dir_all(&dir).ok();
        assert!(matches!(result, Err(SettingsError::Io { .. })), "Reading a directory should fail");
    }

    #[test]
    fn test_font_desc_default() {
        let font = FontDesc::parse(DEFAULT_FONT);
        assert_eq!(font.family, "Sans");
        assert!(font.bold);
        assert!(!font.italic);
        assert_eq!(font.size, Some(9.8));
        assert_eq!(font.pixel_size(), Some(9), "Size is truncated to whole pixels");
    }

    #[test]
    fn test_font_desc_multiword_family_and_slant() {
        let font = FontDesc::parse("DejaVu Sans Mono Oblique 12");
        assert_eq!(font.family, "DejaVu Sans Mono");
        assert!(font.italic, "Oblique counts as italic");
        assert!(!font.bold);
        assert_eq!(font.pixel_size(), Some(12));
    }

    #[test]
    fn test_font_desc_semibold_is_not_bold() {
        assert!(!FontDesc::parse("Sans Semi-Bold 10").bold, "Semi-bold is lighter than bold");
        assert!(FontDesc::parse("Sans Heavy 10").bold, "Heavy is at least bold");
    }

    #[test]
    fn test_font_desc_without_size() {
        let font = FontDesc::parse("Serif Italic");
        assert_eq!(font.family, "Serif");
        assert!(font.italic);
        assert_eq!(font.size, None);
        assert_eq!(font.pixel_size(), None);
    }

    #[test]
    fn test_font_desc_px_suffix() {
        assert_eq!(FontDesc::parse("Sans 16px").size, Some(16.0));
    }
}
