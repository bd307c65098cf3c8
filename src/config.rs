//! Host configuration constants.
//!
//! Layout values are compile-time constants; the panel size and window scale
//! only have defaults here and can be overridden on the command line.

use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Panel Layout
// =============================================================================

/// Default panel width in pixels. The face is a square of this size minus
/// [`BORDER`].
pub const DEFAULT_PANEL_SIZE: u32 = 120;

/// Smallest accepted panel size. Keeps the face at least a few pixels wide.
pub const MIN_PANEL_SIZE: u32 = 16;

/// Largest accepted panel size. Keeps layout sums and pixel coordinates well
/// inside `i32`.
pub const MAX_PANEL_SIZE: u32 = 4096;

/// Spacing around and between the panel's children, in pixels.
pub const BORDER: u32 = 2;

/// Default window scale factor.
pub const DEFAULT_SCALE: u32 = 2;

/// Window title.
pub const WINDOW_TITLE: &str = "Analog Clock";

// =============================================================================
// Timing
// =============================================================================

/// Target frame time (~50 FPS). The run loop sleeps if a frame finishes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Zone Cycling
// =============================================================================

/// Zones the `Z` key cycles through.
pub const DEMO_ZONES: [&str; 6] = ["UTC", "Europe/Warsaw", "America/New_York", "Asia/Tokyo", "+05:30", "local"];

/// Identifier applied by the `X` key to exercise the UTC fallback.
pub const INVALID_ZONE: &str = "Invalid/Zone";

// =============================================================================
// Settings File
// =============================================================================

const CONFIG_DIR_NAME: &str = "analog-clock";
const CONFIG_FILE_NAME: &str = "clock.rc";

/// Default settings path: `$XDG_CONFIG_HOME/analog-clock/clock.rc`, falling
/// back to `$HOME/.config/...`, then to the working directory.
pub fn default_config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

// =============================================================================
// Unit Tests
// =============================================================================
