//! Core of the analog clock panel.
//!
//! Everything here is independent of the window system: the host supplies a
//! scheduler, label widgets and a drawing surface through traits.
//!
//! - [`canvas`]: path-drawing trait and a recording implementation
//! - [`raster`]: canvas backed by an `embedded-graphics` draw target
//! - [`face`]: tick and hand geometry, face rendering
//! - [`zone`]: time zone resolution with UTC fallback
//! - [`sampler`]: time sources, display samples, label formatting
//! - [`labels`]: label trait and change detection
//! - [`refresh`]: scheduler trait and the refresh timer
//! - [`settings`]: persisted configuration and font descriptors
//! - [`widget`]: the per-clock aggregate tying it all together
//! - [`colors`]: Rgb565 palette

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod canvas;
pub mod colors;
pub mod face;
pub mod labels;
pub mod raster;
pub mod refresh;
pub mod sampler;
pub mod settings;
pub mod widget;
pub mod zone;

// Re-export commonly used items
pub use canvas::{Canvas, RecordingCanvas};
pub use labels::{ClockLabels, Label, LabelUpdate};
pub use raster::RasterCanvas;
pub use refresh::{REFRESH_INTERVAL, Scheduler};
pub use sampler::{DisplaySample, FixedTimeSource, SystemTimeSource, TimeSource};
pub use settings::{ClockSettings, FontDesc, SettingsError};
pub use widget::{ClockWidget, RemoteValue, WidgetEvent};
pub use zone::ZoneHandle;
