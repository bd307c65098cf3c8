//! Visual components of the clock panel.
//!
//! - [`label`]: the host label widget the clock writes its texts into
//! - [`panel`]: vertical layout of labels and face, and frame drawing
//!
//! # Drawing Strategy
//!
//! The whole panel is cleared only on the first frame and when the layout
//! changes. Otherwise the face area is repainted when the clock requests it
//! and each label area only when its text changes. See
//! [`render`](crate::render) for the state behind these decisions.

mod label;
mod panel;

pub use label::PanelLabel;
pub use panel::{Panel, full_panel_height};
