//! Scene navigation core for 360° tours.
//!
//! Resolves "what is on screen" from a project hierarchy plus in-flight
//! session edits, projects pin anchors into the viewport, and executes
//! viewer commands. Owns no rendering state and no persistence.

pub mod commands;
pub mod navigator;
pub mod projection;
pub mod snapshot;

pub use commands::{dispatch, CommandError, CommandOutcome};
pub use navigator::{AssetSource, SceneNavigator};
pub use projection::{PinOverlay, PinProjector};
pub use snapshot::{watermark_layout, WatermarkLayout};
