//! Command dispatch against the rendering engine.
//!
//! Hosts hand over `ViewerCommand`s instead of holding a mutable engine
//! handle; the dispatcher resolves navigator state (the current view's
//! default orientation) and drives the engine.

use orientation::OrientationError;
use thiserror::Error;
use viewer_api::{FrameCapture, ViewerCommand, ViewerEngine, ViewerError};

use crate::navigator::SceneNavigator;

/// What a successfully dispatched command produced.
#[derive(Debug)]
pub enum CommandOutcome {
    Frame(FrameCapture),
    OrientationReset,
    PanoramaLoaded,
}

/// Errors surfaced while executing a viewer command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no current view to apply the command to")]
    NoCurrentView,
    #[error("engine cannot capture a frame right now")]
    CaptureUnavailable,
    #[error(transparent)]
    Orientation(#[from] OrientationError),
    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

pub fn dispatch(
    command: &ViewerCommand,
    engine: &mut dyn ViewerEngine,
    navigator: &SceneNavigator,
) -> Result<CommandOutcome, CommandError> {
    match command {
        ViewerCommand::CaptureFrame => engine
            .capture_frame()
            .map(CommandOutcome::Frame)
            .ok_or(CommandError::CaptureUnavailable),
        ViewerCommand::ResetToDefaultOrientation => {
            let view = navigator.current_view().ok_or(CommandError::NoCurrentView)?;
            engine.animate_to(view.default_orientation.to_spherical()?)?;
            Ok(CommandOutcome::OrientationReset)
        }
        ViewerCommand::LoadPanorama { url, target } => {
            engine.load_panorama(url, *target)?;
            Ok(CommandOutcome::PanoramaLoaded)
        }
    }
}
