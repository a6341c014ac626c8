use orientation::SphericalPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias for fallible engine operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Screen-space point produced by the engine's coordinate mapping.
///
/// Components may be non-finite when the mapped direction lies behind the
/// camera or outside the visible hemisphere; callers derive visibility from
/// finiteness and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const OFFSCREEN: ScreenPoint = ScreenPoint {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Raw frame handed back by `capture_frame`, RGBA8 row-major.
#[derive(Debug, Clone, Default)]
pub struct FrameCapture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Notifications emitted by the engine and drained once per tick.
///
/// `Render` and `Resized` are the only triggers for pin re-projection;
/// per-animation-frame polling is deliberately not part of the contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    /// The initial panorama finished loading and the engine is interactive.
    Ready,
    /// The camera orientation changed (user drag or animation).
    PositionChanged(SphericalPosition),
    /// A frame was rendered; projected overlay positions may be stale.
    Render,
    /// The viewport changed size.
    Resized { width: u32, height: u32 },
}

/// Trait implemented by any 360° rendering engine serving the application.
///
/// The engine owns all rendering state; the core only pushes panoramas and
/// target orientations in and reads orientation/mapping/events back out.
pub trait ViewerEngine {
    /// Human-friendly identifier for logging purposes.
    fn name(&self) -> &str;

    /// Swap the displayed panorama, pointing the camera at `target`.
    /// Returns once the new panorama is loaded.
    fn load_panorama(&mut self, url: &str, target: SphericalPosition) -> ViewerResult<()>;

    /// Animate the camera toward `target` without changing the panorama.
    fn animate_to(&mut self, target: SphericalPosition) -> ViewerResult<()>;

    /// Current camera orientation.
    fn orientation(&self) -> SphericalPosition;

    /// Current viewport size in pixels.
    fn viewport(&self) -> (u32, u32);

    /// Map a direction on the sphere to viewport pixels.
    ///
    /// Contract risk: visibility detection relies on this returning
    /// non-finite coordinates for behind-camera points. An engine that
    /// returns finite nonsense there will mis-place pins; no fallback
    /// heuristic is applied on this side of the boundary.
    fn spherical_to_screen(&self, position: SphericalPosition) -> ScreenPoint;

    /// Grab the currently displayed frame, if the engine can provide one.
    fn capture_frame(&self) -> Option<FrameCapture>;

    /// Drain queued notifications (called by the host once per tick).
    fn drain_events(&mut self) -> Vec<ViewerEvent>;
}

/// Explicit command surface exposed to hosting UIs.
///
/// Replaces a mutable viewer handle: hosts enqueue commands and the
/// dispatcher runs them against the engine, so behavior stays testable
/// without any UI tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    /// Capture the current frame for snapshot/watermark processing.
    CaptureFrame,
    /// Animate back to the current view's stored default orientation.
    ResetToDefaultOrientation,
    /// Load a panorama by URL, facing `target`.
    LoadPanorama {
        url: String,
        target: SphericalPosition,
    },
}

/// Corner placement for snapshot watermarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatermarkStrategy {
    BottomRight,
    BottomLeft,
}

/// Validates candidate panorama uploads by probing their pixel dimensions.
///
/// Acceptance rules (2:1 aspect, minimum resolution) live with the scene
/// model; this trait only answers "how large is this image".
pub trait UploadValidator {
    fn probe_dimensions(&self, bytes: &[u8]) -> Result<(u32, u32), UploadError>;
}

/// Owner of object-URL lifecycles for uploaded blobs.
///
/// Every URL created here must eventually be revoked exactly once; the
/// navigator tracks its own creations and drives revocation at teardown.
pub trait ObjectUrlHost {
    fn create_object_url(&mut self, bytes: &[u8]) -> String;
    fn revoke_object_url(&mut self, url: &str);
}

/// Standardized error type for engine interactions.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("panorama failed to load: {0}")]
    PanoramaLoad(String),
    #[error("engine not ready")]
    NotReady,
    #[error("operation unsupported: {0}")]
    Unsupported(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced while probing candidate uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unable to read image dimensions: {0}")]
    Unreadable(String),
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}
