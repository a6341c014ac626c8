//! Headless stand-in for the external 360° rendering engine.
//!
//! Renders nothing, but faithfully implements the engine contract: it
//! tracks orientation and viewport, maps sphere directions to pixels with a
//! rectilinear projection, and reports behind-hemisphere points as
//! non-finite, which is how downstream pin visibility is decided.

use glam::DVec3;
use orientation::SphericalPosition;
use tracing::info;
use viewer_api::{FrameCapture, ScreenPoint, ViewerEngine, ViewerError, ViewerEvent, ViewerResult};

const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);
/// Vertical field of view of the simulated camera, degrees.
const FOV_Y_DEG: f64 = 60.0;

pub struct OfflineViewer {
    orientation: SphericalPosition,
    viewport: (u32, u32),
    panorama_url: Option<String>,
    events: Vec<ViewerEvent>,
    frame_fill: u8,
}

impl Default for OfflineViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineViewer {
    pub fn new() -> Self {
        Self {
            orientation: SphericalPosition::new(0.0, 0.0),
            viewport: DEFAULT_VIEWPORT,
            panorama_url: None,
            events: Vec::new(),
            frame_fill: 0x20,
        }
    }

    pub fn panorama_url(&self) -> Option<&str> {
        self.panorama_url.as_deref()
    }

    /// Simulate a window resize, queueing the matching event.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        self.events.push(ViewerEvent::Resized { width, height });
        self.events.push(ViewerEvent::Render);
    }

    fn focal_length_px(&self) -> f64 {
        let half_fov = (FOV_Y_DEG * 0.5).to_radians();
        f64::from(self.viewport.1) * 0.5 / half_fov.tan()
    }

    // Camera basis for the current orientation; right-handed, y up.
    fn basis(&self) -> (DVec3, DVec3, DVec3) {
        let forward = self.orientation.unit_vector();
        let mut right = DVec3::Y.cross(forward);
        if right.length_squared() < 1e-12 {
            // Looking straight up/down; any horizontal right works.
            right = DVec3::X;
        }
        let right = right.normalize();
        let up = forward.cross(right);
        (forward, right, up)
    }
}

impl ViewerEngine for OfflineViewer {
    fn name(&self) -> &str {
        "offline"
    }

    fn load_panorama(&mut self, url: &str, target: SphericalPosition) -> ViewerResult<()> {
        if url.is_empty() {
            return Err(ViewerError::PanoramaLoad("empty panorama URL".into()));
        }
        let first_load = self.panorama_url.is_none();
        info!(url, "loading panorama (offline)");
        self.panorama_url = Some(url.to_owned());
        self.orientation = target;
        if first_load {
            self.events.push(ViewerEvent::Ready);
        }
        self.events.push(ViewerEvent::PositionChanged(target));
        self.events.push(ViewerEvent::Render);
        Ok(())
    }

    fn animate_to(&mut self, target: SphericalPosition) -> ViewerResult<()> {
        if self.panorama_url.is_none() {
            return Err(ViewerError::NotReady);
        }
        self.orientation = target;
        self.events.push(ViewerEvent::PositionChanged(target));
        self.events.push(ViewerEvent::Render);
        Ok(())
    }

    fn orientation(&self) -> SphericalPosition {
        self.orientation
    }

    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn spherical_to_screen(&self, position: SphericalPosition) -> ScreenPoint {
        if !position.is_finite() {
            return ScreenPoint::OFFSCREEN;
        }
        let (forward, right, up) = self.basis();
        let direction = position.unit_vector();
        let depth = direction.dot(forward);
        if depth <= 1e-9 {
            // Behind the camera or on the hemisphere edge.
            return ScreenPoint::OFFSCREEN;
        }

        let focal = self.focal_length_px();
        let (width, height) = self.viewport;
        ScreenPoint::new(
            f64::from(width) * 0.5 + focal * direction.dot(right) / depth,
            f64::from(height) * 0.5 - focal * direction.dot(up) / depth,
        )
    }

    fn capture_frame(&self) -> Option<FrameCapture> {
        self.panorama_url.as_ref()?;
        let (width, height) = self.viewport;
        Some(FrameCapture {
            width,
            height,
            pixels: vec![self.frame_fill; width as usize * height as usize * 4],
        })
    }

    fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_viewer() -> OfflineViewer {
        let mut viewer = OfflineViewer::new();
        viewer
            .load_panorama(
                "https://cdn.example/pano.jpg",
                SphericalPosition::new(0.0, 0.0),
            )
            .unwrap();
        viewer.drain_events();
        viewer
    }

    #[test]
    fn facing_direction_lands_on_center() {
        let viewer = loaded_viewer();
        let point = viewer.spherical_to_screen(SphericalPosition::new(0.0, 0.0));
        assert!((point.x - 640.0).abs() < 1e-6);
        assert!((point.y - 360.0).abs() < 1e-6);
    }

    #[test]
    fn offsets_move_in_screen_space() {
        let viewer = loaded_viewer();
        let right = viewer.spherical_to_screen(SphericalPosition::new(0.2, 0.0));
        assert!(right.x > 640.0);

        let above = viewer.spherical_to_screen(SphericalPosition::new(0.0, 0.2));
        assert!(above.y < 360.0);
    }

    #[test]
    fn behind_camera_is_non_finite() {
        let viewer = loaded_viewer();
        let behind = viewer.spherical_to_screen(SphericalPosition::new(std::f64::consts::PI, 0.0));
        assert!(!behind.is_finite());

        let edge = viewer.spherical_to_screen(SphericalPosition::new(
            std::f64::consts::FRAC_PI_2,
            0.0,
        ));
        assert!(!edge.is_finite());
    }

    #[test]
    fn events_queue_and_drain() {
        let mut viewer = OfflineViewer::new();
        viewer
            .load_panorama("https://cdn.example/pano.jpg", SphericalPosition::new(0.5, 0.1))
            .unwrap();
        viewer.resize(1920, 1080);

        let events = viewer.drain_events();
        assert_eq!(events[0], ViewerEvent::Ready);
        assert!(events.contains(&ViewerEvent::Resized {
            width: 1920,
            height: 1080
        }));
        assert!(viewer.drain_events().is_empty());
    }

    #[test]
    fn animate_requires_a_panorama() {
        let mut viewer = OfflineViewer::new();
        let err = viewer
            .animate_to(SphericalPosition::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, ViewerError::NotReady));
        assert!(viewer.capture_frame().is_none());
    }

    #[test]
    fn capture_matches_viewport() {
        let mut viewer = loaded_viewer();
        viewer.resize(64, 32);
        let frame = viewer.capture_frame().unwrap();
        assert_eq!((frame.width, frame.height), (64, 32));
        assert_eq!(frame.pixels.len(), 64 * 32 * 4);
    }
}
