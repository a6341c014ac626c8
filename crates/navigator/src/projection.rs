//! Screen-space projection of pin anchors.
//!
//! Recomputed when the engine reports a render/resize or when navigation
//! swaps the pin set; never per animation frame. The pin-set identity and
//! the projected overlays are replaced together, so a reader can never
//! observe coordinates belonging to a previous view.

use core_scene::{Pin, ViewId};
use orientation::{OrientationError, SphericalPosition};
use viewer_api::ScreenPoint;

/// One pin with its current-frame screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct PinOverlay {
    pub pin: Pin,
    pub point: ScreenPoint,
    /// False when the anchor is behind the camera or off the visible
    /// hemisphere (non-finite mapping output).
    pub visible: bool,
}

/// Holds the projected overlay set for the pins of one view.
#[derive(Debug, Default)]
pub struct PinProjector {
    view_id: Option<ViewId>,
    overlays: Vec<PinOverlay>,
}

impl PinProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-project `pins` through the engine's mapping function and adopt
    /// them as the overlay set for `view_id`.
    ///
    /// On error nothing is replaced: the previous pin set and overlays stay
    /// intact, so state never changes halfway.
    pub fn recompute<F>(
        &mut self,
        view_id: Option<ViewId>,
        pins: &[Pin],
        mut to_screen: F,
    ) -> Result<(), OrientationError>
    where
        F: FnMut(SphericalPosition) -> ScreenPoint,
    {
        let mut overlays = Vec::with_capacity(pins.len());
        for pin in pins {
            let point = to_screen(pin.anchor.to_spherical()?);
            overlays.push(PinOverlay {
                pin: pin.clone(),
                point,
                visible: point.is_finite(),
            });
        }
        self.view_id = view_id;
        self.overlays = overlays;
        Ok(())
    }

    pub fn overlays(&self) -> &[PinOverlay] {
        &self.overlays
    }

    /// Whether the held overlays belong to `view_id`; callers use this to
    /// detect staleness after navigation.
    pub fn matches_view(&self, view_id: Option<&ViewId>) -> bool {
        self.view_id.as_ref() == view_id
    }

    pub fn clear(&mut self) {
        self.view_id = None;
        self.overlays.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_scene::{PinId, RoomId};
    use orientation::Orientation;

    fn pin(id: &str, yaw: f64, pitch: f64) -> Pin {
        Pin {
            id: PinId::from(id),
            from_view_id: ViewId::from("view-living-day"),
            label: id.to_owned(),
            target_room_id: RoomId::from("room-bedroom"),
            target_view_id: None,
            anchor: Orientation::new(yaw, pitch),
        }
    }

    #[test]
    fn visibility_follows_finiteness() {
        let mut projector = PinProjector::new();
        let pins = vec![pin("pin-front", 10.0, 0.0), pin("pin-behind", 170.0, 0.0)];

        projector
            .recompute(Some(ViewId::from("view-living-day")), &pins, |spherical| {
                // Pretend everything past 90° of longitude is behind us.
                if spherical.longitude.abs() > std::f64::consts::FRAC_PI_2 {
                    ScreenPoint::OFFSCREEN
                } else {
                    ScreenPoint::new(spherical.longitude * 100.0, spherical.latitude * 100.0)
                }
            })
            .unwrap();

        let overlays = projector.overlays();
        assert_eq!(overlays.len(), 2);
        assert!(overlays[0].visible);
        assert!(!overlays[1].visible);
        assert!(projector.matches_view(Some(&ViewId::from("view-living-day"))));
    }

    #[test]
    fn failed_recompute_keeps_previous_state() {
        let mut projector = PinProjector::new();
        let good = vec![pin("pin-front", 10.0, 0.0)];
        projector
            .recompute(Some(ViewId::from("view-living-day")), &good, |_| {
                ScreenPoint::new(1.0, 2.0)
            })
            .unwrap();

        let bad = vec![pin("pin-nan", f64::NAN, 0.0)];
        let err = projector.recompute(Some(ViewId::from("view-living-dusk")), &bad, |_| {
            ScreenPoint::new(0.0, 0.0)
        });
        assert!(err.is_err());

        // Identity and overlays still describe the previous pin set.
        assert!(projector.matches_view(Some(&ViewId::from("view-living-day"))));
        assert_eq!(projector.overlays().len(), 1);
    }

    #[test]
    fn clear_drops_identity() {
        let mut projector = PinProjector::new();
        projector
            .recompute(Some(ViewId::from("view-living-day")), &[], |_| {
                ScreenPoint::new(0.0, 0.0)
            })
            .unwrap();
        projector.clear();
        assert!(projector.matches_view(None));
        assert!(projector.overlays().is_empty());
    }
}
