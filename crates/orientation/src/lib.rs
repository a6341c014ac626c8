use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias for fallible orientation conversions.
pub type OrientationResult<T> = Result<T, OrientationError>;

pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Camera/pin heading in degrees.
///
/// Canonical ranges: yaw in (-180, 180], pitch in [-90, 90]. Exactly -180
/// canonicalizes to +180; both `normalize_yaw` and the display format apply
/// the same convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub const fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Reduces yaw into (-180, 180] and saturates pitch into [-90, 90].
    pub fn normalized(self) -> Self {
        Self {
            yaw: normalize_yaw(self.yaw),
            pitch: clamp_pitch(self.pitch),
        }
    }

    pub fn is_finite(self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite()
    }

    /// Converts to the renderer's longitude/latitude radian representation.
    ///
    /// Non-finite input signals an upstream bug and is rejected rather than
    /// clamped.
    pub fn to_spherical(self) -> OrientationResult<SphericalPosition> {
        if !self.is_finite() {
            return Err(OrientationError::NonFinite {
                yaw: self.yaw,
                pitch: self.pitch,
            });
        }
        let normalized = self.normalized();
        Ok(SphericalPosition {
            longitude: normalized.yaw * DEG_TO_RAD,
            latitude: normalized.pitch * DEG_TO_RAD,
        })
    }

    /// Unit view ray for this heading (y up, yaw 0 looking down +z).
    pub fn direction(self) -> OrientationResult<DVec3> {
        Ok(self.to_spherical()?.unit_vector())
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let normalized = self.normalized();
        let yaw = round_half_up_tenths(normalized.yaw);
        let pitch = round_half_up_tenths(normalized.pitch);
        write!(f, "{yaw:.1}°, {pitch:.1}°")
    }
}

/// Longitude/latitude pair in radians, as consumed by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalPosition {
    pub longitude: f64,
    pub latitude: f64,
}

impl SphericalPosition {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_finite(self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Converts back to the degree representation, re-normalizing on the way
    /// out so no raw value escapes the canonical ranges.
    pub fn to_orientation(self) -> OrientationResult<Orientation> {
        if !self.is_finite() {
            return Err(OrientationError::NonFiniteSpherical {
                longitude: self.longitude,
                latitude: self.latitude,
            });
        }
        Ok(Orientation {
            yaw: normalize_yaw(self.longitude * RAD_TO_DEG),
            pitch: clamp_pitch(self.latitude * RAD_TO_DEG),
        })
    }

    /// Unit vector on the viewing sphere (y up, longitude 0 along +z).
    pub fn unit_vector(self) -> DVec3 {
        let cos_lat = self.latitude.cos();
        DVec3::new(
            self.longitude.sin() * cos_lat,
            self.latitude.sin(),
            self.longitude.cos() * cos_lat,
        )
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG_TO_RAD
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD_TO_DEG
}

/// Reduces a yaw angle modulo 360 into (-180, 180].
///
/// Exactly -180 wraps to the positive edge, so 180 is the single
/// representation of the antipodal heading. Idempotent for finite input.
pub fn normalize_yaw(degrees: f64) -> f64 {
    let mut yaw = degrees % 360.0;
    if yaw <= -180.0 {
        yaw += 360.0;
    } else if yaw > 180.0 {
        yaw -= 360.0;
    }
    yaw
}

/// Saturates a pitch angle into [-90, 90].
pub fn clamp_pitch(degrees: f64) -> f64 {
    if degrees > 90.0 {
        return 90.0;
    }
    if degrees < -90.0 {
        return -90.0;
    }
    degrees
}

/// Canonical one-decimal display string, e.g. `"45.2°, -12.3°"`.
pub fn format_orientation(orientation: Orientation) -> String {
    orientation.to_string()
}

// Half-up at the tenths place; f64::round is half-away-from-zero, which
// would disagree with the display contract for negative midpoints.
fn round_half_up_tenths(value: f64) -> f64 {
    let scaled = (value * 10.0 + 0.5).floor() / 10.0;
    if scaled == 0.0 {
        0.0
    } else {
        scaled
    }
}

/// Errors surfaced when converting between degree and radian spaces.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrientationError {
    #[error("orientation out of domain: yaw {yaw}, pitch {pitch}")]
    NonFinite { yaw: f64, pitch: f64 },
    #[error("spherical position out of domain: longitude {longitude}, latitude {latitude}")]
    NonFiniteSpherical { longitude: f64, latitude: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn degrees_to_radians_and_back() {
        assert_close(deg_to_rad(180.0), std::f64::consts::PI, 1e-12);
        assert_close(rad_to_deg(deg_to_rad(180.0)), 180.0, 1e-12);
    }

    #[test]
    fn normalize_yaw_reduces_into_range() {
        assert_eq!(normalize_yaw(270.0), -90.0);
        assert_eq!(normalize_yaw(45.0), 45.0);
        assert_eq!(normalize_yaw(190.0), -170.0);
        assert_eq!(normalize_yaw(-190.0), 170.0);
    }

    #[test]
    fn normalize_yaw_pins_antipode_to_positive_edge() {
        assert_eq!(normalize_yaw(180.0), 180.0);
        assert_eq!(normalize_yaw(-180.0), 180.0);
        assert_eq!(normalize_yaw(-540.0), 180.0);
        assert_eq!(normalize_yaw(540.0), 180.0);
    }

    #[test]
    fn clamp_pitch_saturates() {
        assert_eq!(clamp_pitch(120.0), 90.0);
        assert_eq!(clamp_pitch(-120.0), -90.0);
        assert_eq!(clamp_pitch(45.0), 45.0);
    }

    #[test]
    fn spherical_round_trip() {
        let orientation = Orientation::new(135.0, -12.0);
        let spherical = orientation.to_spherical().unwrap();
        let restored = spherical.to_orientation().unwrap();
        assert_close(restored.yaw, orientation.yaw, 1e-9);
        assert_close(restored.pitch, orientation.pitch, 1e-9);
    }

    #[test]
    fn to_spherical_rejects_non_finite() {
        let err = Orientation::new(f64::NAN, 0.0).to_spherical().unwrap_err();
        assert!(matches!(err, OrientationError::NonFinite { .. }));

        let err = SphericalPosition::new(f64::INFINITY, 0.0)
            .to_orientation()
            .unwrap_err();
        assert!(matches!(err, OrientationError::NonFiniteSpherical { .. }));
    }

    #[test]
    fn formats_one_decimal_half_up() {
        assert_eq!(
            format_orientation(Orientation::new(45.234, -12.345)),
            "45.2°, -12.3°"
        );
        assert_eq!(
            format_orientation(Orientation::new(0.0, 0.0)),
            "0.0°, 0.0°"
        );
        // Normalization applies before rounding; -0.04 must not print "-0.0".
        assert_eq!(
            format_orientation(Orientation::new(-0.04, 360.25)),
            "0.0°, 90.0°"
        );
        assert_eq!(
            format_orientation(Orientation::new(-180.0, -90.0)),
            "180.0°, -90.0°"
        );
    }

    #[test]
    fn direction_axes() {
        let forward = Orientation::new(0.0, 0.0).direction().unwrap();
        assert_close(forward.z, 1.0, 1e-12);
        assert_close(forward.x, 0.0, 1e-12);

        let up = Orientation::new(0.0, 90.0).direction().unwrap();
        assert_close(up.y, 1.0, 1e-12);

        let right = Orientation::new(90.0, 0.0).direction().unwrap();
        assert_close(right.x, 1.0, 1e-12);
    }

    proptest! {
        #[test]
        fn normalize_yaw_stays_in_range(yaw in -100_000.0f64..100_000.0) {
            let normalized = normalize_yaw(yaw);
            prop_assert!(normalized > -180.0 && normalized <= 180.0);
        }

        #[test]
        fn normalize_yaw_is_idempotent(yaw in -100_000.0f64..100_000.0) {
            let once = normalize_yaw(yaw);
            prop_assert_eq!(normalize_yaw(once), once);
        }

        #[test]
        fn clamp_pitch_is_monotonic(a in -400.0f64..400.0, b in -400.0f64..400.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(clamp_pitch(lo) <= clamp_pitch(hi));
        }

        #[test]
        fn canonical_orientations_round_trip(
            yaw in -179.999f64..=180.0,
            pitch in -90.0f64..=90.0,
        ) {
            let orientation = Orientation::new(yaw, pitch);
            let restored = orientation
                .to_spherical()
                .unwrap()
                .to_orientation()
                .unwrap();
            prop_assert!((restored.yaw - yaw).abs() <= 1e-9);
            prop_assert!((restored.pitch - pitch).abs() <= 1e-9);
        }
    }
}
