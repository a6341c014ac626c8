//! Panorama asset records and upload acceptance rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::AssetId;

/// Minimum accepted panorama resolution.
pub const MIN_PANORAMA_WIDTH: u32 = 8000;
pub const MIN_PANORAMA_HEIGHT: u32 = 4000;
/// Allowed deviation of width/height from the ideal 2.0 ratio.
pub const ASPECT_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Panorama,
    Image,
    Thumbnail,
    Logo,
}

/// Reference to an image served by the asset backend (or a runtime blob).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaAsset {
    pub id: AssetId,
    pub kind: AssetKind,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt_text: Option<String>,
}

impl PanoramaAsset {
    /// Whether the URL points at a runtime-created blob rather than the
    /// asset backend. Blob URLs carry a revocation obligation.
    pub fn is_blob_backed(&self) -> bool {
        self.url.starts_with("blob:")
    }
}

/// Checks the acceptance invariant every stored panorama relies on:
/// a 2:1 aspect ratio within tolerance and the minimum resolution.
///
/// The upload collaborator runs this before an asset ever reaches the
/// hierarchy; the rest of the core assumes it holds.
pub fn validate_panorama_dimensions(width: u32, height: u32) -> Result<(), AssetError> {
    if height == 0 {
        return Err(AssetError::TooSmall { width, height });
    }
    let ratio = f64::from(width) / f64::from(height);
    if (ratio - 2.0).abs() > ASPECT_TOLERANCE {
        return Err(AssetError::BadAspect { width, height });
    }
    if width < MIN_PANORAMA_WIDTH || height < MIN_PANORAMA_HEIGHT {
        return Err(AssetError::TooSmall { width, height });
    }
    Ok(())
}

/// Errors surfaced when a candidate panorama fails acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("panorama must have a 2:1 aspect ratio (got {width}x{height})")]
    BadAspect { width: u32, height: u32 },
    #[error("panorama must be at least 8000x4000 pixels (got {width}x{height})")]
    TooSmall { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_two_to_one() {
        assert_eq!(validate_panorama_dimensions(8000, 4000), Ok(()));
        assert_eq!(validate_panorama_dimensions(12000, 6000), Ok(()));
    }

    #[test]
    fn accepts_ratio_within_tolerance() {
        // 8200 / 4000 = 2.05, right at the edge.
        assert_eq!(validate_panorama_dimensions(8200, 4000), Ok(()));
    }

    #[test]
    fn rejects_skewed_aspect() {
        assert_eq!(
            validate_panorama_dimensions(9000, 4000),
            Err(AssetError::BadAspect {
                width: 9000,
                height: 4000
            })
        );
    }

    #[test]
    fn rejects_low_resolution() {
        assert_eq!(
            validate_panorama_dimensions(4000, 2000),
            Err(AssetError::TooSmall {
                width: 4000,
                height: 2000
            })
        );
        assert_eq!(
            validate_panorama_dimensions(0, 0),
            Err(AssetError::TooSmall {
                width: 0,
                height: 0
            })
        );
    }
}
