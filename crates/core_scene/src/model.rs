//! Hierarchy entity records hydrated from the data layer.
//!
//! All records are immutable value types for the lifetime of a project
//! session; runtime edits happen as navigator-layer overlays, never by
//! mutating these.

use orientation::Orientation;
use serde::{Deserialize, Serialize};

use crate::ids::{AssetId, BuildingId, FlatId, OrgId, PinId, ProjectId, RoomId, ViewId};

/// Who can open a project through the public viewer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
    InviteOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub seat_limit: u32,
}

/// A tour project. The slug is the external addressing key for public
/// viewer links and is unique per organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub org_id: OrgId,
    pub name: String,
    pub slug: String,
    pub visibility: Visibility,
    pub portfolio: bool,
    pub description: String,
    pub updated_at_ms: i64,
    pub hero_image_asset_id: Option<AssetId>,
    pub building_ids: Vec<BuildingId>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub project_id: ProjectId,
    pub name: String,
    pub address: Option<String>,
    pub flat_ids: Vec<FlatId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    pub id: FlatId,
    pub building_id: BuildingId,
    pub name: String,
    pub level: i32,
    pub room_ids: Vec<RoomId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub flat_id: FlatId,
    pub name: String,
    pub description: Option<String>,
    pub view_ids: Vec<ViewId>,
}

/// A single 360° capture inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub room_id: RoomId,
    pub name: String,
    pub panorama_asset_id: AssetId,
    pub description: Option<String>,
    /// Where the camera faces when this view opens, in degrees.
    pub default_orientation: Orientation,
    /// Optional true-north heading of the capture, degrees.
    pub compass: Option<f64>,
    pub created_at_ms: i64,
}

/// Clickable hotspot anchored on one view's sphere, linking elsewhere.
///
/// The anchor orientation is defined in the origin view's spherical space.
/// Targets may cross rooms and buildings within the same project; whether a
/// target still resolves is decided at navigation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: PinId,
    pub from_view_id: ViewId,
    pub label: String,
    pub target_room_id: RoomId,
    /// Falls back to the target room's first view when absent.
    pub target_view_id: Option<ViewId>,
    pub anchor: Orientation,
}
