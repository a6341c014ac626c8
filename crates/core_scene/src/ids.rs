//! Backend-assigned identifiers for every entity in the tour hierarchy.
//!
//! Ids are opaque strings minted by the data layer (e.g. `room-living`).
//! Views and assets can additionally be minted at runtime for uploads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! scene_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

scene_id!(OrgId);
scene_id!(ProjectId);
scene_id!(BuildingId);
scene_id!(FlatId);
scene_id!(RoomId);
scene_id!(
    /// Views may be backend-assigned or minted at upload time.
    ViewId
);
scene_id!(PinId);
scene_id!(
    /// Assets may be backend-assigned or minted at upload time.
    AssetId
);

fn minted(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &suffix[..8])
}

impl ViewId {
    /// Mint an id for a runtime-uploaded view.
    pub fn minted_upload() -> Self {
        Self(minted("view-upload"))
    }
}

impl AssetId {
    /// Mint an id for a runtime-uploaded asset.
    pub fn minted_upload() -> Self {
        Self(minted("asset-upload"))
    }
}
