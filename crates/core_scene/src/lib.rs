//! Data model for hierarchical 360° tours.
//!
//! An organization owns projects; a project contains buildings, flats,
//! rooms, and views, with pins linking views across rooms. This crate holds
//! the entity records, the denormalizing resolver, and the boundary traits
//! to the data-fetch collaborator. It is read-only for a session: runtime
//! edits (uploads, deletions) live as overlays in the navigator crate.

pub mod asset;
pub mod hierarchy;
pub mod ids;
pub mod model;
pub mod sharing;
pub mod source;

pub use asset::{
    validate_panorama_dimensions, AssetError, AssetKind, PanoramaAsset, ASPECT_TOLERANCE,
    MIN_PANORAMA_HEIGHT, MIN_PANORAMA_WIDTH,
};
pub use hierarchy::{
    build_hierarchy, initial_selection, BuildingNode, FlatNode, InitialSelection, LabelledNode,
    ProjectHierarchy, RoomNode, SceneCollections,
};
pub use ids::{AssetId, BuildingId, FlatId, OrgId, PinId, ProjectId, RoomId, ViewId};
pub use model::{Building, Flat, Organization, Pin, Project, Room, View, Visibility};
pub use sharing::{ProjectAnalytics, ProjectSharing, ShareRestriction};
pub use source::{FetchError, FetchResult, FetchState, SceneSource};

use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors surfaced while resolving a project's hierarchy.
///
/// Everything except `ProjectNotFound` indicates corrupted or partial
/// upstream data and is not retried locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("project `{0}` not found in scene collections")]
    ProjectNotFound(ProjectId),
    #[error("hierarchy inconsistent: {entity} `{id}` listed by `{owner}` does not resolve")]
    DanglingReference {
        entity: &'static str,
        id: String,
        owner: String,
    },
    #[error("hierarchy inconsistent: {entity} `{id}` should be owned by `{expected}` but references `{actual}`")]
    OwnerMismatch {
        entity: &'static str,
        id: String,
        expected: String,
        actual: String,
    },
    #[error("hierarchy inconsistent: `{owner}` lists {listed} {entity}(s) but {matching} reference it")]
    ChildListMismatch {
        entity: &'static str,
        owner: String,
        listed: usize,
        matching: usize,
    },
}
