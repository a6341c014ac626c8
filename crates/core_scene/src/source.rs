//! Boundary to the asynchronous data-fetch collaborator.
//!
//! Lookups distinguish "not found" (`Ok(None)`) from transient failure
//! (`Err`); callers must never conflate the two. The navigator folds either
//! into a [`FetchState`] so "no data yet" stays representable on its own.

use thiserror::Error;

use crate::asset::PanoramaAsset;
use crate::hierarchy::SceneCollections;
use crate::ids::{AssetId, OrgId, ProjectId, ViewId};
use crate::model::{Organization, Pin, Project};
use crate::sharing::{ProjectAnalytics, ProjectSharing};

/// Convenience alias: `Ok(None)` is a definitive miss, `Err` is transient.
pub type FetchResult<T> = Result<Option<T>, FetchError>;

/// Transient failures reported by the data layer. Retry/timeout policy is
/// owned there, never here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("scene source unavailable: {0}")]
    Unavailable(String),
    #[error("scene source request failed: {0}")]
    Request(String),
}

/// Read (and lightly mutate) access to the backing tour data.
///
/// Implementations hydrate from whatever store they like; the core only
/// consumes the canonical record shapes.
pub trait SceneSource {
    fn organization(&self, id: &OrgId) -> FetchResult<Organization>;
    fn organization_by_slug(&self, slug: &str) -> FetchResult<Organization>;

    fn project(&self, id: &ProjectId) -> FetchResult<Project>;
    fn project_by_slug(&self, slug: &str) -> FetchResult<Project>;

    /// Flat per-project snapshot; input to `build_hierarchy`.
    fn collections(&self, project_id: &ProjectId) -> FetchResult<SceneCollections>;

    fn panorama_asset(&self, id: &AssetId) -> FetchResult<PanoramaAsset>;

    /// Pins drawn on a view. Unknown views simply have none.
    fn pins_for_view(&self, view_id: &ViewId) -> Result<Vec<Pin>, FetchError>;

    fn sharing(&self, project_id: &ProjectId) -> FetchResult<ProjectSharing>;
    fn update_sharing(&mut self, sharing: ProjectSharing) -> Result<ProjectSharing, FetchError>;

    fn analytics(&self, project_id: &ProjectId) -> FetchResult<ProjectAnalytics>;

    /// Bump the snapshot counter for a project, creating the record if the
    /// project has no analytics yet.
    fn record_snapshot(&mut self, project_id: &ProjectId) -> Result<ProjectAnalytics, FetchError>;
}

/// Caller-visible load state for data that arrives asynchronously.
///
/// `Pending` is not an error and not a miss: fetches may still be in
/// flight. `Missing` is a definitive "not found"; `Failed` carries the
/// upstream error for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    Pending,
    Ready(T),
    Missing,
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn from_fetch(fetched: FetchResult<T>) -> Self {
        match fetched {
            Ok(Some(value)) => FetchState::Ready(value),
            Ok(None) => FetchState::Missing,
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FetchState::Missing)
    }
}
