//! In-memory `SceneSource` plus the collaborators the demo shell needs
//! (object-URL host, upload dimension probe).

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use core_scene::{
    AssetId, FetchError, FetchResult, Organization, OrgId, PanoramaAsset, Pin, Project,
    ProjectAnalytics, ProjectId, ProjectSharing, SceneCollections, SceneSource, ViewId,
};
use viewer_api::{ObjectUrlHost, UploadError, UploadValidator};

pub(crate) fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Entire tour database held in memory.
pub struct MemoryScene {
    collections: SceneCollections,
    sharing: HashMap<ProjectId, ProjectSharing>,
    analytics: HashMap<ProjectId, ProjectAnalytics>,
}

impl MemoryScene {
    pub fn new(
        collections: SceneCollections,
        sharing: Vec<ProjectSharing>,
        analytics: Vec<ProjectAnalytics>,
    ) -> Self {
        Self {
            collections,
            sharing: sharing
                .into_iter()
                .map(|entry| (entry.project_id.clone(), entry))
                .collect(),
            analytics: analytics
                .into_iter()
                .map(|entry| (entry.project_id.clone(), entry))
                .collect(),
        }
    }
}

impl SceneSource for MemoryScene {
    fn organization(&self, id: &OrgId) -> FetchResult<Organization> {
        Ok(self
            .collections
            .organizations
            .iter()
            .find(|org| &org.id == id)
            .cloned())
    }

    fn organization_by_slug(&self, slug: &str) -> FetchResult<Organization> {
        Ok(self
            .collections
            .organizations
            .iter()
            .find(|org| org.slug == slug)
            .cloned())
    }

    fn project(&self, id: &ProjectId) -> FetchResult<Project> {
        Ok(self.collections.project(id).cloned())
    }

    fn project_by_slug(&self, slug: &str) -> FetchResult<Project> {
        Ok(self.collections.project_by_slug(slug).cloned())
    }

    fn collections(&self, project_id: &ProjectId) -> FetchResult<SceneCollections> {
        if self.collections.project(project_id).is_none() {
            return Ok(None);
        }
        Ok(Some(self.collections.clone()))
    }

    fn panorama_asset(&self, id: &AssetId) -> FetchResult<PanoramaAsset> {
        Ok(self.collections.asset(id).cloned())
    }

    fn pins_for_view(&self, view_id: &ViewId) -> Result<Vec<Pin>, FetchError> {
        Ok(self.collections.pins_by_view(view_id).cloned().collect())
    }

    fn sharing(&self, project_id: &ProjectId) -> FetchResult<ProjectSharing> {
        Ok(self.sharing.get(project_id).cloned())
    }

    fn update_sharing(&mut self, sharing: ProjectSharing) -> Result<ProjectSharing, FetchError> {
        self.sharing
            .insert(sharing.project_id.clone(), sharing.clone());
        Ok(sharing)
    }

    fn analytics(&self, project_id: &ProjectId) -> FetchResult<ProjectAnalytics> {
        Ok(self.analytics.get(project_id).cloned())
    }

    fn record_snapshot(&mut self, project_id: &ProjectId) -> Result<ProjectAnalytics, FetchError> {
        let entry = self
            .analytics
            .entry(project_id.clone())
            .or_insert_with(|| ProjectAnalytics {
                project_id: project_id.clone(),
                total_views: 0,
                last_viewed_at_ms: 0,
                snapshots_downloaded: 0,
            });
        entry.snapshots_downloaded += 1;
        entry.last_viewed_at_ms = epoch_ms();
        Ok(entry.clone())
    }
}

/// Hands out `blob:mem/<n>` URLs and remembers revocations.
#[derive(Debug, Default)]
pub struct MemoryUrlHost {
    next: usize,
    pub revoked: Vec<String>,
}

impl ObjectUrlHost for MemoryUrlHost {
    fn create_object_url(&mut self, _bytes: &[u8]) -> String {
        self.next += 1;
        format!("blob:mem/{}", self.next)
    }

    fn revoke_object_url(&mut self, url: &str) {
        self.revoked.push(url.to_owned());
    }
}

/// Upload probe that trusts a caller-declared size (the shell has no image
/// decoder; real hosts plug in an actual decoder here).
pub struct DeclaredDimensionProbe {
    pub width: u32,
    pub height: u32,
}

impl UploadValidator for DeclaredDimensionProbe {
    fn probe_dimensions(&self, bytes: &[u8]) -> Result<(u32, u32), UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Unreadable("empty file".into()));
        }
        Ok((self.width, self.height))
    }
}
