//! Session-scoped selection state for one open project.
//!
//! The navigator layers two overlays over the read-only hierarchy (a
//! deleted-room tombstone set, and uploaded views/assets keyed by room) and
//! derives the current room/view/asset from selection ids plus those
//! overlays. Derived values are recomputed on demand, never stored.

use std::collections::{HashMap, HashSet};

use core_scene::{
    AssetId, FetchResult, FetchState, PanoramaAsset, Pin, ProjectHierarchy, ProjectId, RoomId,
    RoomNode, View, ViewId,
};
use tracing::{debug, warn};
use viewer_api::ObjectUrlHost;

/// Where the current view's panorama bytes come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetSource<'a> {
    /// Session upload; the URL is served straight from the overlay.
    Uploaded(&'a PanoramaAsset),
    /// Resolve through the external asset-fetch collaborator.
    Backend(&'a AssetId),
    /// No current view.
    None,
}

/// Stateful selector over one project's hierarchy.
///
/// All transitions are synchronous and run to completion; instances are
/// independent of each other and carry no shared state.
#[derive(Debug)]
pub struct SceneNavigator {
    project_id: ProjectId,
    hierarchy: FetchState<ProjectHierarchy>,
    selected_room_id: Option<RoomId>,
    selected_view_id: Option<ViewId>,
    deleted_room_ids: HashSet<RoomId>,
    uploaded_views_by_room: HashMap<RoomId, Vec<View>>,
    uploaded_assets: HashMap<AssetId, PanoramaAsset>,
    /// Blob URLs minted for uploads; must be revoked exactly once at
    /// teardown regardless of how the session ends.
    tracked_urls: Vec<String>,
}

impl SceneNavigator {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            hierarchy: FetchState::Pending,
            selected_room_id: None,
            selected_view_id: None,
            deleted_room_ids: HashSet::new(),
            uploaded_views_by_room: HashMap::new(),
            uploaded_assets: HashMap::new(),
            tracked_urls: Vec::new(),
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Load state of the hierarchy; `Pending` is distinct from `Missing`.
    pub fn hierarchy(&self) -> &FetchState<ProjectHierarchy> {
        &self.hierarchy
    }

    /// Feed the outcome of the hierarchy fetch. On first successful load the
    /// deterministic initial selection is applied unless the caller already
    /// selected something.
    pub fn hierarchy_fetched(&mut self, fetched: FetchResult<ProjectHierarchy>) {
        self.hierarchy = FetchState::from_fetch(fetched);
        if let FetchState::Ready(hierarchy) = &self.hierarchy {
            if self.selected_room_id.is_none() {
                let initial = hierarchy.initial_selection();
                self.selected_room_id = initial.room_id;
                self.selected_view_id = initial.view_id;
            }
        }
        self.reconcile_view_selection();
    }

    /// Switch to another project: revokes every tracked object URL and
    /// clears both overlays and the selection.
    pub fn load_project(&mut self, project_id: ProjectId, urls: &mut dyn ObjectUrlHost) {
        self.teardown(urls);
        self.project_id = project_id;
    }

    /// Release session resources and reset to the pristine pending state.
    ///
    /// Safe to call more than once; each tracked URL is revoked exactly
    /// once.
    pub fn teardown(&mut self, urls: &mut dyn ObjectUrlHost) {
        for url in self.tracked_urls.drain(..) {
            urls.revoke_object_url(&url);
        }
        self.hierarchy = FetchState::Pending;
        self.selected_room_id = None;
        self.selected_view_id = None;
        self.deleted_room_ids.clear();
        self.uploaded_views_by_room.clear();
        self.uploaded_assets.clear();
    }

    /// Object URLs currently awaiting revocation.
    pub fn tracked_object_urls(&self) -> &[String] {
        &self.tracked_urls
    }

    /// Hierarchy rooms minus the deleted-room tombstones, declared order.
    pub fn visible_rooms(&self) -> Vec<&RoomNode> {
        match self.hierarchy.ready() {
            Some(hierarchy) => hierarchy
                .rooms()
                .filter(|node| !self.deleted_room_ids.contains(&node.room.id))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Persisted views followed by session uploads for the room, in that
    /// concatenation order, never reordered.
    pub fn effective_views<'a>(&'a self, room: &'a RoomNode) -> impl Iterator<Item = &'a View> {
        room.views.iter().chain(
            self.uploaded_views_by_room
                .get(&room.room.id)
                .into_iter()
                .flatten(),
        )
    }

    /// The visible room matching the selection, else the first visible
    /// room, else none.
    pub fn current_room(&self) -> Option<&RoomNode> {
        let hierarchy = self.hierarchy.ready()?;
        let visible: Vec<&RoomNode> = hierarchy
            .rooms()
            .filter(|node| !self.deleted_room_ids.contains(&node.room.id))
            .collect();
        if let Some(selected) = &self.selected_room_id {
            let matching = visible
                .iter()
                .find(|node| &node.room.id == selected)
                .copied();
            if matching.is_some() {
                return matching;
            }
        }
        visible.first().copied()
    }

    /// Within the current room's effective views: the selected one, else
    /// the first, else none.
    pub fn current_view(&self) -> Option<&View> {
        let room = self.current_room()?;
        let views: Vec<&View> = self.effective_views(room).collect();
        if let Some(selected) = &self.selected_view_id {
            let matching = views.iter().find(|view| &view.id == selected).copied();
            if matching.is_some() {
                return matching;
            }
        }
        views.first().copied()
    }

    /// Pins anchored on the current view.
    pub fn current_pins(&self) -> Vec<&Pin> {
        let Some(view) = self.current_view() else {
            return Vec::new();
        };
        let view_id = view.id.clone();
        let Some(room) = self.current_room() else {
            return Vec::new();
        };
        room.pins
            .iter()
            .filter(|pin| pin.from_view_id == view_id)
            .collect()
    }

    /// Panorama source for the current view; uploads win over the backend.
    pub fn current_asset(&self) -> AssetSource<'_> {
        match self.current_view() {
            None => AssetSource::None,
            Some(view) => match self.uploaded_assets.get(&view.panorama_asset_id) {
                Some(asset) => AssetSource::Uploaded(asset),
                None => AssetSource::Backend(&view.panorama_asset_id),
            },
        }
    }

    /// Select a room and reset the view selection to its first effective
    /// view (or none).
    pub fn select_room(&mut self, room_id: RoomId) {
        self.selected_view_id = self.first_effective_view_id(&room_id);
        self.selected_room_id = Some(room_id);
        self.reconcile_view_selection();
    }

    /// Select a view directly; no cascading changes beyond the invariant
    /// that the selection must resolve within the current room.
    pub fn select_view(&mut self, view_id: ViewId) {
        self.selected_view_id = Some(view_id);
        self.reconcile_view_selection();
    }

    /// Jump through a pin. Unknown or tombstoned target rooms make this a
    /// no-op; the existing selection is left untouched.
    pub fn navigate_via_pin(&mut self, pin: &Pin) -> bool {
        let target_known = self
            .hierarchy
            .ready()
            .and_then(|hierarchy| hierarchy.find_room(&pin.target_room_id))
            .is_some();
        if !target_known || self.deleted_room_ids.contains(&pin.target_room_id) {
            debug!(
                pin = %pin.id,
                target_room = %pin.target_room_id,
                "pin target not in current hierarchy, ignoring navigation"
            );
            return false;
        }

        self.select_room(pin.target_room_id.clone());
        if let Some(target_view) = &pin.target_view_id {
            self.select_view(target_view.clone());
        }
        true
    }

    /// Tombstone a room. When it was current, selection cascades to the
    /// next remaining visible room in the same flat (scanning forward and
    /// wrapping), or to nothing if the flat has none left.
    pub fn delete_room(&mut self, room_id: &RoomId) {
        let was_current = self
            .current_room()
            .map(|node| node.room.id == *room_id)
            .unwrap_or(false);
        self.deleted_room_ids.insert(room_id.clone());
        if !was_current {
            return;
        }
        match self.next_visible_in_flat(room_id) {
            Some(next) => self.select_room(next),
            None => {
                self.selected_room_id = None;
                self.selected_view_id = None;
            }
        }
    }

    /// Lift a tombstone. Selection is left untouched; callers re-select if
    /// they want the room back on screen.
    pub fn undelete_room(&mut self, room_id: &RoomId) {
        self.deleted_room_ids.remove(room_id);
        self.reconcile_view_selection();
    }

    /// Record an uploaded view/asset pair and make it current immediately.
    /// Blob-backed asset URLs are tracked for teardown revocation.
    pub fn upload_view(&mut self, view: View, asset: PanoramaAsset) {
        if asset.is_blob_backed() {
            self.tracked_urls.push(asset.url.clone());
        }
        self.uploaded_assets.insert(asset.id.clone(), asset);
        let room_id = view.room_id.clone();
        let view_id = view.id.clone();
        self.uploaded_views_by_room
            .entry(room_id.clone())
            .or_default()
            .push(view);

        self.select_room(room_id);
        self.select_view(view_id);
    }

    fn first_effective_view_id(&self, room_id: &RoomId) -> Option<ViewId> {
        let persisted = self
            .hierarchy
            .ready()
            .and_then(|hierarchy| hierarchy.find_room(room_id))
            .and_then(|node| node.views.first())
            .map(|view| view.id.clone());
        persisted.or_else(|| {
            self.uploaded_views_by_room
                .get(room_id)
                .and_then(|views| views.first())
                .map(|view| view.id.clone())
        })
    }

    fn next_visible_in_flat(&self, room_id: &RoomId) -> Option<RoomId> {
        let hierarchy = self.hierarchy.ready()?;
        let flat = hierarchy.flat_containing(room_id)?;
        let position = flat
            .rooms
            .iter()
            .position(|node| &node.room.id == room_id)?;
        flat.rooms
            .iter()
            .cycle()
            .skip(position + 1)
            .take(flat.rooms.len().saturating_sub(1))
            .find(|node| !self.deleted_room_ids.contains(&node.room.id))
            .map(|node| node.room.id.clone())
    }

    // Post-transition invariant: the view selection always resolves within
    // the current room's effective views (or is cleared).
    fn reconcile_view_selection(&mut self) {
        let resolved = match self.current_room() {
            None => None,
            Some(room) => {
                let views: Vec<&View> = self.effective_views(room).collect();
                match &self.selected_view_id {
                    Some(selected) if views.iter().any(|view| &view.id == selected) => {
                        Some(selected.clone())
                    }
                    _ => views.first().map(|view| view.id.clone()),
                }
            }
        };
        self.selected_view_id = resolved;
    }
}

impl Drop for SceneNavigator {
    fn drop(&mut self) {
        if !self.tracked_urls.is_empty() {
            warn!(
                project = %self.project_id,
                count = self.tracked_urls.len(),
                "navigator dropped with unrevoked object URLs; call teardown before drop"
            );
        }
    }
}
