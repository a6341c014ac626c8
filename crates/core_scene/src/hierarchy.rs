//! Denormalized per-project tree built from the flat collections the data
//! layer supplies.
//!
//! Construction is a pure projection: no caching, no side effects, safe to
//! recompute from scratch whenever the source collections change.

use serde::{Deserialize, Serialize};

use crate::asset::PanoramaAsset;
use crate::ids::{AssetId, BuildingId, FlatId, ProjectId, RoomId, ViewId};
use crate::model::{Building, Flat, Organization, Pin, Project, Room, View};
use crate::{SceneError, SceneResult};

/// Flat per-project snapshot handed over by the data-fetch collaborator.
///
/// The collaborator owns shape normalization; this core only ever sees the
/// one canonical list form below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneCollections {
    pub organizations: Vec<Organization>,
    pub projects: Vec<Project>,
    pub buildings: Vec<Building>,
    pub flats: Vec<Flat>,
    pub rooms: Vec<Room>,
    pub views: Vec<View>,
    pub pins: Vec<Pin>,
    pub assets: Vec<PanoramaAsset>,
}

impl SceneCollections {
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    pub fn building(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|building| &building.id == id)
    }

    pub fn flat(&self, id: &FlatId) -> Option<&Flat> {
        self.flats.iter().find(|flat| &flat.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    pub fn view(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|view| &view.id == id)
    }

    pub fn asset(&self, id: &AssetId) -> Option<&PanoramaAsset> {
        self.assets.iter().find(|asset| &asset.id == id)
    }

    pub fn views_by_room<'a>(&'a self, room_id: &'a RoomId) -> impl Iterator<Item = &'a View> + 'a {
        self.views.iter().filter(move |view| &view.room_id == room_id)
    }

    pub fn pins_by_view<'a>(&'a self, view_id: &'a ViewId) -> impl Iterator<Item = &'a Pin> + 'a {
        self.pins
            .iter()
            .filter(move |pin| &pin.from_view_id == view_id)
    }
}

/// A room annotated with its resolved views and the pins drawn on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomNode {
    pub room: Room,
    pub views: Vec<View>,
    pub pins: Vec<Pin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub flat: Flat,
    pub rooms: Vec<RoomNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingNode {
    pub building: Building,
    pub flats: Vec<FlatNode>,
}

/// Fully denormalized tree for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHierarchy {
    pub project: Project,
    pub buildings: Vec<BuildingNode>,
}

impl ProjectHierarchy {
    /// All rooms in declared order (buildings, then flats, then rooms).
    pub fn rooms(&self) -> impl Iterator<Item = &RoomNode> {
        self.buildings
            .iter()
            .flat_map(|building| building.flats.iter())
            .flat_map(|flat| flat.rooms.iter())
    }

    pub fn find_room(&self, room_id: &RoomId) -> Option<&RoomNode> {
        self.rooms().find(|node| &node.room.id == room_id)
    }

    pub fn flat_containing(&self, room_id: &RoomId) -> Option<&FlatNode> {
        self.buildings
            .iter()
            .flat_map(|building| building.flats.iter())
            .find(|flat| flat.rooms.iter().any(|node| &node.room.id == room_id))
    }

    /// First building / flat / room / view in declared order. A missing
    /// ancestor nulls that slot and every descendant slot.
    pub fn initial_selection(&self) -> InitialSelection {
        let building = self.buildings.first();
        let flat = building.and_then(|node| node.flats.first());
        let room = flat.and_then(|node| node.rooms.first());
        let view = room.and_then(|node| node.views.first());

        InitialSelection {
            building_id: building.map(|node| node.building.id.clone()),
            flat_id: flat.map(|node| node.flat.id.clone()),
            room_id: room.map(|node| node.room.id.clone()),
            view_id: view.map(|view| view.id.clone()),
        }
    }

    /// Labelled building/flat/room tree for sidebar-style consumers.
    pub fn labelled_tree(&self) -> Vec<LabelledNode> {
        self.buildings
            .iter()
            .map(|building| LabelledNode {
                id: building.building.id.to_string(),
                name: building.building.name.clone(),
                children: building
                    .flats
                    .iter()
                    .map(|flat| LabelledNode {
                        id: flat.flat.id.to_string(),
                        name: flat.flat.name.clone(),
                        children: flat
                            .rooms
                            .iter()
                            .map(|room| LabelledNode {
                                id: room.room.id.to_string(),
                                name: room.room.name.clone(),
                                children: Vec::new(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Deterministic default selection, one nullable id per level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialSelection {
    pub building_id: Option<BuildingId>,
    pub flat_id: Option<FlatId>,
    pub room_id: Option<RoomId>,
    pub view_id: Option<ViewId>,
}

/// Generic labelled node for rendering the containment tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledNode {
    pub id: String,
    pub name: String,
    pub children: Vec<LabelledNode>,
}

/// Builds the denormalized tree for `project_id`.
///
/// Children resolve through each owner's ordered id list; a listed id that
/// is missing from the snapshot, an owner back-reference that disagrees, or
/// an orphan child claiming an owner that does not list it all surface as
/// hard `SceneError`s, since they indicate corrupted or partial upstream
/// data.
pub fn build_hierarchy(
    collections: &SceneCollections,
    project_id: &ProjectId,
) -> SceneResult<ProjectHierarchy> {
    let project = collections
        .project(project_id)
        .ok_or_else(|| SceneError::ProjectNotFound(project_id.clone()))?;

    let mut buildings = Vec::with_capacity(project.building_ids.len());
    for building_id in &project.building_ids {
        let building = collections.building(building_id).ok_or_else(|| dangling(
            "building",
            building_id.as_str(),
            project.id.as_str(),
        ))?;
        if building.project_id != project.id {
            return Err(owner_mismatch(
                "building",
                building.id.as_str(),
                project.id.as_str(),
                building.project_id.as_str(),
            ));
        }
        buildings.push(build_building(collections, building)?);
    }
    check_exactness(
        "building",
        project.id.as_str(),
        project.building_ids.len(),
        collections
            .buildings
            .iter()
            .filter(|building| building.project_id == project.id)
            .count(),
    )?;

    Ok(ProjectHierarchy {
        project: project.clone(),
        buildings,
    })
}

fn build_building(collections: &SceneCollections, building: &Building) -> SceneResult<BuildingNode> {
    let mut flats = Vec::with_capacity(building.flat_ids.len());
    for flat_id in &building.flat_ids {
        let flat = collections.flat(flat_id).ok_or_else(|| dangling(
            "flat",
            flat_id.as_str(),
            building.id.as_str(),
        ))?;
        if flat.building_id != building.id {
            return Err(owner_mismatch(
                "flat",
                flat.id.as_str(),
                building.id.as_str(),
                flat.building_id.as_str(),
            ));
        }
        flats.push(build_flat(collections, flat)?);
    }
    check_exactness(
        "flat",
        building.id.as_str(),
        building.flat_ids.len(),
        collections
            .flats
            .iter()
            .filter(|flat| flat.building_id == building.id)
            .count(),
    )?;

    Ok(BuildingNode {
        building: building.clone(),
        flats,
    })
}

fn build_flat(collections: &SceneCollections, flat: &Flat) -> SceneResult<FlatNode> {
    let mut rooms = Vec::with_capacity(flat.room_ids.len());
    for room_id in &flat.room_ids {
        let room = collections
            .room(room_id)
            .ok_or_else(|| dangling("room", room_id.as_str(), flat.id.as_str()))?;
        if room.flat_id != flat.id {
            return Err(owner_mismatch(
                "room",
                room.id.as_str(),
                flat.id.as_str(),
                room.flat_id.as_str(),
            ));
        }
        rooms.push(build_room(collections, room)?);
    }
    check_exactness(
        "room",
        flat.id.as_str(),
        flat.room_ids.len(),
        collections
            .rooms
            .iter()
            .filter(|room| room.flat_id == flat.id)
            .count(),
    )?;

    Ok(FlatNode {
        flat: flat.clone(),
        rooms,
    })
}

fn build_room(collections: &SceneCollections, room: &Room) -> SceneResult<RoomNode> {
    let mut views = Vec::with_capacity(room.view_ids.len());
    let mut pins = Vec::new();
    for view_id in &room.view_ids {
        let view = collections
            .view(view_id)
            .ok_or_else(|| dangling("view", view_id.as_str(), room.id.as_str()))?;
        if view.room_id != room.id {
            return Err(owner_mismatch(
                "view",
                view.id.as_str(),
                room.id.as_str(),
                view.room_id.as_str(),
            ));
        }
        pins.extend(collections.pins_by_view(view_id).cloned());
        views.push(view.clone());
    }
    check_exactness(
        "view",
        room.id.as_str(),
        room.view_ids.len(),
        collections.views_by_room(&room.id).count(),
    )?;

    Ok(RoomNode {
        room: room.clone(),
        views,
        pins,
    })
}

/// Deterministic default selection for a project, straight from the flat
/// collections.
pub fn initial_selection(
    collections: &SceneCollections,
    project_id: &ProjectId,
) -> SceneResult<InitialSelection> {
    Ok(build_hierarchy(collections, project_id)?.initial_selection())
}

fn dangling(entity: &'static str, id: &str, owner: &str) -> SceneError {
    SceneError::DanglingReference {
        entity,
        id: id.to_owned(),
        owner: owner.to_owned(),
    }
}

fn owner_mismatch(entity: &'static str, id: &str, expected: &str, actual: &str) -> SceneError {
    SceneError::OwnerMismatch {
        entity,
        id: id.to_owned(),
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    }
}

fn check_exactness(
    entity: &'static str,
    owner: &str,
    listed: usize,
    matching: usize,
) -> SceneResult<()> {
    if listed == matching {
        Ok(())
    } else {
        Err(SceneError::ChildListMismatch {
            entity,
            owner: owner.to_owned(),
            listed,
            matching,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;
    use orientation::Orientation;
    use pretty_assertions::assert_eq;

    fn project(id: &str, building_ids: &[&str]) -> Project {
        Project {
            id: ProjectId::from(id),
            org_id: crate::ids::OrgId::from("org1"),
            name: id.to_owned(),
            slug: id.to_owned(),
            visibility: Visibility::Public,
            portfolio: false,
            description: String::new(),
            updated_at_ms: 0,
            hero_image_asset_id: None,
            building_ids: building_ids.iter().map(|id| BuildingId::from(*id)).collect(),
            tags: Vec::new(),
        }
    }

    fn building(id: &str, project: &str, flat_ids: &[&str]) -> Building {
        Building {
            id: BuildingId::from(id),
            project_id: ProjectId::from(project),
            name: id.to_owned(),
            address: None,
            flat_ids: flat_ids.iter().map(|id| FlatId::from(*id)).collect(),
        }
    }

    fn flat(id: &str, building: &str, level: i32, room_ids: &[&str]) -> Flat {
        Flat {
            id: FlatId::from(id),
            building_id: BuildingId::from(building),
            name: id.to_owned(),
            level,
            room_ids: room_ids.iter().map(|id| RoomId::from(*id)).collect(),
        }
    }

    fn room(id: &str, flat: &str, view_ids: &[&str]) -> Room {
        Room {
            id: RoomId::from(id),
            flat_id: FlatId::from(flat),
            name: id.to_owned(),
            description: None,
            view_ids: view_ids.iter().map(|id| ViewId::from(*id)).collect(),
        }
    }

    fn view(id: &str, room: &str) -> View {
        View {
            id: ViewId::from(id),
            room_id: RoomId::from(room),
            name: id.to_owned(),
            panorama_asset_id: AssetId::from("asset-pano"),
            description: None,
            default_orientation: Orientation::new(0.0, 0.0),
            compass: None,
            created_at_ms: 0,
        }
    }

    fn pin(id: &str, from_view: &str, target_room: &str) -> Pin {
        Pin {
            id: crate::ids::PinId::from(id),
            from_view_id: ViewId::from(from_view),
            label: id.to_owned(),
            target_room_id: RoomId::from(target_room),
            target_view_id: None,
            anchor: Orientation::new(45.0, -5.0),
        }
    }

    fn sample_collections() -> SceneCollections {
        SceneCollections {
            organizations: Vec::new(),
            projects: vec![project("project-modern-flat", &["building-1"])],
            buildings: vec![building("building-1", "project-modern-flat", &[
                "flat-a-101",
                "flat-a-102",
            ])],
            flats: vec![
                flat("flat-a-101", "building-1", 1, &[
                    "room-living",
                    "room-bedroom",
                    "room-kitchen",
                ]),
                flat("flat-a-102", "building-1", 2, &["room-study"]),
            ],
            rooms: vec![
                room("room-living", "flat-a-101", &[
                    "view-living-day",
                    "view-living-dusk",
                ]),
                room("room-bedroom", "flat-a-101", &["view-bedroom-night"]),
                room("room-kitchen", "flat-a-101", &["view-kitchen-service"]),
                room("room-study", "flat-a-102", &[]),
            ],
            views: vec![
                view("view-living-day", "room-living"),
                view("view-living-dusk", "room-living"),
                view("view-bedroom-night", "room-bedroom"),
                view("view-kitchen-service", "room-kitchen"),
            ],
            pins: vec![
                pin("pin-living-to-bedroom", "view-living-day", "room-bedroom"),
                pin("pin-dusk-to-kitchen", "view-living-dusk", "room-kitchen"),
                pin("pin-bedroom-to-living", "view-bedroom-night", "room-living"),
            ],
            assets: Vec::new(),
        }
    }

    #[test]
    fn builds_declared_tree() {
        let collections = sample_collections();
        let hierarchy =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap();

        assert_eq!(hierarchy.buildings.len(), 1);
        assert_eq!(hierarchy.buildings[0].flats.len(), 2);

        let view_counts: Vec<(String, usize)> = hierarchy
            .rooms()
            .map(|node| (node.room.id.to_string(), node.views.len()))
            .collect();
        assert_eq!(view_counts, vec![
            ("room-living".to_owned(), 2),
            ("room-bedroom".to_owned(), 1),
            ("room-kitchen".to_owned(), 1),
            ("room-study".to_owned(), 0),
        ]);

        // Living room pins come from both of its views.
        let living = hierarchy.find_room(&RoomId::from("room-living")).unwrap();
        assert_eq!(living.pins.len(), 2);
    }

    #[test]
    fn initial_selection_walks_first_children() {
        let collections = sample_collections();
        let hierarchy =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap();
        let selection = hierarchy.initial_selection();

        assert_eq!(selection.building_id, Some(BuildingId::from("building-1")));
        assert_eq!(selection.flat_id, Some(FlatId::from("flat-a-101")));
        assert_eq!(selection.room_id, Some(RoomId::from("room-living")));
        assert_eq!(selection.view_id, Some(ViewId::from("view-living-day")));
    }

    #[test]
    fn initial_selection_from_collections_matches_tree() {
        let collections = sample_collections();
        let project_id = ProjectId::from("project-modern-flat");
        let from_collections = initial_selection(&collections, &project_id).unwrap();
        let from_tree = build_hierarchy(&collections, &project_id)
            .unwrap()
            .initial_selection();
        assert_eq!(from_collections, from_tree);
    }

    #[test]
    fn initial_selection_nulls_descendants_of_missing_ancestor() {
        let mut collections = sample_collections();
        collections.projects[0].building_ids.clear();
        collections.buildings.clear();
        collections.flats.clear();
        collections.rooms.clear();
        collections.views.clear();
        collections.pins.clear();

        let hierarchy =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap();
        assert_eq!(hierarchy.initial_selection(), InitialSelection::default());
    }

    #[test]
    fn unknown_project_is_not_found() {
        let collections = sample_collections();
        let err = build_hierarchy(&collections, &ProjectId::from("project-missing")).unwrap_err();
        assert_eq!(
            err,
            SceneError::ProjectNotFound(ProjectId::from("project-missing"))
        );
    }

    #[test]
    fn listed_but_missing_child_is_inconsistent() {
        let mut collections = sample_collections();
        collections.rooms.retain(|room| room.id.as_str() != "room-study");

        let err =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap_err();
        assert_eq!(err, SceneError::DanglingReference {
            entity: "room",
            id: "room-study".to_owned(),
            owner: "flat-a-102".to_owned(),
        });
    }

    #[test]
    fn owner_back_reference_must_match() {
        let mut collections = sample_collections();
        collections.views[0].room_id = RoomId::from("room-kitchen");

        let err =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap_err();
        assert!(matches!(err, SceneError::OwnerMismatch { entity: "view", .. }));
    }

    #[test]
    fn orphan_child_claiming_an_owner_is_inconsistent() {
        let mut collections = sample_collections();
        // A view that claims room-bedroom without being listed by it.
        collections.views.push(view("view-bedroom-extra", "room-bedroom"));

        let err =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap_err();
        assert_eq!(err, SceneError::ChildListMismatch {
            entity: "view",
            owner: "room-bedroom".to_owned(),
            listed: 1,
            matching: 2,
        });
    }

    #[test]
    fn labelled_tree_mirrors_structure() {
        let collections = sample_collections();
        let hierarchy =
            build_hierarchy(&collections, &ProjectId::from("project-modern-flat")).unwrap();
        let tree = hierarchy.labelled_tree();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children.len(), 3);
        assert_eq!(tree[0].children[1].children[0].name, "room-study");
    }
}
