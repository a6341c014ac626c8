//! Built-in demo dataset: one public tour and one empty private project.
//!
//! Mirrors the seed data served by the staging backend so the shell runs
//! fully offline.

use core_scene::{
    AssetId, AssetKind, Building, BuildingId, Flat, FlatId, OrgId, Organization, PanoramaAsset,
    Pin, PinId, Project, ProjectAnalytics, ProjectId, ProjectSharing, Room, RoomId,
    SceneCollections, ShareRestriction, View, ViewId, Visibility,
};
use once_cell::sync::Lazy;
use orientation::Orientation;

pub const DEMO_PROJECT_SLUG: &str = "modern-flat-tour";

pub static DEMO_SCENE: Lazy<SceneCollections> = Lazy::new(demo_collections);

fn panorama(id: &str, url: &str, alt: &str) -> PanoramaAsset {
    PanoramaAsset {
        id: AssetId::from(id),
        kind: AssetKind::Panorama,
        url: url.to_owned(),
        width: 8000,
        height: 4000,
        alt_text: Some(alt.to_owned()),
    }
}

fn view(
    id: &str,
    room: &str,
    name: &str,
    asset: &str,
    yaw: f64,
    pitch: f64,
    compass: Option<f64>,
) -> View {
    View {
        id: ViewId::from(id),
        room_id: RoomId::from(room),
        name: name.to_owned(),
        panorama_asset_id: AssetId::from(asset),
        description: None,
        default_orientation: Orientation::new(yaw, pitch),
        compass,
        created_at_ms: 1_739_528_000_000,
    }
}

fn pin(
    id: &str,
    from_view: &str,
    label: &str,
    target_room: &str,
    target_view: Option<&str>,
    yaw: f64,
    pitch: f64,
) -> Pin {
    Pin {
        id: PinId::from(id),
        from_view_id: ViewId::from(from_view),
        label: label.to_owned(),
        target_room_id: RoomId::from(target_room),
        target_view_id: target_view.map(ViewId::from),
        anchor: Orientation::new(yaw, pitch),
    }
}

fn demo_collections() -> SceneCollections {
    SceneCollections {
        organizations: vec![Organization {
            id: OrgId::from("org1"),
            name: "Demo Interiors".to_owned(),
            slug: "demo-interiors".to_owned(),
            logo_url: Some("/logo.png".to_owned()),
            primary_color: Some("#3f51b5".to_owned()),
            seat_limit: 25,
        }],
        projects: vec![
            Project {
                id: ProjectId::from("project-modern-flat"),
                org_id: OrgId::from("org1"),
                name: "Modern Flat Tour".to_owned(),
                slug: DEMO_PROJECT_SLUG.to_owned(),
                visibility: Visibility::Public,
                portfolio: true,
                description: "A bright, modern flat showcasing open living spaces.".to_owned(),
                updated_at_ms: 1_739_529_000_000,
                hero_image_asset_id: Some(AssetId::from("asset-thumb-modern-flat")),
                building_ids: vec![BuildingId::from("building-sunrise-residency")],
                tags: vec!["modern".to_owned(), "flat".to_owned(), "demo".to_owned()],
            },
            Project {
                id: ProjectId::from("project-private-villa"),
                org_id: OrgId::from("org1"),
                name: "Private Villa".to_owned(),
                slug: "private-villa".to_owned(),
                visibility: Visibility::Private,
                portfolio: false,
                description: "High-end villa concept for a coastal retreat.".to_owned(),
                updated_at_ms: 1_737_449_100_000,
                hero_image_asset_id: None,
                building_ids: Vec::new(),
                tags: vec!["villa".to_owned(), "concept".to_owned()],
            },
        ],
        buildings: vec![Building {
            id: BuildingId::from("building-sunrise-residency"),
            project_id: ProjectId::from("project-modern-flat"),
            name: "Sunrise Residency".to_owned(),
            address: Some("Sector 12, Downtown".to_owned()),
            flat_ids: vec![FlatId::from("flat-a-101"), FlatId::from("flat-a-102")],
        }],
        flats: vec![
            Flat {
                id: FlatId::from("flat-a-101"),
                building_id: BuildingId::from("building-sunrise-residency"),
                name: "Flat A-101".to_owned(),
                level: 10,
                room_ids: vec![
                    RoomId::from("room-living"),
                    RoomId::from("room-bedroom"),
                    RoomId::from("room-kitchen"),
                ],
            },
            Flat {
                id: FlatId::from("flat-a-102"),
                building_id: BuildingId::from("building-sunrise-residency"),
                name: "Flat A-102".to_owned(),
                level: 10,
                room_ids: vec![RoomId::from("room-study")],
            },
        ],
        rooms: vec![
            Room {
                id: RoomId::from("room-living"),
                flat_id: FlatId::from("flat-a-101"),
                name: "Living Room".to_owned(),
                description: Some("Open concept living area with natural textures.".to_owned()),
                view_ids: vec![
                    ViewId::from("view-living-day"),
                    ViewId::from("view-living-dusk"),
                ],
            },
            Room {
                id: RoomId::from("room-bedroom"),
                flat_id: FlatId::from("flat-a-101"),
                name: "Bedroom".to_owned(),
                description: Some("Serene bedroom with layered lighting.".to_owned()),
                view_ids: vec![ViewId::from("view-bedroom-night")],
            },
            Room {
                id: RoomId::from("room-kitchen"),
                flat_id: FlatId::from("flat-a-101"),
                name: "Kitchen".to_owned(),
                description: Some("Chef-inspired kitchen with brass accents.".to_owned()),
                view_ids: vec![ViewId::from("view-kitchen-service")],
            },
            Room {
                id: RoomId::from("room-study"),
                flat_id: FlatId::from("flat-a-102"),
                name: "Study".to_owned(),
                description: Some("Compact home office, not yet photographed.".to_owned()),
                view_ids: Vec::new(),
            },
        ],
        views: vec![
            view(
                "view-living-day",
                "room-living",
                "Daylight",
                "asset-pano-livingroom-day",
                0.0,
                0.0,
                Some(12.0),
            ),
            view(
                "view-living-dusk",
                "room-living",
                "Dusk",
                "asset-pano-livingroom-day",
                140.0,
                -5.0,
                Some(12.0),
            ),
            view(
                "view-bedroom-night",
                "room-bedroom",
                "Night",
                "asset-pano-bedroom-night",
                -20.0,
                0.0,
                None,
            ),
            view(
                "view-kitchen-service",
                "room-kitchen",
                "Service",
                "asset-pano-kitchen-chef",
                75.0,
                -8.0,
                None,
            ),
        ],
        pins: vec![
            pin(
                "pin-living-to-bedroom",
                "view-living-day",
                "Go to Bedroom",
                "room-bedroom",
                Some("view-bedroom-night"),
                45.0,
                -5.0,
            ),
            pin(
                "pin-living-to-kitchen",
                "view-living-day",
                "Kitchen",
                "room-kitchen",
                Some("view-kitchen-service"),
                -160.0,
                -3.0,
            ),
            pin(
                "pin-bedroom-to-living",
                "view-bedroom-night",
                "Back to Living",
                "room-living",
                Some("view-living-dusk"),
                -90.0,
                0.0,
            ),
            pin(
                "pin-kitchen-to-living",
                "view-kitchen-service",
                "Living Room",
                "room-living",
                Some("view-living-day"),
                140.0,
                -10.0,
            ),
            pin(
                "pin-living-dusk-to-bedroom",
                "view-living-dusk",
                "Bedroom",
                "room-bedroom",
                Some("view-bedroom-night"),
                80.0,
                -4.0,
            ),
        ],
        assets: vec![
            PanoramaAsset {
                id: AssetId::from("asset-thumb-modern-flat"),
                kind: AssetKind::Thumbnail,
                url: "/panos/livingroom.jpg".to_owned(),
                width: 8000,
                height: 4000,
                alt_text: Some("Modern Flat Tour thumbnail".to_owned()),
            },
            panorama(
                "asset-pano-livingroom-day",
                "/panos/livingroom.jpg",
                "Modern flat living room panorama",
            ),
            panorama(
                "asset-pano-bedroom-night",
                "/panos/bedroom.jpg",
                "Bedroom panorama",
            ),
            panorama(
                "asset-pano-kitchen-chef",
                "/panos/kitchen.jpg",
                "Kitchen panorama",
            ),
        ],
    }
}

pub fn demo_sharing() -> Vec<ProjectSharing> {
    vec![
        ProjectSharing {
            project_id: ProjectId::from("project-modern-flat"),
            restriction: ShareRestriction::Public,
            invitees: Vec::new(),
            password_protected: false,
        },
        ProjectSharing {
            project_id: ProjectId::from("project-private-villa"),
            restriction: ShareRestriction::InviteOnly,
            invitees: vec!["client@example.com".to_owned()],
            password_protected: true,
        },
    ]
}

pub fn demo_analytics() -> Vec<ProjectAnalytics> {
    vec![
        ProjectAnalytics {
            project_id: ProjectId::from("project-modern-flat"),
            total_views: 482,
            last_viewed_at_ms: 1_740_046_500_000,
            snapshots_downloaded: 37,
        },
        ProjectAnalytics {
            project_id: ProjectId::from("project-private-villa"),
            total_views: 24,
            last_viewed_at_ms: 1_739_869_500_000,
            snapshots_downloaded: 4,
        },
    ]
}
