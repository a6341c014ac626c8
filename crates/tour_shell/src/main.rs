mod demo;
mod memory_source;

use std::fs::File;

use anyhow::{Context, Result};
use core_scene::{
    build_hierarchy, validate_panorama_dimensions, AssetId, AssetKind, LabelledNode, PanoramaAsset,
    ProjectId, SceneSource, View, ViewId,
};
use demo::{demo_analytics, demo_sharing, DEMO_PROJECT_SLUG, DEMO_SCENE};
use memory_source::{epoch_ms, DeclaredDimensionProbe, MemoryScene, MemoryUrlHost};
use navigator::{dispatch, watermark_layout, AssetSource, CommandOutcome, PinProjector, SceneNavigator};
use orientation::{format_orientation, Orientation};
use settings::{RecentProject, SettingsStore, TourSettings};
use tracing::{info, warn};
use viewer_api::{ObjectUrlHost, UploadValidator, ViewerCommand, ViewerEngine, ViewerEvent};
use viewer_offline::OfflineViewer;

// Rough glyph advance for the watermark font; the real measurement lives
// with whichever collaborator rasterizes the text.
const WATERMARK_GLYPH_PX: f64 = 18.0;
const WATERMARK_TEXT_PX: f64 = 36.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings_store = SettingsStore::new().context("settings store init failed")?;
    let settings = match settings_store.load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!("using default settings (failed to load): {err}");
            TourSettings::default()
        }
    };

    run_walkthrough(&settings)
}

fn run_walkthrough(settings: &TourSettings) -> Result<()> {
    let mut source = MemoryScene::new(DEMO_SCENE.clone(), demo_sharing(), demo_analytics());
    let mut urls = MemoryUrlHost::default();
    let mut engine = OfflineViewer::new();
    let mut projector = PinProjector::new();

    let project = source
        .project_by_slug(DEMO_PROJECT_SLUG)?
        .context("demo project missing from dataset")?;
    let org = source
        .organization(&project.org_id)?
        .context("demo organization missing from dataset")?;
    info!(project = %project.name, org = %org.name, "opening tour");

    let mut navigator = SceneNavigator::new(project.id.clone());
    let fetched = source.collections(&project.id)?;
    let hierarchy = match fetched {
        Some(collections) => build_hierarchy(&collections, &project.id).map(Some),
        None => Ok(None),
    }
    .context("hierarchy resolution failed")?;
    navigator.hierarchy_fetched(Ok(hierarchy));

    for node in navigator
        .hierarchy()
        .ready()
        .map(|hierarchy| hierarchy.labelled_tree())
        .unwrap_or_default()
    {
        print_tree(&node, 0);
    }

    sync_viewer(&navigator, &mut source, &mut engine, &mut projector)?;

    // Jump through the first pin on the opening view.
    if let Some(pin) = navigator.current_pins().first().copied().cloned() {
        info!(pin = %pin.label, "navigating via pin");
        navigator.navigate_via_pin(&pin);
        sync_viewer(&navigator, &mut source, &mut engine, &mut projector)?;
    }

    upload_demo(&mut navigator, &mut urls)?;
    sync_viewer(&navigator, &mut source, &mut engine, &mut projector)?;

    // Tombstone the current room, then bring it back.
    if let Some(room_id) = navigator.current_room().map(|node| node.room.id.clone()) {
        navigator.delete_room(&room_id);
        info!(
            deleted = %room_id,
            now_current = ?navigator.current_room().map(|node| node.room.name.clone()),
            "room deleted"
        );
        navigator.undelete_room(&room_id);
        navigator.select_room(room_id);
        sync_viewer(&navigator, &mut source, &mut engine, &mut projector)?;
    }

    snapshot_demo(settings, &navigator, &mut engine, &mut source, &org.name, &project.name)?;

    navigator.teardown(&mut urls);
    info!(revoked = urls.revoked.len(), "session torn down");

    let recent_path = SettingsStore::recent_project_path()?;
    let file = File::create(&recent_path)
        .with_context(|| format!("cannot write {}", recent_path.display()))?;
    serde_json::to_writer_pretty(
        file,
        &RecentProject {
            slug: project.slug.clone(),
            opened_at_ms: epoch_ms(),
        },
    )?;

    Ok(())
}

fn print_tree(node: &LabelledNode, depth: usize) {
    info!("{}{}", "  ".repeat(depth), node.name);
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

/// Push the navigator's current view into the engine and re-project pins.
fn sync_viewer(
    navigator: &SceneNavigator,
    source: &mut MemoryScene,
    engine: &mut OfflineViewer,
    projector: &mut PinProjector,
) -> Result<()> {
    let Some(view) = navigator.current_view() else {
        info!("nothing selected; viewer left untouched");
        projector.clear();
        return Ok(());
    };

    let url = match navigator.current_asset() {
        AssetSource::Uploaded(asset) => Some(asset.url.clone()),
        AssetSource::Backend(asset_id) => source
            .panorama_asset(asset_id)?
            .map(|asset| asset.url),
        AssetSource::None => None,
    };
    let Some(url) = url else {
        // Pending is not an error: the asset fetch may still be in flight.
        info!(view = %view.id, "panorama asset unresolved, waiting");
        return Ok(());
    };

    let target = view.default_orientation.to_spherical()?;
    dispatch(
        &ViewerCommand::LoadPanorama { url, target },
        engine,
        navigator,
    )?;

    let view_id = view.id.clone();
    let pins: Vec<_> = navigator.current_pins().into_iter().cloned().collect();
    for event in engine.drain_events() {
        match event {
            ViewerEvent::Render | ViewerEvent::Resized { .. } => {
                projector.recompute(Some(view_id.clone()), &pins, |position| {
                    engine.spherical_to_screen(position)
                })?;
            }
            ViewerEvent::PositionChanged(position) => {
                info!(
                    orientation = %format_orientation(position.to_orientation()?),
                    "camera moved"
                );
            }
            ViewerEvent::Ready => info!(view = %view_id, "viewer ready"),
        }
    }

    for overlay in projector.overlays() {
        if overlay.visible {
            info!(
                pin = %overlay.pin.label,
                x = %format!("{:.0}", overlay.point.x),
                y = %format!("{:.0}", overlay.point.y),
                "pin on screen"
            );
        } else {
            info!(pin = %overlay.pin.label, "pin off screen");
        }
    }

    Ok(())
}

/// Upload a panorama into the current room, making it current.
fn upload_demo(navigator: &mut SceneNavigator, urls: &mut MemoryUrlHost) -> Result<()> {
    let Some(room) = navigator.current_room() else {
        return Ok(());
    };
    let room_id = room.room.id.clone();
    let name = format!(
        "{} View {}",
        room.room.name,
        navigator.effective_views(room).count() + 1
    );

    // Stand-in for the picked file; the probe answers for its dimensions.
    let bytes = vec![0u8; 64];
    let probe = DeclaredDimensionProbe {
        width: 8000,
        height: 4000,
    };
    let (width, height) = probe.probe_dimensions(&bytes)?;
    validate_panorama_dimensions(width, height)?;

    let asset = PanoramaAsset {
        id: AssetId::minted_upload(),
        kind: AssetKind::Panorama,
        url: urls.create_object_url(&bytes),
        width,
        height,
        alt_text: Some(name.clone()),
    };
    let view = View {
        id: ViewId::minted_upload(),
        room_id,
        name: name.clone(),
        panorama_asset_id: asset.id.clone(),
        description: Some("Uploaded panorama".to_owned()),
        default_orientation: Orientation::new(180.0, 0.0),
        compass: Some(0.0),
        created_at_ms: epoch_ms(),
    };

    info!(view = %view.id, name = %name, "uploading panorama");
    navigator.upload_view(view, asset);
    Ok(())
}

/// Capture a frame, place the watermark, bump the snapshot counter.
fn snapshot_demo(
    settings: &TourSettings,
    navigator: &SceneNavigator,
    engine: &mut OfflineViewer,
    source: &mut MemoryScene,
    org_name: &str,
    project_name: &str,
) -> Result<()> {
    let outcome = dispatch(&ViewerCommand::CaptureFrame, engine, navigator)?;
    let CommandOutcome::Frame(frame) = outcome else {
        return Ok(());
    };

    let mut watermark = format!("{org_name} – {project_name}");
    if let Some(footer) = &settings.snapshot.footer_text {
        watermark.push_str(" · ");
        watermark.push_str(footer);
    }
    let layout = watermark_layout(
        frame.width,
        frame.height,
        watermark.len() as f64 * WATERMARK_GLYPH_PX,
        WATERMARK_TEXT_PX,
        settings.snapshot.watermark_strategy,
    );
    info!(
        text = %watermark,
        x = %format!("{:.0}", layout.text_x),
        y = %format!("{:.0}", layout.text_y),
        "snapshot watermark placed"
    );

    let analytics = source.record_snapshot(navigator.project_id())?;
    info!(
        snapshots = analytics.snapshots_downloaded,
        "snapshot recorded"
    );
    Ok(())
}
