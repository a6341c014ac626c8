use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;
use viewer_api::WatermarkStrategy;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "panotour";
const APPLICATION: &str = "panotour";
const SETTINGS_FILE: &str = "settings.json";
const RECENT_PROJECT_INFO: &str = "recent.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourSettings {
    pub viewer: ViewerPrefs,
    pub snapshot: SnapshotPrefs,
}

/// Motion preferences forwarded to the rendering engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerPrefs {
    /// Drag sensitivity multiplier.
    pub move_speed: f64,
    /// Require Ctrl for mousewheel zoom (avoids hijacking page scroll).
    pub mousewheel_ctrl_key: bool,
    /// Reset-orientation animation speed, revolutions per minute.
    pub transition_speed_rpm: f64,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            mousewheel_ctrl_key: true,
            transition_speed_rpm: 5.0,
        }
    }
}

/// Snapshot/watermark preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPrefs {
    pub watermark_strategy: WatermarkStrategy,
    /// Extra text appended after the org/project names in the watermark.
    pub footer_text: Option<String>,
}

impl Default for SnapshotPrefs {
    fn default() -> Self {
        Self {
            watermark_strategy: WatermarkStrategy::BottomRight,
            footer_text: None,
        }
    }
}

/// Record of the last project opened in the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentProject {
    pub slug: String,
    pub opened_at_ms: i64,
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        let path = config_dir.join(SETTINGS_FILE);
        Ok(Self { path })
    }

    pub fn load(&self) -> Result<TourSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(TourSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &TourSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn recent_project_path() -> Result<PathBuf, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(config_dir.join(RECENT_PROJECT_INFO))
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
        }
    }
}
