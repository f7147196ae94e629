//! Settings file and path resolution.
//!
//! Settings live in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/gg.bingo-planner.Bingo Planner/
//! - Windows: %APPDATA%/bingo-planner/Bingo Planner/config/
//! - Linux: ~/.config/bingoplanner/
//!
//! Every field is optional. Command-line flags win over the file, and the
//! file wins over `BINGO_DATA_DIR` and the built-in defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use bingo_data::{DEFAULT_TILE_FILE, data_root, tile_source_path};
use bingo_tiles::SNAPSHOT_FILE;

const APP_QUALIFIER: &str = "gg";
const APP_ORG: &str = "bingo-planner";
const APP_NAME: &str = "Bingo Planner";
const CONFIG_FILENAME: &str = "settings.toml";

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the dataset JSON files.
    pub data_dir: Option<PathBuf>,
    /// Where the tile order snapshot is kept.
    pub snapshot_path: Option<PathBuf>,
    /// Canonical tile file, relative to the data directory unless absolute.
    pub tile_source: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Directory for state written by the tool, such as the tile snapshot.
pub fn state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Load settings from `explicit`, or from the default location.
///
/// Falls back to defaults when no path is known, the file is missing, or
/// it cannot be read or parsed.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    match explicit.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Settings::default()
        }
    }
}

/// Load settings from `path`, falling back to defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "invalid settings file, using defaults");
                Settings::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "unreadable settings file, using defaults");
            Settings::default()
        }
    }
}

/// Path overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub data_dir: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
    pub tile_source: Option<PathBuf>,
}

/// Final locations of everything the tool reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub data_root: PathBuf,
    pub tile_source: PathBuf,
    pub snapshot_path: PathBuf,
}

impl ResolvedPaths {
    /// Apply precedence: flag, then settings file, then environment and
    /// built-in defaults.
    ///
    /// Without a platform state directory the snapshot lands in the data
    /// root.
    pub fn resolve(settings: &Settings, overrides: &PathOverrides) -> Self {
        let data_root = overrides
            .data_dir
            .clone()
            .or_else(|| settings.data_dir.clone())
            .unwrap_or_else(data_root);
        let tile_file = overrides
            .tile_source
            .clone()
            .or_else(|| settings.tile_source.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TILE_FILE));
        let tile_source = tile_source_path(&data_root, &tile_file);
        let snapshot_path = overrides
            .snapshot_path
            .clone()
            .or_else(|| settings.snapshot_path.clone())
            .unwrap_or_else(|| {
                state_dir()
                    .unwrap_or_else(|| data_root.clone())
                    .join(SNAPSHOT_FILE)
            });
        Self {
            data_root,
            tile_source,
            snapshot_path,
        }
    }
}
