//! Dataset directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the dataset directory.
pub const DATA_ENV_VAR: &str = "BINGO_DATA_DIR";

/// Entity list files, in the order they are combined.
pub const SOURCE_FILES: [(&str, &str, &str); 3] = [
    ("bosses", "Bosses", "bosses.json"),
    ("mobs", "Mobs", "mobs.json"),
    ("raids", "Raids", "raids.json"),
];

pub const ERAS_FILE: &str = "eras.json";

/// Default tile dataset inside the data root.
pub const DEFAULT_TILE_FILE: &str = "tiles.json";

/// Get the dataset root directory.
///
/// Resolution order:
/// 1. `BINGO_DATA_DIR` environment variable
/// 2. `data/` directory relative to workspace root
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Era list path under `root`.
pub fn eras_path(root: &Path) -> PathBuf {
    root.join(ERAS_FILE)
}

/// Tile dataset path; relative names resolve under `root`.
pub fn tile_source_path(root: &Path, tile_file: &Path) -> PathBuf {
    if tile_file.is_absolute() {
        tile_file.to_path_buf()
    } else {
        root.join(tile_file)
    }
}
