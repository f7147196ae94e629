use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use bingo_model::{Entity, Era, Tile};

use crate::error::{DataError, Result};
use crate::paths::{SOURCE_FILES, eras_path};

/// A named entity list as read from disk.
#[derive(Debug, Clone)]
pub struct NamedSource {
    pub key: String,
    pub label: String,
    pub entities: Vec<Entity>,
}

/// Everything the drop-rate browser needs from the data root.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub sources: Vec<NamedSource>,
    pub eras: Vec<Era>,
}

impl SourceSet {
    pub fn entity_count(&self) -> usize {
        self.sources.iter().map(|source| source.entities.len()).sum()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| DataError::json(path, e))
}

/// Read a JSON list, treating a missing file as empty.
fn read_json_list_or_empty<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match read_json(path) {
        Ok(list) => Ok(list),
        Err(DataError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "dataset file not found, using an empty list");
            Ok(Vec::new())
        }
        Err(error) => Err(error),
    }
}

pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let entities: Vec<Entity> = read_json(path)?;
    debug!(path = %path.display(), count = entities.len(), "loaded entities");
    Ok(entities)
}

pub fn load_eras(path: &Path) -> Result<Vec<Era>> {
    let eras: Vec<Era> = read_json(path)?;
    debug!(path = %path.display(), count = eras.len(), "loaded eras");
    Ok(eras)
}

pub fn load_tiles(path: &Path) -> Result<Vec<Tile>> {
    let tiles: Vec<Tile> = read_json(path)?;
    debug!(path = %path.display(), count = tiles.len(), "loaded tiles");
    Ok(tiles)
}

/// Load every entity list and the era list under `root`.
///
/// Missing files load as empty lists; unreadable or malformed files are
/// errors.
pub fn load_source_set(root: &Path) -> Result<SourceSet> {
    let mut sources = Vec::with_capacity(SOURCE_FILES.len());
    for (key, label, file) in SOURCE_FILES {
        let entities = read_json_list_or_empty(&root.join(file))?;
        sources.push(NamedSource {
            key: key.to_string(),
            label: label.to_string(),
            entities,
        });
    }
    let eras = read_json_list_or_empty(&eras_path(root))?;
    let set = SourceSet { sources, eras };
    info!(
        root = %root.display(),
        source_count = set.sources.len(),
        entity_count = set.entity_count(),
        era_count = set.eras.len(),
        "loaded datasets"
    );
    Ok(set)
}
