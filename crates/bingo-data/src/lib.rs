#![deny(unsafe_code)]

pub mod error;
pub mod loaders;
pub mod paths;

pub use crate::error::{DataError, Result};
pub use crate::loaders::{
    NamedSource, SourceSet, load_entities, load_eras, load_source_set, load_tiles,
};
pub use crate::paths::{DATA_ENV_VAR, DEFAULT_TILE_FILE, data_root, tile_source_path};
