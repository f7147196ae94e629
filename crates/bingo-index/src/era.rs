//! Entity → era lookup built from the curated era list.

use std::collections::HashMap;

use bingo_model::Era;

/// Era label for entities no era lists.
pub const OTHER_ERA: &str = "OTHER";

/// Maps entity names to the era that first lists them.
#[derive(Debug, Clone, Default)]
pub struct EraResolver {
    by_entity: HashMap<String, usize>,
    order: Vec<String>,
}

impl EraResolver {
    /// Build the lookup by scanning eras in declaration order.
    ///
    /// An entity listed under several eras resolves to the earliest one.
    pub fn new(eras: &[Era]) -> Self {
        let mut by_entity = HashMap::new();
        for (rank, era) in eras.iter().enumerate() {
            for boss in era.content.iter().filter_map(|entry| entry.boss.as_ref()) {
                by_entity.entry(boss.clone()).or_insert(rank);
            }
        }
        Self {
            by_entity,
            order: eras.iter().map(|era| era.name.clone()).collect(),
        }
    }

    /// Era label for `entity_name`, or [`OTHER_ERA`].
    pub fn resolve(&self, entity_name: &str) -> &str {
        self.by_entity
            .get(entity_name)
            .map_or(OTHER_ERA, |&rank| self.order[rank].as_str())
    }

    /// Position of `label` in the era declaration order.
    pub fn era_rank(&self, label: &str) -> Option<usize> {
        self.order.iter().position(|name| name == label)
    }

    pub fn is_era(&self, label: &str) -> bool {
        self.era_rank(label).is_some()
    }

    /// Era names in declaration order.
    pub fn eras(&self) -> &[String] {
        &self.order
    }
}
