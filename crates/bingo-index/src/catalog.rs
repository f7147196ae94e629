//! Named dataset slots with memoized aggregation.
//!
//! Each source list is a slot, and the `all` slot aggregates every source
//! concatenated in declaration order. Aggregations are cached per slot and
//! keyed by the slot's upstream revision, so a result is rebuilt only after
//! one of its sources changed.

use std::collections::HashMap;

use tracing::debug;

use bingo_model::Entity;

use crate::aggregate::{AggregationResult, aggregate};
use crate::era::EraResolver;
use crate::projection::ViewKey;

/// Key of the slot that combines every source.
pub const COMBINED_KEY: &str = "all";
pub const COMBINED_LABEL: &str = "Combined";

#[derive(Debug, Clone)]
struct Source {
    key: String,
    label: String,
    entities: Vec<Entity>,
    revision: u64,
}

#[derive(Debug, Clone)]
struct CachedResult {
    revision: u64,
    result: AggregationResult,
}

/// Slot key and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetInfo {
    pub key: String,
    pub label: String,
}

/// Category labels split for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryListing {
    /// Non-era categories, lexicographically sorted.
    pub plain: Vec<String>,
    /// Era categories in era declaration order.
    pub eras: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    eras: EraResolver,
    sources: Vec<Source>,
    generation: u64,
    cache: HashMap<String, CachedResult>,
}

impl DatasetCatalog {
    pub fn new(eras: EraResolver) -> Self {
        Self {
            eras,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source(
        mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        entities: Vec<Entity>,
    ) -> Self {
        self.add_source(key, label, entities);
        self
    }

    /// Register a source slot. A source with an existing key is replaced.
    pub fn add_source(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        entities: Vec<Entity>,
    ) {
        let key = key.into();
        let label = label.into();
        self.generation += 1;
        let revision = self.generation;
        if let Some(source) = self.sources.iter_mut().find(|source| source.key == key) {
            source.label = label;
            source.entities = entities;
            source.revision = revision;
        } else {
            self.sources.push(Source {
                key,
                label,
                entities,
                revision,
            });
        }
    }

    /// Swap the entity list of an existing source.
    ///
    /// Returns `false` when no source has `key`.
    pub fn replace_source(&mut self, key: &str, entities: Vec<Entity>) -> bool {
        let Some(source) = self.sources.iter_mut().find(|source| source.key == key) else {
            return false;
        };
        self.generation += 1;
        source.entities = entities;
        source.revision = self.generation;
        true
    }

    pub fn era_resolver(&self) -> &EraResolver {
        &self.eras
    }

    /// Available slots, combined first.
    pub fn datasets(&self) -> Vec<DatasetInfo> {
        let mut infos = Vec::with_capacity(self.sources.len() + 1);
        infos.push(DatasetInfo {
            key: COMBINED_KEY.to_string(),
            label: COMBINED_LABEL.to_string(),
        });
        infos.extend(self.sources.iter().map(|source| DatasetInfo {
            key: source.key.clone(),
            label: source.label.clone(),
        }));
        infos
    }

    pub fn contains(&self, key: &str) -> bool {
        key == COMBINED_KEY || self.sources.iter().any(|source| source.key == key)
    }

    fn revision(&self, key: &str) -> Option<u64> {
        if key == COMBINED_KEY {
            return Some(
                self.sources
                    .iter()
                    .map(|source| source.revision)
                    .max()
                    .unwrap_or(0),
            );
        }
        self.sources
            .iter()
            .find(|source| source.key == key)
            .map(|source| source.revision)
    }

    fn entities_for(&self, key: &str) -> Vec<Entity> {
        if key == COMBINED_KEY {
            return self
                .sources
                .iter()
                .flat_map(|source| source.entities.iter().cloned())
                .collect();
        }
        self.sources
            .iter()
            .find(|source| source.key == key)
            .map(|source| source.entities.clone())
            .unwrap_or_default()
    }

    /// Aggregation for slot `key`, rebuilt only when its sources changed.
    pub fn result(&mut self, key: &str) -> Option<&AggregationResult> {
        let revision = self.revision(key)?;
        let stale = self
            .cache
            .get(key)
            .is_none_or(|cached| cached.revision != revision);
        if stale {
            debug!(dataset = key, revision, "rebuilding aggregation");
            let result = aggregate(self.entities_for(key), &self.eras);
            self.cache
                .insert(key.to_string(), CachedResult { revision, result });
        }
        self.cache.get(key).map(|cached| &cached.result)
    }

    /// Category labels of slot `key`, split into plain and era categories.
    pub fn list_categories(&mut self, key: &str) -> Option<CategoryListing> {
        let labels: Vec<String> = self
            .result(key)?
            .category_labels()
            .map(str::to_string)
            .collect();
        let (mut eras, mut plain): (Vec<String>, Vec<String>) =
            labels.into_iter().partition(|label| self.eras.is_era(label));
        plain.sort();
        eras.sort_by_key(|label| self.eras.era_rank(label));
        Some(CategoryListing { plain, eras })
    }

    /// Drop types of slot `key`, lexicographically sorted.
    pub fn list_types(&mut self, key: &str) -> Option<Vec<String>> {
        let mut types: Vec<String> = self
            .result(key)?
            .type_labels()
            .map(str::to_string)
            .collect();
        types.sort();
        Some(types)
    }
}

/// Active dataset slot and the category or type being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    dataset: String,
    view: Option<ViewKey>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(COMBINED_KEY)
    }
}

impl Selection {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            view: None,
        }
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn view(&self) -> Option<&ViewKey> {
        self.view.as_ref()
    }

    /// Switch dataset; the active view is cleared.
    pub fn select_dataset(&mut self, dataset: impl Into<String>) {
        self.dataset = dataset.into();
        self.view = None;
    }

    pub fn select_view(&mut self, view: ViewKey) {
        self.view = Some(view);
    }
}

#[cfg(test)]
mod tests {
    use bingo_model::{Era, ItemDrop};

    use super::*;
    use crate::era::OTHER_ERA;

    fn catalog() -> DatasetCatalog {
        let eras = EraResolver::new(&[Era::new("Early", ["Obor"]), Era::new("Late", ["Zulrah"])]);
        DatasetCatalog::new(eras)
            .with_source(
                "bosses",
                "Bosses",
                vec![
                    Entity::new("Zulrah", 2.0)
                        .with_categories(["Solo"])
                        .with_drop(ItemDrop::new("Fang", 4.0).with_types(["Unique"])),
                    Entity::new("Obor", 1.0).with_categories(["F2P"]),
                ],
            )
            .with_source(
                "mobs",
                "Mobs",
                vec![
                    Entity::new("Goblin", 1.0)
                        .with_categories(["F2P"])
                        .with_drop(ItemDrop::new("Bones", 1.0)),
                ],
            )
    }

    #[test]
    fn combined_slot_is_listed_first() {
        let keys: Vec<String> = catalog().datasets().into_iter().map(|d| d.key).collect();
        assert_eq!(keys, vec![COMBINED_KEY, "bosses", "mobs"]);
    }

    #[test]
    fn combined_slot_concatenates_sources() {
        let mut catalog = catalog();
        let f2p: Vec<String> = catalog
            .result(COMBINED_KEY)
            .unwrap()
            .category("F2P")
            .unwrap()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(f2p, vec!["Obor", "Goblin"]);
    }

    #[test]
    fn categories_split_into_plain_and_era() {
        let mut catalog = catalog();
        let listing = catalog.list_categories(COMBINED_KEY).unwrap();
        assert_eq!(listing.plain, vec!["F2P", OTHER_ERA, "Solo"]);
        assert_eq!(listing.eras, vec!["Early", "Late"]);
    }

    #[test]
    fn types_are_sorted() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.list_types(COMBINED_KEY).unwrap(),
            vec!["Other", "Unique"]
        );
        assert_eq!(catalog.list_types("mobs").unwrap(), vec!["Other"]);
    }

    #[test]
    fn unknown_slot_has_no_result() {
        let mut catalog = catalog();
        assert!(catalog.result("clues").is_none());
        assert!(catalog.list_types("clues").is_none());
        assert!(!catalog.contains("clues"));
    }

    #[test]
    fn replacing_a_source_rebuilds_dependent_slots() {
        let mut catalog = catalog();
        assert_eq!(catalog.result("mobs").unwrap().entities().len(), 1);
        assert_eq!(catalog.result(COMBINED_KEY).unwrap().entities().len(), 3);

        assert!(catalog.replace_source("mobs", Vec::new()));

        assert_eq!(catalog.result("mobs").unwrap().entities().len(), 0);
        assert_eq!(catalog.result(COMBINED_KEY).unwrap().entities().len(), 2);
        assert_eq!(catalog.result("bosses").unwrap().entities().len(), 2);
        assert!(!catalog.replace_source("clues", Vec::new()));
    }

    #[test]
    fn switching_dataset_clears_view() {
        let mut selection = Selection::default();
        selection.select_view(ViewKey::Category("Solo".to_string()));
        assert!(selection.view().is_some());

        selection.select_dataset("mobs");
        assert_eq!(selection.dataset(), "mobs");
        assert_eq!(selection.view(), None);
    }
}
