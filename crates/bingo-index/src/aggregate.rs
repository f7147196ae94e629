//! Category and drop-type indices over an entity list.
//!
//! The result is derived data: it is built once per input list and never
//! mutated afterwards. Keys are stored in a `BTreeMap`, values keep the order
//! of the input list; no other sorting happens here.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use bingo_model::Entity;

use crate::era::EraResolver;
use crate::metrics::Efficiency;

/// A drop flattened together with its owning entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropRow {
    pub item: String,
    pub type_display: String,
    pub boss: String,
    /// Listed rate, before any chest multiplier.
    pub drop_rate: Option<f64>,
    pub effort: f64,
    pub efficiency: Efficiency,
}

/// Category and drop-type lookups for one entity list.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    entities: Vec<Entity>,
    category_map: BTreeMap<String, Vec<usize>>,
    type_map: BTreeMap<String, Vec<DropRow>>,
}

impl AggregationResult {
    /// Entities in input order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities carrying `label` as a category or era, in input order.
    pub fn category(&self, label: &str) -> Option<Vec<&Entity>> {
        self.category_map
            .get(label)
            .map(|indices| indices.iter().map(|&idx| &self.entities[idx]).collect())
    }

    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.category_map.keys().map(String::as_str)
    }

    /// Drop rows indexed under `label`, in input order.
    pub fn drop_type(&self, label: &str) -> Option<&[DropRow]> {
        self.type_map.get(label).map(Vec::as_slice)
    }

    pub fn type_labels(&self) -> impl Iterator<Item = &str> {
        self.type_map.keys().map(String::as_str)
    }
}

/// Build category and drop-type indices for `entities`.
///
/// Every entity is filed under each declared category plus its era (once per
/// distinct label). Every drop is filed under each of its types, or
/// `"Other"` when it has none.
pub fn aggregate(entities: Vec<Entity>, eras: &EraResolver) -> AggregationResult {
    let mut category_map: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut type_map: BTreeMap<String, Vec<DropRow>> = BTreeMap::new();

    for (idx, entity) in entities.iter().enumerate() {
        let mut labels: Vec<&str> = entity.categories.iter().map(String::as_str).collect();
        labels.push(eras.resolve(&entity.name));
        for (pos, label) in labels.iter().enumerate() {
            if labels[..pos].contains(label) {
                continue;
            }
            category_map
                .entry((*label).to_string())
                .or_default()
                .push(idx);
        }

        for drop in &entity.drops {
            let efficiency =
                Efficiency::compute(&entity.name, entity.effective_rate(drop), entity.effort);
            let row = DropRow {
                item: drop.item.clone(),
                type_display: drop.type_display(),
                boss: entity.name.clone(),
                drop_rate: drop.base_rate(),
                effort: entity.effort,
                efficiency,
            };
            for label in drop.type_labels() {
                type_map
                    .entry(label.to_string())
                    .or_default()
                    .push(row.clone());
            }
        }
    }

    debug!(
        entity_count = entities.len(),
        category_count = category_map.len(),
        type_count = type_map.len(),
        "aggregated entities"
    );
    AggregationResult {
        entities,
        category_map,
        type_map,
    }
}
