//! Tabular projection of an aggregation for one category or drop type.

use serde::Serialize;

use crate::aggregate::{AggregationResult, DropRow};
use crate::metrics::Efficiency;

/// What the table is showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", content = "key", rename_all = "lowercase")]
pub enum ViewKey {
    Category(String),
    Type(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Boss,
    Item,
    Type,
    DropRate,
    Effort,
    Efficiency,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Self::Boss => "Boss",
            Self::Item => "Item",
            Self::Type => "Type",
            Self::DropRate => "Drop Rate",
            Self::Effort => "EHB",
            Self::Efficiency => "Eff Rate",
        }
    }
}

pub const CATEGORY_COLUMNS: [Column; 6] = [
    Column::Boss,
    Column::Item,
    Column::Type,
    Column::DropRate,
    Column::Effort,
    Column::Efficiency,
];

pub const TYPE_COLUMNS: [Column; 5] = [
    Column::Item,
    Column::Boss,
    Column::DropRate,
    Column::Effort,
    Column::Efficiency,
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub columns: Vec<Column>,
    pub rows: Vec<DropRow>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render one cell as text.
    pub fn cell(row: &DropRow, column: Column) -> String {
        match column {
            Column::Boss => row.boss.clone(),
            Column::Item => row.item.clone(),
            Column::Type => row.type_display.clone(),
            Column::DropRate => row
                .drop_rate
                .map_or_else(|| "-".to_string(), |rate| rate.to_string()),
            Column::Effort => row.effort.to_string(),
            Column::Efficiency => row.efficiency.to_string(),
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.label()).collect()
    }

    /// Rows rendered as text in column order.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|&column| Self::cell(row, column))
                    .collect()
            })
            .collect()
    }
}

/// Project `result` for `view`.
///
/// Category views list one row per (entity, drop) pair; their efficiency is
/// the listed rate over effort, without the chest multiplier. Type views
/// return the indexed rows unchanged. An unset or unknown key gives an empty
/// projection.
pub fn project(result: &AggregationResult, view: Option<&ViewKey>) -> Projection {
    match view {
        Some(ViewKey::Category(key)) => {
            let Some(entities) = result.category(key) else {
                return Projection::default();
            };
            let rows = entities
                .into_iter()
                .flat_map(|entity| {
                    entity.drops.iter().map(move |drop| DropRow {
                        item: drop.item.clone(),
                        type_display: drop.type_display(),
                        boss: entity.name.clone(),
                        drop_rate: drop.base_rate(),
                        effort: entity.effort,
                        efficiency: Efficiency::compute(
                            &entity.name,
                            drop.base_rate(),
                            entity.effort,
                        ),
                    })
                })
                .collect();
            Projection {
                columns: CATEGORY_COLUMNS.to_vec(),
                rows,
            }
        }
        Some(ViewKey::Type(key)) => match result.drop_type(key) {
            Some(rows) => Projection {
                columns: TYPE_COLUMNS.to_vec(),
                rows: rows.to_vec(),
            },
            None => Projection::default(),
        },
        None => Projection::default(),
    }
}

#[cfg(test)]
mod tests {
    use bingo_model::{Entity, ItemDrop};

    use super::*;
    use crate::aggregate::aggregate;
    use crate::era::EraResolver;

    fn result() -> AggregationResult {
        aggregate(
            vec![
                Entity::new("Zulrah", 2.0)
                    .with_categories(["Solo"])
                    .with_drop(ItemDrop::new("Fang", 4.0).with_types(["Unique"]))
                    .with_drop(ItemDrop::new("Scales", 1.0)),
                Entity::new("Obor", 1.0).with_categories(["Solo"]),
                Entity::new("Raid", 4.0)
                    .with_categories(["Group"])
                    .with_purple_chest_rate(0.5)
                    .with_drop(ItemDrop::conditional("Bow", 20.0).with_types(["Unique"])),
            ],
            &EraResolver::default(),
        )
    }

    #[test]
    fn category_view_flattens_entity_drops() {
        let projection = project(&result(), Some(&ViewKey::Category("Solo".to_string())));
        assert_eq!(
            projection.header(),
            vec!["Boss", "Item", "Type", "Drop Rate", "EHB", "Eff Rate"]
        );
        assert_eq!(
            projection.text_rows(),
            vec![
                vec!["Zulrah", "Fang", "Unique", "4", "2", "2.0"],
                vec!["Zulrah", "Scales", "-", "1", "2", "0.5"],
            ]
        );
    }

    #[test]
    fn category_view_uses_listed_rate_for_efficiency() {
        let projection = project(&result(), Some(&ViewKey::Category("Group".to_string())));
        assert_eq!(projection.rows[0].efficiency, Efficiency::Rate(5.0));
    }

    #[test]
    fn type_view_returns_indexed_rows() {
        let projection = project(&result(), Some(&ViewKey::Type("Unique".to_string())));
        assert_eq!(
            projection.header(),
            vec!["Item", "Boss", "Drop Rate", "EHB", "Eff Rate"]
        );
        assert_eq!(
            projection.text_rows(),
            vec![
                vec!["Fang", "Zulrah", "4", "2", "2.0"],
                vec!["Bow", "Raid", "20", "4", "2.5"],
            ]
        );
    }

    #[test]
    fn unknown_or_unset_key_is_empty() {
        let result = result();
        assert!(project(&result, None).is_empty());
        assert!(project(&result, Some(&ViewKey::Category("Nope".to_string()))).is_empty());
        let missing = project(&result, Some(&ViewKey::Type("Nope".to_string())));
        assert!(missing.is_empty());
        assert!(missing.columns.is_empty());
    }
}
