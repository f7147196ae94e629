//! Drop-rate entities (bosses, mobs, raids) and their drops.

use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// Type label used for drops that declare no types.
pub const OTHER_DROP_TYPE: &str = "Other";

/// A boss, mob, or raid with its drop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "Boss")]
    pub name: String,
    #[serde(
        rename = "Categories",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
    /// Effective hours per kill; the divisor for efficiency.
    #[serde(rename = "EHB", default)]
    pub effort: f64,
    #[serde(
        rename = "PurpleChestRate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub purple_chest_rate: Option<f64>,
    #[serde(
        rename = "Drops",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub drops: Vec<ItemDrop>,
}

impl Entity {
    pub fn new(name: impl Into<String>, effort: f64) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
            effort,
            purple_chest_rate: None,
            drops: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_purple_chest_rate(mut self, rate: f64) -> Self {
        self.purple_chest_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn with_drop(mut self, drop: ItemDrop) -> Self {
        self.drops.push(drop);
        self
    }

    /// Per-item rate for `drop` once the chest rate is applied.
    ///
    /// Conditional rates are multiplied by the purple chest rate when both
    /// are present and non-zero; otherwise the base rate is used.
    pub fn effective_rate(&self, drop: &ItemDrop) -> Option<f64> {
        match (drop.conditional_drop_rate, self.purple_chest_rate) {
            (Some(conditional), Some(chest)) if conditional != 0.0 && chest != 0.0 => {
                Some(chest * conditional)
            }
            _ => drop.base_rate(),
        }
    }
}

/// One entry in an entity's drop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemDrop {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_drop_rate: Option<f64>,
}

impl ItemDrop {
    pub fn new(item: impl Into<String>, drop_rate: f64) -> Self {
        Self {
            item: item.into(),
            types: None,
            drop_rate: Some(drop_rate),
            conditional_drop_rate: None,
        }
    }

    pub fn conditional(item: impl Into<String>, conditional_drop_rate: f64) -> Self {
        Self {
            item: item.into(),
            types: None,
            drop_rate: None,
            conditional_drop_rate: Some(conditional_drop_rate),
        }
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// The listed rate: `DropRate`, falling back to `ConditionalDropRate`.
    pub fn base_rate(&self) -> Option<f64> {
        self.drop_rate.or(self.conditional_drop_rate)
    }

    /// Type labels used for indexing; `["Other"]` when none are declared.
    pub fn type_labels(&self) -> Vec<&str> {
        match self.types.as_deref() {
            Some(types) if !types.is_empty() => types.iter().map(String::as_str).collect(),
            _ => vec![OTHER_DROP_TYPE],
        }
    }

    /// Comma-joined types for display, or `-` when there are none.
    pub fn type_display(&self) -> String {
        match self.types.as_deref() {
            Some(types) if !types.is_empty() => types.join(", "),
            _ => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_rate_applies_chest_rate_to_conditional_drops() {
        let entity = Entity::new("Chambers of Xeric", 4.0).with_purple_chest_rate(0.5);
        let drop = ItemDrop::conditional("Twisted bow", 20.0);
        assert_eq!(entity.effective_rate(&drop), Some(10.0));
    }

    #[test]
    fn effective_rate_without_chest_rate_uses_base_rate() {
        let entity = Entity::new("Zulrah", 2.0);
        let drop = ItemDrop::conditional("Tanzanite fang", 8.0);
        assert_eq!(entity.effective_rate(&drop), Some(8.0));
    }

    #[test]
    fn effective_rate_ignores_chest_rate_for_plain_drops() {
        let entity = Entity::new("Raid", 2.0).with_purple_chest_rate(0.5);
        let drop = ItemDrop::new("Dust", 3.0);
        assert_eq!(entity.effective_rate(&drop), Some(3.0));
    }

    #[test]
    fn drop_rate_takes_precedence_over_conditional() {
        let mut drop = ItemDrop::new("Kit", 4.0);
        drop.conditional_drop_rate = Some(9.0);
        assert_eq!(drop.base_rate(), Some(4.0));
    }

    #[test]
    fn untyped_drops_index_as_other() {
        let drop = ItemDrop::new("X", 1.0);
        assert_eq!(drop.type_labels(), vec![OTHER_DROP_TYPE]);
        assert_eq!(drop.type_display(), "-");

        let empty = ItemDrop::new("Y", 1.0).with_types(Vec::<String>::new());
        assert_eq!(empty.type_labels(), vec![OTHER_DROP_TYPE]);
        assert_eq!(empty.type_display(), "-");
    }

    #[test]
    fn typed_drops_join_for_display() {
        let drop = ItemDrop::new("Pet", 1.0).with_types(["Pet", "Unique"]);
        assert_eq!(drop.type_labels(), vec!["Pet", "Unique"]);
        assert_eq!(drop.type_display(), "Pet, Unique");
    }
}
