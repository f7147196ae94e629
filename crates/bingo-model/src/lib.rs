pub mod entity;
pub mod era;
mod serde_util;
pub mod tile;

pub use entity::{Entity, ItemDrop, OTHER_DROP_TYPE};
pub use era::{Era, EraEntry};
pub use tile::Tile;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_deserializes_source_field_names() {
        let json = r#"{
            "Boss": "Vorkath",
            "Categories": ["Dragon", "Solo"],
            "EHB": 32,
            "Drops": [
                {"Item": "Draconic visage", "Types": ["Unique"], "DropRate": 5}
            ]
        }"#;
        let entity: Entity = serde_json::from_str(json).expect("deserialize entity");
        assert_eq!(entity.name, "Vorkath");
        assert_eq!(entity.categories, vec!["Dragon", "Solo"]);
        assert_eq!(entity.effort, 32.0);
        assert_eq!(entity.purple_chest_rate, None);
        assert_eq!(entity.drops.len(), 1);
        assert_eq!(entity.drops[0].base_rate(), Some(5.0));
    }

    #[test]
    fn null_lists_read_as_empty() {
        let json = r#"{"Boss": "Obor", "Categories": null, "EHB": 1, "Drops": null}"#;
        let entity: Entity = serde_json::from_str(json).expect("deserialize entity");
        assert!(entity.categories.is_empty());
        assert!(entity.drops.is_empty());
    }

    #[test]
    fn era_deserializes_content_entries() {
        let json = r#"[{"Era": "Early", "Content": [{"Boss": "Obor"}, {"Quest": "Cook's Assistant"}]}]"#;
        let eras: Vec<Era> = serde_json::from_str(json).expect("deserialize eras");
        assert_eq!(eras[0].name, "Early");
        assert_eq!(eras[0].content[0].boss.as_deref(), Some("Obor"));
        assert_eq!(eras[0].content[1].boss, None);
    }
}
