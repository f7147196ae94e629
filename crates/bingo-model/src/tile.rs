//! Bingo tiles as they appear in tile datasets and exported orderings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A curated bingo card.
///
/// The record is kept as the JSON object it was read from, so every field
/// survives export unchanged, including `null`s and values whose type the
/// accessors do not expect. Accessors read the known fields leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for Tile {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl Tile {
    pub fn new(id: impl Into<Value>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::default()
            .with_field("Id", id)
            .with_field("Name", name.into())
            .with_field("Type", kind.into())
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_field("Description", description.into())
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`, keeping its position when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.text("Name")
    }

    pub fn kind(&self) -> &str {
        self.text("Type")
    }

    pub fn description(&self) -> &str {
        self.text("Description")
    }

    /// Hover text: the long description when present, else the description.
    pub fn summary(&self) -> &str {
        match self.text("LongDescription") {
            "" => self.description(),
            long => long,
        }
    }

    /// String form of the id used for searching and display.
    ///
    /// Text ids are used as-is; numbers and booleans use their JSON form.
    /// A missing or `null` id is empty.
    pub fn id_text(&self) -> String {
        match self.get("Id") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_read_as_text() {
        let tiles: Vec<Tile> =
            serde_json::from_str(r#"[{"Id": 7, "Name": "A"}, {"Id": "b-2", "Name": "B"}]"#)
                .expect("deserialize tiles");
        assert_eq!(tiles[0].id_text(), "7");
        assert_eq!(tiles[1].id_text(), "b-2");
    }

    #[test]
    fn every_field_survives_round_trip() {
        let json = r#"{"Id":1,"Name":"Kraken","Type":"Early","Description":null,"Goal":"3","Points":3,"Tags":["sea"]}"#;
        let tile: Tile = serde_json::from_str(json).expect("deserialize tile");
        assert_eq!(tile.get("Points"), Some(&Value::from(3)));
        assert_eq!(tile.description(), "");
        let back = serde_json::to_string(&tile).expect("serialize tile");
        assert_eq!(back, json);
    }

    #[test]
    fn mistyped_known_fields_read_as_empty() {
        let tile: Tile = serde_json::from_str(r#"{"Id": null, "Name": 12, "Type": ["Early"]}"#)
            .expect("deserialize tile");
        assert_eq!(tile.name(), "");
        assert_eq!(tile.kind(), "");
        assert_eq!(tile.id_text(), "");
    }

    #[test]
    fn summary_prefers_long_description() {
        let mut tile = Tile::new(1, "Kraken", "Early").with_description("short");
        assert_eq!(tile.summary(), "short");
        tile.insert("LongDescription", "long");
        assert_eq!(tile.summary(), "long");
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let tile: Tile = serde_json::from_str("{}").expect("deserialize tile");
        assert_eq!(tile.name(), "");
        assert_eq!(tile.kind(), "");
        assert_eq!(tile.id_text(), "");
    }

    #[test]
    fn new_writes_fields_in_record_order() {
        let tile = Tile::new(3, "Jad", "Late");
        let keys: Vec<&str> = tile.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Id", "Name", "Type"]);
    }
}
