//! JSON text formats for import, export, and snapshots.

use serde_json::Value;

use bingo_model::Tile;

use crate::error::ImportError;

/// Parse `text` as a JSON array of tile records.
///
/// Beyond "an array of objects" no shape is enforced: each record is kept
/// as-is, whatever its fields hold.
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray {
            found: json_kind(&value),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Tile::from(fields)),
            _ => Err(ImportError::NotARecord { index }),
        })
        .collect()
}

/// Pretty JSON with two-space indentation, as handed to export sinks.
pub fn to_export_json(tiles: &[&Tile]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tiles)
}

/// Compact JSON stored in the snapshot slot.
pub fn to_snapshot_json(tiles: &[&Tile]) -> serde_json::Result<String> {
    serde_json::to_string(tiles)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_root_is_rejected() {
        let error = parse_tiles("{}").unwrap_err();
        assert!(matches!(error, ImportError::NotAnArray { found: "an object" }));
        assert_eq!(error.to_string(), "import root must be an array, found an object");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_tiles("[{"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn non_record_entries_are_rejected() {
        let error = parse_tiles(r#"[{"Id": 1}, 2]"#).unwrap_err();
        assert!(matches!(error, ImportError::NotARecord { index: 1 }));
    }

    #[test]
    fn mistyped_known_fields_are_kept() {
        let tiles = parse_tiles(r#"[{"Name": ["not", "text"], "Goal": "3", "Id": null}]"#).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].get("Goal"), Some(&Value::from("3")));
        assert_eq!(tiles[0].get("Id"), Some(&Value::Null));
    }

    #[test]
    fn empty_array_is_accepted() {
        assert!(parse_tiles("[]").unwrap().is_empty());
    }

    #[test]
    fn export_uses_two_space_indent() {
        let tile = Tile::new(3, "Jad", "Late");
        let json = to_export_json(&[&tile]).unwrap();
        insta::assert_snapshot!(json, @r#"
        [
          {
            "Id": 3,
            "Name": "Jad",
            "Type": "Late"
          }
        ]
        "#);
    }
}
