use serde::{Deserialize, Serialize};

use crate::serde_util::null_as_default;

/// A named time period; list order is the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Era {
    #[serde(rename = "Era")]
    pub name: String,
    #[serde(rename = "Content", default, deserialize_with = "null_as_default")]
    pub content: Vec<EraEntry>,
}

impl Era {
    pub fn new<I, S>(name: impl Into<String>, bosses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            content: bosses
                .into_iter()
                .map(|boss| EraEntry {
                    boss: Some(boss.into()),
                    extra: serde_json::Map::new(),
                })
                .collect(),
        }
    }
}

/// Content entry of an era. Only the `Boss` field links it to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraEntry {
    #[serde(rename = "Boss", default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
