use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{catalog::SeedId, coerce};

/// Export placeholder for seeds nobody has named yet.
const UNKNOWN_NAME: &str = "未知";
const FALLBACK_DIR: &str = "seed_images_named";
pub const PLACEHOLDER_GLYPH: &str = "🌱";

#[derive(Debug, Deserialize)]
struct RawMappingRow {
    #[serde(rename = "seedId", default)]
    seed_id: Value,
    #[serde(default)]
    name: Value,
    #[serde(rename = "fileName", default)]
    file_name: Value,
}

/// Where to find a crop's picture. `fallback` is tried when `primary` fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub file_name: String,
    pub primary: String,
    pub fallback: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    by_id: HashMap<SeedId, String>,
    by_name: HashMap<String, String>,
}

impl ImageIndex {
    pub fn from_json(document: &Value) -> Self {
        let mut index = Self::default();
        let Value::Array(rows) = document else {
            return index;
        };
        for row in rows {
            let Ok(raw) = RawMappingRow::deserialize(row) else {
                continue;
            };
            let file_name = coerce::text(&raw.file_name);
            if file_name.is_empty() {
                continue;
            }
            if let Some(seed_id) = SeedId::from_value(&raw.seed_id) {
                index.by_id.insert(seed_id, file_name.clone());
            }
            let name = coerce::text(&raw.name);
            if !name.is_empty() && name != UNKNOWN_NAME {
                index.by_name.insert(name, file_name);
            }
        }
        index
    }

    /// Id first, then display name.
    pub fn file_name(&self, seed_id: Option<SeedId>, name: &str) -> Option<&str> {
        seed_id
            .and_then(|id| self.by_id.get(&id))
            .or_else(|| self.by_name.get(name))
            .map(String::as_str)
    }

    pub fn resolve(&self, seed_id: Option<SeedId>, name: &str, base_url: &str) -> Option<ImageRef> {
        let file_name = self.file_name(seed_id, name)?;
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let encoded = urlencoding::encode(file_name);
        Some(ImageRef {
            file_name: file_name.to_string(),
            primary: format!("{base}{encoded}"),
            fallback: format!("{base}{FALLBACK_DIR}/{encoded}"),
        })
    }

    /// Seeds with an id-keyed picture.
    pub fn id_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_name.is_empty()
    }
}
