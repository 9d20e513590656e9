use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedId(u32);

impl SeedId {
    pub fn new(raw: u32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Coerces a loose table value; zero, negative and fractional-below-one ids are unusable.
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = coerce::number(value);
        if (1.0..=u32::MAX as f64).contains(&raw) {
            Some(Self(raw.trunc() as u32))
        } else {
            None
        }
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// One plantable crop as listed in the seed shop export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropDefinition {
    pub seed_id: SeedId,
    pub name: String,
    pub required_level: i64,
    pub grow_time_seconds: f64,
    /// Pre-rendered single-season duration from the export, if any.
    pub grow_time_label: Option<String>,
    pub exp: f64,
    pub price: f64,
    pub seasons: u32,
}

#[derive(Debug, Deserialize)]
struct RawSeedRow {
    #[serde(rename = "seedId", default)]
    seed_id: Value,
    #[serde(default)]
    name: Value,
    #[serde(rename = "requiredLevel", default)]
    required_level: Value,
    #[serde(rename = "growTimeSec", default)]
    grow_time_sec: Value,
    #[serde(rename = "growTimeStr", default)]
    grow_time_str: Value,
    #[serde(default)]
    exp: Value,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    seasons: Value,
}

impl RawSeedRow {
    fn into_definition(self) -> Option<CropDefinition> {
        let seed_id = SeedId::from_value(&self.seed_id)?;
        let label = coerce::text(&self.grow_time_str);
        Some(CropDefinition {
            seed_id,
            name: coerce::text(&self.name),
            // Integer levels compare against fractional requirements the same way after ceil.
            required_level: coerce::number(&self.required_level).ceil() as i64,
            grow_time_seconds: coerce::number(&self.grow_time_sec).max(0.0),
            grow_time_label: (!label.is_empty()).then_some(label),
            exp: coerce::number(&self.exp),
            price: coerce::number(&self.price),
            seasons: season_count(&self.seasons),
        })
    }
}

fn season_count(value: &Value) -> u32 {
    let raw = coerce::number(value);
    if raw >= 1.0 {
        raw.min(u32::MAX as f64).trunc() as u32
    } else {
        1
    }
}

/// Crop catalog in export order. Order matters: it is the tie-break for rankings.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
    skipped: usize,
}

impl CropCatalog {
    /// Accepts either a bare array of rows or an object wrapping them in `rows`.
    pub fn from_json(document: &Value) -> Self {
        let rows: &[Value] = match document {
            Value::Array(rows) => rows.as_slice(),
            Value::Object(map) => match map.get("rows") {
                Some(Value::Array(rows)) => rows.as_slice(),
                _ => &[],
            },
            _ => &[],
        };

        let mut crops = Vec::with_capacity(rows.len());
        let mut skipped = 0;
        for row in rows {
            let definition = RawSeedRow::deserialize(row)
                .ok()
                .and_then(RawSeedRow::into_definition);
            match definition {
                Some(definition) => crops.push(definition),
                None => skipped += 1,
            }
        }
        Self { crops, skipped }
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    /// Rows dropped while loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn get(&self, seed_id: SeedId) -> Option<&CropDefinition> {
        self.crops.iter().find(|crop| crop.seed_id == seed_id)
    }
}
