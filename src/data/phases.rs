use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::{catalog::SeedId, coerce};

/// The two phase durations the ranking needs from a plant's growth profile.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthPhaseProfile {
    /// First phase; fertilizer removes exactly this much growth time.
    pub reduce_seconds: f64,
    /// Last phase; repeats once per additional season.
    pub last_phase_seconds: f64,
}

impl GrowthPhaseProfile {
    pub fn from_durations(durations: &[f64]) -> Option<Self> {
        match (durations.first(), durations.last()) {
            (Some(&first), Some(&last)) => Some(Self {
                reduce_seconds: first,
                last_phase_seconds: last,
            }),
            _ => None,
        }
    }
}

/// Parses `label:seconds;label:seconds` into the positive durations, in order.
pub fn parse_grow_phases(profile: &str) -> Vec<f64> {
    profile
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split(':').nth(1).map(coerce::number_str))
        .filter(|seconds| *seconds > 0.0)
        .collect()
}

#[derive(Debug, Deserialize)]
struct RawPlantRow {
    #[serde(default)]
    seed_id: Value,
    #[serde(default)]
    grow_phases: Value,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseTable {
    profiles: HashMap<SeedId, GrowthPhaseProfile>,
}

impl PhaseTable {
    pub fn from_json(document: &Value) -> Self {
        let mut table = Self::default();
        let Value::Array(rows) = document else {
            return table;
        };
        for row in rows {
            let Ok(raw) = RawPlantRow::deserialize(row) else {
                continue;
            };
            let Some(seed_id) = SeedId::from_value(&raw.seed_id) else {
                continue;
            };
            let profile = match &raw.grow_phases {
                Value::String(text) => text.as_str(),
                _ => "",
            };
            table.insert_first(seed_id, profile);
        }
        table
    }

    /// Records `profile` unless the seed already has one. Profiles without a
    /// usable phase leave the slot open for a later row.
    pub fn insert_first(&mut self, seed_id: SeedId, profile: &str) -> bool {
        if self.profiles.contains_key(&seed_id) {
            return false;
        }
        match GrowthPhaseProfile::from_durations(&parse_grow_phases(profile)) {
            Some(parsed) => {
                self.profiles.insert(seed_id, parsed);
                true
            }
            None => false,
        }
    }

    /// Missing profiles read as zero reduction and zero per-season growth.
    pub fn profile(&self, seed_id: SeedId) -> GrowthPhaseProfile {
        self.profiles.get(&seed_id).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
