//! Crop yield ranking.
//!
//! For every crop the player can plant, work out how long a full
//! plant-to-replant cycle takes across all plots and what that cycle earns per
//! hour, with and without fertilizer. The rows are then ordered by experience
//! and by gold so the caller can pick whichever the player optimises for.

mod calculator;

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use calculator::Calculator;

use crate::data::{CropCatalog, CropDefinition, PhaseTable, StaticTables};

/// Plots seeded per second without fertilizer (18 every 2 seconds).
pub const SEEDING_RATE: f64 = 18.0 / 2.0;
/// Plots seeded per second when each plot is also fertilized (12 every 2 seconds).
pub const SEEDING_RATE_FERTILIZED: f64 = 12.0 / 2.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;
/// Fertilized growth never drops below one second.
const MIN_GROW_SECONDS: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Target {
    #[default]
    #[serde(rename = "exp", alias = "experience")]
    #[value(name = "exp", alias = "experience")]
    Experience,
    #[serde(rename = "gold", alias = "currency")]
    #[value(name = "gold", alias = "currency")]
    Currency,
}

impl Target {
    pub fn label(self) -> &'static str {
        match self {
            Target::Experience => "经验",
            Target::Currency => "金币",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankingInputs {
    pub level: i32,
    pub plots: i32,
    pub use_fertilizer: bool,
    pub target: Target,
}

impl Default for RankingInputs {
    fn default() -> Self {
        Self {
            level: 70,
            plots: 24,
            use_fertilizer: true,
            target: Target::Experience,
        }
    }
}

/// Throughput of one crop for a given level and plot count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCrop {
    #[serde(flatten)]
    pub crop: CropDefinition,
    pub reduce_seconds: f64,
    pub last_phase_seconds: f64,
    pub total_grow_seconds: f64,
    pub total_grow_seconds_fertilized: f64,
    pub cycle_seconds: f64,
    pub cycle_seconds_fertilized: f64,
    pub exp_per_hour: f64,
    pub exp_per_hour_fertilized: f64,
    pub exp_per_day: f64,
    pub exp_per_day_fertilized: f64,
    pub gold_per_hour: f64,
    pub gold_per_hour_fertilized: f64,
    pub gold_per_day: f64,
    pub gold_per_day_fertilized: f64,
    /// Experience-per-hour gain from fertilizing, in percent. Always measured
    /// on experience, whatever the target.
    pub gain_percent: f64,
}

impl RankedCrop {
    pub fn per_hour(&self, target: Target, fertilized: bool) -> f64 {
        match (target, fertilized) {
            (Target::Experience, false) => self.exp_per_hour,
            (Target::Experience, true) => self.exp_per_hour_fertilized,
            (Target::Currency, false) => self.gold_per_hour,
            (Target::Currency, true) => self.gold_per_hour_fertilized,
        }
    }

    pub fn per_day(&self, target: Target, fertilized: bool) -> f64 {
        match (target, fertilized) {
            (Target::Experience, false) => self.exp_per_day,
            (Target::Experience, true) => self.exp_per_day_fertilized,
            (Target::Currency, false) => self.gold_per_day,
            (Target::Currency, true) => self.gold_per_day_fertilized,
        }
    }

    pub fn total_grow(&self, fertilized: bool) -> f64 {
        if fertilized {
            self.total_grow_seconds_fertilized
        } else {
            self.total_grow_seconds
        }
    }

    pub fn cycle(&self, fertilized: bool) -> f64 {
        if fertilized {
            self.cycle_seconds_fertilized
        } else {
            self.cycle_seconds
        }
    }
}

/// Seconds needed to seed every plot once.
pub fn seeding_seconds(plots: f64, fertilized: bool) -> f64 {
    let rate = if fertilized {
        SEEDING_RATE_FERTILIZED
    } else {
        SEEDING_RATE
    };
    plots / rate
}

/// Per-crop metrics for every crop unlocked at `level`, in catalog order.
/// No plots means nothing to rank.
pub fn evaluate(catalog: &CropCatalog, phases: &PhaseTable, level: i32, plots: i32) -> Vec<RankedCrop> {
    if plots <= 0 {
        return Vec::new();
    }
    let plots = f64::from(plots);
    let seed_time = seeding_seconds(plots, false);
    let seed_time_fertilized = seeding_seconds(plots, true);

    catalog
        .crops()
        .iter()
        .filter(|crop| crop.required_level <= i64::from(level))
        .map(|crop| {
            let profile = phases.profile(crop.seed_id);
            let seasons = f64::from(crop.seasons);
            let extra_seasons = (seasons - 1.0) * profile.last_phase_seconds;

            let total_grow_seconds = crop.grow_time_seconds + extra_seasons;
            let total_grow_seconds_fertilized = (crop.grow_time_seconds - profile.reduce_seconds)
                .max(MIN_GROW_SECONDS)
                + extra_seasons;
            let cycle_seconds = total_grow_seconds + seed_time;
            let cycle_seconds_fertilized = total_grow_seconds_fertilized + seed_time_fertilized;

            let per_hour = |per_harvest: f64, cycle: f64| {
                let total_yield = per_harvest * seasons;
                plots * total_yield / cycle * SECONDS_PER_HOUR
            };
            let exp_per_hour = per_hour(crop.exp, cycle_seconds);
            let exp_per_hour_fertilized = per_hour(crop.exp, cycle_seconds_fertilized);
            let gold_per_hour = per_hour(crop.price, cycle_seconds);
            let gold_per_hour_fertilized = per_hour(crop.price, cycle_seconds_fertilized);

            let gain_percent = if exp_per_hour > 0.0 {
                (exp_per_hour_fertilized - exp_per_hour) / exp_per_hour * 100.0
            } else {
                0.0
            };

            RankedCrop {
                crop: crop.clone(),
                reduce_seconds: profile.reduce_seconds,
                last_phase_seconds: profile.last_phase_seconds,
                total_grow_seconds,
                total_grow_seconds_fertilized,
                cycle_seconds,
                cycle_seconds_fertilized,
                exp_per_hour,
                exp_per_hour_fertilized,
                exp_per_day: exp_per_hour * HOURS_PER_DAY,
                exp_per_day_fertilized: exp_per_hour_fertilized * HOURS_PER_DAY,
                gold_per_hour,
                gold_per_hour_fertilized,
                gold_per_day: gold_per_hour * HOURS_PER_DAY,
                gold_per_day_fertilized: gold_per_hour_fertilized * HOURS_PER_DAY,
                gain_percent,
            }
        })
        .collect()
}

/// Stable descending order; equal keys keep catalog order.
fn sort_descending(rows: &mut [RankedCrop], target: Target, fertilized: bool) {
    rows.sort_by(|a, b| descending(a.per_hour(target, fertilized), b.per_hour(target, fertilized)));
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub inputs: RankingInputs,
    rows: Vec<RankedCrop>,
    by_experience: Vec<RankedCrop>,
    by_currency: Vec<RankedCrop>,
}

impl Ranking {
    pub fn compute(tables: &StaticTables, inputs: RankingInputs) -> Self {
        let rows = evaluate(&tables.catalog, &tables.phases, inputs.level, inputs.plots);
        debug!(
            level = inputs.level,
            plots = inputs.plots,
            eligible = rows.len(),
            "ranked crops"
        );

        let mut by_experience = rows.clone();
        sort_descending(&mut by_experience, Target::Experience, inputs.use_fertilizer);
        let mut by_currency = rows.clone();
        sort_descending(&mut by_currency, Target::Currency, inputs.use_fertilizer);

        Self {
            inputs,
            rows,
            by_experience,
            by_currency,
        }
    }

    /// Eligible crops in catalog order.
    pub fn rows(&self) -> &[RankedCrop] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn by_experience(&self) -> &[RankedCrop] {
        &self.by_experience
    }

    pub fn by_currency(&self) -> &[RankedCrop] {
        &self.by_currency
    }

    /// The view for `target` in the fertilizer state the ranking was asked for.
    pub fn view(&self, target: Target) -> &[RankedCrop] {
        match target {
            Target::Experience => &self.by_experience,
            Target::Currency => &self.by_currency,
        }
    }

    /// Any of the four target/fertilizer orderings.
    pub fn sorted(&self, target: Target, fertilized: bool) -> Vec<&RankedCrop> {
        let mut rows: Vec<&RankedCrop> = self.rows.iter().collect();
        rows.sort_by(|a, b| descending(a.per_hour(target, fertilized), b.per_hour(target, fertilized)));
        rows
    }

    pub fn recommended(&self, target: Target, fertilized: bool) -> Option<&RankedCrop> {
        if fertilized == self.inputs.use_fertilizer {
            return self.view(target).first();
        }
        self.sorted(target, fertilized).into_iter().next()
    }
}
