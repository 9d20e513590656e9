//! Ranking throughput over a catalog far larger than the real one.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::time::Instant;

use farmcalc::{Ranking, RankingInputs, StaticTables, Target};
use serde_json::{json, Value};

fn large_tables(count: u32) -> StaticTables {
    let crops: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "seedId": id,
                "name": format!("crop-{id}"),
                "requiredLevel": id % 100 + 1,
                "growTimeSec": 60 * (id % 480 + 1),
                "exp": id % 97,
                "price": id % 211,
                "seasons": id % 3 + 1,
            })
        })
        .collect();
    let phases: Vec<Value> = (1..=count)
        .map(|id| json!({ "seed_id": id, "grow_phases": format!("a:{};b:{}", id % 300 + 1, id % 120 + 1) }))
        .collect();
    StaticTables::from_documents(&Value::Array(crops), &Value::Array(phases), &json!([]))
}

#[cfg(test)]
mod benches {
    use super::*;

    #[test]
    fn rank_ten_thousand_crops() {
        let tables = large_tables(10_000);
        let inputs = RankingInputs {
            level: 100,
            plots: 200,
            use_fertilizer: true,
            target: Target::Experience,
        };
        let rounds = 20;
        let start = Instant::now();
        for _ in 0..rounds {
            black_box(Ranking::compute(black_box(&tables), black_box(inputs)));
        }
        let per_round = start.elapsed() / rounds;
        println!("ranked 10k crops in {per_round:?} per round");
    }
}
