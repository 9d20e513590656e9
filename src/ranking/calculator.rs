use tracing::debug;

use super::{Ranking, RankingInputs};
use crate::data::StaticTables;

/// Recomputes the ranking when the inputs change and hands back the previous
/// result when they do not.
pub struct Calculator<'a> {
    tables: &'a StaticTables,
    last: Option<Ranking>,
    computations: u64,
}

impl<'a> Calculator<'a> {
    pub fn new(tables: &'a StaticTables) -> Self {
        Self {
            tables,
            last: None,
            computations: 0,
        }
    }

    pub fn calculate(&mut self, inputs: RankingInputs) -> &Ranking {
        if self.last.as_ref().is_some_and(|ranking| ranking.inputs == inputs) {
            debug!(?inputs, "reusing ranking");
        } else {
            self.computations += 1;
            self.last = None;
        }
        let tables = self.tables;
        self.last
            .get_or_insert_with(|| Ranking::compute(tables, inputs))
    }

    /// Number of full recomputations so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
