//! Deterministic daily ordering of the catalog.
//!
//! Everyone browsing on the same calendar day sees the same order; the
//! order changes when the date does.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::RecordTable;

/// Ordinal day number of `date`, with 0001-01-01 as day 1.
pub fn daily_seed(date: NaiveDate) -> u64 {
    // num_days_from_ce is 1 for 0001-01-01 and positive for every later date.
    date.num_days_from_ce().max(0) as u64
}

/// Shuffle `ids` with a generator seeded from `seed`.
///
/// The input is sorted first so the permutation depends only on the id set.
pub fn seeded_permutation(mut ids: Vec<u64>, seed: u64) -> Vec<u64> {
    ids.sort_unstable();
    let mut rng = StdRng::seed_from_u64(seed);
    ids.shuffle(&mut rng);
    ids
}

/// The order every identifier in `table` is presented in on `date`.
pub fn daily_order(table: &RecordTable, date: NaiveDate) -> Vec<u64> {
    seeded_permutation(table.ids().collect(), daily_seed(date))
}

/// A daily order remembered by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOrder {
    pub day: NaiveDate,
    pub generation: u64,
    pub ids: Vec<u64>,
}

impl DailyOrder {
    pub fn compute(table: &RecordTable, day: NaiveDate) -> Self {
        Self {
            day,
            generation: table.generation(),
            ids: daily_order(table, day),
        }
    }

    /// Still valid for this table on this day.
    pub fn is_current(&self, table: &RecordTable, day: NaiveDate) -> bool {
        self.day == day && self.generation == table.generation()
    }
}
