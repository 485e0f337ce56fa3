//! Read models over the machine state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use gachapon_core::clock::Clock;

use crate::domain::aggregates::GachaMachine;
use crate::domain::history::format_relative_age;

/// Pick statistics as shown to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    /// Total number of committed draws.
    pub total_picks: u64,
    /// Most recently drawn option.
    pub last_pick: Option<String>,
}

/// One row of the draw history, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawView {
    /// The drawn option as it read at draw time.
    pub option: String,
    /// Position of the draw in the session, starting at 1.
    pub pick_number: u64,
    /// When the draw was committed.
    pub timestamp: DateTime<Utc>,
    /// Human-readable age of the draw, such as `5m ago`.
    pub age: String,
}

/// Projects the machine's pick statistics.
#[must_use]
pub fn stats_view(machine: &GachaMachine) -> StatsView {
    StatsView {
        total_picks: machine.total_picks(),
        last_pick: machine.last_pick().map(str::to_owned),
    }
}

/// Projects the draw history, newest first, with ages rendered against
/// the given clock.
pub fn draw_views(machine: &GachaMachine, clock: &dyn Clock) -> Vec<DrawView> {
    let now = clock.now();
    machine
        .history()
        .newest_first()
        .map(|record| DrawView {
            option: record.option.clone(),
            pick_number: record.sequence_number,
            timestamp: record.timestamp,
            age: format_relative_age(record.timestamp, now),
        })
        .collect()
}
