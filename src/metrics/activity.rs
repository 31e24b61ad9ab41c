//! Per-system activity figures shown next to each system card.
//!
//! All figures are hash-seeded so a system shows the same numbers on every render.

use crate::random::DeterministicSeeded;
use serde::{Deserialize, Serialize};

const TREND_POINTS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFigures {
    /// "Updated N minutes ago", 1..=59
    pub minutes_ago: u32,
    /// Requests per day
    pub access_volume: u64,
    /// Log lines per day
    pub log_volume: u64,
    /// Seven-point sparkline, values between 20 and 100
    pub trend: Vec<f64>,
}

pub fn activity_for(system_id: &str) -> ActivityFigures {
    let seeded = DeterministicSeeded::from_id(system_id);

    let minutes_ago = 1 + (seeded.seed() % 59) as u32;
    let access_volume = seeded.int_range(1, 5_000, 200_000);
    let log_volume = access_volume * seeded.int_range(2, 3, 12);

    let trend_seed = seeded.offset(TREND_POINTS);
    let trend = (0..TREND_POINTS)
        .map(|i| (trend_seed.range(i, 20.0, 100.0) * 10.0).round() / 10.0)
        .collect();

    ActivityFigures {
        minutes_ago,
        access_volume,
        log_volume,
        trend,
    }
}
