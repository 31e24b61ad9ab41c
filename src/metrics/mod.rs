//! Derived monitoring metrics
//!
//! Everything here is a pure function of its inputs: identifier hashing,
//! synthetic time series, the health score and the per-system activity figures.

pub mod activity;
pub mod hash;
pub mod health;
pub mod series;

pub use activity::{activity_for, ActivityFigures};
pub use hash::{hash_id, seed_of};
pub use health::{compute_health_score, HealthBreakdown};
pub use series::{deterministic_offset, generate_series, SeriesConfig, SeriesPoint, TimeWindow};
