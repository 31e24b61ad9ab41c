//! Synthetic time-series generator
//!
//! Produces evenly spaced samples over a window. Each value is
//! `base + offset(seed, index)`, clamped to be non-negative, so identical
//! arguments always reproduce an identical series.

use crate::random::DeterministicSeeded;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Series generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesConfig {
    /// Samples per series
    pub points: usize,
    /// Length of the window ending at the anchor
    pub window_hours: i64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            points: 24,
            window_hours: 24,
        }
    }
}

/// One sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Sampling window `[end - span, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub end: DateTime<Utc>,
    pub span: Duration,
}

impl TimeWindow {
    pub fn new(end: DateTime<Utc>, span: Duration) -> Self {
        Self { end, span }
    }

    /// Window of `hours` ending at `end`; spans beyond chrono's range saturate
    pub fn last_hours(end: DateTime<Utc>, hours: i64) -> Self {
        let span = Duration::try_hours(hours.max(0)).unwrap_or(Duration::MAX);
        Self::new(end, span)
    }

    /// Window start, clamped to the earliest representable instant
    pub fn start(&self) -> DateTime<Utc> {
        self.end
            .checked_sub_signed(self.span)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Timestamp of sample `index` out of `count`.
    ///
    /// The first sample is the window start and the last is exactly the end;
    /// offsets are rounded down to whole milliseconds.
    pub fn sample_at(&self, index: usize, count: usize) -> DateTime<Utc> {
        if count <= 1 || index + 1 >= count {
            return self.end;
        }
        let start = self.start();
        let span_ms = (self.end - start).num_milliseconds() as i128;
        let offset_ms = span_ms * index as i128 / (count as i128 - 1);
        start
            .checked_add_signed(Duration::milliseconds(offset_ms as i64))
            .unwrap_or(self.end)
    }
}

/// Deterministic offset in `[-variance, variance)` for sample `index`
pub fn deterministic_offset(seed: u64, index: usize, variance: f64) -> f64 {
    DeterministicSeeded::new(seed).signed(index as u64) * variance
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Generate `point_count` samples around `base_value`.
pub fn generate_series(
    point_count: usize,
    base_value: f64,
    variance: f64,
    seed: u64,
    window: &TimeWindow,
) -> Vec<SeriesPoint> {
    (0..point_count)
        .map(|i| SeriesPoint {
            timestamp: window.sample_at(i, point_count),
            value: round2((base_value + deterministic_offset(seed, i, variance)).max(0.0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> TimeWindow {
        TimeWindow::last_hours(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(), 24)
    }

    #[test]
    fn test_reproducible() {
        let a = generate_series(24, 50.0, 10.0, 1234, &window());
        let b = generate_series(24, 50.0, 10.0, 1234, &window());
        assert_eq!(a, b);

        let c = generate_series(24, 50.0, 10.0, 1334, &window());
        assert_ne!(a, c);
    }

    #[test]
    fn test_evenly_spaced_over_window() {
        let w = window();
        let series = generate_series(24, 50.0, 10.0, 1, &w);
        assert_eq!(series.len(), 24);
        assert_eq!(series[0].timestamp, w.start());
        assert_eq!(series[23].timestamp, w.end);

        // 24h does not split into 23 whole-millisecond steps; gaps differ by at most 1ms
        let ideal = w.span.num_milliseconds() as f64 / 23.0;
        for pair in series.windows(2) {
            let gap = (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64;
            assert!((gap - ideal).abs() <= 1.0, "gap {} vs {}", gap, ideal);
        }
    }

    #[test]
    fn test_last_sample_is_window_end() {
        for count in [2, 7, 24, 288] {
            let series = generate_series(count, 10.0, 1.0, 5, &window());
            assert_eq!(series[count - 1].timestamp, window().end);
        }
    }

    #[test]
    fn test_oversized_window_saturates() {
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let w = TimeWindow::last_hours(end, 10_000_000_000);
        assert_eq!(w.start(), DateTime::<Utc>::MIN_UTC);

        let series = generate_series(24, 50.0, 10.0, 1, &w);
        assert_eq!(series[0].timestamp, DateTime::<Utc>::MIN_UTC);
        assert_eq!(series[23].timestamp, end);
        assert!(series.windows(2).all(|p| p[0].timestamp <= p[1].timestamp));

        let huge = TimeWindow::last_hours(end, i64::MAX);
        assert_eq!(huge.span, Duration::MAX);
        assert_eq!(huge.sample_at(0, 2), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_values_within_variance() {
        for p in generate_series(24, 50.0, 10.0, 99, &window()) {
            assert!(p.value >= 40.0 && p.value <= 60.0);
        }
    }

    #[test]
    fn test_clamped_non_negative() {
        for p in generate_series(48, 0.5, 20.0, 7, &window()) {
            assert!(p.value >= 0.0);
        }
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(generate_series(0, 1.0, 1.0, 1, &window()).is_empty());
        let single = generate_series(1, 1.0, 0.0, 1, &window());
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].timestamp, window().end);
        assert_eq!(single[0].value, 1.0);
    }
}
