//! Shared utilities for layout engines
//!
//! Provides the categorical and continuous scales the engines position against.

/// Item identifier type (u64), assigned by the caller when projecting its data
pub type ItemKey = u64;

/// A point in plot coordinates (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 60.0,
            left: 120.0,
        }
    }
}

/// Categorical band scale.
///
/// Splits a continuous range into `count` equal bands separated by a padding
/// expressed as a fraction of the step. The same padding is applied on the
/// outer edges and the bands are centered in the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        let padding = padding.clamp(0.0, 1.0);
        let extent = (range.1 - range.0).max(0.0);
        let n = count as f64;

        let step = extent / (n - padding + padding * 2.0).max(1.0);
        let start = range.0 + (extent - step * (n - padding)) * 0.5;

        BandScale {
            count,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of a single band
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Leading edge of band `idx`
    pub fn position(&self, idx: usize) -> f64 {
        self.start + self.step * idx as f64
    }

    /// Center of band `idx`
    pub fn center(&self, idx: usize) -> f64 {
        self.position(idx) + self.bandwidth / 2.0
    }
}

/// Square-root scale from `[0, domain_max]` onto `[min, max]`.
///
/// Area of a circle drawn with the resulting radius grows linearly with the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_max: f64,
    min: f64,
    max: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        let (min, max) = if range.0 <= range.1 { range } else { (range.1, range.0) };
        SqrtScale {
            domain_max: domain_max.max(0.0),
            min,
            max,
        }
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.domain_max <= 0.0 || !value.is_finite() {
            return self.min;
        }
        let t = value.max(0.0).sqrt() / self.domain_max.sqrt();
        (self.min + (self.max - self.min) * t).clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_scale_centers_bands() {
        let scale = BandScale::new(4, (0.0, 400.0), 0.0);
        assert_eq!(scale.bandwidth(), 100.0);
        assert_eq!(scale.center(0), 50.0);
        assert_eq!(scale.center(3), 350.0);
    }

    #[test]
    fn test_band_scale_padding_keeps_bands_inside_range() {
        let scale = BandScale::new(3, (10.0, 310.0), 0.2);
        assert!(scale.position(0) > 10.0);
        assert!(scale.position(2) + scale.bandwidth() < 310.0);
        assert!((scale.center(1) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_scale_empty_domain() {
        let scale = BandScale::new(0, (0.0, 100.0), 0.1);
        assert_eq!(scale.count(), 0);
        assert!(scale.bandwidth().is_finite());
    }

    #[test]
    fn test_sqrt_scale_is_area_linear() {
        let scale = SqrtScale::new(100.0, (0.0, 40.0));
        assert_eq!(scale.scale(100.0), 40.0);
        assert_eq!(scale.scale(25.0), 20.0);
        assert_eq!(scale.scale(0.0), 0.0);
    }

    #[test]
    fn test_sqrt_scale_bounds() {
        let scale = SqrtScale::new(50.0, (8.0, 36.0));
        assert_eq!(scale.scale(500.0), 36.0);
        assert_eq!(scale.scale(-3.0), 8.0);

        let flat = SqrtScale::new(0.0, (8.0, 36.0));
        assert_eq!(flat.scale(10.0), 8.0);
    }
}
