//! Trend classification over an ordered numeric series.
//!
//! Only the first and last points are compared. The percentage change is relative to
//! the first point, so a series starting at zero or below has no usable baseline.

use serde::Serialize;

/// Default absolute percentage change below which a series is stable.
pub const DEFAULT_STABLE_THRESHOLD_PCT: f64 = 5.0;

/// Direction and magnitude of change between the first and last point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    /// Fewer than two points.
    InsufficientData,
    /// First point is zero, negative or not finite, or the change overflows.
    NoBaseline,
    Stable,
    Increasing(f64),
    Decreasing(f64),
}

impl Trend {
    /// Model-facing label; `None` when there is not enough data to say anything.
    pub fn label(&self) -> Option<String> {
        match self {
            Trend::InsufficientData => None,
            Trend::NoBaseline => Some("no baseline available".to_string()),
            Trend::Stable => Some("stable".to_string()),
            Trend::Increasing(pct) => Some(format!("increasing (+{:.1}%)", pct)),
            Trend::Decreasing(pct) => Some(format!("decreasing ({:.1}%)", pct)),
        }
    }
}

impl Serialize for Trend {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(&label),
            None => serializer.serialize_none(),
        }
    }
}

/// Classifier with a configurable stability threshold.
#[derive(Debug, Clone, Copy)]
pub struct TrendCalculator {
    stable_threshold_pct: f64,
}

impl Default for TrendCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_STABLE_THRESHOLD_PCT)
    }
}

impl TrendCalculator {
    pub fn new(stable_threshold_pct: f64) -> Self {
        Self {
            stable_threshold_pct: stable_threshold_pct.abs(),
        }
    }

    pub fn classify(&self, series: &[f64]) -> Trend {
        let (first, last) = match series {
            [first, .., last] => (*first, *last),
            _ => return Trend::InsufficientData,
        };

        if !first.is_finite() || first <= 0.0 || !last.is_finite() {
            return Trend::NoBaseline;
        }

        let change_pct = (last - first) / first * 100.0;
        if !change_pct.is_finite() {
            return Trend::NoBaseline;
        }
        if change_pct.abs() < self.stable_threshold_pct {
            Trend::Stable
        } else if change_pct > 0.0 {
            Trend::Increasing(change_pct)
        } else {
            Trend::Decreasing(change_pct)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(series: &[f64]) -> Option<String> {
        TrendCalculator::default().classify(series).label()
    }

    #[test]
    fn test_literal_cases() {
        assert_eq!(label(&[100.0, 100.0]).as_deref(), Some("stable"));
        assert_eq!(label(&[100.0, 106.0]).as_deref(), Some("increasing (+6.0%)"));
        assert_eq!(label(&[100.0, 90.0]).as_deref(), Some("decreasing (-10.0%)"));
    }

    #[test]
    fn test_short_series_has_no_trend() {
        assert_eq!(label(&[]), None);
        assert_eq!(label(&[42.0]), None);
    }

    #[test]
    fn test_only_endpoints_matter() {
        assert_eq!(label(&[100.0, 300.0, 10.0, 103.0]).as_deref(), Some("stable"));
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(label(&[100.0, 104.9]).as_deref(), Some("stable"));
        assert_eq!(label(&[100.0, 105.0]).as_deref(), Some("increasing (+5.0%)"));
    }

    #[test]
    fn test_zero_or_negative_baseline() {
        assert_eq!(label(&[0.0, 5.0]).as_deref(), Some("no baseline available"));
        assert_eq!(label(&[-2.0, 5.0]).as_deref(), Some("no baseline available"));
        assert_eq!(label(&[f64::NAN, 5.0]).as_deref(), Some("no baseline available"));
    }

    #[test]
    fn test_overflowing_change_has_no_baseline() {
        let calc = TrendCalculator::default();
        assert_eq!(calc.classify(&[1e-300, 1e10]), Trend::NoBaseline);
        assert_eq!(calc.classify(&[1.0, f64::MAX]), Trend::NoBaseline);
        assert_eq!(label(&[1e-300, 1e10]).as_deref(), Some("no baseline available"));
    }

    #[test]
    fn test_custom_threshold() {
        let calc = TrendCalculator::new(10.0);
        assert_eq!(calc.classify(&[100.0, 108.0]), Trend::Stable);
    }

    #[test]
    fn test_serializes_as_label_or_null() {
        assert_eq!(serde_json::to_value(Trend::Stable).unwrap(), "stable");
        assert!(serde_json::to_value(Trend::InsufficientData).unwrap().is_null());
    }
}
