//! Threshold evaluation logic.
//!
//! This is the single source of truth for violation detection, shared by the
//! HTTP measurement path and the telemetry listener. Comparisons are strict:
//! a reading exactly at a bound is not a violation.

use crate::models::{AlertType, Axis, Threshold};

/// Computes the set of threshold violations for one reading.
pub fn violations(threshold: &Threshold, temperature_c: f64, humidity_percent: f64) -> Vec<AlertType> {
    let mut out = Vec::new();
    if temperature_c > threshold.temp_max {
        out.push(AlertType::TempHigh);
    }
    if temperature_c < threshold.temp_min {
        out.push(AlertType::TempLow);
    }
    if humidity_percent > threshold.humidity_max {
        out.push(AlertType::HumidityHigh);
    }
    if humidity_percent < threshold.humidity_min {
        out.push(AlertType::HumidityLow);
    }
    out
}

/// Axes with no violation in the given set. Open alerts of these axes'
/// types are auto-resolved: an axis back in range closes its alerts even
/// while the other axis keeps violating.
pub fn axes_in_bounds(violation_set: &[AlertType]) -> Vec<Axis> {
    Axis::ALL
        .into_iter()
        .filter(|axis| !violation_set.iter().any(|t| t.axis() == *axis))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn threshold() -> Threshold {
        Threshold {
            id: 1,
            warehouse_id: 1,
            temp_min: 10.0,
            temp_max: 25.0,
            humidity_min: 40.0,
            humidity_max: 70.0,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn in_range_reading_has_no_violations() {
        assert!(violations(&threshold(), 20.0, 50.0).is_empty());
    }

    #[test]
    fn readings_exactly_at_a_bound_are_not_violations() {
        assert!(violations(&threshold(), 25.0, 50.0).is_empty());
        assert!(violations(&threshold(), 10.0, 50.0).is_empty());
        assert!(violations(&threshold(), 20.0, 70.0).is_empty());
        assert!(violations(&threshold(), 20.0, 40.0).is_empty());
    }

    #[test]
    fn each_bound_triggers_its_type() {
        assert_eq!(violations(&threshold(), 30.0, 50.0), vec![AlertType::TempHigh]);
        assert_eq!(violations(&threshold(), 5.0, 50.0), vec![AlertType::TempLow]);
        assert_eq!(
            violations(&threshold(), 20.0, 75.5),
            vec![AlertType::HumidityHigh]
        );
        assert_eq!(
            violations(&threshold(), 20.0, 39.99),
            vec![AlertType::HumidityLow]
        );
    }

    #[test]
    fn both_axes_can_violate_at_once() {
        let v = violations(&threshold(), 30.0, 30.0);
        assert!(v.contains(&AlertType::TempHigh));
        assert!(v.contains(&AlertType::HumidityLow));
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn fractional_readings_compare_numerically() {
        // 25.01 > 25.0 must violate even though "25.01" < "25.1" fails
        // lexically in the other direction.
        assert_eq!(
            violations(&threshold(), 25.01, 50.0),
            vec![AlertType::TempHigh]
        );
        assert!(violations(&threshold(), 24.99, 50.0).is_empty());
    }

    #[test]
    fn axis_resolution_is_independent() {
        // Temperature violating, humidity in range: only the humidity axis
        // is eligible for auto-resolution.
        let v = violations(&threshold(), 30.0, 50.0);
        assert_eq!(axes_in_bounds(&v), vec![Axis::Humidity]);

        let v = violations(&threshold(), 20.0, 50.0);
        assert_eq!(axes_in_bounds(&v), vec![Axis::Temperature, Axis::Humidity]);

        let v = violations(&threshold(), 30.0, 80.0);
        assert!(axes_in_bounds(&v).is_empty());
    }
}
