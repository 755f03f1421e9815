//! Per-warehouse threshold configuration.
//!
//! Exactly one threshold row may exist per warehouse, and its absence is a
//! valid state: the evaluator silently skips unconfigured warehouses. Both
//! axis bounds must satisfy min < max on every write, including partial
//! updates of a single bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Threshold configuration for one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub id: i64,
    pub warehouse_id: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub updated_at: DateTime<Utc>,
}

/// The four bounds of a threshold, detached from identity. Used to validate
/// merged results before persisting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdBounds {
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
}

/// Violation of the min < max invariant on one axis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("temp_min must be < temp_max")]
    TemperatureRange,

    #[error("humidity_min must be < humidity_max")]
    HumidityRange,
}

impl ThresholdBounds {
    /// Checks the two axis inequalities.
    pub fn validate(&self) -> Result<(), BoundsError> {
        if self.temp_min >= self.temp_max {
            return Err(BoundsError::TemperatureRange);
        }
        if self.humidity_min >= self.humidity_max {
            return Err(BoundsError::HumidityRange);
        }
        Ok(())
    }
}

impl Threshold {
    pub fn bounds(&self) -> ThresholdBounds {
        ThresholdBounds {
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            humidity_min: self.humidity_min,
            humidity_max: self.humidity_max,
        }
    }

    /// Merges a partial update onto the current bounds. The caller must
    /// validate the merged result before persisting it.
    pub fn merged(&self, update: &UpdateThresholdRequest) -> ThresholdBounds {
        ThresholdBounds {
            temp_min: update.temp_min.unwrap_or(self.temp_min),
            temp_max: update.temp_max.unwrap_or(self.temp_max),
            humidity_min: update.humidity_min.unwrap_or(self.humidity_min),
            humidity_max: update.humidity_max.unwrap_or(self.humidity_max),
        }
    }
}

/// Request payload for creating a threshold configuration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThresholdRequest {
    #[validate(range(min = 1, message = "warehouseId must be positive"))]
    pub warehouse_id: i64,

    pub temp_min: f64,
    pub temp_max: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityMin must be a percentage"))]
    pub humidity_min: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityMax must be a percentage"))]
    pub humidity_max: f64,
}

impl CreateThresholdRequest {
    pub fn bounds(&self) -> ThresholdBounds {
        ThresholdBounds {
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            humidity_min: self.humidity_min,
            humidity_max: self.humidity_max,
        }
    }
}

/// Request payload for a partial threshold update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThresholdRequest {
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityMin must be a percentage"))]
    pub humidity_min: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityMax must be a percentage"))]
    pub humidity_max: Option<f64>,
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
    fn valid_bounds_pass() {
        assert_eq!(threshold().bounds().validate(), Ok(()));
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let mut b = threshold().bounds();
        b.temp_min = b.temp_max;
        assert_eq!(b.validate(), Err(BoundsError::TemperatureRange));

        let mut b = threshold().bounds();
        b.humidity_max = b.humidity_min;
        assert_eq!(b.validate(), Err(BoundsError::HumidityRange));
    }

    #[test]
    fn lone_bound_change_cannot_break_the_invariant() {
        // Raising temp_min past the existing temp_max must fail on the
        // merged result even though the update itself carries one field.
        let update = UpdateThresholdRequest {
            temp_min: Some(30.0),
            ..Default::default()
        };
        let merged = threshold().merged(&update);
        assert_eq!(merged.validate(), Err(BoundsError::TemperatureRange));
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let update = UpdateThresholdRequest {
            humidity_max: Some(80.0),
            ..Default::default()
        };
        let merged = threshold().merged(&update);
        assert_eq!(merged.temp_min, 10.0);
        assert_eq!(merged.temp_max, 25.0);
        assert_eq!(merged.humidity_min, 40.0);
        assert_eq!(merged.humidity_max, 80.0);
        assert_eq!(merged.validate(), Ok(()));
    }
}
