//! Sensor measurement domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single environmental reading from a sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: i64,
    pub sensor_id: i64,
    pub measured_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

/// Request payload for ingesting a measurement through the API.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    #[validate(range(min = 1, message = "sensorId must be positive"))]
    pub sensor_id: i64,

    #[validate(range(min = -90.0, max = 90.0, message = "temperatureC out of plausible range"))]
    pub temperature_c: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityPercent must be a percentage"))]
    pub humidity_percent: f64,

    /// Defaults to the ingestion time when omitted.
    pub measured_at: Option<DateTime<Utc>>,
}

/// Request payload for correcting a measurement. Employees may not reassign
/// the sensor; admins and owners may, as long as the sensor exists.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeasurementRequest {
    pub sensor_id: Option<i64>,

    #[validate(range(min = -90.0, max = 90.0, message = "temperatureC out of plausible range"))]
    pub temperature_c: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "humidityPercent must be a percentage"))]
    pub humidity_percent: Option<f64>,

    pub measured_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_at_is_optional() {
        let req: CreateMeasurementRequest = serde_json::from_str(
            r#"{"sensorId":1,"temperatureC":21.5,"humidityPercent":55.25}"#,
        )
        .unwrap();
        assert!(req.measured_at.is_none());
        assert_eq!(req.temperature_c, 21.5);
        assert_eq!(req.humidity_percent, 55.25);
    }

    #[test]
    fn humidity_outside_percentage_fails_validation() {
        let req = CreateMeasurementRequest {
            sensor_id: 1,
            temperature_c: 20.0,
            humidity_percent: 130.0,
            measured_at: None,
        };
        assert!(req.validate().is_err());
    }
}
