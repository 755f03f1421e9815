//! Alert domain model and lifecycle types.
//!
//! An alert is opened (status NEW) either by the threshold evaluator or by a
//! manual create call, may be acknowledged by an employee of its warehouse,
//! and ends in RESOLVED. RESOLVED is terminal: a recurring violation opens a
//! fresh record instead of reopening the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The measurement dimension an alert type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Temperature,
    Humidity,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Temperature, Axis::Humidity];

    /// The two violation types governed by this axis.
    pub fn alert_types(&self) -> [AlertType; 2] {
        match self {
            Axis::Temperature => [AlertType::TempHigh, AlertType::TempLow],
            Axis::Humidity => [AlertType::HumidityHigh, AlertType::HumidityLow],
        }
    }
}

/// Kind of threshold violation an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "alert_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    TempHigh,
    TempLow,
    HumidityHigh,
    HumidityLow,
}

impl AlertType {
    pub fn axis(&self) -> Axis {
        match self {
            AlertType::TempHigh | AlertType::TempLow => Axis::Temperature,
            AlertType::HumidityHigh | AlertType::HumidityLow => Axis::Humidity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::TempHigh => "TEMP_HIGH",
            AlertType::TempLow => "TEMP_LOW",
            AlertType::HumidityHigh => "HUMIDITY_HIGH",
            AlertType::HumidityLow => "HUMIDITY_LOW",
        }
    }
}

/// Lifecycle state of an alert. NEW -> ACKNOWLEDGED -> RESOLVED, or
/// NEW -> RESOLVED directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "alert_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
}

/// An alert record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub status: AlertStatus,
    pub warehouse_id: i64,
    /// Originating sensor; NULL for warehouse-level manual alerts.
    pub sensor_id: Option<i64>,
    /// Attributed user; NULL means system-generated.
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Request payload for manually creating an alert.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    #[serde(rename = "type")]
    pub alert_type: AlertType,

    #[validate(range(min = 1, message = "warehouseId must be positive"))]
    pub warehouse_id: i64,

    pub sensor_id: Option<i64>,
}

/// Request payload for updating an alert. The warehouse is immutable; only
/// the type and the sensor reference may change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertRequest {
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,

    pub sensor_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_axis_governs_its_two_types() {
        assert_eq!(
            Axis::Temperature.alert_types(),
            [AlertType::TempHigh, AlertType::TempLow]
        );
        assert_eq!(
            Axis::Humidity.alert_types(),
            [AlertType::HumidityHigh, AlertType::HumidityLow]
        );
        for axis in Axis::ALL {
            for t in axis.alert_types() {
                assert_eq!(t.axis(), axis);
            }
        }
    }

    #[test]
    fn alert_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&AlertType::HumidityLow).unwrap();
        assert_eq!(json, "\"HUMIDITY_LOW\"");
        assert_eq!(AlertType::TempHigh.as_str(), "TEMP_HIGH");
    }

    #[test]
    fn create_request_uses_type_field_name() {
        let req: CreateAlertRequest = serde_json::from_str(
            r#"{"type":"TEMP_LOW","warehouseId":3,"sensorId":null}"#,
        )
        .unwrap();
        assert_eq!(req.alert_type, AlertType::TempLow);
        assert_eq!(req.warehouse_id, 3);
        assert!(req.sensor_id.is_none());
    }
}
