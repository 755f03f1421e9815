//! Warehouse domain model and reporting types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A warehouse, the root scoping unit for sensors, thresholds and alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub status: String,
}

/// Cross-entity summary row for owner reporting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSummary {
    pub warehouse_id: i64,
    pub name: String,
    pub sensor_count: i64,
    pub open_alert_count: i64,
    pub last_measurement_at: Option<DateTime<Utc>>,
    pub has_thresholds: bool,
}
