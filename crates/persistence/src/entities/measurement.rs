//! Measurement database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the measurements table.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementEntity {
    pub id: i64,
    pub sensor_id: i64,
    pub measured_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

/// Measurement joined with its sensor's owning warehouse, for scope checks.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementWithWarehouseEntity {
    pub id: i64,
    pub sensor_id: i64,
    pub measured_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub warehouse_id: i64,
}

impl From<MeasurementEntity> for domain::models::Measurement {
    fn from(entity: MeasurementEntity) -> Self {
        Self {
            id: entity.id,
            sensor_id: entity.sensor_id,
            measured_at: entity.measured_at,
            temperature_c: entity.temperature_c,
            humidity_percent: entity.humidity_percent,
        }
    }
}

impl From<MeasurementWithWarehouseEntity> for domain::models::Measurement {
    fn from(entity: MeasurementWithWarehouseEntity) -> Self {
        Self {
            id: entity.id,
            sensor_id: entity.sensor_id,
            measured_at: entity.measured_at,
            temperature_c: entity.temperature_c,
            humidity_percent: entity.humidity_percent,
        }
    }
}
