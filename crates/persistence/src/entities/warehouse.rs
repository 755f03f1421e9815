//! Warehouse database entity and reporting rows.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the warehouses table.
#[derive(Debug, Clone, FromRow)]
pub struct WarehouseEntity {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub status: String,
}

/// One row of the owner-only cross-entity warehouse summary.
#[derive(Debug, Clone, FromRow)]
pub struct WarehouseSummaryEntity {
    pub warehouse_id: i64,
    pub name: String,
    pub sensor_count: i64,
    pub open_alert_count: i64,
    pub last_measurement_at: Option<DateTime<Utc>>,
    pub has_thresholds: bool,
}

impl From<WarehouseEntity> for domain::models::Warehouse {
    fn from(entity: WarehouseEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            location: entity.location,
            status: entity.status,
        }
    }
}

impl From<WarehouseSummaryEntity> for domain::models::WarehouseSummary {
    fn from(entity: WarehouseSummaryEntity) -> Self {
        Self {
            warehouse_id: entity.warehouse_id,
            name: entity.name,
            sensor_count: entity.sensor_count,
            open_alert_count: entity.open_alert_count,
            last_measurement_at: entity.last_measurement_at,
            has_thresholds: entity.has_thresholds,
        }
    }
}
