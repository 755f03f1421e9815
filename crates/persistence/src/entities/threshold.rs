//! Threshold database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the thresholds table.
#[derive(Debug, Clone, FromRow)]
pub struct ThresholdEntity {
    pub id: i64,
    pub warehouse_id: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<ThresholdEntity> for domain::models::Threshold {
    fn from(entity: ThresholdEntity) -> Self {
        Self {
            id: entity.id,
            warehouse_id: entity.warehouse_id,
            temp_min: entity.temp_min,
            temp_max: entity.temp_max,
            humidity_min: entity.humidity_min,
            humidity_max: entity.humidity_max,
            updated_at: entity.updated_at,
        }
    }
}
