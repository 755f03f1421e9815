//! Sensor database entity.

use sqlx::FromRow;

/// Database entity for the sensors table.
#[derive(Debug, Clone, FromRow)]
pub struct SensorEntity {
    pub id: i64,
    pub warehouse_id: i64,
    pub serial_number: String,
    pub is_active: bool,
}

impl From<SensorEntity> for domain::models::Sensor {
    fn from(entity: SensorEntity) -> Self {
        Self {
            id: entity.id,
            warehouse_id: entity.warehouse_id,
            serial_number: entity.serial_number,
            is_active: entity.is_active,
        }
    }
}
