//! Alert database entity.

use chrono::{DateTime, Utc};
use domain::models::{AlertStatus, AlertType};
use sqlx::FromRow;

/// Database entity for the alerts table.
#[derive(Debug, Clone, FromRow)]
pub struct AlertEntity {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub alert_type: AlertType,
    pub status: AlertStatus,
    pub warehouse_id: i64,
    pub sensor_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<AlertEntity> for domain::models::Alert {
    fn from(entity: AlertEntity) -> Self {
        Self {
            id: entity.id,
            alert_type: entity.alert_type,
            status: entity.status,
            warehouse_id: entity.warehouse_id,
            sensor_id: entity.sensor_id,
            user_id: entity.user_id,
            created_at: entity.created_at,
            resolved_at: entity.resolved_at,
        }
    }
}
