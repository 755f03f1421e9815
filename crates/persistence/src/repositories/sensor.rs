//! Sensor lookup repository.
//!
//! Sensor management is owned by the surrounding CRUD services; this core
//! only resolves sensors to their warehouse, by id for API ingestion and by
//! serial for telemetry deliveries.

use sqlx::PgPool;

use crate::entities::SensorEntity;

/// Repository for sensor lookups.
#[derive(Clone)]
pub struct SensorRepository {
    pool: PgPool,
}

impl SensorRepository {
    /// Creates a new sensor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a sensor by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SensorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SensorEntity>(
            r#"
            SELECT * FROM sensors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a sensor by its serial number.
    pub async fn find_by_serial(
        &self,
        serial_number: &str,
    ) -> Result<Option<SensorEntity>, sqlx::Error> {
        sqlx::query_as::<_, SensorEntity>(
            r#"
            SELECT * FROM sensors
            WHERE serial_number = $1
            "#,
        )
        .bind(serial_number)
        .fetch_optional(&self.pool)
        .await
    }
}
