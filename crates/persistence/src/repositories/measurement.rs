//! Measurement repository implementation.
//!
//! Reads join the owning warehouse through the sensor so handlers can apply
//! employee scoping without a second lookup.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::entities::{MeasurementEntity, MeasurementWithWarehouseEntity};

/// Repository for measurement database operations.
#[derive(Clone)]
pub struct MeasurementRepository {
    pool: PgPool,
}

impl MeasurementRepository {
    /// Creates a new measurement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists measurements, newest first. `scope` restricts to one warehouse.
    pub async fn find_all(
        &self,
        scope: Option<i64>,
    ) -> Result<Vec<MeasurementWithWarehouseEntity>, sqlx::Error> {
        sqlx::query_as::<_, MeasurementWithWarehouseEntity>(
            r#"
            SELECT m.id, m.sensor_id, m.measured_at, m.temperature_c, m.humidity_percent,
                   s.warehouse_id
            FROM measurements m
            JOIN sensors s ON s.id = m.sensor_id
            WHERE ($1::bigint IS NULL OR s.warehouse_id = $1)
            ORDER BY m.id DESC
            "#,
        )
        .bind(scope)
        .fetch_all(&self.pool)
        .await
    }

    /// Finds a measurement with its owning warehouse.
    pub async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<MeasurementWithWarehouseEntity>, sqlx::Error> {
        sqlx::query_as::<_, MeasurementWithWarehouseEntity>(
            r#"
            SELECT m.id, m.sensor_id, m.measured_at, m.temperature_c, m.humidity_percent,
                   s.warehouse_id
            FROM measurements m
            JOIN sensors s ON s.id = m.sensor_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a measurement. `measured_at` has already been defaulted to
    /// the ingestion time by the caller when absent from the payload.
    pub async fn insert(
        conn: &mut PgConnection,
        sensor_id: i64,
        measured_at: DateTime<Utc>,
        temperature_c: f64,
        humidity_percent: f64,
    ) -> Result<MeasurementEntity, sqlx::Error> {
        sqlx::query_as::<_, MeasurementEntity>(
            r#"
            INSERT INTO measurements (sensor_id, measured_at, temperature_c, humidity_percent)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(sensor_id)
        .bind(measured_at)
        .bind(temperature_c)
        .bind(humidity_percent)
        .fetch_one(&mut *conn)
        .await
    }

    /// Applies a correction to a measurement.
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        sensor_id: i64,
        measured_at: DateTime<Utc>,
        temperature_c: f64,
        humidity_percent: f64,
    ) -> Result<MeasurementEntity, sqlx::Error> {
        sqlx::query_as::<_, MeasurementEntity>(
            r#"
            UPDATE measurements
            SET sensor_id = $2, measured_at = $3, temperature_c = $4, humidity_percent = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(sensor_id)
        .bind(measured_at)
        .bind(temperature_c)
        .bind(humidity_percent)
        .fetch_one(&mut *conn)
        .await
    }

    /// Deletes a measurement. Returns the number of rows removed.
    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM measurements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
