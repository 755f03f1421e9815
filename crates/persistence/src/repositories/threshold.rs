//! Threshold repository implementation.
//!
//! One row per warehouse, enforced by a unique constraint. Absence of a row
//! is a valid state: the evaluator skips unconfigured warehouses.

use domain::models::ThresholdBounds;
use sqlx::{PgConnection, PgPool};

use crate::entities::ThresholdEntity;

/// Repository for threshold database operations.
#[derive(Clone)]
pub struct ThresholdRepository {
    pool: PgPool,
}

impl ThresholdRepository {
    /// Creates a new threshold repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists all threshold configurations.
    pub async fn find_all(&self) -> Result<Vec<ThresholdEntity>, sqlx::Error> {
        sqlx::query_as::<_, ThresholdEntity>(
            r#"
            SELECT * FROM thresholds
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Finds the threshold configuration for a warehouse.
    pub async fn find_by_warehouse(
        &self,
        warehouse_id: i64,
    ) -> Result<Option<ThresholdEntity>, sqlx::Error> {
        sqlx::query_as::<_, ThresholdEntity>(
            r#"
            SELECT * FROM thresholds
            WHERE warehouse_id = $1
            "#,
        )
        .bind(warehouse_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Same lookup on an explicit connection, for use inside the ingestion
    /// transaction.
    pub async fn find_by_warehouse_in(
        conn: &mut PgConnection,
        warehouse_id: i64,
    ) -> Result<Option<ThresholdEntity>, sqlx::Error> {
        sqlx::query_as::<_, ThresholdEntity>(
            r#"
            SELECT * FROM thresholds
            WHERE warehouse_id = $1
            "#,
        )
        .bind(warehouse_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Inserts a threshold configuration. A second row for the same
    /// warehouse violates the unique constraint (23505).
    pub async fn insert(
        conn: &mut PgConnection,
        warehouse_id: i64,
        bounds: ThresholdBounds,
    ) -> Result<ThresholdEntity, sqlx::Error> {
        sqlx::query_as::<_, ThresholdEntity>(
            r#"
            INSERT INTO thresholds (warehouse_id, temp_min, temp_max, humidity_min, humidity_max)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(warehouse_id)
        .bind(bounds.temp_min)
        .bind(bounds.temp_max)
        .bind(bounds.humidity_min)
        .bind(bounds.humidity_max)
        .fetch_one(&mut *conn)
        .await
    }

    /// Replaces the bounds of a warehouse's threshold row with the merged,
    /// already-validated result.
    pub async fn update(
        conn: &mut PgConnection,
        warehouse_id: i64,
        bounds: ThresholdBounds,
    ) -> Result<ThresholdEntity, sqlx::Error> {
        sqlx::query_as::<_, ThresholdEntity>(
            r#"
            UPDATE thresholds
            SET temp_min = $2, temp_max = $3, humidity_min = $4, humidity_max = $5,
                updated_at = NOW()
            WHERE warehouse_id = $1
            RETURNING *
            "#,
        )
        .bind(warehouse_id)
        .bind(bounds.temp_min)
        .bind(bounds.temp_max)
        .bind(bounds.humidity_min)
        .bind(bounds.humidity_max)
        .fetch_one(&mut *conn)
        .await
    }

    /// Removes the threshold configuration of a warehouse. Returns the
    /// number of rows removed.
    pub async fn delete(conn: &mut PgConnection, warehouse_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM thresholds
            WHERE warehouse_id = $1
            "#,
        )
        .bind(warehouse_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
