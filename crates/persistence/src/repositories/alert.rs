//! Alert repository implementation.
//!
//! Reads run on the pool; every mutation takes an explicit connection so the
//! caller can group it with its audit entry in one transaction. The
//! open-alert invariant (at most one NEW alert per warehouse/sensor/type) is
//! backed by a partial unique index, so concurrent evaluators cannot insert
//! duplicates even when both observe "no open alert".

use chrono::{DateTime, Utc};
use domain::models::{AlertStatus, AlertType};
use sqlx::{PgConnection, PgPool};

use crate::entities::AlertEntity;

/// Repository for alert database operations.
#[derive(Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Creates a new alert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists alerts, newest first. `scope` restricts to one warehouse.
    pub async fn find_all(&self, scope: Option<i64>) -> Result<Vec<AlertEntity>, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            SELECT * FROM alerts
            WHERE ($1::bigint IS NULL OR warehouse_id = $1)
            ORDER BY id DESC
            "#,
        )
        .bind(scope)
        .fetch_all(&self.pool)
        .await
    }

    /// Finds an alert by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AlertEntity>, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            SELECT * FROM alerts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a NEW alert. A duplicate open alert for the same
    /// (warehouse, sensor, type) violates the partial unique index and
    /// surfaces as a database error (23505).
    pub async fn insert(
        conn: &mut PgConnection,
        alert_type: AlertType,
        warehouse_id: i64,
        sensor_id: Option<i64>,
        user_id: Option<i64>,
    ) -> Result<AlertEntity, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            INSERT INTO alerts (type, status, warehouse_id, sensor_id, user_id)
            VALUES ($1, 'NEW', $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(alert_type)
        .bind(warehouse_id)
        .bind(sensor_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Inserts a NEW alert unless one is already open for the triple.
    /// Returns `None` when the open alert already existed, which callers
    /// treat as a no-op: a persistent violation must not regenerate alerts
    /// on every reading.
    pub async fn insert_open_if_absent(
        conn: &mut PgConnection,
        alert_type: AlertType,
        warehouse_id: i64,
        sensor_id: i64,
    ) -> Result<Option<AlertEntity>, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            INSERT INTO alerts (type, status, warehouse_id, sensor_id, user_id)
            VALUES ($1, 'NEW', $2, $3, NULL)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
        .bind(alert_type)
        .bind(warehouse_id)
        .bind(sensor_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Transitions all NEW alerts of the two given types for one
    /// (warehouse, sensor) to RESOLVED. Returns the transitioned rows.
    pub async fn resolve_open_of_types(
        conn: &mut PgConnection,
        warehouse_id: i64,
        sensor_id: i64,
        types: [AlertType; 2],
        resolved_at: DateTime<Utc>,
    ) -> Result<Vec<AlertEntity>, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            UPDATE alerts
            SET status = 'RESOLVED', resolved_at = $4
            WHERE warehouse_id = $1
              AND sensor_id = $2
              AND status = 'NEW'
              AND type IN ($3, $5)
            RETURNING *
            "#,
        )
        .bind(warehouse_id)
        .bind(sensor_id)
        .bind(types[0])
        .bind(resolved_at)
        .bind(types[1])
        .fetch_all(&mut *conn)
        .await
    }

    /// Updates the mutable fields of an alert (type and sensor reference).
    pub async fn update_fields(
        conn: &mut PgConnection,
        id: i64,
        alert_type: AlertType,
        sensor_id: Option<i64>,
    ) -> Result<AlertEntity, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            UPDATE alerts
            SET type = $2, sensor_id = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(alert_type)
        .bind(sensor_id)
        .fetch_one(&mut *conn)
        .await
    }

    /// Moves an alert to the given status, stamping the acting user and,
    /// for RESOLVED, the resolution time. RESOLVED is terminal, and the
    /// guard lives in the SQL so a transition racing a concurrent resolve
    /// loses here rather than overwriting it. Returns `None` when the row
    /// was already resolved.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: i64,
        status: AlertStatus,
        user_id: i64,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<AlertEntity>, sqlx::Error> {
        sqlx::query_as::<_, AlertEntity>(
            r#"
            UPDATE alerts
            SET status = $2, user_id = $3, resolved_at = COALESCE($4, resolved_at)
            WHERE id = $1 AND status <> 'RESOLVED'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(user_id)
        .bind(resolved_at)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Deletes an alert. Returns the number of rows removed.
    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM alerts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
