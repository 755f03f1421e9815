//! Warehouse lookup and reporting repository.
//!
//! Warehouse CRUD is owned by the surrounding services; the core needs
//! existence checks for referenced ids and the owner-only summary query.

use sqlx::PgPool;

use crate::entities::{WarehouseEntity, WarehouseSummaryEntity};

/// Repository for warehouse lookups and reporting.
#[derive(Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    /// Creates a new warehouse repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a warehouse by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<WarehouseEntity>, sqlx::Error> {
        sqlx::query_as::<_, WarehouseEntity>(
            r#"
            SELECT * FROM warehouses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Cross-entity summary for owner reporting: per warehouse, the sensor
    /// count, open (NEW) alert count, latest measurement time, and whether
    /// thresholds are configured.
    pub async fn summary(&self) -> Result<Vec<WarehouseSummaryEntity>, sqlx::Error> {
        sqlx::query_as::<_, WarehouseSummaryEntity>(
            r#"
            SELECT w.id AS warehouse_id,
                   w.name,
                   (SELECT COUNT(*) FROM sensors s WHERE s.warehouse_id = w.id) AS sensor_count,
                   (SELECT COUNT(*) FROM alerts a
                     WHERE a.warehouse_id = w.id AND a.status = 'NEW') AS open_alert_count,
                   (SELECT MAX(m.measured_at) FROM measurements m
                     JOIN sensors s ON s.id = m.sensor_id
                     WHERE s.warehouse_id = w.id) AS last_measurement_at,
                   EXISTS(SELECT 1 FROM thresholds t WHERE t.warehouse_id = w.id) AS has_thresholds
            FROM warehouses w
            ORDER BY w.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
