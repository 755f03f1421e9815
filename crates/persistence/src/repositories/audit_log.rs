//! Audit log repository.
//!
//! Append and query only. No update or delete exists on this table by
//! design; the trail only grows.

use chrono::{DateTime, Utc};
use domain::models::{AuditAction, AuditEntity, NewAuditEntry};
use sqlx::{PgConnection, PgPool};

use crate::entities::AuditLogEntity;

/// Typed, already-validated filters for querying the audit trail.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    pub entity: Option<AuditEntity>,
    pub action: Option<AuditAction>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Repository for audit log database operations.
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends one audit entry on the caller's connection so it commits or
    /// rolls back together with the mutation it describes.
    pub async fn append(
        conn: &mut PgConnection,
        entry: &NewAuditEntry,
    ) -> Result<AuditLogEntity, sqlx::Error> {
        sqlx::query_as::<_, AuditLogEntity>(
            r#"
            INSERT INTO audit_logs (actor_user_id, actor_role, action, entity, entity_id, details)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(entry.actor_user_id)
        .bind(&entry.actor_role)
        .bind(entry.action.as_str())
        .bind(entry.entity.as_str())
        .bind(entry.entity_id)
        .bind(&entry.details)
        .fetch_one(&mut *conn)
        .await
    }

    /// Queries the trail, newest first. All filters are optional; the date
    /// bounds are inclusive instants precomputed by the caller.
    pub async fn query(&self, filter: &AuditLogFilter) -> Result<Vec<AuditLogEntity>, sqlx::Error> {
        sqlx::query_as::<_, AuditLogEntity>(
            r#"
            SELECT * FROM audit_logs
            WHERE ($1::text IS NULL OR entity = $1)
              AND ($2::text IS NULL OR action = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at <= $4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.entity.map(|e| e.as_str()))
        .bind(filter.action.map(|a| a.as_str()))
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await
    }
}
