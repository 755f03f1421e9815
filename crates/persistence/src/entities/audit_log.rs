//! Audit log database entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database entity for the audit_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogEntity {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub actor_user_id: i64,
    pub actor_role: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
}

impl From<AuditLogEntity> for domain::models::AuditLogEntry {
    fn from(entity: AuditLogEntity) -> Self {
        Self {
            id: entity.id,
            created_at: entity.created_at,
            actor_user_id: entity.actor_user_id,
            actor_role: entity.actor_role,
            action: entity.action,
            entity: entity.entity,
            entity_id: entity.entity_id,
            details: entity.details,
        }
    }
}
