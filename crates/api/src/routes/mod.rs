//! HTTP route handlers.

pub mod alerts;
pub mod audit_logs;
pub mod health;
pub mod measurements;
pub mod reports;
pub mod thresholds;

use domain::models::{Actor, AuditAction, AuditEntity, NewAuditEntry};
use persistence::repositories::AuditLogRepository;

use crate::error::ApiError;

/// Appends an audit row for a handler mutation on the handler's open
/// transaction, attributed to the acting user.
pub(crate) async fn record_audit(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    actor: &Actor,
    action: AuditAction,
    entity: AuditEntity,
    entity_id: Option<i64>,
    details: String,
) -> Result<(), ApiError> {
    let entry =
        NewAuditEntry::by_actor(actor.user_id, actor.role, action, entity, entity_id, details)?;
    AuditLogRepository::append(tx, &entry).await?;
    Ok(())
}
