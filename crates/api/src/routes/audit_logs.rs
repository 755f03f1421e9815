//! Audit trail query endpoint.
//!
//! Read-only surface over the append-only trail. Date filters are inclusive
//! local calendar days, widened to instants before hitting the database.

use axum::{
    extract::{Extension, Query, State},
    Json,
};

use domain::models::{Actor, AuditLogEntry, AuditLogQuery};
use persistence::repositories::{AuditLogFilter, AuditLogRepository};
use shared::time::{local_day_end, local_day_start};

use crate::app::AppState;
use crate::error::ApiError;

/// Query the audit trail, newest first.
///
/// GET /api/v1/audit-logs?entity=&action=&from=&to=
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    actor.require_admin()?;

    let filter = build_filter(&query)?;
    let entities = AuditLogRepository::new(state.pool.clone())
        .query(&filter)
        .await?;
    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Turns the raw query strings into typed filters, rejecting unknown
/// entity/action values.
fn build_filter(query: &AuditLogQuery) -> Result<AuditLogFilter, ApiError> {
    let entity = query
        .entity
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: domain::models::ParseAuditFilterError| ApiError::Validation(e.to_string()))?;
    let action = query
        .action
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: domain::models::ParseAuditFilterError| ApiError::Validation(e.to_string()))?;

    Ok(AuditLogFilter {
        entity,
        action,
        from: query.from.map(local_day_start),
        to: query.to.map(local_day_end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{AuditAction, AuditEntity};

    #[test]
    fn known_filters_parse() {
        let query = AuditLogQuery {
            entity: Some("ALERTS".to_string()),
            action: Some("UPDATE".to_string()),
            from: None,
            to: None,
        };
        let filter = build_filter(&query).unwrap();
        assert_eq!(filter.entity, Some(AuditEntity::Alerts));
        assert_eq!(filter.action, Some(AuditAction::Update));
    }

    #[test]
    fn unknown_entity_is_a_validation_error() {
        let query = AuditLogQuery {
            entity: Some("HONEY_BATCHES".to_string()),
            ..Default::default()
        };
        assert!(build_filter(&query).is_err());
    }

    #[test]
    fn date_filters_cover_the_whole_local_day() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let query = AuditLogQuery {
            from: Some(date),
            to: Some(date),
            ..Default::default()
        };
        let filter = build_filter(&query).unwrap();
        let (from, to) = (filter.from.unwrap(), filter.to.unwrap());
        assert!(from < to);
        assert_eq!((to - from).num_seconds(), 86_399);
    }
}
