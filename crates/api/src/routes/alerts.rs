//! Alert endpoint handlers.
//!
//! Alert mutations are employee actions scoped to the employee's home
//! warehouse. The lifecycle transitions (acknowledge, resolve) are
//! idempotent on already-RESOLVED alerts: the unchanged record comes back
//! and no audit row is written.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    Actor, Alert, AlertStatus, AuditAction, AuditEntity, CreateAlertRequest, UpdateAlertRequest,
};
use persistence::repositories::{AlertRepository, SensorRepository, WarehouseRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::record_audit;

/// List alerts visible to the actor, newest first.
///
/// GET /api/v1/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let scope = actor.scope_filter()?;
    let entities = AlertRepository::new(state.pool.clone())
        .find_all(scope)
        .await?;
    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get a single alert.
///
/// GET /api/v1/alerts/:id
pub async fn get_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Alert>, ApiError> {
    let alert: Alert = AlertRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
        .into();

    actor.check_warehouse_access(alert.warehouse_id)?;
    Ok(Json(alert))
}

/// Manually create an alert.
///
/// POST /api/v1/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<Alert>), ApiError> {
    request.validate()?;

    WarehouseRepository::new(state.pool.clone())
        .find_by_id(request.warehouse_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Warehouse not found".to_string()))?;

    actor.require_employee_in(request.warehouse_id)?;

    if let Some(sensor_id) = request.sensor_id {
        ensure_sensor_in_warehouse(&state, sensor_id, request.warehouse_id).await?;
    }

    let mut tx = state.pool.begin().await?;
    let alert: Alert = AlertRepository::insert(
        &mut tx,
        request.alert_type,
        request.warehouse_id,
        request.sensor_id,
        Some(actor.user_id),
    )
    .await?
    .into();

    record_audit(
        &mut tx,
        &actor,
        AuditAction::Create,
        AuditEntity::Alerts,
        Some(alert.id),
        format!("Alert created manually, type={}", alert.alert_type.as_str()),
    )
    .await?;
    tx.commit().await?;

    info!(
        alert_id = alert.id,
        warehouse_id = alert.warehouse_id,
        alert_type = alert.alert_type.as_str(),
        "Alert created"
    );
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Update an alert's type or sensor reference. The warehouse is immutable.
///
/// PATCH /api/v1/alerts/:id
pub async fn update_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAlertRequest>,
) -> Result<Json<Alert>, ApiError> {
    let existing: Alert = AlertRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
        .into();

    actor.require_employee_in(existing.warehouse_id)?;

    let alert_type = request.alert_type.unwrap_or(existing.alert_type);
    let sensor_id = match request.sensor_id {
        Some(sensor_id) => {
            ensure_sensor_in_warehouse(&state, sensor_id, existing.warehouse_id).await?;
            Some(sensor_id)
        }
        None => existing.sensor_id,
    };

    let mut tx = state.pool.begin().await?;
    let alert: Alert = AlertRepository::update_fields(&mut tx, id, alert_type, sensor_id)
        .await?
        .into();

    record_audit(
        &mut tx,
        &actor,
        AuditAction::Update,
        AuditEntity::Alerts,
        Some(alert.id),
        format!("Alert updated, type={}", alert.alert_type.as_str()),
    )
    .await?;
    tx.commit().await?;

    info!(alert_id = alert.id, "Alert updated");
    Ok(Json(alert))
}

/// Delete an alert.
///
/// DELETE /api/v1/alerts/:id
pub async fn delete_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing: Alert = AlertRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
        .into();

    actor.require_employee_in(existing.warehouse_id)?;

    let mut tx = state.pool.begin().await?;
    AlertRepository::delete(&mut tx, id).await?;
    record_audit(
        &mut tx,
        &actor,
        AuditAction::Delete,
        AuditEntity::Alerts,
        Some(id),
        format!("Alert deleted, type={}", existing.alert_type.as_str()),
    )
    .await?;
    tx.commit().await?;

    info!(alert_id = id, "Alert deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Acknowledge an alert.
///
/// POST /api/v1/alerts/:id/acknowledge
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Alert>, ApiError> {
    transition_alert(&state, &actor, id, AlertStatus::Acknowledged).await
}

/// Resolve an alert.
///
/// POST /api/v1/alerts/:id/resolve
pub async fn resolve_alert(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Alert>, ApiError> {
    transition_alert(&state, &actor, id, AlertStatus::Resolved).await
}

/// Shared lifecycle transition. A RESOLVED alert is returned unchanged with
/// no audit row, making both transitions safe to retry.
async fn transition_alert(
    state: &AppState,
    actor: &Actor,
    id: i64,
    target: AlertStatus,
) -> Result<Json<Alert>, ApiError> {
    let existing: Alert = AlertRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
        .into();

    if existing.status == AlertStatus::Resolved {
        return Ok(Json(existing));
    }

    actor.require_employee_in(existing.warehouse_id)?;

    let resolved_at = match target {
        AlertStatus::Resolved => Some(chrono::Utc::now()),
        _ => None,
    };

    let mut tx = state.pool.begin().await?;
    let updated =
        AlertRepository::set_status(&mut tx, id, target, actor.user_id, resolved_at).await?;

    // A concurrent resolve can land between the read above and this update;
    // the status guard in the SQL makes that resolve win. Fall back to the
    // idempotent no-op path with the now-resolved record.
    let Some(entity) = updated else {
        tx.rollback().await?;
        let alert: Alert = AlertRepository::new(state.pool.clone())
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
            .into();
        return Ok(Json(alert));
    };
    let alert: Alert = entity.into();

    let verb = match target {
        AlertStatus::Acknowledged => "acknowledged",
        AlertStatus::Resolved => "resolved",
        AlertStatus::New => "reopened",
    };
    record_audit(
        &mut tx,
        actor,
        AuditAction::Update,
        AuditEntity::Alerts,
        Some(alert.id),
        format!("Alert {}, type={}", verb, alert.alert_type.as_str()),
    )
    .await?;
    tx.commit().await?;

    info!(alert_id = alert.id, status = ?alert.status, "Alert transitioned");
    Ok(Json(alert))
}

/// Rejects a sensor that does not exist or belongs to another warehouse.
async fn ensure_sensor_in_warehouse(
    state: &AppState,
    sensor_id: i64,
    warehouse_id: i64,
) -> Result<(), ApiError> {
    let sensor = SensorRepository::new(state.pool.clone())
        .find_by_id(sensor_id)
        .await?
        .ok_or_else(|| ApiError::Validation("Sensor not found".to_string()))?;

    if sensor.warehouse_id != warehouse_id {
        return Err(ApiError::Validation(
            "Sensor does not belong to the warehouse".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::models::{AlertType, CreateAlertRequest, UpdateAlertRequest};

    #[test]
    fn create_request_deserializes_camel_case() {
        let request: CreateAlertRequest =
            serde_json::from_str(r#"{"type":"HUMIDITY_HIGH","warehouseId":2,"sensorId":5}"#)
                .unwrap();
        assert_eq!(request.alert_type, AlertType::HumidityHigh);
        assert_eq!(request.warehouse_id, 2);
        assert_eq!(request.sensor_id, Some(5));
    }

    #[test]
    fn update_request_fields_are_optional() {
        let request: UpdateAlertRequest = serde_json::from_str(r#"{"type":"TEMP_LOW"}"#).unwrap();
        assert_eq!(request.alert_type, Some(AlertType::TempLow));
        assert!(request.sensor_id.is_none());
    }
}
