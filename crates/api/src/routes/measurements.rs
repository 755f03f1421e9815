//! Measurement endpoint handlers.
//!
//! Creation goes through the shared evaluator, so an API-submitted reading
//! triggers exactly the same alert reconciliation as a telemetry delivery.
//! Corrections (update/delete) do not re-run evaluation; they fix the
//! record, the next reading re-evaluates.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use domain::models::{
    Actor, Alert, AuditAction, AuditEntity, CreateMeasurementRequest, Measurement, Role, Sensor,
    UpdateMeasurementRequest,
};
use persistence::repositories::{MeasurementRepository, SensorRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::record_audit;
use crate::services::evaluator;

/// Response for a created measurement, including the alert state changes
/// the reading caused.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub measurement: Measurement,
    pub created_alerts: Vec<Alert>,
    pub resolved_alerts: Vec<Alert>,
}

/// Ingest a measurement through the API.
///
/// POST /api/v1/measurements
pub async fn create_measurement(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<IngestResponse>), ApiError> {
    request.validate()?;

    let sensor: Sensor = SensorRepository::new(state.pool.clone())
        .find_by_id(request.sensor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sensor not found".to_string()))?
        .into();

    actor.check_warehouse_access(sensor.warehouse_id)?;

    let outcome = evaluator::ingest_measurement(
        &state.pool,
        &sensor,
        request.temperature_c,
        request.humidity_percent,
        request.measured_at,
        Some(&actor),
    )
    .await?;

    info!(
        measurement_id = outcome.measurement.id,
        sensor_id = sensor.id,
        "Measurement created"
    );
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            measurement: outcome.measurement,
            created_alerts: outcome.created_alerts,
            resolved_alerts: outcome.resolved_alerts,
        }),
    ))
}

/// List measurements visible to the actor, newest first.
///
/// GET /api/v1/measurements
pub async fn list_measurements(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let scope = actor.scope_filter()?;
    let entities = MeasurementRepository::new(state.pool.clone())
        .find_all(scope)
        .await?;
    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get a single measurement.
///
/// GET /api/v1/measurements/:id
pub async fn get_measurement(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<Json<Measurement>, ApiError> {
    let entity = MeasurementRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Measurement not found".to_string()))?;

    actor.check_warehouse_access(entity.warehouse_id)?;
    Ok(Json(entity.into()))
}

/// Correct a measurement.
///
/// PATCH /api/v1/measurements/:id
pub async fn update_measurement(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMeasurementRequest>,
) -> Result<Json<Measurement>, ApiError> {
    request.validate()?;

    let existing = MeasurementRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Measurement not found".to_string()))?;

    actor.check_warehouse_access(existing.warehouse_id)?;

    let sensor_id = match request.sensor_id {
        Some(new_sensor_id) if new_sensor_id != existing.sensor_id => {
            if actor.role == Role::Employee {
                return Err(ApiError::Validation(
                    "sensorId of a measurement cannot be changed".to_string(),
                ));
            }
            SensorRepository::new(state.pool.clone())
                .find_by_id(new_sensor_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Sensor not found".to_string()))?;
            new_sensor_id
        }
        _ => existing.sensor_id,
    };

    let mut tx = state.pool.begin().await?;
    let measurement: Measurement = MeasurementRepository::update(
        &mut tx,
        id,
        sensor_id,
        request.measured_at.unwrap_or(existing.measured_at),
        request.temperature_c.unwrap_or(existing.temperature_c),
        request.humidity_percent.unwrap_or(existing.humidity_percent),
    )
    .await?
    .into();

    record_audit(
        &mut tx,
        &actor,
        AuditAction::Update,
        AuditEntity::Measurements,
        Some(measurement.id),
        format!("Measurement corrected for sensor_id={}", sensor_id),
    )
    .await?;
    tx.commit().await?;

    info!(measurement_id = measurement.id, "Measurement updated");
    Ok(Json(measurement))
}

/// Delete a measurement.
///
/// DELETE /api/v1/measurements/:id
pub async fn delete_measurement(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = MeasurementRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Measurement not found".to_string()))?;

    actor.check_warehouse_access(existing.warehouse_id)?;

    let mut tx = state.pool.begin().await?;
    MeasurementRepository::delete(&mut tx, id).await?;
    record_audit(
        &mut tx,
        &actor,
        AuditAction::Delete,
        AuditEntity::Measurements,
        Some(id),
        format!("Measurement deleted for sensor_id={}", existing.sensor_id),
    )
    .await?;
    tx.commit().await?;

    info!(measurement_id = id, "Measurement deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use domain::models::{CreateMeasurementRequest, UpdateMeasurementRequest};
    use validator::Validate;

    #[test]
    fn create_request_deserializes_camel_case() {
        let request: CreateMeasurementRequest = serde_json::from_str(
            r#"{"sensorId":4,"temperatureC":-2.5,"humidityPercent":61.0,"measuredAt":"2026-08-27T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(request.sensor_id, 4);
        assert!(request.measured_at.is_some());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn partial_update_validates_given_fields_only() {
        let request: UpdateMeasurementRequest =
            serde_json::from_str(r#"{"humidityPercent":150.0}"#).unwrap();
        assert!(request.validate().is_err());

        let request: UpdateMeasurementRequest =
            serde_json::from_str(r#"{"temperatureC":18.0}"#).unwrap();
        assert!(request.validate().is_ok());
    }
}
