//! Threshold endpoint handlers.
//!
//! One threshold configuration per warehouse. Mutations are Admin/Owner
//! operations; partial updates validate the merged bounds so a single-field
//! change can never break the min < max invariant.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    Actor, AuditAction, AuditEntity, CreateThresholdRequest, Threshold, UpdateThresholdRequest,
};
use persistence::repositories::{ThresholdRepository, WarehouseRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::record_audit;

/// List all threshold configurations.
///
/// GET /api/v1/thresholds
pub async fn list_thresholds(
    State(state): State<AppState>,
) -> Result<Json<Vec<Threshold>>, ApiError> {
    let entities = ThresholdRepository::new(state.pool.clone())
        .find_all()
        .await?;
    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// Get the threshold configuration for a warehouse.
///
/// GET /api/v1/thresholds/:warehouse_id
pub async fn get_threshold(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> Result<Json<Threshold>, ApiError> {
    let threshold: Threshold = ThresholdRepository::new(state.pool.clone())
        .find_by_warehouse(warehouse_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Threshold not found".to_string()))?
        .into();
    Ok(Json(threshold))
}

/// Create a threshold configuration for a warehouse.
///
/// POST /api/v1/thresholds
pub async fn create_threshold(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<CreateThresholdRequest>,
) -> Result<(StatusCode, Json<Threshold>), ApiError> {
    actor.require_admin()?;
    request.validate()?;
    request.bounds().validate()?;

    WarehouseRepository::new(state.pool.clone())
        .find_by_id(request.warehouse_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Warehouse not found".to_string()))?;

    let repo = ThresholdRepository::new(state.pool.clone());
    if repo.find_by_warehouse(request.warehouse_id).await?.is_some() {
        return Err(ApiError::Validation(
            "Threshold for this warehouse already exists".to_string(),
        ));
    }

    let mut tx = state.pool.begin().await?;
    let threshold: Threshold =
        ThresholdRepository::insert(&mut tx, request.warehouse_id, request.bounds())
            .await?
            .into();

    record_audit(
        &mut tx,
        &actor,
        AuditAction::Create,
        AuditEntity::Thresholds,
        Some(threshold.id),
        format!("Threshold created for warehouse_id={}", threshold.warehouse_id),
    )
    .await?;
    tx.commit().await?;

    info!(
        threshold_id = threshold.id,
        warehouse_id = threshold.warehouse_id,
        "Threshold created"
    );
    Ok((StatusCode::CREATED, Json(threshold)))
}

/// Partially update a warehouse's threshold bounds.
///
/// PATCH /api/v1/thresholds/:warehouse_id
pub async fn update_threshold(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(warehouse_id): Path<i64>,
    Json(request): Json<UpdateThresholdRequest>,
) -> Result<Json<Threshold>, ApiError> {
    actor.require_admin()?;
    request.validate()?;

    let existing: Threshold = ThresholdRepository::new(state.pool.clone())
        .find_by_warehouse(warehouse_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Threshold not found".to_string()))?
        .into();

    let merged = existing.merged(&request);
    merged.validate()?;

    let mut tx = state.pool.begin().await?;
    let threshold: Threshold = ThresholdRepository::update(&mut tx, warehouse_id, merged)
        .await?
        .into();

    record_audit(
        &mut tx,
        &actor,
        AuditAction::Update,
        AuditEntity::Thresholds,
        Some(threshold.id),
        format!("Threshold updated for warehouse_id={}", warehouse_id),
    )
    .await?;
    tx.commit().await?;

    info!(warehouse_id, "Threshold updated");
    Ok(Json(threshold))
}

/// Delete a warehouse's threshold configuration. The warehouse then runs
/// unmonitored until a new configuration is created.
///
/// DELETE /api/v1/thresholds/:warehouse_id
pub async fn delete_threshold(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(warehouse_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    actor.require_admin()?;

    let existing: Threshold = ThresholdRepository::new(state.pool.clone())
        .find_by_warehouse(warehouse_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Threshold not found".to_string()))?
        .into();

    let mut tx = state.pool.begin().await?;
    ThresholdRepository::delete(&mut tx, warehouse_id).await?;
    record_audit(
        &mut tx,
        &actor,
        AuditAction::Delete,
        AuditEntity::Thresholds,
        Some(existing.id),
        format!("Threshold deleted for warehouse_id={}", warehouse_id),
    )
    .await?;
    tx.commit().await?;

    info!(warehouse_id, "Threshold deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use domain::models::{CreateThresholdRequest, UpdateThresholdRequest};
    use validator::Validate;

    #[test]
    fn create_request_deserializes_camel_case() {
        let request: CreateThresholdRequest = serde_json::from_str(
            r#"{"warehouseId":1,"tempMin":10.0,"tempMax":25.0,"humidityMin":40.0,"humidityMax":70.0}"#,
        )
        .unwrap();
        assert_eq!(request.warehouse_id, 1);
        assert!(request.validate().is_ok());
        assert!(request.bounds().validate().is_ok());
    }

    #[test]
    fn humidity_outside_percentage_fails_request_validation() {
        let request: CreateThresholdRequest = serde_json::from_str(
            r#"{"warehouseId":1,"tempMin":10.0,"tempMax":25.0,"humidityMin":40.0,"humidityMax":130.0}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_update_is_a_valid_payload() {
        let request: UpdateThresholdRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());
        assert!(request.temp_min.is_none());
    }
}
